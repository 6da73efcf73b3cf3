use http::StatusCode;
use signed_session::SessionError;

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)>;
}

/// Not-signed-in outcomes become 401 with a generic message; everything else is
/// a server fault. Error details never reach the client.
impl<T> IntoResponseError<T> for Result<T, SessionError> {
    fn into_response_error(self) -> Result<T, (StatusCode, String)> {
        self.map_err(|e| {
            if e.requires_sign_in() {
                tracing::debug!("Not signed in: {}", e);
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            } else {
                tracing::error!("Session error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        })
    }
}
