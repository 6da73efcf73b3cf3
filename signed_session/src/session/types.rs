use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// Session payload. Keys iterate in sorted order.
pub type SessionData = BTreeMap<String, Value>;

/// Reserved keys of a fully populated session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    Id,
    ClientSig,
    SignInInfo,
    /// Nested inside `SignInInfo`
    AccessToken,
    /// Epoch milliseconds
    Expires,
}

impl SessionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKey::Id => "Id",
            SessionKey::ClientSig => "ClientSig",
            SessionKey::SignInInfo => "SignInInfo",
            SessionKey::AccessToken => "AccessToken",
            SessionKey::Expires => "Expires",
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Missing, `null`, `false`, `0` and `""` all count as absent.
pub(super) fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}
