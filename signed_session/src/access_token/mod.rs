mod types;

pub use types::AccessToken;
