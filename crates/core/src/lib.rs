//! Client for the Asterisk manager interface over HTTP (AJAM).
//!
//! [`Client`] sends one action at a time to a `rawman` endpoint and returns
//! its parsed [`RawResult`]. Before every action it pings the server on the
//! stored session and, if the session is gone, logs in again (plaintext or
//! MD5 challenge-response) exactly once.
//!
//! ```ignore
//! use ajam::{AuthType, Client, ClientConfig, params};
//!
//! let config = ClientConfig::new("http://pbx:8088/asterisk/rawman", "admin", "secret")
//!     .with_auth_type(AuthType::ChallengeMd5);
//! let mut client = Client::from_config(&config)?;
//! let result = client
//!     .execute("Originate", &params([("Channel", "SIP/100"), ("Exten", "200")]))
//!     .await?;
//! assert!(result.is_success());
//! ```
//!
//! A client owns one session and must not be shared between tasks without
//! external synchronisation; every call takes `&mut self`.

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use ajam_protocol::{
	Block, Headers, Params, QueryBuilder, QueryEncoding, RawResult, SessionMode, ShapeConflict, params, parse,
};
pub use ajam_runtime::{CookieStore, HttpTransport, Transport};
pub use client::Client;
pub use config::ClientConfig;
pub use credentials::{AuthType, Credentials, Secret, challenge_key};
pub use error::{AuthError, Error, Result};
pub use session::{SessionManager, SessionState};
