//! Error types for the AJAM client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons the login sub-protocol can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
	/// `Login` answered with anything but `Response: Success`.
	#[error("login rejected for user '{username}': {message}")]
	Rejected { username: String, message: String },

	/// `Challenge` answered with anything but `Response: Success`.
	#[error("challenge refused: {message}")]
	ChallengeRefused { message: String },

	/// `Challenge` succeeded but carried no nonce.
	#[error("challenge response carried no Challenge nonce")]
	MissingChallenge,
}

/// Errors surfaced by [`Client`](crate::Client).
#[derive(Debug, Error)]
pub enum Error {
	/// Required connection parameters are missing or invalid.
	#[error("configuration error: {0}")]
	Config(String),

	/// The cookie file cannot be created, read or written.
	#[error(transparent)]
	Storage(ajam_runtime::Error),

	/// The login sub-protocol failed.
	#[error("authentication failed: {0}")]
	Auth(#[from] AuthError),

	/// The HTTP exchange failed, returned a failure status or timed out.
	#[error(transparent)]
	Transport(ajam_runtime::Error),

	/// The response carried none of the expected status headers.
	#[error("protocol error: {0}")]
	Protocol(String),

	/// The caller broke the API contract (e.g. an empty action name).
	#[error("usage error: {0}")]
	Usage(String),
}

impl From<ajam_runtime::Error> for Error {
	fn from(err: ajam_runtime::Error) -> Self {
		if err.is_storage() {
			Error::Storage(err)
		} else {
			Error::Transport(err)
		}
	}
}

impl Error {
	/// Stable identifier of the error kind, used for structured output.
	pub fn kind(&self) -> &'static str {
		match self {
			Error::Config(_) => "CONFIG_ERROR",
			Error::Storage(_) => "STORAGE_ERROR",
			Error::Auth(_) => "AUTH_ERROR",
			Error::Transport(_) => "TRANSPORT_ERROR",
			Error::Protocol(_) => "PROTOCOL_ERROR",
			Error::Usage(_) => "USAGE_ERROR",
		}
	}

	/// Returns true if the exchange timed out.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Error::Transport(err) if err.is_timeout())
	}

	/// Returns true if the caller, not the server, is at fault.
	pub fn is_caller_error(&self) -> bool {
		matches!(self, Error::Config(_) | Error::Usage(_))
	}
}
