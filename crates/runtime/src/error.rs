//! Error types for the AJAM runtime.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while talking to the rawman endpoint or the cookie file.
#[derive(Debug, Error)]
pub enum Error {
	/// Failed to build the HTTP client.
	#[error("Failed to build HTTP client: {0}")]
	ClientBuild(String),

	/// The HTTP exchange failed before a response body was read.
	#[error("Transport error: {0}")]
	Transport(String),

	/// The server answered with a non-success HTTP status.
	#[error("HTTP {status} from {url}")]
	Status { status: u16, url: String },

	/// The exchange exceeded the configured timeout.
	#[error("Timeout after {ms}ms waiting for {url}")]
	Timeout { ms: u64, url: String },

	/// Cookie file could not be created, read or written.
	#[error("Cookie store {} is not readable/writable: {source}", path.display())]
	Storage {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

impl Error {
	/// Returns true if this error is a timeout.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Error::Timeout { .. })
	}

	/// Returns true if this error comes from the cookie file rather than the network.
	pub fn is_storage(&self) -> bool {
		matches!(self, Error::Storage { .. })
	}
}
