//! Action names, parameters and exchange modes.

use indexmap::IndexMap;

/// Parameters of one action, emitted on the wire in insertion order.
pub type Params = IndexMap<String, String>;

/// Liveness probe; answered with `Response: Success` on an authenticated session.
pub const PING: &str = "Ping";

/// Session login, plaintext or MD5 keyed.
pub const LOGIN: &str = "Login";

/// Requests a nonce for MD5 challenge-response login.
pub const CHALLENGE: &str = "Challenge";

/// Builds [`Params`] from anything that yields key/value pairs.
///
/// ```ignore
/// let p = params([("Channel", "SIP/100"), ("Exten", "200")]);
/// ```
pub fn params<I, K, V>(pairs: I) -> Params
where
	I: IntoIterator<Item = (K, V)>,
	K: Into<String>,
	V: Into<String>,
{
	pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// How an exchange interacts with the persisted session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionMode {
	/// Challenge and login: present the stored cookie, then persist any cookie
	/// the server issues.
	WriteSession,
	/// Regular command: present the stored cookie, never overwrite it.
	ReadSession,
}

impl SessionMode {
	pub fn as_str(self) -> &'static str {
		match self {
			SessionMode::WriteSession => "write-session",
			SessionMode::ReadSession => "read-session",
		}
	}
}

impl std::fmt::Display for SessionMode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
