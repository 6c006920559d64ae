//! Manager credentials and the MD5 challenge key.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

/// How the client proves knowledge of the manager secret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AuthType {
	/// `Login` with `Username` and `Secret` in the clear.
	#[default]
	Plaintext,
	/// `Challenge` for a nonce, then `Login` with `Key = md5(nonce ++ secret)`.
	ChallengeMd5,
}

impl AuthType {
	pub fn as_str(self) -> &'static str {
		match self {
			AuthType::Plaintext => "plaintext",
			AuthType::ChallengeMd5 => "md5",
		}
	}
}

impl std::fmt::Display for AuthType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl std::str::FromStr for AuthType {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"plaintext" | "plain" => Ok(AuthType::Plaintext),
			"md5" | "challenge-md5" => Ok(AuthType::ChallengeMd5),
			other => Err(format!("unknown auth type '{other}' (expected plaintext or md5)")),
		}
	}
}

impl TryFrom<String> for AuthType {
	type Error = String;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

impl From<AuthType> for String {
	fn from(auth: AuthType) -> Self {
		auth.as_str().to_string()
	}
}

/// Manager secret; never printed by `Debug`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
	pub fn new(secret: impl Into<String>) -> Self {
		Self(secret.into())
	}

	pub fn expose(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl std::fmt::Debug for Secret {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("Secret(***)")
	}
}

impl From<&str> for Secret {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for Secret {
	fn from(value: String) -> Self {
		Self(value)
	}
}

/// Username, secret and auth type of one manager account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
	pub username: String,
	pub secret: Secret,
	pub auth_type: AuthType,
}

impl Credentials {
	pub fn new(username: impl Into<String>, secret: impl Into<Secret>, auth_type: AuthType) -> Self {
		Self {
			username: username.into(),
			secret: secret.into(),
			auth_type,
		}
	}
}

/// Lowercase hex MD5 of the nonce bytes followed by the secret bytes.
pub fn challenge_key(nonce: &str, secret: &str) -> String {
	let mut hasher = Md5::new();
	hasher.update(nonce.as_bytes());
	hasher.update(secret.as_bytes());
	hex::encode(hasher.finalize())
}
