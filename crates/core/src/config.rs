//! Connection settings for one manager account.

use std::path::PathBuf;
use std::time::Duration;

use ajam_protocol::QueryEncoding;
use ajam_runtime::DEFAULT_COOKIE_FILE;
use serde::{Deserialize, Serialize};

use crate::credentials::{AuthType, Credentials, Secret};
use crate::error::{Error, Result};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Everything needed to build a [`Client`](crate::Client).
///
/// Deserializes from partial JSON; absent fields take their defaults and
/// [`validate`](Self::validate) reports the required ones that stayed empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
	/// Full `rawman` URL, e.g. `http://pbx:8088/asterisk/rawman`.
	pub url: String,
	pub username: String,
	pub secret: Secret,
	pub auth_type: AuthType,
	/// Where the session cookie is persisted between exchanges.
	pub cookie_file: PathBuf,
	pub timeout_secs: u64,
	pub query_encoding: QueryEncoding,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			url: String::new(),
			username: String::new(),
			secret: Secret::default(),
			auth_type: AuthType::default(),
			cookie_file: PathBuf::from(DEFAULT_COOKIE_FILE),
			timeout_secs: DEFAULT_TIMEOUT_SECS,
			query_encoding: QueryEncoding::default(),
		}
	}
}

impl ClientConfig {
	pub fn new(url: impl Into<String>, username: impl Into<String>, secret: impl Into<Secret>) -> Self {
		Self {
			url: url.into(),
			username: username.into(),
			secret: secret.into(),
			..Default::default()
		}
	}

	pub fn with_auth_type(mut self, auth_type: AuthType) -> Self {
		self.auth_type = auth_type;
		self
	}

	pub fn with_cookie_file(mut self, path: impl Into<PathBuf>) -> Self {
		self.cookie_file = path.into();
		self
	}

	pub fn with_timeout_secs(mut self, secs: u64) -> Self {
		self.timeout_secs = secs;
		self
	}

	pub fn with_query_encoding(mut self, encoding: QueryEncoding) -> Self {
		self.query_encoding = encoding;
		self
	}

	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs)
	}

	pub fn credentials(&self) -> Credentials {
		Credentials::new(self.username.trim(), self.secret.clone(), self.auth_type)
	}

	/// Checks that the required connection parameters are present.
	pub fn validate(&self) -> Result<()> {
		let url = self.url.trim();
		if url.is_empty() {
			return Err(Error::Config("url is required".into()));
		}
		if !(url.starts_with("http://") || url.starts_with("https://")) {
			return Err(Error::Config(format!("url must start with http:// or https://, got '{url}'")));
		}
		if self.username.trim().is_empty() {
			return Err(Error::Config("username is required".into()));
		}
		if self.auth_type == AuthType::ChallengeMd5 && self.secret.is_empty() {
			return Err(Error::Config("secret is required for md5 authentication".into()));
		}
		if self.cookie_file.as_os_str().is_empty() {
			return Err(Error::Config("cookie_file must not be empty".into()));
		}
		if self.timeout_secs == 0 {
			return Err(Error::Config("timeout_secs must be greater than zero".into()));
		}
		Ok(())
	}
}
