//! Transport layer for rawman exchanges
//!
//! The session layer only needs one capability: "GET this target, in this
//! [`SessionMode`], and give me the body". [`Transport`] is that seam, and
//! [`HttpTransport`] implements it over reqwest with a [`CookieStore`].
//!
//! # Session modes
//!
//! - [`SessionMode::WriteSession`]: cookies the server sets are merged into the
//!   store. The stored cookie is presented as well, so a challenge issued on
//!   one exchange and the login that answers it share a server session.
//! - [`SessionMode::ReadSession`]: the stored cookie is presented; anything
//!   the server sets is ignored.

use std::time::Duration;

use ajam_protocol::SessionMode;
use async_trait::async_trait;
use reqwest::header::COOKIE;
use tracing::debug;

use crate::cookie_store::{CookieStore, StoredCookie};
use crate::error::{Error, Result};

/// Exchange timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// One request/response exchange against the rawman endpoint.
#[async_trait]
pub trait Transport: Send + Sync {
	/// Issues a GET for the fully built `url` and returns the response body.
	async fn request(&self, url: &str, mode: SessionMode) -> Result<String>;
}

/// reqwest-backed transport with a file cookie store.
#[derive(Debug, Clone)]
pub struct HttpTransport {
	client: reqwest::Client,
	cookies: CookieStore,
	timeout: Duration,
}

impl HttpTransport {
	pub fn new(cookies: CookieStore, timeout: Duration) -> Result<Self> {
		let client = reqwest::Client::builder()
			.timeout(timeout)
			.build()
			.map_err(|e| Error::ClientBuild(e.to_string()))?;
		Ok(Self {
			client,
			cookies,
			timeout,
		})
	}

	pub fn cookie_store(&self) -> &CookieStore {
		&self.cookies
	}

	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	fn classify(&self, err: reqwest::Error, url: &str) -> Error {
		if err.is_timeout() {
			return Error::Timeout {
				ms: self.timeout.as_millis() as u64,
				url: display_target(url),
			};
		}
		Error::Transport(format!("{} ({})", err.without_url(), display_target(url)))
	}
}

#[async_trait]
impl Transport for HttpTransport {
	async fn request(&self, url: &str, mode: SessionMode) -> Result<String> {
		let target = display_target(url);
		let mut request = self.client.get(url);
		if let Some(cookie) = self.cookies.header_value()? {
			request = request.header(COOKIE, cookie);
		}

		debug!(target = "ajam", %mode, url = %target, "rawman request");
		let response = request.send().await.map_err(|e| self.classify(e, url))?;
		let status = response.status();

		if mode == SessionMode::WriteSession {
			let issued: Vec<StoredCookie> = response
				.cookies()
				.map(|c| StoredCookie::new(c.name(), c.value()))
				.collect();
			if !issued.is_empty() {
				debug!(target = "ajam", count = issued.len(), "persisting session cookies");
				self.cookies.merge(issued)?;
			}
		}

		if !status.is_success() {
			return Err(Error::Status {
				status: status.as_u16(),
				url: target,
			});
		}

		let body = response.text().await.map_err(|e| self.classify(e, url))?;
		debug!(target = "ajam", %mode, bytes = body.len(), "rawman response");
		Ok(body)
	}
}

/// Strips everything but the action from a request target.
///
/// Login targets carry the secret or key in the query, so errors and logs
/// only ever show `base?action=Name`.
pub fn display_target(url: &str) -> String {
	let Some((base, query)) = url.split_once('?') else {
		return url.to_string();
	};
	match query.split('&').find(|pair| pair.starts_with("action=")) {
		Some(action) => format!("{base}?{action}"),
		None => base.to_string(),
	}
}

#[cfg(test)]
mod tests;
