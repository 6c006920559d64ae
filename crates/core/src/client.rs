//! High-level action executor.

use ajam_protocol::action::PING;
use ajam_protocol::{Params, QueryBuilder, RawResult, SessionMode};
use ajam_runtime::{CookieStore, HttpTransport, Transport};
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::session::SessionManager;

/// Sends manager actions over one persisted session.
///
/// Each [`execute`](Self::execute) pings first and logs in at most once
/// before sending the action itself.
pub struct Client<T = HttpTransport> {
	session: SessionManager<T>,
}

impl Client<HttpTransport> {
	/// Validates `config`, opens the cookie file and builds the HTTP transport.
	pub fn from_config(config: &ClientConfig) -> Result<Self> {
		config.validate()?;
		let cookies = CookieStore::open(&config.cookie_file)?;
		let transport = HttpTransport::new(cookies, config.timeout())?;
		info!(
			target = "ajam",
			url = %config.url.trim(),
			user = %config.username.trim(),
			auth_type = %config.auth_type,
			cookie_file = %config.cookie_file.display(),
			"client ready"
		);
		Ok(Self::from_parts(config.credentials(), queries(config), transport))
	}
}

impl<T: Transport> Client<T> {
	/// Builds a client over a caller-supplied transport.
	pub fn new(config: &ClientConfig, transport: T) -> Result<Self> {
		config.validate()?;
		Ok(Self::from_parts(config.credentials(), queries(config), transport))
	}

	pub fn from_parts(credentials: Credentials, queries: QueryBuilder, transport: T) -> Self {
		Self {
			session: SessionManager::new(credentials, queries, transport),
		}
	}

	pub fn session(&self) -> &SessionManager<T> {
		&self.session
	}

	/// Ensures a live session, then sends `action` with `params`.
	///
	/// The returned result may itself carry `Response: Error`; that is the
	/// server's answer, not a client failure.
	pub async fn execute(&mut self, action: &str, params: &Params) -> Result<RawResult> {
		let action = action.trim();
		if action.is_empty() {
			return Err(Error::Usage("action name is required".into()));
		}

		self.session.ensure_live().await?;

		let parsed = self.session.exchange(action, params, SessionMode::ReadSession).await?;
		if parsed.headers.is_empty() {
			return Err(Error::Protocol(format!("{action} response carried no status headers")));
		}
		let result = parsed.into_result();
		debug!(
			target = "ajam",
			action,
			response = result.response().unwrap_or_default(),
			blocks = result.data.len(),
			"action complete"
		);
		Ok(result)
	}

	/// Sends `Ping`, logging in first if needed.
	pub async fn ping(&mut self) -> Result<RawResult> {
		self.execute(PING, &Params::new()).await
	}

	/// Forces the login sub-protocol, regardless of the current session.
	pub async fn login(&mut self) -> Result<()> {
		self.session.login().await
	}
}

fn queries(config: &ClientConfig) -> QueryBuilder {
	QueryBuilder::new(config.url.trim()).with_encoding(config.query_encoding)
}
