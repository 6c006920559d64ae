//! Session liveness and the login sub-protocol.
//!
//! The manager session lives on the server and is identified by the cookie
//! the transport persists. [`SessionManager`] never assumes it is still
//! valid: [`ensure_live`](SessionManager::ensure_live) pings first and logs
//! in only when the ping fails.
//!
//! # Login flows
//!
//! Plaintext:
//!
//! ```text
//! Login {Username, Secret}                      -> Response: Success
//! ```
//!
//! MD5 challenge-response:
//!
//! ```text
//! Challenge {Authtype: md5}                     -> Response: Success, Challenge: <nonce>
//! Login {AuthType: MD5, Username, Key}          -> Response: Success
//!        Key = hex(md5(nonce ++ secret))
//! ```
//!
//! Both login exchanges, and the challenge, run in
//! [`SessionMode::WriteSession`] so the session cookie the server issues is
//! persisted; everything else runs in [`SessionMode::ReadSession`].

use ajam_protocol::action::{CHALLENGE, LOGIN, PING};
use ajam_protocol::response::{MESSAGE, RESPONSE, SUCCESS};
use ajam_protocol::{Params, ParsedResponse, QueryBuilder, SessionMode, params, parse_blocks};
use ajam_runtime::Transport;
use tracing::{debug, info, warn};

use crate::credentials::{AuthType, Credentials, challenge_key};
use crate::error::{AuthError, Result};

/// Authentication state as last observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
	#[default]
	LoggedOut,
	LoggedIn,
}

/// Owns the credentials and the session of one client.
pub struct SessionManager<T> {
	credentials: Credentials,
	queries: QueryBuilder,
	transport: T,
	state: SessionState,
}

impl<T: Transport> SessionManager<T> {
	pub fn new(credentials: Credentials, queries: QueryBuilder, transport: T) -> Self {
		Self {
			credentials,
			queries,
			transport,
			state: SessionState::LoggedOut,
		}
	}

	pub fn state(&self) -> SessionState {
		self.state
	}

	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	pub fn queries(&self) -> &QueryBuilder {
		&self.queries
	}

	pub fn transport(&self) -> &T {
		&self.transport
	}

	/// Sends one action and parses the reply, keeping the ghost block.
	pub(crate) async fn exchange(&self, action: &str, params: &Params, mode: SessionMode) -> Result<ParsedResponse> {
		let url = self.queries.build(action, params);
		let body = self.transport.request(&url, mode).await?;
		let parsed = parse_blocks(&body);
		for conflict in &parsed.conflicts {
			warn!(
				target = "ajam",
				action,
				block = conflict.block,
				expected = conflict.expected,
				line = %conflict.line,
				"response line does not match its block shape"
			);
		}
		Ok(parsed)
	}

	/// Pings on the stored session; true iff the server answers `Success`.
	pub async fn is_live(&mut self) -> Result<bool> {
		let ping = self.exchange(PING, &Params::new(), SessionMode::ReadSession).await?;
		let live = ping.headers.get(RESPONSE) == Some(SUCCESS);
		self.state = if live { SessionState::LoggedIn } else { SessionState::LoggedOut };
		debug!(target = "ajam", live, "session ping");
		Ok(live)
	}

	/// Runs the login sub-protocol for the configured [`AuthType`].
	pub async fn login(&mut self) -> Result<()> {
		self.state = SessionState::LoggedOut;
		let auth_type = self.credentials.auth_type;
		let outcome = match auth_type {
			AuthType::Plaintext => self.login_plaintext().await,
			AuthType::ChallengeMd5 => self.login_md5().await,
		};

		match &outcome {
			Ok(()) => {
				self.state = SessionState::LoggedIn;
				info!(target = "ajam", user = %self.credentials.username, %auth_type, "login accepted");
			}
			Err(err) => {
				warn!(target = "ajam", user = %self.credentials.username, %auth_type, error = %err, "login failed");
			}
		}
		outcome
	}

	/// Logs in unless a ping shows the stored session is still live.
	///
	/// At most one login attempt is made; its failure is returned as is.
	pub async fn ensure_live(&mut self) -> Result<()> {
		if self.is_live().await? {
			return Ok(());
		}
		debug!(target = "ajam", "session not live, logging in");
		self.login().await
	}

	async fn login_plaintext(&self) -> Result<()> {
		let params = params([
			("Username", self.credentials.username.as_str()),
			("Secret", self.credentials.secret.expose()),
		]);
		let reply = self.exchange(LOGIN, &params, SessionMode::WriteSession).await?;
		self.check_login(&reply)
	}

	async fn login_md5(&self) -> Result<()> {
		let challenge = self
			.exchange(CHALLENGE, &params([("Authtype", "md5")]), SessionMode::WriteSession)
			.await?;
		if challenge.headers.get(RESPONSE) != Some(SUCCESS) {
			return Err(AuthError::ChallengeRefused {
				message: message_of(&challenge),
			}
			.into());
		}

		// A challenge reply has a single terminator, so the nonce sits in
		// the block the final result would drop.
		let nonce = challenge
			.blocks
			.first()
			.and_then(|block| block.get("Challenge"))
			.filter(|nonce| !nonce.is_empty())
			.ok_or(AuthError::MissingChallenge)?;

		let key = challenge_key(nonce, self.credentials.secret.expose());
		let params = params([
			("AuthType", "MD5"),
			("Username", self.credentials.username.as_str()),
			("Key", key.as_str()),
		]);
		let reply = self.exchange(LOGIN, &params, SessionMode::WriteSession).await?;
		self.check_login(&reply)
	}

	fn check_login(&self, reply: &ParsedResponse) -> Result<()> {
		if reply.headers.get(RESPONSE) == Some(SUCCESS) {
			return Ok(());
		}
		Err(AuthError::Rejected {
			username: self.credentials.username.clone(),
			message: message_of(reply),
		}
		.into())
	}
}

fn message_of(reply: &ParsedResponse) -> String {
	match (reply.headers.get(RESPONSE), reply.headers.get(MESSAGE)) {
		(_, Some(message)) => message.to_string(),
		(Some(response), None) => format!("Response: {response}"),
		(None, None) => "no Response header".to_string(),
	}
}

#[cfg(test)]
mod tests;
