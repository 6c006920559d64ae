//! Scripted in-memory transport for state machine tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use ajam_protocol::SessionMode;
use ajam_runtime::{Error, Result, Transport};
use async_trait::async_trait;

pub(crate) const BASE: &str = "http://pbx.test:8088/asterisk/rawman";

pub(crate) const SUCCESS: &str = "Response: Success\r\nMessage: ok\r\n\r\n";
pub(crate) const PONG: &str = "Response: Success\r\nPing: Pong\r\nTimestamp: 1700000000.000000\r\n\r\n";
pub(crate) const NOT_LOGGED_IN: &str = "Response: Error\r\nMessage: Permission denied\r\n\r\n";
pub(crate) const AUTH_FAILED: &str = "Response: Error\r\nMessage: Authentication failed\r\n\r\n";

enum Reply {
	Body(String),
	Timeout,
}

#[derive(Default)]
struct Inner {
	replies: Mutex<VecDeque<Reply>>,
	calls: Mutex<Vec<(String, SessionMode)>>,
}

/// Answers requests from a queue and records every call.
///
/// Clones share state, so a test can keep one handle while the client owns another.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
	inner: Arc<Inner>,
}

impl ScriptedTransport {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn reply(self, body: &str) -> Self {
		self.inner.replies.lock().unwrap().push_back(Reply::Body(body.to_string()));
		self
	}

	pub(crate) fn time_out(self) -> Self {
		self.inner.replies.lock().unwrap().push_back(Reply::Timeout);
		self
	}

	pub(crate) fn calls(&self) -> Vec<(String, SessionMode)> {
		self.inner.calls.lock().unwrap().clone()
	}

	/// Action names of every request so far, in order.
	pub(crate) fn actions(&self) -> Vec<String> {
		self.calls()
			.iter()
			.map(|(url, _)| {
				url.split('?')
					.nth(1)
					.and_then(|q| q.split('&').next())
					.and_then(|a| a.strip_prefix("action="))
					.unwrap_or_default()
					.to_string()
			})
			.collect()
	}

	pub(crate) fn count(&self, action: &str) -> usize {
		self.actions().iter().filter(|a| *a == action).count()
	}
}

#[async_trait]
impl Transport for ScriptedTransport {
	async fn request(&self, url: &str, mode: SessionMode) -> Result<String> {
		self.inner.calls.lock().unwrap().push((url.to_string(), mode));
		let reply = self.inner.replies.lock().unwrap().pop_front();
		match reply {
			Some(Reply::Body(body)) => Ok(body),
			Some(Reply::Timeout) => Err(Error::Timeout {
				ms: 10_000,
				url: ajam_runtime::display_target(url),
			}),
			None => panic!("unexpected request: {url}"),
		}
	}
}
