//! Structured output envelope for all CLI commands.
//!
//! ## Output Contract
//!
//! Every command produces one envelope on stdout:
//!
//! ```json
//! {
//!   "schemaVersion": 1,
//!   "ok": true,
//!   "command": "exec",
//!   "data": { "headers": { "Response": "Success" }, "data": [] },
//!   "timings": { "durationMs": 12 }
//! }
//! ```
//!
//! On failure:
//!
//! ```json
//! {
//!   "schemaVersion": 1,
//!   "ok": false,
//!   "command": "exec",
//!   "error": {
//!     "code": "AUTH_ERROR",
//!     "message": "authentication failed: login rejected for user 'admin': Authentication failed"
//!   }
//! }
//! ```
//!
//! Text output prints the data only; errors always go to stderr.

#[cfg(test)]
mod tests;

use std::fmt::Write as _;
use std::time::Instant;

use ajam::{Block, RawResult};
use serde::Serialize;

/// Current schema version for command output.
pub const SCHEMA_VERSION: u32 = 1;

/// Output format for CLI results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
	/// JSON envelope (default)
	#[default]
	Json,
	/// Human-readable text
	Text,
}

impl std::fmt::Display for OutputFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			OutputFormat::Json => write!(f, "json"),
			OutputFormat::Text => write!(f, "text"),
		}
	}
}

/// The result envelope returned by all commands.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T: Serialize> {
	pub schema_version: u32,
	pub ok: bool,
	pub command: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timings: Option<Timings>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandError {
	/// Stable error kind, e.g. `TRANSPORT_ERROR`.
	pub code: String,
	pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timings {
	pub duration_ms: u64,
}

/// Data returned by `ajam login`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
	pub username: String,
	pub auth_type: String,
}

pub struct ResultBuilder<T: Serialize> {
	command: String,
	data: Option<T>,
	error: Option<CommandError>,
	start_time: Instant,
}

impl<T: Serialize> ResultBuilder<T> {
	pub fn new(command: impl Into<String>) -> Self {
		Self {
			command: command.into(),
			data: None,
			error: None,
			start_time: Instant::now(),
		}
	}

	pub fn data(mut self, data: T) -> Self {
		self.data = Some(data);
		self
	}

	pub fn error(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
		self.error = Some(CommandError {
			code: code.into(),
			message: message.into(),
		});
		self
	}

	pub fn build(self) -> CommandResult<T> {
		CommandResult {
			schema_version: SCHEMA_VERSION,
			ok: self.error.is_none(),
			command: self.command,
			data: self.data,
			error: self.error,
			timings: Some(Timings {
				duration_ms: self.start_time.elapsed().as_millis() as u64,
			}),
		}
	}
}

/// Plain-text rendering of command data.
pub trait TextOutput {
	fn to_text(&self) -> String;
}

impl TextOutput for () {
	fn to_text(&self) -> String {
		String::new()
	}
}

impl TextOutput for RawResult {
	fn to_text(&self) -> String {
		let mut out = String::new();
		for (key, value) in self.headers.iter() {
			let _ = writeln!(out, "{key}: {value}");
		}
		for (index, block) in self.data.iter().enumerate() {
			let _ = writeln!(out, "\n[{index}]");
			match block {
				Block::Empty => {}
				Block::Fields(fields) => {
					for (key, value) in fields {
						let _ = writeln!(out, "{key}: {value}");
					}
				}
				Block::Lines(lines) => {
					for line in lines {
						let _ = writeln!(out, "{line}");
					}
				}
			}
		}
		for conflict in &self.conflicts {
			let _ = writeln!(
				out,
				"\n[warning] block {} expected {}: {}",
				conflict.block, conflict.expected, conflict.line
			);
		}
		out
	}
}

impl TextOutput for LoginData {
	fn to_text(&self) -> String {
		format!("Logged in as {} ({})\n", self.username, self.auth_type)
	}
}

/// Renders a result in the requested format.
pub fn render<T: Serialize + TextOutput>(result: &CommandResult<T>, format: OutputFormat) -> String {
	match format {
		OutputFormat::Json => serde_json::to_string_pretty(result).unwrap_or_default(),
		OutputFormat::Text => result.data.as_ref().map(TextOutput::to_text).unwrap_or_default(),
	}
}

pub fn print_result<T: Serialize + TextOutput>(result: &CommandResult<T>, format: OutputFormat) {
	let rendered = render(result, format);
	match format {
		OutputFormat::Json => println!("{rendered}"),
		OutputFormat::Text => print!("{rendered}"),
	}
}

/// Print an error to stderr in human-readable format
pub fn print_error_stderr(error: &CommandError) {
	eprintln!("Error [{}]: {}", error.code, error.message);
}
