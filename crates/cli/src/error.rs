use std::path::PathBuf;

use thiserror::Error;

use crate::output::CommandError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	/// A layered setting could not be interpreted.
	#[error("configuration error: {0}")]
	Config(String),

	#[error("cannot read config file {}", path.display())]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid config file {}: {source}", path.display())]
	ConfigParse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error(transparent)]
	Client(#[from] ajam::Error),
}

impl CliError {
	/// Stable error kind for the output envelope.
	pub fn code(&self) -> &'static str {
		match self {
			CliError::Config(_) | CliError::ConfigRead { .. } | CliError::ConfigParse { .. } => "CONFIG_ERROR",
			CliError::Client(err) => err.kind(),
		}
	}

	/// 2 when the invocation itself is wrong, 1 for everything else.
	pub fn exit_code(&self) -> i32 {
		match self {
			CliError::Client(err) if !err.is_caller_error() => 1,
			_ => 2,
		}
	}

	/// Convert this error to a CommandError for structured output
	pub fn to_command_error(&self) -> CommandError {
		let message = match self {
			CliError::ConfigRead { source, .. } => format!("{self}: {source}"),
			_ => self.to_string(),
		};
		CommandError {
			code: self.code().to_string(),
			message,
		}
	}
}
