
use std::path::PathBuf;

use ajam::AuthType;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

/// Root CLI for ajam.
#[derive(Parser, Debug)]
#[command(name = "ajam")]
#[command(about = "Asterisk manager interface over HTTP (AJAM) client")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format: json (default) or text
	#[arg(short = 'f', long, global = true, value_enum, default_value = "json")]
	pub format: OutputFormat,

	#[command(flatten)]
	pub connection: ConnectionArgs,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Send one action and print its result.
	Exec(ExecArgs),
	/// Check the stored session, logging in if it expired.
	Ping,
	/// Log in and persist the session cookie.
	Login,
}

impl Commands {
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Exec(_) => "exec",
			Commands::Ping => "ping",
			Commands::Login => "login",
		}
	}
}

/// Connection settings; each overrides the config file and environment.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
	/// Config file (default: $XDG_CONFIG_HOME/ajam/config.json)
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// rawman endpoint, e.g. http://pbx:8088/asterisk/rawman
	#[arg(long, global = true, value_name = "URL")]
	pub url: Option<String>,

	#[arg(long, global = true, value_name = "NAME")]
	pub username: Option<String>,

	/// Manager secret; prefer AJAM_SECRET, flags are visible to other users
	#[arg(long, global = true, value_name = "SECRET")]
	pub secret: Option<String>,

	#[arg(long, global = true, value_enum)]
	pub auth_type: Option<CliAuthType>,

	/// Where the session cookie is kept
	#[arg(long, global = true, value_name = "FILE")]
	pub cookie_file: Option<PathBuf>,

	/// HTTP timeout in seconds
	#[arg(long, global = true, value_name = "SECS")]
	pub timeout: Option<u64>,

	/// Escape only spaces in the query string
	#[arg(long, global = true)]
	pub legacy_escaping: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExecArgs {
	/// Action name (for example: CoreStatus, Originate, Command).
	#[arg(value_name = "ACTION")]
	pub action: String,

	/// Action parameter, repeatable; order is preserved.
	#[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
	pub params: Vec<(String, String)>,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
	let (key, value) = raw
		.split_once('=')
		.ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
	let key = key.trim();
	if key.is_empty() {
		return Err(format!("empty parameter name in '{raw}'"));
	}
	Ok((key.to_string(), value.to_string()))
}

/// Authentication scheme (CLI wrapper for ajam::AuthType)
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CliAuthType {
	/// Send the secret in the login request
	Plaintext,
	/// MD5 challenge-response
	Md5,
}

impl From<CliAuthType> for AuthType {
	fn from(auth: CliAuthType) -> Self {
		match auth {
			CliAuthType::Plaintext => AuthType::Plaintext,
			CliAuthType::Md5 => AuthType::ChallengeMd5,
		}
	}
}
