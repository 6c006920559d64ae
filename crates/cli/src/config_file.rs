//! Layered connection settings.
//!
//! Precedence, lowest first: the JSON config file, `AJAM_*` environment
//! variables, command-line flags. The config file uses the field names of
//! [`ClientConfig`]; every field is optional:
//!
//! ```json
//! {
//!   "url": "http://pbx:8088/asterisk/rawman",
//!   "username": "admin",
//!   "secret": "s3cret",
//!   "auth_type": "md5",
//!   "cookie_file": "/home/me/.cache/ajam/cookie"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use ajam::{AuthType, ClientConfig, QueryEncoding};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cli::ConnectionArgs;
use crate::error::{CliError, Result};

pub const ENV_URL: &str = "AJAM_URL";
pub const ENV_USERNAME: &str = "AJAM_USERNAME";
pub const ENV_SECRET: &str = "AJAM_SECRET";
pub const ENV_AUTH_TYPE: &str = "AJAM_AUTH_TYPE";
pub const ENV_COOKIE_FILE: &str = "AJAM_COOKIE_FILE";

/// `$XDG_CONFIG_HOME/ajam/config.json`, falling back to `~/.config`.
pub fn default_config_path() -> PathBuf {
	config_path(std::env::var_os("XDG_CONFIG_HOME"), std::env::var_os("HOME"))
}

fn config_path(xdg_config_home: Option<std::ffi::OsString>, home: Option<std::ffi::OsString>) -> PathBuf {
	xdg_config_home
		.map(PathBuf::from)
		.or_else(|| home.map(|h| PathBuf::from(h).join(".config")))
		.unwrap_or_else(|| PathBuf::from("."))
		.join("ajam/config.json")
}

/// Resolves the effective configuration for one invocation.
pub fn resolve(args: &ConnectionArgs) -> Result<ClientConfig> {
	let mut config = match &args.config {
		Some(path) => load_json(path)?.ok_or_else(|| CliError::ConfigRead {
			path: path.clone(),
			source: std::io::Error::from(std::io::ErrorKind::NotFound),
		})?,
		None => load_json(&default_config_path())?.unwrap_or_default(),
	};
	apply_env(&mut config, |name| std::env::var(name).ok())?;
	apply_flags(&mut config, args);

	debug!(
		target = "ajam",
		url = %config.url,
		user = %config.username,
		auth_type = %config.auth_type,
		cookie_file = %config.cookie_file.display(),
		"resolved configuration"
	);
	Ok(config)
}

/// Overlays the `AJAM_*` variables `lookup` reports; empty values are ignored.
pub fn apply_env(config: &mut ClientConfig, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
	let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

	if let Some(url) = var(ENV_URL) {
		config.url = url;
	}
	if let Some(username) = var(ENV_USERNAME) {
		config.username = username;
	}
	if let Some(secret) = var(ENV_SECRET) {
		config.secret = secret.into();
	}
	if let Some(auth_type) = var(ENV_AUTH_TYPE) {
		config.auth_type = auth_type
			.parse::<AuthType>()
			.map_err(|err| CliError::Config(format!("{ENV_AUTH_TYPE}: {err}")))?;
	}
	if let Some(cookie_file) = var(ENV_COOKIE_FILE) {
		config.cookie_file = PathBuf::from(cookie_file);
	}
	Ok(())
}

pub fn apply_flags(config: &mut ClientConfig, args: &ConnectionArgs) {
	if let Some(url) = &args.url {
		config.url = url.clone();
	}
	if let Some(username) = &args.username {
		config.username = username.clone();
	}
	if let Some(secret) = &args.secret {
		config.secret = secret.as_str().into();
	}
	if let Some(auth_type) = args.auth_type {
		config.auth_type = auth_type.into();
	}
	if let Some(cookie_file) = &args.cookie_file {
		config.cookie_file = cookie_file.clone();
	}
	if let Some(timeout) = args.timeout {
		config.timeout_secs = timeout;
	}
	if args.legacy_escaping {
		config.query_encoding = QueryEncoding::Legacy;
	}
}

/// Reads a JSON file; `None` if it does not exist.
fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
	let content = match fs::read_to_string(path) {
		Ok(content) => content,
		Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
		Err(source) => {
			return Err(CliError::ConfigRead {
				path: path.to_path_buf(),
				source,
			});
		}
	};
	serde_json::from_str(&content)
		.map(Some)
		.map_err(|source| CliError::ConfigParse {
			path: path.to_path_buf(),
			source,
		})
}
