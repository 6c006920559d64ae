//! File-backed session cookie store.
//!
//! The rawman endpoint identifies a manager session by a cookie
//! (`mansession_id`). Login exchanges persist whatever cookies the server
//! issues; every other exchange presents them. The file holds a JSON list of
//! `{name, value}` pairs and is kept at `0600` on Unix since the session id is
//! a bearer credential.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// File name used when no cookie file is configured.
pub const DEFAULT_COOKIE_FILE: &str = "ajam_cookie";

/// One persisted cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
	pub name: String,
	pub value: String,
}

impl StoredCookie {
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
		}
	}
}

/// Handle to the cookie file shared by all exchanges of one client.
#[derive(Debug, Clone)]
pub struct CookieStore {
	path: PathBuf,
}

impl CookieStore {
	/// Opens the store, creating the file (and its parent directories) when missing.
	///
	/// # Errors
	///
	/// Returns [`Error::Storage`] if the file exists but is not writable, or
	/// cannot be created.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
		let path = path.into();
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|source| storage_error(&path, source))?;
		}
		OpenOptions::new()
			.append(true)
			.create(true)
			.open(&path)
			.map_err(|source| storage_error(&path, source))?;
		Ok(Self { path })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Reads the stored cookies.
	///
	/// An empty file is an empty store. A file that does not parse (for
	/// example a jar left behind by another tool) is treated as empty too, so
	/// the next login replaces it.
	pub fn load(&self) -> Result<Vec<StoredCookie>> {
		let content = fs::read_to_string(&self.path).map_err(|source| storage_error(&self.path, source))?;
		if content.trim().is_empty() {
			return Ok(Vec::new());
		}
		match serde_json::from_str(&content) {
			Ok(cookies) => Ok(cookies),
			Err(err) => {
				warn!(
					target = "ajam",
					path = %self.path.display(),
					error = %err,
					"ignoring unreadable cookie store"
				);
				Ok(Vec::new())
			}
		}
	}

	/// Replaces the stored cookies.
	pub fn save(&self, cookies: &[StoredCookie]) -> Result<()> {
		let json = serde_json::to_string_pretty(cookies)
			.map_err(|err| storage_error(&self.path, std::io::Error::other(err)))?;
		fs::write(&self.path, json).map_err(|source| storage_error(&self.path, source))?;
		#[cfg(unix)]
		{
			use std::os::unix::fs::PermissionsExt;
			fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
				.map_err(|source| storage_error(&self.path, source))?;
		}
		Ok(())
	}

	/// Merges freshly issued cookies into the store, replacing by name.
	///
	/// Returns the stored set after the merge.
	pub fn merge(&self, fresh: impl IntoIterator<Item = StoredCookie>) -> Result<Vec<StoredCookie>> {
		let mut cookies = self.load()?;
		let mut changed = false;
		for cookie in fresh {
			changed = true;
			match cookies.iter_mut().find(|c| c.name == cookie.name) {
				Some(existing) => existing.value = cookie.value,
				None => cookies.push(cookie),
			}
		}
		if changed {
			self.save(&cookies)?;
		}
		Ok(cookies)
	}

	/// Renders the stored cookies as a `Cookie` request header value.
	pub fn header_value(&self) -> Result<Option<String>> {
		let cookies = self.load()?;
		Ok(cookie_header(&cookies))
	}
}

/// Joins cookies into `name=value; name=value`, or [`None`] when there are none.
pub fn cookie_header(cookies: &[StoredCookie]) -> Option<String> {
	if cookies.is_empty() {
		return None;
	}
	Some(
		cookies
			.iter()
			.map(|c| format!("{}={}", c.name, c.value))
			.collect::<Vec<_>>()
			.join("; "),
	)
}

fn storage_error(path: &Path, source: std::io::Error) -> Error {
	Error::Storage {
		path: path.to_path_buf(),
		source,
	}
}
