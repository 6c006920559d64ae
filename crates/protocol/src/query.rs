//! Request target composition.
//!
//! A rawman request is `<base>?action=<Action>&<Key>=<Value>...`. Historic
//! clients escape nothing but the space, which means a value containing `&`
//! or `=` silently splits into extra parameters. [`QueryEncoding::Reserved`]
//! escapes exactly the characters that break the query structure and leaves
//! everything else (`/`, `:`, `@`, `,`) readable, so channel names such as
//! `SIP/100` go out unchanged in both modes.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::action::Params;

/// Characters that would corrupt the query if sent raw.
const QUERY_RESERVED: &AsciiSet = &CONTROLS
	.add(b' ')
	.add(b'"')
	.add(b'#')
	.add(b'%')
	.add(b'&')
	.add(b'+')
	.add(b'=')
	.add(b'?');

/// Escaping applied to action names, parameter keys and values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryEncoding {
	/// Escape only the space (`%20`), byte-compatible with legacy clients.
	Legacy,
	/// Escape the space, query delimiters and control characters.
	#[default]
	Reserved,
}

impl std::str::FromStr for QueryEncoding {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"legacy" => Ok(QueryEncoding::Legacy),
			"reserved" => Ok(QueryEncoding::Reserved),
			other => Err(format!("unknown query encoding '{other}' (expected legacy or reserved)")),
		}
	}
}

/// Composes request targets against one rawman base URL.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
	base: String,
	encoding: QueryEncoding,
}

impl QueryBuilder {
	pub fn new(base: impl Into<String>) -> Self {
		Self {
			base: base.into(),
			encoding: QueryEncoding::default(),
		}
	}

	pub fn with_encoding(mut self, encoding: QueryEncoding) -> Self {
		self.encoding = encoding;
		self
	}

	pub fn base(&self) -> &str {
		&self.base
	}

	pub fn encoding(&self) -> QueryEncoding {
		self.encoding
	}

	/// Returns `base?action=<action>` followed by `&key=value` per parameter,
	/// in [`Params`] insertion order.
	pub fn build(&self, action: &str, params: &Params) -> String {
		let mut query = format!("{}?action={}", self.base, self.escape(action));
		for (key, value) in params {
			query.push('&');
			query.push_str(&self.escape(key));
			query.push('=');
			query.push_str(&self.escape(value));
		}
		query
	}

	fn escape<'a>(&self, raw: &'a str) -> Cow<'a, str> {
		match self.encoding {
			QueryEncoding::Legacy if raw.contains(' ') => Cow::Owned(raw.replace(' ', "%20")),
			QueryEncoding::Legacy => Cow::Borrowed(raw),
			QueryEncoding::Reserved => utf8_percent_encode(raw, QUERY_RESERVED).into(),
		}
	}
}
