//! Parser for rawman response bodies.
//!
//! A body is a run of lines. `Response:`, `Message:` and `Privilege:` lines
//! are status headers; every other line belongs to the current data block.
//! Blocks are closed by a blank line or an `END COMMAND` marker and hold
//! either `Key: Value` fields or bare lines, whichever the first contributing
//! line was. Because every block is terminated, the final terminator always
//! opens one trailing "ghost" block, which [`ParsedResponse::into_result`]
//! drops unconditionally.
//!
//! Parsing never fails. Malformed lines simply do not show up in the result;
//! lines that disagree with their block's shape are reported in
//! [`RawResult::conflicts`] instead of being coerced.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Status header carrying `Success`, `Error`, `Follows` or `Goodbye`.
pub const RESPONSE: &str = "Response";
/// Human-readable status detail.
pub const MESSAGE: &str = "Message";
/// Privilege class of the answering command.
pub const PRIVILEGE: &str = "Privilege";

const HEADER_NAMES: [&str; 3] = [RESPONSE, MESSAGE, PRIVILEGE];

/// Value of the `Response` header on success.
pub const SUCCESS: &str = "Success";

const END_COMMAND: &str = "END COMMAND";

/// Top-level status headers, matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Headers(IndexMap<String, String>);

impl Headers {
	/// Looks a header up by name, ignoring ASCII case.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.0
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	/// Stores a header, replacing any earlier value whose key matches ignoring case.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		self.0.retain(|existing, _| !existing.eq_ignore_ascii_case(&key));
		self.0.insert(key, value.into());
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}
}

/// One item of a multi-item result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
	/// Closed by a terminator before any line contributed to it.
	Empty,
	/// `Key: Value` lines, in arrival order.
	Fields(IndexMap<String, String>),
	/// Bare lines without a `": "` separator, trimmed.
	Lines(Vec<String>),
}

impl Block {
	/// Returns the value of a field; always [`None`] for non-field blocks.
	pub fn get(&self, key: &str) -> Option<&str> {
		match self {
			Block::Fields(fields) => fields.get(key).map(String::as_str),
			_ => None,
		}
	}

	pub fn fields(&self) -> Option<&IndexMap<String, String>> {
		match self {
			Block::Fields(fields) => Some(fields),
			_ => None,
		}
	}

	pub fn lines(&self) -> Option<&[String]> {
		match self {
			Block::Lines(lines) => Some(lines),
			_ => None,
		}
	}

	pub fn is_empty(&self) -> bool {
		match self {
			Block::Empty => true,
			Block::Fields(fields) => fields.is_empty(),
			Block::Lines(lines) => lines.is_empty(),
		}
	}

	fn kind(&self) -> &'static str {
		match self {
			Block::Empty => "empty",
			Block::Fields(_) => "fields",
			Block::Lines(_) => "lines",
		}
	}
}

impl Serialize for Block {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Block::Empty => serializer.serialize_map(Some(0))?.end(),
			Block::Fields(fields) => fields.serialize(serializer),
			Block::Lines(lines) => lines.serialize(serializer),
		}
	}
}

/// A line whose shape disagreed with the shape its block already had.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShapeConflict {
	/// Index of the block in the pre-drop block sequence.
	pub block: usize,
	/// Shape the block had been fixed to (`fields` or `lines`).
	pub expected: &'static str,
	/// The offending line, trimmed.
	pub line: String,
}

/// Parse state before the ghost block is dropped.
///
/// Login code reads the challenge nonce from here: a challenge response has
/// exactly one terminator, so its only block *is* the ghost block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResponse {
	pub headers: Headers,
	pub blocks: Vec<Block>,
	pub conflicts: Vec<ShapeConflict>,
}

impl ParsedResponse {
	/// Drops the trailing ghost block and returns the caller-facing result.
	pub fn into_result(mut self) -> RawResult {
		self.blocks.pop();
		RawResult {
			headers: self.headers,
			data: self.blocks,
			conflicts: self.conflicts,
		}
	}

	fn block_mut(&mut self, index: usize) -> &mut Block {
		while self.blocks.len() <= index {
			self.blocks.push(Block::Empty);
		}
		&mut self.blocks[index]
	}

	fn push_field(&mut self, index: usize, key: &str, value: &str, line: &str) {
		let block = self.block_mut(index);
		let accepted = match block {
			Block::Empty => {
				*block = Block::Fields(IndexMap::from([(key.to_string(), value.to_string())]));
				true
			}
			Block::Fields(fields) => {
				fields.insert(key.to_string(), value.to_string());
				true
			}
			Block::Lines(_) => false,
		};
		if !accepted {
			self.conflict(index, line);
		}
	}

	fn push_line(&mut self, index: usize, line: &str) {
		let block = self.block_mut(index);
		let accepted = match block {
			Block::Empty => {
				*block = Block::Lines(vec![line.to_string()]);
				true
			}
			Block::Lines(lines) => {
				lines.push(line.to_string());
				true
			}
			Block::Fields(_) => false,
		};
		if !accepted {
			self.conflict(index, line);
		}
	}

	fn conflict(&mut self, index: usize, line: &str) {
		let expected = self.blocks[index].kind();
		self.conflicts.push(ShapeConflict {
			block: index,
			expected,
			line: line.trim().to_string(),
		});
	}
}

/// Structured result of one action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawResult {
	pub headers: Headers,
	pub data: Vec<Block>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub conflicts: Vec<ShapeConflict>,
}

impl RawResult {
	pub fn response(&self) -> Option<&str> {
		self.headers.get(RESPONSE)
	}

	pub fn message(&self) -> Option<&str> {
		self.headers.get(MESSAGE)
	}

	pub fn privilege(&self) -> Option<&str> {
		self.headers.get(PRIVILEGE)
	}

	/// True iff the `Response` header is exactly `Success`.
	pub fn is_success(&self) -> bool {
		self.response() == Some(SUCCESS)
	}
}

/// Parses a response body, dropping the trailing ghost block.
pub fn parse(raw: &str) -> RawResult {
	parse_blocks(raw).into_result()
}

/// Parses a response body and keeps every block, ghost block included.
pub fn parse_blocks(raw: &str) -> ParsedResponse {
	let mut parsed = ParsedResponse::default();
	let mut index = 0usize;

	for line in raw.lines() {
		if let Some((key, value)) = header_line(line) {
			parsed.headers.insert(key, value);
			continue;
		}

		if is_terminator(line) {
			parsed.block_mut(index);
			index += 1;
			continue;
		}

		match line.split_once(": ") {
			Some((key, value)) => {
				let key = key.trim();
				if !key.is_empty() {
					parsed.push_field(index, key, value.trim(), line);
				}
			}
			None => parsed.push_line(index, line.trim()),
		}
	}

	parsed
}

fn header_line(line: &str) -> Option<(&str, &str)> {
	let (name, value) = line.split_once(": ")?;
	let name = name.trim();
	HEADER_NAMES
		.iter()
		.any(|header| header.eq_ignore_ascii_case(name))
		.then(|| (name, value.trim()))
}

fn is_terminator(line: &str) -> bool {
	let line = line.trim();
	line.is_empty() || line.trim_matches('-').trim().eq_ignore_ascii_case(END_COMMAND)
}
