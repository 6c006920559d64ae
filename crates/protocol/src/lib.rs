//! Wire types for the Asterisk AJAM `rawman` protocol.
//!
//! The rawman endpoint speaks a plain-text action/response protocol over
//! HTTP GET. This crate contains the two pure halves of that exchange:
//!
//! - **Request side**: [`QueryBuilder`] composes `?action=...&Key=Value`
//!   targets from an action name and its [`Params`].
//! - **Response side**: [`parse`] turns the line-oriented body into a
//!   [`RawResult`] of status [`Headers`] and per-item data [`Block`]s.
//!
//! Types in this crate carry no I/O. Cookie handling and the HTTP exchange
//! live in `ajam-runtime`; the login state machine lives in `ajam-rs`.

pub mod action;
pub mod query;
pub mod response;

pub use action::{Params, SessionMode, params};
pub use query::{QueryBuilder, QueryEncoding};
pub use response::{Block, Headers, ParsedResponse, RawResult, ShapeConflict, parse, parse_blocks};
