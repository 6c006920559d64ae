//! AJAM runtime - HTTP exchange and session cookie persistence
//!
//! This crate provides the I/O half of an AJAM client:
//!
//! - **Transport**: the [`Transport`] seam the session layer talks to, and
//!   [`HttpTransport`], its reqwest-backed implementation
//! - **Cookie store**: the [`CookieStore`] file that carries the manager
//!   session id between exchanges and between processes
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   ajam-rs   │  Session state machine, Client façade
//! └──────┬──────┘
//!        │ Transport::request(url, SessionMode)
//! ┌──────▼───────┐
//! │ ajam-runtime │  This crate
//! │  ┌────────┐  │
//! │  │ HTTP   │  │  reqwest GET, timeout, Set-Cookie capture
//! │  └────────┘  │
//! │  ┌────────┐  │
//! │  │ Cookie │  │  JSON cookie file, 0600 on Unix
//! │  └────────┘  │
//! └──────────────┘
//! ```
//!
//! # Shared cookie files
//!
//! Two clients pointed at the same cookie file race: each login overwrites
//! the stored session id, and the last writer wins.

pub mod cookie_store;
pub mod error;
pub mod transport;

pub use cookie_store::{CookieStore, DEFAULT_COOKIE_FILE, StoredCookie};
pub use error::{Error, Result};
pub use transport::{DEFAULT_TIMEOUT, HttpTransport, Transport, display_target};
