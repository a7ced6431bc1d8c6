//! Domain core of a minimal polling application: accounts, polls, votes,
//! and tallies over a JSON-document store.
//!
//! The crate exposes no HTTP surface of its own; a presentation layer
//! drives it through [`Db`] for the domain operations, [`auth`] for
//! login/logout and session verification, and [`PollResult`] for tallies.

pub mod auth;
pub mod db;
pub mod error;
pub mod store;
pub mod voting;

pub use auth::{Session, SessionToken, Sessions};
pub use db::Db;
pub use error::Error;
pub use store::{Database, JsonStore, MemoryStore, Store};
pub use voting::{Id, Poll, PollOption, PollResult, User};
