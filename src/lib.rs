//! hostmap-dns
//!
//! A very minimal authoritative DNS responder serving `A` records from a static
//! `hostname=ip` mapping file.
//!
//! Each request datagram is decoded, looked up in the [host table][host_table], and answered
//! with either a single `A` record or a name error. There is no recursion, forwarding, caching
//! or TCP. The [`dns`] module documents the exact response layout.
//!
#![warn(clippy::pedantic)]

pub mod config;
pub mod dns;
pub mod error;
pub mod host_table;

pub use config::{Config, Overrides, Shared};
pub use dns::new as new_dns;
pub use host_table::HostTable;
