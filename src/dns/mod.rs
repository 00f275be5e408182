//! Static A record DNS responder.
//!
//! hostmap-dns answers `A` queries over UDP for each hostname in the configured mapping file
//! (see [`crate::host_table`]). It is authoritative-only: it never recurses, forwards or
//! caches.
//!
//! E.g. with a mapping file containing:
//! ```text
//! example.com=192.0.2.10
//! ```
//!
//! A query for `example.com` would return:
//!
//! ```bash
//! ❯ dig @127.0.0.1 -p 5353 example.com +short A
//! 192.0.2.10
//! ```
//!
//! Names are matched exactly as written in the file: `Example.com` or `example.com.` would
//! get a name error response.
//!
//! # Responses
//!
//! Found names get flags `0x8180`, one question rebuilt as `A`/`IN` and one answer that points
//! back at the question name (`0xC00C`) with the configured TTL.
//!
//! Unknown names get flags `0x8183` (`NXDOMAIN`), all four counts zero, and the request's
//! question section copied byte for byte after the header. QDCOUNT is zero even though the
//! question is present.
//!
//! Requests that can't be decoded (shorter than the header, a truncated name, a compression
//! pointer in the name) get no reply at all.

pub mod codec;
pub mod resolver;
pub mod server;

pub use server::new;
