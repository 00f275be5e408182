use crate::dns::codec::{self, Query};
use crate::error::Error;
use crate::host_table::{self, HostTable};
use std::net::Ipv4Addr;
use tracing::info;

/// The outcome of looking a query name up in a [`HostTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Found(Ipv4Addr),
    NotFound,
}

/// Look `query` up in `table` and encode the response: an A record with `ttl` when the name
/// is present, a name error echoing the raw question otherwise.
#[must_use]
pub fn resolve(table: &HostTable, query: &Query, ttl: u32) -> Vec<u8> {
    match lookup(table, query) {
        Resolution::Found(ip) => codec::encode_success(query, ip, ttl),
        Resolution::NotFound => codec::encode_not_found(query, query.raw_question_bytes()),
    }
}

fn lookup(table: &HostTable, query: &Query) -> Resolution {
    table
        .get(query.qname())
        .map_or(Resolution::NotFound, Resolution::Found)
}

/// Answers decoded queries from the currently published [`HostTable`].
#[derive(Clone)]
pub struct Resolver {
    table: host_table::Shared,
    ttl: u32,
}

impl Resolver {
    #[must_use]
    pub fn new(table: host_table::Shared, ttl: u32) -> Self {
        Resolver { table, ttl }
    }

    #[must_use]
    pub fn lookup(&self, query: &Query) -> Resolution {
        lookup(&self.table.load(), query)
    }

    /// Encode the response for `query` against a single snapshot of the table.
    #[must_use]
    pub fn resolve(&self, query: &Query) -> Vec<u8> {
        let hostname = query.qname();
        let (qtype, qclass) = (query.qtype(), query.qclass());
        match self.lookup(query) {
            Resolution::Found(ip) => {
                info!(hostname, qtype, qclass, %ip, "answered");
                codec::encode_success(query, ip, self.ttl)
            }
            Resolution::NotFound => {
                info!(hostname, qtype, qclass, "not found");
                codec::encode_not_found(query, query.raw_question_bytes())
            }
        }
    }

    /// Decode a request datagram and produce the response datagram for it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedPacket`] if the request can't be decoded. No response should
    /// be sent in that case.
    pub fn handle_datagram(&self, request: &[u8]) -> Result<Vec<u8>, Error> {
        let query = codec::decode_query(request)?;
        Ok(self.resolve(&query))
    }
}
