//! Error types.

use std::path::PathBuf;

/// Error enumerates the possible hostmap-dns error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a request datagram can't be decoded. The request is dropped without a
    /// reply.
    #[error("malformed DNS packet: {0}")]
    MalformedPacket(#[from] MalformedPacket),

    /// Returned when neither the config file nor the command line names a hostname mapping
    /// file.
    #[error("a hostname mapping file must be specified")]
    MissingHostsFile,

    /// Returned when the configured hostname mapping file does not exist.
    #[error("the hostname mapping file {0:?} does not exist")]
    HostsFileNotFound(PathBuf),

    /// Returned when a line of the hostname mapping file maps a hostname to something that
    /// isn't a dotted IPv4 address.
    #[error("line {line}: \"{value}\" is not an IPv4 address for \"{hostname}\"")]
    InvalidMapping {
        line: usize,
        hostname: String,
        value: String,
    },

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when [loading a `Config`][crate::config::Config::try_from_file] fails due to
    /// invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),
}

/// The ways a request datagram can fail to decode.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedPacket {
    /// The datagram can't hold the fixed 12 byte header.
    #[error("{0} bytes is shorter than the DNS header")]
    TooShort(usize),

    /// The question name runs past the end of the datagram before its terminating zero label.
    #[error("question name runs past the end of the packet at offset {0}")]
    NameOverrun(usize),

    /// A length byte of 64 or more: a compression pointer or a reserved label type.
    #[error("unsupported label length {len:#04x} at offset {offset}")]
    UnsupportedLabel { offset: usize, len: u8 },

    /// The question name is complete but QTYPE and QCLASS are cut off.
    #[error("question is missing QTYPE/QCLASS")]
    MissingTypeClass,
}
