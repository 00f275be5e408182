//! Wire format encoding and decoding for single question A queries.
//!
//! Pure functions over byte buffers: nothing here performs I/O or keeps state between calls.

use crate::error::MalformedPacket;
use std::net::Ipv4Addr;

/// Size of the fixed DNS message header.
pub const HEADER_LEN: usize = 12;

const MAX_LABEL_LEN: u8 = 63;
const TYPE_CLASS_LEN: usize = 4;
const ANSWER_LEN: usize = 16;

/// QR, RD and RA set, RCODE 0 (`NOERROR`).
const FLAGS_ANSWER: u16 = 0x8180;
/// QR, RD and RA set, RCODE 3 (`NXDOMAIN`).
const FLAGS_NAME_ERROR: u16 = 0x8183;

const TYPE_A: u16 = 1;
const CLASS_IN: u16 = 1;
const A_RDATA_LEN: u16 = 4;
/// Compression pointer to the question name, which always starts right after the header.
const QUESTION_NAME_POINTER: u16 = 0xC00C;

/// A decoded request: the transaction id, the question name and the raw question bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    id: [u8; 2],
    labels: Vec<Vec<u8>>,
    qname: String,
    qtype: u16,
    qclass: u16,
    raw_question: Vec<u8>,
}

impl Query {
    /// The request's transaction id, exactly as it appeared on the wire.
    #[must_use]
    pub fn id(&self) -> [u8; 2] {
        self.id
    }

    #[must_use]
    pub fn labels(&self) -> &[Vec<u8>] {
        &self.labels
    }

    /// The question name as dot joined labels, without a trailing dot.
    #[must_use]
    pub fn qname(&self) -> &str {
        &self.qname
    }

    #[must_use]
    pub fn qtype(&self) -> u16 {
        self.qtype
    }

    #[must_use]
    pub fn qclass(&self) -> u16 {
        self.qclass
    }

    /// The question section of the request from the first label length byte through QCLASS.
    #[must_use]
    pub fn raw_question_bytes(&self) -> &[u8] {
        &self.raw_question
    }
}

/// Decode the header id and the single question of a request datagram.
///
/// Header flags and counts are not interpreted. Only the first question is read, and any
/// bytes after its QCLASS are ignored.
///
/// # Errors
///
/// Returns [`MalformedPacket`] if the datagram is shorter than the header, if the question
/// name runs past the end of the datagram, if a label length byte is a compression pointer
/// or otherwise above 63, or if QTYPE/QCLASS are missing.
pub fn decode_query(buf: &[u8]) -> Result<Query, MalformedPacket> {
    if buf.len() < HEADER_LEN {
        return Err(MalformedPacket::TooShort(buf.len()));
    }
    let id = [buf[0], buf[1]];

    let mut labels = Vec::new();
    let mut offset = HEADER_LEN;
    loop {
        let len = *buf.get(offset).ok_or(MalformedPacket::NameOverrun(offset))?;
        if len == 0 {
            offset += 1;
            break;
        }
        if len > MAX_LABEL_LEN {
            return Err(MalformedPacket::UnsupportedLabel { offset, len });
        }
        let end = offset + 1 + usize::from(len);
        let label = buf
            .get(offset + 1..end)
            .ok_or(MalformedPacket::NameOverrun(offset))?;
        labels.push(label.to_vec());
        offset = end;
    }

    let end = offset + TYPE_CLASS_LEN;
    let type_class = buf
        .get(offset..end)
        .ok_or(MalformedPacket::MissingTypeClass)?;
    let qtype = u16::from_be_bytes([type_class[0], type_class[1]]);
    let qclass = u16::from_be_bytes([type_class[2], type_class[3]]);

    let qname = labels
        .iter()
        .map(|label| String::from_utf8_lossy(label))
        .collect::<Vec<_>>()
        .join(".");

    Ok(Query {
        id,
        labels,
        qname,
        qtype,
        qclass,
        raw_question: buf[HEADER_LEN..end].to_vec(),
    })
}

/// Encode a response answering `query` with a single A record for `ip`.
///
/// The question section is rebuilt from the decoded labels with QTYPE `A` and QCLASS `IN`,
/// and the answer names it through a compression pointer.
#[must_use]
pub fn encode_success(query: &Query, ip: Ipv4Addr, ttl: u32) -> Vec<u8> {
    let name_len = query.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1;
    let mut out = Vec::with_capacity(HEADER_LEN + name_len + TYPE_CLASS_LEN + ANSWER_LEN);
    write_header(&mut out, query.id, FLAGS_ANSWER, 1, 1);

    for label in &query.labels {
        // decode_query only accepts labels of at most 63 bytes.
        #[allow(clippy::cast_possible_truncation)]
        out.push(label.len() as u8);
        out.extend_from_slice(label);
    }
    out.push(0);
    write_u16_be(&mut out, TYPE_A);
    write_u16_be(&mut out, CLASS_IN);

    write_u16_be(&mut out, QUESTION_NAME_POINTER);
    write_u16_be(&mut out, TYPE_A);
    write_u16_be(&mut out, CLASS_IN);
    out.extend_from_slice(&ttl.to_be_bytes());
    write_u16_be(&mut out, A_RDATA_LEN);
    out.extend_from_slice(&ip.octets());
    out
}

/// Encode a name error response for `query`, echoing `raw_question` verbatim.
///
/// QDCOUNT is written as zero even though the question bytes follow the header. Existing
/// clients of this responder rely on that layout, so it is kept.
#[must_use]
pub fn encode_not_found(query: &Query, raw_question: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + raw_question.len());
    write_header(&mut out, query.id, FLAGS_NAME_ERROR, 0, 0);
    out.extend_from_slice(raw_question);
    out
}

fn write_header(out: &mut Vec<u8>, id: [u8; 2], flags: u16, qdcount: u16, ancount: u16) {
    out.extend_from_slice(&id);
    for field in [flags, qdcount, ancount, 0, 0] {
        write_u16_be(out, field);
    }
}

fn write_u16_be(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}
