use super::query_parser::HEADER_LEN;
use podhost_dns_domain::DnsQuery;
use std::net::Ipv4Addr;

/// TTL carried by every locally synthesized answer.
pub const LOCAL_ANSWER_TTL: u32 = 300;

/// QR + RD + RA, NOERROR.
const RESPONSE_FLAGS: [u8; 2] = [0x81, 0x80];

const A_ANSWER_LEN: usize = 16;

/// Builds an authoritative single-A response in wire format.
///
/// `question` is copied verbatim after the header; the answer owner name is a
/// compression pointer to offset 12, so it always refers to that question.
pub fn build_a_response(id: u16, question: &[u8], addr: Ipv4Addr) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN + question.len() + A_ANSWER_LEN);

    buf.extend_from_slice(&id.to_be_bytes());
    buf.extend_from_slice(&RESPONSE_FLAGS);
    buf.extend_from_slice(&1u16.to_be_bytes());
    buf.extend_from_slice(&1u16.to_be_bytes());
    buf.extend_from_slice(&0u16.to_be_bytes());
    buf.extend_from_slice(&0u16.to_be_bytes());

    buf.extend_from_slice(question);

    buf.extend_from_slice(&[0xC0, 0x0C]);
    buf.extend_from_slice(&1u16.to_be_bytes());
    buf.extend_from_slice(&1u16.to_be_bytes());
    buf.extend_from_slice(&LOCAL_ANSWER_TTL.to_be_bytes());
    buf.extend_from_slice(&4u16.to_be_bytes());
    buf.extend_from_slice(&addr.octets());

    buf
}

/// Answers `query` (decoded from `raw`) with `addr`. Returns `None` if the
/// recorded question span does not fit inside `raw`.
pub fn build_local_response(query: &DnsQuery, raw: &[u8], addr: Ipv4Addr) -> Option<Vec<u8>> {
    let question = query.question_bytes(raw)?;
    Some(build_a_response(query.id, question, addr))
}
