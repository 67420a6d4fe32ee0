use super::RecordType;
use std::ops::Range;
use std::sync::Arc;

/// The first question of an inbound message, as decoded from the wire.
///
/// `question_end` is the offset just past QCLASS, so `raw[12..question_end]`
/// is the question section exactly as the client sent it.
#[derive(Debug, Clone)]
pub struct DnsQuery {
    pub id: u16,
    pub domain: Arc<str>,
    pub record_type: RecordType,
    pub qclass: u16,
    pub question_end: usize,
}

impl DnsQuery {
    pub const HEADER_LEN: usize = 12;

    pub fn new(
        id: u16,
        domain: impl Into<Arc<str>>,
        record_type: RecordType,
        qclass: u16,
        question_end: usize,
    ) -> Self {
        Self {
            id,
            domain: domain.into(),
            record_type,
            qclass,
            question_end,
        }
    }

    pub fn question_span(&self) -> Range<usize> {
        Self::HEADER_LEN..self.question_end
    }

    pub fn question_bytes<'a>(&self, raw: &'a [u8]) -> Option<&'a [u8]> {
        raw.get(self.question_span())
    }
}
