use podhost_dns_domain::{DnsQuery, DomainError, RecordType};

pub const HEADER_LEN: usize = DnsQuery::HEADER_LEN;

/// Longest name allowed on the wire (RFC 1035 §2.3.4), length bytes included.
const MAX_NAME_WIRE_LEN: usize = 255;

/// Upper bound on compression pointers followed while reading one name.
const MAX_POINTER_JUMPS: usize = 16;

/// Decodes the header and the first question of a raw DNS message.
///
/// Fails with [`DomainError::MalformedMessage`] when:
///
/// * the buffer is shorter than the 12-byte header
/// * QDCOUNT is zero
/// * a label, pointer or the QTYPE/QCLASS pair runs past the buffer
/// * a label uses a reserved type (top bits `01` or `10`)
/// * a compression pointer does not point strictly backwards into the
///   message body, or more than 16 pointers are chained
/// * the decoded name exceeds 255 wire bytes
///
/// Questions after the first are not inspected.
pub fn parse_query(buf: &[u8]) -> Result<DnsQuery, DomainError> {
    if buf.len() < HEADER_LEN {
        return Err(DomainError::malformed(format!(
            "{} bytes is shorter than the DNS header",
            buf.len()
        )));
    }

    let id = u16::from_be_bytes([buf[0], buf[1]]);
    let qdcount = u16::from_be_bytes([buf[4], buf[5]]);
    if qdcount == 0 {
        return Err(DomainError::malformed("message carries no question"));
    }

    let (domain, pos) = read_name(buf, HEADER_LEN)?;

    let fixed = buf
        .get(pos..pos + 4)
        .ok_or_else(|| DomainError::malformed("question truncated before QTYPE/QCLASS"))?;
    let qtype = u16::from_be_bytes([fixed[0], fixed[1]]);
    let qclass = u16::from_be_bytes([fixed[2], fixed[3]]);

    Ok(DnsQuery::new(
        id,
        domain,
        RecordType::from_u16(qtype),
        qclass,
        pos + 4,
    ))
}

/// Reads a possibly compressed name starting at `start`.
///
/// Returns the dotted name (no trailing dot, empty for the root) and the
/// offset just past the name as it appears at `start`: after the root label,
/// or two bytes after the first compression pointer.
fn read_name(buf: &[u8], start: usize) -> Result<(String, usize), DomainError> {
    let mut name = String::new();
    let mut pos = start;
    let mut end = None;
    let mut jumps = 0;
    let mut wire_len = 1;

    loop {
        let len_byte = *buf
            .get(pos)
            .ok_or_else(|| DomainError::malformed("name runs past end of message"))?;

        match len_byte & 0xC0 {
            0x00 => {
                let label_len = len_byte as usize;
                if label_len == 0 {
                    pos += 1;
                    break;
                }
                let label = buf
                    .get(pos + 1..pos + 1 + label_len)
                    .ok_or_else(|| DomainError::malformed("label runs past end of message"))?;

                wire_len += label_len + 1;
                if wire_len > MAX_NAME_WIRE_LEN {
                    return Err(DomainError::malformed("name longer than 255 bytes"));
                }

                if !name.is_empty() {
                    name.push('.');
                }
                name.push_str(&String::from_utf8_lossy(label));
                pos += 1 + label_len;
            }
            0xC0 => {
                let low = *buf
                    .get(pos + 1)
                    .ok_or_else(|| DomainError::malformed("pointer runs past end of message"))?;
                let target = (((len_byte & 0x3F) as usize) << 8) | low as usize;

                if target < HEADER_LEN || target >= pos {
                    return Err(DomainError::malformed(format!(
                        "compression pointer at {} targets {}",
                        pos, target
                    )));
                }
                jumps += 1;
                if jumps > MAX_POINTER_JUMPS {
                    return Err(DomainError::malformed("too many compression pointers"));
                }

                end.get_or_insert(pos + 2);
                pos = target;
            }
            _ => {
                return Err(DomainError::malformed(format!(
                    "reserved label type 0x{:02x}",
                    len_byte
                )));
            }
        }
    }

    Ok((name, end.unwrap_or(pos)))
}
