use bytes::{BufMut, BytesMut};

/// Bytes transferred for an 8-bit register value.
pub const BYTE_WIDTH: usize = 1;

/// Bytes transferred for a 16-bit register value.
pub const WORD_WIDTH: usize = 2;

/// Encode an SMBus register write.
///
/// Wire format, one write transaction:
/// ```text
/// ┌──────────────┬──────────────────────┐
/// │ Register (1B)│ Payload (0..n bytes) │
/// └──────────────┴──────────────────────┘
/// ```
pub fn encode_register_write(register: u8, payload: &[u8], dst: &mut BytesMut) {
    dst.reserve(1 + payload.len());
    dst.put_u8(register);
    dst.put_slice(payload);
}

/// Unsigned word from wire bytes, most significant byte first.
pub fn decode_u16_be(wire: [u8; WORD_WIDTH]) -> u16 {
    u16::from_be_bytes(wire)
}

/// Signed word from wire bytes, most significant byte first.
pub fn decode_i16_be(wire: [u8; WORD_WIDTH]) -> i16 {
    i16::from_be_bytes(wire)
}

/// Wire bytes for an unsigned word, most significant byte first.
pub fn encode_u16_be(value: u16) -> [u8; WORD_WIDTH] {
    value.to_be_bytes()
}

/// Wire bytes for a signed word, most significant byte first.
pub fn encode_i16_be(value: i16) -> [u8; WORD_WIDTH] {
    value.to_be_bytes()
}

/// Reverse the byte order of an unsigned word.
///
/// Little-endian register values are the big-endian reading with the two
/// bytes reversed, in both directions.
pub fn swap_u16(value: u16) -> u16 {
    value.swap_bytes()
}

/// Reverse the byte order of a signed word.
pub fn swap_i16(value: i16) -> i16 {
    value.swap_bytes()
}
