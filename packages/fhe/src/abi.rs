//! ABI-style encoding of clear values: one 32-byte big-endian word per value.

use crate::error::FheError;

pub const WORD_LEN: usize = 32;

pub fn encode_words(values: &[u128]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * WORD_LEN);
    for value in values {
        out.extend_from_slice(&[0u8; WORD_LEN - 16]);
        out.extend_from_slice(&value.to_be_bytes());
    }
    out
}

/// Decode words produced by [`encode_words`]. Words with non-zero high bytes are rejected.
pub fn decode_words(bytes: &[u8]) -> Result<Vec<u128>, FheError> {
    if bytes.len() % WORD_LEN != 0 {
        return Err(FheError::MalformedEncoding(format!(
            "encoded length {} is not a multiple of {WORD_LEN}",
            bytes.len()
        )));
    }

    bytes
        .chunks_exact(WORD_LEN)
        .map(|word| {
            let (high, low) = word.split_at(WORD_LEN - 16);
            if high.iter().any(|b| *b != 0) {
                return Err(FheError::MalformedEncoding(
                    "encoded word exceeds 128 bits".into(),
                ));
            }
            let mut buf = [0u8; 16];
            buf.copy_from_slice(low);
            Ok(u128::from_be_bytes(buf))
        })
        .collect()
}
