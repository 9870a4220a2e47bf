//! Lowercase hex encoding and constant time comparison for secret material.

const HEX: &[u8; 16] = b"0123456789abcdef";

pub(crate) fn encode_hex(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity(bytes.len() * 2);

    for byte in bytes {
        encoded.push(char::from(HEX[usize::from(byte >> 4)]));
        encoded.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }

    encoded
}

/// Decode exactly `N` bytes; any other length or a non-hex digit fails.
pub(crate) fn decode_hex<const N: usize>(encoded: &str) -> Option<[u8; N]> {
    if encoded.len() != N * 2 {
        return None;
    }

    let mut decoded = [0_u8; N];
    let encoded = encoded.as_bytes();

    for (index, byte) in decoded.iter_mut().enumerate() {
        let hi = decode_hex_nibble(encoded[index * 2])?;
        let lo = decode_hex_nibble(encoded[(index * 2) + 1])?;

        *byte = (hi << 4) | lo;
    }

    Some(decoded)
}

/// Compare without short-circuiting on the first differing byte.
pub(crate) fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }

    left.iter()
        .zip(right)
        .fold(0_u8, |diff, (l, r)| diff | (l ^ r))
        == 0
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_accepts_either_case() {
        assert_eq!(decode_hex::<2>("abCD"), Some([0xab, 0xcd]));
    }

    #[test]
    fn decode_rejects_wrong_length_and_bad_digits() {
        assert_eq!(decode_hex::<2>("abc"), None);
        assert_eq!(decode_hex::<2>("abcdef"), None);
        assert_eq!(decode_hex::<2>("zz00"), None);
    }

    #[test]
    fn encode_is_lowercase() {
        assert_eq!(encode_hex(&[0xAB, 0x01]), "ab01");
    }

    #[test]
    fn constant_time_eq_compares_contents_and_length() {
        assert!(constant_time_eq(b"same", b"same"));
        assert!(!constant_time_eq(b"same", b"sane"));
        assert!(!constant_time_eq(b"same", b"same!"));
    }
}
