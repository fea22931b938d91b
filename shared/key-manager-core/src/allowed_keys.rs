//! `AddressPermissions:AllowedERC725YDataKeys:<address>` entries.

use alloc::vec::Vec;

use alloy_primitives::FixedBytes;

use crate::{compact::decode_compact_bytes_array, errors::DecodeError};

/// Leading bytes (1 to 32) a data key must start with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPrefix(Vec<u8>);

impl KeyPrefix {
    pub fn matches(&self, key: &FixedBytes<32>) -> bool {
        key.starts_with(&self.0)
    }
}

fn is_valid_prefix_len(len: usize) -> bool {
    (1..=32).contains(&len)
}

pub fn decode_allowed_keys(value: &[u8]) -> Result<Vec<KeyPrefix>, DecodeError> {
    Ok(decode_compact_bytes_array(value, is_valid_prefix_len)?
        .into_iter()
        .map(|p| KeyPrefix(p.to_vec()))
        .collect())
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn test_prefix_and_full_key_match() {
        let key = FixedBytes::<32>::repeat_byte(0xab);
        let mut value = vec![0x00, 0x02, 0xab, 0xab];
        value.extend_from_slice(&[0x00, 0x20]);
        value.extend_from_slice(key.as_slice());

        let prefixes = decode_allowed_keys(&value).unwrap();
        assert_eq!(prefixes.len(), 2);
        assert!(prefixes.iter().all(|p| p.matches(&key)));
        assert!(!prefixes[0].matches(&FixedBytes::repeat_byte(0xac)));
    }

    #[test]
    fn test_rejects_empty_and_oversized_prefixes() {
        assert_eq!(
            decode_allowed_keys(&[0x00, 0x00]),
            Err(DecodeError::InvalidElementLength(0))
        );
        let mut value = vec![0x00, 0x21];
        value.extend_from_slice(&[0u8; 33]);
        assert_eq!(decode_allowed_keys(&value), Err(DecodeError::InvalidElementLength(33)));
    }
}
