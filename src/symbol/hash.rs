use sha3::{Digest, Sha3_256};

pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    Sha3_256::digest(data).into()
}

/// Merkle root used as the `transactions_hash` of aggregates
///
/// Levels with an odd count pair the last hash with itself. No hashes gives
/// the zero hash.
pub fn merkle_root(mut hashes: Vec<[u8; 32]>) -> [u8; 32] {
    if hashes.is_empty() {
        return [0u8; 32];
    }

    while hashes.len() > 1 {
        hashes = hashes
            .chunks(2)
            .map(|pair| {
                let mut hasher = Sha3_256::new();
                hasher.update(pair[0]);
                hasher.update(pair.get(1).unwrap_or(&pair[0]));
                hasher.finalize().into()
            })
            .collect();
    }

    hashes[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(merkle_root(vec![]), [0u8; 32]);
    }

    #[test]
    fn test_single_hash_is_root() {
        let h = sha3_256(b"one");
        assert_eq!(merkle_root(vec![h]), h);
    }

    #[test]
    fn test_odd_level_duplicates_last() {
        let a = sha3_256(b"a");
        let b = sha3_256(b"b");
        let c = sha3_256(b"c");

        let ab = sha3_256(&[a, b].concat());
        let cc = sha3_256(&[c, c].concat());
        let expected = sha3_256(&[ab, cc].concat());

        assert_eq!(merkle_root(vec![a, b, c]), expected);
    }
}
