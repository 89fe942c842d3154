use sha3::{Digest, Sha3_256};

/// Hex-encoded SHA3-256 over the given parts, each prefixed with its length.
pub(crate) fn digest_hex(parts: &[&[u8]]) -> String {
    let mut hasher = Sha3_256::new();

    for part in parts {
        hasher.update((part.len() as u64).to_be_bytes());
        hasher.update(part);
    }

    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_are_delimited() {
        assert_ne!(digest_hex(&[b"ab", b"c"]), digest_hex(&[b"a", b"bc"]));
        assert_eq!(digest_hex(&[b"ab", b"c"]), digest_hex(&[b"ab", b"c"]));
        assert_eq!(digest_hex(&[]).len(), 64);
    }
}
