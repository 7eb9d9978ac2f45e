//! Content identifier normalization.
//!
//! The minter contract only accepts CIDv0 (`Qm...`) URIs.

use cid::{Cid, Version};

/// Version of the identifiers a backend emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CidVersion {
    V0,
    V1,
}

/// Convert `id` to its CIDv0 string form.
///
/// CIDv0 input is returned re-encoded unchanged. Fails when `id` does not
/// parse or when it cannot be expressed as CIDv0 (any codec other than
/// dag-pb, or a non sha2-256 multihash).
pub fn to_canonical_cid(id: &str) -> Result<String, cid::Error> {
    let parsed = Cid::try_from(id.trim())?;
    match parsed.version() {
        Version::V0 => Ok(parsed.to_string()),
        Version::V1 => Ok(Cid::new(Version::V0, parsed.codec(), *parsed.hash())?.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const V0: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";
    const V1: &str = "bafybeie5nqv6kd3qnfjupgvz34woh3oksc3iau6abmyajn7qvtf6d2ho34";

    #[test]
    fn test_v1_converts_to_v0() {
        assert_eq!(to_canonical_cid(V1).unwrap(), V0);
    }

    #[test]
    fn test_v0_is_unchanged() {
        assert_eq!(to_canonical_cid(V0).unwrap(), V0);
    }

    #[test]
    fn test_raw_codec_cannot_convert() {
        let raw = "bafkreie5gq4jxvzmsym6hjlwxej4rwdoxt7wadqvmmwbqi7r27fclha2va";
        assert!(to_canonical_cid(raw).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(to_canonical_cid("not-a-cid").is_err());
        assert!(to_canonical_cid("").is_err());
    }
}
