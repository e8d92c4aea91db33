//! Canonical entry encoding and chain/entry id derivation.
//!
//! The byte layout is fixed by the external ledger and must stay bit-exact:
//!
//! ```text
//! entry bytes   = 0x00 || chain_id (32) || external_ids || content
//! external_ids  = 0x00                                      (empty list)
//!               | total (i16 BE) || { len (i16 BE) || value }*
//! total         = sum(len(value) + 2)
//! ```
//!
//! - chain id base: `SHA-256(id_1) || SHA-256(id_2) || ...` in list order
//! - chain id: `SHA-256(chain id base)`
//! - entry id base: `SHA-512(entry bytes) || entry bytes`
//! - entry id: `SHA-256(entry id base)`
//!
//! **CRITICAL**: any change to this layout changes every derived identifier.

use crate::digest::{Sha256Hash, Sha512Hash};
use crate::error::{CoreError, Result};
use crate::record::ExternalIdValue;
use crate::types::{ChainId, EntryId};

/// Version byte leading every serialized entry.
pub const ENTRY_VERSION: u8 = 0x00;

/// Encoding of an empty external id list.
pub const EMPTY_EXTERNAL_IDS: u8 = 0x00;

/// Largest value a length prefix can carry.
pub const MAX_LENGTH: usize = i16::MAX as usize;

/// Encode a length as a big-endian signed 16-bit prefix.
pub fn encode_length(n: usize) -> Result<[u8; 2]> {
    let n = i16::try_from(n).map_err(|_| CoreError::LengthOutOfRange(n))?;
    Ok(n.to_be_bytes())
}

/// Resolve every external id to its value, failing on the first absent one.
fn resolve_values<T: ExternalIdValue>(external_ids: &[T]) -> Result<Vec<&[u8]>> {
    external_ids
        .iter()
        .enumerate()
        .map(|(index, id)| id.value().ok_or(CoreError::MissingExternalId { index }))
        .collect()
}

/// Encode an ordered external id list.
pub fn encode_external_ids<T: ExternalIdValue>(external_ids: &[T]) -> Result<Vec<u8>> {
    if external_ids.is_empty() {
        return Ok(vec![EMPTY_EXTERNAL_IDS]);
    }

    let values = resolve_values(external_ids)?;

    // Each value also carries its own 2-byte length prefix.
    let total = values
        .iter()
        .fold(0usize, |acc, v| acc.saturating_add(v.len() + 2));

    let mut buf = Vec::with_capacity(total.saturating_add(2));
    buf.extend_from_slice(&encode_length(total)?);
    for value in values {
        buf.extend_from_slice(&encode_length(value.len())?);
        buf.extend_from_slice(value);
    }
    Ok(buf)
}

/// Concatenate the SHA-256 digest of each external id, in order.
///
/// This is one hash pass short of the chain id. An empty list yields an
/// empty base.
pub fn chain_id_base<T: ExternalIdValue>(external_ids: &[T]) -> Result<Vec<u8>> {
    let values = resolve_values(external_ids)?;
    let mut base = Vec::with_capacity(values.len() * 32);
    for value in values {
        base.extend_from_slice(Sha256Hash::hash(value).as_bytes());
    }
    Ok(base)
}

/// Derive the chain id from the first entry's external ids.
pub fn chain_id<T: ExternalIdValue>(external_ids: &[T]) -> Result<ChainId> {
    let base = chain_id_base(external_ids)?;
    Ok(ChainId(Sha256Hash::hash(&base).0))
}

/// Serialize an entry.
///
/// `chain_id_hex` selects the chain the entry belongs to. When it is absent
/// or empty the entry is treated as the first entry of a new chain and the
/// chain id is derived from `external_ids`. Absent content contributes no bytes.
pub fn entry_to_bytes<T: ExternalIdValue>(
    chain_id_hex: Option<&str>,
    content: Option<&[u8]>,
    external_ids: &[T],
) -> Result<Vec<u8>> {
    let chain_id = match chain_id_hex.filter(|hex| !hex.is_empty()) {
        Some(hex) => from_hex(hex)?,
        None => chain_id(external_ids)?.0.to_vec(),
    };
    let external_id_bytes = encode_external_ids(external_ids)?;
    let content = content.unwrap_or_default();

    let mut buf =
        Vec::with_capacity(1 + chain_id.len() + external_id_bytes.len() + content.len());
    buf.push(ENTRY_VERSION);
    buf.extend_from_slice(&chain_id);
    buf.extend_from_slice(&external_id_bytes);
    buf.extend_from_slice(content);
    Ok(buf)
}

/// SHA-512 of the serialized entry followed by the serialized entry.
pub fn entry_id_base<T: ExternalIdValue>(
    chain_id_hex: Option<&str>,
    content: Option<&[u8]>,
    external_ids: &[T],
) -> Result<Vec<u8>> {
    let entry = entry_to_bytes(chain_id_hex, content, external_ids)?;
    let mut base = Vec::with_capacity(64 + entry.len());
    base.extend_from_slice(Sha512Hash::hash(&entry).as_bytes());
    base.extend_from_slice(&entry);
    Ok(base)
}

/// Derive an entry id.
pub fn entry_id<T: ExternalIdValue>(
    chain_id_hex: Option<&str>,
    content: Option<&[u8]>,
    external_ids: &[T],
) -> Result<EntryId> {
    let base = entry_id_base(chain_id_hex, content, external_ids)?;
    Ok(EntryId(Sha256Hash::hash(&base).0))
}

/// Derive the id of the first entry of a chain.
pub fn first_entry_id<T: ExternalIdValue>(
    content: Option<&[u8]>,
    external_ids: &[T],
) -> Result<EntryId> {
    entry_id(None, content, external_ids)
}

/// Chain id bytes followed by the serialized first entry.
pub fn chain_to_bytes<T: ExternalIdValue>(
    first_content: Option<&[u8]>,
    external_ids: &[T],
) -> Result<Vec<u8>> {
    let chain_id = chain_id(external_ids)?;
    let entry = entry_to_bytes(None, first_content, external_ids)?;
    let mut buf = Vec::with_capacity(32 + entry.len());
    buf.extend_from_slice(chain_id.as_bytes());
    buf.extend_from_slice(&entry);
    Ok(buf)
}

/// Lowercase hex encoding.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode even-length hex of either case.
pub fn from_hex(hex: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(hex)?)
}

/// Decode hex and interpret the bytes as UTF-8, replacing invalid sequences.
pub fn string_from_hex(hex: &str) -> Result<String> {
    Ok(String::from_utf8_lossy(&from_hex(hex)?).into_owned())
}

/// The low six bytes of a big-endian millisecond timestamp, as used by ledger commits.
pub fn timestamp_bytes(millis: i64) -> [u8; 6] {
    let be = millis.to_be_bytes();
    let mut out = [0u8; 6];
    out.copy_from_slice(&be[2..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::{hash_hex, HashAlgorithm};
    use proptest::prelude::*;

    const CHAIN_ID: &str = "502b99271ff6a3f8509ba2764e1e1c1482ad800140c17b25e165837ab5320501";
    const FIRST_ENTRY_ID: &str = "322b18e1f267202565bf0d1ee03865f076fd22357ff6dc46c7a6dfef454f3871";
    const ENTRY_ID: &str = "3d945a53b2e0ec5bc4464ae83955e818b6cb5906c93a1eaf80291bd1e241653c";

    const NO_IDS: &[&str] = &[];

    #[test]
    fn test_chain_id_vector() {
        let ids = ["first external id", "second external id"];
        assert_eq!(chain_id(&ids).unwrap().to_hex(), CHAIN_ID);

        // The base is one SHA-256 pass short of the id.
        let base = chain_id_base(&ids).unwrap();
        assert_eq!(base.len(), 64);
        assert_eq!(hash_hex(HashAlgorithm::Sha256, &base), CHAIN_ID);
    }

    #[test]
    fn test_first_entry_id_vector() {
        let ids = ["first external id", "second external id"];
        assert_eq!(first_entry_id(None, &ids).unwrap().to_hex(), FIRST_ENTRY_ID);
        // Empty and absent content serialize identically.
        assert_eq!(
            first_entry_id(Some(b"".as_slice()), &ids).unwrap().to_hex(),
            FIRST_ENTRY_ID
        );
    }

    #[test]
    fn test_entry_id_vector() {
        let ids = ["first entry external id", "second entry external id"];
        let id = entry_id(Some(CHAIN_ID), Some(b"Test Entry Content".as_slice()), &ids).unwrap();
        assert_eq!(id.to_hex(), ENTRY_ID);

        let base = entry_id_base(Some(CHAIN_ID), Some(b"Test Entry Content".as_slice()), &ids).unwrap();
        assert_eq!(hash_hex(HashAlgorithm::Sha256, &base), ENTRY_ID);
    }

    #[test]
    fn test_chain_id_hex_is_case_insensitive() {
        let ids = ["first entry external id", "second entry external id"];
        let upper = CHAIN_ID.to_uppercase();
        let id = entry_id(Some(upper.as_str()), Some(b"Test Entry Content".as_slice()), &ids).unwrap();
        assert_eq!(id.to_hex(), ENTRY_ID);
    }

    #[test]
    fn test_encode_length() {
        assert_eq!(encode_length(0).unwrap(), [0x00, 0x00]);
        assert_eq!(encode_length(258).unwrap(), [0x01, 0x02]);
        assert_eq!(encode_length(MAX_LENGTH).unwrap(), [0x7f, 0xff]);
        assert!(matches!(
            encode_length(MAX_LENGTH + 1),
            Err(CoreError::LengthOutOfRange(32768))
        ));
    }

    #[test]
    fn test_encode_external_ids_layout() {
        assert_eq!(encode_external_ids(NO_IDS).unwrap(), vec![0x00]);

        let bytes = encode_external_ids(&["ab", "c"]).unwrap();
        assert_eq!(
            bytes,
            vec![0x00, 0x07, 0x00, 0x02, b'a', b'b', 0x00, 0x01, b'c']
        );
    }

    #[test]
    fn test_encode_external_ids_range() {
        // total = len + 2 must stay within i16.
        let fits = vec![0u8; MAX_LENGTH - 2];
        assert!(encode_external_ids(&[&fits]).is_ok());

        let too_long = vec![0u8; MAX_LENGTH - 1];
        let err = encode_external_ids(&[&too_long]).unwrap_err();
        assert!(err.is_range_error());

        // Many small ids overflow the sum as well.
        let many = vec![vec![0u8; 100]; 400];
        assert!(matches!(
            encode_external_ids(&many),
            Err(CoreError::LengthOutOfRange(40800))
        ));
    }

    #[test]
    fn test_missing_external_id_value() {
        let ids = [Some("a"), None, Some("c")];
        let err = encode_external_ids(&ids).unwrap_err();
        assert!(matches!(err, CoreError::MissingExternalId { index: 1 }));
        assert!(err.is_malformed_input());

        assert!(chain_id(&ids).is_err());
        assert!(entry_id(Some(CHAIN_ID), None, &ids).is_err());
    }

    #[test]
    fn test_entry_to_bytes_layout() {
        let chain_hex = "11".repeat(32);
        let bytes = entry_to_bytes(Some(chain_hex.as_str()), Some(b"hi".as_slice()), &["a"]).unwrap();

        let mut expected = vec![ENTRY_VERSION];
        expected.extend_from_slice(&[0x11; 32]);
        expected.extend_from_slice(&[0x00, 0x03, 0x00, 0x01, b'a']);
        expected.extend_from_slice(b"hi");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_entry_to_bytes_first_entry_without_ids() {
        let bytes = entry_to_bytes(None, None, NO_IDS).unwrap();
        // Chain id of an empty list is SHA-256 of the empty string.
        assert_eq!(bytes.len(), 1 + 32 + 1);
        assert_eq!(
            to_hex(&bytes[1..33]),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(bytes[33], EMPTY_EXTERNAL_IDS);

        // An empty chain id hex means "first entry" too.
        assert_eq!(entry_to_bytes(Some(""), None, NO_IDS).unwrap(), bytes);
    }

    #[test]
    fn test_entry_to_bytes_rejects_bad_hex() {
        let err = entry_to_bytes(Some("abc"), None, &["a"]).unwrap_err();
        assert!(matches!(err, CoreError::MalformedHex(_)));
        assert!(entry_to_bytes(Some("zz"), None, &["a"]).is_err());
    }

    #[test]
    fn test_entry_id_base_prefix() {
        let entry = entry_to_bytes(None, Some(b"x".as_slice()), &["a"]).unwrap();
        let base = entry_id_base(None, Some(b"x".as_slice()), &["a"]).unwrap();
        assert_eq!(&base[..64], Sha512Hash::hash(&entry).as_bytes());
        assert_eq!(&base[64..], entry.as_slice());
    }

    #[test]
    fn test_hex_helpers() {
        assert_eq!(to_hex(&[0xAB, 0x01]), "ab01");
        assert_eq!(from_hex("AB01").unwrap(), vec![0xab, 0x01]);
        assert_eq!(string_from_hex("68656c6c6f").unwrap(), "hello");
        assert!(from_hex("a").is_err());
    }

    #[test]
    fn test_timestamp_bytes() {
        let millis: i64 = 0x0102_0304_0506;
        assert_eq!(timestamp_bytes(millis), [0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        assert_eq!(timestamp_bytes(0), [0u8; 6]);
    }

    proptest! {
        #[test]
        fn prop_ids_are_deterministic(
            ids in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 0..8),
            content in prop::option::of(prop::collection::vec(any::<u8>(), 0..256)),
        ) {
            prop_assert_eq!(chain_id(&ids).unwrap(), chain_id(&ids).unwrap());
            prop_assert_eq!(
                first_entry_id(content.as_deref(), &ids).unwrap(),
                first_entry_id(content.as_deref(), &ids).unwrap()
            );
        }

        #[test]
        fn prop_order_matters(
            a in prop::collection::vec(any::<u8>(), 0..32),
            b in prop::collection::vec(any::<u8>(), 0..32),
        ) {
            prop_assume!(a != b);
            let forward = [a.clone(), b.clone()];
            let reversed = [b, a];
            prop_assert_ne!(chain_id(&forward).unwrap(), chain_id(&reversed).unwrap());
            prop_assert_ne!(
                entry_id(Some(CHAIN_ID), None, &forward).unwrap(),
                entry_id(Some(CHAIN_ID), None, &reversed).unwrap()
            );
        }

        #[test]
        fn prop_content_only_changes_entry_id(
            ids in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..32), 0..4),
            c1 in prop::collection::vec(any::<u8>(), 1..64),
            c2 in prop::collection::vec(any::<u8>(), 1..64),
        ) {
            prop_assume!(c1 != c2);
            prop_assert_ne!(
                first_entry_id(Some(c1.as_slice()), &ids).unwrap(),
                first_entry_id(Some(c2.as_slice()), &ids).unwrap()
            );
        }

        #[test]
        fn prop_hex_roundtrip(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
            let hex = to_hex(&bytes);
            prop_assert_eq!(hex.to_lowercase(), hex.clone());
            prop_assert_eq!(from_hex(&hex).unwrap(), bytes.clone());
            prop_assert_eq!(from_hex(&hex.to_uppercase()).unwrap(), bytes);
        }
    }
}
