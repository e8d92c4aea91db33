//! Hash provider: SHA-256 and SHA-512 over byte slices and streams.
//!
//! Only the two SHA-2 variants used by the ledger are supported. Asking for
//! any other algorithm by name is a programming error and panics.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::io::{ErrorKind, Read};

use crate::error::Result;

/// Chunk size used when hashing streams.
pub const STREAM_CHUNK_SIZE: usize = 8 * 1024;

/// The digest algorithms understood by the hash provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    #[serde(rename = "SHA-256")]
    Sha256,
    #[serde(rename = "SHA-512")]
    Sha512,
}

impl HashAlgorithm {
    /// Resolve an algorithm from its name (`"SHA-256"`, `"sha512"`, ...).
    ///
    /// # Panics
    ///
    /// Panics on any name other than a SHA-256 or SHA-512 spelling.
    pub fn named(name: &str) -> Self {
        let normalized: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_uppercase();
        match normalized.as_str() {
            "SHA256" => HashAlgorithm::Sha256,
            "SHA512" => HashAlgorithm::Sha512,
            _ => panic!("unsupported hash algorithm: {name}"),
        }
    }

    /// Canonical algorithm name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha512 => "SHA-512",
        }
    }

    /// Length of the produced digest in bytes.
    pub fn digest_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha512 => 64,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hash a byte slice.
pub fn hash(algorithm: HashAlgorithm, data: &[u8]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
    }
}

/// Hash a byte slice and return the lowercase hex digest.
pub fn hash_hex(algorithm: HashAlgorithm, data: &[u8]) -> String {
    hex::encode(hash(algorithm, data))
}

/// Hash a stream to its end, reading in [`STREAM_CHUNK_SIZE`] chunks.
pub fn hash_reader<R: Read>(algorithm: HashAlgorithm, reader: R) -> Result<Vec<u8>> {
    hash_reader_with_capacity(algorithm, reader, STREAM_CHUNK_SIZE)
}

/// Hash a stream to its end and return the lowercase hex digest.
pub fn hash_reader_hex<R: Read>(algorithm: HashAlgorithm, reader: R) -> Result<String> {
    Ok(hex::encode(hash_reader(algorithm, reader)?))
}

/// Hash a stream to its end using a caller-chosen chunk size.
///
/// The stream is never buffered as a whole; a zero chunk size is bumped to one byte.
pub fn hash_reader_with_capacity<R: Read>(
    algorithm: HashAlgorithm,
    reader: R,
    chunk_size: usize,
) -> Result<Vec<u8>> {
    match algorithm {
        HashAlgorithm::Sha256 => digest_reader::<Sha256, R>(reader, chunk_size),
        HashAlgorithm::Sha512 => digest_reader::<Sha512, R>(reader, chunk_size),
    }
}

fn digest_reader<D: Digest, R: Read>(mut reader: R, chunk_size: usize) -> Result<Vec<u8>> {
    let mut hasher = D::new();
    let mut buf = vec![0u8; chunk_size.max(1)];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => hasher.update(&buf[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(hasher.finalize().to_vec())
}

/// A 32-byte SHA-256 hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Hash(pub [u8; 32]);

impl Sha256Hash {
    /// Compute the SHA-256 hash of data.
    pub fn hash(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// Get raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SHA256({}...)", &self.to_hex()[..8])
    }
}

impl AsRef<[u8]> for Sha256Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A 64-byte SHA-512 hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha512Hash(pub [u8; 64]);

impl Sha512Hash {
    /// Compute the SHA-512 hash of data.
    pub fn hash(data: &[u8]) -> Self {
        let digest = Sha512::digest(data);
        let mut arr = [0u8; 64];
        arr.copy_from_slice(&digest);
        Self(arr)
    }

    /// Get raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Sha512Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SHA512({}...)", &self.to_hex()[..8])
    }
}

impl AsRef<[u8]> for Sha512Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
