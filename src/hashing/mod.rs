/// Computes a 64-bit hash of the input data using BLAKE3, truncated from 256 bits.
///
/// 64 bits is plenty for identifiers and deduplication over catalog-sized
/// inputs; nothing here depends on the hash cryptographically.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}

/// Reduces a text to the 32-bit PRNG seed used by the hash embedder.
///
/// First 4 little-endian bytes of the BLAKE3 digest. The reduction must stay
/// fixed: re-indexing a catalog relies on the same text seeding the same
/// vector forever.
#[inline]
pub fn embedding_seed(text: &str) -> u32 {
    let hash = blake3::hash(text.as_bytes());
    let bytes: [u8; 4] = hash.as_bytes()[0..4]
        .try_into()
        .expect("BLAKE3 always produces at least 4 bytes");
    u32::from_le_bytes(bytes)
}
