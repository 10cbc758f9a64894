use sha2::{Digest, Sha256};
use url::Url;

const SYNTHETIC_MODULUS: u64 = 100_000;

/// Filesystem-safe local filename for an image URL.
///
/// Uses the trailing path segment when it looks like a file name (contains a
/// `.`); otherwise synthesizes `image_<H>.png` from a stable hash of the URL.
/// Every character outside `[A-Za-z0-9_.-]` becomes `_`.
pub fn image_filename(url: &Url) -> String {
    let candidate = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();

    let name = if candidate.is_empty() || !candidate.contains('.') {
        format!("image_{}.png", url_hash(url.as_str()) % SYNTHETIC_MODULUS)
    } else {
        candidate.to_string()
    };
    sanitize(&name)
}

/// First eight bytes of the SHA-256 digest, big-endian. Identical across
/// runs and platforms, which a process-seeded hasher is not.
pub fn url_hash(url: &str) -> u64 {
    let digest = Sha256::digest(url.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
