//! Frame key helpers
//!
//! Cache keys and dependency graph node identifiers share the `frame_<i>`
//! namespace; these helpers keep formatting and parsing in one place.

use crate::cache::types::CacheKey;

const FRAME_PREFIX: &str = "frame_";

/// Build the cache key for a frame index
pub fn frame_key(index: usize) -> CacheKey {
    format!("{}{}", FRAME_PREFIX, index)
}

/// Parse a frame index back out of a cache key
///
/// Returns `None` for keys outside the frame namespace.
pub fn frame_index(key: &str) -> Option<usize> {
    key.strip_prefix(FRAME_PREFIX)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_key_format() {
        assert_eq!(frame_key(0), "frame_0");
        assert_eq!(frame_key(861), "frame_861");
    }

    #[test]
    fn test_frame_index_round_trip() {
        for i in [0usize, 1, 9, 512, 440999] {
            assert_eq!(frame_index(&frame_key(i)), Some(i));
        }
    }

    #[test]
    fn test_frame_index_rejects_foreign_keys() {
        assert_eq!(frame_index("stem_drums_3"), None);
        assert_eq!(frame_index("frame_"), None);
        assert_eq!(frame_index("frame_x"), None);
        assert_eq!(frame_index(""), None);
    }
}
