//! External lookup URL construction.
//!
//! Two services: the LR2IR internet ranking (keyed by the LR2-style md5
//! hash) and the Mocha repository (keyed by sha256, beatoraja only).

use crate::models::DuplicateSong;

const LR2IR_SEARCH_URL: &str =
    "http://www.dream-pro.info/~lavalse/LR2IR/search.cgi?mode=ranking&bmsmd5=";
const MOCHA_SONG_URL: &str = "https://mocha-repository.info/song.php?sha256=";

/// LR2IR ranking lookup, keyed by `hash` (LR2) or `md5` (beatoraja).
pub fn lr2ir_url(song: &DuplicateSong) -> String {
    let key = match song {
        DuplicateSong::Lr2 { hash, .. } => hash,
        DuplicateSong::Beatoraja { md5, .. } => md5,
    };
    format!("{}{}", LR2IR_SEARCH_URL, key)
}

/// Mocha repository lookup. Only available for beatoraja records with a
/// non-empty sha256.
pub fn mocha_url(song: &DuplicateSong) -> Option<String> {
    match song {
        DuplicateSong::Lr2 { .. } => None,
        DuplicateSong::Beatoraja { sha256, .. } if sha256.is_empty() => None,
        DuplicateSong::Beatoraja { sha256, .. } => {
            Some(format!("{}{}", MOCHA_SONG_URL, sha256))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lr2_song() -> DuplicateSong {
        DuplicateSong::Lr2 {
            hash: "abc123".into(),
            title: "Song".into(),
            subtitle: "".into(),
            paths: vec!["a/1.bms".into(), "a/2.bms".into()],
        }
    }

    fn beatoraja_song(sha256: &str) -> DuplicateSong {
        DuplicateSong::Beatoraja {
            md5: "m5".into(),
            sha256: sha256.into(),
            title: "Song".into(),
            subtitle: "".into(),
            paths: vec!["a/1.bms".into(), "a/2.bms".into()],
        }
    }

    #[test]
    fn test_lr2ir_keyed_by_hash_for_lr2() {
        assert_eq!(
            lr2ir_url(&lr2_song()),
            "http://www.dream-pro.info/~lavalse/LR2IR/search.cgi?mode=ranking&bmsmd5=abc123"
        );
    }

    #[test]
    fn test_lr2ir_keyed_by_md5_for_beatoraja() {
        assert!(lr2ir_url(&beatoraja_song("x")).ends_with("bmsmd5=m5"));
    }

    #[test]
    fn test_mocha_only_for_beatoraja_with_sha256() {
        assert_eq!(
            mocha_url(&beatoraja_song("deadbeef")),
            Some("https://mocha-repository.info/song.php?sha256=deadbeef".into())
        );
        assert_eq!(mocha_url(&beatoraja_song("")), None);
        assert_eq!(mocha_url(&lr2_song()), None);
    }
}
