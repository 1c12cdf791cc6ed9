//! Song identifier generation
//!
//! Ids have the shape `song-<suffix>` where the suffix is 16 characters drawn
//! uniformly from the URL-safe alphabet `A-Z a-z 0-9 _ -` (64 symbols, so
//! 96 bits of randomness per id).

use rand::Rng;

/// Prefix shared by every song id
pub const SONG_ID_PREFIX: &str = "song-";

/// Number of random characters after the prefix
pub const SONG_ID_SUFFIX_LEN: usize = 16;

/// URL-safe alphabet used for the random suffix
pub const SONG_ID_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Generate a new song id using the thread-local RNG
pub fn generate_song_id() -> String {
    generate_song_id_with(&mut rand::thread_rng())
}

/// Generate a new song id from the given RNG
pub fn generate_song_id_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut id = String::with_capacity(SONG_ID_PREFIX.len() + SONG_ID_SUFFIX_LEN);
    id.push_str(SONG_ID_PREFIX);
    for _ in 0..SONG_ID_SUFFIX_LEN {
        let idx = rng.gen_range(0..SONG_ID_ALPHABET.len());
        id.push(SONG_ID_ALPHABET[idx] as char);
    }
    id
}

/// Check whether a string has the shape of a generated song id
#[cfg(test)]
pub(crate) fn is_song_id(candidate: &str) -> bool {
    match candidate.strip_prefix(SONG_ID_PREFIX) {
        Some(suffix) => {
            suffix.len() == SONG_ID_SUFFIX_LEN
                && suffix.bytes().all(|b| SONG_ID_ALPHABET.contains(&b))
        }
        None => false,
    }
}
