//! Annotator identifiers: `user_<unix millis>_<9 chars of [0-9a-z]>`.
//!
//! Unique enough within one running process; collisions are not checked.

use chrono::Utc;
use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

const SUFFIX_LEN: usize = 9;
const SUFFIX_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

static USER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^user_\d+_[0-9a-z]{9}$").unwrap());

pub fn generate_user_id() -> String {
    generate_user_id_with(&mut rand::thread_rng())
}

pub fn generate_user_id_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect();

    format!("user_{}_{}", Utc::now().timestamp_millis(), suffix)
}

/// True when `s` has the shape produced by [`generate_user_id`].
pub fn is_user_id(s: &str) -> bool {
    USER_ID_RE.is_match(s)
}
