//! Human-readable order numbers.

use jiff::Timestamp;
use rand::Rng;

const SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 9;

/// `ORD-{unix millis}-{9 uppercase alphanumerics}`.
pub fn generate_order_number<R: Rng + ?Sized>(now: Timestamp, rng: &mut R) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| char::from(SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())]))
        .collect();

    format!("ORD-{}-{suffix}", now.as_millisecond())
}
