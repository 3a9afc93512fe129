//! Meeting ID generation.

use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a fresh meeting ID of the form `meeting-<epoch millis>-<6 base36 chars>`.
pub fn generate_meeting_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!(
        "meeting-{}-{suffix}",
        chrono::Utc::now().timestamp_millis()
    )
}
