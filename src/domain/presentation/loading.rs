//! Progress messages shown while a reading is computed.

use std::time::Duration;

/// Nominal length of the loading sequence.
pub const LOADING_DURATION: Duration = Duration::from_secs(8);

pub const LOADING_MESSAGES: [&str; 7] = [
    "Mapping physiological markers...",
    "Aligning zodiac constellations...",
    "Analyzing emotional frequencies...",
    "Calibrating gender dynamics...",
    "Synthesizing psychological profile...",
    "Scanning temporal possibilities...",
    "Destiny computed.",
];

/// Progress in percent after `elapsed`, capped at 100.
pub fn progress_at(elapsed: Duration) -> f64 {
    let fraction = elapsed.as_secs_f64() / LOADING_DURATION.as_secs_f64();
    (fraction * 100.0).clamp(0.0, 100.0)
}

/// Index into [`LOADING_MESSAGES`] for a progress value in percent.
pub fn message_index(progress: f64) -> usize {
    let last = LOADING_MESSAGES.len() - 1;
    if !progress.is_finite() || progress <= 0.0 {
        return 0;
    }
    let idx = (progress / 100.0 * LOADING_MESSAGES.len() as f64).floor() as usize;
    idx.min(last)
}

/// Message to show after `elapsed`.
pub fn message_at(elapsed: Duration) -> &'static str {
    LOADING_MESSAGES[message_index(progress_at(elapsed))]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_message() {
        assert_eq!(message_at(Duration::ZERO), "Mapping physiological markers...");
    }

    #[test]
    fn ends_on_destiny_computed() {
        assert_eq!(message_index(100.0), 6);
        assert_eq!(message_at(Duration::from_secs(30)), "Destiny computed.");
    }

    #[test]
    fn index_boundaries() {
        assert_eq!(message_index(14.0), 0);
        assert_eq!(message_index(15.0), 1);
        assert_eq!(message_index(99.9), 6);
        assert_eq!(message_index(f64::NAN), 0);
    }

    #[test]
    fn progress_is_capped() {
        assert_eq!(progress_at(Duration::from_secs(4)), 50.0);
        assert_eq!(progress_at(Duration::from_secs(9)), 100.0);
    }
}
