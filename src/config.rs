use std::path::PathBuf;

/// Limits used by the cross-category quality checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Flag the microphone when more than this share of capture blocks start at 0.
    pub silent_mic_zero_ratio: f64,
    /// Flag packet loss when sent packets exceed received packets by this factor.
    pub loss_send_recv_ratio: f64,
    /// Mean speaker volume below this is too quiet.
    pub min_speaker_volume: f64,
    /// Mean speaker volume above this is too loud.
    pub max_speaker_volume: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            silent_mic_zero_ratio: 0.5,
            loss_send_recv_ratio: 1.5,
            min_speaker_volume: 0.1,
            max_speaker_volume: 2.0,
        }
    }
}

/// Runtime options for one analysis run.
/// This is kept separate from the CLI parsing concerns.
#[derive(Debug, Default)]
pub struct Config {
    /// Verbosity level (0 = warn, 1 = info, 2 = debug, 3+ = trace)
    pub verbosity: u8,
    /// Log file to analyze
    pub log_path: PathBuf,
    pub thresholds: Thresholds,
}
