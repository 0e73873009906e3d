//! Cross-category consistency checks.
//!
//! These run over the complete stores after the per-category statistics and
//! look for problems that only show up when categories are compared, such
//! as packets sent but never received.
//!
//! # Example
//!
//! ```
//! use audiolog::config::Thresholds;
//! use audiolog::store::LogStore;
//! use audiolog::validate::check_consistency;
//!
//! let store = LogStore::from_lines([
//!     "[AUDIO_PLAY] frames=480, buffer_size=1920, data_size=960, speaker_volume=3.0",
//! ]);
//! let report = check_consistency(&store, &Thresholds::default());
//! for issue in report.issues() {
//!     eprintln!("Warning: {}", issue);
//! }
//! ```

use std::collections::BTreeSet;
use std::fmt;

use crate::analyze::stats::{summarize, zero_count};
use crate::config::Thresholds;
use crate::store::LogStore;

/// A heuristic audio quality problem.
#[derive(Debug, Clone, PartialEq)]
pub enum QualityIssue {
    /// Too many capture blocks start with a zero sample.
    SilentMicrophone { zero_ratio: f64 },
    /// Sent and received payload sizes differ.
    DataSizeMismatch {
        sent: BTreeSet<u64>,
        received: BTreeSet<u64>,
    },
    /// Far more packets were sent than received.
    PacketLoss { sent: usize, received: usize },
    VolumeTooLow { mean: f64 },
    VolumeTooHigh { mean: f64 },
}

impl fmt::Display for QualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityIssue::SilentMicrophone { zero_ratio } => write!(
                f,
                "Audio capture problem: {:.1}% of samples are 0, possible microphone fault",
                zero_ratio * 100.0
            ),
            QualityIssue::DataSizeMismatch { sent, received } => write!(
                f,
                "Data size mismatch: sent {} vs received {}",
                SizeSet(sent),
                SizeSet(received)
            ),
            QualityIssue::PacketLoss { sent, received } => {
                write!(f, "Audio packet loss: sent {sent}, received {received}")
            }
            QualityIssue::VolumeTooLow { mean } => {
                write!(f, "Playback volume too low: average {mean:.2}")
            }
            QualityIssue::VolumeTooHigh { mean } => {
                write!(f, "Playback volume too high: average {mean:.2}")
            }
        }
    }
}

struct SizeSet<'a>(&'a BTreeSet<u64>);

impl fmt::Display for SizeSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, size) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{size}")?;
        }
        write!(f, "}}")
    }
}

/// Outcome of the consistency checks.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsistencyReport {
    /// No heuristic fired.
    Clean,
    /// Issues in check order.
    Issues(Vec<QualityIssue>),
}

impl ConsistencyReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        matches!(self, ConsistencyReport::Clean)
    }

    pub fn issues(&self) -> &[QualityIssue] {
        match self {
            ConsistencyReport::Clean => &[],
            ConsistencyReport::Issues(issues) => issues,
        }
    }
}

/// Run every consistency check against `store`.
pub fn check_consistency(store: &LogStore, thresholds: &Thresholds) -> ConsistencyReport {
    let mut issues = Vec::new();

    check_silent_microphone(store, thresholds, &mut issues);
    check_data_sizes(store, &mut issues);
    check_packet_loss(store, thresholds, &mut issues);
    check_speaker_volume(store, thresholds, &mut issues);

    if issues.is_empty() {
        ConsistencyReport::Clean
    } else {
        ConsistencyReport::Issues(issues)
    }
}

fn check_silent_microphone(
    store: &LogStore,
    thresholds: &Thresholds,
    issues: &mut Vec<QualityIssue>,
) {
    if store.capture.is_empty() {
        return;
    }
    let zeros = zero_count(store.capture.iter().map(|r| r.first_sample));
    if zeros.ratio() > thresholds.silent_mic_zero_ratio {
        issues.push(QualityIssue::SilentMicrophone {
            zero_ratio: zeros.ratio(),
        });
    }
}

fn check_data_sizes(store: &LogStore, issues: &mut Vec<QualityIssue>) {
    if store.send.is_empty() || store.recv.is_empty() {
        return;
    }
    let sent: BTreeSet<u64> = store.send.iter().map(|r| r.data_size).collect();
    let received: BTreeSet<u64> = store.recv.iter().map(|r| r.data_size).collect();
    if sent != received {
        issues.push(QualityIssue::DataSizeMismatch { sent, received });
    }
}

fn check_packet_loss(store: &LogStore, thresholds: &Thresholds, issues: &mut Vec<QualityIssue>) {
    if store.send.is_empty() || store.recv.is_empty() {
        return;
    }
    let sent = store.send.len();
    let received = store.recv.len();
    if sent as f64 > received as f64 * thresholds.loss_send_recv_ratio {
        issues.push(QualityIssue::PacketLoss { sent, received });
    }
}

fn check_speaker_volume(
    store: &LogStore,
    thresholds: &Thresholds,
    issues: &mut Vec<QualityIssue>,
) {
    let Some(volume) = summarize(store.play.iter().map(|r| r.speaker_volume)) else {
        return;
    };
    if volume.mean < thresholds.min_speaker_volume {
        issues.push(QualityIssue::VolumeTooLow { mean: volume.mean });
    } else if volume.mean > thresholds.max_speaker_volume {
        issues.push(QualityIssue::VolumeTooHigh { mean: volume.mean });
    }
}
