//! Text report assembled from the per-category statistics and the
//! consistency checks.

use std::fmt;

use crate::analyze::{
    CaptureStats, PlayDebugStats, PlayStats, RecvStats, SendStats, ServerSchemaStats,
    ServerStats, Summary,
};
use crate::config::Thresholds;
use crate::store::LogStore;
use crate::validate::{check_consistency, ConsistencyReport};

const SEPARATOR_WIDTH: usize = 50;

/// Everything the report prints, computed up front.
#[derive(Debug)]
pub struct Report {
    pub source: String,
    pub capture: Option<CaptureStats>,
    pub send: Option<SendStats>,
    pub recv: Option<RecvStats>,
    pub play: Option<PlayStats>,
    pub play_debug: Option<PlayDebugStats>,
    pub server: Option<ServerStats>,
    pub errors: Vec<String>,
    pub consistency: ConsistencyReport,
}

impl Report {
    /// Run every analyzer and the consistency checks over `store`.
    pub fn build(source: impl Into<String>, store: &LogStore, thresholds: &Thresholds) -> Self {
        Report {
            source: source.into(),
            capture: store.capture_stats(),
            send: store.send_stats(),
            recv: store.recv_stats(),
            play: store.play_stats(),
            play_debug: store.play_debug_stats(),
            server: store.server_stats(),
            errors: store.errors.clone(),
            consistency: check_consistency(store, thresholds),
        }
    }
}

/// `min - max` for a summary.
fn range<T: fmt::Display>(s: &Summary<T>) -> String {
    format!("{} - {}", s.min, s.max)
}

/// Volume ranges use the same precision as their averages.
fn volume_range(s: &Summary<f64>) -> String {
    format!("{:.2} - {:.2}", s.min, s.max)
}

fn write_capture(f: &mut fmt::Formatter<'_>, stats: &Option<CaptureStats>) -> fmt::Result {
    writeln!(f, "=== Audio Capture Analysis ===")?;
    let Some(s) = stats else {
        return writeln!(f, "No audio capture records found");
    };
    writeln!(f, "Capture records: {}", s.count)?;
    writeln!(f, "Data size range: {} bytes", range(&s.data_size))?;
    writeln!(f, "Average data size: {:.1} bytes", s.data_size.mean)?;
    writeln!(f, "Frames range: {}", range(&s.frames))?;
    writeln!(f, "Average frames: {:.1}", s.frames.mean)?;
    writeln!(f, "First sample range: {}", range(&s.first_sample))?;
    writeln!(f, "Last sample range: {}", range(&s.last_sample))?;
    writeln!(f, "Mic volume range: {}", volume_range(&s.mic_volume))?;
    writeln!(f, "Average mic volume: {:.2}", s.mic_volume.mean)?;
    writeln!(
        f,
        "First sample zero count: {}/{}",
        s.zero_first_samples.zeros, s.zero_first_samples.total
    )
}

fn write_send(f: &mut fmt::Formatter<'_>, stats: &Option<SendStats>) -> fmt::Result {
    writeln!(f, "=== Audio Send Analysis ===")?;
    let Some(s) = stats else {
        return writeln!(f, "No audio send records found");
    };
    writeln!(f, "Send records: {}", s.count)?;
    writeln!(f, "Sent data size range: {} bytes", range(&s.data_size))?;
    writeln!(f, "Average sent data size: {:.1} bytes", s.data_size.mean)?;
    writeln!(f, "Packet size range: {} bytes", range(&s.packet_size))?;
    writeln!(f, "Average packet size: {:.1} bytes", s.packet_size.mean)?;
    if let Some(gaps) = &s.sequence_gaps {
        writeln!(f, "Sequence gap range: {}", range(&gaps.summary))?;
        writeln!(f, "Average sequence gap: {:.1}", gaps.summary.mean)?;
    }
    Ok(())
}

fn write_recv(f: &mut fmt::Formatter<'_>, stats: &Option<RecvStats>) -> fmt::Result {
    writeln!(f, "=== Audio Receive Analysis ===")?;
    let Some(s) = stats else {
        return writeln!(f, "No audio receive records found");
    };
    writeln!(f, "Receive records: {}", s.count)?;
    writeln!(f, "Received data size range: {} bytes", range(&s.data_size))?;
    writeln!(f, "Average received data size: {:.1} bytes", s.data_size.mean)?;
    if let Some(gaps) = &s.sequence_gaps {
        writeln!(f, "Received sequence gap range: {}", range(&gaps.summary))?;
        writeln!(f, "Average received sequence gap: {:.1}", gaps.summary.mean)?;
    }
    writeln!(f, "Received user IDs: {:?}", s.user_ids)
}

fn write_play(f: &mut fmt::Formatter<'_>, stats: &Option<PlayStats>) -> fmt::Result {
    writeln!(f, "=== Audio Playback Analysis ===")?;
    let Some(s) = stats else {
        return writeln!(f, "No audio playback records found");
    };
    writeln!(f, "Playback records: {}", s.count)?;
    writeln!(f, "Playback data size range: {} bytes", range(&s.data_size))?;
    writeln!(f, "Playback buffer size range: {}", range(&s.buffer_size))?;
    writeln!(f, "Playback frames range: {}", range(&s.frames))?;
    writeln!(f, "Playback volume range: {}", volume_range(&s.speaker_volume))?;
    writeln!(f, "Average playback volume: {:.2}", s.speaker_volume.mean)
}

fn write_play_debug(f: &mut fmt::Formatter<'_>, stats: &Option<PlayDebugStats>) -> fmt::Result {
    writeln!(f, "=== Audio Playback Debug Analysis ===")?;
    let Some(s) = stats else {
        return writeln!(f, "No audio playback debug records found");
    };
    writeln!(f, "Playback debug records: {}", s.count)?;
    writeln!(f, "Raw first sample range: {}", range(&s.raw_first_sample))?;
    writeln!(f, "Raw last sample range: {}", range(&s.raw_last_sample))?;
    writeln!(f, "Samples count range: {}", range(&s.samples_count))?;
    writeln!(
        f,
        "Raw first sample zero count: {}/{}",
        s.zero_first_samples.zeros, s.zero_first_samples.total
    )?;
    writeln!(
        f,
        "Raw last sample zero count: {}/{}",
        s.zero_last_samples.zeros, s.zero_last_samples.total
    )?;
    writeln!(f, "All sample values range: {}", range(&s.all_samples))
}

fn write_server(f: &mut fmt::Formatter<'_>, stats: &Option<ServerStats>) -> fmt::Result {
    writeln!(f, "=== Server Audio Validation Analysis ===")?;
    let Some(s) = stats else {
        return writeln!(f, "No server audio records found");
    };
    writeln!(f, "Server audio records: {}", s.count)?;
    writeln!(f, "Server data size range: {} bytes", range(&s.data_size))?;
    writeln!(f, "Server packet length range: {} bytes", range(&s.length))?;
    match &s.schema {
        ServerSchemaStats::Packet {
            sequence,
            jumps,
            validation,
        } => {
            writeln!(f, "Packet sequence range: {}", range(sequence))?;
            if jumps.is_empty() {
                writeln!(f, "Sequence numbers contiguous, no jumps")?;
            } else {
                writeln!(f, "Sequence jumps found: {jumps:?}")?;
            }
            writeln!(
                f,
                "Packet validation pass rate: {}/{} ({:.1}%)",
                validation.passed,
                validation.total,
                validation.percent()
            )
        }
        ServerSchemaStats::Legacy {
            condition1,
            condition2,
        } => {
            writeln!(
                f,
                "Condition 1 pass rate: {}/{} ({:.1}%)",
                condition1.passed,
                condition1.total,
                condition1.percent()
            )?;
            writeln!(
                f,
                "Condition 2 pass rate: {}/{} ({:.1}%)",
                condition2.passed,
                condition2.total,
                condition2.percent()
            )
        }
    }
}

fn write_errors(f: &mut fmt::Formatter<'_>, errors: &[String]) -> fmt::Result {
    writeln!(f, "=== Error Analysis ===")?;
    if errors.is_empty() {
        return writeln!(f, "No error records found");
    }
    writeln!(f, "Errors: {}", errors.len())?;
    for error in errors {
        writeln!(f, "  {error}")?;
    }
    Ok(())
}

fn write_quality(f: &mut fmt::Formatter<'_>, consistency: &ConsistencyReport) -> fmt::Result {
    writeln!(f, "=== Audio Quality Issues ===")?;
    match consistency {
        ConsistencyReport::Clean => writeln!(f, "✅ No obvious audio quality issues found"),
        ConsistencyReport::Issues(issues) => {
            for issue in issues {
                writeln!(f, "⚠️  {issue}")?;
            }
            Ok(())
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analyzing log file: {}", self.source)?;
        writeln!(f, "{}", "=".repeat(SEPARATOR_WIDTH))?;

        write_capture(f, &self.capture)?;
        writeln!(f)?;
        write_send(f, &self.send)?;
        writeln!(f)?;
        write_recv(f, &self.recv)?;
        writeln!(f)?;
        write_play(f, &self.play)?;
        writeln!(f)?;
        write_play_debug(f, &self.play_debug)?;
        writeln!(f)?;
        write_server(f, &self.server)?;
        writeln!(f)?;
        write_errors(f, &self.errors)?;
        writeln!(f)?;
        write_quality(f, &self.consistency)?;
        writeln!(f)?;

        writeln!(f, "Analysis complete.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(lines: &[&str]) -> String {
        let store = LogStore::from_lines(lines);
        Report::build("voice_call.log", &store, &Thresholds::default()).to_string()
    }

    #[test]
    fn test_empty_report() {
        let out = render(&[]);
        assert!(out.starts_with("Analyzing log file: voice_call.log\n"));
        for line in [
            "No audio capture records found",
            "No audio send records found",
            "No audio receive records found",
            "No audio playback records found",
            "No audio playback debug records found",
            "No server audio records found",
            "No error records found",
            "✅ No obvious audio quality issues found",
        ] {
            assert!(out.contains(line), "missing {line:?} in:\n{out}");
        }
        assert!(out.ends_with("Analysis complete.\n"));
    }

    #[test]
    fn test_section_order() {
        let out = render(&[]);
        let headers = [
            "=== Audio Capture Analysis ===",
            "=== Audio Send Analysis ===",
            "=== Audio Receive Analysis ===",
            "=== Audio Playback Analysis ===",
            "=== Audio Playback Debug Analysis ===",
            "=== Server Audio Validation Analysis ===",
            "=== Error Analysis ===",
            "=== Audio Quality Issues ===",
        ];
        let positions: Vec<usize> = headers
            .iter()
            .map(|h| out.find(h).expect("header present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_capture_section_values() {
        let out = render(&[
            "[AUDIO_CAPTURE] frames=480, data_size=960, first_sample=0, last_sample=3, mic_volume=0.75",
            "[AUDIO_CAPTURE] frames=480, data_size=961, first_sample=4, last_sample=-3, mic_volume=1.25",
        ]);
        assert!(out.contains("Capture records: 2\n"));
        assert!(out.contains("Data size range: 960 - 961 bytes\n"));
        assert!(out.contains("Average data size: 960.5 bytes\n"));
        assert!(out.contains("First sample range: 0 - 4\n"));
        assert!(out.contains("Last sample range: -3 - 3\n"));
        assert!(out.contains("Mic volume range: 0.75 - 1.25\n"));
        assert!(out.contains("Average mic volume: 1.00\n"));
        assert!(out.contains("First sample zero count: 1/2\n"));
    }

    #[test]
    fn test_whole_volumes_keep_decimals() {
        let out = render(&[
            "[AUDIO_CAPTURE] frames=480, data_size=960, first_sample=1, last_sample=3, mic_volume=2",
            "[AUDIO_PLAY] frames=480, buffer_size=1920, data_size=960, speaker_volume=1.0",
        ]);
        assert!(out.contains("Mic volume range: 2.00 - 2.00\n"), "{out}");
        assert!(out.contains("Playback volume range: 1.00 - 1.00\n"), "{out}");
    }

    #[test]
    fn test_receive_and_server_sections() {
        let out = render(&[
            "[AUDIO_RECV] data_size=960, sequence=5, user_id=1",
            "[AUDIO_RECV] data_size=960, sequence=6, user_id=1",
            "[AUDIO_RECV] data_size=960, sequence=8, user_id=2",
            "[AUDIO_RECV] data_size=960, sequence=9, user_id=3",
            "[SERVER_LOG] 尝试解析音频包: length=974, sequence=1, timestamp=1, user_id=1, raw_data_size=0xc003, data_size=960, 验证=1",
            "[SERVER_LOG] 尝试解析音频包: length=974, sequence=2, timestamp=2, user_id=1, raw_data_size=0xc003, data_size=960, 验证=1",
            "[SERVER_LOG] 尝试解析音频包: length=974, sequence=2, timestamp=3, user_id=1, raw_data_size=0xc003, data_size=960, 验证=0",
            "[SERVER_LOG] 尝试解析音频包: length=974, sequence=4, timestamp=4, user_id=1, raw_data_size=0xc003, data_size=960, 验证=1",
        ]);
        assert!(out.contains("Received sequence gap range: 1 - 2\n"));
        assert!(out.contains("Average received sequence gap: 1.3\n"));
        assert!(out.contains("Received user IDs: [1, 2, 3]\n"));
        assert!(out.contains("Packet sequence range: 1 - 4\n"));
        assert!(out.contains("Sequence jumps found: [0, 2]\n"));
        assert!(out.contains("Packet validation pass rate: 3/4 (75.0%)\n"));
    }

    #[test]
    fn test_legacy_server_and_errors() {
        let out = render(&[
            "[SERVER_AUDIO_VALIDATE] data_size=960, length=974, condition1=true, condition2=false",
            "[AUDIO_ERROR] playback underrun",
        ]);
        assert!(out.contains("Condition 1 pass rate: 1/1 (100.0%)\n"));
        assert!(out.contains("Condition 2 pass rate: 0/1 (0.0%)\n"));
        assert!(out.contains("Errors: 1\n  [AUDIO_ERROR] playback underrun\n"));
    }

    #[test]
    fn test_quality_issues_listed() {
        let out = render(&[
            "[AUDIO_PLAY] frames=480, buffer_size=1920, data_size=960, speaker_volume=0.05",
            "[AUDIO_PLAY] frames=480, buffer_size=1920, data_size=960, speaker_volume=0.08",
        ]);
        assert!(out.contains("Playback volume range: 0.05 - 0.08\n"));
        assert!(out.contains("⚠️  Playback volume too low: average 0.07\n"));
        assert!(!out.contains("No obvious audio quality issues"));
    }
}
