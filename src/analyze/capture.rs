use super::stats::{summarize, zero_count, Summary, ZeroCount};
use crate::store::LogStore;

/// Statistics over `[AUDIO_CAPTURE]` records.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureStats {
    pub count: usize,
    pub data_size: Summary<u64>,
    pub frames: Summary<u64>,
    pub first_sample: Summary<i64>,
    pub last_sample: Summary<i64>,
    pub mic_volume: Summary<f64>,
    /// Blocks whose first sample is exactly 0. Many of these points at a
    /// muted or disconnected microphone.
    pub zero_first_samples: ZeroCount,
}

impl LogStore {
    /// Summarize captured audio blocks. `None` if no capture records were found.
    pub fn capture_stats(&self) -> Option<CaptureStats> {
        let records = &self.capture;
        Some(CaptureStats {
            count: records.len(),
            data_size: summarize(records.iter().map(|r| r.data_size))?,
            frames: summarize(records.iter().map(|r| r.frames))?,
            first_sample: summarize(records.iter().map(|r| r.first_sample))?,
            last_sample: summarize(records.iter().map(|r| r.last_sample))?,
            mic_volume: summarize(records.iter().map(|r| r.mic_volume))?,
            zero_first_samples: zero_count(records.iter().map(|r| r.first_sample)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture_line(frames: u64, data_size: u64, first: i64, last: i64, volume: &str) -> String {
        format!(
            "[AUDIO_CAPTURE] frames={frames}, data_size={data_size}, first_sample={first}, last_sample={last}, mic_volume={volume}"
        )
    }

    #[test]
    fn test_capture_stats_empty() {
        assert_eq!(LogStore::new().capture_stats(), None);
    }

    #[test]
    fn test_capture_stats() {
        let store = LogStore::from_lines([
            capture_line(480, 960, 0, 12, "1.00"),
            capture_line(480, 960, -30, 0, "0.50"),
            capture_line(240, 480, 0, -7, "1.50"),
        ]);
        let stats = store.capture_stats().unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!((stats.data_size.min, stats.data_size.max), (480, 960));
        assert_eq!(format!("{:.1}", stats.data_size.mean), "800.0");
        assert_eq!((stats.frames.min, stats.frames.max), (240, 480));
        assert_eq!((stats.first_sample.min, stats.first_sample.max), (-30, 0));
        assert_eq!((stats.last_sample.min, stats.last_sample.max), (-7, 12));
        assert_eq!(format!("{:.2}", stats.mic_volume.mean), "1.00");
        assert_eq!(stats.zero_first_samples, ZeroCount { zeros: 2, total: 3 });
    }
}
