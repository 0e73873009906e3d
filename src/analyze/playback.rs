use super::stats::{summarize, zero_count, Summary, ZeroCount};
use crate::store::LogStore;

/// Statistics over `[AUDIO_PLAY]` records.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayStats {
    pub count: usize,
    pub data_size: Summary<u64>,
    pub buffer_size: Summary<u64>,
    pub frames: Summary<u64>,
    pub speaker_volume: Summary<f64>,
}

/// Statistics over `[AUDIO_PLAY_DEBUG]` records.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayDebugStats {
    pub count: usize,
    pub raw_first_sample: Summary<i64>,
    pub raw_last_sample: Summary<i64>,
    pub samples_count: Summary<u64>,
    pub zero_first_samples: ZeroCount,
    pub zero_last_samples: ZeroCount,
    /// Range over first and last samples together.
    pub all_samples: Summary<i64>,
}

impl LogStore {
    pub fn play_stats(&self) -> Option<PlayStats> {
        let records = &self.play;
        Some(PlayStats {
            count: records.len(),
            data_size: summarize(records.iter().map(|r| r.data_size))?,
            buffer_size: summarize(records.iter().map(|r| r.buffer_size))?,
            frames: summarize(records.iter().map(|r| r.frames))?,
            speaker_volume: summarize(records.iter().map(|r| r.speaker_volume))?,
        })
    }

    pub fn play_debug_stats(&self) -> Option<PlayDebugStats> {
        let records = &self.play_debug;
        let firsts = records.iter().map(|r| r.raw_first_sample);
        let lasts = records.iter().map(|r| r.raw_last_sample);
        Some(PlayDebugStats {
            count: records.len(),
            raw_first_sample: summarize(firsts.clone())?,
            raw_last_sample: summarize(lasts.clone())?,
            samples_count: summarize(records.iter().map(|r| r.samples_count))?,
            zero_first_samples: zero_count(firsts.clone()),
            zero_last_samples: zero_count(lasts.clone()),
            all_samples: summarize(firsts.chain(lasts))?,
        })
    }
}
