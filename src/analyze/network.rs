use std::collections::HashSet;

use super::stats::{sequence_gaps, summarize, GapStats, Summary};
use crate::store::LogStore;

/// Statistics over `[AUDIO_SEND]` records.
#[derive(Debug, Clone, PartialEq)]
pub struct SendStats {
    pub count: usize,
    pub data_size: Summary<u64>,
    pub packet_size: Summary<u64>,
    /// `None` with fewer than two records.
    pub sequence_gaps: Option<GapStats>,
}

/// Statistics over `[AUDIO_RECV]` records.
#[derive(Debug, Clone, PartialEq)]
pub struct RecvStats {
    pub count: usize,
    pub data_size: Summary<u64>,
    pub sequence_gaps: Option<GapStats>,
    /// Distinct sender ids, in order of first appearance.
    pub user_ids: Vec<u64>,
}

impl LogStore {
    pub fn send_stats(&self) -> Option<SendStats> {
        let records = &self.send;
        let sequences: Vec<u64> = records.iter().map(|r| r.sequence).collect();
        Some(SendStats {
            count: records.len(),
            data_size: summarize(records.iter().map(|r| r.data_size))?,
            packet_size: summarize(records.iter().map(|r| r.packet_size))?,
            sequence_gaps: sequence_gaps(&sequences),
        })
    }

    pub fn recv_stats(&self) -> Option<RecvStats> {
        let records = &self.recv;
        let sequences: Vec<u64> = records.iter().map(|r| r.sequence).collect();

        let mut seen = HashSet::new();
        let user_ids = records
            .iter()
            .map(|r| r.user_id)
            .filter(|id| seen.insert(*id))
            .collect();

        Some(RecvStats {
            count: records.len(),
            data_size: summarize(records.iter().map(|r| r.data_size))?,
            sequence_gaps: sequence_gaps(&sequences),
            user_ids,
        })
    }
}
