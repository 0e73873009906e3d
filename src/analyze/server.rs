use super::stats::{pass_rate, sequence_gaps, summarize, PassRate, Summary};
use crate::records::{ServerSchema, ServerValidateRecord};
use crate::store::LogStore;

/// Statistics over server side validation records.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerStats {
    pub count: usize,
    pub data_size: Summary<u64>,
    pub length: Summary<u64>,
    pub schema: ServerSchemaStats,
    /// Records whose format differs from the first record's. They count
    /// toward the shared statistics but not the schema specific ones.
    pub mismatched_schema: usize,
}

/// Statistics that only exist for one of the server log formats.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerSchemaStats {
    Packet {
        sequence: Summary<u64>,
        /// Every adjacent sequence difference other than 1, in order.
        jumps: Vec<i64>,
        validation: PassRate,
    },
    Legacy {
        condition1: PassRate,
        condition2: PassRate,
    },
}

impl LogStore {
    /// Summarize server validation records.
    ///
    /// A log comes from one server build, so the format of the first record
    /// decides which schema specific statistics are computed.
    pub fn server_stats(&self) -> Option<ServerStats> {
        let records = &self.server;
        let schema = records.first()?.schema();
        let mismatched_schema = records.iter().filter(|r| r.schema() != schema).count();
        if mismatched_schema > 0 {
            tracing::debug!(
                "{} server records do not match the {:?} format of the first record",
                mismatched_schema,
                schema
            );
        }

        let schema = match schema {
            ServerSchema::Packet => packet_stats(records)?,
            ServerSchema::Legacy => legacy_stats(records),
        };

        Some(ServerStats {
            count: records.len(),
            data_size: summarize(records.iter().map(|r| r.data_size()))?,
            length: summarize(records.iter().map(|r| r.length()))?,
            schema,
            mismatched_schema,
        })
    }
}

fn packet_stats(records: &[ServerValidateRecord]) -> Option<ServerSchemaStats> {
    let mut sequences = Vec::new();
    let mut verdicts = Vec::new();
    for record in records {
        if let ServerValidateRecord::Packet {
            sequence,
            validation,
            ..
        } = record
        {
            sequences.push(*sequence);
            verdicts.push(*validation);
        }
    }

    let jumps: Vec<i64> = sequence_gaps(&sequences)
        .map(|stats| stats.gaps.into_iter().filter(|gap| *gap != 1).collect())
        .unwrap_or_default();

    Some(ServerSchemaStats::Packet {
        sequence: summarize(sequences.iter().copied())?,
        jumps,
        validation: pass_rate(verdicts),
    })
}

fn legacy_stats(records: &[ServerValidateRecord]) -> ServerSchemaStats {
    let mut condition1 = Vec::new();
    let mut condition2 = Vec::new();
    for record in records {
        if let ServerValidateRecord::Legacy {
            condition1: c1,
            condition2: c2,
            ..
        } = record
        {
            condition1.push(*c1);
            condition2.push(*c2);
        }
    }

    ServerSchemaStats::Legacy {
        condition1: pass_rate(condition1),
        condition2: pass_rate(condition2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet_line(sequence: u64, data_size: u64, verdict: u8) -> String {
        format!(
            "[SERVER_LOG] 尝试解析音频包: length={}, sequence={sequence}, timestamp=1000, user_id=1, raw_data_size=0x{:x}, data_size={data_size}, 验证={verdict}",
            data_size + 14,
            data_size
        )
    }

    fn legacy_line(c1: bool, c2: bool) -> String {
        format!(
            "[SERVER_AUDIO_VALIDATE] data_size=960, length=974, condition1={c1}, condition2={c2}"
        )
    }

    #[test]
    fn test_packet_schema_jumps() {
        let store = LogStore::from_lines([
            packet_line(1, 960, 1),
            packet_line(2, 960, 1),
            packet_line(2, 480, 0),
            packet_line(4, 960, 1),
        ]);
        let stats = store.server_stats().unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!((stats.data_size.min, stats.data_size.max), (480, 960));
        assert_eq!((stats.length.min, stats.length.max), (494, 974));
        assert_eq!(stats.mismatched_schema, 0);

        let ServerSchemaStats::Packet {
            sequence,
            jumps,
            validation,
        } = stats.schema
        else {
            panic!("Expected packet schema stats");
        };
        assert_eq!((sequence.min, sequence.max), (1, 4));
        assert_eq!(jumps, vec![0, 2]);
        assert_eq!(validation, PassRate { passed: 3, total: 4 });
        assert_eq!(format!("{:.1}", validation.percent()), "75.0");
    }

    #[test]
    fn test_packet_schema_contiguous() {
        let store = LogStore::from_lines([packet_line(7, 960, 1), packet_line(8, 960, 1)]);
        let ServerSchemaStats::Packet { jumps, .. } = store.server_stats().unwrap().schema else {
            panic!("Expected packet schema stats");
        };
        assert!(jumps.is_empty());
    }

    #[test]
    fn test_packet_schema_single_record_has_no_jumps() {
        let store = LogStore::from_lines([packet_line(3, 960, 1)]);
        let ServerSchemaStats::Packet { jumps, .. } = store.server_stats().unwrap().schema else {
            panic!("Expected packet schema stats");
        };
        assert!(jumps.is_empty());
    }

    #[test]
    fn test_packet_schema_backwards_jump() {
        let store = LogStore::from_lines([
            packet_line(10, 960, 1),
            packet_line(11, 960, 1),
            packet_line(4, 960, 1),
        ]);
        let ServerSchemaStats::Packet { jumps, .. } = store.server_stats().unwrap().schema else {
            panic!("Expected packet schema stats");
        };
        assert_eq!(jumps, vec![-7]);
    }

    #[test]
    fn test_legacy_schema_conditions() {
        let store = LogStore::from_lines([
            legacy_line(true, true),
            legacy_line(true, false),
            legacy_line(false, false),
        ]);
        let stats = store.server_stats().unwrap();
        assert_eq!(
            stats.schema,
            ServerSchemaStats::Legacy {
                condition1: PassRate { passed: 2, total: 3 },
                condition2: PassRate { passed: 1, total: 3 },
            }
        );
    }

    #[test]
    fn test_first_record_decides_schema() {
        let store = LogStore::from_lines([
            legacy_line(true, true),
            packet_line(1, 960, 0),
            legacy_line(false, true),
        ]);
        let stats = store.server_stats().unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.mismatched_schema, 1);
        assert_eq!(
            stats.schema,
            ServerSchemaStats::Legacy {
                condition1: PassRate { passed: 1, total: 2 },
                condition2: PassRate { passed: 2, total: 2 },
            }
        );
    }

    #[test]
    fn test_server_stats_empty() {
        assert!(LogStore::new().server_stats().is_none());
    }
}
