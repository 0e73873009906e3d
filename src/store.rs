//! Per-category record stores built from a single pass over a log.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::parse::parse_line;
use crate::records::{
    CaptureRecord, PlayDebugRecord, PlayRecord, Record, RecvRecord, SendRecord,
    ServerValidateRecord,
};

/// Buffer size for reading log files (64KB).
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Counters collected while ingesting lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
    pub lines_read: u64,
    pub records_stored: u64,
}

/// All records from one log, grouped by category, in file order.
#[derive(Debug, Default)]
pub struct LogStore {
    pub capture: Vec<CaptureRecord>,
    pub send: Vec<SendRecord>,
    pub recv: Vec<RecvRecord>,
    pub play: Vec<PlayRecord>,
    pub play_debug: Vec<PlayDebugRecord>,
    pub server: Vec<ServerValidateRecord>,
    pub errors: Vec<String>,
    stats: ParseStats,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `path` and ingest every line.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                bail!("Log file not found: {}", path.display());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to open log file {}", path.display()));
            }
        };

        let reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
        Self::from_reader(reader)
            .with_context(|| format!("Failed to read log file {}", path.display()))
    }

    /// Ingest lines from a reader until EOF.
    ///
    /// Lines are read one at a time; invalid UTF-8 aborts the read.
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self> {
        let mut store = Self::new();
        let mut line = String::with_capacity(512);
        loop {
            line.clear();
            let read = reader
                .read_line(&mut line)
                .with_context(|| format!("Error at line {}", store.stats.lines_read + 1))?;
            if read == 0 {
                break;
            }
            store.ingest_line(&line);
        }

        tracing::info!(
            "Read {} lines: {} records stored",
            store.stats.lines_read,
            store.stats.records_stored
        );
        Ok(store)
    }

    /// Build a store from in-memory lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut store = Self::new();
        for line in lines {
            store.ingest_line(line.as_ref());
        }
        store
    }

    /// Parse one line and store the resulting record, if any.
    ///
    /// A tagged line whose fields do not match is ignored. Returns true when
    /// a record was stored.
    pub fn ingest_line(&mut self, line: &str) -> bool {
        self.stats.lines_read += 1;
        match parse_line(line) {
            Some(record) => {
                self.push(record);
                true
            }
            None => false,
        }
    }

    /// Append a record to the store for its category.
    pub fn push(&mut self, record: Record) {
        self.stats.records_stored += 1;
        match record {
            Record::Capture(r) => self.capture.push(r),
            Record::Send(r) => self.send.push(r),
            Record::Recv(r) => self.recv.push(r),
            Record::Play(r) => self.play.push(r),
            Record::PlayDebug(r) => self.play_debug.push(r),
            Record::ServerValidate(r) => self.server.push(r),
            Record::Error(line) => self.errors.push(line),
        }
    }

    /// Ingestion counters for this store.
    pub fn parse_stats(&self) -> ParseStats {
        self.stats
    }

    pub fn total_records(&self) -> usize {
        self.capture.len()
            + self.send.len()
            + self.recv.len()
            + self.play.len()
            + self.play_debug.len()
            + self.server.len()
            + self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_records() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE_LOG: &str = "\
starting voice call
[AUDIO_CAPTURE] frames=480, data_size=960, first_sample=0, last_sample=5, mic_volume=1.00
[AUDIO_SEND] data_size=960, packet_size=974, sequence=1
[AUDIO_SEND] data_size=960, packet_size=974, sequence=2
[AUDIO_SEND] data_size=960
[AUDIO_RECV] data_size=960, sequence=1, user_id=7
[AUDIO_PLAY] frames=480, buffer_size=1920, data_size=960, speaker_volume=1.00
[AUDIO_PLAY_DEBUG] raw_first_sample=3, raw_last_sample=0, samples_count=480
[SERVER_AUDIO_VALIDATE] data_size=960, length=974, condition1=true, condition2=true
[AUDIO_ERROR] socket closed
";

    #[test]
    fn test_from_reader_routes_records() {
        let store = LogStore::from_reader(Cursor::new(SAMPLE_LOG)).unwrap();
        assert_eq!(store.capture.len(), 1);
        assert_eq!(store.send.len(), 2);
        assert_eq!(store.recv.len(), 1);
        assert_eq!(store.play.len(), 1);
        assert_eq!(store.play_debug.len(), 1);
        assert_eq!(store.server.len(), 1);
        assert_eq!(store.errors, vec!["[AUDIO_ERROR] socket closed".to_string()]);
        assert_eq!(store.total_records(), 8);

        let stats = store.parse_stats();
        assert_eq!(
            stats,
            ParseStats {
                lines_read: 10,
                records_stored: 8,
            }
        );
    }

    #[test]
    fn test_file_order_preserved() {
        let store = LogStore::from_lines([
            "[AUDIO_SEND] data_size=1, packet_size=1, sequence=9",
            "[AUDIO_SEND] data_size=1, packet_size=1, sequence=3",
            "[AUDIO_SEND] data_size=1, packet_size=1, sequence=3",
        ]);
        let seqs: Vec<u64> = store.send.iter().map(|r| r.sequence).collect();
        assert_eq!(seqs, vec![9, 3, 3]);
    }

    #[test]
    fn test_malformed_line_touches_no_store() {
        let mut store = LogStore::new();
        assert!(!store.ingest_line(
            "[AUDIO_CAPTURE] frames=480, data_size=960, first_sample=x, last_sample=5, mic_volume=1.0"
        ));
        assert!(store.is_empty());
        assert_eq!(
            store.parse_stats(),
            ParseStats {
                lines_read: 1,
                records_stored: 0,
            }
        );
    }

    #[test]
    fn test_empty_input() {
        let store = LogStore::from_reader(Cursor::new("")).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.parse_stats(), ParseStats::default());
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let bytes: &[u8] = b"[AUDIO_ERROR] ok\n\xff\xfe\n";
        assert!(LogStore::from_reader(Cursor::new(bytes)).is_err());
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_LOG.as_bytes()).unwrap();
        let store = LogStore::from_path(file.path()).unwrap();
        assert_eq!(store.send.len(), 2);
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.log");
        let err = LogStore::from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Log file not found"));
    }
}
