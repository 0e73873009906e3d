//! Classify log lines by tag and extract typed records.
//!
//! Classification walks [`EXTRACTORS`] in priority order and takes the first
//! entry whose tag occurs in the line. The entry's pattern then decides
//! whether a record comes out of it. A tagged line that does not match its
//! pattern yields nothing; log files routinely carry truncated or
//! interleaved lines and those are not errors.
//!
//! ```text
//! [AUDIO_CAPTURE] frames=480, data_size=960, first_sample=-12, last_sample=7, mic_volume=1.00
//! [AUDIO_SEND] data_size=960, packet_size=974, sequence=17
//! [AUDIO_RECV] data_size=960, sequence=17, user_id=2
//! [AUDIO_PLAY] frames=480, buffer_size=1920, data_size=960, speaker_volume=1.00
//! [AUDIO_PLAY_DEBUG] raw_first_sample=-12, raw_last_sample=7, samples_count=480
//! [SERVER_AUDIO_VALIDATE] data_size=960, length=974, condition1=true, condition2=true
//! [SERVER_LOG] 尝试解析音频包: length=974, sequence=17, timestamp=1234, user_id=2, raw_data_size=0xc003, data_size=960, 验证=1
//! [AUDIO_ERROR] opus decode failed: -4
//! ```

use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::records::{
    CaptureRecord, PlayDebugRecord, PlayRecord, Record, RecvRecord, SendRecord,
    ServerValidateRecord,
};

/// Log line categories, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Capture,
    Send,
    Recv,
    Play,
    PlayDebug,
    ServerValidate,
    ServerPacket,
    Error,
}

impl Category {
    /// The literal marker that identifies this category in a line.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Capture => "[AUDIO_CAPTURE]",
            Self::Send => "[AUDIO_SEND]",
            Self::Recv => "[AUDIO_RECV]",
            Self::Play => "[AUDIO_PLAY]",
            Self::PlayDebug => "[AUDIO_PLAY_DEBUG]",
            Self::ServerValidate => "[SERVER_AUDIO_VALIDATE]",
            // "attempting to parse audio packet"
            Self::ServerPacket => "[SERVER_LOG] 尝试解析音频包",
            Self::Error => "[AUDIO_ERROR]",
        }
    }
}

struct Extractor {
    category: Category,
    extract: fn(&str) -> Option<Record>,
}

/// Classification table. Order is priority: the first tag found wins.
const EXTRACTORS: &[Extractor] = &[
    Extractor {
        category: Category::Capture,
        extract: extract_capture,
    },
    Extractor {
        category: Category::Send,
        extract: extract_send,
    },
    Extractor {
        category: Category::Recv,
        extract: extract_recv,
    },
    Extractor {
        category: Category::Play,
        extract: extract_play,
    },
    Extractor {
        category: Category::PlayDebug,
        extract: extract_play_debug,
    },
    Extractor {
        category: Category::ServerValidate,
        extract: extract_server_validate,
    },
    Extractor {
        category: Category::ServerPacket,
        extract: extract_server_packet,
    },
    Extractor {
        category: Category::Error,
        extract: extract_error,
    },
];

static CAPTURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\[AUDIO_CAPTURE\] frames=(\d+), data_size=(\d+), first_sample=(-?\d+), last_sample=(-?\d+), mic_volume=([\d.]+)",
    )
    .expect("Invalid capture regex pattern")
});

static SEND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[AUDIO_SEND\] data_size=(\d+), packet_size=(\d+), sequence=(\d+)")
        .expect("Invalid send regex pattern")
});

static RECV_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[AUDIO_RECV\] data_size=(\d+), sequence=(\d+), user_id=(\d+)")
        .expect("Invalid recv regex pattern")
});

static PLAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\[AUDIO_PLAY\] frames=(\d+), buffer_size=(\d+), data_size=(\d+), speaker_volume=([\d.]+)",
    )
    .expect("Invalid play regex pattern")
});

static PLAY_DEBUG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\[AUDIO_PLAY_DEBUG\] raw_first_sample=(-?\d+), raw_last_sample=(-?\d+), samples_count=(\d+)",
    )
    .expect("Invalid play debug regex pattern")
});

static SERVER_VALIDATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\[SERVER_AUDIO_VALIDATE\] data_size=(\d+), length=(\d+), condition1=(\w+), condition2=(\w+)",
    )
    .expect("Invalid server validate regex pattern")
});

static SERVER_PACKET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\[SERVER_LOG\] 尝试解析音频包: length=(\d+), sequence=(\d+), timestamp=(\d+), user_id=(\d+), raw_data_size=0x([0-9a-fA-F]+), data_size=(\d+), 验证=(\d+)",
    )
    .expect("Invalid server packet regex pattern")
});

/// Determine which category a line belongs to, if any.
pub fn classify(line: &str) -> Option<Category> {
    EXTRACTORS
        .iter()
        .find(|e| line.contains(e.category.tag()))
        .map(|e| e.category)
}

/// Extract a record for a line already known to carry `category`'s tag.
///
/// Returns `None` when the line does not match the category's field layout.
pub fn extract(category: Category, line: &str) -> Option<Record> {
    EXTRACTORS
        .iter()
        .find(|e| e.category == category)
        .and_then(|e| (e.extract)(line))
}

/// Classify and extract in one step.
pub fn parse_line(line: &str) -> Option<Record> {
    extract(classify(line)?, line)
}

/// Parse capture group `i` as `T`. Out-of-range numbers count as a mismatch.
fn field<T: FromStr>(caps: &Captures<'_>, i: usize) -> Option<T> {
    caps.get(i)?.as_str().parse().ok()
}

fn extract_capture(line: &str) -> Option<Record> {
    let caps = CAPTURE_RE.captures(line)?;
    Some(Record::Capture(CaptureRecord {
        frames: field(&caps, 1)?,
        data_size: field(&caps, 2)?,
        first_sample: field(&caps, 3)?,
        last_sample: field(&caps, 4)?,
        mic_volume: field(&caps, 5)?,
        line: line.trim().to_string(),
    }))
}

fn extract_send(line: &str) -> Option<Record> {
    let caps = SEND_RE.captures(line)?;
    Some(Record::Send(SendRecord {
        data_size: field(&caps, 1)?,
        packet_size: field(&caps, 2)?,
        sequence: field(&caps, 3)?,
        line: line.trim().to_string(),
    }))
}

fn extract_recv(line: &str) -> Option<Record> {
    let caps = RECV_RE.captures(line)?;
    Some(Record::Recv(RecvRecord {
        data_size: field(&caps, 1)?,
        sequence: field(&caps, 2)?,
        user_id: field(&caps, 3)?,
        line: line.trim().to_string(),
    }))
}

fn extract_play(line: &str) -> Option<Record> {
    let caps = PLAY_RE.captures(line)?;
    Some(Record::Play(PlayRecord {
        frames: field(&caps, 1)?,
        buffer_size: field(&caps, 2)?,
        data_size: field(&caps, 3)?,
        speaker_volume: field(&caps, 4)?,
        line: line.trim().to_string(),
    }))
}

fn extract_play_debug(line: &str) -> Option<Record> {
    let caps = PLAY_DEBUG_RE.captures(line)?;
    Some(Record::PlayDebug(PlayDebugRecord {
        raw_first_sample: field(&caps, 1)?,
        raw_last_sample: field(&caps, 2)?,
        samples_count: field(&caps, 3)?,
        line: line.trim().to_string(),
    }))
}

fn extract_server_validate(line: &str) -> Option<Record> {
    let caps = SERVER_VALIDATE_RE.captures(line)?;
    Some(Record::ServerValidate(ServerValidateRecord::Legacy {
        data_size: field(&caps, 1)?,
        length: field(&caps, 2)?,
        condition1: &caps[3] == "true",
        condition2: &caps[4] == "true",
        line: line.trim().to_string(),
    }))
}

fn extract_server_packet(line: &str) -> Option<Record> {
    let caps = SERVER_PACKET_RE.captures(line)?;
    let verdict: u64 = field(&caps, 7)?;
    Some(Record::ServerValidate(ServerValidateRecord::Packet {
        length: field(&caps, 1)?,
        sequence: field(&caps, 2)?,
        timestamp: field(&caps, 3)?,
        user_id: field(&caps, 4)?,
        raw_data_size_hex: caps[5].to_string(),
        data_size: field(&caps, 6)?,
        validation: verdict == 1,
        line: line.trim().to_string(),
    }))
}

fn extract_error(line: &str) -> Option<Record> {
    Some(Record::Error(line.trim().to_string()))
}
