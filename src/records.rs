//! Typed records extracted from audio pipeline log lines.
//!
//! Every record owns the trimmed source line it was parsed from so the
//! report can point back at the original text.

/// `[AUDIO_CAPTURE]` - a block of microphone frames handed to the encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureRecord {
    pub frames: u64,
    pub data_size: u64,
    pub first_sample: i64,
    pub last_sample: i64,
    pub mic_volume: f64,
    pub line: String,
}

/// `[AUDIO_SEND]` - an audio packet written to the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRecord {
    pub data_size: u64,
    pub packet_size: u64,
    pub sequence: u64,
    pub line: String,
}

/// `[AUDIO_RECV]` - an audio packet read from the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecvRecord {
    pub data_size: u64,
    pub sequence: u64,
    pub user_id: u64,
    pub line: String,
}

/// `[AUDIO_PLAY]` - a buffer queued to the speaker.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRecord {
    pub frames: u64,
    pub buffer_size: u64,
    pub data_size: u64,
    pub speaker_volume: f64,
    pub line: String,
}

/// `[AUDIO_PLAY_DEBUG]` - raw sample values seen by the playback path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayDebugRecord {
    pub raw_first_sample: i64,
    pub raw_last_sample: i64,
    pub samples_count: u64,
    pub line: String,
}

/// Server side packet validation.
///
/// Two server builds log this differently. Older servers emit
/// `[SERVER_AUDIO_VALIDATE]` with the two validation conditions spelled out,
/// newer ones emit the full parsed packet header with a single verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerValidateRecord {
    Legacy {
        data_size: u64,
        length: u64,
        condition1: bool,
        condition2: bool,
        line: String,
    },
    Packet {
        length: u64,
        sequence: u64,
        timestamp: u64,
        user_id: u64,
        /// Hex digits as logged, without the `0x` prefix.
        raw_data_size_hex: String,
        data_size: u64,
        validation: bool,
        line: String,
    },
}

impl ServerValidateRecord {
    pub fn data_size(&self) -> u64 {
        match self {
            Self::Legacy { data_size, .. } | Self::Packet { data_size, .. } => *data_size,
        }
    }

    pub fn length(&self) -> u64 {
        match self {
            Self::Legacy { length, .. } | Self::Packet { length, .. } => *length,
        }
    }

    pub fn line(&self) -> &str {
        match self {
            Self::Legacy { line, .. } | Self::Packet { line, .. } => line,
        }
    }

    pub fn schema(&self) -> ServerSchema {
        match self {
            Self::Legacy { .. } => ServerSchema::Legacy,
            Self::Packet { .. } => ServerSchema::Packet,
        }
    }
}

/// Which server log format a validation record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerSchema {
    Legacy,
    Packet,
}

/// One parsed log line, tagged by category.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Capture(CaptureRecord),
    Send(SendRecord),
    Recv(RecvRecord),
    Play(PlayRecord),
    PlayDebug(PlayDebugRecord),
    ServerValidate(ServerValidateRecord),
    /// `[AUDIO_ERROR]` lines are kept verbatim (trimmed).
    Error(String),
}
