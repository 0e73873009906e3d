//! Per-category statistics over a [`LogStore`](crate::store::LogStore).
//!
//! Each analyzer is a method on the store returning `Option<...Stats>`;
//! `None` means the category had no records, so nothing is ever averaged
//! over an empty set.

mod capture;
mod network;
mod playback;
mod server;
pub mod stats;

pub use capture::CaptureStats;
pub use network::{RecvStats, SendStats};
pub use playback::{PlayDebugStats, PlayStats};
pub use server::{ServerSchemaStats, ServerStats};
pub use stats::{GapStats, PassRate, Summary, ZeroCount};
