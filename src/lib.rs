//! audiolog library - parsing and analysis of voice call audio pipeline logs.
//!
//! This library provides the extraction and statistics engine used by the
//! `audiolog` binary.
//!
//! # Modules
//!
//! - [`parse`] - Line classification and typed record extraction
//! - [`store`] - Per-category record stores built from a log
//! - [`analyze`] - Per-category statistics
//! - [`validate`] - Cross-category audio quality checks
//! - [`report`] - Text report assembly
//!
//! # Example
//!
//! ```no_run
//! use audiolog::{LogStore, Report, Thresholds};
//! use std::path::Path;
//!
//! let store = LogStore::from_path(Path::new("voice_call.log"))
//!     .expect("Failed to read log file");
//! let report = Report::build("voice_call.log", &store, &Thresholds::default());
//! print!("{report}");
//! ```

pub mod analyze;
pub mod config;
pub mod parse;
pub mod records;
pub mod report;
pub mod store;
pub mod validate;

// Re-export for convenience
pub use config::{Config, Thresholds};
pub use records::Record;
pub use report::Report;
pub use store::LogStore;
pub use validate::{check_consistency, ConsistencyReport, QualityIssue};
