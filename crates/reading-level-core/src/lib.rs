//! Core library for reading-level.
//!
//! Estimates how long a markdown document takes to read and how hard it is,
//! then renders a short reading guide for the top of the page. Everything
//! here is synchronous and side-effect free apart from file reads.
//!
//! # Modules
//!
//! - [`content`] - Line-based split of markdown into prose, code, headers, lists, and tables
//! - [`reading_time`] - Reading-time estimate with a per-category breakdown
//! - [`complexity`] - Flesch scores, sentence statistics, and technical density
//! - [`level`] - Beginner / Intermediate / Advanced classification
//! - [`report`] - Info box, key topics, prerequisites, and suggestions
//! - [`analyzer`] - Document loading and the per-document pipeline
//! - [`batch`] - Directory sweeps and summary reports
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use reading_level_core::analyze;
//!
//! let analysis = analyze("guide.md", "# Title\n\nThis is a simple sentence. It has two sentences.\n");
//! assert_eq!(analysis.metrics.sentences, 2);
//! println!("{}", analysis.info_box());
//! ```
#![deny(unsafe_code)]

pub mod analyzer;
pub mod batch;
pub mod complexity;
pub mod config;
pub mod content;
pub mod error;
pub mod level;
pub mod reading_time;
pub mod report;
pub mod text;
pub mod vocabulary;

pub use analyzer::{DEFAULT_MAX_INPUT_BYTES, Document, DocumentAnalysis, analyze, analyze_file};
pub use batch::{BatchOptions, BatchOutcome, SummaryReport, analyze_directory};
pub use complexity::ComplexityMetrics;
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use content::{CodeBlock, ContentBreakdown};
pub use error::{AnalysisError, AnalysisResult, ConfigError, ConfigResult};
pub use level::{FleschBand, Level, ReadingLevel};
pub use reading_time::{ReadingTime, TimeBreakdown};
pub use report::Suggestion;
