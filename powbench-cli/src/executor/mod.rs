//! Trial Executor
//!
//! Runs planned trials and turns them into report data.
//!
//! ## Pipeline Overview
//!
//! ```text
//! ExecutionPlan (from planner)
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Measure each trial, block by block
//! └──────┬──────┘
//!        │  MagnitudeBlock (streamed to the output sink)
//!        ▼
//! ┌─────────────┐
//! │   report    │  Report with metadata and summary
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Human-readable output
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`execution`] - Sequential trial execution
//! - [`report`] - Report building
//! - [`formatting`] - Human-readable output formatting
//! - [`metadata`] - System metadata collection

mod execution;
mod formatting;
mod metadata;
mod report;

// Re-export public API
pub use execution::{ExecutionConfig, Executor};
pub use formatting::{format_block_human, format_header, format_summary_human};
pub use report::build_report;
