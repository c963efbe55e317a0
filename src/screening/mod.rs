//! Screening orchestration
//!
//! - `orchestrator`: resume list, job URL, results and the screening flow
//! - `presenter`: per-row evaluation and skill-test flow
//! - `labels`: score bands and display names

pub mod labels;
pub mod orchestrator;
pub mod presenter;

pub use labels::{display_name, match_label, match_summary, MatchLabel};
pub use orchestrator::{ScreeningRequest, ScreeningSession};
pub use presenter::{ResultsPresenter, RowState};
