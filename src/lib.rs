//! Terminal organizer for scheduled release notes.
//!
//! Posts live in a JSONL file under the platform data directory; the TUI
//! groups them by publish day in a configurable time zone and edits them
//! through a validated form.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod model;
pub mod storage;
pub mod tui;
