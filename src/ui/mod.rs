//! Presentation helpers for the command-line front end.

pub mod report;

pub use report::{render_report, ReportView, CURRENCY};
