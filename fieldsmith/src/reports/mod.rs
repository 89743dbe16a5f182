//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check;
mod generate;
mod output;

pub use check::CheckReport;
pub use generate::{GenerateOutcome, GenerateReport, GroupSummary};
#[cfg(test)]
pub use output::RecordedOutput;
pub use output::{Output, Report, TerminalOutput};
