//! Report data structures for commands.
//!
//! Operations collect data into reports; commands render them to an
//! [`Output`] target.

mod build;
mod components;
mod output;

pub use build::{BuildReport, FileOutcome, LanguageOutcome, PreviewFile};
pub use components::{ComponentEntry, ComponentsReport};
pub use output::{Report, TerminalOutput};
