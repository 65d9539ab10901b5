//! Page logic of the issue view, free of any terminal or network code.

pub mod draft;
pub mod escape;
pub mod issue_actions;
pub mod outcome;
pub mod rules;
pub mod submission;
pub mod timer;
pub mod values;
pub mod watcher;

pub use draft::{DraftRecord, DraftStore, FileDraftStore, MemoryDraftStore};
pub use outcome::{Notice, RemoteOutcome, RemoteResult, Toast, Tone};
pub use values::{FieldId, WorkLogValues};

/// Identity of the issue page every request is made for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueContext {
    pub issue_id: u64,
    pub csrf_token: String,
}
