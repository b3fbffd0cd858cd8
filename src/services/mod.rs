//! Service layer for returns-cli
//!
//! Form state and business rules on top of the models: the entry draft and
//! monthly ledger behind the attendance sheet, the returns form, and the
//! submission state machine both of them share.

pub mod draft;
pub mod ledger;
pub mod returns;
pub mod sheet;
pub mod workflow;

pub use draft::{EntryDraft, EntryField};
pub use ledger::{LedgerSnapshot, LedgerTotals, MonthlyLedger};
pub use returns::{ReturnDraft, ReturnField, ReturnsForm};
pub use sheet::AttendanceSheet;
pub use workflow::{SubmissionState, SubmissionWorkflow};
