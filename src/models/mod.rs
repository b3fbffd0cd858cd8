//! Core data models for returns-cli
//!
//! Service entries and the month/location they belong to, return requests
//! with their attachments, and the signed-in session.

pub mod attachment;
pub mod entry;
pub mod ids;
pub mod location;
pub mod money;
pub mod period;
pub mod returns;
pub mod session;

pub use attachment::{Attachment, AttachmentSet, MAX_ATTACHMENTS, MAX_TOTAL_BYTES};
pub use entry::{ServiceEntry, ServiceType};
pub use ids::{EntryId, MessageId, ReturnId, UserId};
pub use location::LocationContext;
pub use money::Money;
pub use period::ReportingMonth;
pub use returns::{ReturnReason, ReturnRequest, Urgency};
pub use session::{Secret, Session, UserProfile};
