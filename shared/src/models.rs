//! Wire models mirrored from the CRM backend.
//!
//! The dashboard never owns the lifecycle of these records; it caches them
//! for the duration of a page visit and replaces them wholesale with what
//! the server returns.

mod analytics;
mod automation;
mod campaign;
mod communication;
mod deal;
mod lead;
mod project;
mod source;
mod user;

pub use analytics::*;
pub use automation::*;
pub use campaign::*;
pub use communication::*;
pub use deal::*;
pub use lead::*;
pub use project::*;
pub use source::*;
pub use user::*;

/// Records addressable by a numeric server id.
pub trait Identified {
    fn id(&self) -> i64;
}

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> i64 {
                self.id
            }
        })*
    };
}

identified!(
    User,
    Lead,
    LeadSource,
    LeadStatus,
    Project,
    Developer,
    ProjectMedia,
    Deal,
    PaymentSchedule,
    CallLog,
    SmsLog,
    EmailTemplate,
    Notification,
    CommunicationEntry,
    Campaign,
    Source,
    SubSource,
    ActivityLog,
    OptionItem,
);

impl Identified for CampaignManager {
    fn id(&self) -> i64 {
        self.user_id
    }
}

impl Identified for SourceAgent {
    fn id(&self) -> i64 {
        self.user_id
    }
}

pub(crate) fn default_true() -> bool {
    true
}
