//! Business logic services
//!
//! The interaction engine (dispatcher, per-kind handlers, record mutations, status
//! aggregation) plus event and profile management.

pub mod action;
pub mod context;
pub mod error;
pub mod event;
pub mod lineup;
pub mod memo;
pub mod record;
pub mod status;
pub mod user;
pub mod vote;

// Re-export all services for convenience
pub use action::{ActionOutcome, ActionService};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use event::EventService;
pub use lineup::{admit, plan_cancellation, CancellationPlan, LineUpService};
pub use memo::MemoService;
pub use record::RecordService;
pub use status::StatusService;
pub use user::UserService;
pub use vote::VoteService;
