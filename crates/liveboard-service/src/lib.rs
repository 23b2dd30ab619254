//! # liveboard-service
//!
//! Application layer: the interaction engine (action dispatch, per-kind handlers, record
//! mutations, status aggregation), event management, and the request/response DTOs.

pub mod dto;
pub mod services;

pub use dto::{Action, ActionPayload};
pub use services::{
    ActionOutcome, ActionService, EventService, LineUpService, MemoService, RecordService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, StatusService,
    UserService, VoteService,
};
