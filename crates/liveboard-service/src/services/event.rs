//! Event service
//!
//! Handles event creation, configuration, and the open/closed and archived flags.
//! Everything except reading a single event requires the caller's stored role to be admin.

use liveboard_core::entities::{Event, User};
use liveboard_core::{DomainError, EventConfig, EventKind, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreateEventRequest, EventResponse, UpdateEventRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Event service
pub struct EventService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventService<'a> {
    /// Create a new EventService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new, active event
    #[instrument(skip(self, request))]
    pub async fn create_event(
        &self,
        user_id: &str,
        request: CreateEventRequest,
    ) -> ServiceResult<EventResponse> {
        request.validate()?;
        validate_config(request.kind, &request.config)?;
        let admin = self.require_admin(user_id).await?;

        let event = Event::new(
            self.ctx.generate_id(),
            request.kind,
            request.title,
            admin.id,
            request.config,
        );
        self.ctx.event_repo().create(&event).await?;

        info!(event_id = %event.id, kind = %event.kind, "Event created");
        Ok(EventResponse::from(event))
    }

    /// Get event by ID
    #[instrument(skip(self))]
    pub async fn get_event(&self, event_id: Snowflake) -> ServiceResult<EventResponse> {
        let event = self.find(event_id).await?;
        Ok(EventResponse::from(event))
    }

    /// Update title, config, or archived flag; creator and creation time are kept
    #[instrument(skip(self, request))]
    pub async fn update_event(
        &self,
        user_id: &str,
        event_id: Snowflake,
        request: UpdateEventRequest,
    ) -> ServiceResult<EventResponse> {
        request.validate()?;
        self.require_admin(user_id).await?;

        let mut event = self.find(event_id).await?;
        if let Some(title) = request.title {
            event.title = title;
        }
        if let Some(config) = request.config {
            validate_config(event.kind, &config)?;
            event.config = config;
        }
        if let Some(archived) = request.is_archived {
            event.is_archived = archived;
        }
        self.ctx.event_repo().update(&event).await?;

        info!(event_id = %event_id, "Event updated");
        Ok(EventResponse::from(event))
    }

    /// Open or close an event for new actions
    #[instrument(skip(self))]
    pub async fn set_active(
        &self,
        user_id: &str,
        event_id: Snowflake,
        active: bool,
    ) -> ServiceResult<EventResponse> {
        self.require_admin(user_id).await?;
        self.ctx.event_repo().set_active(event_id, active).await?;

        info!(event_id = %event_id, active, "Event status changed");
        self.get_event(event_id).await
    }

    /// Archive or restore an event
    #[instrument(skip(self))]
    pub async fn set_archived(
        &self,
        user_id: &str,
        event_id: Snowflake,
        archived: bool,
    ) -> ServiceResult<EventResponse> {
        let request = UpdateEventRequest {
            is_archived: Some(archived),
            ..UpdateEventRequest::default()
        };
        self.update_event(user_id, event_id, request).await
    }

    /// Most recently created events first
    #[instrument(skip(self))]
    pub async fn list_events(
        &self,
        user_id: &str,
        limit: i64,
    ) -> ServiceResult<Vec<EventResponse>> {
        self.require_admin(user_id).await?;

        let events = self.ctx.event_repo().list(limit).await?;
        Ok(events.into_iter().map(EventResponse::from).collect())
    }

    async fn find(&self, event_id: Snowflake) -> ServiceResult<Event> {
        let event = self
            .ctx
            .event_repo()
            .find_by_id(event_id)
            .await?
            .ok_or(DomainError::EventNotFound(event_id))?;
        Ok(event)
    }

    /// Stored admin user; unknown users and lookup failures are both refused
    async fn require_admin(&self, user_id: &str) -> ServiceResult<User> {
        match self.ctx.user_repo().find_by_id(user_id).await? {
            Some(user) if user.is_admin() => Ok(user),
            _ => Err(DomainError::AdminRequired.into()),
        }
    }
}

/// Check that the settings for `kind` describe a usable event
fn validate_config(kind: EventKind, config: &EventConfig) -> Result<(), DomainError> {
    let invalid = |msg: &str| Err(DomainError::ValidationError(msg.to_string()));

    match kind {
        EventKind::Vote => {
            if config.options.is_empty() {
                return invalid("a vote needs at least one option");
            }
            if config.max_votes < 0 {
                return invalid("maxVotes must not be negative");
            }
        }
        EventKind::LineUp => {
            if config.max_participants < 1 {
                return invalid("maxParticipants must be at least 1");
            }
            if config.waitlist_limit < 0 || config.max_count_per_user < 0 {
                return invalid("waitlistLimit and maxCountPerUser must not be negative");
            }
            if let (Some(start), Some(end)) = (config.start_time, config.end_time) {
                if start >= end {
                    return invalid("startTime must be before endTime");
                }
            }
        }
        EventKind::Memo => {
            if config.max_comments_per_user < 1 {
                return invalid("maxCommentsPerUser must be at least 1");
            }
        }
    }
    Ok(())
}
