//! Staging area handed to an atomic partition transaction

use crate::entities::{Event, Interaction};
use crate::error::DomainError;
use crate::traits::RepoResult;
use crate::value_objects::Snowflake;

/// A write staged by a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordWrite {
    Create(Interaction),
    Update(Interaction),
}

impl RecordWrite {
    pub fn record(&self) -> &Interaction {
        match self {
            Self::Create(rec) | Self::Update(rec) => rec,
        }
    }

    pub fn into_record(self) -> Interaction {
        match self {
            Self::Create(rec) | Self::Update(rec) => rec,
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self, Self::Create(_))
    }
}

/// Snapshot of one event partition plus the writes staged against it
///
/// Staged writes are applied to the snapshot as well, so later reads in the same
/// transaction observe them.
#[derive(Debug)]
pub struct PartitionTx {
    event: Event,
    records: Vec<Interaction>,
    writes: Vec<RecordWrite>,
}

impl PartitionTx {
    pub fn new(event: Event, records: Vec<Interaction>) -> Self {
        Self {
            event,
            records,
            writes: Vec::new(),
        }
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn records(&self) -> &[Interaction] {
        &self.records
    }

    pub fn record(&self, id: Snowflake) -> Option<&Interaction> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Stage a new record
    pub fn create(&mut self, record: Interaction) -> RepoResult<()> {
        if record.event_id != self.event.id {
            return Err(DomainError::InternalError(format!(
                "record {} belongs to event {}, not {}",
                record.id, record.event_id, self.event.id
            )));
        }
        if self.record(record.id).is_some() {
            return Err(DomainError::InternalError(format!(
                "record {} already exists",
                record.id
            )));
        }
        self.records.push(record.clone());
        self.writes.push(RecordWrite::Create(record));
        Ok(())
    }

    /// Stage a full replacement of an existing record
    pub fn update(&mut self, record: Interaction) -> RepoResult<()> {
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or(DomainError::RecordNotFound(record.id))?;
        *slot = record.clone();

        // Collapse repeated writes to the same record
        match self.writes.iter_mut().find(|w| w.record().id == record.id) {
            Some(RecordWrite::Create(staged)) | Some(RecordWrite::Update(staged)) => {
                *staged = record;
            }
            None => self.writes.push(RecordWrite::Update(record)),
        }
        Ok(())
    }

    pub fn writes(&self) -> &[RecordWrite] {
        &self.writes
    }

    pub fn has_writes(&self) -> bool {
        !self.writes.is_empty()
    }

    pub fn into_writes(self) -> Vec<RecordWrite> {
        self.writes
    }
}
