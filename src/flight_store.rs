//! # Flight analysis repository
//!
//! The persistence seam between the engine and the rest of the platform:
//! all Flight analytic state lives behind the [`FlightRepository`] trait,
//! so the analytics pipeline never touches storage directly – it computes a
//! [`FlightAnalysis`] value and hands it over.
//!
//! [`InMemoryFlightStore`] is the reference implementation used by tests,
//! demos, and single-process deployments. Records are shared as
//! `Arc<FlightAnalysis>` (they are immutable after ingestion) and every
//! insert assigns a **stable `u32` handle** for compact indexing by ranking
//! collaborators that do not want to carry full [`FlightId`]s.
//!
//! Social metadata (pilot profile, likes, comments, followers) is owned by
//! the external persistence collaborator and never enters this store.

use std::collections::HashMap;
use std::sync::Arc;

use crate::aerolog_errors::AerologError;
use crate::constants::FlightId;
use crate::flight::FlightAnalysis;

/// Read/write access to persisted flight analyses.
pub trait FlightRepository {
    /// Insert or replace the analysis of a flight, returning its stable
    /// handle.
    fn insert(&mut self, id: FlightId, analysis: FlightAnalysis) -> u32;

    /// Fetch the analysis of a flight.
    fn get(&self, id: &FlightId) -> Result<Arc<FlightAnalysis>, AerologError>;

    /// Remove the analysis of a flight, returning it.
    fn remove(&mut self, id: &FlightId) -> Result<Arc<FlightAnalysis>, AerologError>;

    /// All stored flight ids, in unspecified order.
    fn ids(&self) -> Vec<FlightId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory [`FlightRepository`] with stable integer handles.
#[derive(Debug, Default)]
pub struct InMemoryFlightStore {
    records: HashMap<FlightId, Arc<FlightAnalysis>, ahash::RandomState>,
    handles: HashMap<FlightId, u32, ahash::RandomState>,
    next_handle: u32,
}

impl InMemoryFlightStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stable handle assigned to a flight, if stored.
    ///
    /// Handles survive re-inserts of the same id: re-scoring a flight keeps
    /// its compact index.
    pub fn handle_of(&self, id: &FlightId) -> Option<u32> {
        self.handles.get(id).copied()
    }
}

impl FlightRepository for InMemoryFlightStore {
    fn insert(&mut self, id: FlightId, analysis: FlightAnalysis) -> u32 {
        let handle = match self.handles.get(&id) {
            Some(&handle) => handle,
            None => {
                let handle = self.next_handle;
                self.next_handle += 1;
                self.handles.insert(id.clone(), handle);
                handle
            }
        };
        self.records.insert(id, Arc::new(analysis));
        handle
    }

    fn get(&self, id: &FlightId) -> Result<Arc<FlightAnalysis>, AerologError> {
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| AerologError::FlightNotFound(id.clone()))
    }

    fn remove(&mut self, id: &FlightId) -> Result<Arc<FlightAnalysis>, AerologError> {
        self.handles.remove(id);
        self.records
            .remove(id)
            .ok_or_else(|| AerologError::FlightNotFound(id.clone()))
    }

    fn ids(&self) -> Vec<FlightId> {
        self.records.keys().cloned().collect()
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
