//! In-memory funder storage.
//!
//! `FunderStore` owns the ordered record list, the ID counter and the
//! id -> record snapshot index. It does no locking of its own; callers share
//! it behind a single `RwLock` (see `AppState`) so every lookup and mutation
//! pair runs under one guard.

mod counter;

pub use counter::IdCounter;

use std::collections::HashMap;
use std::fmt;

use crate::clock::Clock;
use crate::entities::{Funder, NewFunder};

/// Amount added by a top-up: 0.0716 of an 18-decimal unit.
pub const TOP_UP_INCREMENT: u64 = 71_600_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(u64),
    IndexMismatch(u64),
    AmountOverflow(u64),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "ID {}: funder not found.", id),
            StoreError::IndexMismatch(id) => write!(f, "ID {}: stored record does not match index.", id),
            StoreError::AmountOverflow(id) => write!(f, "ID {}: amount would overflow.", id),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug, Default)]
pub struct FunderStore {
    funders: Vec<Funder>,
    ids: IdCounter,
    index: HashMap<u64, Funder>,
}

impl FunderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates an ID, stamps the record and appends it.
    pub fn insert(&mut self, new_funder: NewFunder, date_funded: String) -> Funder {
        let id = self.ids.increment();
        let funder = new_funder.into_funder(id, date_funded);

        self.funders.push(funder.clone());
        self.index.insert(id, funder.clone());
        funder
    }

    /// Inserts every record in order, stamping each with its own clock reading.
    pub fn insert_many(&mut self, new_funders: Vec<NewFunder>, clock: &dyn Clock) -> Vec<Funder> {
        new_funders
            .into_iter()
            .map(|new_funder| self.insert(new_funder, clock.now()))
            .collect()
    }

    pub fn list(&self) -> &[Funder] {
        &self.funders
    }

    pub fn len(&self) -> usize {
        self.funders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funders.is_empty()
    }

    /// Highest ID issued so far, including deleted ones.
    pub fn last_id(&self) -> u64 {
        self.ids.current()
    }

    /// Position of the first record carrying `id`.
    pub fn index_of(&self, id: u64) -> Result<usize, StoreError> {
        self.funders
            .iter()
            .position(|funder| funder.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    /// Finds a record by scanning the list, then checks it against the index
    /// snapshot for the same ID.
    pub fn lookup(&self, id: u64) -> Result<(&Funder, usize), StoreError> {
        let position = self.index_of(id)?;
        let funder = &self.funders[position];

        match self.index.get(&id) {
            Some(snapshot) if snapshot == funder => Ok((funder, position)),
            _ => Err(StoreError::IndexMismatch(id)),
        }
    }

    /// Adds `increment` to the record's amount and refreshes its snapshot.
    pub fn top_up(&mut self, id: u64, increment: u64) -> Result<Funder, StoreError> {
        let (_, position) = self.lookup(id)?;
        let funder = &mut self.funders[position];

        funder.amount = funder
            .amount
            .checked_add(increment)
            .ok_or(StoreError::AmountOverflow(id))?;

        let updated = funder.clone();
        self.index.insert(id, updated.clone());
        Ok(updated)
    }

    /// Removes the record from both the list and the index. Later records
    /// shift down one position but keep their IDs.
    pub fn remove(&mut self, id: u64) -> Result<Funder, StoreError> {
        let (_, position) = self.lookup(id)?;
        let removed = self.funders.remove(position);
        self.index.remove(&id);
        Ok(removed)
    }
}
