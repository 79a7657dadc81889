//! Competitor placeholders shared between matches.
//!
//! A slot is an index into a [`SlotArena`]. Matches hold slot handles
//! instead of references, so the winner slot of one match can be the input
//! slot of a later one and a single write is seen by every holder.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BracketError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(usize);

impl SlotId {
  pub fn index(self) -> usize {
    self.0
  }
}

impl fmt::Display for SlotId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

#[derive(Clone, Debug)]
pub struct SlotArena<C> {
  slots: Vec<Option<C>>,
}

impl<C> Default for SlotArena<C> {
  fn default() -> Self {
    SlotArena { slots: Vec::new() }
  }
}

impl<C: Clone> SlotArena<C> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Allocate an unbound slot.
  pub fn alloc(&mut self) -> SlotId {
    self.slots.push(None);
    SlotId(self.slots.len() - 1)
  }

  /// Allocate a slot already holding `competitor`. Only the seeded field is created this way.
  pub fn alloc_bound(&mut self, competitor: C) -> SlotId {
    self.slots.push(Some(competitor));
    SlotId(self.slots.len() - 1)
  }

  pub fn read(&self, slot: SlotId) -> Option<C> {
    self.get(slot).cloned()
  }

  pub fn get(&self, slot: SlotId) -> Option<&C> {
    self.slots.get(slot.0).and_then(|entry| entry.as_ref())
  }

  pub fn is_bound(&self, slot: SlotId) -> bool {
    self.get(slot).is_some()
  }

  /// Bind an unbound slot. Binding twice would silently overwrite a decided
  /// result, so it is rejected.
  pub fn bind(&mut self, slot: SlotId, competitor: C) -> Result<(), BracketError> {
    match self.slots.get_mut(slot.0) {
      Some(entry @ None) => {
        *entry = Some(competitor);
        Ok(())
      }
      _ => Err(BracketError::InvalidRebind { slot }),
    }
  }

  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }
}
