// Slot registry - which backend instance owns which slot
//
// Explicitly owned by the top-level state and passed into the controllers;
// never ambient/global. Invariant: at most one live instance per slot.

use std::collections::HashMap;

use super::models::{PlayerInstance, SlotId};

#[derive(Debug, Default)]
pub struct SlotRegistry {
    players: HashMap<SlotId, PlayerInstance>,
}

impl SlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player for a slot, returning the displaced instance if the
    /// slot was already occupied. Callers must tear the displaced one down.
    pub fn insert(&mut self, slot: SlotId, player: PlayerInstance) -> Option<PlayerInstance> {
        self.players.insert(slot, player)
    }

    pub fn remove(&mut self, slot: SlotId) -> Option<PlayerInstance> {
        self.players.remove(&slot)
    }

    pub fn get(&self, slot: SlotId) -> Option<&PlayerInstance> {
        self.players.get(&slot)
    }

    pub fn get_mut(&mut self, slot: SlotId) -> Option<&mut PlayerInstance> {
        self.players.get_mut(&slot)
    }

    pub fn contains(&self, slot: SlotId) -> bool {
        self.players.contains_key(&slot)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Occupied slots in display order.
    pub fn slots(&self) -> Vec<SlotId> {
        let mut slots: Vec<SlotId> = self.players.keys().copied().collect();
        slots.sort();
        slots
    }

    /// Occupied slots with their players, in display order.
    pub fn populated(&self) -> Vec<(SlotId, &PlayerInstance)> {
        let mut entries: Vec<(SlotId, &PlayerInstance)> =
            self.players.iter().map(|(s, p)| (*s, p)).collect();
        entries.sort_by_key(|(s, _)| *s);
        entries
    }

    /// Remove every registered player, returning them in display order.
    pub fn drain_all(&mut self) -> Vec<(SlotId, PlayerInstance)> {
        let mut entries: Vec<(SlotId, PlayerInstance)> = self.players.drain().collect();
        entries.sort_by_key(|(s, _)| *s);
        entries
    }
}
