//! Body registry: opaque handles over engine bodies
//!
//! Handles are assigned sequentially from 0 and never reused within one world
//! generation. Entries live in a `BTreeMap` so iteration (snapshotting, reset)
//! always runs in handle order, keeping stepping deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::snapshot::Pose;

/// Opaque body identifier, valid until the body is removed or the world resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

/// Back-reference stored on each engine body: who owns it and under which handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyOwner {
    pub entity_id: u64,
    pub handle: BodyHandle,
}

impl BodyOwner {
    /// Top bit marks user data written by this layer (walls carry 0)
    const PART_TAG: u128 = 1 << 127;

    /// Pack into an engine `user_data` word
    pub fn to_user_data(self) -> u128 {
        Self::PART_TAG | ((self.entity_id as u128) << 32) | self.handle.0 as u128
    }

    /// Decode an engine `user_data` word; `None` for bodies that are not parts
    pub fn from_user_data(data: u128) -> Option<Self> {
        if data & Self::PART_TAG == 0 {
            return None;
        }
        Some(Self {
            entity_id: (data >> 32) as u64,
            handle: BodyHandle(data as u32),
        })
    }
}

/// A registry entry: the engine body plus its last pre-step pose
#[derive(Debug, Clone)]
pub struct Tracked<B> {
    pub body: B,
    pub snapshot: Option<Pose>,
}

/// Handle → engine body table
#[derive(Debug, Clone)]
pub struct BodyRegistry<B> {
    entries: BTreeMap<BodyHandle, Tracked<B>>,
    next_handle: u32,
}

impl<B> Default for BodyRegistry<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> BodyRegistry<B> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_handle: 0,
        }
    }

    /// Track a body under a fresh handle
    pub fn insert(&mut self, body: B) -> BodyHandle {
        let handle = self.allocate();
        self.entries.insert(handle, Tracked { body, snapshot: None });
        handle
    }

    /// Reserve the next handle without tracking anything yet.
    ///
    /// Lets the caller stamp the handle into engine user data before the body
    /// exists; pair with [`BodyRegistry::insert_at`].
    pub fn allocate(&mut self) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// Track a body under a handle obtained from [`BodyRegistry::allocate`]
    pub fn insert_at(&mut self, handle: BodyHandle, body: B) {
        debug_assert!(handle.0 < self.next_handle, "handle {handle:?} was never allocated");
        self.entries.insert(handle, Tracked { body, snapshot: None });
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&Tracked<B>> {
        self.entries.get(&handle)
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Tracked<B>> {
        self.entries.get_mut(&handle)
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.entries.contains_key(&handle)
    }

    /// Stop tracking a body, dropping its snapshot
    pub fn remove(&mut self, handle: BodyHandle) -> Option<B> {
        self.entries.remove(&handle).map(|tracked| tracked.body)
    }

    /// Valid handles in ascending order
    pub fn handles(&self) -> Vec<BodyHandle> {
        self.entries.keys().copied().collect()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut Tracked<B>)> {
        self.entries.iter_mut().map(|(h, t)| (*h, t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry and restart handles at 0; returns the bodies in handle order
    pub fn clear(&mut self) -> Vec<B> {
        self.next_handle = 0;
        std::mem::take(&mut self.entries)
            .into_values()
            .map(|tracked| tracked.body)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_handles_are_sequential_from_zero() {
        let mut reg = BodyRegistry::new();
        assert_eq!(reg.insert("a"), BodyHandle(0));
        assert_eq!(reg.insert("b"), BodyHandle(1));
        assert_eq!(reg.insert("c"), BodyHandle(2));
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_handles_never_reused_after_remove() {
        let mut reg = BodyRegistry::new();
        let a = reg.insert(1);
        let b = reg.insert(2);
        assert_eq!(reg.remove(a), Some(1));
        let c = reg.insert(3);
        assert_ne!(c, a);
        assert_ne!(c, b);
        assert_eq!(reg.handles(), vec![b, c]);
    }

    #[test]
    fn test_remove_unknown_is_none() {
        let mut reg: BodyRegistry<u8> = BodyRegistry::new();
        assert_eq!(reg.remove(BodyHandle(42)), None);
        assert!(reg.get(BodyHandle(42)).is_none());
    }

    #[test]
    fn test_remove_drops_snapshot() {
        let mut reg = BodyRegistry::new();
        let h = reg.insert(());
        reg.get_mut(h).unwrap().snapshot = Some(Pose::new(Vec2::ONE, 0.0));
        reg.remove(h);
        assert!(reg.get(h).is_none());
    }

    #[test]
    fn test_clear_restarts_counter() {
        let mut reg = BodyRegistry::new();
        reg.insert('x');
        reg.insert('y');
        assert_eq!(reg.clear(), vec!['x', 'y']);
        assert!(reg.is_empty());
        assert_eq!(reg.insert('z'), BodyHandle(0));
    }

    #[test]
    fn test_allocate_then_insert_at() {
        let mut reg = BodyRegistry::new();
        let h = reg.allocate();
        assert!(!reg.contains(h));
        reg.insert_at(h, 7u32);
        assert_eq!(reg.get(h).map(|t| t.body), Some(7));
        assert!(reg.get(h).unwrap().snapshot.is_none());
    }

    #[test]
    fn test_owner_user_data_roundtrip() {
        let owner = BodyOwner {
            entity_id: 0xDEAD_BEEF_1234,
            handle: BodyHandle(77),
        };
        assert_eq!(BodyOwner::from_user_data(owner.to_user_data()), Some(owner));
        // Walls and foreign bodies carry no tag
        assert_eq!(BodyOwner::from_user_data(0), None);
    }
}
