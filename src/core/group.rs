//! Group aggregation for batches submitted together.

use std::collections::HashMap;

use super::router::Delivery;
use super::task::{GroupCallback, GroupId};

/// A batch whose results are delivered together.
struct Group<T, E> {
    /// One write-once slot per member, in submission order.
    slots: Vec<Option<Result<T, E>>>,
    on_complete: GroupCallback<T, E>,
}

/// Live groups of one scheduler, keyed by id.
pub(crate) struct GroupRegistry<T, E> {
    live: HashMap<GroupId, Group<T, E>>,
    next_id: GroupId,
}

impl<T, E> GroupRegistry<T, E> {
    pub(crate) fn new() -> Self {
        Self {
            live: HashMap::new(),
            next_id: 0,
        }
    }

    /// Register a group of `size` unfilled slots and return its id.
    pub(crate) fn open(&mut self, size: usize, on_complete: GroupCallback<T, E>) -> GroupId {
        let group_id = self.next_id;
        self.next_id += 1;
        let slots = std::iter::repeat_with(|| None).take(size).collect();
        self.live.insert(group_id, Group { slots, on_complete });
        group_id
    }

    /// Write `outcome` into a slot. Returns the group delivery when this write
    /// filled the last empty slot; the group is removed at that point.
    pub(crate) fn fill(
        &mut self,
        group_id: GroupId,
        slot: usize,
        outcome: Result<T, E>,
    ) -> Option<Delivery<T, E>> {
        let Some(group) = self.live.get_mut(&group_id) else {
            tracing::warn!(group_id, slot, "result for unknown group dropped");
            return None;
        };
        let Some(entry) = group.slots.get_mut(slot) else {
            tracing::warn!(group_id, slot, "result for out-of-range slot dropped");
            return None;
        };
        if entry.is_some() {
            tracing::warn!(group_id, slot, "slot already filled, keeping first result");
            return None;
        }
        *entry = Some(outcome);

        if group.slots.iter().any(Option::is_none) {
            return None;
        }

        let group = self.live.remove(&group_id)?;
        tracing::debug!(group_id, size = group.slots.len(), "group complete");
        Some(Delivery::Group {
            callback: group.on_complete,
            results: group.slots.into_iter().flatten().collect(),
        })
    }

    /// Drop one live group without notifying it.
    pub(crate) fn abandon(&mut self, group_id: GroupId) {
        self.live.remove(&group_id);
    }

    /// Drop every live group without notifying it.
    pub(crate) fn clear(&mut self) {
        self.live.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.live.len()
    }
}
