//! Admission queue holding submitted work until capacity frees up.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Order in which pending work is admitted.
///
/// Fixed for the lifetime of a qew. Batches are treated as one unit by either
/// discipline: a batch's members always start in submission order, and once
/// its first member is admitted nothing else is admitted until it is drained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionOrder {
    /// Oldest submission first.
    #[default]
    Fifo,
    /// Most recent submission first.
    Lifo,
}

/// One unit of submitted work.
enum Entry<T> {
    Single(T),
    Batch(VecDeque<T>),
}

/// Queue of pending items with O(1) push and pop.
///
/// A batch stays a single entry until its first member is taken. The rest of
/// it then moves to `draining` and is served before any other entry, so a
/// started batch finishes before another submission gets a turn.
pub(crate) struct AdmissionQueue<T> {
    order: AdmissionOrder,
    entries: VecDeque<Entry<T>>,
    draining: Option<VecDeque<T>>,
    len: usize,
}

impl<T> AdmissionQueue<T> {
    pub(crate) const fn new(order: AdmissionOrder) -> Self {
        Self {
            order,
            entries: VecDeque::new(),
            draining: None,
            len: 0,
        }
    }

    pub(crate) fn push(&mut self, item: T) {
        self.entries.push_back(Entry::Single(item));
        self.len += 1;
    }

    /// Enqueue a batch as one unit. Empty batches are ignored.
    pub(crate) fn push_batch(&mut self, items: Vec<T>) {
        if items.is_empty() {
            return;
        }
        self.len += items.len();
        self.entries.push_back(Entry::Batch(items.into()));
    }

    pub(crate) fn pop(&mut self) -> Option<T> {
        let item = match self.pop_draining() {
            Some(item) => item,
            None => {
                let entry = match self.order {
                    AdmissionOrder::Fifo => self.entries.pop_front()?,
                    AdmissionOrder::Lifo => self.entries.pop_back()?,
                };
                match entry {
                    Entry::Single(item) => item,
                    Entry::Batch(mut members) => {
                        let item = members.pop_front()?;
                        if !members.is_empty() {
                            self.draining = Some(members);
                        }
                        item
                    }
                }
            }
        };
        self.len -= 1;
        Some(item)
    }

    /// Next member of a partially admitted batch.
    fn pop_draining(&mut self) -> Option<T> {
        let members = self.draining.as_mut()?;
        let item = members.pop_front();
        if members.is_empty() {
            self.draining = None;
        }
        item
    }

    /// Drop everything still waiting and return how many items were removed.
    pub(crate) fn clear(&mut self) -> usize {
        let removed = self.len;
        self.entries.clear();
        self.draining = None;
        self.len = 0;
        removed
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn order(&self) -> AdmissionOrder {
        self.order
    }
}
