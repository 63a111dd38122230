use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

/// Bounded registry of live connections.
///
/// A fixed-capacity slot arena keyed by stable indices: freed slots go on a
/// free list and are reused, so removing one connection never moves
/// another's slot. `acquire` waits until a slot frees; the returned guard
/// releases its slot on drop, so no teardown path can leak one.
#[derive(Clone)]
pub struct Registry {
    shared: Arc<Shared>,
}

struct Shared {
    slots: Mutex<Slots>,
    freed: Notify,
    capacity: usize,
}

struct Slots {
    entries: Vec<SlotState>,
    free: Vec<usize>,
    live: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Free,
    /// Reserved ahead of accept; the peer address is not known yet.
    Reserved,
    Connected(SocketAddr),
}

impl Registry {
    pub fn new(capacity: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                slots: Mutex::new(Slots {
                    entries: Vec::new(),
                    free: Vec::new(),
                    live: 0,
                }),
                freed: Notify::new(),
                capacity,
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    pub fn len(&self) -> usize {
        self.shared.slots.lock().unwrap().live
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        let slots = self.shared.slots.lock().unwrap();
        slots
            .entries
            .get(index)
            .is_some_and(|s| *s != SlotState::Free)
    }

    /// Peer addresses of connections that have completed accept.
    pub fn peers(&self) -> Vec<SocketAddr> {
        let slots = self.shared.slots.lock().unwrap();
        slots
            .entries
            .iter()
            .filter_map(|s| match s {
                SlotState::Connected(addr) => Some(*addr),
                _ => None,
            })
            .collect()
    }

    /// Claims a slot if one is free.
    pub fn try_acquire(&self) -> Option<SlotGuard> {
        let mut slots = self.shared.slots.lock().unwrap();

        if slots.live == self.shared.capacity {
            return None;
        }

        let index = match slots.free.pop() {
            Some(index) => {
                slots.entries[index] = SlotState::Reserved;
                index
            }
            None => {
                slots.entries.push(SlotState::Reserved);
                slots.entries.len() - 1
            }
        };
        slots.live += 1;

        Some(SlotGuard {
            shared: Arc::clone(&self.shared),
            index,
        })
    }

    /// Claims a slot, waiting until one frees.
    pub async fn acquire(&self) -> SlotGuard {
        loop {
            let freed = self.shared.freed.notified();

            if let Some(guard) = self.try_acquire() {
                return guard;
            }

            freed.await;
        }
    }
}

/// Occupancy of one registry slot. Dropping the guard releases the slot and
/// wakes one waiting `acquire`.
pub struct SlotGuard {
    shared: Arc<Shared>,
    index: usize,
}

impl SlotGuard {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Records the peer address once accept has completed.
    pub fn set_peer(&self, addr: SocketAddr) {
        let mut slots = self.shared.slots.lock().unwrap();
        slots.entries[self.index] = SlotState::Connected(addr);
    }
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        let mut slots = self.shared.slots.lock().unwrap();
        slots.entries[self.index] = SlotState::Free;
        slots.free.push(self.index);
        slots.live -= 1;
        drop(slots);

        self.shared.freed.notify_one();
    }
}
