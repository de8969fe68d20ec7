//! Bounded memo of computed routes.

use rustc_hash::FxHashMap;

use velo_core::NodeId;

use crate::Route;

/// Routes keyed by `(start, end)`, holding at most `capacity` entries.
/// Inserting into a full cache evicts the least recently used entry.
#[derive(Clone, Debug)]
pub struct RouteCache {
    capacity: usize,
    /// Route and the tick of its last use.
    entries:  FxHashMap<(NodeId, NodeId), (Route, u64)>,
    clock:    u64,
}

impl RouteCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            clock: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, start: NodeId, end: NodeId) -> bool {
        self.entries.contains_key(&(start, end))
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// The cached route from `start` to `end`, marking it as recently used.
    pub fn get(&mut self, start: NodeId, end: NodeId) -> Option<Route> {
        let now = self.tick();
        self.entries.get_mut(&(start, end)).map(|(route, used)| {
            *used = now;
            route.clone()
        })
    }

    pub fn insert(&mut self, start: NodeId, end: NodeId, route: Route) {
        if self.capacity == 0 {
            return;
        }
        let key = (start, end);
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            let oldest = self.entries.iter().min_by_key(|(_, (_, used))| *used).map(|(k, _)| *k);
            if let Some(oldest) = oldest {
                self.entries.remove(&oldest);
            }
        }
        let now = self.tick();
        self.entries.insert(key, (route, now));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
