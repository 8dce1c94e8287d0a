/// VisibilityQueue - per-frame list of actors that survived culling
///
/// Slots are reused across frames: `begin` only resets the live count,
/// `push` overwrites existing slots before appending, and `trim` drops at
/// most one stale trailing slot at the end of a frame.

#[derive(Debug, Clone)]
pub struct VisibilityQueue<K> {
    slots: Vec<K>,
    live: usize,
}

impl<K: Copy> VisibilityQueue<K> {
    pub fn new() -> Self {
        Self { slots: Vec::new(), live: 0 }
    }

    /// Start a new frame
    pub fn begin(&mut self) {
        self.live = 0;
    }

    pub fn push(&mut self, key: K) {
        if self.live < self.slots.len() {
            self.slots[self.live] = key;
        } else {
            self.slots.push(key);
        }
        self.live += 1;
    }

    /// Entries pushed since the last `begin`
    pub fn live(&self) -> &[K] {
        &self.slots[..self.live]
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Allocated slots, live or stale
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Drop one stale trailing slot, if any
    pub fn trim(&mut self) {
        if self.slots.len() > self.live {
            self.slots.pop();
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.live = 0;
    }
}

impl<K: Copy> Default for VisibilityQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "visibility_queue_tests.rs"]
mod tests;
