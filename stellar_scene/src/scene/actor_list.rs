/// ActorList - insertion-ordered actor storage with stable keys
///
/// Keys come from a `SlotMap` and stay valid until their actor is removed.
/// Actors themselves live in a plain vector so iteration follows insertion
/// order, which both draw order and by-name lookup precedence rely on.

use slotmap::{Key, SlotMap};
use crate::actor::SceneActor;

pub struct ActorList<K: Key, T> {
    /// Key -> position in `entries`
    keys: SlotMap<K, usize>,
    entries: Vec<(K, T)>,
}

impl<K: Key, T: SceneActor> ActorList<K, T> {
    pub fn new() -> Self {
        Self {
            keys: SlotMap::with_key(),
            entries: Vec::new(),
        }
    }

    /// Append an actor, returning its key
    pub fn insert(&mut self, actor: T) -> K {
        let key = self.keys.insert(self.entries.len());
        self.entries.push((key, actor));
        key
    }

    /// Remove an actor, shifting later actors down by one position
    pub fn remove(&mut self, key: K) -> Option<T> {
        let pos = self.keys.remove(key)?;
        let (_, actor) = self.entries.remove(pos);
        for (later, _) in &self.entries[pos..] {
            if let Some(p) = self.keys.get_mut(*later) {
                *p -= 1;
            }
        }
        Some(actor)
    }

    pub fn contains(&self, key: K) -> bool {
        self.keys.contains_key(key)
    }

    pub fn get(&self, key: K) -> Option<&T> {
        let pos = *self.keys.get(key)?;
        self.entries.get(pos).map(|(_, a)| a)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        let pos = *self.keys.get(key)?;
        self.entries.get_mut(pos).map(|(_, a)| a)
    }

    /// Position of `key` in insertion order
    pub fn index_of(&self, key: K) -> Option<usize> {
        self.keys.get(key).copied()
    }

    pub fn key_at(&self, index: usize) -> Option<K> {
        self.entries.get(index).map(|(k, _)| *k)
    }

    pub fn get_at(&self, index: usize) -> Option<&T> {
        self.entries.get(index).map(|(_, a)| a)
    }

    /// First actor named `name`
    pub fn find(&self, name: &str) -> Option<K> {
        self.entries.iter().find(|(_, a)| a.name() == name).map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> {
        self.entries.iter().map(|(k, a)| (*k, a))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (K, &mut T)> {
        self.entries.iter_mut().map(|(k, a)| (*k, a))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, a)| a)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().map(|(_, a)| a)
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every actor, returning them in insertion order
    pub fn drain(&mut self) -> Vec<T> {
        self.keys.clear();
        self.entries.drain(..).map(|(_, a)| a).collect()
    }
}

impl<K: Key, T: SceneActor> Default for ActorList<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "actor_list_tests.rs"]
mod tests;
