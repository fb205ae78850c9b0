// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-object property storage. Each object owns exactly one `Shape`;
//! shapes are never shared between objects in this core (unlike the
//! tree-shared "hidden class" schemes some production engines use -
//! see `DESIGN.md` for why that optimization was left out).

use crate::engine::Agent;
use crate::types::PropertyKey;
use crate::types::PropertyDescriptor;

const COMPACTION_TOMBSTONE_THRESHOLD: usize = 8;

#[derive(Debug, Clone)]
enum Slot {
    Live(PropertyKey, PropertyDescriptor),
    Tombstone,
}

/// Ordered `(key, descriptor)` storage with tombstones for deleted
/// entries, compacted once deletions pile up.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    slots: Vec<Slot>,
    deleted_count: usize,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property_count(&self) -> usize {
        self.slots.len()
    }

    pub fn deleted_count(&self) -> usize {
        self.deleted_count
    }

    fn find(&self, agent: &Agent, key: &PropertyKey) -> Option<usize> {
        self.slots.iter().position(|slot| match slot {
            Slot::Live(k, _) => k.equals(agent, key),
            Slot::Tombstone => false,
        })
    }

    pub fn get(&self, agent: &Agent, key: &PropertyKey) -> Option<&PropertyDescriptor> {
        self.find(agent, key).map(|i| match &self.slots[i] {
            Slot::Live(_, desc) => desc,
            Slot::Tombstone => unreachable!(),
        })
    }

    pub fn get_mut(&mut self, agent: &Agent, key: &PropertyKey) -> Option<&mut PropertyDescriptor> {
        let i = self.find(agent, key)?;
        match &mut self.slots[i] {
            Slot::Live(_, desc) => Some(desc),
            Slot::Tombstone => unreachable!(),
        }
    }

    /// Inserts a new property, or overwrites an existing one's
    /// descriptor entirely. Callers needing ECMA merge semantics should
    /// go through `Object::define_own_property` instead.
    pub fn insert(&mut self, agent: &Agent, key: PropertyKey, descriptor: PropertyDescriptor) {
        if let Some(i) = self.find(agent, &key) {
            self.slots[i] = Slot::Live(key, descriptor);
        } else {
            self.slots.push(Slot::Live(key, descriptor));
        }
    }

    /// Marks the entry tombstoned. Returns `false` if the key was not
    /// present (a no-op deletion is not itself an error).
    pub fn delete(&mut self, agent: &Agent, key: &PropertyKey) -> bool {
        let Some(i) = self.find(agent, key) else {
            return true;
        };
        self.slots[i] = Slot::Tombstone;
        self.deleted_count += 1;
        if self.should_compact() {
            self.compact();
        }
        true
    }

    fn should_compact(&self) -> bool {
        self.deleted_count >= COMPACTION_TOMBSTONE_THRESHOLD
            && self.deleted_count * 2 >= self.slots.len()
    }

    /// Drops tombstones, preserving the relative order of live entries.
    pub fn compact(&mut self) {
        self.slots.retain(|slot| !matches!(slot, Slot::Tombstone));
        self.deleted_count = 0;
    }

    /// Own keys in insertion order, live entries only. Per
    /// `OrdinaryOwnPropertyKeys`, integer-index keys must sort
    /// numerically ahead of everything else; callers that need full
    /// ECMA ordering should partition + sort the `Integer` keys
    /// themselves (`Object::own_property_keys` does this).
    pub fn keys(&self) -> impl Iterator<Item = &PropertyKey> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Live(k, _) => Some(k),
            Slot::Tombstone => None,
        })
    }

    pub fn entries(&self) -> impl Iterator<Item = (&PropertyKey, &PropertyDescriptor)> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Live(k, d) => Some((k, d)),
            Slot::Tombstone => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Agent;

    #[test]
    fn compacts_after_enough_tombstones() {
        let mut agent = Agent::new(Default::default());
        let mut shape = Shape::new();
        let mut keys = Vec::new();
        for i in 0..20 {
            let key = PropertyKey::from_str(&mut agent, &format!("k{i}"));
            shape.insert(&agent, key, PropertyDescriptor::new_data_descriptor(crate::types::Value::Undefined));
            keys.push(key);
        }
        assert_eq!(shape.property_count(), 20);
        for key in keys.iter().take(10) {
            shape.delete(&agent, key);
        }
        // 10 >= 8 and 10*2 >= (20 before compaction), so compaction should
        // have already fired and deleted_count reset to 0.
        assert_eq!(shape.deleted_count(), 0);
        assert_eq!(shape.property_count(), 10);
    }
}
