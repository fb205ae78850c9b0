// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::heap::SymbolIndex;
use crate::types::StringValue;

/// A symbol's heap payload: an optional description and whether it was
/// created via `Symbol.for` (and therefore lives in the global symbol
/// registry, keyed by that same description).
#[derive(Debug, Clone)]
pub struct SymbolHeapData {
    pub descriptor: Option<StringValue>,
    /// Set for symbols created via `Symbol.for`, which are interned in
    /// `Agent::global_symbol_registry` and compare by identity like any
    /// other symbol, but are additionally excluded from `WeakMap`/
    /// `WeakRef` targets per the spec (registered symbols are reachable
    /// forever through the registry, so weakly referencing them would
    /// be meaningless).
    pub is_registered: bool,
}

impl SymbolIndex {
    pub fn description<'a>(self, agent: &'a crate::engine::Agent) -> Option<&'a StringValue> {
        agent.heap.symbols[self].descriptor.as_ref()
    }
}
