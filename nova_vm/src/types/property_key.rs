// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::borrow::Cow;

use small_string::SmallString;

use crate::engine::Agent;
use crate::heap::{CreateHeapData, StringIndex, SymbolIndex};
use crate::types::{HeapStringData, Value};

/// A canonicalized object property key: an array-index integer, a
/// string (inline or heap), or a symbol. Numeric strings that parse as
/// a canonical array index (`"0"`, `"41"`, but not `"01"` or `"-0"`)
/// are always normalized to the `Integer` variant so that `obj[0]` and
/// `obj["0"]` land on the same property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKey {
    Integer(u32),
    SmallString(SmallString),
    String(StringIndex),
    Symbol(SymbolIndex),
}

/// A canonical array index is a base-10 integer in `[0, 2^32 - 2]` with
/// no leading zero (unless the whole string is `"0"`) and no sign.
fn parse_canonical_index(s: &str) -> Option<u32> {
    if s == "0" {
        return Some(0);
    }
    if s.is_empty() || s.starts_with('0') || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u64 = s.parse().ok()?;
    if value <= (u32::MAX - 1) as u64 {
        Some(value as u32)
    } else {
        None
    }
}

impl PropertyKey {
    pub fn from_str(agent: &mut Agent, s: &str) -> Self {
        if let Some(index) = parse_canonical_index(s) {
            return PropertyKey::Integer(index);
        }
        match SmallString::from_str(s) {
            Some(small) => PropertyKey::SmallString(small),
            None => PropertyKey::String(agent.heap.create(HeapStringData::from_str(s))),
        }
    }

    pub fn from_symbol(symbol: SymbolIndex) -> Self {
        PropertyKey::Symbol(symbol)
    }

    pub fn is_array_index(&self) -> bool {
        matches!(self, PropertyKey::Integer(_))
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, PropertyKey::Symbol(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(
            self,
            PropertyKey::Integer(_) | PropertyKey::SmallString(_) | PropertyKey::String(_)
        )
    }

    pub fn as_display<'a>(&'a self, agent: &'a Agent) -> Cow<'a, str> {
        match self {
            PropertyKey::Integer(i) => Cow::Owned(i.to_string()),
            PropertyKey::SmallString(s) => Cow::Borrowed(s.as_str()),
            PropertyKey::String(index) => agent.heap.strings[*index].as_wtf8().to_string_lossy(),
            PropertyKey::Symbol(_) => Cow::Borrowed("Symbol()"),
        }
    }

    pub fn equals(&self, agent: &Agent, other: &PropertyKey) -> bool {
        match (self, other) {
            (PropertyKey::Integer(a), PropertyKey::Integer(b)) => a == b,
            (PropertyKey::Symbol(a), PropertyKey::Symbol(b)) => a == b,
            (PropertyKey::Symbol(_), _) | (_, PropertyKey::Symbol(_)) => false,
            (PropertyKey::Integer(_), _) | (_, PropertyKey::Integer(_)) => false,
            _ => self.as_display(agent) == other.as_display(agent),
        }
    }

    pub fn convert_to_value(self, agent: &mut Agent) -> Value {
        match self {
            PropertyKey::Integer(i) => Value::from_str(agent, &i.to_string()),
            PropertyKey::SmallString(s) => Value::String(crate::types::StringValue::Small(s)),
            PropertyKey::String(index) => Value::String(crate::types::StringValue::Heap(index)),
            PropertyKey::Symbol(index) => Value::Symbol(index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_simple_indices() {
        assert_eq!(parse_canonical_index("0"), Some(0));
        assert_eq!(parse_canonical_index("41"), Some(41));
        assert_eq!(parse_canonical_index("01"), None);
        assert_eq!(parse_canonical_index("-1"), None);
        assert_eq!(parse_canonical_index(""), None);
    }
}
