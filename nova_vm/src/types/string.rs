// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use small_string::SmallString;
use wtf8::Wtf8Buf;

use crate::engine::Agent;
use crate::heap::{CreateHeapData, StringIndex};

/// Heap-backed string storage. JS strings are WTF-8 rather than
/// strict UTF-8: a `String.fromCharCode` pairing can produce a lone
/// surrogate that has no UTF-8 representation, and the engine must
/// still be able to store and index it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeapStringData(Wtf8Buf);

impl HeapStringData {
    pub fn from_str(s: &str) -> Self {
        Self(Wtf8Buf::from_str(s))
    }

    pub fn as_wtf8(&self) -> &wtf8::Wtf8 {
        &self.0
    }

    /// UTF-16 code unit count, the length JS `.length` reports.
    pub fn utf16_len(&self) -> usize {
        self.0.to_ill_formed_utf16().count()
    }
}

/// A JS string value: either inline (fits in 7 bytes, see
/// [`small_string`]) or a handle into the heap's string arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringValue {
    Small(SmallString),
    Heap(StringIndex),
}

impl StringValue {
    pub fn from_str(agent: &mut Agent, s: &str) -> Self {
        match SmallString::from_str(s) {
            Some(small) => StringValue::Small(small),
            None => StringValue::Heap(agent.heap.create(HeapStringData::from_str(s))),
        }
    }

    pub fn as_str<'a>(&'a self, agent: &'a Agent) -> std::borrow::Cow<'a, str> {
        match self {
            StringValue::Small(small) => std::borrow::Cow::Borrowed(small.as_str()),
            StringValue::Heap(index) => {
                std::borrow::Cow::Owned(agent.heap.strings[*index].as_wtf8().to_string_lossy().into_owned())
            }
        }
    }

    pub fn utf16_len(&self, agent: &Agent) -> usize {
        match self {
            StringValue::Small(small) => small.as_str().encode_utf16().count(),
            StringValue::Heap(index) => agent.heap.strings[*index].utf16_len(),
        }
    }

    pub fn is_empty(&self, agent: &Agent) -> bool {
        match self {
            StringValue::Small(small) => small.is_empty(),
            StringValue::Heap(index) => agent.heap.strings[*index].utf16_len() == 0,
        }
    }

    pub fn equals(&self, agent: &Agent, other: &StringValue) -> bool {
        match (self, other) {
            (StringValue::Small(a), StringValue::Small(b)) => a == b,
            _ => self.as_str(agent) == other.as_str(agent),
        }
    }
}
