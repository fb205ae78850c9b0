// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::engine::{Agent, ExceptionType, JsResult};
use crate::heap::{ArrayBufferIndex, CreateHeapData};

/// Sentinel `max_byte_length` meaning "not resizable" (a fixed-length
/// buffer). Mirrors the `usize::MAX`-as-sentinel convention used for
/// `DataView`'s cached byte length (§4.4).
const NOT_RESIZABLE: usize = usize::MAX;

#[derive(Debug, Clone)]
pub struct ArrayBufferHeapData {
    data: Vec<u8>,
    detached: bool,
    max_byte_length: usize,
}

impl ArrayBufferHeapData {
    pub fn new_fixed_length(byte_length: usize) -> Self {
        Self {
            data: vec![0; byte_length],
            detached: false,
            max_byte_length: NOT_RESIZABLE,
        }
    }

    pub fn new_resizable(byte_length: usize, max_byte_length: usize) -> Self {
        let mut data = vec![0; byte_length];
        data.reserve(max_byte_length.saturating_sub(byte_length));
        Self {
            data,
            detached: false,
            max_byte_length,
        }
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn is_resizable(&self) -> bool {
        self.max_byte_length != NOT_RESIZABLE
    }

    pub fn byte_length(&self) -> usize {
        self.data.len()
    }

    pub fn max_byte_length(&self) -> Option<usize> {
        self.is_resizable().then_some(self.max_byte_length)
    }

    pub fn detach(&mut self) {
        self.data.clear();
        self.data.shrink_to_fit();
        self.detached = true;
    }

    /// ## Panics
    /// Panics if the buffer is detached; callers must check
    /// `is_detached` first (this mirrors the internal
    /// `GetArrayBufferMaxByteLengthOption`-adjacent accessors this core
    /// is modeled on, which assert rather than propagate a `TypeError`
    /// for what should already be an impossible state at the call site).
    pub fn bytes(&self) -> &[u8] {
        assert!(!self.detached, "array buffer is detached");
        &self.data
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        assert!(!self.detached, "array buffer is detached");
        &mut self.data
    }

    pub fn resize(&mut self, new_byte_length: usize) -> Result<(), &'static str> {
        if !self.is_resizable() {
            return Err("ArrayBuffer is not resizable");
        }
        if new_byte_length > self.max_byte_length {
            return Err("resize exceeds maxByteLength");
        }
        self.data.resize(new_byte_length, 0);
        Ok(())
    }
}

pub fn create_array_buffer(agent: &mut Agent, byte_length: usize) -> ArrayBufferIndex {
    agent.heap.create(ArrayBufferHeapData::new_fixed_length(byte_length))
}

pub fn create_resizable_array_buffer(
    agent: &mut Agent,
    byte_length: usize,
    max_byte_length: usize,
) -> JsResult<ArrayBufferIndex> {
    if byte_length > max_byte_length {
        return Err(agent.throw_exception(
            ExceptionType::RangeError,
            "byteLength must not exceed maxByteLength",
        ));
    }
    Ok(agent.heap.create(ArrayBufferHeapData::new_resizable(byte_length, max_byte_length)))
}
