// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed arrays: a fixed-shape numeric view over an `ArrayBuffer` (§4.4).

use crate::buffers::array_buffer::ArrayBufferHeapData;
use crate::buffers::element_kind::{read_bigint_element, read_element, write_bigint_element, write_element, ElementKind};
use crate::engine::{Agent, ExceptionType, JsResult};
use crate::heap::{ArrayBufferIndex, CreateHeapData, TypedArrayIndex};
use crate::types::{BigIntValue, Value};

/// `usize::MAX` sentinel for "auto length": the view tracks the
/// buffer's current byte length rather than a length fixed at creation
/// time, mirroring the `ByteLength` convention `DataView` also uses.
pub const AUTO_LENGTH: usize = usize::MAX;

#[derive(Debug, Clone)]
pub struct TypedArrayHeapData {
    pub buffer: ArrayBufferIndex,
    pub byte_offset: usize,
    /// `AUTO_LENGTH` when this view auto-tracks a resizable buffer's
    /// length; otherwise the element count fixed at construction.
    byte_length: usize,
    pub element_kind: ElementKind,
}

impl TypedArrayHeapData {
    pub fn is_length_tracking(&self) -> bool {
        self.byte_length == AUTO_LENGTH
    }

    /// ### [10.4.5.11 TypedArrayByteLength ( taRecord )](https://tc39.es/ecma262/#sec-typedarraybytelength)
    pub fn byte_length(&self, buffer: &ArrayBufferHeapData) -> usize {
        if self.is_length_tracking() {
            buffer.byte_length().saturating_sub(self.byte_offset)
        } else {
            self.byte_length
        }
    }

    pub fn len(&self, buffer: &ArrayBufferHeapData) -> usize {
        self.byte_length(buffer) / self.element_kind.byte_size()
    }

    /// ### [10.4.5.12 IsTypedArrayOutOfBounds ( taRecord )](https://tc39.es/ecma262/#sec-istypedarrayoutofbounds)
    pub fn is_out_of_bounds(&self, buffer: &ArrayBufferHeapData) -> bool {
        if buffer.is_detached() {
            return true;
        }
        if self.byte_offset > buffer.byte_length() {
            return true;
        }
        if !self.is_length_tracking() && self.byte_offset + self.byte_length > buffer.byte_length() {
            return true;
        }
        false
    }
}

fn buffer_of(agent: &Agent, typed_array: TypedArrayIndex) -> &ArrayBufferHeapData {
    let buffer = agent.heap.typed_arrays[typed_array].buffer;
    &agent.heap.array_buffers[buffer]
}

pub fn typed_array_length(agent: &Agent, typed_array: TypedArrayIndex) -> usize {
    let data = &agent.heap.typed_arrays[typed_array];
    data.len(buffer_of(agent, typed_array))
}

pub fn typed_array_get(agent: &Agent, typed_array: TypedArrayIndex, index: usize) -> Option<Value> {
    let data = &agent.heap.typed_arrays[typed_array];
    let buffer = buffer_of(agent, typed_array);
    if data.is_out_of_bounds(buffer) || index >= data.len(buffer) {
        return None;
    }
    let offset = data.byte_offset + index * data.element_kind.byte_size();
    let bytes = buffer.bytes();
    Some(if data.element_kind.is_bigint() {
        Value::BigInt(BigIntValue::from_i64(read_bigint_element(data.element_kind, bytes, offset)))
    } else {
        Value::Number(read_element(data.element_kind, bytes, offset))
    })
}

/// ### [10.4.5.16 IntegerIndexedElementSet ( O, index, value )](https://tc39.es/ecma262/#sec-integerindexedelementset)
/// Silently ignores out-of-range writes, matching non-strict-mode typed
/// array assignment rather than throwing.
pub fn typed_array_set(agent: &mut Agent, typed_array: TypedArrayIndex, index: usize, value: Value) -> JsResult<()> {
    let data = agent.heap.typed_arrays[typed_array].clone();
    let buffer_index = data.buffer;
    if data.element_kind.is_bigint() {
        let big = crate::types::conversion::to_big_int(agent, value)?;
        let buffer = &mut agent.heap.array_buffers[buffer_index];
        if data.is_out_of_bounds(buffer) || index >= data.len(buffer) {
            return Ok(());
        }
        let offset = data.byte_offset + index * data.element_kind.byte_size();
        write_bigint_element(data.element_kind, buffer.bytes_mut(), offset, big.to_big_int64());
    } else {
        let number = crate::types::conversion::to_number(agent, value)?;
        let buffer = &mut agent.heap.array_buffers[buffer_index];
        if data.is_out_of_bounds(buffer) || index >= data.len(buffer) {
            return Ok(());
        }
        let offset = data.byte_offset + index * data.element_kind.byte_size();
        write_element(data.element_kind, buffer.bytes_mut(), offset, number);
    }
    Ok(())
}

/// Constructor dispatch matching the five forms typed array
/// constructors accept: a numeric length, a `(buffer, offset, length)`
/// view, a copy from another typed array, a copy from an array-like,
/// or a copy from a sync iterable. Iterable/array-like sourcing defers
/// to the caller, which already has the executor's iteration helpers
/// in scope; this function covers the first three, buffer-local forms.
pub fn create_typed_array_from_length(
    agent: &mut Agent,
    element_kind: ElementKind,
    length: usize,
) -> TypedArrayIndex {
    let byte_length = length * element_kind.byte_size();
    let buffer = agent.heap.create(ArrayBufferHeapData::new_fixed_length(byte_length));
    agent.heap.create(TypedArrayHeapData {
        buffer,
        byte_offset: 0,
        byte_length,
        element_kind,
    })
}

pub fn create_typed_array_from_buffer(
    agent: &mut Agent,
    element_kind: ElementKind,
    buffer: ArrayBufferIndex,
    byte_offset: usize,
    length: Option<usize>,
) -> JsResult<TypedArrayIndex> {
    let element_size = element_kind.byte_size();
    if byte_offset % element_size != 0 {
        return Err(agent.throw_exception(
            ExceptionType::RangeError,
            "byteOffset must be a multiple of the element size",
        ));
    }
    let buffer_data = &agent.heap.array_buffers[buffer];
    let buffer_byte_length = buffer_data.byte_length();
    if byte_offset > buffer_byte_length {
        return Err(agent.throw_exception(ExceptionType::RangeError, "byteOffset out of range"));
    }
    let byte_length = match length {
        Some(len) => {
            let byte_length = len * element_size;
            if byte_offset + byte_length > buffer_byte_length {
                return Err(agent.throw_exception(ExceptionType::RangeError, "length out of range"));
            }
            byte_length
        }
        None => {
            if !buffer_data.is_resizable() {
                buffer_byte_length - byte_offset
            } else {
                AUTO_LENGTH
            }
        }
    };
    Ok(agent.heap.create(TypedArrayHeapData {
        buffer,
        byte_offset,
        byte_length,
        element_kind,
    }))
}

pub fn create_typed_array_from_typed_array(
    agent: &mut Agent,
    element_kind: ElementKind,
    source: TypedArrayIndex,
) -> TypedArrayIndex {
    let len = typed_array_length(agent, source);
    let result = create_typed_array_from_length(agent, element_kind, len);
    for i in 0..len {
        if let Some(value) = typed_array_get(agent, source, i) {
            let _ = typed_array_set(agent, result, i, value);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Options;

    #[test]
    fn round_trips_through_int32_view() {
        let mut agent = Agent::new(Options::default());
        let ta = create_typed_array_from_length(&mut agent, ElementKind::Int32, 4);
        typed_array_set(&mut agent, ta, 1, Value::Number(-7.0)).unwrap();
        assert_eq!(typed_array_get(&agent, ta, 1), Some(Value::Number(-7.0)));
        assert_eq!(typed_array_get(&agent, ta, 10), None);
    }
}
