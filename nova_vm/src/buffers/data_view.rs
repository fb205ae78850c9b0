// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `DataView`: an unaligned, per-call-endianness view over an
//! `ArrayBuffer` (§4.4). Grounded directly on the buffer-witness-record
//! pattern used for typed array bounds checks against a possibly
//! resizable/detachable buffer.

use crate::buffers::array_buffer::ArrayBufferHeapData;
use crate::engine::{Agent, ExceptionType, JsResult};
use crate::heap::{ArrayBufferIndex, CreateHeapData, DataViewIndex};

/// Sentinel for "track the buffer's current length" views, same
/// convention as `typed_array::AUTO_LENGTH`.
const AUTO_LENGTH: usize = usize::MAX;

#[derive(Debug, Clone)]
pub struct DataViewHeapData {
    pub buffer: ArrayBufferIndex,
    pub byte_offset: usize,
    byte_length: usize,
}

/// A byte length that is either a concrete value or "auto" (tracks a
/// resizable buffer's current length).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteLength {
    Auto,
    Fixed(usize),
}

impl ByteLength {
    fn from_raw(raw: usize) -> Self {
        if raw == AUTO_LENGTH {
            ByteLength::Auto
        } else {
            ByteLength::Fixed(raw)
        }
    }
}

/// ### [25.3.1.2 GetViewByteLength ( viewRecord )](https://tc39.es/ecma262/#sec-getviewbytelength)
pub fn get_view_byte_length(view: &DataViewHeapData, buffer: &ArrayBufferHeapData) -> usize {
    match ByteLength::from_raw(view.byte_length) {
        ByteLength::Fixed(len) => len,
        ByteLength::Auto => buffer.byte_length().saturating_sub(view.byte_offset),
    }
}

/// ### [25.3.1.1 IsViewOutOfBounds ( viewRecord )](https://tc39.es/ecma262/#sec-isviewoutofbounds)
pub fn is_view_out_of_bounds(view: &DataViewHeapData, buffer: &ArrayBufferHeapData) -> bool {
    if buffer.is_detached() {
        return true;
    }
    if view.byte_offset > buffer.byte_length() {
        return true;
    }
    if let ByteLength::Fixed(len) = ByteLength::from_raw(view.byte_length) {
        if view.byte_offset + len > buffer.byte_length() {
            return true;
        }
    }
    false
}

pub fn create_data_view(
    agent: &mut Agent,
    buffer: ArrayBufferIndex,
    byte_offset: usize,
    byte_length: Option<usize>,
) -> JsResult<DataViewIndex> {
    let buffer_data = &agent.heap.array_buffers[buffer];
    let buffer_byte_length = buffer_data.byte_length();
    if byte_offset > buffer_byte_length {
        return Err(agent.throw_exception(ExceptionType::RangeError, "byteOffset out of range"));
    }
    let byte_length = match byte_length {
        Some(len) => {
            if byte_offset + len > buffer_byte_length {
                return Err(agent.throw_exception(ExceptionType::RangeError, "byteLength out of range"));
            }
            len
        }
        None => {
            if buffer_data.is_resizable() {
                AUTO_LENGTH
            } else {
                buffer_byte_length - byte_offset
            }
        }
    };
    Ok(agent.heap.create(DataViewHeapData {
        buffer,
        byte_offset,
        byte_length,
    }))
}

macro_rules! impl_get {
    ($name:ident, $ty:ty, $size:expr) => {
        pub fn $name(agent: &mut Agent, view: DataViewIndex, byte_offset: usize, little_endian: bool) -> JsResult<$ty> {
            let data = &agent.heap.data_views[view];
            let buffer = &agent.heap.array_buffers[data.buffer];
            if is_view_out_of_bounds(data, buffer) {
                return Err(agent.throw_exception(ExceptionType::TypeError, "DataView out of bounds"));
            }
            let view_len = get_view_byte_length(data, buffer);
            if byte_offset + $size > view_len {
                return Err(agent.throw_exception(ExceptionType::RangeError, "offset is outside the bounds of the DataView"));
            }
            let absolute = data.byte_offset + byte_offset;
            let bytes = &buffer.bytes()[absolute..absolute + $size];
            let array: [u8; $size] = bytes.try_into().unwrap();
            Ok(if little_endian {
                <$ty>::from_le_bytes(array)
            } else {
                <$ty>::from_be_bytes(array)
            })
        }
    };
}

macro_rules! impl_set {
    ($name:ident, $ty:ty, $size:expr) => {
        pub fn $name(
            agent: &mut Agent,
            view: DataViewIndex,
            byte_offset: usize,
            value: $ty,
            little_endian: bool,
        ) -> JsResult<()> {
            let data = agent.heap.data_views[view].clone();
            let buffer = &agent.heap.array_buffers[data.buffer];
            if is_view_out_of_bounds(&data, buffer) {
                return Err(agent.throw_exception(ExceptionType::TypeError, "DataView out of bounds"));
            }
            let view_len = get_view_byte_length(&data, buffer);
            if byte_offset + $size > view_len {
                return Err(agent.throw_exception(ExceptionType::RangeError, "offset is outside the bounds of the DataView"));
            }
            let absolute = data.byte_offset + byte_offset;
            let buffer = &mut agent.heap.array_buffers[data.buffer];
            let bytes = if little_endian {
                value.to_le_bytes()
            } else {
                value.to_be_bytes()
            };
            buffer.bytes_mut()[absolute..absolute + $size].copy_from_slice(&bytes);
            Ok(())
        }
    };
}

impl_get!(get_int8, i8, 1);
impl_get!(get_uint8, u8, 1);
impl_get!(get_int16, i16, 2);
impl_get!(get_uint16, u16, 2);
impl_get!(get_int32, i32, 4);
impl_get!(get_uint32, u32, 4);
impl_get!(get_float32, f32, 4);
impl_get!(get_float64, f64, 8);
impl_get!(get_big_int64, i64, 8);
impl_get!(get_big_uint64, u64, 8);

impl_set!(set_int8, i8, 1);
impl_set!(set_uint8, u8, 1);
impl_set!(set_int16, i16, 2);
impl_set!(set_uint16, u16, 2);
impl_set!(set_int32, i32, 4);
impl_set!(set_uint32, u32, 4);
impl_set!(set_float32, f32, 4);
impl_set!(set_float64, f64, 8);
impl_set!(set_big_int64, i64, 8);
impl_set!(set_big_uint64, u64, 8);

pub fn byte_length(agent: &Agent, view: DataViewIndex) -> usize {
    let data = &agent.heap.data_views[view];
    get_view_byte_length(data, &agent.heap.array_buffers[data.buffer])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffers::array_buffer::create_array_buffer;
    use crate::engine::Options;

    #[test]
    fn reads_back_with_requested_endianness() {
        let mut agent = Agent::new(Options::default());
        let buffer = create_array_buffer(&mut agent, 8);
        let view = create_data_view(&mut agent, buffer, 0, None).unwrap();
        set_uint32(&mut agent, view, 0, 0x01020304, true).unwrap();
        assert_eq!(get_uint32(&mut agent, view, 0, true).unwrap(), 0x01020304);
        assert_eq!(get_uint32(&mut agent, view, 0, false).unwrap(), 0x04030201);
    }

    #[test]
    fn out_of_range_offset_is_a_range_error() {
        let mut agent = Agent::new(Options::default());
        let buffer = create_array_buffer(&mut agent, 4);
        let view = create_data_view(&mut agent, buffer, 0, None).unwrap();
        assert!(get_float64(&mut agent, view, 0, true).is_err());
    }
}
