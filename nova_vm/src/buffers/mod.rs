// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binary data: `ArrayBuffer`, typed arrays, and `DataView` (§4.4).
//! Gated behind the `array-buffer` feature; `weak-refs`/`set` do not
//! depend on this module, so embedders that only need the value/object
//! model can drop it entirely.

pub mod array_buffer;
pub mod data_view;
pub mod element_kind;
pub mod typed_array;

pub use array_buffer::{create_array_buffer, create_resizable_array_buffer, ArrayBufferHeapData};
pub use data_view::{create_data_view, ByteLength, DataViewHeapData};
pub use element_kind::ElementKind;
pub use typed_array::{create_typed_array_from_buffer, create_typed_array_from_length, TypedArrayHeapData};
