// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The value universe (§3: Value, PropertyKey, PropertyDescriptor) and
//! the conversion algebra over it (ToNumber, ToPrimitive, SameValue,
//! ...).

mod bigint;
pub(crate) mod conversion;
mod number;
mod property_descriptor;
mod property_key;
mod string;
mod symbol;
mod value;

pub use bigint::BigIntValue;
pub use conversion::PreferredType;
pub use property_descriptor::PropertyDescriptor;
pub use property_key::PropertyKey;
pub use string::{HeapStringData, StringValue};
pub use symbol::SymbolHeapData;
pub use value::Value;
