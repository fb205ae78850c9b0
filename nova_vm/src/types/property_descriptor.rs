// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::functions::Function;
use crate::types::Value;

/// Either a data descriptor (`value`/`writable`) or an accessor
/// descriptor (`get`/`set`); never both populated at once by any
/// constructor here, though the raw struct doesn't forbid it - callers
/// going through `Object::define_own_property` get that guarantee.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyDescriptor {
    pub value: Option<Value>,
    pub writable: Option<bool>,
    pub get: Option<Function>,
    pub set: Option<Function>,
    pub enumerable: Option<bool>,
    pub configurable: Option<bool>,
}

impl PropertyDescriptor {
    pub fn new_data_descriptor(value: Value) -> Self {
        Self {
            value: Some(value),
            writable: Some(true),
            enumerable: Some(true),
            configurable: Some(true),
            ..Default::default()
        }
    }

    pub fn new_accessor_descriptor(get: Option<Function>, set: Option<Function>) -> Self {
        Self {
            get,
            set,
            enumerable: Some(true),
            configurable: Some(true),
            ..Default::default()
        }
    }

    pub fn is_data_descriptor(&self) -> bool {
        self.value.is_some() || self.writable.is_some()
    }

    pub fn is_accessor_descriptor(&self) -> bool {
        self.get.is_some() || self.set.is_some()
    }

    pub fn is_generic_descriptor(&self) -> bool {
        !self.is_data_descriptor() && !self.is_accessor_descriptor()
    }

    /// Fills in the ECMA defaults (`false`/`undefined`) for any
    /// attribute left unset, as `OrdinaryDefineOwnProperty` does when
    /// installing a brand-new own property.
    pub fn complete(mut self) -> Self {
        if self.is_accessor_descriptor() {
            self.get = self.get.or(None);
            self.set = self.set.or(None);
        } else {
            self.value = Some(self.value.unwrap_or(Value::Undefined));
            self.writable = Some(self.writable.unwrap_or(false));
        }
        self.enumerable = Some(self.enumerable.unwrap_or(false));
        self.configurable = Some(self.configurable.unwrap_or(false));
        self
    }

    /// Merges `incoming` onto `self` (the existing descriptor), keeping
    /// any attribute `incoming` left unset. Used by
    /// `OrdinaryDefineOwnProperty`'s "fields not absent ... remain
    /// unchanged" rule.
    pub fn merge(&self, incoming: &PropertyDescriptor) -> PropertyDescriptor {
        PropertyDescriptor {
            value: incoming.value.clone().or_else(|| self.value.clone()),
            writable: incoming.writable.or(self.writable),
            get: incoming.get.or(self.get),
            set: incoming.set.or(self.set),
            enumerable: incoming.enumerable.or(self.enumerable),
            configurable: incoming.configurable.or(self.configurable),
        }
    }
}
