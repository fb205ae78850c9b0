// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::functions::Function;
use crate::heap::ObjectIndex;
use crate::types::{PropertyKey, StringValue, Value};

/// A class constructor. Calling it directly (without `new`) is a
/// `TypeError`; `new`-ing it runs the super chain first (if any), then
/// installs instance field initializers, then runs the constructor
/// body.
#[derive(Debug, Clone)]
pub struct ClassHeapData {
    pub name: Option<StringValue>,
    /// `None` means the implicit default constructor: call the
    /// superclass (if any) with the incoming arguments unchanged, or
    /// do nothing for a base class.
    pub constructor: Option<Function>,
    pub super_class: Option<Function>,
    pub prototype: ObjectIndex,
    /// Precomputed per-instance field initial values, installed on
    /// `this` after the super call and before the constructor body
    /// runs. Real class field initializers are arbitrary expressions;
    /// since this core has no compiler front-end, tests provide the
    /// already-evaluated initial value directly.
    pub instance_fields: Vec<(PropertyKey, Value)>,
}
