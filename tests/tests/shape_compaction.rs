// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Exercises shape compaction from the outside: `Shape` itself is
//! crate-private, but `Object::define_own_property`/`delete` drive it
//! the same way a property-heavy object literal would.

use nova_vm::engine::{Agent, Options};
use nova_vm::object::{ordinary_object_create, Object};
use nova_vm::types::{PropertyDescriptor, PropertyKey, Value};

#[test]
fn deleted_properties_stay_gone_and_survivors_stay_correct_after_compaction() {
    let mut agent = Agent::new(Options::default());
    let object = Object::from(ordinary_object_create(&mut agent, None));

    let keys: Vec<PropertyKey> = (0..40)
        .map(|i| PropertyKey::from_str(&mut agent, &format!("key{i}")))
        .collect();
    for (i, key) in keys.iter().enumerate() {
        let value = Value::Number(i as f64);
        object
            .define_own_property(&mut agent, *key, PropertyDescriptor::new_data_descriptor(value))
            .unwrap();
    }

    // Delete every other property. This piles up well past the
    // tombstone-compaction threshold, forcing at least one compaction
    // pass while the object is still in use.
    let (deleted, kept): (Vec<_>, Vec<_>) = keys.iter().enumerate().partition(|(i, _)| i % 2 == 0);
    for (_, key) in &deleted {
        assert!(object.delete(&mut agent, **key).unwrap());
    }

    assert_eq!(object.own_property_keys(&agent).len(), kept.len());

    for (i, key) in &kept {
        let value = object.get(&mut agent, *key, Value::Object(object.0)).unwrap();
        assert_eq!(value, Value::Number(*i as f64));
    }
    for (_, key) in &deleted {
        let value = object.get(&mut agent, **key, Value::Object(object.0)).unwrap();
        assert_eq!(value, Value::Undefined);
    }

    // Re-adding a previously deleted key works after compaction.
    let revived_key = keys[0];
    object
        .define_own_property(&mut agent, revived_key, PropertyDescriptor::new_data_descriptor(Value::Number(999.0)))
        .unwrap();
    assert_eq!(
        object.get(&mut agent, revived_key, Value::Object(object.0)).unwrap(),
        Value::Number(999.0)
    );
}
