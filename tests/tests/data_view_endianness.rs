// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `DataView` reads/writes are unaligned and per-call endianness, not
//! tied to the platform's native byte order.

use nova_vm::buffers::create_array_buffer;
use nova_vm::buffers::data_view::{
    create_data_view, get_float64, get_int16, get_uint32, set_float64, set_int16, set_uint32,
};
use nova_vm::engine::{Agent, Options};

#[test]
fn big_and_little_endian_round_trip_independently() {
    let mut agent = Agent::new(Options::default());
    let buffer = create_array_buffer(&mut agent, 16);
    let view = create_data_view(&mut agent, buffer, 0, None).unwrap();

    set_uint32(&mut agent, view, 0, 0x01020304, true).unwrap();
    assert_eq!(get_uint32(&mut agent, view, 0, true).unwrap(), 0x01020304);
    assert_eq!(get_uint32(&mut agent, view, 0, false).unwrap(), 0x04030201);

    set_int16(&mut agent, view, 4, -1, false).unwrap();
    assert_eq!(get_int16(&mut agent, view, 4, false).unwrap(), -1);
    // -1 is all-ones regardless of byte order, so this also round-trips
    // reading it back as little-endian.
    assert_eq!(get_int16(&mut agent, view, 4, true).unwrap(), -1);

    set_float64(&mut agent, view, 8, std::f64::consts::PI, true).unwrap();
    assert_eq!(get_float64(&mut agent, view, 8, true).unwrap(), std::f64::consts::PI);
    assert_ne!(get_float64(&mut agent, view, 8, false).unwrap(), std::f64::consts::PI);
}

#[test]
fn out_of_bounds_access_is_a_range_error() {
    let mut agent = Agent::new(Options::default());
    let buffer = create_array_buffer(&mut agent, 4);
    let view = create_data_view(&mut agent, buffer, 0, None).unwrap();
    assert!(set_uint32(&mut agent, view, 1, 0, true).is_err());
    assert!(get_float64(&mut agent, view, 0, true).is_err());
}

#[test]
fn byte_offset_is_respected() {
    let mut agent = Agent::new(Options::default());
    let buffer = create_array_buffer(&mut agent, 8);
    let view = create_data_view(&mut agent, buffer, 4, None).unwrap();
    set_uint32(&mut agent, view, 0, 0xdeadbeef_u32, true).unwrap();

    let whole_buffer_view = create_data_view(&mut agent, buffer, 0, None).unwrap();
    assert_eq!(get_uint32(&mut agent, whole_buffer_view, 4, true).unwrap(), 0xdeadbeef_u32);
    assert_eq!(get_uint32(&mut agent, whole_buffer_view, 0, true).unwrap(), 0);
}
