// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed-array element codecs (§4.4). All multi-byte reads/writes use
//! little-endian byte order uniformly - the majority-deployed hardware
//! convention - documented here once rather than re-decided per call
//! site; `DataView` is the type that lets callers pick endianness
//! per-call.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Int8,
    Uint8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float16,
    Float32,
    Float64,
    BigInt64,
    BigUint64,
}

impl ElementKind {
    pub const fn byte_size(self) -> usize {
        match self {
            ElementKind::Int8 | ElementKind::Uint8 | ElementKind::Uint8Clamped => 1,
            ElementKind::Int16 | ElementKind::Uint16 | ElementKind::Float16 => 2,
            ElementKind::Int32 | ElementKind::Uint32 | ElementKind::Float32 => 4,
            ElementKind::Float64 | ElementKind::BigInt64 | ElementKind::BigUint64 => 8,
        }
    }

    pub const fn is_bigint(self) -> bool {
        matches!(self, ElementKind::BigInt64 | ElementKind::BigUint64)
    }
}

fn f16_to_f32(bits: u16) -> f32 {
    let sign = (bits >> 15) & 1;
    let exponent = (bits >> 10) & 0x1F;
    let mantissa = bits & 0x3FF;
    let value = if exponent == 0 {
        (mantissa as f32) * 2f32.powi(-24)
    } else if exponent == 0x1F {
        if mantissa == 0 {
            f32::INFINITY
        } else {
            f32::NAN
        }
    } else {
        (1.0 + mantissa as f32 / 1024.0) * 2f32.powi(exponent as i32 - 15)
    };
    if sign == 1 {
        -value
    } else {
        value
    }
}

fn f32_to_f16(value: f32) -> u16 {
    if value.is_nan() {
        return 0x7E00;
    }
    let sign: u16 = if value.is_sign_negative() { 0x8000 } else { 0 };
    let abs = value.abs();
    if abs.is_infinite() || abs >= 65520.0 {
        return sign | 0x7C00;
    }
    if abs == 0.0 {
        return sign;
    }
    let exponent = abs.log2().floor() as i32;
    let biased = exponent + 15;
    if biased <= 0 {
        // Subnormal or underflow to zero.
        let mantissa = (abs / 2f32.powi(-24)).round() as u16;
        return sign | mantissa;
    }
    if biased >= 0x1F {
        return sign | 0x7C00;
    }
    let mantissa = ((abs / 2f32.powi(exponent) - 1.0) * 1024.0).round() as u16;
    sign | ((biased as u16) << 10) | mantissa
}

/// Reads one element starting at `bytes[offset..]` as an `f64`.
/// ## Panics
/// Panics on `ElementKind::BigInt64`/`BigUint64`; use
/// [`read_bigint_element`] for those.
pub fn read_element(kind: ElementKind, bytes: &[u8], offset: usize) -> f64 {
    let n = kind.byte_size();
    let slice = &bytes[offset..offset + n];
    match kind {
        ElementKind::Int8 => slice[0] as i8 as f64,
        ElementKind::Uint8 | ElementKind::Uint8Clamped => slice[0] as f64,
        ElementKind::Int16 => i16::from_le_bytes(slice.try_into().unwrap()) as f64,
        ElementKind::Uint16 => u16::from_le_bytes(slice.try_into().unwrap()) as f64,
        ElementKind::Int32 => i32::from_le_bytes(slice.try_into().unwrap()) as f64,
        ElementKind::Uint32 => u32::from_le_bytes(slice.try_into().unwrap()) as f64,
        ElementKind::Float16 => f16_to_f32(u16::from_le_bytes(slice.try_into().unwrap())) as f64,
        ElementKind::Float32 => f32::from_le_bytes(slice.try_into().unwrap()) as f64,
        ElementKind::Float64 => f64::from_le_bytes(slice.try_into().unwrap()),
        ElementKind::BigInt64 | ElementKind::BigUint64 => {
            panic!("read_element does not support BigInt element kinds")
        }
    }
}

pub fn read_bigint_element(kind: ElementKind, bytes: &[u8], offset: usize) -> i64 {
    let slice = &bytes[offset..offset + 8];
    match kind {
        ElementKind::BigInt64 => i64::from_le_bytes(slice.try_into().unwrap()),
        ElementKind::BigUint64 => u64::from_le_bytes(slice.try_into().unwrap()) as i64,
        _ => panic!("read_bigint_element only supports BigInt element kinds"),
    }
}

/// Writes `value`, applying the element kind's coercion (two's
/// complement truncation for integer kinds, clamp+round-half-to-even
/// for `Uint8Clamped`, narrowing for the float kinds).
pub fn write_element(kind: ElementKind, bytes: &mut [u8], offset: usize, value: f64) {
    let n = kind.byte_size();
    let slice = &mut bytes[offset..offset + n];
    match kind {
        ElementKind::Int8 => slice[0] = crate::types::number::to_int32(value) as i8 as u8,
        ElementKind::Uint8 => slice[0] = crate::types::number::to_uint32(value) as u8,
        ElementKind::Uint8Clamped => slice[0] = clamp_u8(value),
        ElementKind::Int16 => slice.copy_from_slice(&(crate::types::number::to_int32(value) as i16).to_le_bytes()),
        ElementKind::Uint16 => slice.copy_from_slice(&(crate::types::number::to_uint32(value) as u16).to_le_bytes()),
        ElementKind::Int32 => slice.copy_from_slice(&crate::types::number::to_int32(value).to_le_bytes()),
        ElementKind::Uint32 => slice.copy_from_slice(&crate::types::number::to_uint32(value).to_le_bytes()),
        ElementKind::Float16 => slice.copy_from_slice(&f32_to_f16(value as f32).to_le_bytes()),
        ElementKind::Float32 => slice.copy_from_slice(&(value as f32).to_le_bytes()),
        ElementKind::Float64 => slice.copy_from_slice(&value.to_le_bytes()),
        ElementKind::BigInt64 | ElementKind::BigUint64 => {
            panic!("write_element does not support BigInt element kinds")
        }
    }
}

pub fn write_bigint_element(kind: ElementKind, bytes: &mut [u8], offset: usize, value: i64) {
    let slice = &mut bytes[offset..offset + 8];
    match kind {
        ElementKind::BigInt64 | ElementKind::BigUint64 => slice.copy_from_slice(&value.to_le_bytes()),
        _ => panic!("write_bigint_element only supports BigInt element kinds"),
    }
}

/// ### [23.2.3.23.2 ClampToUint8 ( N )](https://tc39.es/ecma262/#sec-clamptouint8)
fn clamp_u8(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    if value <= 0.0 {
        return 0;
    }
    if value >= 255.0 {
        return 255;
    }
    let floor = value.floor();
    let diff = value - floor;
    if diff < 0.5 {
        floor as u8
    } else if diff > 0.5 {
        floor as u8 + 1
    } else if (floor as u64) % 2 == 0 {
        floor as u8
    } else {
        floor as u8 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_rounds_half_to_even() {
        assert_eq!(clamp_u8(1.5), 2);
        assert_eq!(clamp_u8(2.5), 2);
        assert_eq!(clamp_u8(-1.0), 0);
        assert_eq!(clamp_u8(300.0), 255);
    }

    #[test]
    fn float16_round_trips_common_values() {
        for v in [0.0f32, 1.0, -1.0, 0.5, 65504.0] {
            let bits = f32_to_f16(v);
            let back = f16_to_f32(bits);
            assert!((back - v).abs() < 1.0, "{v} -> {back}");
        }
    }

    #[test]
    fn little_endian_round_trip() {
        let mut bytes = [0u8; 4];
        write_element(ElementKind::Int32, &mut bytes, 0, -5.0);
        assert_eq!(read_element(ElementKind::Int32, &bytes, 0), -5.0);
    }
}
