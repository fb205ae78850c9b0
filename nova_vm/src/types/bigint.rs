// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

/// Arbitrary-precision integer. Small values that fit an `i64` are kept
/// inline to avoid a heap allocation for the overwhelmingly common case
/// of loop counters and array indices written as `0n`, `1n`, etc.; only
/// values that overflow `i64` fall back to a boxed [`BigInt`].
#[derive(Debug, Clone)]
pub enum BigIntValue {
    Small(i64),
    Heap(Box<BigInt>),
}

impl BigIntValue {
    pub fn from_i64(value: i64) -> Self {
        BigIntValue::Small(value)
    }

    pub fn zero() -> Self {
        BigIntValue::Small(0)
    }

    pub fn to_big_int(&self) -> BigInt {
        match self {
            BigIntValue::Small(v) => BigInt::from(*v),
            BigIntValue::Heap(b) => (**b).clone(),
        }
    }

    pub fn from_big_int(value: BigInt) -> Self {
        match value.to_i64() {
            Some(small) => BigIntValue::Small(small),
            None => BigIntValue::Heap(Box::new(value)),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            BigIntValue::Small(v) => *v == 0,
            BigIntValue::Heap(b) => b.is_zero(),
        }
    }

    /// ### ToBigInt64
    /// Narrows modulo 2^64 and reinterprets as signed, per the
    /// `BigInt.asIntN`/typed-array-store coercion rule.
    pub fn to_big_int64(&self) -> i64 {
        match self {
            BigIntValue::Small(v) => *v,
            BigIntValue::Heap(b) => {
                let (_, bytes) = b.to_bytes_le();
                let mut buf = [0u8; 8];
                let n = bytes.len().min(8);
                buf[..n].copy_from_slice(&bytes[..n]);
                i64::from_le_bytes(buf) * if b.sign() == num_bigint::Sign::Minus { -1 } else { 1 }
            }
        }
    }

    pub fn to_string_radix(&self, radix: u32) -> String {
        self.to_big_int().to_str_radix(radix)
    }
}

impl PartialEq for BigIntValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (BigIntValue::Small(a), BigIntValue::Small(b)) => a == b,
            _ => self.to_big_int() == other.to_big_int(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_round_trips() {
        let v = BigIntValue::from_i64(42);
        assert_eq!(v.to_big_int(), BigInt::from(42));
    }

    #[test]
    fn overflow_promotes_to_heap() {
        let huge = BigInt::parse_bytes(b"123456789012345678901234567890", 10).unwrap();
        let v = BigIntValue::from_big_int(huge.clone());
        assert!(matches!(v, BigIntValue::Heap(_)));
        assert_eq!(v.to_big_int(), huge);
    }
}
