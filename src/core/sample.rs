//! Primitive component storage.
//!
//! Every [`ElementType`](crate::core::kind::ElementType) maps to one primitive
//! implementing [`Sample`]. Loads and stores go through `bytemuck`, so buffers
//! need no particular alignment.

use bytemuck::Pod;
use std::mem::size_of;

/// A primitive that pixel components are stored as.
pub trait Sample: Pod {
    /// Widen to `f64`.
    fn to_f64(self) -> f64;

    /// Narrow from `f64`.
    ///
    /// Integer targets truncate toward zero and saturate at their range;
    /// NaN becomes zero. `f32` rounds to nearest.
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_sample {
    ($($t:ty),* $(,)?) => {
        $(
            impl Sample for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_sample!(i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

/// Read one component at `offset` and widen it.
#[inline]
pub fn load<T: Sample>(bytes: &[u8], offset: usize) -> f64 {
    bytemuck::pod_read_unaligned::<T>(&bytes[offset..offset + size_of::<T>()]).to_f64()
}

/// Narrow `value` and write it as one component at `offset`.
#[inline]
pub fn store<T: Sample>(bytes: &mut [u8], offset: usize, value: f64) {
    let sample = T::from_f64(value);
    bytes[offset..offset + size_of::<T>()].copy_from_slice(bytemuck::bytes_of(&sample));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unaligned_roundtrip() {
        let mut bytes = [0u8; 9];
        store::<f64>(&mut bytes, 1, -2.5);
        assert_eq!(load::<f64>(&bytes, 1), -2.5);
        assert_eq!(bytes[0], 0);
    }

    #[test]
    fn test_integer_narrowing() {
        assert_eq!(i16::from_f64(3.9), 3);
        assert_eq!(i16::from_f64(-3.9), -3);
        assert_eq!(u8::from_f64(300.0), 255);
        assert_eq!(u8::from_f64(-1.0), 0);
        assert_eq!(i32::from_f64(f64::NAN), 0);
        assert_eq!(u16::from_f64(f64::INFINITY), u16::MAX);
    }
}
