//! Typed pixel accessor.
//!
//! Reads pixels out of, and writes pixels into, byte buffers whose element
//! type is only known at runtime. Reads widen every kind to `f64`; writes
//! narrow from `f64` following the
//! [`Sample`](crate::core::sample::Sample) conversion policy.
//!
//! Source buffers are addressed by linear pixel index (`row * width + col`),
//! destination buffers by byte offset plus pixel stride. Offsets are trusted:
//! callers validate buffer extents before the first access.

use crate::core::kind::{ElementType, NumericKind};
use crate::core::sample::{load, store};
use num_complex::Complex64;

#[inline]
fn read_component(buffer: &[u8], element: ElementType, offset: usize) -> f64 {
    match element {
        ElementType::Int8 => load::<i8>(buffer, offset),
        ElementType::UInt8 => load::<u8>(buffer, offset),
        ElementType::Int16 => load::<i16>(buffer, offset),
        ElementType::UInt16 => load::<u16>(buffer, offset),
        ElementType::Int32 => load::<i32>(buffer, offset),
        ElementType::UInt32 => load::<u32>(buffer, offset),
        ElementType::Int64 => load::<i64>(buffer, offset),
        ElementType::UInt64 => load::<u64>(buffer, offset),
        ElementType::Float32 => load::<f32>(buffer, offset),
        ElementType::Float64 => load::<f64>(buffer, offset),
    }
}

#[inline]
fn write_component(buffer: &mut [u8], element: ElementType, offset: usize, value: f64) {
    match element {
        ElementType::Int8 => store::<i8>(buffer, offset, value),
        ElementType::UInt8 => store::<u8>(buffer, offset, value),
        ElementType::Int16 => store::<i16>(buffer, offset, value),
        ElementType::UInt16 => store::<u16>(buffer, offset, value),
        ElementType::Int32 => store::<i32>(buffer, offset, value),
        ElementType::UInt32 => store::<u32>(buffer, offset, value),
        ElementType::Int64 => store::<i64>(buffer, offset, value),
        ElementType::UInt64 => store::<u64>(buffer, offset, value),
        ElementType::Float32 => store::<f32>(buffer, offset, value),
        ElementType::Float64 => store::<f64>(buffer, offset, value),
    }
}

/// Real component of pixel `index`.
#[inline]
pub fn read_real(buffer: &[u8], kind: NumericKind, index: usize) -> f64 {
    read_component(buffer, kind.element(), index * kind.size())
}

/// Imaginary component of pixel `index`, or `0.0` for real kinds.
#[inline]
pub fn read_imag(buffer: &[u8], kind: NumericKind, index: usize) -> f64 {
    match kind {
        NumericKind::Real(_) => 0.0,
        NumericKind::Complex(element) => {
            read_component(buffer, element, index * kind.size() + kind.imag_offset())
        }
    }
}

/// Pixel `index` as a complex value (zero imaginary part for real kinds).
#[inline]
pub fn read_complex(buffer: &[u8], kind: NumericKind, index: usize) -> Complex64 {
    Complex64::new(read_real(buffer, kind, index), read_imag(buffer, kind, index))
}

/// Write `value` into `count` pixels starting at `offset`, `pixel_stride`
/// bytes apart. Complex destinations receive `(value, 0)`.
pub fn write_real(
    value: f64,
    dest: &mut [u8],
    kind: NumericKind,
    offset: usize,
    pixel_stride: usize,
    count: usize,
) {
    write_complex(value, 0.0, dest, kind, offset, pixel_stride, count);
}

/// Write `(re, im)` into `count` pixels starting at `offset`, `pixel_stride`
/// bytes apart. Real destinations keep only `re`.
pub fn write_complex(
    re: f64,
    im: f64,
    dest: &mut [u8],
    kind: NumericKind,
    offset: usize,
    pixel_stride: usize,
    count: usize,
) {
    let element = kind.element();
    for i in 0..count {
        let at = offset + i * pixel_stride;
        write_component(dest, element, at, re);
        if kind.is_complex() {
            write_component(dest, element, at + kind.imag_offset(), im);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn roundtrip(value: f64, kind: NumericKind) -> f64 {
        let mut buf = vec![0u8; kind.size()];
        write_real(value, &mut buf, kind, 0, kind.size(), 1);
        read_real(&buf, kind, 0)
    }

    /// Fold `raw` (within ±2^53) into a value `element` stores exactly.
    fn representable(element: ElementType, raw: i64) -> f64 {
        match element {
            ElementType::Int8 => raw as i8 as f64,
            ElementType::UInt8 => raw as u8 as f64,
            ElementType::Int16 => raw as i16 as f64,
            ElementType::UInt16 => raw as u16 as f64,
            ElementType::Int32 => raw as i32 as f64,
            ElementType::UInt32 => raw as u32 as f64,
            ElementType::Int64 => raw as f64,
            ElementType::UInt64 => raw.unsigned_abs() as f64,
            ElementType::Float32 => (raw as f64 / 3.0) as f32 as f64,
            ElementType::Float64 => raw as f64 / 3.0,
        }
    }

    #[test]
    fn test_read_real_and_imag() {
        let data: Vec<u8> = [1i16, -2, 3, -4]
            .iter()
            .flat_map(|v| v.to_ne_bytes())
            .collect();

        assert_eq!(read_real(&data, NumericKind::CINT16, 0), 1.0);
        assert_eq!(read_imag(&data, NumericKind::CINT16, 0), -2.0);
        assert_eq!(read_real(&data, NumericKind::CINT16, 1), 3.0);
        assert_eq!(read_imag(&data, NumericKind::CINT16, 1), -4.0);

        assert_eq!(read_real(&data, NumericKind::INT16, 3), -4.0);
        assert_eq!(read_imag(&data, NumericKind::INT16, 3), 0.0);
    }

    #[test]
    fn test_write_broadcast_with_stride() {
        let mut buf = vec![0xAAu8; 12];
        write_real(7.0, &mut buf, NumericKind::UINT16, 2, 4, 3);

        assert_eq!(&buf[0..2], &[0xAA, 0xAA]);
        assert_eq!(read_real(&buf[2..4], NumericKind::UINT16, 0), 7.0);
        assert_eq!(&buf[4..6], &[0xAA, 0xAA]);
        assert_eq!(read_real(&buf[6..8], NumericKind::UINT16, 0), 7.0);
        assert_eq!(&buf[8..10], &[0xAA, 0xAA]);
        assert_eq!(read_real(&buf[10..12], NumericKind::UINT16, 0), 7.0);
    }

    #[test]
    fn test_write_complex_into_real_drops_imag() {
        let mut buf = vec![0u8; 4];
        write_complex(1.5, 9.0, &mut buf, NumericKind::FLOAT32, 0, 4, 1);
        assert_eq!(read_real(&buf, NumericKind::FLOAT32, 0), 1.5);
    }

    #[test]
    fn test_write_real_into_complex_zeroes_imag() {
        let mut buf = vec![0xFFu8; 16];
        write_real(-3.0, &mut buf, NumericKind::CFLOAT64, 0, 16, 1);
        assert_eq!(read_complex(&buf, NumericKind::CFLOAT64, 0), Complex64::new(-3.0, 0.0));
    }

    #[test]
    fn test_integer_destination_truncates_toward_zero() {
        assert_eq!(roundtrip(2.9, NumericKind::INT32), 2.0);
        assert_eq!(roundtrip(-2.9, NumericKind::INT32), -2.0);
        assert_eq!(roundtrip(256.0, NumericKind::BYTE), 255.0);
    }

    proptest! {
        #[test]
        fn prop_int16_roundtrip(v in any::<i16>()) {
            prop_assert_eq!(roundtrip(v as f64, NumericKind::INT16), v as f64);
        }

        #[test]
        fn prop_uint32_roundtrip(v in any::<u32>()) {
            prop_assert_eq!(roundtrip(v as f64, NumericKind::Real(ElementType::UInt32)), v as f64);
        }

        #[test]
        fn prop_int8_roundtrip(v in any::<i8>()) {
            prop_assert_eq!(roundtrip(v as f64, NumericKind::Real(ElementType::Int8)), v as f64);
        }

        #[test]
        fn prop_float64_roundtrip(v in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
            prop_assert_eq!(roundtrip(v, NumericKind::FLOAT64), v);
        }

        #[test]
        fn prop_float32_roundtrip(v in any::<f32>().prop_filter("finite", |v| v.is_finite())) {
            prop_assert_eq!(roundtrip(v as f64, NumericKind::FLOAT32), v as f64);
        }

        #[test]
        fn prop_every_kind_roundtrips(
            re in -(1i64 << 53)..(1i64 << 53),
            im in -(1i64 << 53)..(1i64 << 53),
        ) {
            for kind in NumericKind::all() {
                let expected_re = representable(kind.element(), re);
                let expected_im = if kind.is_complex() { representable(kind.element(), im) } else { 0.0 };

                let mut buf = vec![0u8; kind.size()];
                write_complex(expected_re, expected_im, &mut buf, kind, 0, kind.size(), 1);
                prop_assert_eq!(read_real(&buf, kind, 0), expected_re, "real part of {}", kind);
                prop_assert_eq!(read_imag(&buf, kind, 0), expected_im, "imaginary part of {}", kind);
            }
        }

        #[test]
        fn prop_complex_roundtrip(re in any::<i32>(), im in any::<i32>()) {
            let mut buf = vec![0u8; NumericKind::CINT32.size()];
            write_complex(re as f64, im as f64, &mut buf, NumericKind::CINT32, 0, 8, 1);
            prop_assert_eq!(read_real(&buf, NumericKind::CINT32, 0), re as f64);
            prop_assert_eq!(read_imag(&buf, NumericKind::CINT32, 0), im as f64);
        }
    }
}
