//! Typed Accessor View
//!
//! A [`TypedView`] projects a borrowed byte slice through an
//! [`AccessorDescriptor`] into `count` elements of `components_per_element`
//! floats. Nothing is decoded up front: every read converts the addressed
//! bytes on the fly, so a view is cheap to build and can be read any number of
//! times, from any number of threads.
//!
//! # Decoding
//!
//! For element `e` and component `c` the byte address is
//! `offset + e * stride + c * component_size`. Components are stored
//! little-endian. Integers are promoted to `f32`; when the accessor is
//! normalized they are rescaled into `[0, 1]` (unsigned) or `[-1, 1]` (signed).

use crate::accessor::{AccessorDescriptor, ComponentType};
use crate::errors::{OutOfRange, SchemaError};

/// A bounds-checked, random-access float view over accessor bytes.
#[derive(Debug, Clone, Copy)]
pub struct TypedView<'a> {
    bytes: &'a [u8],
    component_type: ComponentType,
    components: usize,
    count: usize,
    offset: usize,
    stride: usize,
    normalized: bool,
}

impl<'a> TypedView<'a> {
    /// Validates `descriptor` against `bytes` and builds the view.
    ///
    /// `bytes` are the bytes of the accessor's buffer view; the descriptor's
    /// byte offset is relative to them.
    pub fn new(descriptor: &AccessorDescriptor, bytes: &'a [u8]) -> Result<Self, SchemaError> {
        Self::with_stride(descriptor, descriptor.byte_stride, bytes)
    }

    /// Same as [`TypedView::new`] but with an explicit stride, `0` meaning
    /// tightly packed.
    pub fn with_stride(
        descriptor: &AccessorDescriptor,
        byte_stride: usize,
        bytes: &'a [u8],
    ) -> Result<Self, SchemaError> {
        let component_type = descriptor.component_type;
        if descriptor.normalized && !component_type.supports_normalization() {
            return Err(SchemaError::UnsupportedNormalization(component_type));
        }

        let element_size = descriptor.element_size();
        let stride = if byte_stride == 0 { element_size } else { byte_stride };
        if stride < element_size {
            return Err(SchemaError::StrideTooSmall {
                stride,
                element_size,
            });
        }

        let offset = descriptor.byte_offset;
        let required = if descriptor.count == 0 {
            offset
        } else {
            (descriptor.count - 1)
                .checked_mul(stride)
                .and_then(|span| span.checked_add(offset))
                .and_then(|start| start.checked_add(element_size))
                .ok_or(SchemaError::RangeOverflow)?
        };
        if required > bytes.len() {
            return Err(SchemaError::OutOfBounds {
                required,
                available: bytes.len(),
            });
        }

        Ok(Self {
            bytes,
            component_type,
            components: descriptor.components_per_element(),
            count: descriptor.count,
            offset,
            stride,
            normalized: descriptor.normalized,
        })
    }

    #[inline]
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.count
    }

    #[inline]
    #[must_use]
    pub fn components_per_element(&self) -> usize {
        self.components
    }

    #[inline]
    #[must_use]
    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    #[inline]
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Reads component `component` of element `element`.
    pub fn get(&self, element: usize, component: usize) -> Result<f32, OutOfRange> {
        if element >= self.count {
            return Err(OutOfRange::Element {
                index: element,
                count: self.count,
            });
        }
        if component >= self.components {
            return Err(OutOfRange::Component {
                index: component,
                count: self.components,
            });
        }
        Ok(self.read(element, component))
    }

    /// Copies the components of `element` into the front of `out`.
    ///
    /// At most `min(out.len(), components_per_element)` values are written.
    pub fn element_into(&self, element: usize, out: &mut [f32]) -> Result<(), OutOfRange> {
        if element >= self.count {
            return Err(OutOfRange::Element {
                index: element,
                count: self.count,
            });
        }
        for (component, slot) in out.iter_mut().take(self.components).enumerate() {
            *slot = self.read(element, component);
        }
        Ok(())
    }

    /// Iterates all elements as fixed-size arrays.
    ///
    /// Returns `None` when `N` differs from the view's components per element.
    #[must_use]
    pub fn elements<const N: usize>(&self) -> Option<impl Iterator<Item = [f32; N]> + 'a> {
        if N != self.components {
            return None;
        }
        let view = *self;
        Some((0..view.count).map(move |element| {
            let mut out = [0.0; N];
            for (component, slot) in out.iter_mut().enumerate() {
                *slot = view.read(element, component);
            }
            out
        }))
    }

    /// Decodes one component. Indices were validated by the caller and the
    /// byte range by the constructor.
    fn read(&self, element: usize, component: usize) -> f32 {
        let at = self.offset + element * self.stride + component * self.component_type.size();
        let bytes = self.bytes;
        match self.component_type {
            ComponentType::Int8 => {
                let v = f32::from(i8::from_le_bytes(read_array(bytes, at)));
                if self.normalized { (v / 127.0).max(-1.0) } else { v }
            }
            ComponentType::Uint8 => {
                let v = f32::from(u8::from_le_bytes(read_array(bytes, at)));
                if self.normalized { v / 255.0 } else { v }
            }
            ComponentType::Int16 => {
                let v = f32::from(i16::from_le_bytes(read_array(bytes, at)));
                if self.normalized { (v / 32767.0).max(-1.0) } else { v }
            }
            ComponentType::Uint16 => {
                let v = f32::from(u16::from_le_bytes(read_array(bytes, at)));
                if self.normalized { v / 65535.0 } else { v }
            }
            ComponentType::Uint32 => u32::from_le_bytes(read_array(bytes, at)) as f32,
            ComponentType::Float32 => f32::from_le_bytes(read_array(bytes, at)),
        }
    }
}

#[inline]
fn read_array<const N: usize>(bytes: &[u8], at: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[at..at + N]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::ElementType;

    fn floats_to_bytes(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn reads_packed_floats() {
        let bytes = floats_to_bytes(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let desc = AccessorDescriptor::new("bv", ComponentType::Float32, ElementType::Vec3, 2);
        let view = TypedView::new(&desc, &bytes).unwrap();

        assert_eq!(view.element_count(), 2);
        assert_eq!(view.get(0, 0), Ok(1.0));
        assert_eq!(view.get(1, 2), Ok(6.0));
    }

    #[test]
    fn honors_offset_and_stride() {
        // Two VEC2 elements with 4 bytes of padding between them, after an 8 byte header.
        let mut bytes = vec![0xAA; 8];
        bytes.extend(floats_to_bytes(&[1.0, 2.0, -99.0, 3.0, 4.0]));
        let desc = AccessorDescriptor::new("bv", ComponentType::Float32, ElementType::Vec2, 2)
            .with_byte_offset(8)
            .with_byte_stride(12);
        let view = TypedView::new(&desc, &bytes).unwrap();

        assert_eq!(view.get(0, 1), Ok(2.0));
        assert_eq!(view.get(1, 0), Ok(3.0));
        assert_eq!(view.get(1, 1), Ok(4.0));
    }

    #[test]
    fn normalized_integers() {
        let bytes = [255u8, 0, 128];
        let desc = AccessorDescriptor::new("bv", ComponentType::Uint8, ElementType::Scalar, 3)
            .with_normalized(true);
        let view = TypedView::new(&desc, &bytes).unwrap();
        assert_eq!(view.get(0, 0), Ok(1.0));
        assert_eq!(view.get(1, 0), Ok(0.0));
        assert!((view.get(2, 0).unwrap() - 128.0 / 255.0).abs() < 1e-6);

        let signed = [(-128i8).to_le_bytes()[0], 127i8.to_le_bytes()[0]];
        let desc = AccessorDescriptor::new("bv", ComponentType::Int8, ElementType::Scalar, 2)
            .with_normalized(true);
        let view = TypedView::new(&desc, &signed).unwrap();
        assert_eq!(view.get(0, 0), Ok(-1.0));
        assert_eq!(view.get(1, 0), Ok(1.0));
    }

    #[test]
    fn integers_without_normalization_are_promoted() {
        let bytes: Vec<u8> = [-300i16, 7].iter().flat_map(|v| v.to_le_bytes()).collect();
        let desc = AccessorDescriptor::new("bv", ComponentType::Int16, ElementType::Vec2, 1);
        let view = TypedView::new(&desc, &bytes).unwrap();
        assert_eq!(view.get(0, 0), Ok(-300.0));
        assert_eq!(view.get(0, 1), Ok(7.0));
    }

    #[test]
    fn out_of_range_indices() {
        let bytes = floats_to_bytes(&[1.0, 2.0]);
        let desc = AccessorDescriptor::new("bv", ComponentType::Float32, ElementType::Scalar, 2);
        let view = TypedView::new(&desc, &bytes).unwrap();

        assert_eq!(view.get(2, 0), Err(OutOfRange::Element { index: 2, count: 2 }));
        assert_eq!(view.get(0, 1), Err(OutOfRange::Component { index: 1, count: 1 }));
    }

    #[test]
    fn bounds_violation_fails_construction() {
        let bytes = floats_to_bytes(&[1.0, 2.0, 3.0]);
        let desc = AccessorDescriptor::new("bv", ComponentType::Float32, ElementType::Vec2, 2);
        assert_eq!(
            TypedView::new(&desc, &bytes).unwrap_err(),
            SchemaError::OutOfBounds {
                required: 16,
                available: 12
            }
        );
    }

    #[test]
    fn stride_smaller_than_element_fails() {
        let bytes = floats_to_bytes(&[0.0; 8]);
        let desc = AccessorDescriptor::new("bv", ComponentType::Float32, ElementType::Vec3, 2)
            .with_byte_stride(8);
        assert_eq!(
            TypedView::new(&desc, &bytes).unwrap_err(),
            SchemaError::StrideTooSmall {
                stride: 8,
                element_size: 12
            }
        );
    }

    #[test]
    fn normalized_float_is_rejected() {
        let bytes = floats_to_bytes(&[0.0]);
        let desc = AccessorDescriptor::new("bv", ComponentType::Float32, ElementType::Scalar, 1)
            .with_normalized(true);
        assert_eq!(
            TypedView::new(&desc, &bytes).unwrap_err(),
            SchemaError::UnsupportedNormalization(ComponentType::Float32)
        );
    }

    #[test]
    fn empty_accessor_is_valid() {
        let desc = AccessorDescriptor::new("bv", ComponentType::Float32, ElementType::Vec4, 0);
        let view = TypedView::new(&desc, &[]).unwrap();
        assert_eq!(view.element_count(), 0);
        assert_eq!(view.elements::<4>().unwrap().count(), 0);
    }

    #[test]
    fn huge_count_overflows_cleanly() {
        let desc =
            AccessorDescriptor::new("bv", ComponentType::Float32, ElementType::Mat4, usize::MAX);
        assert_eq!(
            TypedView::new(&desc, &[0u8; 64]).unwrap_err(),
            SchemaError::RangeOverflow
        );
    }

    #[test]
    fn fixed_arity_iteration() {
        let bytes = floats_to_bytes(&[0.0, 0.0, 0.0, 1.0, 0.5, 0.5, 0.5, 0.5]);
        let desc = AccessorDescriptor::new("bv", ComponentType::Float32, ElementType::Vec4, 2);
        let view = TypedView::new(&desc, &bytes).unwrap();

        assert!(view.elements::<3>().is_none());
        let quats: Vec<[f32; 4]> = view.elements::<4>().unwrap().collect();
        assert_eq!(quats, vec![[0.0, 0.0, 0.0, 1.0], [0.5, 0.5, 0.5, 0.5]]);
    }

    #[test]
    fn element_into_writes_prefix() {
        let bytes = floats_to_bytes(&[1.0, 2.0, 3.0]);
        let desc = AccessorDescriptor::new("bv", ComponentType::Float32, ElementType::Vec3, 1);
        let view = TypedView::new(&desc, &bytes).unwrap();

        let mut out = [0.0; 4];
        view.element_into(0, &mut out).unwrap();
        assert_eq!(out, [1.0, 2.0, 3.0, 0.0]);
        assert!(view.element_into(1, &mut out).is_err());
    }
}
