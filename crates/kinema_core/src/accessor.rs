//! Accessor and buffer view descriptions.
//!
//! These are the declarative halves of a typed view: they say how a byte range
//! should be interpreted, but hold no bytes themselves. Field names follow the
//! glTF 1.x JSON layout so the descriptors can be deserialized directly.

use std::fmt;

use serde::Deserialize;

use crate::errors::SchemaError;

/// Numeric type of a single accessor component.
///
/// Deserialized from the GL enum codes used by glTF (`5120`..`5126`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "u32")]
pub enum ComponentType {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Uint32,
    Float32,
}

impl ComponentType {
    pub const GL_BYTE: u32 = 5120;
    pub const GL_UNSIGNED_BYTE: u32 = 5121;
    pub const GL_SHORT: u32 = 5122;
    pub const GL_UNSIGNED_SHORT: u32 = 5123;
    pub const GL_UNSIGNED_INT: u32 = 5125;
    pub const GL_FLOAT: u32 = 5126;

    /// Size of one component in bytes.
    #[inline]
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Uint32 | Self::Float32 => 4,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32)
    }

    /// Whether values of this type may be read with the normalized flag.
    #[inline]
    #[must_use]
    pub const fn supports_normalization(self) -> bool {
        matches!(self, Self::Int8 | Self::Uint8 | Self::Int16 | Self::Uint16)
    }

    #[must_use]
    pub const fn gl_code(self) -> u32 {
        match self {
            Self::Int8 => Self::GL_BYTE,
            Self::Uint8 => Self::GL_UNSIGNED_BYTE,
            Self::Int16 => Self::GL_SHORT,
            Self::Uint16 => Self::GL_UNSIGNED_SHORT,
            Self::Uint32 => Self::GL_UNSIGNED_INT,
            Self::Float32 => Self::GL_FLOAT,
        }
    }
}

impl TryFrom<u32> for ComponentType {
    type Error = SchemaError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            Self::GL_BYTE => Ok(Self::Int8),
            Self::GL_UNSIGNED_BYTE => Ok(Self::Uint8),
            Self::GL_SHORT => Ok(Self::Int16),
            Self::GL_UNSIGNED_SHORT => Ok(Self::Uint16),
            Self::GL_UNSIGNED_INT => Ok(Self::Uint32),
            Self::GL_FLOAT => Ok(Self::Float32),
            other => Err(SchemaError::UnsupportedComponentType(other)),
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int8 => "int8",
            Self::Uint8 => "uint8",
            Self::Int16 => "int16",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Float32 => "float32",
        };
        f.write_str(name)
    }
}

/// Shape of one accessor element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ElementType {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl ElementType {
    /// Number of components per element: 1, 2, 3, 4, 4, 9 or 16.
    #[inline]
    #[must_use]
    pub const fn components(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 | Self::Mat2 => 4,
            Self::Mat3 => 9,
            Self::Mat4 => 16,
        }
    }
}

/// Describes how to read `count` elements out of a buffer view.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessorDescriptor {
    /// Id of the buffer view that holds the bytes
    pub buffer_view: String,
    /// Offset of the first element, relative to the buffer view
    #[serde(default)]
    pub byte_offset: usize,
    /// Distance between element starts; `0` means tightly packed
    #[serde(default)]
    pub byte_stride: usize,
    pub component_type: ComponentType,
    pub count: usize,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    #[serde(default)]
    pub normalized: bool,
}

impl AccessorDescriptor {
    /// Creates a tightly packed, non-normalized descriptor at offset zero.
    #[must_use]
    pub fn new(
        buffer_view: impl Into<String>,
        component_type: ComponentType,
        element_type: ElementType,
        count: usize,
    ) -> Self {
        Self {
            buffer_view: buffer_view.into(),
            byte_offset: 0,
            byte_stride: 0,
            component_type,
            count,
            element_type,
            normalized: false,
        }
    }

    #[must_use]
    pub fn with_byte_offset(mut self, byte_offset: usize) -> Self {
        self.byte_offset = byte_offset;
        self
    }

    #[must_use]
    pub fn with_byte_stride(mut self, byte_stride: usize) -> Self {
        self.byte_stride = byte_stride;
        self
    }

    #[must_use]
    pub fn with_normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    #[inline]
    #[must_use]
    pub fn components_per_element(&self) -> usize {
        self.element_type.components()
    }

    /// Size of one tightly packed element in bytes.
    #[inline]
    #[must_use]
    pub fn element_size(&self) -> usize {
        self.component_type.size() * self.components_per_element()
    }

    /// Stride actually used when walking elements.
    #[inline]
    #[must_use]
    pub fn effective_stride(&self) -> usize {
        if self.byte_stride == 0 {
            self.element_size()
        } else {
            self.byte_stride
        }
    }

    #[inline]
    #[must_use]
    pub fn has_float_components(&self) -> bool {
        self.component_type.is_float()
    }
}

/// A contiguous byte range inside one buffer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferViewDescriptor {
    /// Id of the buffer in the [`BufferStore`](crate::buffer::BufferStore)
    pub buffer: String,
    #[serde(default)]
    pub byte_offset: usize,
    /// Length of the view; `None` extends the view to the end of the buffer
    #[serde(default)]
    pub byte_length: Option<usize>,
    /// Element stride used by accessors that leave their own stride at zero
    #[serde(default)]
    pub byte_stride: Option<usize>,
}

impl BufferViewDescriptor {
    #[must_use]
    pub fn new(buffer: impl Into<String>, byte_offset: usize, byte_length: usize) -> Self {
        Self {
            buffer: buffer.into(),
            byte_offset,
            byte_length: Some(byte_length),
            byte_stride: None,
        }
    }

    /// Returns the bytes of this view inside `buffer`.
    ///
    /// `view_id` is only used to name the view in the error.
    pub fn slice<'a>(&self, view_id: &str, buffer: &'a [u8]) -> Result<&'a [u8], SchemaError> {
        let start = self.byte_offset;
        let end = match self.byte_length {
            Some(length) => start.checked_add(length).ok_or(SchemaError::RangeOverflow)?,
            None => buffer.len().max(start),
        };

        buffer
            .get(start..end)
            .ok_or_else(|| SchemaError::BufferViewOutOfBounds {
                view: view_id.to_string(),
                start,
                end,
                available: buffer.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_type_from_gl_code() {
        assert_eq!(ComponentType::try_from(5126), Ok(ComponentType::Float32));
        assert_eq!(ComponentType::try_from(5121), Ok(ComponentType::Uint8));
        assert_eq!(
            ComponentType::try_from(5124),
            Err(SchemaError::UnsupportedComponentType(5124))
        );
    }

    #[test]
    fn accessor_deserializes_gltf_fields() {
        let json = r#"{
            "bufferView": "bv0",
            "byteOffset": 8,
            "componentType": 5123,
            "count": 3,
            "type": "VEC2",
            "normalized": true
        }"#;
        let accessor: AccessorDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(accessor.buffer_view, "bv0");
        assert_eq!(accessor.byte_offset, 8);
        assert_eq!(accessor.byte_stride, 0);
        assert_eq!(accessor.component_type, ComponentType::Uint16);
        assert_eq!(accessor.element_type, ElementType::Vec2);
        assert!(accessor.normalized);
        assert_eq!(accessor.element_size(), 4);
        assert_eq!(accessor.effective_stride(), 4);
    }

    #[test]
    fn unknown_component_type_is_rejected() {
        let json = r#"{ "bufferView": "bv0", "componentType": 5130, "count": 1, "type": "SCALAR" }"#;
        assert!(serde_json::from_str::<AccessorDescriptor>(json).is_err());
    }

    #[test]
    fn matrix_arity() {
        assert_eq!(ElementType::Mat2.components(), 4);
        assert_eq!(ElementType::Mat3.components(), 9);
        assert_eq!(ElementType::Mat4.components(), 16);
    }

    #[test]
    fn buffer_view_slice_bounds() {
        let bytes = [0u8; 16];
        let view = BufferViewDescriptor::new("buf", 4, 8);
        assert_eq!(view.slice("bv", &bytes).unwrap().len(), 8);

        let too_long = BufferViewDescriptor::new("buf", 12, 8);
        assert!(matches!(
            too_long.slice("bv", &bytes),
            Err(SchemaError::BufferViewOutOfBounds { end: 20, available: 16, .. })
        ));

        let open_ended = BufferViewDescriptor {
            byte_length: None,
            ..BufferViewDescriptor::new("buf", 10, 0)
        };
        assert_eq!(open_ended.slice("bv", &bytes).unwrap().len(), 6);
    }
}
