//! Shared, immutable byte buffers.
//!
//! Buffer bytes are loaded by the caller and handed over as `Arc<[u8]>`. The
//! store never copies or mutates them; typed views borrow straight out of it.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::accessor::{AccessorDescriptor, BufferViewDescriptor};
use crate::errors::SchemaError;
use crate::view::TypedView;

/// Buffer id to bytes.
#[derive(Debug, Clone, Default)]
pub struct BufferStore {
    buffers: FxHashMap<String, Arc<[u8]>>,
}

impl BufferStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the bytes of buffer `id`.
    pub fn insert(&mut self, id: impl Into<String>, bytes: impl Into<Arc<[u8]>>) {
        self.buffers.insert(id.into(), bytes.into());
    }

    #[must_use]
    pub fn with_buffer(mut self, id: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.insert(id, bytes);
        self
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&[u8]> {
        self.buffers.get(id).map(|bytes| &bytes[..])
    }

    /// Returns a new handle to the shared bytes of buffer `id`.
    #[must_use]
    pub fn shared(&self, id: &str) -> Option<Arc<[u8]>> {
        self.buffers.get(id).cloned()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Builds a typed view for `accessor`, following its buffer view into
    /// this store.
    ///
    /// An accessor that leaves its stride at zero inherits the stride of its
    /// buffer view, if that one declares any.
    pub fn view<'a>(
        &'a self,
        accessor: &AccessorDescriptor,
        buffer_views: &FxHashMap<String, BufferViewDescriptor>,
    ) -> Result<TypedView<'a>, SchemaError> {
        let view_id = accessor.buffer_view.as_str();
        let buffer_view = buffer_views
            .get(view_id)
            .ok_or_else(|| SchemaError::UnknownBufferView(view_id.to_string()))?;
        let buffer = self
            .get(&buffer_view.buffer)
            .ok_or_else(|| SchemaError::UnknownBuffer(buffer_view.buffer.clone()))?;
        let bytes = buffer_view.slice(view_id, buffer)?;

        let stride = match (accessor.byte_stride, buffer_view.byte_stride) {
            (0, Some(inherited)) => inherited,
            (own, _) => own,
        };
        TypedView::with_stride(accessor, stride, bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::{ComponentType, ElementType};

    fn store() -> (BufferStore, FxHashMap<String, BufferViewDescriptor>) {
        let bytes: Vec<u8> = [0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let store = BufferStore::new().with_buffer("buf", bytes);
        let mut views = FxHashMap::default();
        views.insert("bv".to_string(), BufferViewDescriptor::new("buf", 8, 16));
        (store, views)
    }

    #[test]
    fn view_reads_through_buffer_view() {
        let (store, views) = store();
        let accessor =
            AccessorDescriptor::new("bv", ComponentType::Float32, ElementType::Scalar, 4);
        let view = store.view(&accessor, &views).unwrap();
        assert_eq!(view.get(0, 0), Ok(2.0));
        assert_eq!(view.get(3, 0), Ok(5.0));
    }

    #[test]
    fn accessor_cannot_escape_its_buffer_view() {
        let (store, views) = store();
        let accessor =
            AccessorDescriptor::new("bv", ComponentType::Float32, ElementType::Scalar, 5);
        assert!(matches!(
            store.view(&accessor, &views),
            Err(SchemaError::OutOfBounds { required: 20, available: 16 })
        ));
    }

    #[test]
    fn inherits_buffer_view_stride() {
        let (store, mut views) = store();
        if let Some(view) = views.get_mut("bv") {
            view.byte_stride = Some(8);
        }
        let accessor =
            AccessorDescriptor::new("bv", ComponentType::Float32, ElementType::Scalar, 2);
        let view = store.view(&accessor, &views).unwrap();
        assert_eq!(view.get(1, 0), Ok(4.0));
    }

    #[test]
    fn missing_references() {
        let (store, mut views) = store();
        let accessor =
            AccessorDescriptor::new("nope", ComponentType::Float32, ElementType::Scalar, 1);
        assert_eq!(
            store.view(&accessor, &views).unwrap_err(),
            SchemaError::UnknownBufferView("nope".to_string())
        );

        views.insert("orphan".to_string(), BufferViewDescriptor::new("gone", 0, 4));
        let accessor =
            AccessorDescriptor::new("orphan", ComponentType::Float32, ElementType::Scalar, 1);
        assert_eq!(
            store.view(&accessor, &views).unwrap_err(),
            SchemaError::UnknownBuffer("gone".to_string())
        );
    }
}
