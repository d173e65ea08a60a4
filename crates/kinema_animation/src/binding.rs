//! Write-back targets.
//!
//! An [`AnimationTarget`] names one vector property of one scene node. The
//! playback manager never looks inside it; it only hands sampled components
//! to the write-back callback registered for the animation. The
//! [`TransformTarget`] trait plus [`AnimationTarget::write_back`] build such a
//! callback for any scene representation.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::manager::WriteBack;

/// Opaque identifier of a scene node, as used by the description document.
pub type NodeId = String;

/// Which node property a channel animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPath {
    Translation,
    Rotation,
    Scale,
}

impl TargetPath {
    /// Parses a channel target path literal (`"translation"`, `"rotation"`,
    /// `"scale"`).
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        match path {
            "translation" => Some(Self::Translation),
            "rotation" => Some(Self::Rotation),
            "scale" => Some(Self::Scale),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Translation => "translation",
            Self::Rotation => "rotation",
            Self::Scale => "scale",
        }
    }

    /// Components per value: 4 for rotations, 3 otherwise.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Rotation => 4,
            Self::Translation | Self::Scale => 3,
        }
    }

    #[must_use]
    pub fn target(self, node: impl Into<NodeId>) -> AnimationTarget {
        let node = node.into();
        match self {
            Self::Translation => AnimationTarget::Translation(node),
            Self::Rotation => AnimationTarget::Rotation(node),
            Self::Scale => AnimationTarget::Scale(node),
        }
    }
}

/// A node property that receives sampled values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnimationTarget {
    Translation(NodeId),
    Rotation(NodeId),
    Scale(NodeId),
}

impl AnimationTarget {
    #[must_use]
    pub fn node(&self) -> &str {
        match self {
            Self::Translation(node) | Self::Rotation(node) | Self::Scale(node) => node,
        }
    }

    #[must_use]
    pub fn path(&self) -> TargetPath {
        match self {
            Self::Translation(_) => TargetPath::Translation,
            Self::Rotation(_) => TargetPath::Rotation,
            Self::Scale(_) => TargetPath::Scale,
        }
    }

    #[inline]
    #[must_use]
    pub fn arity(&self) -> usize {
        self.path().arity()
    }

    /// Copies `values` into the named property of `target`.
    ///
    /// Returns `false` and writes nothing when `values` does not have the
    /// property's arity.
    pub fn apply<T: TransformTarget + ?Sized>(&self, values: &[f32], target: &mut T) -> bool {
        match (self, values) {
            (Self::Translation(node), &[x, y, z]) => target.set_translation(node, [x, y, z]),
            (Self::Rotation(node), &[x, y, z, w]) => target.set_rotation(node, [x, y, z, w]),
            (Self::Scale(node), &[x, y, z]) => target.set_scale(node, [x, y, z]),
            _ => return false,
        }
        true
    }

    /// Builds a write-back callback that applies every sampled value to the
    /// shared `target`.
    #[must_use]
    pub fn write_back<T>(&self, target: Arc<Mutex<T>>) -> WriteBack
    where
        T: TransformTarget + Send + 'static,
    {
        let selector = self.clone();
        Box::new(move |_elapsed: f32, values: &[f32]| {
            let mut guard = target.lock();
            if !selector.apply(values, &mut *guard) {
                log::warn!(
                    "Dropped {} value with {} components for node {}",
                    selector.path().as_str(),
                    values.len(),
                    selector.node()
                );
            }
        })
    }
}

/// Mutable access to the transform properties of scene nodes.
///
/// Rotations are `[x, y, z, w]` quaternions.
pub trait TransformTarget {
    fn set_translation(&mut self, node: &str, translation: [f32; 3]);
    fn set_rotation(&mut self, node: &str, rotation: [f32; 4]);
    fn set_scale(&mut self, node: &str, scale: [f32; 3]);
}
