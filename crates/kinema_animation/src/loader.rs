use std::sync::Arc;

use kinema_core::BufferStore;
use parking_lot::Mutex;

use crate::binding::TransformTarget;
use crate::diagnostics::SkipDiagnostic;
use crate::document::Document;
use crate::manager::{AnimationManager, WriteBack};
use crate::resolve::resolve_document;
use crate::settings::PlaybackSettings;
use crate::unit::AnimationUnit;

/// Resolves every animation in `document` and registers the resulting units
/// with a new manager, in animation id then channel order.
///
/// `write_back` is called once per unit to build its callback. Skipped
/// channels are logged as warnings and returned.
pub fn create_animation_manager<F>(
    document: &Document,
    buffers: &BufferStore,
    settings: PlaybackSettings,
    mut write_back: F,
) -> (AnimationManager, Vec<SkipDiagnostic>)
where
    F: FnMut(&AnimationUnit) -> WriteBack,
{
    let resolution = resolve_document(document, buffers);
    for diagnostic in &resolution.skipped {
        log::warn!("Skipped channel: {diagnostic}");
    }
    log::debug!(
        "Resolved {} animation channels ({} skipped) from {} animations",
        resolution.units.len(),
        resolution.skipped.len(),
        document.animations.len()
    );

    let mut manager = AnimationManager::new(settings);
    manager.add_animations(resolution.units.into_iter().map(|unit| {
        let callback = write_back(&unit);
        (unit, callback)
    }));
    (manager, resolution.skipped)
}

/// Like [`create_animation_manager`], writing every unit into one shared
/// [`TransformTarget`].
pub fn create_transform_manager<T>(
    document: &Document,
    buffers: &BufferStore,
    settings: PlaybackSettings,
    target: &Arc<Mutex<T>>,
) -> (AnimationManager, Vec<SkipDiagnostic>)
where
    T: TransformTarget + Send + 'static,
{
    create_animation_manager(document, buffers, settings, |unit| {
        unit.target().write_back(Arc::clone(target))
    })
}
