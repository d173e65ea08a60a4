//! Playback Settings
//!
//! ```rust,ignore
//! use kinema_animation::{AnimationManager, PlaybackPolicy, PlaybackSettings};
//!
//! let manager = AnimationManager::new(PlaybackSettings {
//!     policy: PlaybackPolicy::Once,
//!     ..Default::default()
//! });
//! ```

use serde::{Deserialize, Serialize};

use crate::policy::PlaybackPolicy;

/// Configuration of an [`AnimationManager`](crate::AnimationManager).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Behavior outside each animation's key range.
    pub policy: PlaybackPolicy,
    /// Multiplier applied to every `tick` delta. Negative values play
    /// backwards.
    pub time_scale: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            policy: PlaybackPolicy::Loop,
            time_scale: 1.0,
        }
    }
}

impl PlaybackSettings {
    #[must_use]
    pub fn with_policy(policy: PlaybackPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }
}
