use serde::{Deserialize, Serialize};

/// What happens to query times outside an animation's key range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlaybackPolicy {
    /// Freeze at the boundary keys. The manager's clock stops at the end of
    /// the longest animation.
    Once,
    /// Wrap around the key range.
    #[default]
    Loop,
    /// Freeze at the boundary keys while the manager's clock keeps running.
    ClampToLast,
}

impl PlaybackPolicy {
    /// Maps `time` into `[start, end]`.
    ///
    /// Looping wraps `time - start` modulo the span and offsets the result by
    /// `start`, so times already inside the range are unchanged. A zero span
    /// collapses to `start`.
    #[must_use]
    pub fn map_time(self, time: f32, start: f32, end: f32) -> f32 {
        self.map_clock(f64::from(time), start, end)
    }

    /// Same as [`map_time`](Self::map_time) for a double-precision clock.
    ///
    /// The wrap happens before narrowing, so a clock hours into a session
    /// still lands on the right key time.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn map_clock(self, clock: f64, start: f32, end: f32) -> f32 {
        let (lo, hi) = (f64::from(start), f64::from(end));
        match self {
            Self::Once | Self::ClampToLast => clock.max(lo).min(hi) as f32,
            Self::Loop => {
                let span = hi - lo;
                if span > 0.0 {
                    (lo + (clock - lo).rem_euclid(span)) as f32
                } else {
                    start
                }
            }
        }
    }
}
