use std::time::Duration;

use gravewatch_core::{AssetKey, Direction};

use crate::{AnimationError, AnimationResolver, FrameDescriptor};

/// Cursor over one running instance of an animation.
///
/// Accumulates elapsed time between rendered frames and surfaces the bound
/// sound cue on the first observed frame, even when that frame is sampled
/// after the animation already advanced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationPlayback {
    key: AssetKey,
    direction: Option<Direction>,
    elapsed: Duration,
    cue_pending: bool,
}

impl AnimationPlayback {
    /// Starts a playback at time zero.
    #[must_use]
    pub const fn new(key: AssetKey, direction: Option<Direction>) -> Self {
        Self {
            key,
            direction,
            elapsed: Duration::ZERO,
            cue_pending: true,
        }
    }

    /// Advances the cursor.
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Changes the facing used for directional sequences.
    pub fn face(&mut self, direction: Direction) {
        self.direction = Some(direction);
    }

    /// Rewinds to time zero and re-arms the sound cue.
    pub fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
        self.cue_pending = true;
    }

    /// Resolves the current frame, consuming the pending sound cue.
    pub fn frame<'r>(
        &mut self,
        resolver: &AnimationResolver<'r>,
    ) -> Result<FrameDescriptor<'r>, AnimationError> {
        let mut descriptor = resolver.frame_at(self.key, self.elapsed, self.direction)?;
        descriptor.sound = if self.cue_pending {
            resolver.cue(self.key)?
        } else {
            None
        };
        self.cue_pending = false;
        Ok(descriptor)
    }

    /// Animated asset.
    #[must_use]
    pub const fn key(&self) -> AssetKey {
        self.key
    }

    /// Time since the playback started.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
