//! Millisecond countdown driving every periodic event (shot cadence, bullet
//! steps, animation frames, the restart delay).
//!
//! Time is kept as whole milliseconds.  Each tick truncates `dt * 1000` to an
//! integer, so fractions of a millisecond are dropped every frame; at 60 FPS a
//! timer runs about 4% slow.  That drift is accepted.

/// What happens to the accumulated time once the timer fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickEnd {
    /// Start counting from zero again.
    Restart,
    /// Leave the time in place; the timer keeps firing until `reset`.
    Keep,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Accumulator {
    pub ms_to_trigger: u16,
    pub ms_accumulated: u16,
}

impl Accumulator {
    pub const fn new(ms_to_trigger: u16) -> Self {
        Self {
            ms_to_trigger,
            ms_accumulated: 0,
        }
    }

    /// Add `dt` seconds and report whether the threshold is now exceeded.
    ///
    /// Reaching the threshold exactly does not fire; the accumulated time
    /// must be strictly greater.
    pub fn tick(&mut self, dt: f32, when_done: TickEnd) -> bool {
        // `as` saturates: negative or NaN dt adds nothing.
        let add = (dt * 1000.0) as u16;
        self.ms_accumulated = self.ms_accumulated.saturating_add(add);

        if self.ms_accumulated > self.ms_to_trigger {
            if when_done == TickEnd::Restart {
                self.ms_accumulated = 0;
            }
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.ms_accumulated = 0;
    }
}
