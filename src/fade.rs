//! Linear fade planning.
//!
//! [`FadeSteps`] yields the colors of a fade one step at a time. The blocking
//! [`LedDriver::fade_to`](crate::LedDriver::fade_to) and the polled
//! [`LedDriver::start_fade`](crate::LedDriver::start_fade) both walk the same
//! plan, so they show identical colors.
//!
//! The per-step delta is kept multiplied by 100 to preserve two decimal
//! digits in integer arithmetic.

use crate::types::Rgb8;
use palette::Srgb;

/// Iterator over the colors of a linear fade.
///
/// Step `i` counts down from `steps - 1` to `0` and shows
/// `target - (i * delta) / 100`, so the last color is exactly the target.
#[derive(Debug, Clone)]
pub struct FadeSteps {
    target: [i64; 3],
    scaled_delta: [i64; 3],
    remaining: u32,
    interval_ms: u32,
}

impl FadeSteps {
    /// Plans a fade from `from` to `to` in `steps` updates over `duration_ms`.
    ///
    /// # Panics
    /// Panics if `steps` is zero.
    pub fn new(from: Rgb8, to: Rgb8, steps: u32, duration_ms: u32) -> Self {
        assert!(steps > 0, "fade needs at least one step");

        let target = channels(to);
        let current = channels(from);
        let divisor = i64::from(steps);

        let mut scaled_delta = [0i64; 3];
        for (delta, (t, c)) in scaled_delta.iter_mut().zip(target.iter().zip(current.iter())) {
            *delta = (t - c) * 100 / divisor;
        }

        Self {
            target,
            scaled_delta,
            remaining: steps,
            interval_ms: duration_ms / steps,
        }
    }

    /// Time to hold each step, `duration / steps`.
    #[inline]
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Number of steps not yet yielded.
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    fn color_at(&self, distance: u32) -> Rgb8 {
        let distance = i64::from(distance);
        let channel = |idx: usize| {
            let value = self.target[idx] - (distance * self.scaled_delta[idx]) / 100;
            value.clamp(0, i64::from(u8::MAX)) as u8
        };
        Srgb::new(channel(0), channel(1), channel(2))
    }
}

impl Iterator for FadeSteps {
    type Item = Rgb8;

    fn next(&mut self) -> Option<Rgb8> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.color_at(self.remaining))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FadeSteps {}

fn channels(color: Rgb8) -> [i64; 3] {
    [
        i64::from(color.red),
        i64::from(color.green),
        i64::from(color.blue),
    ]
}
