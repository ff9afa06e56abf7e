//! Core types shared by the driver and its helpers.

use palette::Srgb;

/// 8-bit RGB color, one intensity per channel in `0..=255`.
pub type Rgb8 = Srgb<u8>;

/// How the LED is wired, which decides whether levels are inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Shared anode: a channel is driven by sinking current, so the written
    /// level is inverted (`256 - intensity`).
    #[default]
    CommonAnode,

    /// Shared cathode: the written level equals the intensity.
    CommonCathode,
}

impl Polarity {
    /// Converts a logical intensity into the level written to the channel.
    ///
    /// For [`Polarity::CommonAnode`] the level is `256 - intensity`; an
    /// intensity of 0 would give 256, which saturates to 255.
    #[inline]
    pub fn level(self, intensity: u8) -> u8 {
        match self {
            Polarity::CommonCathode => intensity,
            Polarity::CommonAnode => {
                let inverted = 256u16 - u16::from(intensity);
                inverted.min(u16::from(u8::MAX)) as u8
            }
        }
    }
}

/// Phase of the blink state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkPhase {
    /// Remembered color is shown.
    #[default]
    On,

    /// Output is forced off.
    Off,
}

/// Active blink parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkConfig {
    /// Length of one on+off cycle in milliseconds.
    pub rate_ms: u32,

    /// Share of the cycle spent on, in percent (`0..=100`).
    pub duty_cycle: u8,
}

impl BlinkConfig {
    /// Creates a blink configuration, clamping the duty cycle to 100.
    #[inline]
    pub fn new(rate_ms: u32, duty_cycle: u8) -> Self {
        Self {
            rate_ms,
            duty_cycle: duty_cycle.min(100),
        }
    }

    /// Time spent in the on phase, `rate * duty / 100`.
    #[inline]
    pub fn on_duration_ms(&self) -> u64 {
        u64::from(self.rate_ms) * u64::from(self.duty_cycle) / 100
    }

    /// Time spent in the off phase, `rate * (100 - duty) / 100`.
    #[inline]
    pub fn off_duration_ms(&self) -> u64 {
        u64::from(self.rate_ms) * u64::from(100 - self.duty_cycle) / 100
    }
}
