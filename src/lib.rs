#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`LedDriver`**: Owns the three channels of one RGB LED; sets colors, fades and blinks
//! - **`OutputChannel`**: Trait to implement for each color channel of your hardware
//! - **`PwmChannel`**: Ready-made `OutputChannel` for `embedded-hal` PWM channels
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`Polarity`**: Common-anode (inverted) or common-cathode wiring
//! - **`FadeSteps`**: The color plan of a linear fade
//! - **`serial`**, **`menu`**, **`halt`**: Console line reader, config menu and fatal-halt helpers
//!
//! Colors are `Srgb<u8>` (aliased as [`Rgb8`]), one 0-255 intensity per channel.
//! Polarity inversion happens inside the driver, so channels receive raw levels.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod channel;
pub mod colors;
pub mod driver;
pub mod fade;
pub mod halt;
pub mod menu;
pub mod serial;
pub mod time;
pub mod types;

pub use channel::{OutputChannel, PwmChannel};
pub use driver::LedDriver;
pub use fade::FadeSteps;
pub use halt::{Diagnostic, FatalIndicator, HaltConfig};
pub use serial::{ReadLineError, SerialPort};
pub use time::{MillisDuration, MillisInstant, TimeDuration, TimeInstant, TimeSource};
pub use types::{BlinkConfig, BlinkPhase, Polarity, Rgb8};
