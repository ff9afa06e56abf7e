//! Named colors and color conversion helpers.
//!
//! Colors are [`Rgb8`] values. The packed form used by [`from_packed`] and
//! [`to_packed`] is `0xRRGGBB`.
//!
//! HSV helpers go through `palette` and are handy for hue sweeps.

use crate::types::Rgb8;
use palette::{FromColor, Hsv, Srgb};

pub const OFF: Rgb8 = Srgb::new(0x00, 0x00, 0x00);
pub const RED: Rgb8 = Srgb::new(0xFF, 0x00, 0x00);
pub const GREEN: Rgb8 = Srgb::new(0x00, 0xFF, 0x00);
pub const BLUE: Rgb8 = Srgb::new(0x00, 0x00, 0xFF);
pub const WHITE: Rgb8 = Srgb::new(0xFF, 0xFF, 0xFF);
pub const PURPLE: Rgb8 = Srgb::new(0xFF, 0x00, 0xFF);
pub const AQUAMARINE: Rgb8 = Srgb::new(0x7F, 0xFF, 0xD4);
pub const AIRFORCE_BLUE: Rgb8 = Srgb::new(0x5D, 0x8A, 0xA8);
pub const AMARANTH: Rgb8 = Srgb::new(0xE5, 0x2B, 0x50);
pub const ASPARAGUS: Rgb8 = Srgb::new(0x87, 0xA9, 0x6B);

/// Splits a `0xRRGGBB` value into a color. Bits above 23 are ignored.
#[inline]
pub const fn from_packed(color: u32) -> Rgb8 {
    Srgb::new(
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
    )
}

/// Packs a color into `0xRRGGBB`.
#[inline]
pub const fn to_packed(color: Rgb8) -> u32 {
    ((color.red as u32) << 16) | ((color.green as u32) << 8) | color.blue as u32
}

/// Returns true if every channel is zero.
#[inline]
pub const fn is_off(color: Rgb8) -> bool {
    color.red == 0 && color.green == 0 && color.blue == 0
}

/// Scales every channel by `brightness / 255`.
#[inline]
pub fn scale(color: Rgb8, brightness: u8) -> Rgb8 {
    let scale_channel = |value: u8| (u16::from(value) * u16::from(brightness) / 255) as u8;
    Srgb::new(
        scale_channel(color.red),
        scale_channel(color.green),
        scale_channel(color.blue),
    )
}

/// Creates a color from HSV (Hue, Saturation, Value) components.
///
/// Hue is in degrees, saturation and value in `0.0..=1.0`.
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Rgb8 {
    let hsv = Hsv::new(hue, saturation, value);
    Srgb::<f32>::from_color(hsv).into_format()
}

/// Creates a color from hue only (full saturation and value).
#[inline]
pub fn hue(hue: f32) -> Rgb8 {
    hsv(hue, 1.0, 1.0)
}
