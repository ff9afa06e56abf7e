//! Output channel abstraction for the three LED colors.

use embedded_hal::pwm::SetDutyCycle;

/// Trait for abstracting one color channel of the LED.
///
/// Implement this for your hardware (PWM channel, DAC, bit-banged pin) so the
/// driver can write intensity levels to it. Handle any hardware errors
/// internally - these methods cannot fail.
pub trait OutputChannel {
    /// Puts the channel into output mode.
    ///
    /// Called once by the driver before the first write. Channels whose HAL
    /// already configures them at the type level can keep the default no-op.
    fn configure_output(&mut self) {}

    /// Writes a raw output level (`0..=255`, already polarity-corrected).
    fn write_level(&mut self, level: u8);
}

/// Adapts an `embedded-hal` PWM channel to [`OutputChannel`].
///
/// The 8-bit level is mapped onto the channel's full duty cycle range.
pub struct PwmChannel<P: SetDutyCycle> {
    pwm: P,
}

impl<P: SetDutyCycle> PwmChannel<P> {
    /// Wraps a PWM channel.
    pub fn new(pwm: P) -> Self {
        Self { pwm }
    }

    /// Returns the wrapped PWM channel.
    pub fn into_inner(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> OutputChannel for PwmChannel<P> {
    fn write_level(&mut self, level: u8) {
        let _ = self
            .pwm
            .set_duty_cycle_fraction(u16::from(level), u16::from(u8::MAX));
    }
}
