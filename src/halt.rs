//! Fatal error handling: report a failed assertion, then blink forever.
//!
//! There is nothing to recover to on a bare microcontroller, so a failed
//! [`fatal_assert!`](crate::fatal_assert) reports where it happened over
//! the serial console and parks the firmware in a loop that blinks an
//! indicator LED. The indicator gets its own [`LedDriver`] built from an
//! injected [`HaltConfig`], independent of whatever state the rest of the
//! firmware was in.

use crate::channel::OutputChannel;
use crate::colors;
use crate::driver::LedDriver;
use crate::time::{TimeInstant, TimeSource};
use crate::types::{Polarity, Rgb8};
use core::fmt::Write;
use embedded_hal::delay::DelayNs;

/// How the fatal indicator LED is wired and blinks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HaltConfig {
    pub polarity: Polarity,
    pub color: Rgb8,
    pub blink_rate_ms: u32,
    pub duty_cycle: u8,
    /// Sleep between two service calls of the halt loop.
    pub poll_interval_ms: u32,
}

impl Default for HaltConfig {
    /// Red, 250 ms period at 50 % duty, serviced every 5 ms.
    fn default() -> Self {
        Self {
            polarity: Polarity::CommonAnode,
            color: colors::RED,
            blink_rate_ms: 250,
            duty_cycle: 50,
            poll_interval_ms: 5,
        }
    }
}

/// Where a fatal assertion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Diagnostic {
    pub function: &'static str,
    pub file: &'static str,
    pub line: u32,
    /// Source text of the failed condition.
    pub expression: &'static str,
}

impl core::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "assertion failed: {} in {} at {}:{}",
            self.expression, self.function, self.file, self.line
        )
    }
}

/// Writes the diagnostic one field per line: function, file, line, expression.
pub fn report<W: Write>(out: &mut W, diagnostic: &Diagnostic) -> core::fmt::Result {
    write!(out, "{}\r\n", diagnostic.function)?;
    write!(out, "{}\r\n", diagnostic.file)?;
    write!(out, "{}\r\n", diagnostic.line)?;
    write!(out, "{}\r\n", diagnostic.expression)
}

/// Blinking LED that signals a halted firmware.
pub struct FatalIndicator<'t, I, R, G, B, T>
where
    I: TimeInstant,
    R: OutputChannel,
    G: OutputChannel,
    B: OutputChannel,
    T: TimeSource<I>,
{
    driver: LedDriver<'t, I, R, G, B, T>,
    poll_interval_ms: u32,
}

impl<'t, I, R, G, B, T> FatalIndicator<'t, I, R, G, B, T>
where
    I: TimeInstant,
    R: OutputChannel,
    G: OutputChannel,
    B: OutputChannel,
    T: TimeSource<I>,
{
    /// Takes over the channels, shows the configured color and starts blinking.
    pub fn new(red: R, green: G, blue: B, time_source: &'t T, config: &HaltConfig) -> Self {
        let mut driver = LedDriver::with_polarity(red, green, blue, config.polarity, time_source);
        driver.set_color(config.color);
        driver.blink_enable(config.blink_rate_ms, config.duty_cycle);

        Self {
            driver,
            poll_interval_ms: config.poll_interval_ms,
        }
    }

    /// Services the blink once.
    pub fn poll(&mut self) {
        self.driver.service();
    }

    /// Returns the underlying driver.
    pub fn driver(&self) -> &LedDriver<'t, I, R, G, B, T> {
        &self.driver
    }

    /// Blinks forever.
    pub fn run<D: DelayNs>(mut self, delay: &mut D) -> ! {
        loop {
            self.poll();
            delay.delay_ms(self.poll_interval_ms);
        }
    }
}

/// Reports `diagnostic` to `out` and halts with the indicator blinking.
///
/// Write errors are ignored; the indicator is the signal that always works.
pub fn fatal<W, I, R, G, B, T, D>(
    out: &mut W,
    diagnostic: &Diagnostic,
    indicator: FatalIndicator<'_, I, R, G, B, T>,
    delay: &mut D,
) -> !
where
    W: Write,
    I: TimeInstant,
    R: OutputChannel,
    G: OutputChannel,
    B: OutputChannel,
    T: TimeSource<I>,
    D: DelayNs,
{
    #[cfg(feature = "defmt")]
    defmt::error!("{}", diagnostic);

    let _ = report(out, diagnostic);
    indicator.run(delay)
}

/// Halts via [`halt::fatal`](crate::halt::fatal) if the condition is false.
///
/// The indicator expression is only evaluated on failure, so it can move the
/// LED channels out of wherever they live.
///
/// ```ignore
/// fatal_assert!(
///     buffer.len() <= MAX_FRAME,
///     &mut console,
///     FatalIndicator::new(red, green, blue, &clock, &HaltConfig::default()),
///     &mut delay,
/// );
/// ```
#[macro_export]
macro_rules! fatal_assert {
    ($cond:expr, $out:expr, $indicator:expr, $delay:expr $(,)?) => {
        if !$cond {
            $crate::halt::fatal(
                $out,
                &$crate::halt::Diagnostic {
                    function: module_path!(),
                    file: file!(),
                    line: line!(),
                    expression: stringify!($cond),
                },
                $indicator,
                $delay,
            )
        }
    };
}
