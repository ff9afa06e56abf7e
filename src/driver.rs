//! Tri-color LED driver with polled blinking and stepped fades.
//!
//! Provides [`LedDriver`], which owns the three color channels of one LED,
//! remembers the last color that was not off, and runs a blink state machine
//! advanced by [`LedDriver::service`].

use crate::channel::OutputChannel;
use crate::colors;
use crate::fade::FadeSteps;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::{BlinkConfig, BlinkPhase, Polarity, Rgb8};
use embedded_hal::delay::DelayNs;

/// A fade advanced from [`LedDriver::service`].
struct ActiveFade<I> {
    steps: FadeSteps,
    last_step: I,
}

/// Controls a single tri-color LED.
///
/// The driver keeps a *remembered color*: the last color set that was not
/// all-off. Blinking restores it on every on phase and fades start from it,
/// so switching the LED off never loses it.
///
/// Blinking is cooperative. Call [`service`](Self::service) often from the
/// main loop; it never blocks.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `R`, `G`, `B` - Channel implementations for red, green and blue
/// * `T` - Time source implementation type
pub struct LedDriver<'t, I, R, G, B, T>
where
    I: TimeInstant,
    R: OutputChannel,
    G: OutputChannel,
    B: OutputChannel,
    T: TimeSource<I>,
{
    red: R,
    green: G,
    blue: B,
    time_source: &'t T,
    polarity: Polarity,
    configured: bool,
    color: Rgb8,
    blink: BlinkConfig,
    blink_enabled: bool,
    blink_phase: BlinkPhase,
    /// Start of the current blink phase. Reset by every blink enable.
    last_transition: I,
    fade: Option<ActiveFade<I>>,
}

impl<'t, I, R, G, B, T> LedDriver<'t, I, R, G, B, T>
where
    I: TimeInstant,
    R: OutputChannel,
    G: OutputChannel,
    B: OutputChannel,
    T: TimeSource<I>,
{
    /// Creates a driver for a common-anode LED.
    pub fn new(red: R, green: G, blue: B, time_source: &'t T) -> Self {
        Self::with_polarity(red, green, blue, Polarity::CommonAnode, time_source)
    }

    /// Creates a driver with explicit wiring polarity.
    ///
    /// Channels are configured as outputs here, whichever constructor is used.
    pub fn with_polarity(
        red: R,
        green: G,
        blue: B,
        polarity: Polarity,
        time_source: &'t T,
    ) -> Self {
        let mut driver = Self {
            red,
            green,
            blue,
            time_source,
            polarity,
            configured: false,
            color: colors::OFF,
            blink: BlinkConfig::new(0, 100),
            blink_enabled: false,
            blink_phase: BlinkPhase::On,
            last_transition: time_source.now(),
            fade: None,
        };
        driver.configure();
        driver
    }

    /// Configures all three channels as outputs. Does nothing if already done.
    pub fn configure(&mut self) {
        if self.configured {
            return;
        }
        self.red.configure_output();
        self.green.configure_output();
        self.blue.configure_output();
        self.configured = true;
    }

    /// Sets the LED to a color given as separate intensities.
    pub fn set_rgb(&mut self, red: u8, green: u8, blue: u8) {
        self.set_color(Rgb8::new(red, green, blue));
    }

    /// Sets the LED to `color` immediately.
    ///
    /// Unless `color` is all-off it also becomes the remembered color.
    pub fn set_color(&mut self, color: Rgb8) {
        self.red.write_level(self.polarity.level(color.red));
        self.green.write_level(self.polarity.level(color.green));
        self.blue.write_level(self.polarity.level(color.blue));

        if !colors::is_off(color) {
            self.color = color;
        }
    }

    /// Sets the LED from a packed `0xRRGGBB` value.
    pub fn set_packed(&mut self, color: u32) {
        self.set_color(colors::from_packed(color));
    }

    /// Sets the LED to `color` dimmed by `brightness / 255`.
    ///
    /// The dimmed color is what gets remembered.
    pub fn set_color_scaled(&mut self, color: Rgb8, brightness: u8) {
        self.set_color(colors::scale(color, brightness));
    }

    /// Packed form of [`set_color_scaled`](Self::set_color_scaled).
    pub fn set_packed_scaled(&mut self, color: u32, brightness: u8) {
        self.set_color_scaled(colors::from_packed(color), brightness);
    }

    /// Fades from the remembered color to `target`, blocking until done.
    ///
    /// Writes `steps` colors, sleeping `duration_ms / steps` after each one,
    /// and ends exactly on `target`. Cancels any fade started with
    /// [`start_fade`](Self::start_fade).
    ///
    /// # Panics
    /// Panics if `steps` is zero.
    pub fn fade_to<D: DelayNs>(
        &mut self,
        target: Rgb8,
        steps: u32,
        duration_ms: u32,
        delay: &mut D,
    ) {
        self.fade = None;

        let plan = FadeSteps::new(self.color, target, steps, duration_ms);
        let interval = plan.interval_ms();
        for color in plan {
            self.set_color(color);
            delay.delay_ms(interval);
        }
    }

    /// Starts a fade that is advanced by [`service`](Self::service).
    ///
    /// Produces the same colors as [`fade_to`](Self::fade_to). The first
    /// step is written right away; each further step is written once
    /// `duration_ms / steps` has elapsed since the previous one. Replaces
    /// any fade already in progress.
    ///
    /// While blinking, steps that fall in an off phase update the remembered
    /// color without lighting the LED.
    ///
    /// # Panics
    /// Panics if `steps` is zero.
    pub fn start_fade(&mut self, target: Rgb8, steps: u32, duration_ms: u32) {
        let mut plan = FadeSteps::new(self.color, target, steps, duration_ms);

        #[cfg(feature = "defmt")]
        defmt::debug!("fade started: {} steps over {} ms", steps, duration_ms);

        if let Some(first) = plan.next() {
            self.show_fade_step(first);
        }
        self.fade = Some(ActiveFade {
            steps: plan,
            last_step: self.time_source.now(),
        });
    }

    /// Stops a fade started with [`start_fade`](Self::start_fade), leaving
    /// the LED at its current color.
    pub fn cancel_fade(&mut self) {
        self.fade = None;
    }

    /// Returns true while a fade started with [`start_fade`](Self::start_fade)
    /// is running.
    pub fn fade_in_progress(&self) -> bool {
        self.fade.is_some()
    }

    /// Starts blinking the remembered color.
    ///
    /// * `rate_ms == 0` is the same as [`blink_disable`](Self::blink_disable).
    /// * `duty_cycle == 100` means fully on: blinking stops and the remembered
    ///   color is shown.
    /// * `duty_cycle == 0` switches the output off without touching the
    ///   remembered color or whether blinking is enabled.
    /// * Otherwise blinking is enabled with the duty cycle clamped to 100,
    ///   starting in the on phase. Phase timing starts now.
    ///
    /// Nothing is written to the LED in the last case; the next
    /// [`service`](Self::service) call does that when a phase ends.
    pub fn blink_enable(&mut self, rate_ms: u32, duty_cycle: u8) {
        if rate_ms == 0 {
            self.blink_disable();
            return;
        }

        match duty_cycle {
            100 => self.blink_disable(),
            0 => self.set_color(colors::OFF),
            _ => {
                self.blink = BlinkConfig::new(rate_ms, duty_cycle);
                self.blink_enabled = true;
                self.blink_phase = BlinkPhase::On;
                self.last_transition = self.time_source.now();
            }
        }
    }

    /// Stops blinking and shows the remembered color.
    pub fn blink_disable(&mut self) {
        self.blink_enabled = false;
        self.set_color(self.color);
        self.blink_phase = BlinkPhase::On;
    }

    /// Advances blinking and any running fade. Call this from the main loop.
    ///
    /// Never blocks. Does nothing when neither is active.
    pub fn service(&mut self) {
        if self.fade.is_none() && !self.blink_enabled {
            return;
        }

        let now = self.time_source.now();
        self.service_fade(now);
        if self.blink_enabled {
            self.service_blink(now);
        }
    }

    fn service_fade(&mut self, now: I) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };

        let elapsed = now.duration_since(fade.last_step).as_millis();
        if elapsed < u64::from(fade.steps.interval_ms()) {
            return;
        }

        match fade.steps.next() {
            Some(color) => {
                fade.last_step = now;
                self.show_fade_step(color);
            }
            None => {
                #[cfg(feature = "defmt")]
                defmt::debug!("fade finished");

                self.fade = None;
            }
        }
    }

    /// Writes a polled fade step unless blinking holds the LED dark.
    ///
    /// During a blink off phase the step only becomes the remembered color,
    /// which the next on phase shows.
    fn show_fade_step(&mut self, color: Rgb8) {
        if self.blink_enabled && self.blink_phase == BlinkPhase::Off {
            if !colors::is_off(color) {
                self.color = color;
            }
        } else {
            self.set_color(color);
        }
    }

    fn service_blink(&mut self, now: I) {
        let elapsed = now.duration_since(self.last_transition).as_millis();

        match self.blink_phase {
            BlinkPhase::On if elapsed >= self.blink.on_duration_ms() => {
                self.last_transition = now;
                self.set_color(colors::OFF);
                self.blink_phase = BlinkPhase::Off;
            }
            BlinkPhase::Off if elapsed >= self.blink.off_duration_ms() => {
                self.last_transition = now;
                self.set_color(self.color);
                self.blink_phase = BlinkPhase::On;
            }
            _ => return,
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("blink phase {}", self.blink_phase);
    }

    /// Returns the last color set that was not all-off.
    pub fn remembered_color(&self) -> Rgb8 {
        self.color
    }

    /// Returns the wiring polarity.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Returns true if blinking is enabled.
    pub fn is_blinking(&self) -> bool {
        self.blink_enabled
    }

    /// Returns the current blink phase.
    pub fn blink_phase(&self) -> BlinkPhase {
        self.blink_phase
    }

    /// Returns the blink parameters while blinking is enabled.
    pub fn blink_config(&self) -> Option<BlinkConfig> {
        self.blink_enabled.then_some(self.blink)
    }

    /// Consumes the driver and returns the channels.
    pub fn release(self) -> (R, G, B) {
        (self.red, self.green, self.blue)
    }
}
