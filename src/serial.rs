//! Line reader for a byte-oriented serial console.
//!
//! Bytes are echoed back as they arrive so a terminal user sees what they
//! type. A line ends at CR or LF; the terminator is echoed but not stored.

use crate::time::{TimeDuration, TimeInstant, TimeSource};

/// Trait for abstracting a serial port.
///
/// Handle any hardware errors internally - these methods cannot fail.
pub trait SerialPort {
    /// Returns the next received byte, or `None` if nothing is waiting.
    fn read_byte(&mut self) -> Option<u8>;

    /// Sends one byte.
    fn write_byte(&mut self, byte: u8);
}

/// Errors that can occur while reading a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadLineError {
    /// No byte arrived within the timeout.
    Timeout {
        /// Bytes stored before the timeout hit.
        received: usize,
    },
}

impl core::fmt::Display for ReadLineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReadLineError::Timeout { received } => {
                write!(f, "serial read timed out after {} bytes", received)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ReadLineError {}

/// Reads one line into `buf`, echoing every received byte.
///
/// Stops at CR/LF or when `buf` is full. The timeout counts from the last
/// stored byte, so a slow typist is not cut off mid-line.
///
/// # Returns
/// * `Ok(n)` - `n` bytes were stored in `buf[..n]`
/// * `Err(ReadLineError::Timeout { .. })` - no byte arrived for `timeout_ms`
pub fn read_line<S, I, T>(
    port: &mut S,
    buf: &mut [u8],
    timeout_ms: u32,
    time_source: &T,
) -> Result<usize, ReadLineError>
where
    S: SerialPort,
    I: TimeInstant,
    T: TimeSource<I>,
{
    let mut len = 0;
    let mut last_activity = time_source.now();

    while len < buf.len() {
        if let Some(byte) = port.read_byte() {
            port.write_byte(byte);

            if byte == b'\n' || byte == b'\r' {
                return Ok(len);
            }

            buf[len] = byte;
            len += 1;
            last_activity = time_source.now();
            continue;
        }

        let idle = time_source.now().duration_since(last_activity).as_millis();
        if idle >= u64::from(timeout_ms) {
            return Err(ReadLineError::Timeout { received: len });
        }
    }

    Ok(len)
}

/// Like [`read_line`], collecting into a fixed-capacity vector.
pub fn read_line_vec<const N: usize, S, I, T>(
    port: &mut S,
    timeout_ms: u32,
    time_source: &T,
) -> Result<heapless::Vec<u8, N>, ReadLineError>
where
    S: SerialPort,
    I: TimeInstant,
    T: TimeSource<I>,
{
    let mut line = heapless::Vec::from_array([0u8; N]);
    let len = read_line(port, &mut line, timeout_ms, time_source)?;
    line.truncate(len);
    Ok(line)
}
