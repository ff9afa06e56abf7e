//! Configuration menu shown on the serial console.

use core::fmt::Write;

/// Menu lines, in display order. The title starts with a form feed to clear
/// the terminal.
pub const CONFIG_MENU: [&str; 8] = [
    "\x0c       Handbrake Config          ",
    "================================== ",
    " 1 - Set Key Binding               ",
    " 2 - Set Button Threshold          ",
    " 3 - Set LED Brightness            ",
    " 4 - Set Upper (Pulled) Deadband   ",
    " 5 - Set Lower (Released) Deadband ",
    " D - Set ALL to DEFAULT ",
];

/// Writes the configuration menu, one CRLF-terminated line per entry.
pub fn write_config_menu<W: Write>(out: &mut W) -> core::fmt::Result {
    for line in CONFIG_MENU {
        write!(out, "{}\r\n", line)?;
    }
    Ok(())
}
