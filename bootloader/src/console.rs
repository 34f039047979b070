//! Firmware console output primitives
//!
//! The three output routines available before any richer I/O exists:
//! single character, null-terminated string, and fixed-width hexadecimal.
//! Arguments travel in registers ([`RealModeRegs`]) and every primitive
//! restores each register it touches before returning - there is no
//! compiler-enforced calling convention at this stage to protect callers,
//! so the restore discipline substitutes for one.

use crate::bios::regs::RealModeRegs;
use crate::bios::teletype::{FirmwareConsole, TELETYPE_FUNCTION};
use crate::layout::{LoadRegion, Offset};

/// Emit the character in AL through the firmware teletype service.
///
/// Loads AH with the teletype function selector for the call and restores
/// AX before returning; callers see no register change.
pub fn print_char<C: FirmwareConsole>(regs: &mut RealModeRegs, console: &mut C) {
    let saved_ax = regs.ax;

    regs.set_ah(TELETYPE_FUNCTION);
    console.teletype_out(regs.al());

    regs.ax = saved_ax;
}

/// Emit the null-terminated byte sequence whose load-region offset is in SI.
///
/// Walks byte-by-byte through the single offset-to-linear conversion in
/// [`Offset::linear`] (via the region view), emitting each byte with
/// [`print_char`] and stopping at the first zero byte, exclusive. A sequence
/// whose first byte is the terminator emits nothing. An unterminated
/// sequence is a caller contract violation and is not guarded here.
/// Restores AX and SI.
pub fn print_string<R, C>(regs: &mut RealModeRegs, region: &R, console: &mut C)
where
    R: LoadRegion + ?Sized,
    C: FirmwareConsole,
{
    log::trace!("print_string from offset {:#06x}", regs.si);
    let saved_ax = regs.ax;
    let saved_si = regs.si;

    loop {
        let byte = region.byte_at(Offset(regs.si));
        if byte == 0 {
            break;
        }
        regs.set_al(byte);
        print_char(regs, console);
        regs.si = regs.si.wrapping_add(1);
    }

    regs.si = saved_si;
    regs.ax = saved_ax;
}

/// Map a 4-bit digit value to its lowercase hex character.
///
/// Total over all of u8: values above 15 cannot reach here from
/// [`print_hex`] (the mask precedes the call), but they still map to a
/// defined sentinel rather than faulting.
pub fn hex_digit(value: u8) -> u8 {
    match value {
        0..=9 => b'0' + value,
        10..=15 => b'a' + (value - 10),
        _ => b'X',
    }
}

/// Emit `value` as `0x` followed by 8 lowercase hex digits, most significant
/// nibble first - always exactly 10 characters, zero padded.
///
/// Each digit goes straight out through [`print_char`]; no buffer exists at
/// this stage to format into. Restores AX.
pub fn print_hex<C: FirmwareConsole>(regs: &mut RealModeRegs, console: &mut C, value: u32) {
    log::trace!("print_hex {:#010x}", value);
    let saved_ax = regs.ax;

    regs.set_al(b'0');
    print_char(regs, console);
    regs.set_al(b'x');
    print_char(regs, console);

    let mut shift = u32::BITS as i32 - 4;
    while shift >= 0 {
        let nibble = ((value >> shift) & 0xF) as u8;
        regs.set_al(hex_digit(nibble));
        print_char(regs, console);
        shift -= 4;
    }

    regs.ax = saved_ax;
}

/// `core::fmt::Write` adapter over the console primitives, for later boot
/// stages that already have a stack and want `write!`.
pub struct ConsoleWriter<'a, C: FirmwareConsole> {
    regs: &'a mut RealModeRegs,
    console: &'a mut C,
}

impl<'a, C: FirmwareConsole> ConsoleWriter<'a, C> {
    pub fn new(regs: &'a mut RealModeRegs, console: &'a mut C) -> Self {
        Self { regs, console }
    }
}

impl<C: FirmwareConsole> core::fmt::Write for ConsoleWriter<'_, C> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for byte in s.bytes() {
            self.regs.set_al(byte);
            print_char(self.regs, self.console);
        }
        Ok(())
    }
}
