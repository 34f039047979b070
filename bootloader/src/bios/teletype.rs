//! Teletype output service (INT 0x10, AH=0x0E)
//!
//! The single firmware service this stage consumes: write one character to
//! the display and advance the cursor. The call blocks until the firmware
//! has consumed the character and reports no status back.

use arrayvec::ArrayVec;

/// Video services interrupt vector
pub const VIDEO_INTERRUPT: u8 = 0x10;

/// Teletype-output function selector, passed in AH
pub const TELETYPE_FUNCTION: u8 = 0x0E;

/// The firmware console boundary.
///
/// Implementations display one character and advance the firmware cursor.
/// There is no error surface: a failing service is indistinguishable from a
/// succeeding one at this layer.
pub trait FirmwareConsole {
    fn teletype_out(&mut self, ch: u8);
}

/// Console that records emitted bytes, for host-side harnesses and tests.
///
/// Capture capacity is bounded; invocations past capacity are still counted
/// so a runaway run remains detectable even once the buffer is full.
pub struct CaptureConsole {
    bytes: ArrayVec<u8, 256>,
    calls: usize,
}

impl CaptureConsole {
    pub fn new() -> Self {
        Self {
            bytes: ArrayVec::new(),
            calls: 0,
        }
    }

    /// Bytes emitted so far, in order
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of firmware service invocations, including any past capacity
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl Default for CaptureConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl FirmwareConsole for CaptureConsole {
    fn teletype_out(&mut self, ch: u8) {
        self.calls += 1;
        let _ = self.bytes.try_push(ch);
    }
}

/// The real firmware service, reached through the video interrupt.
///
/// Only exists on the bare-metal boot target; everything else in the crate
/// goes through the [`FirmwareConsole`] seam.
#[cfg(all(target_arch = "x86", target_os = "none"))]
pub struct Int10Console;

#[cfg(all(target_arch = "x86", target_os = "none"))]
impl FirmwareConsole for Int10Console {
    fn teletype_out(&mut self, ch: u8) {
        // SAFETY: INT 0x10/AH=0x0E only touches display state and the
        // firmware cursor. AX is declared clobbered here; the caller in
        // `console::print_char` restores it, upholding the register
        // preservation contract.
        unsafe {
            core::arch::asm!(
                "int 0x10",
                inout("ax") (((TELETYPE_FUNCTION as u16) << 8) | ch as u16) => _,
                in("bx") 0u16, // BH = display page 0
                options(nomem, nostack),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_records_in_order() {
        let mut console = CaptureConsole::new();
        console.teletype_out(b'H');
        console.teletype_out(b'i');
        assert_eq!(console.bytes(), b"Hi");
        assert_eq!(console.calls(), 2);
    }

    #[test]
    fn test_capture_counts_past_capacity() {
        let mut console = CaptureConsole::new();
        for _ in 0..300 {
            console.teletype_out(b'.');
        }
        assert_eq!(console.bytes().len(), 256);
        assert_eq!(console.calls(), 300);
    }

    #[test]
    fn test_service_selector_values() {
        assert_eq!(VIDEO_INTERRUPT, 0x10);
        assert_eq!(TELETYPE_FUNCTION, 0x0E);
    }
}
