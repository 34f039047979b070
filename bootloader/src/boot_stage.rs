//! Boot application logic
//!
//! The first code that runs with a valid stack and an ordinary calling
//! discipline. It announces boot state through the console primitives and
//! returns, at which point the entry trampoline halts the machine. Future
//! second-stage loading hangs off this point.

use crate::bios::regs::RealModeRegs;
use crate::bios::teletype::FirmwareConsole;
use crate::console::{print_hex, print_string};
use crate::layout::{LoadRegion, Offset};

/// Greeting announced once the stack is up. Terminators are part of the
/// data: strings in the load region carry no length prefix.
pub static GREETING: &[u8] = b"Hello World!\0";

/// Farewell announced before control returns to the trampoline's halt
pub static FAREWELL: &[u8] = b"Goodbye World :(\0";

/// Diagnostic value printed through the hex formatter; a recognizable
/// bit pattern so truncated or misordered digits stand out on screen
pub const BOOT_DIAGNOSTIC: u32 = 0xCAFE_BABE;

/// Load-region offsets of the strings the boot stage announces
#[derive(Debug, Clone, Copy)]
pub struct BootMessages {
    pub greeting: Offset,
    pub farewell: Offset,
}

/// Announce boot state: greeting, farewell, then the diagnostic value.
///
/// Generic over the console seam and region view so the same logic drives
/// the real firmware service and the host-side model machine.
pub fn run<R, C>(regs: &mut RealModeRegs, region: &R, console: &mut C, messages: BootMessages)
where
    R: LoadRegion + ?Sized,
    C: FirmwareConsole,
{
    log::debug!("boot stage running, stack at {:#06x}", regs.sp);

    regs.si = messages.greeting.0;
    print_string(regs, region, console);

    regs.si = messages.farewell.0;
    print_string(regs, region, console);

    print_hex(regs, console, BOOT_DIAGNOSTIC);
}

#[cfg(all(target_arch = "x86", target_os = "none"))]
mod baremetal {
    use super::*;
    use crate::bios::teletype::Int10Console;
    use crate::layout::{LiveRegion, LOAD_BASE};
    use spin::Mutex;

    // Single logical owner of the CPU; the lock documents the ownership
    // discipline rather than guarding against preemption (there is none).
    static BOOT_CONSOLE: Mutex<Int10Console> = Mutex::new(Int10Console);

    /// Offset of linked-in string data within the load region. The image is
    /// linked at `LOAD_BASE`, so a static's address is already linear.
    fn offset_of(bytes: &'static [u8]) -> Offset {
        Offset((bytes.as_ptr() as u32 - LOAD_BASE) as u16)
    }

    /// Called by the entry trampoline once the stack is established.
    /// Returning hands control back to the trampoline's halt loop.
    #[unsafe(no_mangle)]
    pub extern "C" fn boot_main() {
        let mut regs = RealModeRegs::new();
        let mut console = BOOT_CONSOLE.lock();
        let messages = BootMessages {
            greeting: offset_of(GREETING),
            farewell: offset_of(FAREWELL),
        };
        run(&mut regs, &LiveRegion, &mut *console, messages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bios::teletype::CaptureConsole;

    #[test]
    fn test_announcement_sequence() {
        // Lay the strings out the way the linked image would
        let mut image = std::vec::Vec::new();
        let greeting = Offset(image.len() as u16);
        image.extend_from_slice(GREETING);
        let farewell = Offset(image.len() as u16);
        image.extend_from_slice(FAREWELL);

        let mut regs = RealModeRegs::new();
        let mut console = CaptureConsole::new();
        run(
            &mut regs,
            &image[..],
            &mut console,
            BootMessages { greeting, farewell },
        );

        assert_eq!(console.bytes(), b"Hello World!Goodbye World :(0xcafebabe");
    }

    #[test]
    fn test_strings_are_terminated() {
        assert_eq!(GREETING.last(), Some(&0));
        assert_eq!(FAREWELL.last(), Some(&0));
    }
}
