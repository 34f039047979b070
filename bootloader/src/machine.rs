//! Host-side model machine
//!
//! Runs the boot flow against an image snapshot and a capturing console, the
//! way the real machine runs it against the load region and the firmware
//! service. Execution is bounded by a firmware-service budget so a runaway
//! run is detected instead of spinning, and the only successful outcome is
//! the halted state - matching the real trampoline's contract.

use crate::bios::regs::RealModeRegs;
use crate::bios::teletype::CaptureConsole;
use crate::boot_stage::{self, BootMessages};
use crate::error::{BootError, Result};
use crate::layout::{
    has_boot_signature, Offset, BOOT_SIGNATURE, BOOT_SIGNATURE_OFFSET, SECTOR_SIZE, STACK_TOP,
};

/// Service calls allowed per run before the harness declares a runaway.
/// Generous next to the ~40 a normal announcement sequence makes.
pub const DEFAULT_SERVICE_BUDGET: usize = 256;

/// Builds a model boot sector: string data laid out behind a reserved
/// boot-code area, signature in the last two bytes.
pub struct ImageBuilder {
    sector: [u8; SECTOR_SIZE],
    cursor: usize,
}

impl ImageBuilder {
    /// Reserved for the entry trampoline and boot code in a real image;
    /// string data is laid out after it.
    const CODE_RESERVED: usize = 0x40;

    pub fn new() -> Self {
        Self {
            sector: [0; SECTOR_SIZE],
            cursor: Self::CODE_RESERVED,
        }
    }

    /// Place a byte sequence (terminator included in the data, as linked
    /// images carry it) and return its load-region offset.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<Offset> {
        let end = self.cursor + bytes.len();
        if end > BOOT_SIGNATURE_OFFSET {
            return Err(BootError::ImageOverflow);
        }
        let offset = Offset(self.cursor as u16);
        self.sector[self.cursor..end].copy_from_slice(bytes);
        self.cursor = end;
        Ok(offset)
    }

    /// Stamp the boot signature and hand back the finished sector
    pub fn finish(mut self) -> [u8; SECTOR_SIZE] {
        self.sector[BOOT_SIGNATURE_OFFSET] = (BOOT_SIGNATURE & 0xFF) as u8;
        self.sector[BOOT_SIGNATURE_OFFSET + 1] = (BOOT_SIGNATURE >> 8) as u8;
        self.sector
    }
}

impl Default for ImageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Model of the machine from firmware handoff to halt
pub struct Machine<'a> {
    regs: RealModeRegs,
    image: &'a [u8],
    console: CaptureConsole,
    halted: bool,
    service_budget: usize,
}

impl<'a> Machine<'a> {
    /// Take an image the way firmware does: registers unspecified (zeroed
    /// in the model), no stack, image already placed in the load region.
    pub fn new(image: &'a [u8]) -> Self {
        Self {
            regs: RealModeRegs::new(),
            image,
            console: CaptureConsole::new(),
            halted: false,
            service_budget: DEFAULT_SERVICE_BUDGET,
        }
    }

    pub fn with_service_budget(mut self, budget: usize) -> Self {
        self.service_budget = budget;
        self
    }

    /// Run from firmware handoff to halt: signature check, trampoline
    /// (stack establishment), boot application, halt.
    pub fn run(&mut self, messages: BootMessages) -> Result<()> {
        if !has_boot_signature(self.image) {
            // Firmware refuses the image before our first instruction runs
            return Err(BootError::InvalidBootSignature);
        }

        log::debug!("model machine: entry at offset 0, establishing stack");
        self.regs.sp = STACK_TOP;
        self.regs.bp = STACK_TOP;

        boot_stage::run(&mut self.regs, self.image, &mut self.console, messages);

        self.halted = true;
        if self.console.calls() > self.service_budget {
            return Err(BootError::ServiceBudgetExceeded);
        }
        Ok(())
    }

    /// Everything the display received, in order
    pub fn output(&self) -> &[u8] {
        self.console.bytes()
    }

    pub fn service_calls(&self) -> usize {
        self.console.calls()
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn regs(&self) -> &RealModeRegs {
        &self.regs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boot_stage::{FAREWELL, GREETING};

    #[test]
    fn test_image_builder_places_signature() {
        let image = ImageBuilder::new().finish();
        assert!(has_boot_signature(&image));
    }

    #[test]
    fn test_image_builder_rejects_overflow() {
        let mut builder = ImageBuilder::new();
        let huge = [b'.'; SECTOR_SIZE];
        assert_eq!(builder.push_bytes(&huge), Err(BootError::ImageOverflow));
    }

    #[test]
    fn test_unsigned_image_is_refused() {
        let image = [0u8; SECTOR_SIZE];
        let mut machine = Machine::new(&image);
        let messages = BootMessages {
            greeting: Offset(0),
            farewell: Offset(0),
        };
        assert_eq!(machine.run(messages), Err(BootError::InvalidBootSignature));
        assert!(!machine.is_halted());
    }

    #[test]
    fn test_budget_exceeded_is_reported() {
        let mut builder = ImageBuilder::new();
        let greeting = builder.push_bytes(GREETING).unwrap();
        let farewell = builder.push_bytes(FAREWELL).unwrap();
        let image = builder.finish();

        let mut machine = Machine::new(&image).with_service_budget(4);
        let result = machine.run(BootMessages { greeting, farewell });
        assert_eq!(result, Err(BootError::ServiceBudgetExceeded));
    }

    #[test]
    fn test_stack_established_before_boot_stage() {
        let mut builder = ImageBuilder::new();
        let greeting = builder.push_bytes(GREETING).unwrap();
        let farewell = builder.push_bytes(FAREWELL).unwrap();
        let image = builder.finish();

        let mut machine = Machine::new(&image);
        machine.run(BootMessages { greeting, farewell }).unwrap();
        assert_eq!(machine.regs().sp, STACK_TOP);
        assert_eq!(machine.regs().bp, STACK_TOP);
    }
}
