//! Real mode register record
//!
//! At this stage registers are the only storage and the only argument-passing
//! mechanism. The record makes that state explicit so the output primitives
//! and their register-preservation contract can be checked on the host
//! without an emulator.

/// Real mode general-purpose register state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RealModeRegs {
    pub ax: u16,
    pub bx: u16,
    pub cx: u16,
    pub dx: u16,
    pub si: u16,
    pub di: u16,
    pub bp: u16,
    pub sp: u16,
}

impl RealModeRegs {
    /// Register state as the firmware leaves it: nothing guaranteed,
    /// modeled as zeroed
    pub const fn new() -> Self {
        Self {
            ax: 0,
            bx: 0,
            cx: 0,
            dx: 0,
            si: 0,
            di: 0,
            bp: 0,
            sp: 0,
        }
    }

    pub fn al(&self) -> u8 {
        (self.ax & 0xFF) as u8
    }

    pub fn ah(&self) -> u8 {
        ((self.ax >> 8) & 0xFF) as u8
    }

    pub fn set_al(&mut self, val: u8) {
        self.ax = (self.ax & 0xFF00) | (val as u16);
    }

    pub fn set_ah(&mut self, val: u8) {
        self.ax = (self.ax & 0x00FF) | ((val as u16) << 8);
    }
}

impl Default for RealModeRegs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let regs = RealModeRegs::new();
        assert_eq!(regs.ax, 0);
        assert_eq!(regs.al(), 0);
        assert_eq!(regs.ah(), 0);
    }

    #[test]
    fn test_al_ah_accessors() {
        let mut regs = RealModeRegs::new();

        regs.set_al(0x42);
        assert_eq!(regs.al(), 0x42);
        assert_eq!(regs.ax & 0xFF, 0x42);

        regs.set_ah(0x0E);
        assert_eq!(regs.ah(), 0x0E);
        assert_eq!(regs.al(), 0x42);
        assert_eq!(regs.ax, 0x0E42);
    }

    #[test]
    fn test_set_al_keeps_ah() {
        let mut regs = RealModeRegs::new();
        regs.ax = 0x0E00;
        regs.set_al(0x21);
        assert_eq!(regs.ax, 0x0E21);
    }
}
