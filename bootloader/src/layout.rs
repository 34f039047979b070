//! Memory layout contract
//!
//! The external build/link step guarantees two things the rest of the crate
//! depends on: the entry trampoline sits at byte offset 0 of the flat image,
//! and the firmware loads the image at `LOAD_BASE` before jumping to it.
//! Everything in the load region is addressed as a 16-bit offset from that
//! base; the one place offset arithmetic happens is [`Offset::linear`].

use static_assertions::const_assert;

/// Absolute address the firmware loads the boot record at
pub const LOAD_BASE: u32 = 0x7C00;

/// Initial stack/frame pointer, a fixed high address in low memory.
/// Used uninitialized; the trampoline does not probe for it.
pub const STACK_TOP: u16 = 0x9000;

/// Size of the boot record
pub const SECTOR_SIZE: usize = 512;

/// Boot signature the firmware checks before transferring control
pub const BOOT_SIGNATURE: u16 = 0xAA55;

/// Byte offset of the boot signature within the sector
pub const BOOT_SIGNATURE_OFFSET: usize = 510;

const_assert!(BOOT_SIGNATURE_OFFSET + 2 == SECTOR_SIZE);
const_assert!(STACK_TOP as u32 >= LOAD_BASE + SECTOR_SIZE as u32);
const_assert!(LOAD_BASE + SECTOR_SIZE as u32 <= 0xA0000); // below video memory

/// Segment-relative offset into the load region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset(pub u16);

impl Offset {
    /// Convert to the absolute (linear) address the firmware loaded us at.
    /// All offset-to-address math in the crate goes through here.
    pub const fn linear(self) -> u32 {
        LOAD_BASE + self.0 as u32
    }
}

/// Read-only byte view of the load region
pub trait LoadRegion {
    fn byte_at(&self, off: Offset) -> u8;
}

/// A captured image snapshot; offsets past the snapshot read as zero,
/// which models the terminator-less tail of an unused sector.
impl LoadRegion for [u8] {
    fn byte_at(&self, off: Offset) -> u8 {
        self.get(off.0 as usize).copied().unwrap_or(0)
    }
}

/// The actual load region of the running machine
#[cfg(all(target_arch = "x86", target_os = "none"))]
pub struct LiveRegion;

#[cfg(all(target_arch = "x86", target_os = "none"))]
impl LoadRegion for LiveRegion {
    fn byte_at(&self, off: Offset) -> u8 {
        // SAFETY: the linked image occupies this region; the firmware placed
        // it there before the entry trampoline ran.
        unsafe { core::ptr::read_volatile(off.linear() as *const u8) }
    }
}

/// Check the firmware-visible boot signature on an image snapshot
pub fn has_boot_signature(image: &[u8]) -> bool {
    if image.len() < SECTOR_SIZE {
        return false;
    }
    let lo = image[BOOT_SIGNATURE_OFFSET] as u16;
    let hi = image[BOOT_SIGNATURE_OFFSET + 1] as u16;
    (hi << 8) | lo == BOOT_SIGNATURE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_linear() {
        assert_eq!(Offset(0).linear(), LOAD_BASE);
        assert_eq!(Offset(0x1FF).linear(), LOAD_BASE + 0x1FF);
        assert_eq!(Offset(u16::MAX).linear(), LOAD_BASE + 0xFFFF);
    }

    #[test]
    fn test_snapshot_region() {
        let image = [0x10u8, 0x20, 0x30];
        assert_eq!(image.byte_at(Offset(0)), 0x10);
        assert_eq!(image.byte_at(Offset(2)), 0x30);
        // Past the snapshot reads as zero
        assert_eq!(image.byte_at(Offset(3)), 0);
        assert_eq!(image.byte_at(Offset(0x400)), 0);
    }

    #[test]
    fn test_boot_signature() {
        let mut image = [0u8; SECTOR_SIZE];
        assert!(!has_boot_signature(&image));

        image[BOOT_SIGNATURE_OFFSET] = 0x55;
        image[BOOT_SIGNATURE_OFFSET + 1] = 0xAA;
        assert!(has_boot_signature(&image));

        // Truncated images never carry a signature
        assert!(!has_boot_signature(&image[..SECTOR_SIZE - 1]));
    }
}
