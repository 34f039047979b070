//! Minnow Stage-0 Boot Record
//!
//! The first code the machine runs after firmware: a 512-byte boot record
//! loaded at a fixed address in real mode. The library is split into the
//! bare-metal entry path (compiled only for the boot target) and a pure
//! register-level model of the same primitives that host-side tests and
//! harnesses exercise without an emulator.

#![no_std]
#![allow(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
extern crate std;

/// Real mode BIOS interface - register records and the teletype service
pub mod bios;

/// Boot application logic - first code with a conventional calling discipline
pub mod boot_stage;

/// Firmware console primitives - character, string and hex output
pub mod console;

/// Entry trampoline - image offset 0, bare-metal boot target only
#[cfg(all(target_arch = "x86", target_os = "none"))]
pub mod entry;

/// Harness error handling
pub mod error;

/// Memory layout contract - load base, stack top, offset arithmetic
pub mod layout;

/// Host-side model machine for bounded end-to-end runs
pub mod machine;

pub use bios::regs::RealModeRegs;
pub use bios::teletype::{CaptureConsole, FirmwareConsole};
pub use error::{BootError, Result};
pub use layout::{LoadRegion, Offset, LOAD_BASE, STACK_TOP};
