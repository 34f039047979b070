//! BIOS Layer - Real mode register state and the teletype output service

pub mod regs;
pub mod teletype;
