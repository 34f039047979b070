//! Harness error handling
//!
//! The boot-stage primitives themselves have no error surface: firmware
//! failures are unobservable and any processor fault predates exception
//! infrastructure. These errors exist for the host-side layer that builds
//! and runs model images.

use core::fmt;

/// Errors reported by the model-machine harness and image builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootError {
    /// Image does not end in the 0xAA55 boot signature
    InvalidBootSignature,

    /// String data would overrun the boot-code area of the sector
    ImageOverflow,

    /// A model run invoked the firmware service more times than budgeted
    ServiceBudgetExceeded,
}

impl BootError {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidBootSignature => "Missing or invalid boot signature",
            Self::ImageOverflow => "String data overruns boot-code area",
            Self::ServiceBudgetExceeded => "Firmware service budget exceeded",
        }
    }
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub type Result<T> = core::result::Result<T, BootError>;
