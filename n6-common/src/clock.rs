// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Process-wide core clock frequency.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::rcc::{self, HSI_HZ};
use crate::regs::Registers;

/// Core clock frequency in Hz.
///
/// Written by the clock configuration at startup, read by anything that
/// derives timing from the core clock.
pub struct CoreClock {
    hz: AtomicU32,
}

impl CoreClock {
    /// Starts at the reset frequency (HSI).
    pub const fn new() -> Self {
        Self {
            hz: AtomicU32::new(HSI_HZ),
        }
    }

    pub fn get(&self) -> u32 {
        self.hz.load(Ordering::Acquire)
    }

    pub fn set(&self, hz: u32) {
        self.hz.store(hz, Ordering::Release);
    }

    /// Recompute the frequency from the clock registers and store it.
    pub fn update<R: Registers>(&self, regs: &R) -> u32 {
        let hz = rcc::sysclk_from_registers(regs);
        self.set(hz);
        hz
    }
}

impl Default for CoreClock {
    fn default() -> Self {
        Self::new()
    }
}
