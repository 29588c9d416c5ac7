// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! LED blink driven by the tick counter.

use embedded_hal::digital::StatefulOutputPin;

use crate::service::{Service, ServiceContext};

/// Ticks between two LED toggles (500 ms at 1 kHz).
pub const BLINK_THRESHOLD: u32 = 500;

/// Toggles the LED each time the tick counter reaches the threshold, then
/// restarts the count from zero.
pub struct BlinkService {
    threshold: u32,
    toggles: u32,
}

impl BlinkService {
    pub const fn new(threshold: u32) -> Self {
        Self {
            threshold,
            toggles: 0,
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Successful toggles so far (wraps).
    pub fn toggles(&self) -> u32 {
        self.toggles
    }
}

impl Default for BlinkService {
    fn default() -> Self {
        Self::new(BLINK_THRESHOLD)
    }
}

impl<P: StatefulOutputPin> Service<P> for BlinkService {
    fn process(&mut self, ctx: &mut ServiceContext<P>) {
        if ctx.ticks.get() < self.threshold {
            return;
        }

        ctx.ticks.reset();
        match ctx.peripherals.toggle() {
            Ok(()) => {
                self.toggles = self.toggles.wrapping_add(1);
                #[cfg(feature = "defmt")]
                defmt::trace!("Blink: toggle #{=u32}", self.toggles);
            }
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Blink: LED toggle failed");
            }
        }
    }
}
