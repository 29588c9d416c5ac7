// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! SysTick time base.

use core::sync::atomic::{AtomicU32, Ordering};

/// SysTick interrupt rate.
pub const TICK_HZ: u32 = 1_000;

/// SysTick reload register is 24 bits wide.
pub const SYSTICK_MAX_RELOAD: u32 = 0x00FF_FFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickConfigError {
    /// The number of core cycles per tick is zero or does not fit in the
    /// reload register.
    ReloadOutOfRange { cycles: u32 },
}

/// Reload value giving `tick_hz` interrupts per second from `core_hz`.
pub fn systick_reload(core_hz: u32, tick_hz: u32) -> Result<u32, TickConfigError> {
    let cycles = core_hz.checked_div(tick_hz).unwrap_or(0);
    if cycles == 0 || cycles - 1 > SYSTICK_MAX_RELOAD {
        return Err(TickConfigError::ReloadOutOfRange { cycles });
    }
    Ok(cycles - 1)
}

/// Ticks elapsed since the last reset.
///
/// The SysTick handler is the only caller of [`TickCounter::on_tick`]; the
/// foreground loop is the only caller of [`TickCounter::reset`].
pub struct TickCounter {
    ticks: AtomicU32,
}

impl TickCounter {
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU32::new(0),
        }
    }

    /// Count one tick. Called from interrupt context.
    pub fn on_tick(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u32 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.ticks.store(0, Ordering::Relaxed);
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}
