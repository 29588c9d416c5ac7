// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Terminal error handling. Nothing here returns.

/// Exception that ended execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    NonMaskableInt,
    HardFault,
    MemoryManagement,
    BusFault,
    UsageFault,
    /// Interrupt or exception with no dedicated handler.
    Unhandled(i16),
}

/// Spin forever inside a fault handler.
///
/// Interrupts stay as they are; the handler's priority already keeps SysTick
/// from running.
#[cfg(feature = "embedded")]
#[inline(never)]
pub fn park(kind: FaultKind) -> ! {
    #[cfg(feature = "defmt")]
    defmt::error!("Fault: {}", kind);
    #[cfg(not(feature = "defmt"))]
    let _ = kind;

    loop {
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }
}

/// Stop the system: mask interrupts and spin forever.
#[cfg(feature = "embedded")]
#[inline(never)]
pub fn halt() -> ! {
    cortex_m::interrupt::disable();
    #[cfg(feature = "defmt")]
    defmt::error!("Halted");

    loop {
        cortex_m::asm::nop();
    }
}
