// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Exception handlers.
//!
//! Faults never return: the core parks in the handler, which runs above the
//! SysTick priority, so the tick count and the LED freeze.

use cortex_m_rt::{exception, ExceptionFrame};
use n6_common::{fault, FaultKind};

#[exception]
fn SysTick() {
    crate::TICKS.on_tick();
}

#[exception]
unsafe fn NonMaskableInt() {
    fault::park(FaultKind::NonMaskableInt)
}

#[exception]
unsafe fn HardFault(_ef: &ExceptionFrame) -> ! {
    fault::park(FaultKind::HardFault)
}

#[exception]
fn MemoryManagement() -> ! {
    fault::park(FaultKind::MemoryManagement)
}

#[exception]
fn BusFault() -> ! {
    fault::park(FaultKind::BusFault)
}

#[exception]
fn UsageFault() -> ! {
    fault::park(FaultKind::UsageFault)
}

#[exception]
unsafe fn DefaultHandler(irqn: i16) {
    fault::park(FaultKind::Unhandled(irqn))
}

#[exception]
fn SVCall() {}

#[exception]
fn DebugMonitor() {}

#[exception]
fn PendSV() {}
