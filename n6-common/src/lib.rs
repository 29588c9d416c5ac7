// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Clock tree, time base and blink logic for the STM32N6 bring-up firmware.
//!
//! This crate supports both `no_std` (embedded) and `std` (host) environments:
//! - Default: `no_std` mode for embedded targets
//! - `std` feature: Enables `std` support for host tests
//! - `embedded` feature: Enables MMIO register access and the halt paths (cortex-m)
//! - `defmt` feature: Logs clock bring-up, blink and fault events

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod blink;
pub mod clock;
pub mod fault;
pub mod gpio;
pub mod rcc;
pub mod regs;
pub mod service;
pub mod tick;

// Re-export commonly used types
pub use blink::{BlinkService, BLINK_THRESHOLD};
pub use clock::CoreClock;
pub use fault::FaultKind;
pub use gpio::{GpioError, PushPullPin, Speed};
pub use rcc::{BusClocks, ClockConfig, ClockSource, PllConfig, PllConfigError, PllSource, Prescaler};
pub use regs::{Port, Reg, Registers};
pub use service::{Service, ServiceContext};
pub use tick::{systick_reload, TickConfigError, TickCounter, TICK_HZ};

#[cfg(feature = "embedded")]
pub use regs::Mmio;
