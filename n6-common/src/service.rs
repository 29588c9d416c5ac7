// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Work items driven by the foreground polling loop.
//!
//! The loop owns every service outright and polls them back to back with no
//! sleep. Interrupt context only ever touches the [`TickCounter`].

use crate::tick::TickCounter;

/// What a service sees on each poll: the peripherals it drives and the tick
/// count shared with SysTick.
pub struct ServiceContext<'a, P> {
    pub peripherals: &'a mut P,
    pub ticks: &'a TickCounter,
}

/// A unit of foreground work.
pub trait Service<P> {
    /// Poll once. Must return promptly; the loop calls it again right away.
    fn process(&mut self, ctx: &mut ServiceContext<P>);
}
