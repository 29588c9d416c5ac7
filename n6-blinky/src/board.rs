// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! STM32N6570-DK board wiring.

use cortex_m::peripheral::scb::SystemHandler;
use cortex_m::peripheral::syst::SystClkSource;
use n6_common::{
    rcc, systick_reload, GpioError, Mmio, Port, PushPullPin, Speed, TickConfigError, TICK_HZ,
};

/// User LED (LD1) on PB0.
const LED_PORT: Port = Port::B;
const LED_PIN: u8 = 0;

/// Lowest priority on a core implementing 4 priority bits.
const SYSTICK_PRIORITY: u8 = 0xF0;

pub type Led = PushPullPin<Mmio>;

/// Clock the LED port and drive the LED pin as a push-pull output.
pub fn init_led(mut regs: Mmio) -> Result<Led, GpioError> {
    rcc::enable_gpio_clock(&mut regs, LED_PORT);
    PushPullPin::new(regs, LED_PORT, LED_PIN, Speed::High)
}

/// Start the 1 kHz SysTick interrupt from the core clock.
pub fn start_systick(core: &mut cortex_m::Peripherals, core_hz: u32) -> Result<(), TickConfigError> {
    let reload = systick_reload(core_hz, TICK_HZ)?;

    // SAFETY: priority is set before the interrupt is enabled.
    unsafe { core.SCB.set_priority(SystemHandler::SysTick, SYSTICK_PRIORITY) };

    let syst = &mut core.SYST;
    syst.set_clock_source(SystClkSource::Core);
    syst.set_reload(reload);
    syst.clear_current();
    syst.enable_interrupt();
    syst.enable_counter();

    defmt::debug!("SysTick: reload {} at {} Hz core", reload, core_hz);
    Ok(())
}
