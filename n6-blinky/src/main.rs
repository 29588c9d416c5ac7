// Copyright (c) 2026 ADNT Sarl <info@adnt.io>
// SPDX-License-Identifier: MIT

#![no_std]
#![no_main]

mod board;
mod handlers;

use defmt_rtt as _;
use panic_probe as _;

defmt::timestamp!("{=u64:us}", { 0 });

use cortex_m_rt::entry;
use n6_common::{
    fault, rcc, BlinkService, ClockConfig, CoreClock, Mmio, Service, ServiceContext,
    TickCounter, BLINK_THRESHOLD,
};

/// Core clock in Hz. Written during clock bring-up only.
pub static CORE_CLOCK: CoreClock = CoreClock::new();

/// Milliseconds since the last LED toggle. Incremented by SysTick, reset by
/// the blink loop.
pub static TICKS: TickCounter = TickCounter::new();

#[entry]
fn main() -> ! {
    defmt::println!("n6-blinky {} started", env!("N6_BLINKY_VERSION"));

    let Some(mut core) = cortex_m::Peripherals::take() else {
        defmt::error!("Core peripherals already taken");
        fault::halt();
    };
    // SAFETY: the foreground thread is the only user of RCC, PWR and GPIO.
    let mut regs = unsafe { Mmio::steal() };

    rcc::reset_clock_tree(&mut regs);
    let clocks = rcc::configure(&mut regs, &ClockConfig::TARGET, &CORE_CLOCK);
    defmt::println!(
        "Clocks: SYSCLK {} Hz, HCLK {} Hz, PCLK1 {} Hz, PCLK2 {} Hz",
        clocks.sysclk,
        clocks.hclk,
        clocks.pclk1,
        clocks.pclk2
    );

    let mut led = match board::init_led(regs) {
        Ok(led) => led,
        Err(e) => {
            defmt::error!("LED pin configuration failed: {:?}", e);
            fault::halt();
        }
    };

    if let Err(e) = board::start_systick(&mut core, CORE_CLOCK.get()) {
        defmt::error!("SysTick configuration failed: {:?}", e);
        fault::halt();
    }

    defmt::println!("Blinking LED every {} ticks", BLINK_THRESHOLD);

    let mut blink = BlinkService::new(BLINK_THRESHOLD);
    let mut ctx = ServiceContext {
        peripherals: &mut led,
        ticks: &TICKS,
    };

    loop {
        blink.process(&mut ctx);
    }
}
