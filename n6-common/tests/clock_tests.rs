// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Clock tree configuration and core frequency tracking.

mod common;

use common::FakeRegisters;
use n6_common::rcc::{self, HSE_HZ, HSI_HZ};
use n6_common::regs::{ahb4enr, cfgr, cfgr2, cr, pll1cfgr, pll1divr, vosr, PwrReg, RccReg};
use n6_common::{ClockConfig, ClockSource, CoreClock, PllConfig, PllConfigError, PllSource, Port, Reg};

const CR: Reg = Reg::Rcc(RccReg::Cr);
const CFGR: Reg = Reg::Rcc(RccReg::Cfgr);
const CFGR2: Reg = Reg::Rcc(RccReg::Cfgr2);
const CIER: Reg = Reg::Rcc(RccReg::Cier);
const PLL1CFGR: Reg = Reg::Rcc(RccReg::Pll1Cfgr);
const PLL1DIVR: Reg = Reg::Rcc(RccReg::Pll1Divr);
const AHB4ENR: Reg = Reg::Rcc(RccReg::Ahb4Enr);
const VOSR: Reg = Reg::Pwr(PwrReg::Vosr);

/// Registers as left by firmware that selected PLL1 with the given fields.
fn pll_selected(src: u32, m: u32, n: u32, p: u32) -> FakeRegisters {
    let mut regs = FakeRegisters::new();
    regs.preload(
        PLL1CFGR,
        pll1cfgr::PLL1SRC.encode(src) | pll1cfgr::PLL1M.encode(m - 1),
    );
    regs.preload(
        PLL1DIVR,
        pll1divr::N1.encode(n - 1) | pll1divr::P1.encode(p - 1),
    );
    regs.preload(CFGR, cfgr::SWS.encode(ClockSource::Pll1.bits()));
    regs
}

#[test]
fn test_core_clock_starts_at_hsi() {
    let clock = CoreClock::new();
    assert_eq!(clock.get(), 64_000_000);
}

#[test]
fn test_update_reset_state_is_hsi() {
    let regs = FakeRegisters::new();
    let clock = CoreClock::new();
    clock.set(1);

    assert_eq!(clock.update(&regs), HSI_HZ);
    assert_eq!(clock.get(), HSI_HZ);
}

#[test]
fn test_update_hse_selected() {
    let mut regs = FakeRegisters::new();
    regs.preload(CFGR, cfgr::SWS.encode(ClockSource::Hse.bits()));

    let clock = CoreClock::new();
    assert_eq!(clock.update(&regs), 25_000_000);
}

#[test]
fn test_update_pll_from_hse_target_fields() {
    let regs = pll_selected(1, 5, 160, 2);
    let clock = CoreClock::new();

    assert_eq!(clock.update(&regs), 400_000_000);
}

#[test]
fn test_update_pll_from_hsi() {
    let regs = pll_selected(0, 5, 160, 2);
    let clock = CoreClock::new();

    assert_eq!(clock.update(&regs), 1_024_000_000);
}

#[test]
fn test_update_pll_truncates_in_order() {
    // (25_000_000 / 3) * 100 / 3, not 25_000_000 * 100 / 9
    let regs = pll_selected(1, 3, 100, 3);

    assert_eq!(rcc::sysclk_from_registers(&regs), 277_777_766);
    assert_ne!(rcc::sysclk_from_registers(&regs), 25_000_000 * 100 / 9);
}

#[test]
fn test_update_any_nonzero_pll_source_is_hse() {
    let regs = pll_selected(3, 5, 160, 2);

    assert_eq!(rcc::sysclk_from_registers(&regs), 400_000_000);
}

#[test]
fn test_update_reserved_selector_falls_back_to_hsi() {
    let mut regs = pll_selected(1, 5, 160, 2);
    regs.preload(CFGR, cfgr::SWS.encode(3));

    assert_eq!(rcc::active_source(&regs), None);
    assert_eq!(rcc::sysclk_from_registers(&regs), HSI_HZ);
}

#[test]
fn test_pll_config_rejects_out_of_range() {
    assert_eq!(
        PllConfig::new(PllSource::Hse, 0, 160, 2),
        Err(PllConfigError::MOutOfRange(0))
    );
    assert_eq!(
        PllConfig::new(PllSource::Hse, 65, 160, 2),
        Err(PllConfigError::MOutOfRange(65))
    );
    assert_eq!(
        PllConfig::new(PllSource::Hse, 5, 513, 2),
        Err(PllConfigError::NOutOfRange(513))
    );
    assert_eq!(
        PllConfig::new(PllSource::Hse, 5, 160, 0),
        Err(PllConfigError::POutOfRange(0))
    );
    assert!(PllConfig::new(PllSource::Hsi, 64, 512, 128).is_ok());
}

#[test]
fn test_target_bus_clocks() {
    let clocks = ClockConfig::TARGET.bus_clocks();

    assert_eq!(clocks.sysclk, 400_000_000);
    assert_eq!(clocks.hclk, 400_000_000);
    assert_eq!(clocks.pclk1, 50_000_000);
    assert_eq!(clocks.pclk2, 100_000_000);
}

#[test]
fn test_configure_reaches_pll_at_400_mhz() {
    let mut regs = FakeRegisters::new();
    let clock = CoreClock::new();

    let clocks = rcc::configure(&mut regs, &ClockConfig::TARGET, &clock);

    assert_eq!(clocks.sysclk, 400_000_000);
    assert_eq!(clock.get(), 400_000_000);
    assert_eq!(rcc::active_source(&regs), Some(ClockSource::Pll1));

    let cr_value = regs.value(CR);
    assert_ne!(cr_value & cr::HSEON, 0);
    assert_ne!(cr_value & cr::PLL1ON, 0);
    assert_ne!(regs.value(AHB4ENR) & ahb4enr::PWREN, 0);
    assert_ne!(regs.value(VOSR) & vosr::VOS, 0);
}

#[test]
fn test_configure_encodes_fields_minus_one() {
    let mut regs = FakeRegisters::new();
    rcc::configure(&mut regs, &ClockConfig::TARGET, &CoreClock::new());

    let cfg = regs.value(PLL1CFGR);
    let div = regs.value(PLL1DIVR);
    assert_eq!(pll1cfgr::PLL1M.get(cfg), 4);
    assert_eq!(pll1cfgr::PLL1SRC.get(cfg), PllSource::Hse.bits());
    assert_eq!(pll1cfgr::PLL1RGE.get(cfg), 2);
    assert_eq!(pll1divr::N1.get(div), 159);
    assert_eq!(pll1divr::P1.get(div), 1);

    let prescalers = regs.value(CFGR2);
    assert_eq!(cfgr2::HPRE.get(prescalers), 0);
    assert_eq!(cfgr2::PPRE1.get(prescalers), 3);
    assert_eq!(cfgr2::PPRE2.get(prescalers), 2);
}

#[test]
fn test_configure_agrees_with_register_readback() {
    let mut regs = FakeRegisters::new();
    let clock = CoreClock::new();
    let configured = rcc::configure(&mut regs, &ClockConfig::TARGET, &clock);

    assert_eq!(rcc::bus_clocks_from_registers(&regs), configured);
    assert_eq!(clock.update(&regs), configured.sysclk);
}

#[test]
fn test_configure_stage_order() {
    let mut regs = FakeRegisters::new();
    rcc::configure(&mut regs, &ClockConfig::TARGET, &CoreClock::new());

    let vos = regs.first_write(VOSR).unwrap();
    let hse_on = regs.first_write_setting(CR, cr::HSEON).unwrap();
    let divr = regs.first_write(PLL1DIVR).unwrap();
    let pllcfg = regs.first_write(PLL1CFGR).unwrap();
    let pll_on = regs.first_write_setting(CR, cr::PLL1ON).unwrap();
    let prescalers = regs.first_write(CFGR2).unwrap();
    let switch = regs.first_write(CFGR).unwrap();

    assert!(vos < hse_on);
    assert!(hse_on < divr);
    assert!(divr < pll_on && pllcfg < pll_on);
    assert!(pll_on < prescalers);
    assert!(prescalers < switch);
}

#[test]
fn test_configure_from_hsi_leaves_hse_off() {
    let config = ClockConfig {
        pll: PllConfig::new(PllSource::Hsi, 8, 100, 2).unwrap(),
        ..ClockConfig::TARGET
    };
    let mut regs = FakeRegisters::new();
    let clock = CoreClock::new();

    let clocks = rcc::configure(&mut regs, &config, &clock);

    assert_eq!(clocks.sysclk, 400_000_000);
    assert_eq!(regs.value(CR) & cr::HSEON, 0);
    assert_eq!(clock.update(&regs), 400_000_000);
}

#[test]
fn test_reset_clock_tree() {
    let mut regs = FakeRegisters::new();
    rcc::configure(&mut regs, &ClockConfig::TARGET, &CoreClock::new());
    regs.preload(CR, regs.value(CR) | cr::CSSON | cr::HSEBYP);
    regs.preload(CIER, 0xFF);

    rcc::reset_clock_tree(&mut regs);

    let cr_value = regs.value(CR);
    assert_ne!(cr_value & cr::HSION, 0);
    assert_eq!(cr_value & (cr::HSEON | cr::CSSON | cr::HSEBYP), 0);
    assert_eq!(regs.value(CFGR), 0);
    assert_eq!(regs.value(PLL1CFGR), 0);
    assert_eq!(regs.value(CIER), 0);
    assert_eq!(rcc::sysclk_from_registers(&regs), HSI_HZ);
}

#[test]
fn test_switch_back_to_hse() {
    let mut regs = FakeRegisters::new();
    rcc::configure(&mut regs, &ClockConfig::TARGET, &CoreClock::new());

    rcc::switch_sysclk(&mut regs, ClockSource::Hse);

    assert_eq!(rcc::sysclk_from_registers(&regs), HSE_HZ);
}

#[test]
fn test_enable_gpio_clock() {
    let mut regs = FakeRegisters::new();
    rcc::enable_gpio_clock(&mut regs, Port::B);
    rcc::enable_gpio_clock(&mut regs, Port::A);

    assert_eq!(regs.value(AHB4ENR), 0b11);
}

#[test]
fn test_pll_settings_reach_configure_only_when_they_fit_their_fields() {
    let candidates = [
        (0, 160, 2),
        (100, 160, 2),
        (64, 160, 2),
        (5, 0, 2),
        (5, 600, 2),
        (5, 512, 128),
        (5, 160, 0),
        (5, 160, 200),
        (1, 8, 2),
    ];

    for (m, n, p) in candidates {
        let Ok(pll) = PllConfig::new(PllSource::Hse, m, n, p) else {
            continue;
        };
        assert_eq!((pll.m(), pll.n(), pll.p()), (m, n, p));
        assert_eq!(pll.source(), PllSource::Hse);

        let config = ClockConfig {
            pll,
            ..ClockConfig::TARGET
        };
        let mut regs = FakeRegisters::new();
        let clock = CoreClock::new();
        rcc::configure(&mut regs, &config, &clock);

        assert_eq!(
            rcc::sysclk_from_registers(&regs),
            clock.get(),
            "M={m} N={n} P={p}"
        );
    }

    assert_eq!(
        PllConfig::new(PllSource::Hse, 100, 160, 2),
        Err(PllConfigError::MOutOfRange(100))
    );
    assert_eq!(
        PllConfig::new(PllSource::Hse, 5, 160, 200),
        Err(PllConfigError::POutOfRange(200))
    );
}
