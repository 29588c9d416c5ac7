// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Clock tree configuration.
//!
//! The reset state runs the core from the 64 MHz internal oscillator (HSI).
//! [`configure`] moves it to the 25 MHz external crystal (HSE) feeding PLL1:
//!
//!   1. voltage scale 0, wait `VOSRDY`
//!   2. HSE on, wait `HSERDY`
//!   3. program PLL1 dividers and source
//!   4. PLL1 on, wait `PLL1RDY`
//!   5. bus prescalers
//!   6. switch SYSCLK to PLL1, wait until `SWS` reports it
//!
//! None of the waits time out. A ready flag that never asserts is a hardware
//! fault and leaves the core spinning.

use crate::clock::CoreClock;
use crate::regs::{ahb4enr, cfgr, cfgr2, cr, pll1cfgr, pll1divr, vosr, Port};
use crate::regs::{PwrReg, RccReg, Reg, Registers};

/// Internal oscillator frequency.
pub const HSI_HZ: u32 = 64_000_000;
/// External crystal frequency on the discovery kit.
pub const HSE_HZ: u32 = 25_000_000;

const CR: Reg = Reg::Rcc(RccReg::Cr);
const CFGR: Reg = Reg::Rcc(RccReg::Cfgr);
const CFGR2: Reg = Reg::Rcc(RccReg::Cfgr2);
const CIER: Reg = Reg::Rcc(RccReg::Cier);
const PLL1CFGR: Reg = Reg::Rcc(RccReg::Pll1Cfgr);
const PLL1DIVR: Reg = Reg::Rcc(RccReg::Pll1Divr);
const AHB4ENR: Reg = Reg::Rcc(RccReg::Ahb4Enr);
const VOSR: Reg = Reg::Pwr(PwrReg::Vosr);

/// System clock source, as encoded in `SW`/`SWS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    Hsi = 0,
    Hse = 1,
    Pll1 = 2,
}

impl ClockSource {
    pub const fn bits(self) -> u32 {
        self as u32
    }

    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            0 => Some(Self::Hsi),
            1 => Some(Self::Hse),
            2 => Some(Self::Pll1),
            _ => None,
        }
    }
}

/// PLL reference input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PllSource {
    Hsi = 0,
    Hse = 1,
}

impl PllSource {
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Frequency of the oscillator feeding the PLL.
    pub const fn hz(self) -> u32 {
        match self {
            Self::Hsi => HSI_HZ,
            Self::Hse => HSE_HZ,
        }
    }
}

/// Invalid PLL divider or multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PllConfigError {
    MOutOfRange(u32),
    NOutOfRange(u32),
    POutOfRange(u32),
}

/// PLL1 settings in user terms (the registers hold each value minus one).
///
/// Only [`PllConfig::new`] builds one, so every value fits its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PllConfig {
    source: PllSource,
    m: u32,
    n: u32,
    p: u32,
}

impl PllConfig {
    pub const fn new(source: PllSource, m: u32, n: u32, p: u32) -> Result<Self, PllConfigError> {
        if m == 0 || m > field_limit(pll1cfgr::PLL1M.width) {
            return Err(PllConfigError::MOutOfRange(m));
        }
        if n == 0 || n > field_limit(pll1divr::N1.width) {
            return Err(PllConfigError::NOutOfRange(n));
        }
        if p == 0 || p > field_limit(pll1divr::P1.width) {
            return Err(PllConfigError::POutOfRange(p));
        }
        Ok(Self { source, m, n, p })
    }

    pub const fn source(&self) -> PllSource {
        self.source
    }

    pub const fn m(&self) -> u32 {
        self.m
    }

    pub const fn n(&self) -> u32 {
        self.n
    }

    pub const fn p(&self) -> u32 {
        self.p
    }

    /// Frequency after the reference divider.
    pub const fn reference_hz(&self) -> u32 {
        self.source.hz() / self.m
    }

    /// `PLL1RGE` value for the reference frequency.
    pub const fn input_range(&self) -> u32 {
        match self.reference_hz() {
            0..=1_999_999 => 0,
            2_000_000..=3_999_999 => 1,
            4_000_000..=7_999_999 => 2,
            _ => 3,
        }
    }

    pub fn output_hz(&self) -> u32 {
        pll_output_hz(self.source.hz(), self.m, self.n, self.p)
    }
}

/// Largest value a field of `width` bits can hold once offset by one.
const fn field_limit(width: u32) -> u32 {
    1 << width
}

/// `base / m * n / p`, truncating after every step and in that order.
///
/// Intermediates are widened so a large `n` cannot wrap; a result above
/// `u32::MAX` saturates.
pub fn pll_output_hz(base_hz: u32, m: u32, n: u32, p: u32) -> u32 {
    if m == 0 || p == 0 {
        return 0;
    }
    let hz = u64::from(base_hz / m) * u64::from(n) / u64::from(p);
    u32::try_from(hz).unwrap_or(u32::MAX)
}

/// Power-of-two bus divider. Register encoding `k` divides by `2^k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prescaler {
    Div1 = 0,
    Div2 = 1,
    Div4 = 2,
    Div8 = 3,
    Div16 = 4,
    Div32 = 5,
    Div64 = 6,
    Div128 = 7,
}

impl Prescaler {
    pub const fn bits(self) -> u32 {
        self as u32
    }

    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0x7 {
            0 => Self::Div1,
            1 => Self::Div2,
            2 => Self::Div4,
            3 => Self::Div8,
            4 => Self::Div16,
            5 => Self::Div32,
            6 => Self::Div64,
            _ => Self::Div128,
        }
    }

    pub const fn divide(self, hz: u32) -> u32 {
        hz >> self.bits()
    }
}

/// Core voltage range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VoltageScale {
    /// High performance, required above 600 MHz PLL output.
    Scale0,
    Scale1,
}

/// Frequencies of the core and peripheral buses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusClocks {
    pub sysclk: u32,
    pub hclk: u32,
    pub pclk1: u32,
    pub pclk2: u32,
}

impl BusClocks {
    pub const fn derive(sysclk: u32, ahb: Prescaler, apb1: Prescaler, apb2: Prescaler) -> Self {
        let hclk = ahb.divide(sysclk);
        Self {
            sysclk,
            hclk,
            pclk1: apb1.divide(hclk),
            pclk2: apb2.divide(hclk),
        }
    }
}

/// Complete clock tree configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    pub pll: PllConfig,
    pub ahb: Prescaler,
    pub apb1: Prescaler,
    pub apb2: Prescaler,
    pub voltage_scale: VoltageScale,
}

impl ClockConfig {
    /// HSE 25 MHz / 5 * 160 = 800 MHz VCO, / 2 = 400 MHz SYSCLK.
    pub const TARGET: Self = Self {
        pll: match PllConfig::new(PllSource::Hse, 5, 160, 2) {
            Ok(pll) => pll,
            Err(_) => panic!("invalid PLL1 target"),
        },
        ahb: Prescaler::Div1,
        apb1: Prescaler::Div8,
        apb2: Prescaler::Div4,
        voltage_scale: VoltageScale::Scale0,
    };

    pub fn sysclk(&self) -> u32 {
        self.pll.output_hz()
    }

    pub fn bus_clocks(&self) -> BusClocks {
        BusClocks::derive(self.sysclk(), self.ahb, self.apb1, self.apb2)
    }
}

/// Put the clock tree back to its reset state: HSI on, SYSCLK on HSI,
/// HSE and PLL1 configuration cleared, clock interrupts masked.
pub fn reset_clock_tree<R: Registers>(regs: &mut R) {
    regs.modify(CR, |v| v | cr::HSION);
    regs.write(CFGR, 0);
    regs.modify(CR, |v| v & !(cr::HSEON | cr::CSSON | cr::HSEBYP));
    regs.write(PLL1CFGR, 0);
    regs.write(CIER, 0);
}

/// Enable the AHB4 clock of a GPIO port.
pub fn enable_gpio_clock<R: Registers>(regs: &mut R, port: Port) {
    regs.modify(AHB4ENR, |v| v | port.enable_bit());
}

/// Bring the clock tree to `config`, store the new core frequency in
/// `core_clock` and return the resulting bus clocks.
pub fn configure<R: Registers>(regs: &mut R, config: &ClockConfig, core_clock: &CoreClock) -> BusClocks {
    regs.modify(AHB4ENR, |v| v | ahb4enr::PWREN);
    set_voltage_scale(regs, config.voltage_scale);

    if config.pll.source() == PllSource::Hse {
        regs.modify(CR, |v| v | cr::HSEON);
        regs.wait_until(CR, |v| v & cr::HSERDY != 0);
        #[cfg(feature = "defmt")]
        defmt::debug!("RCC: HSE ready");
    }

    let pll = &config.pll;
    regs.write(
        PLL1DIVR,
        pll1divr::N1.encode(pll.n - 1) | pll1divr::P1.encode(pll.p - 1),
    );
    regs.write(
        PLL1CFGR,
        pll1cfgr::PLL1RGE.encode(pll.input_range())
            | pll1cfgr::PLL1M.encode(pll.m - 1)
            | pll1cfgr::PLL1SRC.encode(pll.source.bits()),
    );

    regs.modify(CR, |v| v | cr::PLL1ON);
    regs.wait_until(CR, |v| v & cr::PLL1RDY != 0);
    #[cfg(feature = "defmt")]
    defmt::debug!("RCC: PLL1 locked (M={} N={} P={})", pll.m, pll.n, pll.p);

    regs.write(
        CFGR2,
        cfgr2::HPRE.encode(config.ahb.bits())
            | cfgr2::PPRE1.encode(config.apb1.bits())
            | cfgr2::PPRE2.encode(config.apb2.bits()),
    );

    switch_sysclk(regs, ClockSource::Pll1);

    let clocks = config.bus_clocks();
    core_clock.set(clocks.sysclk);
    #[cfg(feature = "defmt")]
    defmt::debug!("RCC: SYSCLK on PLL1 at {=u32} Hz", clocks.sysclk);
    clocks
}

fn set_voltage_scale<R: Registers>(regs: &mut R, scale: VoltageScale) {
    regs.modify(VOSR, |v| match scale {
        VoltageScale::Scale0 => v | vosr::VOS,
        VoltageScale::Scale1 => v & !vosr::VOS,
    });
    regs.wait_until(VOSR, |v| v & vosr::VOSRDY != 0);
}

/// Select the SYSCLK source and wait for the switch to take effect.
pub fn switch_sysclk<R: Registers>(regs: &mut R, source: ClockSource) {
    regs.modify(CFGR, |v| cfgr::SW.set(v, source.bits()));
    regs.wait_until(CFGR, |v| cfgr::SWS.get(v) == source.bits());
}

/// SYSCLK source currently reported by `SWS`, `None` for a reserved value.
pub fn active_source<R: Registers>(regs: &R) -> Option<ClockSource> {
    ClockSource::from_bits(cfgr::SWS.get(regs.read(CFGR)))
}

/// Core frequency derived from the current register state.
///
/// A reserved `SWS` value falls back to the HSI frequency, as does the reset
/// state.
pub fn sysclk_from_registers<R: Registers>(regs: &R) -> u32 {
    match active_source(regs) {
        Some(ClockSource::Hsi) => HSI_HZ,
        Some(ClockSource::Hse) => HSE_HZ,
        Some(ClockSource::Pll1) => {
            let cfg = regs.read(PLL1CFGR);
            let div = regs.read(PLL1DIVR);
            let base = match pll1cfgr::PLL1SRC.get(cfg) {
                0 => HSI_HZ,
                _ => HSE_HZ,
            };
            let m = pll1cfgr::PLL1M.get(cfg) + 1;
            let n = pll1divr::N1.get(div) + 1;
            let p = pll1divr::P1.get(div) + 1;
            pll_output_hz(base, m, n, p)
        }
        None => HSI_HZ,
    }
}

/// Core and bus frequencies derived from the current register state.
pub fn bus_clocks_from_registers<R: Registers>(regs: &R) -> BusClocks {
    let prescalers = regs.read(CFGR2);
    BusClocks::derive(
        sysclk_from_registers(regs),
        Prescaler::from_bits(cfgr2::HPRE.get(prescalers)),
        Prescaler::from_bits(cfgr2::PPRE1.get(prescalers)),
        Prescaler::from_bits(cfgr2::PPRE2.get(prescalers)),
    )
}
