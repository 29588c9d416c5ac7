// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Register map and register access for the peripherals the firmware touches.
//!
//! Only the handful of RCC, PWR and GPIO registers needed for bring-up are
//! described here. Addresses are the secure aliases of the STM32N6 AHB4
//! peripherals, since the first-stage firmware runs in the secure world.
//!
//! All clock and pin logic goes through the [`Registers`] trait so that it can
//! run against [`Mmio`] on the target and against an in-memory register file
//! on the host.

const RCC_BASE: u32 = 0x5602_8000;
const PWR_BASE: u32 = 0x5602_4800;
const GPIOA_BASE: u32 = 0x5602_0000;
const GPIO_PORT_STRIDE: u32 = 0x400;

/// A register this crate knows how to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reg {
    Rcc(RccReg),
    Pwr(PwrReg),
    Gpio(Port, GpioReg),
}

/// Reset and clock control registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RccReg {
    Cr,
    Cfgr,
    Cfgr2,
    Cier,
    Pll1Cfgr,
    Pll1Divr,
    Ahb4Enr,
}

/// Power controller registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwrReg {
    Vosr,
}

/// GPIO port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl Port {
    const fn index(self) -> u32 {
        self as u32
    }

    /// Enable bit of this port in `RCC_AHB4ENR`.
    pub const fn enable_bit(self) -> u32 {
        1 << self.index()
    }
}

/// Per-port GPIO registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioReg {
    Moder,
    Otyper,
    Ospeedr,
    Pupdr,
    Idr,
    Odr,
    Bsrr,
}

impl Reg {
    /// Absolute address of the register.
    pub const fn addr(self) -> u32 {
        match self {
            Reg::Rcc(r) => {
                RCC_BASE
                    + match r {
                        RccReg::Cr => 0x000,
                        RccReg::Cfgr => 0x020,
                        RccReg::Cfgr2 => 0x024,
                        RccReg::Cier => 0x040,
                        RccReg::Pll1Cfgr => 0x080,
                        RccReg::Pll1Divr => 0x084,
                        RccReg::Ahb4Enr => 0x25C,
                    }
            }
            Reg::Pwr(PwrReg::Vosr) => PWR_BASE + 0x020,
            Reg::Gpio(port, r) => {
                GPIOA_BASE
                    + port.index() * GPIO_PORT_STRIDE
                    + match r {
                        GpioReg::Moder => 0x00,
                        GpioReg::Otyper => 0x04,
                        GpioReg::Ospeedr => 0x08,
                        GpioReg::Pupdr => 0x0C,
                        GpioReg::Idr => 0x10,
                        GpioReg::Odr => 0x14,
                        GpioReg::Bsrr => 0x18,
                    }
            }
        }
    }
}

/// A bit field inside a 32-bit register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub pos: u32,
    pub width: u32,
}

impl Field {
    pub const fn new(pos: u32, width: u32) -> Self {
        Self { pos, width }
    }

    /// Mask of the field in register position.
    pub const fn mask(self) -> u32 {
        (u32::MAX >> (32 - self.width)) << self.pos
    }

    /// Extract the field value from a register value.
    pub const fn get(self, reg: u32) -> u32 {
        (reg & self.mask()) >> self.pos
    }

    /// Return `reg` with the field replaced by `value` (truncated to width).
    pub const fn set(self, reg: u32, value: u32) -> u32 {
        (reg & !self.mask()) | ((value << self.pos) & self.mask())
    }

    /// The field value shifted into register position.
    pub const fn encode(self, value: u32) -> u32 {
        self.set(0, value)
    }
}

/// `RCC_CR` bits.
pub mod cr {
    pub const HSION: u32 = 1 << 0;
    pub const HSIRDY: u32 = 1 << 1;
    pub const HSEON: u32 = 1 << 16;
    pub const HSERDY: u32 = 1 << 17;
    pub const HSEBYP: u32 = 1 << 18;
    pub const CSSON: u32 = 1 << 19;
    pub const PLL1ON: u32 = 1 << 24;
    pub const PLL1RDY: u32 = 1 << 25;
}

/// `RCC_CFGR` fields.
pub mod cfgr {
    use super::Field;

    /// System clock switch.
    pub const SW: Field = Field::new(0, 2);
    /// System clock switch status.
    pub const SWS: Field = Field::new(2, 2);
}

/// `RCC_CFGR2` bus prescaler fields.
pub mod cfgr2 {
    use super::Field;

    pub const HPRE: Field = Field::new(0, 3);
    pub const PPRE1: Field = Field::new(4, 3);
    pub const PPRE2: Field = Field::new(8, 3);
}

/// `RCC_PLL1CFGR` fields.
pub mod pll1cfgr {
    use super::Field;

    pub const PLL1SRC: Field = Field::new(0, 2);
    pub const PLL1RGE: Field = Field::new(2, 2);
    /// Reference divider, stored as M - 1.
    pub const PLL1M: Field = Field::new(4, 6);
}

/// `RCC_PLL1DIVR` fields.
pub mod pll1divr {
    use super::Field;

    /// Multiplier, stored as N - 1.
    pub const N1: Field = Field::new(0, 9);
    /// Output divider, stored as P - 1.
    pub const P1: Field = Field::new(9, 7);
}

/// `RCC_AHB4ENR` bits. GPIO ports occupy bits 0..=7, see [`super::Port::enable_bit`].
pub mod ahb4enr {
    pub const PWREN: u32 = 1 << 18;
}

/// `PWR_VOSR` bits.
pub mod vosr {
    /// Set for voltage scale 0, clear for scale 1.
    pub const VOS: u32 = 1 << 0;
    pub const VOSRDY: u32 = 1 << 1;
}

/// Register-level read/write access.
pub trait Registers {
    fn read(&self, reg: Reg) -> u32;

    fn write(&mut self, reg: Reg, value: u32);

    /// Read-modify-write.
    fn modify<F>(&mut self, reg: Reg, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        let value = self.read(reg);
        self.write(reg, f(value));
    }

    /// Spin until `ready` holds for the register value. There is no timeout.
    fn wait_until<F>(&self, reg: Reg, ready: F)
    where
        F: Fn(u32) -> bool,
    {
        while !ready(self.read(reg)) {
            core::hint::spin_loop();
        }
    }
}

impl<R: Registers + ?Sized> Registers for &mut R {
    fn read(&self, reg: Reg) -> u32 {
        (**self).read(reg)
    }

    fn write(&mut self, reg: Reg, value: u32) {
        (**self).write(reg, value)
    }
}

/// Volatile memory-mapped access to the real peripherals.
#[cfg(feature = "embedded")]
#[derive(Clone, Copy)]
pub struct Mmio {
    _private: (),
}

#[cfg(feature = "embedded")]
impl Mmio {
    /// # Safety
    /// Every copy aliases the same hardware. The caller must make sure no two
    /// contexts touch the same register concurrently.
    pub unsafe fn steal() -> Self {
        Self { _private: () }
    }
}

#[cfg(feature = "embedded")]
impl Registers for Mmio {
    fn read(&self, reg: Reg) -> u32 {
        unsafe { (reg.addr() as *const u32).read_volatile() }
    }

    fn write(&mut self, reg: Reg, value: u32) {
        unsafe { (reg.addr() as *mut u32).write_volatile(value) }
    }
}
