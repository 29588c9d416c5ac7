// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! In-memory register file that raises ready flags the way the silicon does.

#![allow(dead_code)]

use std::collections::HashMap;

use n6_common::regs::{cfgr, cr, vosr, GpioReg, PwrReg, RccReg};
use n6_common::{Reg, Registers};

#[derive(Default)]
pub struct FakeRegisters {
    values: HashMap<Reg, u32>,
    pub writes: Vec<(Reg, u32)>,
}

impl FakeRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a register without recording a write or reacting to it.
    pub fn preload(&mut self, reg: Reg, value: u32) {
        self.values.insert(reg, value);
    }

    pub fn value(&self, reg: Reg) -> u32 {
        self.values.get(&reg).copied().unwrap_or(0)
    }

    /// Index of the first write to `reg`, if any.
    pub fn first_write(&self, reg: Reg) -> Option<usize> {
        self.writes.iter().position(|(r, _)| *r == reg)
    }

    /// Index of the first write to `reg` with `bits` set.
    pub fn first_write_setting(&self, reg: Reg, bits: u32) -> Option<usize> {
        self.writes
            .iter()
            .position(|(r, v)| *r == reg && v & bits == bits)
    }

    fn react(&mut self, reg: Reg, value: u32) -> u32 {
        match reg {
            Reg::Rcc(RccReg::Cr) => {
                let mut v = value & !(cr::HSIRDY | cr::HSERDY | cr::PLL1RDY);
                if v & cr::HSION != 0 {
                    v |= cr::HSIRDY;
                }
                if v & cr::HSEON != 0 {
                    v |= cr::HSERDY;
                }
                if v & cr::PLL1ON != 0 {
                    v |= cr::PLL1RDY;
                }
                v
            }
            Reg::Rcc(RccReg::Cfgr) => cfgr::SWS.set(value, cfgr::SW.get(value)),
            Reg::Pwr(PwrReg::Vosr) => value | vosr::VOSRDY,
            Reg::Gpio(port, GpioReg::Bsrr) => {
                let odr = Reg::Gpio(port, GpioReg::Odr);
                let set = value & 0xFFFF;
                let reset = value >> 16;
                let level = (self.value(odr) & !reset) | set;
                self.values.insert(odr, level);
                0
            }
            _ => value,
        }
    }
}

impl Registers for FakeRegisters {
    fn read(&self, reg: Reg) -> u32 {
        self.value(reg)
    }

    fn write(&mut self, reg: Reg, value: u32) {
        self.writes.push((reg, value));
        let stored = self.react(reg, value);
        self.values.insert(reg, stored);
    }
}
