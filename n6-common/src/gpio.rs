// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Push-pull GPIO output over raw registers.

use core::convert::Infallible;
use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

use crate::regs::{Field, GpioReg, Port, Reg, Registers};

const MODE_OUTPUT: u32 = 0b01;
const PULL_NONE: u32 = 0b00;
const PINS_PER_PORT: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// A port has pins 0..=15 only.
    InvalidPin(u8),
}

/// Output slew rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    Low = 0,
    Medium = 1,
    High = 2,
    VeryHigh = 3,
}

/// A single pin configured as push-pull output with no pull resistor.
pub struct PushPullPin<R> {
    regs: R,
    port: Port,
    pin: u8,
}

impl<R: Registers> PushPullPin<R> {
    /// Configure `port`/`pin` as output. The port clock must already be on.
    ///
    /// Registers are left untouched when `pin` does not exist.
    pub fn new(mut regs: R, port: Port, pin: u8, speed: Speed) -> Result<Self, GpioError> {
        if pin >= PINS_PER_PORT {
            return Err(GpioError::InvalidPin(pin));
        }
        let two_bits = Field::new(u32::from(pin) * 2, 2);

        regs.modify(Reg::Gpio(port, GpioReg::Ospeedr), |v| two_bits.set(v, speed as u32));
        regs.modify(Reg::Gpio(port, GpioReg::Otyper), |v| v & !(1 << pin));
        regs.modify(Reg::Gpio(port, GpioReg::Pupdr), |v| two_bits.set(v, PULL_NONE));
        regs.modify(Reg::Gpio(port, GpioReg::Moder), |v| two_bits.set(v, MODE_OUTPUT));

        Ok(Self { regs, port, pin })
    }

    pub fn port(&self) -> Port {
        self.port
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }

    pub fn release(self) -> R {
        self.regs
    }

    fn output_bit(&self) -> bool {
        self.regs.read(Reg::Gpio(self.port, GpioReg::Odr)) & (1 << self.pin) != 0
    }
}

impl<R> ErrorType for PushPullPin<R> {
    type Error = Infallible;
}

impl<R: Registers> OutputPin for PushPullPin<R> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.regs
            .write(Reg::Gpio(self.port, GpioReg::Bsrr), 1 << (self.pin + 16));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.regs
            .write(Reg::Gpio(self.port, GpioReg::Bsrr), 1 << self.pin);
        Ok(())
    }
}

impl<R: Registers> StatefulOutputPin for PushPullPin<R> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.output_bit())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.output_bit())
    }

    /// One `BSRR` write derived from the current `ODR` level.
    fn toggle(&mut self) -> Result<(), Self::Error> {
        if self.output_bit() {
            self.set_low()
        } else {
            self.set_high()
        }
    }
}
