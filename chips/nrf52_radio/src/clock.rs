// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Clock peripheral driver, nRF52
//!
//! The radio needs the high frequency crystal oscillator (HFXO) running;
//! the internal RC oscillator is not accurate enough for 2.4 GHz operation.
//! [`bootstrap`] brings up supply and clock once, before any radio access.

use tock_registers::interfaces::{Readable, Writeable};

use crate::bus::RegisterBus;
use crate::error::RadioError;
use crate::poll::{self, PollLimit};
use crate::power::Power;
use crate::registers::{ClockRegisters, Event, Task};

pub struct Clock<'a, B: RegisterBus> {
    registers: ClockRegisters<'a, B>,
}

impl<'a, B: RegisterBus> Clock<'a, B> {
    pub const fn new(bus: &'a B) -> Self {
        Clock {
            registers: ClockRegisters::new(bus),
        }
    }

    pub fn high_start(&self) {
        self.registers.events_hfclkstarted.set(0);
        self.registers.tasks_hfclkstart.write(Task::ENABLE::SET);
    }

    pub fn high_started(&self) -> bool {
        self.registers.events_hfclkstarted.is_set(Event::READY)
    }

    /// Start the HFXO and wait until the hardware confirms it is running.
    pub fn high_start_and_wait(&self, limit: PollLimit) -> Result<(), RadioError> {
        self.high_start();
        poll::wait_for(&self.registers.events_hfclkstarted, limit, |event| {
            event.is_set(Event::READY)
        })
        .map(|_| ())
        .ok_or(RadioError::ClockStartTimeout)
    }
}

/// Enable the DC/DC regulator and start the HFXO.
///
/// On `Ok(())` the high frequency clock is stable enough for the radio.
pub fn bootstrap<B: RegisterBus>(bus: &B, limit: PollLimit) -> Result<(), RadioError> {
    Power::new(bus).enable_dcdc();
    Clock::new(bus).high_start_and_wait(limit)
}
