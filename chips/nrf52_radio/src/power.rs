// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Power management

use tock_registers::interfaces::Writeable;

use crate::bus::RegisterBus;
use crate::registers::{DcDcEn, PowerRegisters};

pub struct Power<'a, B: RegisterBus> {
    registers: PowerRegisters<'a, B>,
}

impl<'a, B: RegisterBus> Power<'a, B> {
    pub const fn new(bus: &'a B) -> Self {
        Power {
            registers: PowerRegisters::new(bus),
        }
    }

    /// Switch REG1 from the LDO to the DC/DC converter.
    ///
    /// The hardware offers no confirmation for this.
    pub fn enable_dcdc(&self) {
        self.registers.dcdcen.write(DcDcEn::DCDCEN::Enabled);
    }
}
