// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Transmitter end of the link.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use nrf52_radio::radio::Role;
use panic_halt as _;

#[entry]
fn main() -> ! {
    nrf52840_link::start(Role::Transmitter)
}
