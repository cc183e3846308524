// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Firmware for one end of a point-to-point nRF52840 radio link.
//!
//! The `receiver` and `transmitter` binaries only differ in the [`Role`] they
//! pass to [`start`]. Both ends use the same link address on the same channel.
//! Output goes to RTT up-channel 0.

#![no_std]

use core::convert::Infallible;
use core::fmt::Write;

use nrf52_radio::bus::Mmio;
use nrf52_radio::clock;
use nrf52_radio::config::RadioConfig;
use nrf52_radio::packet::PacketBuffer;
use nrf52_radio::poll::PollLimit;
use nrf52_radio::radio::{Radio, Role};
use nrf52_radio::session::{self, Failure, Session};

pub mod io;

/// Memory the radio reads from and writes to over EasyDMA.
static PACKET_BUFFER: PacketBuffer = PacketBuffer::new();

/// Link configuration shared by both ends.
const CONFIG: RadioConfig = RadioConfig::link_default();

/// Bring up clock and radio for `role` and run the link forever.
///
/// On a failure the console says whether bring-up failed or the running link
/// stopped, and the core sleeps.
pub fn start(role: Role) -> ! {
    let mut console = io::console();
    session::announce_startup(&mut console);

    let Some(peripherals) = cortex_m::Peripherals::take() else {
        // Best-effort, as is all console output.
        let _ = writeln!(console, "Core peripherals already taken");
        halt();
    };
    let delay = io::SysTickDelay::new(peripherals.SYST);

    // SAFETY: we run on an nRF52840 and nothing else in this image touches
    // POWER, CLOCK or RADIO.
    let bus = unsafe { Mmio::new() };

    match run(&bus, role, delay, &mut console) {
        Ok(never) => match never {},
        Err(failure) => session::announce_failure(&mut console, failure),
    }
    halt()
}

fn run<W: Write>(
    bus: &Mmio,
    role: Role,
    delay: io::SysTickDelay,
    console: &mut W,
) -> Result<Infallible, Failure> {
    clock::bootstrap(bus, PollLimit::DEFAULT).map_err(Failure::BringUp)?;
    session::announce_address(console, role, &CONFIG.address);

    let radio = Radio::new(bus, &PACKET_BUFFER, PollLimit::DEFAULT);
    radio.bring_up(role, &CONFIG).map_err(Failure::BringUp)?;

    Session::new(&radio, role, delay, console)
        .run()
        .map_err(Failure::Link)
}

fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
