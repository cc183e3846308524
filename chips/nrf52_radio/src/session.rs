// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Steady-state loop for each end of the link.
//!
//! After bring-up the radio has one packet in flight. [`Session::poll`]
//! checks for its completion and, when it happened, runs the role's
//! follow-up and re-arms with exactly one START:
//!
//! - Receiver: report the received byte and its CRC status, then listen
//!   again right away.
//! - Transmitter: wait [`TX_INTERVAL_MS`], increment the payload (mod 256) and
//!   send it.
//!
//! Reports go to any `core::fmt::Write` console, one line per event.

use core::convert::Infallible;
use core::fmt::{self, Write};

use embedded_hal::delay::DelayNs;

use crate::bus::RegisterBus;
use crate::config::LinkAddress;
use crate::error::RadioError;
use crate::radio::{CrcStatus, Radio, Role};

/// Pause between the end of one transmission and the start of the next.
pub const TX_INTERVAL_MS: u32 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reception {
    /// Packet events seen so far, including this one.
    pub count: u32,
    pub payload: u8,
    pub crc: CrcStatus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transmission {
    /// Packets sent so far, including this one.
    pub count: u32,
    /// Payload of the packet that just went out.
    pub payload: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Received(Reception),
    Sent(Transmission),
}

pub struct Session<'a, B: RegisterBus, D: DelayNs, W: Write> {
    radio: &'a Radio<'a, B>,
    role: Role,
    delay: D,
    console: W,
    packets: u32,
}

impl<'a, B: RegisterBus, D: DelayNs, W: Write> Session<'a, B, D, W> {
    /// `radio` must already be brought up for `role`.
    pub fn new(radio: &'a Radio<'a, B>, role: Role, delay: D, console: W) -> Self {
        Session {
            radio,
            role,
            delay,
            console,
            packets: 0,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Packet events handled so far.
    pub fn packets(&self) -> u32 {
        self.packets
    }

    /// Check once for a finished packet and handle it.
    pub fn poll(&mut self) -> Result<Option<SessionEvent>, RadioError> {
        if !self.radio.is_operation_complete(self.role) {
            return Ok(None);
        }
        self.packets = self.packets.wrapping_add(1);
        let event = match self.role {
            Role::Receiver => SessionEvent::Received(self.receive_done()?),
            Role::Transmitter => SessionEvent::Sent(self.transmit_done()?),
        };
        Ok(Some(event))
    }

    /// Poll forever. Only returns if the radio refuses to re-arm.
    pub fn run(&mut self) -> Result<Infallible, RadioError> {
        loop {
            self.poll()?;
        }
    }

    fn receive_done(&mut self) -> Result<Reception, RadioError> {
        let reception = Reception {
            count: self.packets,
            payload: self.radio.payload()?,
            crc: self.radio.crc_status(),
        };
        match reception.crc {
            CrcStatus::Ok => report(
                &mut self.console,
                format_args!("{} Payload received: {}", reception.count, reception.payload),
            ),
            CrcStatus::Error => report(
                &mut self.console,
                format_args!(
                    "{} Payload received: {} (CRC error)",
                    reception.count, reception.payload
                ),
            ),
        }
        self.radio.start()?;
        Ok(reception)
    }

    fn transmit_done(&mut self) -> Result<Transmission, RadioError> {
        let transmission = Transmission {
            count: self.packets,
            payload: self.radio.payload()?,
        };
        self.delay.delay_ms(TX_INTERVAL_MS);
        self.radio.set_payload(transmission.payload.wrapping_add(1))?;
        self.radio.start()?;
        report(
            &mut self.console,
            format_args!("{} Payload sent: {}", transmission.count, transmission.payload),
        );
        Ok(transmission)
    }
}

/// Why a link stopped running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Failure {
    /// Clock or radio bring-up did not complete.
    BringUp(RadioError),
    /// The steady-state loop could not re-arm the radio.
    Link(RadioError),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Failure::BringUp(error) => write!(f, "Radio bring-up failed: {}", error),
            Failure::Link(error) => write!(f, "Radio link stopped: {}", error),
        }
    }
}

pub fn announce_startup<W: Write>(console: &mut W) {
    report(console, format_args!("Starting..."));
}

/// Print the address the link runs on, from this end's point of view.
pub fn announce_address<W: Write>(console: &mut W, role: Role, address: &LinkAddress) {
    match role {
        Role::Receiver => report(console, format_args!("My address is {}", address)),
        Role::Transmitter => report(console, format_args!("Target address is {}", address)),
    }
}

pub fn announce_failure<W: Write>(console: &mut W, failure: Failure) {
    report(console, format_args!("{}", failure));
}

/// Write one console line.
///
/// Console output is best-effort: a console that fails or drops a line must
/// not stop the radio, so write errors are ignored.
fn report<W: Write>(console: &mut W, line: fmt::Arguments) {
    let _ = writeln!(console, "{}", line);
}
