// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Emulated POWER, CLOCK and RADIO peripherals for host tests.
//!
//! Unhandled registers behave as plain memory: reads return the last value
//! written (zero at reset). Task registers kick off the hardware side effects
//! the drivers rely on:
//!
//! - TASKS_HFCLKSTART raises EVENTS_HFCLKSTARTED.
//! - TASKS_DISABLE moves STATE to DISABLED.
//! - TASKS_RXEN / TASKS_TXEN move STATE to RXIDLE / TXIDLE and raise
//!   EVENTS_READY.
//! - TASKS_START moves RXIDLE to RX and TXIDLE to TX. A transmission copies
//!   the payload out of the packet buffer.
//!
//! A reception in RX only finishes once a packet was queued with
//! [`FakeNrf52::push_packet`]; it is delivered on the next STATE read. A
//! transmission finishes after a configurable number of STATE reads.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::bus::{Register, RegisterBus};
use crate::packet::PacketBuffer;
use crate::registers::{clock, radio};

const DISABLED: u32 = 0;
const RXIDLE: u32 = 2;
const RX: u32 = 3;
const TXIDLE: u32 = 10;
const TX: u32 = 11;

#[derive(Default)]
struct Inner {
    memory: BTreeMap<usize, u32>,
    reads: BTreeMap<usize, usize>,
    log: Vec<(Register, u32)>,
    clock_stalled: bool,
    disable_stalled: bool,
    ready_stalled: bool,
    tx_airtime: usize,
    tx_elapsed: usize,
    pending: VecDeque<(u8, bool)>,
    sent: Vec<u8>,
}

impl Inner {
    fn get(&self, reg: Register) -> u32 {
        self.memory.get(&reg.addr()).copied().unwrap_or(0)
    }

    fn set(&mut self, reg: Register, value: u32) {
        self.memory.insert(reg.addr(), value);
    }
}

pub struct FakeNrf52<'a> {
    buffer: &'a PacketBuffer,
    inner: RefCell<Inner>,
}

impl<'a> FakeNrf52<'a> {
    /// Device in its reset state, doing DMA into `buffer`.
    pub fn new(buffer: &'a PacketBuffer) -> FakeNrf52<'a> {
        FakeNrf52 {
            buffer,
            inner: RefCell::new(Inner {
                tx_airtime: 1,
                ..Inner::default()
            }),
        }
    }

    /// Current register contents, without side effects or read accounting.
    pub fn value(&self, reg: Register) -> u32 {
        self.inner.borrow().get(reg)
    }

    /// Set a register as the hardware would, bypassing the write log.
    pub fn poke(&self, reg: Register, value: u32) {
        self.inner.borrow_mut().set(reg, value);
    }

    pub fn writes_to(&self, reg: Register) -> usize {
        self.inner
            .borrow()
            .log
            .iter()
            .filter(|(written, _)| *written == reg)
            .count()
    }

    pub fn reads_of(&self, reg: Register) -> usize {
        self.inner
            .borrow()
            .reads
            .get(&reg.addr())
            .copied()
            .unwrap_or(0)
    }

    /// Every software write so far, oldest first.
    pub fn write_log(&self) -> Vec<(Register, u32)> {
        self.inner.borrow().log.clone()
    }

    /// HFXO never reports started.
    pub fn stall_clock(&self) {
        self.inner.borrow_mut().clock_stalled = true;
    }

    /// DISABLE is ignored.
    pub fn stall_disable(&self) {
        self.inner.borrow_mut().disable_stalled = true;
    }

    /// RXEN and TXEN are ignored.
    pub fn stall_ready(&self) {
        self.inner.borrow_mut().ready_stalled = true;
    }

    /// STATE reads a transmission stays in TX for.
    pub fn set_tx_airtime(&self, reads: usize) {
        self.inner.borrow_mut().tx_airtime = reads.max(1);
    }

    /// Queue a packet for the receiver to pick up while in RX.
    pub fn push_packet(&self, payload: u8, crc_ok: bool) {
        self.inner.borrow_mut().pending.push_back((payload, crc_ok));
    }

    /// Payloads of every transmission started so far.
    pub fn sent(&self) -> Vec<u8> {
        self.inner.borrow().sent.clone()
    }

    fn state_read(&self, inner: &mut Inner) {
        match inner.get(radio::STATE) {
            RX => {
                if let Some((payload, crc_ok)) = inner.pending.pop_front() {
                    self.buffer.store_payload(payload);
                    inner.set(radio::CRCSTATUS, u32::from(crc_ok));
                    inner.set(radio::STATE, RXIDLE);
                }
            }
            TX => {
                inner.tx_elapsed += 1;
                if inner.tx_elapsed >= inner.tx_airtime {
                    inner.set(radio::STATE, TXIDLE);
                }
            }
            _ => {}
        }
    }

    fn task(&self, inner: &mut Inner, reg: Register) {
        if reg == clock::TASKS_HFCLKSTART {
            if !inner.clock_stalled {
                inner.set(clock::EVENTS_HFCLKSTARTED, 1);
            }
        } else if reg == radio::TASKS_DISABLE {
            if !inner.disable_stalled {
                inner.set(radio::STATE, DISABLED);
            }
        } else if reg == radio::TASKS_RXEN || reg == radio::TASKS_TXEN {
            if !inner.ready_stalled {
                let idle = if reg == radio::TASKS_RXEN {
                    RXIDLE
                } else {
                    TXIDLE
                };
                inner.set(radio::STATE, idle);
                inner.set(radio::EVENTS_READY, 1);
            }
        } else if reg == radio::TASKS_START {
            match inner.get(radio::STATE) {
                RXIDLE => inner.set(radio::STATE, RX),
                TXIDLE => {
                    inner.sent.push(self.buffer.load_payload());
                    inner.tx_elapsed = 0;
                    inner.set(radio::STATE, TX);
                }
                _ => {}
            }
        }
    }
}

impl RegisterBus for FakeNrf52<'_> {
    fn read(&self, reg: Register) -> u32 {
        let mut inner = self.inner.borrow_mut();
        *inner.reads.entry(reg.addr()).or_insert(0) += 1;
        if reg == radio::STATE {
            self.state_read(&mut inner);
        }
        inner.get(reg)
    }

    fn write(&self, reg: Register, value: u32) {
        let mut inner = self.inner.borrow_mut();
        inner.log.push((reg, value));
        inner.set(reg, value);
        if value != 0 {
            self.task(&mut inner, reg);
        }
    }
}

/// Delay that returns immediately and remembers every millisecond request.
#[derive(Default)]
pub struct RecordingDelay {
    calls: Vec<u32>,
    nanos: u64,
}

impl RecordingDelay {
    pub fn new() -> RecordingDelay {
        RecordingDelay::default()
    }

    pub fn calls(&self) -> Vec<u32> {
        self.calls.clone()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.nanos += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(ms);
        self.nanos += u64::from(ms) * 1_000_000;
    }
}

#[cfg(test)]
mod test {
    use super::{FakeNrf52, RecordingDelay};
    use crate::bus::RegisterBus;
    use crate::packet::PacketBuffer;
    use crate::registers::radio;
    use embedded_hal::delay::DelayNs;

    #[test]
    fn reception_waits_for_a_queued_packet() {
        let buffer = PacketBuffer::new();
        let nrf = FakeNrf52::new(&buffer);
        nrf.write(radio::TASKS_RXEN, 1);
        nrf.write(radio::TASKS_START, 1);

        assert_eq!(nrf.read(radio::STATE), 3);
        nrf.push_packet(0x5A, true);
        assert_eq!(nrf.read(radio::STATE), 2);
        assert_eq!(nrf.value(radio::CRCSTATUS), 1);
        assert_eq!(buffer.load_payload(), 0x5A);
    }

    #[test]
    fn delay_records_milliseconds() {
        let mut delay = RecordingDelay::new();
        delay.delay_ms(1000);
        delay.delay_us(5);
        assert_eq!(delay.calls(), [1000]);
        assert_eq!(delay.nanos, 1_000_005_000);
    }
}
