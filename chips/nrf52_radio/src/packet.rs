// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Packet buffer shared with the radio's EasyDMA.
//!
//! ```text
//! +---------+----------------------------+
//! | Payload | unused                     |
//! +---------+----------------------------+
//!  byte 0     bytes 1..PACKET_BUFFER_LEN
//! ```
//!
//! With no S0, LENGTH or S1 fields configured, the radio moves exactly the
//! one byte static payload to and from byte 0. The address and CRC never land
//! in RAM.

use core::cell::UnsafeCell;
use core::ptr;

pub const PACKET_BUFFER_LEN: usize = 16;

/// RAM the radio reads on TX and writes on RX.
///
/// The radio accesses the buffer behind the compiler's back, so every software
/// access is volatile. Software access is only allowed through
/// [`Radio`](crate::radio::Radio), which refuses it while a packet is in
/// flight.
#[repr(C, align(4))]
pub struct PacketBuffer {
    bytes: UnsafeCell<[u8; PACKET_BUFFER_LEN]>,
}

// SAFETY: there is a single thread of control, and `Radio` serializes all
// software access against the DMA window.
unsafe impl Sync for PacketBuffer {}

impl PacketBuffer {
    pub const fn new() -> PacketBuffer {
        PacketBuffer {
            bytes: UnsafeCell::new([0; PACKET_BUFFER_LEN]),
        }
    }

    /// Value for PACKETPTR. The nRF52 address space is 32 bits wide.
    pub(crate) fn dma_address(&self) -> u32 {
        self.bytes.get() as usize as u32
    }

    pub(crate) fn load_payload(&self) -> u8 {
        // SAFETY: the pointer comes from our own `UnsafeCell` and byte 0 is in
        // bounds.
        unsafe { ptr::read_volatile(self.bytes.get().cast::<u8>()) }
    }

    pub(crate) fn store_payload(&self, value: u8) {
        // SAFETY: see `load_payload`.
        unsafe { ptr::write_volatile(self.bytes.get().cast::<u8>(), value) }
    }
}
