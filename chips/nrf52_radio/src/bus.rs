// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Register access for memory-mapped peripherals.
//!
//! Every read and write of a POWER, CLOCK or RADIO register goes through a
//! [`RegisterBus`]. On hardware this is [`Mmio`], which issues volatile 32-bit
//! loads and stores at the register's absolute address, in program order and
//! without caching. Host tests plug in an emulated register file instead.
//!
//! Drivers never touch the bus directly. They use the typed register handles
//! [`ReadOnly`], [`WriteOnly`] and [`ReadWrite`], which implement the
//! `tock_registers` [`Readable`] / [`Writeable`] interfaces on top of a bus.
//! Only a register's handle type decides what may be done with it: a task
//! register cannot be read and a status register cannot be written.

use core::fmt;
use core::marker::PhantomData;
use core::ptr;

use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::RegisterLongName;

/// A 32-bit hardware register at a fixed absolute address.
///
/// Registers are only ever constructed inside this crate, in
/// [`crate::registers`]; no other module computes addresses.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Register {
    name: &'static str,
    addr: usize,
}

impl Register {
    /// Register `offset` bytes into the peripheral starting at `base`.
    ///
    /// Fails const evaluation if the resulting address is not 32-bit aligned.
    pub(crate) const fn new(name: &'static str, base: usize, offset: usize) -> Register {
        let addr = base + offset;
        assert!(addr % 4 == 0, "registers are 32-bit aligned");
        Register { name, addr }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn addr(&self) -> usize {
        self.addr
    }
}

impl fmt::Debug for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}@{:#010x}", self.name, self.addr)
    }
}

/// Raw 32-bit access to peripheral registers.
///
/// Writes may trigger hardware actions (task registers) and reads may observe
/// state the hardware changed on its own (event and status registers), so
/// implementations must not cache or reorder accesses.
pub trait RegisterBus {
    fn read(&self, reg: Register) -> u32;
    fn write(&self, reg: Register, value: u32);
}

/// Direct memory-mapped access to the peripheral address space.
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Create the hardware bus.
    ///
    /// # Safety
    ///
    /// Must only be called on an nRF52 device, and the returned bus must be the
    /// only code accessing the POWER, CLOCK and RADIO peripherals.
    pub const unsafe fn new() -> Mmio {
        Mmio { _private: () }
    }
}

impl RegisterBus for Mmio {
    fn read(&self, reg: Register) -> u32 {
        // SAFETY: `Register`s only exist for addresses in the nRF52 register
        // map, which are valid and 4-byte aligned, and `Mmio::new` requires
        // that we run on that hardware.
        unsafe { ptr::read_volatile(reg.addr() as *const u32) }
    }

    fn write(&self, reg: Register, value: u32) {
        // SAFETY: see `read`.
        unsafe { ptr::write_volatile(reg.addr() as *mut u32, value) }
    }
}

/// Status register the hardware updates and software only reads.
pub struct ReadOnly<'a, B: RegisterBus + ?Sized, R: RegisterLongName = ()> {
    bus: &'a B,
    reg: Register,
    associated_register: PhantomData<R>,
}

/// Task register: writing 1 triggers a hardware action. Reads are
/// meaningless.
pub struct WriteOnly<'a, B: RegisterBus + ?Sized, R: RegisterLongName = ()> {
    bus: &'a B,
    reg: Register,
    associated_register: PhantomData<R>,
}

/// Configuration or event register.
pub struct ReadWrite<'a, B: RegisterBus + ?Sized, R: RegisterLongName = ()> {
    bus: &'a B,
    reg: Register,
    associated_register: PhantomData<R>,
}

macro_rules! register_handle {
    ($handle:ident) => {
        impl<'a, B: RegisterBus + ?Sized, R: RegisterLongName> $handle<'a, B, R> {
            pub(crate) const fn new(bus: &'a B, reg: Register) -> Self {
                $handle {
                    bus,
                    reg,
                    associated_register: PhantomData,
                }
            }

            pub fn register(&self) -> Register {
                self.reg
            }
        }
    };
}

register_handle!(ReadOnly);
register_handle!(WriteOnly);
register_handle!(ReadWrite);

impl<B: RegisterBus + ?Sized, R: RegisterLongName> Readable for ReadOnly<'_, B, R> {
    type T = u32;
    type R = R;

    fn get(&self) -> u32 {
        self.bus.read(self.reg)
    }
}

impl<B: RegisterBus + ?Sized, R: RegisterLongName> Writeable for WriteOnly<'_, B, R> {
    type T = u32;
    type R = R;

    fn set(&self, value: u32) {
        self.bus.write(self.reg, value)
    }
}

impl<B: RegisterBus + ?Sized, R: RegisterLongName> Readable for ReadWrite<'_, B, R> {
    type T = u32;
    type R = R;

    fn get(&self) -> u32 {
        self.bus.read(self.reg)
    }
}

impl<B: RegisterBus + ?Sized, R: RegisterLongName> Writeable for ReadWrite<'_, B, R> {
    type T = u32;
    type R = R;

    fn set(&self, value: u32) {
        self.bus.write(self.reg, value)
    }
}
