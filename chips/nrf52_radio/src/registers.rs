// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Register map for the POWER, CLOCK and RADIO peripherals, nRF52
//!
//! Addresses follow the nRF52840 product specification (v1.7). POWER and
//! CLOCK share the same peripheral instance at 0x40000000.
//!
//! Field layouts are declared with `register_bitfields!`. Each peripheral is
//! reached through a register block ([`PowerRegisters`], [`ClockRegisters`],
//! [`RadioRegisters`]) whose fields are typed handles over a
//! [`RegisterBus`]; the handle type fixes both the access kind and the
//! bitfield layout of every register. [`encode`] and [`decode`] build and
//! interpret whole-register images where no register is involved.

use tock_registers::fields::FieldValue;
use tock_registers::{register_bitfields, LocalRegisterCopy, RegisterLongName};

use crate::bus::{ReadOnly, ReadWrite, Register, RegisterBus, WriteOnly};

pub(crate) const POWER_BASE: usize = 0x4000_0000;
pub(crate) const CLOCK_BASE: usize = 0x4000_0000;
pub(crate) const RADIO_BASE: usize = 0x4000_1000;

pub(crate) mod power {
    use super::POWER_BASE;
    use crate::bus::Register;

    /// Enable DC/DC converter for REG1 stage
    pub const DCDCEN: Register = Register::new("POWER.DCDCEN", POWER_BASE, 0x578);
}

pub(crate) mod clock {
    use super::CLOCK_BASE;
    use crate::bus::Register;

    /// Start HFXO crystal oscillator
    pub const TASKS_HFCLKSTART: Register =
        Register::new("CLOCK.TASKS_HFCLKSTART", CLOCK_BASE, 0x000);
    /// HFXO crystal oscillator started
    pub const EVENTS_HFCLKSTARTED: Register =
        Register::new("CLOCK.EVENTS_HFCLKSTARTED", CLOCK_BASE, 0x100);
}

pub(crate) mod radio {
    use super::RADIO_BASE;
    use crate::bus::Register;

    /// Enable RADIO in TX mode
    pub const TASKS_TXEN: Register = Register::new("RADIO.TASKS_TXEN", RADIO_BASE, 0x000);
    /// Enable RADIO in RX mode
    pub const TASKS_RXEN: Register = Register::new("RADIO.TASKS_RXEN", RADIO_BASE, 0x004);
    /// Start RADIO
    pub const TASKS_START: Register = Register::new("RADIO.TASKS_START", RADIO_BASE, 0x008);
    /// Disable RADIO
    pub const TASKS_DISABLE: Register = Register::new("RADIO.TASKS_DISABLE", RADIO_BASE, 0x010);
    /// RADIO has ramped up and is ready to be started
    pub const EVENTS_READY: Register = Register::new("RADIO.EVENTS_READY", RADIO_BASE, 0x100);
    /// CRC status of the last received packet
    pub const CRCSTATUS: Register = Register::new("RADIO.CRCSTATUS", RADIO_BASE, 0x40C);
    /// Packet pointer
    pub const PACKETPTR: Register = Register::new("RADIO.PACKETPTR", RADIO_BASE, 0x504);
    /// Frequency
    pub const FREQUENCY: Register = Register::new("RADIO.FREQUENCY", RADIO_BASE, 0x508);
    /// Output power
    pub const TXPOWER: Register = Register::new("RADIO.TXPOWER", RADIO_BASE, 0x50C);
    /// Data rate and modulation
    pub const MODE: Register = Register::new("RADIO.MODE", RADIO_BASE, 0x510);
    /// Packet configuration register 0
    pub const PCNF0: Register = Register::new("RADIO.PCNF0", RADIO_BASE, 0x514);
    /// Packet configuration register 1
    pub const PCNF1: Register = Register::new("RADIO.PCNF1", RADIO_BASE, 0x518);
    /// Base address 0
    pub const BASE0: Register = Register::new("RADIO.BASE0", RADIO_BASE, 0x51C);
    /// Prefixes bytes for logical addresses 0-3
    pub const PREFIX0: Register = Register::new("RADIO.PREFIX0", RADIO_BASE, 0x524);
    /// Receive address select
    pub const RXADDRESSES: Register = Register::new("RADIO.RXADDRESSES", RADIO_BASE, 0x530);
    /// CRC configuration
    pub const CRCCNF: Register = Register::new("RADIO.CRCCNF", RADIO_BASE, 0x534);
    /// Current radio state
    pub const STATE: Register = Register::new("RADIO.STATE", RADIO_BASE, 0x550);
    /// Radio mode configuration register 0
    pub const MODECNF0: Register = Register::new("RADIO.MODECNF0", RADIO_BASE, 0x650);
}

register_bitfields! [u32,
    /// Start task
    pub Task [
        ENABLE OFFSET(0) NUMBITS(1)
    ],

    /// Read event
    pub Event [
        READY OFFSET(0) NUMBITS(1)
    ],

    pub DcDcEn [
        DCDCEN OFFSET(0) NUMBITS(1) [
            Disabled = 0,
            Enabled = 1
        ]
    ],

    pub Frequency [
        /// Radio channel frequency, 2400 + FREQUENCY MHz
        FREQUENCY OFFSET(0) NUMBITS(7) [],
        /// Channel map selection
        MAP OFFSET(8) NUMBITS(1) [
            Default = 0,
            Low = 1
        ]
    ],

    pub TxPower [
        /// RADIO output power, two's complement dBm
        TXPOWER OFFSET(0) NUMBITS(8) [
            Pos8dBm = 0x08,
            Pos7dBm = 0x07,
            Pos6dBm = 0x06,
            Pos5dBm = 0x05,
            Pos4dBm = 0x04,
            Pos3dBm = 0x03,
            Pos2dBm = 0x02,
            ZerodBm = 0x00,
            Neg4dBm = 0xFC,
            Neg8dBm = 0xF8,
            Neg12dBm = 0xF4,
            Neg16dBm = 0xF0,
            Neg20dBm = 0xEC,
            Neg40dBm = 0xD8
        ]
    ],

    pub Mode [
        MODE OFFSET(0) NUMBITS(4) [
            Nrf1Mbit = 0,
            Nrf2Mbit = 1,
            Ble1Mbit = 3,
            Ble2Mbit = 4
        ]
    ],

    pub PacketConfiguration0 [
        /// Length on air of LENGTH field in number of bits
        LFLEN OFFSET(0) NUMBITS(4) [],
        /// Length on air of S0 field in number of bytes
        S0LEN OFFSET(8) NUMBITS(1) [],
        /// Length on air of S1 field in number of bits
        S1LEN OFFSET(16) NUMBITS(4) [],
        S1INCL OFFSET(20) NUMBITS(1) [
            Automatic = 0,
            Include = 1
        ],
        /// Length of preamble on air
        PLEN OFFSET(24) NUMBITS(2) [
            EightBit = 0,
            SixteenBit = 1,
            ThirtyTwoZero = 2,
            LongRange = 3
        ]
    ],

    pub PacketConfiguration1 [
        /// Maximum length of packet payload
        MAXLEN OFFSET(0) NUMBITS(8) [],
        /// Static length in number of bytes
        STATLEN OFFSET(8) NUMBITS(8) [],
        /// Base address length in number of bytes
        BALEN OFFSET(16) NUMBITS(3) [],
        ENDIAN OFFSET(24) NUMBITS(1) [
            Little = 0,
            Big = 1
        ],
        WHITEEN OFFSET(25) NUMBITS(1) [
            Disabled = 0,
            Enabled = 1
        ]
    ],

    pub Prefix0 [
        AP0 OFFSET(0) NUMBITS(8) [],
        AP1 OFFSET(8) NUMBITS(8) [],
        AP2 OFFSET(16) NUMBITS(8) [],
        AP3 OFFSET(24) NUMBITS(8) []
    ],

    pub RxAddresses [
        ADDR0 OFFSET(0) NUMBITS(1) [],
        ADDR1 OFFSET(1) NUMBITS(1) [],
        ADDR2 OFFSET(2) NUMBITS(1) [],
        ADDR3 OFFSET(3) NUMBITS(1) [],
        ADDR4 OFFSET(4) NUMBITS(1) [],
        ADDR5 OFFSET(5) NUMBITS(1) [],
        ADDR6 OFFSET(6) NUMBITS(1) [],
        ADDR7 OFFSET(7) NUMBITS(1) []
    ],

    pub CrcConfiguration [
        /// CRC length in number of bytes
        LEN OFFSET(0) NUMBITS(2) [
            Disabled = 0,
            One = 1,
            Two = 2,
            Three = 3
        ],
        /// Include or exclude packet address field out of CRC calculation
        SKIPADDR OFFSET(8) NUMBITS(2) [
            Include = 0,
            Skip = 1
        ]
    ],

    pub CrcStatus [
        CRCSTATUS OFFSET(0) NUMBITS(1) [
            CrcError = 0,
            CrcOk = 1
        ]
    ],

    pub State [
        STATE OFFSET(0) NUMBITS(4) [
            Disabled = 0,
            RxRu = 1,
            RxIdle = 2,
            Rx = 3,
            RxDisable = 4,
            TxRu = 9,
            TxIdle = 10,
            Tx = 11,
            TxDisable = 12
        ]
    ],

    pub ModeConfiguration0 [
        /// Radio ramp-up time
        RU OFFSET(0) NUMBITS(1) [
            Default = 0,
            Fast = 1
        ],
        /// Default TX value
        DTX OFFSET(8) NUMBITS(2) [
            B1 = 0,
            B0 = 1,
            Center = 2
        ]
    ]
];

/// Size of one peripheral's register window.
const PERIPHERAL_WINDOW: usize = 0x1000;

/// True if `block` lists registers at strictly increasing addresses, all
/// inside the window of the peripheral at `base`.
const fn well_formed(base: usize, block: &[Register]) -> bool {
    let mut i = 0;
    while i < block.len() {
        let addr = block[i].addr();
        if addr < base || addr >= base + PERIPHERAL_WINDOW {
            return false;
        }
        if i > 0 && addr <= block[i - 1].addr() {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    well_formed(POWER_BASE, &[power::DCDCEN]),
    "POWER register map is malformed"
);

const _: () = assert!(
    well_formed(
        CLOCK_BASE,
        &[clock::TASKS_HFCLKSTART, clock::EVENTS_HFCLKSTARTED]
    ),
    "CLOCK register map is malformed"
);

const _: () = assert!(
    well_formed(
        RADIO_BASE,
        &[
            radio::TASKS_TXEN,
            radio::TASKS_RXEN,
            radio::TASKS_START,
            radio::TASKS_DISABLE,
            radio::EVENTS_READY,
            radio::CRCSTATUS,
            radio::PACKETPTR,
            radio::FREQUENCY,
            radio::TXPOWER,
            radio::MODE,
            radio::PCNF0,
            radio::PCNF1,
            radio::BASE0,
            radio::PREFIX0,
            radio::RXADDRESSES,
            radio::CRCCNF,
            radio::STATE,
            radio::MODECNF0,
        ]
    ),
    "RADIO register map is malformed"
);

pub struct PowerRegisters<'a, B: RegisterBus + ?Sized> {
    pub dcdcen: ReadWrite<'a, B, DcDcEn::Register>,
}

impl<'a, B: RegisterBus + ?Sized> PowerRegisters<'a, B> {
    pub const fn new(bus: &'a B) -> Self {
        PowerRegisters {
            dcdcen: ReadWrite::new(bus, power::DCDCEN),
        }
    }
}

pub struct ClockRegisters<'a, B: RegisterBus + ?Sized> {
    pub tasks_hfclkstart: WriteOnly<'a, B, Task::Register>,
    pub events_hfclkstarted: ReadWrite<'a, B, Event::Register>,
}

impl<'a, B: RegisterBus + ?Sized> ClockRegisters<'a, B> {
    pub const fn new(bus: &'a B) -> Self {
        ClockRegisters {
            tasks_hfclkstart: WriteOnly::new(bus, clock::TASKS_HFCLKSTART),
            events_hfclkstarted: ReadWrite::new(bus, clock::EVENTS_HFCLKSTARTED),
        }
    }
}

/// The RADIO registers this driver uses.
///
/// ```compile_fail
/// use nrf52_radio::bus::RegisterBus;
/// use nrf52_radio::registers::RadioRegisters;
/// use tock_registers::interfaces::Writeable;
///
/// fn clobber_state<B: RegisterBus>(bus: &B) {
///     // STATE is read-only.
///     RadioRegisters::new(bus).state.set(0);
/// }
/// ```
///
/// ```compile_fail
/// use nrf52_radio::bus::RegisterBus;
/// use nrf52_radio::registers::RadioRegisters;
/// use tock_registers::interfaces::Readable;
///
/// fn peek_task<B: RegisterBus>(bus: &B) -> u32 {
///     // Task registers are write-only.
///     RadioRegisters::new(bus).tasks_start.get()
/// }
/// ```
pub struct RadioRegisters<'a, B: RegisterBus + ?Sized> {
    pub tasks_txen: WriteOnly<'a, B, Task::Register>,
    pub tasks_rxen: WriteOnly<'a, B, Task::Register>,
    pub tasks_start: WriteOnly<'a, B, Task::Register>,
    pub tasks_disable: WriteOnly<'a, B, Task::Register>,
    pub events_ready: ReadWrite<'a, B, Event::Register>,
    pub crcstatus: ReadOnly<'a, B, CrcStatus::Register>,
    pub packetptr: ReadWrite<'a, B>,
    pub frequency: ReadWrite<'a, B, Frequency::Register>,
    pub txpower: ReadWrite<'a, B, TxPower::Register>,
    pub mode: ReadWrite<'a, B, Mode::Register>,
    pub pcnf0: ReadWrite<'a, B, PacketConfiguration0::Register>,
    pub pcnf1: ReadWrite<'a, B, PacketConfiguration1::Register>,
    pub base0: ReadWrite<'a, B>,
    pub prefix0: ReadWrite<'a, B, Prefix0::Register>,
    pub rxaddresses: ReadWrite<'a, B, RxAddresses::Register>,
    pub crccnf: ReadWrite<'a, B, CrcConfiguration::Register>,
    pub state: ReadOnly<'a, B, State::Register>,
    pub modecnf0: ReadWrite<'a, B, ModeConfiguration0::Register>,
}

impl<'a, B: RegisterBus + ?Sized> RadioRegisters<'a, B> {
    pub const fn new(bus: &'a B) -> Self {
        RadioRegisters {
            tasks_txen: WriteOnly::new(bus, radio::TASKS_TXEN),
            tasks_rxen: WriteOnly::new(bus, radio::TASKS_RXEN),
            tasks_start: WriteOnly::new(bus, radio::TASKS_START),
            tasks_disable: WriteOnly::new(bus, radio::TASKS_DISABLE),
            events_ready: ReadWrite::new(bus, radio::EVENTS_READY),
            crcstatus: ReadOnly::new(bus, radio::CRCSTATUS),
            packetptr: ReadWrite::new(bus, radio::PACKETPTR),
            frequency: ReadWrite::new(bus, radio::FREQUENCY),
            txpower: ReadWrite::new(bus, radio::TXPOWER),
            mode: ReadWrite::new(bus, radio::MODE),
            pcnf0: ReadWrite::new(bus, radio::PCNF0),
            pcnf1: ReadWrite::new(bus, radio::PCNF1),
            base0: ReadWrite::new(bus, radio::BASE0),
            prefix0: ReadWrite::new(bus, radio::PREFIX0),
            rxaddresses: ReadWrite::new(bus, radio::RXADDRESSES),
            crccnf: ReadWrite::new(bus, radio::CRCCNF),
            state: ReadOnly::new(bus, radio::STATE),
            modecnf0: ReadWrite::new(bus, radio::MODECNF0),
        }
    }
}

/// Whole-register image with `fields` set and every other bit cleared.
pub fn encode<R: RegisterLongName>(fields: FieldValue<u32, R>) -> u32 {
    let mut image = LocalRegisterCopy::<u32, R>::new(0);
    image.modify(fields);
    image.get()
}

/// View of a raw register value through the fields of `R`.
pub fn decode<R: RegisterLongName>(raw: u32) -> LocalRegisterCopy<u32, R> {
    LocalRegisterCopy::new(raw)
}
