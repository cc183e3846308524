// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Link configuration: address, channel and RF settings.
//!
//! Everything here is plain data; [`Radio::configure`](crate::radio::Radio::configure)
//! turns it into register writes. RF codes are typed enums, so an undefined
//! TXPOWER, CRC length or MODE value cannot reach the hardware. Raw codes
//! coming from elsewhere go through `TryFrom<u32>`, which rejects them.

use core::fmt;

use tock_registers::fields::FieldValue;

use crate::error::RadioError;
use crate::registers::{self, CrcConfiguration, Mode, TxPower};

/// Highest channel index; channel `n` is at 2400 + `n` MHz.
pub const MAX_CHANNEL: u8 = 100;

/// Static payload length in bytes. There are no S0, LENGTH or S1 fields.
pub const PAYLOAD_LEN: u32 = 1;

/// On-air base address length in bytes.
pub const BASE_ADDRESS_LEN: u32 = 4;

/// Address both ends of the link use: the receiver listens on it and the
/// transmitter targets it.
pub const LINK_ADDRESS: LinkAddress = LinkAddress {
    prefix: 0xAA,
    base: 0xDEAD_BEEF,
};

/// 2498 MHz
pub const LINK_CHANNEL: Frequency = Frequency(98);

/// A radio channel in 0..=100.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frequency(u8);

impl Frequency {
    pub const fn new(channel: u8) -> Result<Frequency, RadioError> {
        if channel > MAX_CHANNEL {
            Err(RadioError::InvalidFrequency(channel))
        } else {
            Ok(Frequency(channel))
        }
    }

    pub const fn channel(self) -> u8 {
        self.0
    }

    pub const fn mhz(self) -> u16 {
        2400 + self.0 as u16
    }
}

impl TryFrom<u8> for Frequency {
    type Error = RadioError;

    fn try_from(channel: u8) -> Result<Self, Self::Error> {
        Frequency::new(channel)
    }
}

/// Logical address 0: one prefix byte in front of a four byte base.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkAddress {
    pub prefix: u8,
    pub base: u32,
}

impl fmt::Display for LinkAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{:02X}{:08X}", self.prefix, self.base)
    }
}

/// RADIO output power. Ordered from weakest to strongest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TransmitPower {
    Neg40dBm,
    Neg20dBm,
    Neg16dBm,
    Neg12dBm,
    Neg8dBm,
    Neg4dBm,
    ZerodBm,
    Pos2dBm,
    Pos3dBm,
    Pos4dBm,
    Pos5dBm,
    Pos6dBm,
    Pos7dBm,
    Pos8dBm,
}

impl TransmitPower {
    /// Hardware maximum of the nRF52840.
    pub const MAX: TransmitPower = TransmitPower::Pos8dBm;

    pub fn dbm(self) -> i8 {
        // TXPOWER holds the power as a two's complement byte.
        registers::encode(self.field()) as u8 as i8
    }

    pub fn field(self) -> FieldValue<u32, TxPower::Register> {
        match self {
            TransmitPower::Neg40dBm => TxPower::TXPOWER::Neg40dBm,
            TransmitPower::Neg20dBm => TxPower::TXPOWER::Neg20dBm,
            TransmitPower::Neg16dBm => TxPower::TXPOWER::Neg16dBm,
            TransmitPower::Neg12dBm => TxPower::TXPOWER::Neg12dBm,
            TransmitPower::Neg8dBm => TxPower::TXPOWER::Neg8dBm,
            TransmitPower::Neg4dBm => TxPower::TXPOWER::Neg4dBm,
            TransmitPower::ZerodBm => TxPower::TXPOWER::ZerodBm,
            TransmitPower::Pos2dBm => TxPower::TXPOWER::Pos2dBm,
            TransmitPower::Pos3dBm => TxPower::TXPOWER::Pos3dBm,
            TransmitPower::Pos4dBm => TxPower::TXPOWER::Pos4dBm,
            TransmitPower::Pos5dBm => TxPower::TXPOWER::Pos5dBm,
            TransmitPower::Pos6dBm => TxPower::TXPOWER::Pos6dBm,
            TransmitPower::Pos7dBm => TxPower::TXPOWER::Pos7dBm,
            TransmitPower::Pos8dBm => TxPower::TXPOWER::Pos8dBm,
        }
    }
}

impl TryFrom<u32> for TransmitPower {
    type Error = RadioError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        use TxPower::TXPOWER::Value;

        let register = registers::decode::<TxPower::Register>(code);
        let power = match register.read_as_enum(TxPower::TXPOWER) {
            Some(Value::Neg40dBm) => TransmitPower::Neg40dBm,
            Some(Value::Neg20dBm) => TransmitPower::Neg20dBm,
            Some(Value::Neg16dBm) => TransmitPower::Neg16dBm,
            Some(Value::Neg12dBm) => TransmitPower::Neg12dBm,
            Some(Value::Neg8dBm) => TransmitPower::Neg8dBm,
            Some(Value::Neg4dBm) => TransmitPower::Neg4dBm,
            Some(Value::ZerodBm) => TransmitPower::ZerodBm,
            Some(Value::Pos2dBm) => TransmitPower::Pos2dBm,
            Some(Value::Pos3dBm) => TransmitPower::Pos3dBm,
            Some(Value::Pos4dBm) => TransmitPower::Pos4dBm,
            Some(Value::Pos5dBm) => TransmitPower::Pos5dBm,
            Some(Value::Pos6dBm) => TransmitPower::Pos6dBm,
            Some(Value::Pos7dBm) => TransmitPower::Pos7dBm,
            Some(Value::Pos8dBm) => TransmitPower::Pos8dBm,
            None => return Err(RadioError::UndefinedTxPower(code)),
        };
        // Bits outside the field make the code undefined too.
        if registers::encode(power.field()) != code {
            return Err(RadioError::UndefinedTxPower(code));
        }
        Ok(power)
    }
}

/// Number of CRC bytes appended to each packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrcLength {
    Disabled,
    One,
    Two,
    Three,
}

impl CrcLength {
    pub fn field(self) -> FieldValue<u32, CrcConfiguration::Register> {
        match self {
            CrcLength::Disabled => CrcConfiguration::LEN::Disabled,
            CrcLength::One => CrcConfiguration::LEN::One,
            CrcLength::Two => CrcConfiguration::LEN::Two,
            CrcLength::Three => CrcConfiguration::LEN::Three,
        }
    }
}

impl TryFrom<u32> for CrcLength {
    type Error = RadioError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(CrcLength::Disabled),
            1 => Ok(CrcLength::One),
            2 => Ok(CrcLength::Two),
            3 => Ok(CrcLength::Three),
            _ => Err(RadioError::UndefinedCrcLength(code)),
        }
    }
}

/// On-air data rate and modulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataRate {
    Nrf1Mbit,
    Nrf2Mbit,
    Ble1Mbit,
    Ble2Mbit,
}

impl DataRate {
    pub fn field(self) -> FieldValue<u32, Mode::Register> {
        match self {
            DataRate::Nrf1Mbit => Mode::MODE::Nrf1Mbit,
            DataRate::Nrf2Mbit => Mode::MODE::Nrf2Mbit,
            DataRate::Ble1Mbit => Mode::MODE::Ble1Mbit,
            DataRate::Ble2Mbit => Mode::MODE::Ble2Mbit,
        }
    }
}

impl TryFrom<u32> for DataRate {
    type Error = RadioError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(DataRate::Nrf1Mbit),
            1 => Ok(DataRate::Nrf2Mbit),
            3 => Ok(DataRate::Ble1Mbit),
            4 => Ok(DataRate::Ble2Mbit),
            _ => Err(RadioError::UndefinedDataRate(code)),
        }
    }
}

/// Everything written to the radio before it is armed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadioConfig {
    pub address: LinkAddress,
    pub frequency: Frequency,
    pub data_rate: DataRate,
    pub crc: CrcLength,
    pub tx_power: TransmitPower,
    /// Highest output power this deployment may use.
    pub tx_power_ceiling: TransmitPower,
    /// Shorten DISABLED -> IDLE ramp-up (MODECNF0.RU).
    pub fast_ramp_up: bool,
}

impl RadioConfig {
    /// Settings shared by the receiver and the transmitter of the link.
    pub const fn link_default() -> RadioConfig {
        RadioConfig {
            address: LINK_ADDRESS,
            frequency: LINK_CHANNEL,
            data_rate: DataRate::Nrf2Mbit,
            crc: CrcLength::Three,
            tx_power: TransmitPower::Pos4dBm,
            tx_power_ceiling: TransmitPower::MAX,
            fast_ramp_up: true,
        }
    }

    pub fn validate(&self) -> Result<(), RadioError> {
        if self.tx_power > self.tx_power_ceiling {
            return Err(RadioError::TxPowerAboveCeiling {
                requested: self.tx_power,
                ceiling: self.tx_power_ceiling,
            });
        }
        Ok(())
    }
}
