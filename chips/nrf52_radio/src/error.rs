// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Errors reported by clock bring-up and the radio driver.

use core::fmt;

use crate::config::TransmitPower;
use crate::radio::RadioState;

/// Failures of the link's hardware bring-up and operation.
///
/// The first three variants are stage failures: the hardware never asserted
/// the status the driver was waiting for. The rest are violated
/// preconditions, caught before anything is written to the radio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadioError {
    /// HFCLKSTARTED never asserted after HFCLKSTART
    ClockStartTimeout,
    /// STATE never reached DISABLED after the DISABLE task
    RadioDisableTimeout,
    /// READY never asserted after RXEN or TXEN
    RadioReadyTimeout,
    /// Channel outside 0..=100
    InvalidFrequency(u8),
    /// Raw TXPOWER code with no defined output power
    UndefinedTxPower(u32),
    /// Raw CRCCNF.LEN code with no defined CRC length
    UndefinedCrcLength(u32),
    /// Raw MODE code this driver does not support
    UndefinedDataRate(u32),
    /// Requested output power is above the configured ceiling
    TxPowerAboveCeiling {
        requested: TransmitPower,
        ceiling: TransmitPower,
    },
    /// Configuration attempted outside the DISABLED state
    NotDisabled(RadioState),
    /// START attempted without the radio being armed and idle
    NotIdle(RadioState),
    /// Packet buffer accessed while the radio owns it
    Busy,
}

impl fmt::Display for RadioError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RadioError::ClockStartTimeout => write!(f, "HFCLK start timed out"),
            RadioError::RadioDisableTimeout => write!(f, "radio disable timed out"),
            RadioError::RadioReadyTimeout => write!(f, "radio ramp-up (READY) timed out"),
            RadioError::InvalidFrequency(channel) => {
                write!(f, "frequency channel {} outside 0..=100", channel)
            }
            RadioError::UndefinedTxPower(code) => write!(f, "undefined TXPOWER code {:#04x}", code),
            RadioError::UndefinedCrcLength(code) => write!(f, "undefined CRC length code {}", code),
            RadioError::UndefinedDataRate(code) => write!(f, "undefined MODE code {}", code),
            RadioError::TxPowerAboveCeiling { requested, ceiling } => write!(
                f,
                "transmit power {} dBm above ceiling {} dBm",
                requested.dbm(),
                ceiling.dbm()
            ),
            RadioError::NotDisabled(state) => {
                write!(f, "radio must be DISABLED to configure, is {:?}", state)
            }
            RadioError::NotIdle(state) => {
                write!(f, "radio must be armed and idle to start, is {:?}", state)
            }
            RadioError::Busy => write!(f, "packet buffer in use by the radio"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::RadioError;
    use crate::config::TransmitPower;
    use crate::radio::RadioState;
    use std::string::ToString;

    #[test]
    fn display_names_the_failed_stage() {
        assert_eq!(
            RadioError::ClockStartTimeout.to_string(),
            "HFCLK start timed out"
        );
        assert_eq!(
            RadioError::NotDisabled(RadioState::RxIdle).to_string(),
            "radio must be DISABLED to configure, is RxIdle"
        );
        assert_eq!(
            RadioError::TxPowerAboveCeiling {
                requested: TransmitPower::Pos8dBm,
                ceiling: TransmitPower::Pos4dBm,
            }
            .to_string(),
            "transmit power 8 dBm above ceiling 4 dBm"
        );
    }
}
