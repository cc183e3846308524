// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Radio driver, proprietary 2 Mbit mode, nRF52
//!
//! ### Packet Configuration
//! ```text
//! +----------+------+--------+---------+-----+
//! | Preamble | Base | Prefix | Payload | CRC |
//! +----------+------+--------+---------+-----+
//! ```
//!
//! * Preamble - 1 byte
//! * Base and prefix together form the access address of logical address 0
//!   (4 + 1 bytes)
//! * Payload - 1 byte, static length; no S0, LENGTH or S1 fields
//! * CRC - 3 bytes, computed over address and payload
//!
//! ### State machine
//! ```text
//!             TXEN/RXEN          START
//! DISABLED ------------> TXIDLE --------> TX
//!     ^                  RXIDLE --------> RX
//!     |                     ^             |
//!     | DISABLE             +-------------+
//!     |                     packet done (END)
//! ```
//!
//! Software only writes task registers and polls STATE or EVENTS_READY; the
//! hardware performs every transition. After a packet the radio falls back to
//! the idle state of its direction on its own, so re-arming for the next
//! packet is a single START.
//!
//! The same [`Radio`] serves both ends of the link. A [`Role`] selects the
//! enable task, the idle state and the in-progress state.

use core::cell::Cell;

use tock_registers::interfaces::{Readable, Writeable};

use crate::bus::{RegisterBus, WriteOnly};
use crate::config::{RadioConfig, BASE_ADDRESS_LEN, PAYLOAD_LEN};
use crate::error::RadioError;
use crate::packet::PacketBuffer;
use crate::poll::{self, PollLimit};
use crate::registers::{
    decode, encode, CrcConfiguration, CrcStatus as CrcStatusField, Event, Frequency,
    ModeConfiguration0, PacketConfiguration0, PacketConfiguration1, Prefix0, RadioRegisters,
    RxAddresses, State, Task,
};

/// Which end of the link this radio is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Receiver,
    Transmitter,
}

impl Role {
    /// State after ramp-up and after every completed packet.
    pub fn idle_state(self) -> RadioState {
        match self {
            Role::Receiver => RadioState::RxIdle,
            Role::Transmitter => RadioState::TxIdle,
        }
    }

    /// State while a packet is on the air.
    pub fn active_state(self) -> RadioState {
        match self {
            Role::Receiver => RadioState::Rx,
            Role::Transmitter => RadioState::Tx,
        }
    }
}

/// Decoded STATE register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RadioState {
    Disabled,
    RxRu,
    RxIdle,
    Rx,
    RxDisable,
    TxRu,
    TxIdle,
    Tx,
    TxDisable,
    /// Value not defined by the product specification.
    Unknown(u32),
}

impl RadioState {
    pub fn from_raw(raw: u32) -> RadioState {
        use State::STATE::Value;

        let register = decode::<State::Register>(raw);
        if encode(State::STATE.val(register.read(State::STATE))) != raw {
            return RadioState::Unknown(raw);
        }
        match register.read_as_enum(State::STATE) {
            Some(Value::Disabled) => RadioState::Disabled,
            Some(Value::RxRu) => RadioState::RxRu,
            Some(Value::RxIdle) => RadioState::RxIdle,
            Some(Value::Rx) => RadioState::Rx,
            Some(Value::RxDisable) => RadioState::RxDisable,
            Some(Value::TxRu) => RadioState::TxRu,
            Some(Value::TxIdle) => RadioState::TxIdle,
            Some(Value::Tx) => RadioState::Tx,
            Some(Value::TxDisable) => RadioState::TxDisable,
            None => RadioState::Unknown(raw),
        }
    }
}

/// CRC check result of the last received packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CrcStatus {
    Ok,
    Error,
}

pub struct Radio<'a, B: RegisterBus> {
    registers: RadioRegisters<'a, B>,
    buffer: &'a PacketBuffer,
    limit: PollLimit,
    armed: Cell<Option<Role>>,
    in_flight: Cell<bool>,
}

impl<'a, B: RegisterBus> Radio<'a, B> {
    pub fn new(bus: &'a B, buffer: &'a PacketBuffer, limit: PollLimit) -> Radio<'a, B> {
        Radio {
            registers: RadioRegisters::new(bus),
            buffer,
            limit,
            armed: Cell::new(None),
            in_flight: Cell::new(false),
        }
    }

    pub fn state(&self) -> RadioState {
        RadioState::from_raw(self.registers.state.get())
    }

    /// Role the radio was last armed for, until the next `disable()`.
    pub fn role(&self) -> Option<Role> {
        self.armed.get()
    }

    /// Trigger DISABLE and wait for STATE to read DISABLED.
    pub fn disable(&self) -> Result<(), RadioError> {
        self.armed.set(None);
        self.registers.tasks_disable.write(Task::ENABLE::SET);
        poll::wait_for(&self.registers.state, self.limit, |state| {
            RadioState::from_raw(state.get()) == RadioState::Disabled
        })
        .ok_or(RadioError::RadioDisableTimeout)?;
        // Nothing is on the air once the radio is disabled.
        self.in_flight.set(false);
        Ok(())
    }

    /// Write addressing, channel, packet layout and RF settings.
    ///
    /// Only valid in the DISABLED state.
    pub fn configure(&self, config: &RadioConfig) -> Result<(), RadioError> {
        config.validate()?;
        let state = self.state();
        if state != RadioState::Disabled {
            return Err(RadioError::NotDisabled(state));
        }

        let registers = &self.registers;
        registers.base0.set(config.address.base);
        registers
            .prefix0
            .write(Prefix0::AP0.val(u32::from(config.address.prefix)));
        registers.frequency.write(
            Frequency::FREQUENCY.val(u32::from(config.frequency.channel()))
                + Frequency::MAP::Default,
        );

        registers.pcnf1.write(
            PacketConfiguration1::MAXLEN.val(PAYLOAD_LEN)
                + PacketConfiguration1::STATLEN.val(PAYLOAD_LEN)
                + PacketConfiguration1::BALEN.val(BASE_ADDRESS_LEN)
                + PacketConfiguration1::ENDIAN::Little
                + PacketConfiguration1::WHITEEN::Disabled,
        );
        registers.pcnf0.write(
            PacketConfiguration0::LFLEN.val(0)
                + PacketConfiguration0::S0LEN.val(0)
                + PacketConfiguration0::S1LEN.val(0)
                + PacketConfiguration0::S1INCL::Automatic
                + PacketConfiguration0::PLEN::EightBit,
        );

        registers.mode.write(config.data_rate.field());
        registers.modecnf0.write(if config.fast_ramp_up {
            ModeConfiguration0::RU::Fast
        } else {
            ModeConfiguration0::RU::Default
        });

        registers
            .crccnf
            .write(config.crc.field() + CrcConfiguration::SKIPADDR::Include);

        registers.packetptr.set(self.buffer.dma_address());

        registers.rxaddresses.write(RxAddresses::ADDR0::SET);
        registers.txpower.write(config.tx_power.field());
        Ok(())
    }

    /// Ramp up in `role`'s direction and wait for READY.
    ///
    /// On success the radio sits in the role's idle state.
    pub fn arm(&self, role: Role) -> Result<(), RadioError> {
        self.registers.events_ready.set(0);
        self.enable_task(role).write(Task::ENABLE::SET);
        poll::wait_for(&self.registers.events_ready, self.limit, |event| {
            event.is_set(Event::READY)
        })
        .ok_or(RadioError::RadioReadyTimeout)?;
        self.armed.set(Some(role));
        Ok(())
    }

    fn enable_task(&self, role: Role) -> &WriteOnly<'a, B, Task::Register> {
        match role {
            Role::Receiver => &self.registers.tasks_rxen,
            Role::Transmitter => &self.registers.tasks_txen,
        }
    }

    pub fn arm_receive(&self) -> Result<(), RadioError> {
        self.arm(Role::Receiver)
    }

    pub fn arm_transmit(&self) -> Result<(), RadioError> {
        self.arm(Role::Transmitter)
    }

    /// Trigger START: RXIDLE -> RX or TXIDLE -> TX.
    ///
    /// Does not wait for the packet; see [`Radio::is_operation_complete`].
    /// From here until completion the packet buffer belongs to the radio.
    pub fn start(&self) -> Result<(), RadioError> {
        let state = self.state();
        match self.armed.get() {
            Some(role) if state == role.idle_state() => {}
            _ => return Err(RadioError::NotIdle(state)),
        }
        self.in_flight.set(true);
        self.registers.tasks_start.write(Task::ENABLE::SET);
        Ok(())
    }

    /// True once STATE has left `role`'s in-progress state.
    ///
    /// Always false unless the radio is armed for `role`. The hardware falls
    /// back to idle after a packet whether or not it was received intact, so
    /// this only says a packet event happened. Use [`Radio::crc_status`] to
    /// tell good receptions from bad ones.
    ///
    /// The packet buffer is handed back to software only once STATE reads the
    /// role's idle state or DISABLED; in the ramp and disable states in
    /// between, EasyDMA may still be active.
    pub fn is_operation_complete(&self, role: Role) -> bool {
        if self.armed.get() != Some(role) {
            return false;
        }
        let state = self.state();
        if state == role.active_state() {
            return false;
        }
        if state == role.idle_state() || state == RadioState::Disabled {
            self.in_flight.set(false);
        }
        true
    }

    pub fn crc_status(&self) -> CrcStatus {
        match self.registers.crcstatus.read_as_enum(CrcStatusField::CRCSTATUS) {
            Some(CrcStatusField::CRCSTATUS::Value::CrcOk) => CrcStatus::Ok,
            _ => CrcStatus::Error,
        }
    }

    /// Payload byte, 0-255.
    pub fn payload(&self) -> Result<u8, RadioError> {
        if self.in_flight.get() {
            return Err(RadioError::Busy);
        }
        Ok(self.buffer.load_payload())
    }

    pub fn set_payload(&self, value: u8) -> Result<(), RadioError> {
        if self.in_flight.get() {
            return Err(RadioError::Busy);
        }
        self.buffer.store_payload(value);
        Ok(())
    }

    /// Full bring-up: disable, configure, disable, arm for `role`, start.
    ///
    /// Stops at the first failure; retrying is up to the caller.
    pub fn bring_up(&self, role: Role, config: &RadioConfig) -> Result<(), RadioError> {
        self.disable()?;
        self.configure(config)?;
        self.disable()?;
        self.arm(role)?;
        self.start()
    }
}

#[cfg(test)]
mod test {
    use super::{CrcStatus, Radio, RadioState, Role};
    use crate::config::{Frequency, LinkAddress, RadioConfig, TransmitPower};
    use crate::error::RadioError;
    use crate::packet::PacketBuffer;
    use crate::poll::PollLimit;
    use crate::registers::radio;
    use crate::test_util::FakeNrf52;

    const LIMIT: PollLimit = PollLimit::attempts(100);

    #[test]
    fn state_decoding() {
        assert_eq!(RadioState::from_raw(0), RadioState::Disabled);
        assert_eq!(RadioState::from_raw(3), RadioState::Rx);
        assert_eq!(RadioState::from_raw(11), RadioState::Tx);
        assert_eq!(RadioState::from_raw(5), RadioState::Unknown(5));
        assert_eq!(RadioState::from_raw(0x13), RadioState::Unknown(0x13));
    }

    #[test]
    fn configure_writes_link_registers() {
        let buffer = PacketBuffer::new();
        let nrf = FakeNrf52::new(&buffer);
        let radio = Radio::new(&nrf, &buffer, LIMIT);
        let config = RadioConfig {
            address: LinkAddress {
                prefix: 0xAA,
                base: 0xDEAD_BEEF,
            },
            frequency: Frequency::new(98).unwrap(),
            ..RadioConfig::link_default()
        };

        radio.configure(&config).unwrap();

        assert_eq!(nrf.value(radio::BASE0), 0xDEAD_BEEF);
        assert_eq!(nrf.value(radio::PREFIX0), 0xAA);
        assert_eq!(nrf.value(radio::FREQUENCY), 98);
        assert_eq!(nrf.value(radio::PCNF1), 0x40101);
        assert_eq!(nrf.value(radio::PCNF0), 0);
        assert_eq!(nrf.value(radio::MODE), 1);
        assert_eq!(nrf.value(radio::MODECNF0), 1);
        assert_eq!(nrf.value(radio::CRCCNF), 3);
        assert_eq!(nrf.value(radio::PACKETPTR), buffer.dma_address());
        assert_eq!(nrf.value(radio::RXADDRESSES), 1);
        assert_eq!(nrf.value(radio::TXPOWER), 4);
    }

    #[test]
    fn configure_accepts_every_channel() {
        let buffer = PacketBuffer::new();
        let nrf = FakeNrf52::new(&buffer);
        let radio = Radio::new(&nrf, &buffer, LIMIT);

        for channel in 0..=100 {
            let config = RadioConfig {
                frequency: Frequency::new(channel).unwrap(),
                ..RadioConfig::link_default()
            };
            radio.configure(&config).unwrap();
            assert_eq!(nrf.value(radio::FREQUENCY), u32::from(channel));
        }
    }

    #[test]
    fn configure_refuses_outside_disabled() {
        let buffer = PacketBuffer::new();
        let nrf = FakeNrf52::new(&buffer);
        let radio = Radio::new(&nrf, &buffer, LIMIT);

        radio.arm_receive().unwrap();

        assert_eq!(
            radio.configure(&RadioConfig::link_default()),
            Err(RadioError::NotDisabled(RadioState::RxIdle))
        );
        assert_eq!(nrf.writes_to(radio::BASE0), 0);
    }

    #[test]
    fn configure_refuses_power_above_ceiling() {
        let buffer = PacketBuffer::new();
        let nrf = FakeNrf52::new(&buffer);
        let radio = Radio::new(&nrf, &buffer, LIMIT);
        let config = RadioConfig {
            tx_power: TransmitPower::Pos8dBm,
            tx_power_ceiling: TransmitPower::Pos4dBm,
            ..RadioConfig::link_default()
        };

        assert!(matches!(
            radio.configure(&config),
            Err(RadioError::TxPowerAboveCeiling { .. })
        ));
        assert_eq!(nrf.writes_to(radio::TXPOWER), 0);
    }

    #[test]
    fn disable_then_arm_receive_reaches_rxidle() {
        let buffer = PacketBuffer::new();
        let nrf = FakeNrf52::new(&buffer);
        let radio = Radio::new(&nrf, &buffer, LIMIT);

        radio.disable().unwrap();
        assert_eq!(radio.state(), RadioState::Disabled);
        radio.arm_receive().unwrap();
        assert_eq!(radio.state(), RadioState::RxIdle);
        assert_eq!(radio.role(), Some(Role::Receiver));

        radio.start().unwrap();
        assert_eq!(radio.state(), RadioState::Rx);
    }

    #[test]
    fn disable_then_arm_transmit_reaches_txidle() {
        let buffer = PacketBuffer::new();
        let nrf = FakeNrf52::new(&buffer);
        let radio = Radio::new(&nrf, &buffer, LIMIT);

        radio.disable().unwrap();
        radio.arm_transmit().unwrap();
        assert_eq!(radio.state(), RadioState::TxIdle);
        assert_eq!(nrf.writes_to(radio::TASKS_TXEN), 1);
        assert_eq!(nrf.writes_to(radio::TASKS_RXEN), 0);
    }

    #[test]
    fn start_requires_arming() {
        let buffer = PacketBuffer::new();
        let nrf = FakeNrf52::new(&buffer);
        let radio = Radio::new(&nrf, &buffer, LIMIT);

        radio.disable().unwrap();
        assert_eq!(
            radio.start(),
            Err(RadioError::NotIdle(RadioState::Disabled))
        );
        assert_eq!(nrf.writes_to(radio::TASKS_START), 0);

        radio.arm_receive().unwrap();
        radio.disable().unwrap();
        assert_eq!(
            radio.start(),
            Err(RadioError::NotIdle(RadioState::Disabled))
        );
    }

    #[test]
    fn disable_timeout() {
        let buffer = PacketBuffer::new();
        let nrf = FakeNrf52::new(&buffer);
        nrf.poke(radio::STATE, 2);
        nrf.stall_disable();
        let radio = Radio::new(&nrf, &buffer, PollLimit::attempts(20));

        assert_eq!(radio.disable(), Err(RadioError::RadioDisableTimeout));
        assert_eq!(nrf.reads_of(radio::STATE), 20);
    }

    #[test]
    fn ready_timeout() {
        let buffer = PacketBuffer::new();
        let nrf = FakeNrf52::new(&buffer);
        nrf.stall_ready();
        let radio = Radio::new(&nrf, &buffer, PollLimit::attempts(20));

        radio.disable().unwrap();
        assert_eq!(radio.arm_transmit(), Err(RadioError::RadioReadyTimeout));
        assert_eq!(radio.role(), None);
    }

    #[test]
    fn stale_ready_event_does_not_satisfy_arm() {
        let buffer = PacketBuffer::new();
        let nrf = FakeNrf52::new(&buffer);
        nrf.poke(radio::EVENTS_READY, 1);
        nrf.stall_ready();
        let radio = Radio::new(&nrf, &buffer, PollLimit::attempts(20));

        assert_eq!(radio.arm_receive(), Err(RadioError::RadioReadyTimeout));
    }

    #[test]
    fn bring_up_sequence() {
        let buffer = PacketBuffer::new();
        let nrf = FakeNrf52::new(&buffer);
        let radio = Radio::new(&nrf, &buffer, LIMIT);

        radio
            .bring_up(Role::Receiver, &RadioConfig::link_default())
            .unwrap();

        let tasks: std::vec::Vec<_> = nrf
            .write_log()
            .into_iter()
            .map(|(reg, _)| reg)
            .filter(|reg| {
                [
                    radio::TASKS_DISABLE,
                    radio::BASE0,
                    radio::TASKS_RXEN,
                    radio::TASKS_START,
                ]
                .contains(reg)
            })
            .collect();
        assert_eq!(
            tasks,
            [
                radio::TASKS_DISABLE,
                radio::BASE0,
                radio::TASKS_DISABLE,
                radio::TASKS_RXEN,
                radio::TASKS_START,
            ]
        );
        assert_eq!(radio.state(), RadioState::Rx);
    }

    #[test]
    fn bring_up_stops_at_first_failure() {
        let buffer = PacketBuffer::new();
        let nrf = FakeNrf52::new(&buffer);
        nrf.stall_ready();
        let radio = Radio::new(&nrf, &buffer, LIMIT);

        assert_eq!(
            radio.bring_up(Role::Transmitter, &RadioConfig::link_default()),
            Err(RadioError::RadioReadyTimeout)
        );
        assert_eq!(nrf.writes_to(radio::TASKS_START), 0);
    }

    #[test]
    fn buffer_is_locked_while_in_flight() {
        let buffer = PacketBuffer::new();
        let nrf = FakeNrf52::new(&buffer);
        let radio = Radio::new(&nrf, &buffer, LIMIT);
        nrf.set_tx_airtime(3);

        radio.set_payload(7).unwrap();
        radio
            .bring_up(Role::Transmitter, &RadioConfig::link_default())
            .unwrap();

        assert_eq!(radio.payload(), Err(RadioError::Busy));
        assert_eq!(radio.set_payload(8), Err(RadioError::Busy));

        while !radio.is_operation_complete(Role::Transmitter) {}
        assert_eq!(radio.payload(), Ok(7));
        assert_eq!(nrf.sent(), [7]);
    }

    #[test]
    fn completion_for_the_other_role_keeps_the_buffer_locked() {
        let buffer = PacketBuffer::new();
        let nrf = FakeNrf52::new(&buffer);
        let radio = Radio::new(&nrf, &buffer, LIMIT);
        radio
            .bring_up(Role::Receiver, &RadioConfig::link_default())
            .unwrap();

        assert!(!radio.is_operation_complete(Role::Transmitter));
        assert_eq!(radio.set_payload(0x55), Err(RadioError::Busy));
        assert_eq!(radio.payload(), Err(RadioError::Busy));
        assert_eq!(radio.state(), RadioState::Rx);
        assert_eq!(buffer.load_payload(), 0);
    }

    #[test]
    fn buffer_stays_locked_until_the_radio_settles() {
        let buffer = PacketBuffer::new();
        let nrf = FakeNrf52::new(&buffer);
        let radio = Radio::new(&nrf, &buffer, LIMIT);
        radio
            .bring_up(Role::Receiver, &RadioConfig::link_default())
            .unwrap();

        // RXDISABLE: off the air but not yet finished with the buffer.
        nrf.poke(radio::STATE, 4);
        assert!(radio.is_operation_complete(Role::Receiver));
        assert_eq!(radio.payload(), Err(RadioError::Busy));

        nrf.poke(radio::STATE, 0);
        assert!(radio.is_operation_complete(Role::Receiver));
        assert_eq!(radio.payload(), Ok(0));
    }

    #[test]
    fn crc_status_follows_last_reception() {
        let buffer = PacketBuffer::new();
        let nrf = FakeNrf52::new(&buffer);
        let radio = Radio::new(&nrf, &buffer, LIMIT);
        radio
            .bring_up(Role::Receiver, &RadioConfig::link_default())
            .unwrap();

        nrf.push_packet(1, true);
        assert!(radio.is_operation_complete(Role::Receiver));
        assert_eq!(radio.crc_status(), CrcStatus::Ok);

        radio.start().unwrap();
        nrf.push_packet(2, false);
        assert!(radio.is_operation_complete(Role::Receiver));
        assert_eq!(radio.crc_status(), CrcStatus::Error);
        assert_eq!(radio.payload(), Ok(2));
    }
}
