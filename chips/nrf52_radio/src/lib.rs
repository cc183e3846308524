// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Peripheral drivers for a point-to-point link over the nRF52 2.4 GHz radio
//! in proprietary (Nordic 2 Mbit) mode.
//!
//! The crate is layered bottom-up:
//!
//! - [`bus`] and [`registers`]: typed register handles over a volatile bus,
//!   and the per-peripheral register blocks with their field layouts.
//! - [`power`] and [`clock`]: DC/DC regulator and HFCLK bring-up.
//! - [`config`]: addressing, channel and RF settings for the link.
//! - [`radio`]: the DISABLED / IDLE / RX / TX state machine.
//! - [`session`]: the per-role steady-state loop.
//!
//! Every hardware wait is bounded by a [`poll::PollLimit`] and surfaces a
//! [`RadioError`] instead of hanging.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod bus;
pub mod clock;
pub mod config;
pub mod error;
pub mod packet;
pub mod poll;
pub mod power;
pub mod radio;
pub mod registers;
pub mod session;

#[cfg(test)]
mod test_util;

pub use crate::error::RadioError;
