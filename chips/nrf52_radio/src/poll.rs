// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Bounded busy-waiting on hardware status registers.

use tock_registers::interfaces::Readable;
use tock_registers::LocalRegisterCopy;

/// Maximum number of register reads spent waiting for a hardware condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollLimit(u32);

impl PollLimit {
    /// Roughly 15 ms of polling at 64 MHz, an order of magnitude above the
    /// HFXO startup time and far above radio ramp-up.
    pub const DEFAULT: PollLimit = PollLimit(100_000);

    /// At least one read is always made.
    pub const fn attempts(attempts: u32) -> PollLimit {
        if attempts == 0 {
            PollLimit(1)
        } else {
            PollLimit(attempts)
        }
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for PollLimit {
    fn default() -> Self {
        PollLimit::DEFAULT
    }
}

/// Read `reg` until `done` accepts its value.
///
/// Returns the accepted value, or `None` if `limit` reads were made without
/// the condition holding.
pub fn wait_for<Reg, F>(
    reg: &Reg,
    limit: PollLimit,
    done: F,
) -> Option<LocalRegisterCopy<u32, Reg::R>>
where
    Reg: Readable<T = u32>,
    Reg::R: Copy,
    F: Fn(LocalRegisterCopy<u32, Reg::R>) -> bool,
{
    for _ in 0..limit.get() {
        let value = reg.extract();
        if done(value) {
            return Some(value);
        }
        core::hint::spin_loop();
    }
    None
}
