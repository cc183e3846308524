// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Console and delay for the board.

use cortex_m::peripheral::SYST;
use embedded_hal::delay::DelayNs;
use rtt_target::{rtt_init_default, UpChannel};

/// Core clock once the HFXO runs.
pub const CORE_CLOCK_HZ: u32 = 64_000_000;

/// Set up the RTT control block and return up-channel 0.
///
/// Must only be called once.
pub fn console() -> UpChannel {
    let channels = rtt_init_default!();
    channels.up.0
}

/// Busy-wait delay on the SysTick counter.
pub struct SysTickDelay(cortex_m::delay::Delay);

impl SysTickDelay {
    pub fn new(syst: SYST) -> SysTickDelay {
        SysTickDelay(cortex_m::delay::Delay::new(syst, CORE_CLOCK_HZ))
    }
}

impl DelayNs for SysTickDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.delay_us(ns.div_ceil(1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.0.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.delay_ms(ms);
    }
}
