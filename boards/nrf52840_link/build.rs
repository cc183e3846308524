// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Makes `memory.x` visible to the `link.x` script of `cortex-m-rt`.

use std::path::Path;

const MEMORY_LAYOUT: &str = "memory.x";

fn main() {
    if !Path::new(MEMORY_LAYOUT).exists() {
        panic!("Boards must provide a `{}` memory layout", MEMORY_LAYOUT);
    }

    // Include the folder where the board's Cargo.toml is in the linker file
    // search path.
    println!("cargo:rustc-link-search={}", std::env!("CARGO_MANIFEST_DIR"));

    println!("cargo:rerun-if-changed={}", MEMORY_LAYOUT);
    println!("cargo:rerun-if-changed=build.rs");
}
