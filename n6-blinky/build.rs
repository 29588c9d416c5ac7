// Copyright (c) 2026 ADNT Sarl <info@adnt.io>
// SPDX-License-Identifier: MIT

//! Hands the first-stage memory layout to `cortex-m-rt` as `memory.x` and
//! exports the workspace version as `N6_BLINKY_VERSION`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const MEMORY_LAYOUT: &str = "linker_scripts/stm32n6_fsbl.x";

fn main() {
    let workspace = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap())
        .join("..")
        .canonicalize()
        .expect("workspace root not found");
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let layout = workspace.join(MEMORY_LAYOUT);
    fs::copy(&layout, out_dir.join("memory.x"))
        .unwrap_or_else(|e| panic!("cannot copy {}: {e}", layout.display()));

    println!("cargo:rustc-link-search={}", out_dir.display());
    for script in ["link.x", "defmt.x"] {
        println!("cargo:rustc-link-arg=-T{script}");
    }

    let version = read_version(&workspace.join("VERSION"));
    println!("cargo:rustc-env=N6_BLINKY_VERSION={version}");

    watch(&layout);
    watch(&workspace.join("VERSION"));
    println!("cargo:rerun-if-changed=build.rs");
}

fn read_version(path: &Path) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
        .trim()
        .to_owned()
}

fn watch(path: &Path) {
    println!("cargo:rerun-if-changed={}", path.display());
}
