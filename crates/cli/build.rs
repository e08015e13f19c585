// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Build scripts are expected to panic on failure.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::io::Write;

fn main() {
    let out_dir = std::env::var("OUT_DIR").unwrap();
    let path = std::path::Path::new(&out_dir).join("env_names.rs");
    let mut f = std::fs::File::create(path).unwrap();

    let vars = [
        ("LZHARNESS_BINARY", "LZHARNESS_BINARY"),
        ("LZHARNESS_ROOT", "LZHARNESS_ROOT"),
        ("LZHARNESS_CONFIG", "LZHARNESS_CONFIG"),
        ("LZHARNESS_LOG", "LZHARNESS_LOG"),
        ("TF_PLUGIN_CACHE_DIR", "TF_PLUGIN_CACHE_DIR"),
        ("TF_DATA_DIR", "TF_DATA_DIR"),
        ("TF_IN_AUTOMATION", "TF_IN_AUTOMATION"),
        ("PATH", "PATH"),
        ("NO_COLOR", "NO_COLOR"),
    ];

    for (const_name, env_name) in vars {
        writeln!(f, "pub const {const_name}: &str = \"{env_name}\";").unwrap();
    }
    println!("cargo:rerun-if-changed=build.rs");
}
