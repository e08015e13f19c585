// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! lzharness binary entry point.

use clap::Parser;

use lzharness::app;
use lzharness::cli::Cli;
use lzharness::logging;
use lzharness::output_diagnostic::{print_error, print_warning};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.log_format) {
        print_warning(format_args!("Failed to initialize logging: {}", e));
    }

    let mut stdout = std::io::stdout().lock();
    match app::run(cli, &mut stdout).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            print_error(e);
            std::process::exit(1);
        }
    }
}
