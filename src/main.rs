// Author: KeiraOMG0
// License: GPL-3.0-or-later

//! Entry point for the `ker` command.

mod cli;

use tracing_subscriber::EnvFilter;

use cli::AppInfo;

static APP: AppInfo = AppInfo {
    name: "ker",
    version: env!("CARGO_PKG_VERSION"),
    author: env!("CARGO_PKG_AUTHORS"),
    goal: env!("CARGO_PKG_DESCRIPTION"),
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("KER_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    std::process::exit(cli::run(&APP, std::env::args_os()));
}
