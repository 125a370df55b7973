// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use archtune::{
    manifest::PackageManifest,
    path,
    runner::ProcessRunner,
    steps::{provisioning_steps, run as run_steps},
};

use anyhow::{Context, Result};
use clap::Parser;
use std::{fs, process::exit};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Clone, Parser)]
#[command(
    about,
    override_usage = "archtune [options]",
    version
)]
struct Cli {
    /// Show debug information.
    #[arg(short, long)]
    pub debug: bool,

    /// Reboot the system after installation.
    #[arg(short, long)]
    pub reboot: bool,
}

impl Cli {
    fn run(self) -> Result<()> {
        let data = fs::read_to_string(path::MANIFEST_PATH)
            .with_context(|| format!("cannot read manifest at {:?}", path::MANIFEST_PATH))?;
        let manifest: PackageManifest = data.parse()?;

        let runner = ProcessRunner::new(self.debug);
        let steps = provisioning_steps(&manifest)?;
        run_steps(&runner, &steps, self.reboot)?;

        Ok(())
    }
}

fn main() {
    let cli = Cli::parse();

    let layer = fmt::layer()
        .compact()
        .with_target(false)
        .without_time();
    let filter = if cli.debug {
        EnvFilter::try_new("debug")
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))
    }
    .unwrap();
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .init();

    if let Err(error) = cli.run() {
        error!("{error:?}");
        exit(1);
    }

    exit(0)
}
