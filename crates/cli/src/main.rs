// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jb: run build jobs inside containers

mod env;
mod exit_error;
mod logging;
mod run;

use clap::Parser;
use exit_error::ExitError;
use jb_config::DEFAULT_CONFIG_FILE;
use jb_core::{LogSink, SystemClock, TracingSink};
use jb_engine::DockerRuntime;
use run::BuildRun;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "jb", version, about = "Run build jobs inside containers")]
struct Cli {
    /// Build configuration file (.yaml, .yml, .toml or .json)
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Container runtime program; overrides JB_CONTAINER_RUNTIME (default: docker)
    #[arg(long, value_name = "PROGRAM")]
    runtime: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(&env::log_filter()) {
        eprintln!("jb: {:#}", e);
        return ExitCode::FAILURE;
    }

    match build(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(code = e.code, error = %e, "build failed");
            ExitCode::from(u8::try_from(e.code).unwrap_or(1))
        }
    }
}

async fn build(cli: Cli) -> Result<(), ExitError> {
    let sink: Arc<dyn LogSink> = Arc::new(TracingSink);
    let program = cli.runtime.unwrap_or_else(env::container_runtime);

    let run = BuildRun::for_current_process(cli.config)
        .map_err(|e| run::fail(sink.as_ref(), format!("could not create build context: {}", e)))?;
    run.execute(DockerRuntime::new(program), SystemClock, sink).await
}
