//! `user-directory` entry point: loads configuration, wires adapters and runs
//! one command.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use directory::DirectorySettings;
use directory::domain::ports::{ColorSchemeSignal, FixedColorScheme};
use directory::inbound::cli::{App, Cli};
use directory::outbound::color_scheme::TerminalColorScheme;
use directory::outbound::dummyjson::DummyJsonHttpSource;
use directory::outbound::preferences::FilePreferenceStorage;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let settings = DirectorySettings::load_from_iter([OsString::from("user-directory")])
        .map_err(|error| eyre!("load configuration: {error}"))?;
    let base_url = settings.base_url().wrap_err("parse base URL")?;
    let source = Arc::new(DummyJsonHttpSource::new(base_url, settings.timeout())?);
    let state_dir = settings.state_dir();
    let storage = Arc::new(
        FilePreferenceStorage::open(&state_dir)
            .wrap_err_with(|| format!("open state directory {state_dir}"))?,
    );
    let color_scheme: Box<dyn ColorSchemeSignal> = match settings.color_scheme_override()? {
        Some(theme) => Box::new(FixedColorScheme(Some(theme))),
        None => Box::new(TerminalColorScheme::from_env()),
    };

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    let mut app = App::new(source, storage, color_scheme.as_ref());
    let outcome = runtime.block_on(async {
        let mut stdout = io::stdout().lock();
        app.run(cli.command, &mut stdout).await
    });

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(error) => {
            if let Err(write_err) = writeln!(io::stderr().lock(), "error: {error}") {
                drop(write_err);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let initialised = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(error) = initialised {
        warn!(error = %error, "tracing init failed");
    }
}
