// aum-rs: Among Us Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> ConfigLoader --> Logging --> Command Dispatch
//!   Install | Update | Remove | Activate | Vanilla | Reset
//!   Config | List | Options | Files | <owner>/<repository>
//! ```

use std::process::ExitCode;

use aum_rs::cli::global::GlobalOptions;
use aum_rs::cli::{self, Command};
use aum_rs::cmd::config::{run_files_command, run_options_command};
use aum_rs::cmd::list::run_list_command;
use aum_rs::cmd::mods::{
    open_manager, run_activate_command, run_config_command, run_install_command,
    run_remove_command, run_reset_command, run_update_command, run_vanilla_command,
};
use aum_rs::config::loader::ConfigLoader;
use aum_rs::config::paths::default_root;
use aum_rs::config::{Config, ENV_PREFIX, SETTINGS_FILE_NAME};
use aum_rs::error::{Result, exit_code};
use aum_rs::logging::{LogConfig, LogGuard, init_logging};
use aum_rs::net::ProgressDisplay;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let loader = match build_config_loader(&cli.global) {
        Ok(loader) => loader,
        Err(e) => return report(&e),
    };
    let loaded_files = loader.format_loaded_files();

    let config = match loader.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return report_code(&e);
        }
    };

    let _log_guard = match start_logging(&config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match dispatch_command(&cli, &config, &loaded_files).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn start_logging(config: &Config) -> Result<LogGuard> {
    let log_config = LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(config.global.log_file.clone())
        .build();
    init_logging(&log_config)
}

async fn dispatch_command(cli: &cli::Cli, config: &Config, loaded_files: &[String]) -> Result<()> {
    let progress = if cli.global.no_progress {
        ProgressDisplay::Silent
    } else {
        ProgressDisplay::Bar
    };

    match &cli.command {
        Some(Command::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Files) => {
            run_files_command(loaded_files);
            Ok(())
        }
        Some(Command::List) => run_list_command(config),
        Some(Command::Install(args)) => {
            run_install_command(&mut open_manager(config, progress)?, args).await
        }
        Some(Command::Update(args)) => {
            run_update_command(&mut open_manager(config, progress)?, args).await
        }
        Some(Command::Remove(args)) => {
            run_remove_command(&mut open_manager(config, progress)?, &args.mod_path).await
        }
        Some(Command::Activate(args)) => {
            run_activate_command(&mut open_manager(config, progress)?, &args.mod_path).await
        }
        Some(Command::Vanilla) => run_vanilla_command(&mut open_manager(config, progress)?).await,
        Some(Command::Reset) => run_reset_command(&mut open_manager(config, progress)?).await,
        Some(Command::Config(args)) => {
            run_config_command(&mut open_manager(config, progress)?, &args.path).await
        }
        Some(Command::External(args)) => {
            let mod_path = match Command::external_mod_path(args) {
                Ok(mod_path) => mod_path,
                Err(message) => anyhow::bail!("{message}, use --help for usage information"),
            };
            run_activate_command(&mut open_manager(config, progress)?, &mod_path).await
        }
        None => {
            anyhow::bail!("no command specified, use --help for usage information")
        }
    }
}

/// Default settings file, then `--config` files, then `AUM_*` variables, then
/// command-line overrides.
fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new();

    if !global.no_default_config
        && let Some(root) = global.root.clone().or_else(default_root)
    {
        loader = loader.add_toml_file_optional(root.join(SETTINGS_FILE_NAME));
    }
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);

    for option in global.to_config_overrides() {
        loader = loader.set_option(&option)?;
    }
    Ok(loader)
}

fn report(err: &anyhow::Error) -> ExitCode {
    eprintln!("Error: {err:#}");
    report_code(err)
}

fn report_code(err: &anyhow::Error) -> ExitCode {
    ExitCode::from(exit_code(err))
}
