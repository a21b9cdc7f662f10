//! `roster` command line.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use roster_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg, ReportFormatArg};
use roster_cli::commands::{
    exit_status, run_allocate, run_analyze, run_filter, run_rule, run_schema, run_validate,
};
use roster_cli::config::Settings;
use roster_cli::logging::{LogConfig, LogFormat, init_logging};
use roster_cli::summary::{
    print_analysis, print_filter, print_report_json, print_rule, print_validation,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    };
    let exit_code = match run(&cli.command, &settings) {
        Ok(code) => code,
        Err(error) => {
            tracing::error!("command failed: {error:#}");
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(command: &Command, settings: &Settings) -> anyhow::Result<i32> {
    match command {
        Command::Validate(args) => {
            let result = run_validate(args, settings)?;
            match args.format {
                ReportFormatArg::Table => print_validation(&result),
                ReportFormatArg::Json => print_report_json(&result.report)?,
            }
            Ok(exit_status(result.report.valid))
        }
        Command::Filter(args) => {
            let result = run_filter(args, settings)?;
            print_filter(&result);
            Ok(0)
        }
        Command::Rule(args) => {
            let result = run_rule(args, settings)?;
            print_rule(&result);
            Ok(exit_status(result.report.valid))
        }
        Command::Analyze(args) => {
            let result = run_analyze(args, settings)?;
            print_analysis(&result);
            Ok(0)
        }
        Command::Allocate(args) => {
            let result = run_allocate(args, settings)?;
            print_analysis(&result);
            Ok(0)
        }
        Command::Schema => {
            println!("{}", run_schema());
            Ok(0)
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
