use anyhow::Result;
use clap::Parser as ClapParser;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;

use cli::command::{Cli, Commands, LogFormat, LogLevel};
use cli::encode::cmd_encode;
use cli::info::cmd_info;

mod cli;
mod input;
mod report;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let multi = MultiProgress::new();

    let mut env_builder = env_logger::Builder::from_default_env();
    let rust_log_set = std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some();
    if let Some(level) = LogLevel::effective_filter(cli.loglevel, rust_log_set) {
        env_builder.filter_level(level);
    }
    match cli.log_format {
        LogFormat::Plain => {
            env_builder.format_timestamp_secs();
        }
        LogFormat::Json => {
            env_builder.format(|buf, record| {
                use std::io::Write;
                let line = json_log_line(
                    &buf.timestamp().to_string(),
                    record.level(),
                    &record.args().to_string(),
                );
                writeln!(buf, "{line}")
            });
        }
    }

    let pb = if cli.progress {
        let logger = env_builder.build();
        let level = logger.filter();
        LogWrapper::new(multi.clone(), logger).try_init()?;
        log::set_max_level(level);
        Some(&multi)
    } else {
        env_builder.try_init()?;
        None
    };

    match cli.command {
        Commands::Encode(ref args) => cmd_encode(args, pb)?,
        Commands::Info(ref args) => cmd_info(args)?,
    }

    Ok(())
}

/// One log record as a single-line JSON object.
fn json_log_line(ts: &str, level: log::Level, msg: &str) -> String {
    serde_json::json!({
        "ts": ts,
        "lvl": level.as_str(),
        "msg": msg,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_log_line_escapes_message() {
        let line = json_log_line(
            "2026-10-19T12:00:00Z",
            log::Level::Warn,
            "\u{1b}[1m\"capture.pdm\" is empty\n",
        );

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["ts"], "2026-10-19T12:00:00Z");
        assert_eq!(value["lvl"], "WARN");
        assert_eq!(value["msg"], "\u{1b}[1m\"capture.pdm\" is empty\n");
        assert!(!line.contains('\n'));
    }
}
