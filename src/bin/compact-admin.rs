//! Admin CLI entrypoint for compacting a table or canceling its compactions.
//! Runs single-threaded against the in-memory table operations backend seeded
//! from `--config`, so a table must be listed there to be found.

use std::{path::PathBuf, sync::Arc};

use clap::{Args, Parser};
use compact_admin::{
    command::{CompactCommand, DESCRIPTION},
    config::AdminConfig,
    CompactFlag, OptionValues,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compaction admin CLI")]
enum Command {
    #[command(about = DESCRIPTION)]
    Compact(CompactArgs),
}

#[derive(Args, Debug)]
struct CompactArgs {
    /// Table to operate on.
    #[arg(short = 't', long = "table")]
    table: String,
    /// JSON file with iterator profiles and known tables.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(
        short = short(CompactFlag::BeginRow),
        long = CompactFlag::BeginRow.long_name(),
        help = CompactFlag::BeginRow.description()
    )]
    begin_row: Option<String>,
    #[arg(
        short = short(CompactFlag::EndRow),
        long = CompactFlag::EndRow.long_name(),
        help = CompactFlag::EndRow.description()
    )]
    end_row: Option<String>,
    #[arg(
        long = CompactFlag::NoFlush.long_name(),
        alias = alias(CompactFlag::NoFlush),
        help = CompactFlag::NoFlush.description()
    )]
    no_flush: bool,
    #[arg(
        short = short(CompactFlag::Wait),
        long = CompactFlag::Wait.long_name(),
        help = CompactFlag::Wait.description()
    )]
    wait: bool,
    #[arg(
        long = CompactFlag::Profile.long_name(),
        alias = alias(CompactFlag::Profile),
        help = CompactFlag::Profile.description()
    )]
    profile: Option<String>,
    #[arg(
        short = short(CompactFlag::Strategy),
        long = CompactFlag::Strategy.long_name(),
        help = CompactFlag::Strategy.description()
    )]
    strategy: Option<String>,
    #[arg(
        long = CompactFlag::StrategyConfig.long_name(),
        alias = alias(CompactFlag::StrategyConfig),
        help = CompactFlag::StrategyConfig.description()
    )]
    strategy_config: Option<String>,
    #[arg(
        long = CompactFlag::Cancel.long_name(),
        help = CompactFlag::Cancel.description()
    )]
    cancel: bool,
}

/// Single-character short spelling of `flag`, usable as a clap short.
fn short(flag: CompactFlag) -> Option<char> {
    let mut chars = flag.short_name()?.chars();
    let first = chars.next()?;
    chars.next().is_none().then_some(first)
}

/// Multi-character short spelling of `flag`; clap only takes these as long aliases.
fn alias(flag: CompactFlag) -> Option<&'static str> {
    flag.short_name().filter(|name| name.chars().count() > 1)
}

impl CompactArgs {
    fn option_values(&self) -> OptionValues {
        let valued = [
            (CompactFlag::BeginRow, &self.begin_row),
            (CompactFlag::EndRow, &self.end_row),
            (CompactFlag::Profile, &self.profile),
            (CompactFlag::Strategy, &self.strategy),
            (CompactFlag::StrategyConfig, &self.strategy_config),
        ];
        let presence = [
            (CompactFlag::NoFlush, self.no_flush),
            (CompactFlag::Wait, self.wait),
            (CompactFlag::Cancel, self.cancel),
        ];
        valued
            .into_iter()
            .filter_map(|(flag, value)| value.clone().map(|value| (flag, Some(value))))
            .chain(
                presence
                    .into_iter()
                    .filter(|(_, present)| *present)
                    .map(|(flag, _)| (flag, None)),
            )
            .collect()
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("compact_admin=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Command::parse() {
        Command::Compact(args) => {
            let config = match &args.config {
                Some(path) => AdminConfig::from_path(path)?,
                None => AdminConfig::default(),
            };
            let command = CompactCommand::new(
                Arc::new(config.iterator_profiles()),
                Arc::new(config.table_operations()),
            );
            let status = command
                .build_and_dispatch(&args.option_values(), &args.table)
                .await?;
            println!("{status}");
        }
    }

    Ok(())
}
