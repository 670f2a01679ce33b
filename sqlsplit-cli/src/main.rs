use clap::Parser;
use sqlsplit_cli::commands::SplitArgs;
use sqlsplit_cli::CliResult;

fn main() -> CliResult<()> {
    SplitArgs::parse().execute()
}
