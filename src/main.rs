use anyhow::Result;
use clap::Parser;

use benching_machine::cli::{self, Cli};
use benching_machine::panic_handler;

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level.as_str())).init();
    panic_handler::install_panic_handler();

    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(cli::execute(cli))
}
