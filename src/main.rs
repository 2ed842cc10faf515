mod opt;

use anyhow::Context;
use anyhow::Result;
use books_setup::Layout;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let Some(args) = opt::parse(env::args_os().skip(1).collect())? else {
        print!("{}", opt::USAGE);
        return Ok(());
    };

    let base_dir = match args.base_dir {
        Some(dir) => dir,
        None => env::current_dir().context("couldn't determine the current directory")?,
    };

    let layout = Layout::resolve(&base_dir, &args.data_dir, &args.scripts_dir);

    let summary = books_setup::run(&layout)?;

    print!("{summary}");

    Ok(())
}
