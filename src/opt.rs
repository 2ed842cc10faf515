use anyhow::bail;
use anyhow::Result;
use books_setup::DATA_DIR;
use books_setup::SCRIPTS_DIR;
use pico_args::Arguments;
use std::ffi::OsString;
use std::path::PathBuf;

pub const USAGE: &str = "\
Creates data/books.db and runs the setup and seed scripts against it

USAGE:
  books-setup [OPTIONS]

OPTIONS:
  -b, --base-dir DIR     Directory relative paths resolve against [default: current directory]
      --data-dir DIR     Directory holding books.db [default: data]
      --scripts-dir DIR  Directory holding the SQL scripts [default: scripts]
  -h, --help             Print help
";

#[derive(Debug, PartialEq, Eq)]
pub struct Args {
    pub base_dir: Option<PathBuf>,
    pub data_dir: PathBuf,
    pub scripts_dir: PathBuf,
}

/// Parses the command line, not including the program name. Returns `None` when help was
/// requested.
pub fn parse(args: Vec<OsString>) -> Result<Option<Args>> {
    let mut pargs = Arguments::from_vec(args);

    if pargs.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let args = Args {
        base_dir: pargs.opt_value_from_str(["-b", "--base-dir"])?,
        data_dir: pargs
            .opt_value_from_str("--data-dir")?
            .unwrap_or_else(|| PathBuf::from(DATA_DIR)),
        scripts_dir: pargs
            .opt_value_from_str("--scripts-dir")?
            .unwrap_or_else(|| PathBuf::from(SCRIPTS_DIR)),
    };

    let rest = pargs.finish();
    if !rest.is_empty() {
        bail!("unexpected arguments: {rest:?}");
    }

    Ok(Some(args))
}
