//! Command-line front end: reads the method snippet from a file or stdin,
//! optionally a companion-declarations file, and prints the rendered curl
//! command.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;

const HELP: &str = "\
snipcurl — render a curl command from a Spring-annotated method snippet

USAGE:
  snipcurl [OPTIONS] [SNIPPET_FILE]

  Reads the method snippet from SNIPPET_FILE, or from stdin when omitted.

OPTIONS:
  -t, --types <FILE>   Companion class/interface declarations
  -h, --help           Print this help
";

fn main() -> anyhow::Result<()> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let types_file: Option<PathBuf> = args.opt_value_from_str(["-t", "--types"])?;
    let snippet_file: Option<PathBuf> = args.opt_free_from_str()?;
    let remaining = args.finish();
    if !remaining.is_empty() {
        anyhow::bail!("unexpected arguments: {remaining:?}");
    }

    let snippet = match &snippet_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading snippet from {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading snippet from stdin")?;
            buffer
        }
    };
    let declarations = match &types_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading declarations from {}", path.display()))?,
        None => String::new(),
    };

    let command = snipcurl_core::generate_curl(&snippet, &declarations)?;
    println!("{command}");
    Ok(())
}
