//! doxyrst — turn Doxygen XML output into reStructuredText for Sphinx.
//!
//! Reads `index.xml` from the input directory, finds the root namespace,
//! and walks it down to every class and interface, loading one
//! `<refid>.xml` file per node. Pages are written under the output
//! directory: `api.rst` for the root and `api/...` for everything below.
//!
//! ```text
//! doxyrst -i xml -o docs -r 'Mike42::ImagePhp'
//! ```

mod model;
mod parser;
mod render;
mod scope;

use anyhow::{bail, Context, Result};
use clap::Parser;
use parser::XmlDirectory;
use render::Generator;
use scope::RootScope;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "doxyrst",
    about = "Generate Sphinx PHP-domain reStructuredText from Doxygen XML",
    version
)]
struct Cli {
    /// Directory holding Doxygen's XML output (index.xml and one file per compound)
    #[arg(short = 'i', long, default_value = "xml")]
    input: PathBuf,

    /// Directory to write api.rst and the api/ tree into
    #[arg(short = 'o', long, default_value = ".")]
    output: PathBuf,

    /// Root namespace; only it and its descendants are rendered
    #[arg(short = 'r', long, default_value = "Mike42::ImagePhp")]
    root: String,

    /// Print every file opened and every page written
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let source = XmlDirectory::new(&cli.input);
    let entries = source
        .load_index()
        .with_context(|| format!("failed to read index from {}", source.path().display()))?;
    let Some(root) = parser::index::find_namespace(&entries, &cli.root) else {
        bail!(
            "namespace {} not found in {}",
            cli.root,
            source.path().join("index.xml").display()
        );
    };

    let mut generator = Generator::new(&source, RootScope::new(&cli.root), &cli.output);
    generator.render_namespace(&root.ref_id, &root.name)?;

    let failures = generator.failures();
    if failures > 0 {
        bail!("{} node(s) could not be loaded; their pages were not written", failures);
    }
    Ok(())
}
