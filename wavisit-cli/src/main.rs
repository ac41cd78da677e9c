use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use patharg::{InputArg, OutputArg};
use std::io::{Read, Write};
use std::process::exit;
use wavisit::visitor::{SectionSizes, Tee};
use wavisit::{Decoder, DecoderConfig};

mod dump;

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The module to decode. If not provided or is '-', read from
    /// standard input.
    #[arg(default_value_t)]
    pub input: InputArg,

    /// Where to write the dump. Defaults to standard output.
    #[arg(short, long, default_value_t)]
    pub output: OutputArg,

    /// Disassemble function bodies.
    #[arg(short = 'd', long, default_value_t = false)]
    pub instructions: bool,

    /// Reject out of order and duplicate sections.
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Print the offset and size of every section after the dump.
    #[arg(long, default_value_t = false)]
    pub sizes: bool,

    /// Enable verbose output: section banners and element counts in the
    /// dump, and debug logging.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(err) = run(&cli) {
        abort(&cli, err);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut bytes = Vec::new();
    cli.input
        .open()
        .and_then(|mut r| r.read_to_end(&mut bytes))
        .with_context(|| format!("failed to read {}", cli.input))?;
    debug!("read {} bytes from {}", bytes.len(), cli.input);

    let config = DecoderConfig::new().strict_section_order(cli.strict);
    let mut printer = dump::Printer::new(cli.verbose, cli.instructions);
    let mut sizes = SectionSizes::new();

    Decoder::with_config(&bytes, config)
        .decode(&mut Tee::new(&mut printer, &mut sizes))
        .context("failed to decode module")?;

    let mut out = cli
        .output
        .create()
        .with_context(|| format!("failed to open {}", cli.output))?;
    out.write_all(printer.finish().as_bytes())?;

    if cli.sizes {
        writeln!(out, ";; {:<10} {:>10} {:>10}", "section", "offset", "size")?;
        for s in &sizes.sections {
            let name = match &s.name {
                Some(name) => format!("{}:{name}", s.kind),
                None => s.kind.to_string(),
            };
            writeln!(out, ";; {name:<10} {:>#10x} {:>10}", s.offset, s.length)?;
        }
        writeln!(out, ";; {:<10} {:>10} {:>10}", "module", "", sizes.module_size)?;
    }

    out.flush()?;
    Ok(())
}

fn abort(cli: &Cli, err: anyhow::Error) -> ! {
    eprintln!("ERROR: {err}");

    let sources: Vec<_> = err.chain().skip(1).collect();
    if !sources.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in sources.iter().enumerate() {
            eprintln!("    {i}: {cause}");
        }
    }

    if cli.verbose {
        eprintln!("\nDEBUG OUTPUT:\n{err:#?}");
    }

    exit(1)
}
