extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate fzsearch;

use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use fzsearch::prelude::*;
use fzsearch::reader::{RecordFormat, read_records, read_records_from_path};

/// Approximate search over a collection of records read from a file or stdin.
///
/// Prints the matching records as JSON, best match first.
#[derive(Parser, Debug)]
#[command(name = "fzs", version, about)]
struct Cli {
    /// The pattern to search for
    pattern: String,

    /// File holding the records, stdin when absent
    file: Option<PathBuf>,

    /// Layout of the records in the input
    #[arg(long, value_enum, default_value_t = RecordFormat::Auto)]
    format: RecordFormat,

    /// Print the results as one indented JSON array instead of one item per line
    #[arg(long)]
    pretty: bool,

    #[command(flatten)]
    options: SearchOptions,
}

//------------------------------------------------------------------------------
fn main() {
    env_logger::builder().format_timestamp_nanos().init();
    let _ = color_eyre::install();

    match real_main() {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            // if downstream pipe is closed, exit silently
            if is_broken_pipe(&err) {
                std::process::exit(0)
            }
            eprintln!("{err:?}");
            std::process::exit(2)
        }
    }
}

fn is_broken_pipe(err: &color_eyre::Report) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|e| e.kind() == std::io::ErrorKind::BrokenPipe)
    })
}

fn real_main() -> Result<i32> {
    let cli = Cli::parse();
    cli.options.validate()?;

    //------------------------------------------------------------------------------
    // read the collection
    let records = match &cli.file {
        Some(path) => read_records_from_path(path, cli.format)
            .wrap_err_with(|| format!("could not read records from {}", path.display()))?,
        None => read_records(BufReader::new(std::io::stdin().lock()), cli.format)?,
    };
    debug!("loaded {} records", records.len());

    //------------------------------------------------------------------------------
    // search
    let hits = fzsearch::search(&records, &cli.pattern, &cli.options)?;

    //------------------------------------------------------------------------------
    // output
    let mut stdout = BufWriter::new(std::io::stdout().lock());
    if cli.pretty {
        serde_json::to_writer_pretty(&mut stdout, &hits)?;
        writeln!(stdout)?;
    } else {
        for hit in &hits {
            serde_json::to_writer(&mut stdout, hit)?;
            writeln!(stdout)?;
        }
    }
    stdout.flush()?;

    Ok(if hits.is_empty() { 1 } else { 0 })
}
