mod args;
mod demo;
mod output;

use std::io::{self, BufWriter, Write};

use args::{Arguments, Commands};
use clap::Parser;
use relframe_csv::read_relation;
use relframe_error::Result;

/// Command line front end for evaluating relational operators over files.
fn main() {
    let args = Arguments::parse();
    logutil::configure_global_logger(
        args.opts.log_level,
        logutil::LogFormat::HumanReadable,
        io::stderr,
    );

    if let Err(err) = run(args) {
        println!("ERROR: {err}");
        std::process::exit(1);
    }
}

fn run(args: Arguments) -> Result<()> {
    let opts = args.opts;
    let read_opts = opts.read_options()?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match args.command {
        Commands::Show { file } => {
            let rel = read_relation(&file, &read_opts)?;
            output::write_output(&mut out, &rel.to_ordered(), &opts)?;
        }
        Commands::Query { file, condition } => {
            let rel = read_relation(&file, &read_opts)?;
            let result = rel.query(&condition)?;
            output::write_output(&mut out, &result.to_ordered(), &opts)?;
        }
        Commands::Demo { data_dir } => {
            let steps = demo::run_demo(&data_dir, &read_opts)?;
            for (idx, step) in steps.iter().enumerate() {
                if idx > 0 {
                    writeln!(out)?;
                }
                writeln!(out, "-- {}", step.title)?;
                output::write_output(&mut out, &step.output, &opts)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}
