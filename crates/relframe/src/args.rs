use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use relframe_core::DisplayConfig;
use relframe_csv::{DialectOptions, ReadOptions};
use relframe_error::Result;

/// Evaluate relational algebra over delimited text files.
#[derive(Parser)]
#[clap(name = "relframe", version)]
pub struct Arguments {
    #[clap(subcommand)]
    pub command: Commands,

    #[clap(flatten)]
    pub opts: GlobalOpts,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a relation read from a file.
    Show {
        /// Delimited file whose first line is the header.
        file: PathBuf,
    },
    /// Print the rows of a file matching a condition.
    ///
    /// The condition has the form `<column> <op> <column-or-literal>`, for
    /// example `MajorId == 10`.
    Query {
        file: PathBuf,
        condition: String,
    },
    /// Run a chain of example operators over the college data set.
    Demo {
        /// Directory containing STUDENT.csv, ENROLL.csv, SECTION.csv and
        /// COURSE.csv.
        #[clap(long, default_value = "testdata/college")]
        data_dir: PathBuf,
    },
}

#[derive(Debug, Clone, Parser)]
pub struct GlobalOpts {
    /// Display output mode.
    #[clap(long, global = true, value_enum, default_value_t = OutputMode::Table)]
    pub mode: OutputMode,

    /// Field delimiter of input files. Use `\t` for tabs.
    #[clap(long, global = true, env = "RELFRAME_DELIMITER", default_value = ",")]
    pub delimiter: String,

    /// Trim whitespace around headers and values of input files.
    #[clap(long, global = true)]
    pub trim: bool,

    /// Max number of rows to display.
    #[clap(long, global = true, env = "RELFRAME_MAX_ROWS")]
    pub max_rows: Option<usize>,

    /// Log level used unless RUST_LOG is set.
    #[clap(long, global = true, env = "RELFRAME_LOG_LEVEL", default_value_t = tracing::Level::WARN)]
    pub log_level: tracing::Level,
}

impl GlobalOpts {
    pub fn dialect(&self) -> Result<DialectOptions> {
        DialectOptions::with_delimiter(&self.delimiter)
    }

    pub fn read_options(&self) -> Result<ReadOptions> {
        Ok(ReadOptions {
            dialect: self.dialect()?,
            trim: self.trim,
        })
    }

    pub fn display_config(&self) -> DisplayConfig {
        DisplayConfig::default().with_max_rows(self.max_rows)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Column aligned table.
    Table,
    /// Delimited text using the input dialect.
    Csv,
}
