//! PDF Page Report - Entry point
//!
//! Prints a page-by-page structural report of a PDF to standard output.

use clap::Parser;
use pdf_page_report::{
    generate_report, FailurePolicy, OutputEncoding, ReportConfig, TableStrategy, TextEngine,
};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "pdf-page-report",
    about = "Report the text, tables, images and rectangles on each page of a PDF",
    version
)]
struct Cli {
    /// PDF file to report on
    path: PathBuf,

    /// Password for encrypted PDFs
    #[arg(long)]
    password: Option<String>,

    /// Pages to report (e.g., "1-3,7"); all pages by default
    #[arg(short, long)]
    pages: Option<String>,

    /// Output encoding: utf-8, utf-8-bom, utf-16le or ascii
    #[arg(short, long, default_value = "utf-8")]
    encoding: OutputEncoding,

    /// Report pages that fail to extract and keep going instead of stopping
    #[arg(short = 'k', long)]
    keep_going: bool,

    /// Table detection: lattice, lattice-strict or stream
    #[arg(long, default_value = "lattice")]
    table_strategy: TableStrategy,

    /// Where page text comes from: plumber or pdfium
    #[arg(long, default_value = "plumber")]
    text_engine: TextEngine,
}

impl Cli {
    fn into_config(self) -> ReportConfig {
        let mut config = ReportConfig::new(self.path);
        config.password = self.password;
        config.pages = self.pages;
        config.encoding = self.encoding;
        config.failure_policy = if self.keep_going {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        };
        config.table_strategy = self.table_strategy;
        config.text_engine = self.text_engine;
        config
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_page_report=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Cli::parse().into_config();

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    generate_report(&config, &mut out)?;
    out.flush()?;

    Ok(())
}
