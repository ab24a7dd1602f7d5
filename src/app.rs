//! Main application logic and orchestration.

use crate::{
    accessor::{Batch, RecordAccessor},
    cli::{Config, Mode},
    error::Result,
    export::{export, ExportFormat},
    output::{FieldSelection, OutputWriter},
    reader::ArtifactReader,
    scanner::scan_directory,
    scca::SccaReader,
    search::search,
    timeline::build_timeline,
};
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use std::io::Write;
use std::path::Path;

/// Main application runner
pub struct App<R: ArtifactReader = SccaReader> {
    config: Config,
    accessor: RecordAccessor<R>,
}

impl App<SccaReader> {
    /// Create a new application instance reading real prefetch files
    pub fn new(config: Config) -> Self {
        Self::with_reader(config, SccaReader::new())
    }
}

impl<R: ArtifactReader> App<R> {
    /// Create an application instance backed by a custom reader
    pub fn with_reader(config: Config, reader: R) -> Self {
        Self {
            config,
            accessor: RecordAccessor::new(reader),
        }
    }

    /// Run the configured operation, printing results to stdout
    pub fn run(self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        self.run_with_writer(&mut handle)
    }

    /// Run the configured operation, printing results to `writer`
    pub fn run_with_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        match &self.config.mode {
            Mode::Single { path, fields } => self.inspect_file(path, *fields, writer),
            Mode::Timeline { directory } => self.print_timeline(directory, writer),
            Mode::Search { directory, term } => self.print_search(directory, term, writer),
            Mode::Export {
                directory,
                format,
                output,
            } => self.export_directory(directory, *format, output),
        }
    }

    fn inspect_file<W: Write>(&self, path: &Path, fields: FieldSelection, writer: &mut W) -> Result<()> {
        let record = self.accessor.open(path)?;
        OutputWriter::write_record(&record, fields, writer, self.config.timezone)?;
        writer.flush()?;
        Ok(())
    }

    fn print_timeline<W: Write>(&self, directory: &Path, writer: &mut W) -> Result<()> {
        let batch = self.load_directory(directory)?;
        let entries = build_timeline(&batch.records);
        OutputWriter::write_timeline(&entries, writer, self.config.timezone)?;
        writer.flush()?;
        Ok(())
    }

    fn print_search<W: Write>(&self, directory: &Path, term: &str, writer: &mut W) -> Result<()> {
        let batch = self.load_directory(directory)?;
        let hits = search(term, &batch.records);
        eprintln!("🔍 '{}' matched files in {} of {} executables", term, hits.len(), batch.records.len());
        OutputWriter::write_search_hits(&hits, writer)?;
        writer.flush()?;
        Ok(())
    }

    fn export_directory(&self, directory: &Path, format: ExportFormat, output: &Path) -> Result<()> {
        let batch = self.load_directory(directory)?;
        export(&batch.records, format, output)?;
        eprintln!("💾 Exported {} records to {}", batch.records.len(), output.display());
        Ok(())
    }

    /// Scan and read every artifact in `directory` under the configured batch policy
    fn load_directory(&self, directory: &Path) -> Result<Batch> {
        let paths = scan_directory(directory)?;
        eprintln!("📂 Reading {} prefetch files from {}", paths.len(), directory.display());

        let pb = if std::io::stderr().is_terminal() {
            ProgressBar::new(paths.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"));
        pb.set_message("Reading artifacts");

        let outcomes = self.accessor.read_all_with_progress(&paths, || pb.inc(1));
        let batch = self.config.batch_policy.collect(outcomes);
        pb.finish_and_clear();

        let batch = batch?;
        if !batch.failures.is_empty() {
            eprintln!("⚠️  Skipped {} unreadable prefetch files", batch.failures.len());
        }
        Ok(batch)
    }
}
