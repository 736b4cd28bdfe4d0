//! notice — generate a fire-safety and accessibility notice from a project record.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `notice --set general.project_name="Centre Culturel" < projet.toml`
//! - **file mode**: `notice -o notices/ projets/*.toml`
//!
//! Records are TOML files (see `notice --template`). The notice itself is
//! produced by `notice_core::generate`; this binary only collects the record,
//! applies edits and delivers the text.

mod sink;

use anyhow::{bail, Context, Result};
use clap::Parser;
use notice_core::{persist, CatalogId, ProjectRecord, Session, FIELDS};
use sink::{FileSink, Sink};
use std::collections::HashSet;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "notice",
    about = "Generate a fire-safety and accessibility notice from a project record"
)]
struct Cli {
    /// Record files (glob patterns and directories supported). If omitted, reads a record from stdin.
    files: Vec<String>,

    /// Output directory for .txt notices (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Delivery sink: stdout or file. Defaults to file when --output is set; --output needs the file sink.
    #[arg(short = 's', long)]
    sink: Option<String>,

    /// Set a text or choice field. Can be specified multiple times.
    #[arg(long = "set", value_name = "SECTION.FIELD=VALUE")]
    sets: Vec<String>,

    /// Toggle an option code in a multi-select field. Can be specified multiple times.
    #[arg(long = "toggle", value_name = "SECTION.FIELD=CODE")]
    toggles: Vec<String>,

    /// Write the edited record back to this file (stdin mode only)
    #[arg(long)]
    save: Option<PathBuf>,

    /// Reject option codes that their catalog does not define
    #[arg(long)]
    strict: bool,

    /// Print option catalogs as code<TAB>label and exit
    #[arg(long, value_name = "CATALOG", num_args = 0..=1, default_missing_value = "all")]
    list_catalogs: Option<String>,

    /// Print every field path with its kind and label, then exit
    #[arg(long)]
    list_fields: bool,

    /// Print an empty record and exit
    #[arg(long)]
    template: bool,

    /// Increase log verbosity (-v info, -vv debug). NOTICE_LOG overrides.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(ref name) = cli.list_catalogs {
        list_catalogs(name)?;
        return Ok(ExitCode::SUCCESS);
    }
    if cli.list_fields {
        list_fields();
        return Ok(ExitCode::SUCCESS);
    }
    if cli.template {
        print!("{}", persist::template()?);
        return Ok(ExitCode::SUCCESS);
    }

    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

/// Log to stderr so stdout carries nothing but the notice.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("NOTICE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

/// stdin mode: read one record, apply edits, deliver through one sink.
fn stdin_mode(cli: &Cli) -> Result<ExitCode> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let record = persist::from_toml(&input).context("failed to parse record from stdin")?;
    let mut session = Session::with_record(record);
    apply_edits(&mut session, &cli.sets, &cli.toggles)?;
    check_codes(session.record(), cli.strict, "stdin")?;

    if let Some(ref path) = cli.save {
        let text = persist::to_toml(session.record())?;
        fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "record saved");
    }

    let sink_name = cli
        .sink
        .as_deref()
        .unwrap_or(if cli.output.is_some() { "file" } else { "stdout" });
    if cli.output.is_some() && !matches!(sink_name, "file" | "txt") {
        bail!("--output only applies to the file sink, not --sink {}", sink_name);
    }
    let sink = sink::create_sink(sink_name, cli.output.as_deref())?;
    Ok(exit_code(deliver(&mut session, sink.as_ref())))
}

/// file mode: one notice per record file, written to the output directory.
fn file_mode(cli: &Cli) -> Result<ExitCode> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    if !cli.sets.is_empty() || !cli.toggles.is_empty() || cli.save.is_some() {
        bail!("--set, --toggle and --save only apply in stdin mode");
    }
    if let Some(ref name) = cli.sink {
        if name != "file" && name != "txt" {
            bail!("file mode always writes files; --sink {} is not supported", name);
        }
    }

    let input_files = expand_globs(&cli.files)?;
    if input_files.is_empty() {
        bail!("no record files found");
    }

    let sink = FileSink::new(output_dir);
    let mut written: HashSet<PathBuf> = HashSet::new();
    let mut all_ok = true;

    for path in &input_files {
        let source = path.display().to_string();
        let record = match load_record(path) {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping {}: {:#}", source, e);
                all_ok = false;
                continue;
            }
        };
        if let Err(e) = check_codes(&record, cli.strict, &source) {
            warn!("skipping {}: {:#}", source, e);
            all_ok = false;
            continue;
        }

        let mut session = Session::with_record(record);
        let target = sink.target(&session);
        if !written.insert(target.clone()) {
            warn!("{} overwrites {}", source, target.display());
        }
        all_ok &= deliver(&mut session, &sink);
    }

    Ok(exit_code(all_ok))
}

fn load_record(path: &Path) -> Result<ProjectRecord> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    persist::from_toml(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Apply `--set` and `--toggle` edits in the order given.
fn apply_edits(session: &mut Session, sets: &[String], toggles: &[String]) -> Result<()> {
    for assignment in sets {
        let (path, value) = split_assignment(assignment, "--set")?;
        session.set_text(path, value)?;
    }
    for assignment in toggles {
        let (path, code) = split_assignment(assignment, "--toggle")?;
        session.toggle(path, code)?;
    }
    Ok(())
}

fn split_assignment<'a>(assignment: &'a str, flag: &str) -> Result<(&'a str, &'a str)> {
    assignment
        .split_once('=')
        .map(|(path, value)| (path.trim(), value))
        .with_context(|| format!("{} expects SECTION.FIELD=VALUE, got '{}'", flag, assignment))
}

/// Tolerate codes missing from their catalog unless `strict`; they render verbatim.
fn check_codes(record: &ProjectRecord, strict: bool, source: &str) -> Result<()> {
    if strict {
        return record
            .check_codes()
            .with_context(|| format!("{}: unresolved option code", source));
    }
    for unresolved in record.unresolved_codes() {
        warn!(
            "{}: {} holds '{}', which catalog '{}' does not define",
            source,
            unresolved.path,
            unresolved.code,
            unresolved.catalog
        );
    }
    Ok(())
}

/// Deliver the current notice and report the outcome on stderr.
fn deliver(session: &mut Session, sink: &dyn Sink) -> bool {
    let outcome = sink.deliver(session).map_err(|e| format!("{:#}", e));
    let status = session.report(outcome, sink.success_message(), sink.failure_message());
    eprintln!("{}", status);
    status.is_success()
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn list_catalogs(name: &str) -> Result<()> {
    let ids: Vec<CatalogId> = if name == "all" {
        CatalogId::ALL.to_vec()
    } else {
        vec![name.parse()?]
    };
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let catalog = id.catalog();
        println!("# {} ({})", catalog.title, id);
        for choice in catalog.choices {
            println!("{}\t{}", choice.code, choice.label);
        }
    }
    Ok(())
}

fn list_fields() {
    for spec in FIELDS {
        let kind = match spec.kind.catalog() {
            Some(id) => format!("{}:{}", spec.kind.name(), id),
            None => spec.kind.name().to_string(),
        };
        println!("{}\t{}\t{}", spec.path(), kind, spec.label);
    }
}

/// Extensions of record files picked up when a directory is given.
const RECORD_EXTENSIONS: &[&str] = &["toml"];

/// Resolve the positional arguments to record files: plain files as given,
/// directories by their top-level `.toml` entries, anything else as a glob.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
        } else if path.is_dir() {
            files.extend(records_in(path)?);
        } else {
            let matches: Vec<_> = glob::glob(pattern)
                .with_context(|| format!("invalid glob pattern: {}", pattern))?
                .filter_map(|r| r.ok())
                .filter(|p| p.is_file())
                .collect();
            if matches.is_empty() {
                warn!("no record files matched: {}", pattern);
            }
            files.extend(matches);
        }
    }
    // One notice per record, in a stable order
    files.sort();
    files.dedup();
    Ok(files)
}

fn records_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?;
    Ok(entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| RECORD_EXTENSIONS.contains(&ext))
        })
        .collect())
}
