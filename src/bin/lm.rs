// src/bin/lm.rs

//! Driver program _lm_ drives the [_lmlib_].
//!
//! Processes user-passed command-line arguments, then opens every passed log
//! file with a [`LogMerger`]. The merger is pulled in a loop: each call hands
//! back the not-yet-printed [`LogEntry`] with the earliest datetime among all
//! open files, which is printed by that file's [`PrinterLogEntry`] with the
//! file's prefix and color.
//!
//! `lm.rs` is the only module that prints to STDOUT.
//!
//! [_lmlib_]: lmlib
//! [`LogMerger`]: lmlib::readers::logmerger::LogMerger
//! [`LogEntry`]: lmlib::data::logentry::LogEntry
//! [`PrinterLogEntry`]: lmlib::printer::printers::PrinterLogEntry

#![allow(non_camel_case_types)]

use std::io::IsTerminal;
use std::process::ExitCode;

use ::clap::Parser;
use ::const_format::concatcp;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::si_trace_print::stack::stack_offset_set;

use ::lmlib::common::{Count, FPaths, PathId, ResultNext};
use ::lmlib::data::datetime::{TimestampDetector, TimestampDetectorP};
use ::lmlib::e_err;
use ::lmlib::printer::printers::{
    color_for_source,
    ColorChoice,
    PrinterLogEntry,
};
use ::lmlib::readers::logmerger::LogMerger;
use ::lmlib::readers::summary::SourceSummary;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// command-line parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

const CLI_HELP_AFTER: &str = "\
Each log file must itself be in chronological order.

A line beginning with a recognizable datetime starts a log entry; following
lines without one belong to that entry and are printed with it, never split
across files. Built-in datetime forms, tried in order:

  1. \"YYYY/MM/DD HH:MM:SS.ffffff \" (fractional seconds)
  2. \"YYYY-MM-DD HH:MM:SS,mmm \"    (cloud-init style)
  3. \"seconds[.fraction] \"          (Unix epoch, UTC)

Passing --regex and --format replaces the built-in forms entirely.
Lines before the first recognizable datetime of a file are dropped.";

/// The command-line arguments.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "lm",
    // write expanded information for the `--version` output
    version = concatcp!(
        "(logmerge)\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"),
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Paths of log files to merge. At least two must be passed.
    #[clap(required = true)]
    logfiles: Vec<String>,

    /// Prefix to print before each line of the matching log file,
    /// in passed order. Files without a given prefix get a generated
    /// "logN " prefix, 1-indexed by passed order.
    #[clap(
        short = 'p',
        long,
        num_args = 1..,
        verbatim_doc_comment,
    )]
    prefix: Vec<String>,

    /// Suppress automatic generation of prefixes.
    #[clap(long)]
    no_prefix: bool,

    /// Regex matching, at the beginning of a line, the entire datetime in
    /// exactly one capture group. Replaces the built-in datetime forms.
    /// Requires --format.
    #[clap(
        short = 'r',
        long,
        verbatim_doc_comment,
    )]
    regex: Option<String>,

    /// strftime format to parse the text captured by --regex.
    #[clap(short = 'f', long)]
    format: Option<String>,

    /// Color-code log output per file.
    /// Disabled when STDOUT is not a terminal.
    #[clap(
        short = 'c',
        long,
        verbatim_doc_comment,
    )]
    colorize: bool,

    /// After the merge completes, print per-file statistics to STDERR.
    #[clap(short = 's', long)]
    summary: bool,
}

/// Per-source prefix strings resolved from `--prefix`/`--no-prefix`;
/// `None` means print no prefix for that source.
type Prefixes = Vec<Option<String>>;

/// Process user-passed command-line arguments into program settings.
///
/// Exits the process with status 1 on usage errors, before any log file is
/// opened.
fn cli_process_args() -> (FPaths, Prefixes, ColorChoice, Option<(String, String)>, bool) {
    defn!();
    let args = CLI_Args::parse();
    defo!("args {:?}", args);

    if args.logfiles.len() < 2 {
        e_err!("requires at least two log files");
        std::process::exit(1);
    }
    if args.regex.is_some() != args.format.is_some() {
        e_err!("requires both --regex and --format or neither");
        std::process::exit(1);
    }

    let colorize: bool = args.colorize && std::io::stdout().is_terminal();
    let color_choice: ColorChoice = match colorize {
        true => ColorChoice::Always,
        false => ColorChoice::Never,
    };

    // colorizing already distinguishes sources, so generated prefixes are
    // suppressed unless the user explicitly passed labels
    let no_prefix: bool = args.no_prefix || (colorize && args.prefix.is_empty());
    let mut prefixes: Prefixes = Prefixes::with_capacity(args.logfiles.len());
    for index in 0..args.logfiles.len() {
        let prefix: Option<String> = match no_prefix {
            true => None,
            false => match args.prefix.get(index) {
                Some(label) => Some(format!("{} ", label)),
                None => Some(format!("log{} ", index + 1)),
            },
        };
        prefixes.push(prefix);
    }

    let custom: Option<(String, String)> = match (args.regex, args.format) {
        (Some(regex_), Some(format_)) => Some((regex_, format_)),
        _ => None,
    };
    defx!();

    (args.logfiles, prefixes, color_choice, custom, args.summary)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// main
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Print per-source statistics and the merged total to stderr.
fn print_summary(merger: &LogMerger) {
    let mut summaries: Vec<SourceSummary> = merger.summaries().to_vec();
    summaries.sort_by_key(|summary| summary.pathid);
    eprintln!("Summary:");
    for summary in summaries.iter() {
        eprintln!(
            "  log{} {:?}: {} entries, {} lines, {} leading lines dropped",
            summary.pathid + 1,
            summary.path,
            summary.entries,
            summary.lines,
            summary.lines_dropped,
        );
    }
    let total: Count = merger.count_entries_merged();
    eprintln!("  merged {} entries", total);
}

pub fn main() -> ExitCode {
    if cfg!(debug_assertions) {
        stack_offset_set(Some(0));
    }
    defn!();

    let (paths, prefixes, color_choice, custom, cli_opt_summary) = cli_process_args();

    // fail fast on a malformed custom rule, before any log file is opened
    let detector: TimestampDetector = match &custom {
        Some((regex_pattern, strftime_pattern)) => {
            match TimestampDetector::with_custom(regex_pattern, strftime_pattern) {
                Ok(val) => val,
                Err(err) => {
                    e_err!("{}", err);
                    defx!("exitcode FAILURE (bad custom rule)");
                    return ExitCode::FAILURE;
                }
            }
        }
        None => TimestampDetector::new(),
    };
    let detector: TimestampDetectorP = TimestampDetectorP::new(detector);

    let mut merger: LogMerger = match LogMerger::new(&paths, detector) {
        Ok(val) => val,
        Err(err) => {
            e_err!("{}", err);
            defx!("exitcode FAILURE (open)");
            return ExitCode::FAILURE;
        }
    };

    let mut printers: Vec<PrinterLogEntry> = Vec::with_capacity(paths.len());
    for (pathid, prefix) in prefixes.into_iter().enumerate() {
        printers.push(PrinterLogEntry::new(
            color_choice,
            color_for_source(pathid as PathId),
            prefix,
        ));
    }

    loop {
        match merger.next_entry() {
            ResultNext::Found((pathid, entry)) => {
                defo!("print entry PathId {} dt {:?}", pathid, entry.dt());
                if let Err(err) = printers[pathid].print_logentry(&entry) {
                    e_err!("failed to print entry from file {:?}; {}", paths[pathid], err);
                    defx!("exitcode FAILURE (print)");
                    return ExitCode::FAILURE;
                }
            }
            ResultNext::Done => break,
            ResultNext::Err(err) => {
                e_err!("{}", err);
                defx!("exitcode FAILURE (read)");
                return ExitCode::FAILURE;
            }
        }
    }

    if cli_opt_summary {
        print_summary(&merger);
    }
    defx!("exitcode SUCCESS");

    ExitCode::SUCCESS
}
