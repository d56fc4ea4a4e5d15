// src/bin/ntbl.rs

//! Driver program _ntbl_ drives the [_ntblib_].
//!
//! Processes user-passed command-line arguments.
//! Then, one at a time, for each log file path passed, opens a
//! [`RecordStream`] and passes each [`BackupRecord`] to the outputs chosen
//! by the user:
//!
//! * `--csv` writes every record to a CSV file named after the log.
//! * `--html` writes the top records by each metric to an HTML file named
//!   after the log.
//! * `--stats` prints totals and maximums.
//!
//! Without any of those, every record is written as CSV to STDOUT.
//!
//! Each log is read in one pass with its own stream and trackers.
//!
//! [_ntblib_]: ntblib
//! [`RecordStream`]: ntblib::readers::recordstream::RecordStream
//! [`BackupRecord`]: ntblib::data::record::BackupRecord

#![allow(non_camel_case_types)]

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ::anyhow::Context;
use ::clap::Parser;
use ::const_format::concatcp;

use ::ntblib::common::{Count, FPath};
use ::ntblib::data::datetime::{
    local_offset,
    DateTime,
    FixedOffset,
    YearRange,
};
use ::ntblib::data::stats::RecordStats;
use ::ntblib::{e_err, e_wrn};
use ::ntblib::printer::csvwriter::CsvRecordWriter;
use ::ntblib::printer::htmlreport::write_html_report;
use ::ntblib::readers::linesource::LogEncoding;
use ::ntblib::readers::recordstream::{
    FileRecordStream,
    StreamConfig,
    SummaryRecordStream,
};
use ::ntblib::readers::topn::{TopRecords, TOP_N_DEF};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// --------------------
// command-line parsing

const CLI_HELP_AFTER: &str = concatcp!(
    "\
Log lines are expected like:

    2018-02-17 02:31:25.577  <TID:1><AGENT 1:2>  BOF …
    2018-02-17 02:31:25.580  <TID:1><AGENT 1:2>  <File> E:\\data\\a.xls, size = 0|8684
    2018-02-17 02:31:25.601  <TID:1><AGENT 1:2>  BackupArchiveDetail: …

One record is made for each BOF … BackupArchiveDetail: cycle.
A cycle still open at the end of the log is not reported.

CSV columns are:
    file_path,file_size,idle_before_bof,begin_time,end_time,duration
Durations are in seconds.

Default top count is ",
    TOP_N_DEF,
    ".
"
);

/// clap command-line arguments build-time definitions.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "ntbl",
    // write expanded information for the `--version` output
    version = concatcp!(
        "(NTAG backup log analyzer)\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
        "Author: ", env!("CARGO_PKG_AUTHORS"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
)]
struct CLI_Args {
    /// Path(s) of backup agent job log files.
    #[clap(
        required = true,
        verbatim_doc_comment,
    )]
    paths: Vec<String>,

    /// Write all records of each log to a CSV file in OUTPUT_DIR named
    /// after the log, e.g. "job.log" is written to "job.csv".
    #[clap(
        short = 'c',
        long,
        verbatim_doc_comment,
    )]
    csv: bool,

    /// Write an HTML report of the top records by transfer duration,
    /// file size, and idle time before BOF, to a file in OUTPUT_DIR named
    /// after the log, e.g. "job.log" is written to "job.html".
    #[clap(
        short = 'H',
        long,
        verbatim_doc_comment,
    )]
    html: bool,

    /// Count of records in each table of the HTML report.
    #[clap(
        short = 'n',
        long,
        default_value_t = TOP_N_DEF,
        verbatim_doc_comment,
    )]
    top: usize,

    /// Print totals and maximums of each log.
    #[clap(
        long,
        verbatim_doc_comment,
    )]
    stats: bool,

    /// Directory for files written by --csv and --html.
    #[clap(
        short = 'o',
        long,
        default_value = ".",
        verbatim_doc_comment,
    )]
    output_dir: String,

    /// Text encoding of the logs, one of "utf-16le", "utf-16be", "utf-8".
    /// A byte-order mark at the start of a log overrides this.
    #[clap(
        short = 'e',
        long,
        verbatim_doc_comment,
        value_parser = cli_process_encoding,
        default_value_t = LogEncoding::default(),
    )]
    encoding: LogEncoding,

    /// Years accepted on log line timestamps, e.g. "2017-2018" or "2018".
    /// Lines with other years are ignored.
    #[clap(
        short = 'y',
        long,
        verbatim_doc_comment,
        value_parser = cli_process_years,
        default_value_t = YearRange::default(),
    )]
    years: YearRange,

    /// Timezone offset of the log timestamps.
    /// Example values, "+09", "-0800", "+02:00", or "Z".
    /// To pass a value with leading "-" use "=" notation, e.g. "-t=-0800".
    /// If not passed then the local system timezone offset is used.
    #[clap(
        short = 't',
        long,
        verbatim_doc_comment,
        value_parser = cli_process_tz_offset,
        default_value_t = local_offset(),
    )]
    tz_offset: FixedOffset,

    /// Print a summary of processing each log to STDERR.
    #[clap(
        short = 's',
        long,
        verbatim_doc_comment,
    )]
    summary: bool,
}

/// `clap` argument validator for `--encoding`.
fn cli_process_encoding(encoding: &str) -> std::result::Result<LogEncoding, String> {
    encoding.parse::<LogEncoding>()
}

/// `clap` argument validator for `--years`.
fn cli_process_years(years: &str) -> std::result::Result<YearRange, String> {
    years.parse::<YearRange>()
}

/// `clap` argument validator for `--tz-offset`.
///
/// Transform the timezone string to a `FixedOffset` instance
/// using a dummy datetime.
fn cli_process_tz_offset(tzo: &str) -> std::result::Result<FixedOffset, String> {
    let tzo_: &str = match tzo {
        "Z" | "z" => "+00:00",
        _ => tzo,
    };
    let mut data: String = String::from("2000-01-02 03:04:05 ");
    data.push_str(tzo_);
    for pattern in [
        "%Y-%m-%d %H:%M:%S %:z",
        "%Y-%m-%d %H:%M:%S %z",
        "%Y-%m-%d %H:%M:%S %#z",
    ] {
        let dt = DateTime::<FixedOffset>::parse_from_str(data.as_str(), pattern);
        defo!("DateTime::parse_from_str({:?}, {:?}) returned {:?}", data, pattern, dt);
        if let Ok(dt_) = dt {
            return Ok(*dt_.offset());
        }
    }

    Err(format!("Unable to parse a timezone offset for --tz-offset {:?}", tzo))
}

// -----------------
// per-file handling

/// Path in `output_dir` named after the log `path` with `extension`.
fn output_path(
    output_dir: &str,
    path: &FPath,
    extension: &str,
) -> PathBuf {
    let stem = Path::new(path)
        .file_stem()
        .unwrap_or_else(|| Path::new(path).as_os_str());
    let mut outpath: PathBuf = PathBuf::from(output_dir);
    outpath.push(stem);
    outpath.set_extension(extension);

    outpath
}

/// Pairs of indexes into `paths`, `(earlier, later)`, where both logs
/// would write to the same output path in `output_dir`.
fn output_collisions(
    output_dir: &str,
    paths: &[FPath],
) -> Vec<(usize, usize)> {
    let mut claimed: HashMap<PathBuf, usize> = HashMap::with_capacity(paths.len());
    let mut collisions: Vec<(usize, usize)> = Vec::new();
    for (index, path) in paths.iter().enumerate() {
        // `csv` and `html` outputs share a stem
        let outpath = output_path(output_dir, path, "csv");
        match claimed.get(&outpath) {
            Some(earlier) => collisions.push((*earlier, index)),
            None => {
                claimed.insert(outpath, index);
            }
        }
    }
    defo!("collisions {:?}", collisions);

    collisions
}

fn create_output_file(outpath: &Path) -> anyhow::Result<BufWriter<File>> {
    let file = File::create(outpath)
        .with_context(|| format!("Unable to create file {:?}", outpath))?;

    Ok(BufWriter::new(file))
}

/// Read the log at `path` once and write every requested output.
fn process_path(
    path: &FPath,
    args: &CLI_Args,
    config: &StreamConfig,
) -> anyhow::Result<SummaryRecordStream> {
    defn!("process_path({:?})", path);
    let mut stream: FileRecordStream = FileRecordStream::open(path, config)
        .with_context(|| format!("Unable to open log {:?}", path))?;

    let csv_stdout: bool = !args.csv && !args.html && !args.stats;
    let mut csv_writer: Option<CsvRecordWriter<Box<dyn Write>>> = if args.csv {
        let outpath = output_path(&args.output_dir, path, "csv");
        let writer: Box<dyn Write> = Box::new(create_output_file(&outpath)?);
        Some(CsvRecordWriter::new(writer)?)
    } else if csv_stdout {
        let writer: Box<dyn Write> = Box::new(std::io::stdout().lock());
        Some(CsvRecordWriter::new(writer)?)
    } else {
        None
    };
    let mut top: Option<TopRecords> = match args.html {
        true => Some(TopRecords::new(args.top)),
        false => None,
    };
    let mut stats: Option<RecordStats> = match args.stats {
        true => Some(RecordStats::new()),
        false => None,
    };

    let count: Count = stream.for_each_record(|record| {
        if let Some(writer) = csv_writer.as_mut() {
            writer.write(record)?;
        }
        if let Some(top) = top.as_mut() {
            top.offer(record);
        }
        if let Some(stats) = stats.as_mut() {
            stats.add(record);
        }
        Ok(())
    })
    .with_context(|| format!("Error processing log {:?}", path))?;
    defo!("{} records", count);

    if let Some(writer) = csv_writer {
        writer.into_inner()?.flush()?;
    }
    if let Some(top) = top {
        let outpath = output_path(&args.output_dir, path, "html");
        let mut writer = create_output_file(&outpath)?;
        write_html_report(&mut writer, path, &top)?;
        writer.flush()?;
    }
    if let Some(stats) = stats {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", path)?;
        writeln!(stdout, "{}", stats)?;
    }
    defx!();

    Ok(stream.close())
}

/// Process the user-passed command-line arguments.
/// Process each path.
/// Determine a process return code.
pub fn main() -> ExitCode {
    defn!();
    let args = CLI_Args::parse();
    defo!("args {:?}", args);

    let config = StreamConfig {
        encoding: args.encoding,
        years: args.years,
        tz_offset: args.tz_offset,
    };

    let mut ret: bool = true;
    // a log whose output files would overwrite those of an earlier log is
    // not processed
    let mut skip: Vec<bool> = vec![false; args.paths.len()];
    if args.csv || args.html {
        for (earlier, later) in output_collisions(&args.output_dir, &args.paths) {
            e_err!(
                "log {:?} would overwrite the output of log {:?} in {:?}; skipping it",
                args.paths[later],
                args.paths[earlier],
                args.output_dir,
            );
            skip[later] = true;
            ret = false;
        }
    }
    for (index, path) in args.paths.iter().enumerate() {
        if skip[index] {
            continue;
        }
        match process_path(path, &args, &config) {
            Ok(summary) => {
                if summary.decode_replacements {
                    e_wrn!(
                        "log {:?} has bytes invalid for encoding {}; try another --encoding",
                        path,
                        config.encoding,
                    );
                }
                if args.summary {
                    eprint!("{}", summary);
                }
            }
            Err(err) => {
                e_err!("{:?}", err);
                ret = false;
            }
        }
    }

    let exitcode = if ret { ExitCode::SUCCESS } else { ExitCode::FAILURE };
    defx!("exitcode {:?}", exitcode);

    exitcode
}
