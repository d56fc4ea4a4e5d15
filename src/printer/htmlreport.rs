// src/printer/htmlreport.rs

//! Write an HTML report of [`TopRecords`]: one table per [`Metric`], largest
//! first, with a final row of the duration and file size totals.
//!
//! [`TopRecords`]: crate::readers::topn::TopRecords
//! [`Metric`]: crate::readers::topn::Metric

use crate::data::datetime::{
    datetime_to_string,
    duration_to_seconds_string,
    Duration,
};
use crate::data::record::BackupRecord;
use crate::readers::topn::{Metric, TopRecords};

use std::borrow::Cow;
use std::io::{Result, Write};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

const TABLE_OPEN: &str =
    r##"<table border="1" cellspacing="0" cellpadding="5" bordercolor="#333333">"##;

const TABLE_HEADER: [&str; 6] = [
    "Idle before BOF (s)",
    "BOF time",
    "Duration (s)",
    "File size (byte)",
    "Throughput (byte/min)",
    "File",
];

/// Escape the characters significant to HTML.
pub fn escape_html(data: &str) -> Cow<'_, str> {
    if !data.contains(|c: char| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
        return Cow::Borrowed(data);
    }
    let mut escaped = String::with_capacity(data.len() + 16);
    for c in data.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    Cow::Owned(escaped)
}

fn write_table<W: Write>(
    writer: &mut W,
    records: &[&BackupRecord],
) -> Result<()> {
    writeln!(writer, "{}<thead><tr>", TABLE_OPEN)?;
    for th in TABLE_HEADER.iter() {
        write!(writer, "<th>{}</th>", escape_html(th))?;
    }
    writeln!(writer, "\n</tr></thead>")?;
    writeln!(writer, "<tbody>")?;

    let mut total_duration: Duration = Duration::zero();
    let mut total_size: u128 = 0;
    for record in records.iter() {
        total_duration = total_duration + record.duration();
        total_size += record.file_size() as u128;
        let throughput: String = match record.throughput_per_minute() {
            Some(val) => format!("{:.1}", val),
            None => String::from("N/A"),
        };
        writeln!(writer, "<tr>")?;
        writeln!(writer, "<td>{}</td>", duration_to_seconds_string(&record.idle_before_bof()))?;
        writeln!(writer, "<td>{}</td>", datetime_to_string(record.begin_time()))?;
        writeln!(writer, "<td>{}</td>", duration_to_seconds_string(&record.duration()))?;
        writeln!(writer, "<td>{}</td>", record.file_size())?;
        writeln!(writer, "<td>{}</td>", throughput)?;
        writeln!(writer, "<td>{}</td>", escape_html(record.file_path()))?;
        writeln!(writer, "</tr>")?;
    }
    writeln!(
        writer,
        "<tr><td></td><td>Total</td><td>{}</td><td>{}</td><td></td><td></td></tr>",
        duration_to_seconds_string(&total_duration),
        total_size,
    )?;
    writeln!(writer, "</tbody>")?;
    writeln!(writer, "</table>")?;

    Ok(())
}

/// Write a complete HTML document for `top`, headed by `title`.
pub fn write_html_report<W: Write>(
    writer: &mut W,
    title: &str,
    top: &TopRecords,
) -> Result<()> {
    defn!("write_html_report(…, {:?}, capacity {})", title, top.capacity());
    let title_e = escape_html(title);
    writeln!(writer, "<!DOCTYPE html>")?;
    writeln!(writer, "<html><head><meta charset=\"utf-8\"><title>{}</title></head><body>", title_e)?;
    writeln!(writer, "<h1>{}</h1>", title_e)?;
    for metric in Metric::ALL.iter() {
        let records: Vec<&BackupRecord> = top.ranked(*metric);
        defo!("{} {} records", metric, records.len());
        writeln!(writer, "<h2>{} top {}</h2>", escape_html(metric.title()), top.capacity())?;
        write_table(writer, &records)?;
    }
    writeln!(writer, "</body></html>")?;
    defx!();

    Ok(())
}
