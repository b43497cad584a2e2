//! Report location, copying, and XML parsing.

use crate::error::LintError;
use crate::priority;
use crate::Violation;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::{Path, PathBuf};

/// Fixed report filename the analyzer writes into its output directory.
pub const REPORT_FILENAME: &str = "pmd.xml";

/// Locate the report the analyzer should have produced.
pub fn locate(out_dir: &Path) -> Result<PathBuf, LintError> {
    let report = out_dir.join(REPORT_FILENAME);
    if report.is_file() {
        Ok(report)
    } else {
        Err(LintError::ReportMissing(report))
    }
}

/// Copy the report to the configured destination. A destination that is a
/// directory or has no file extension gets the default filename appended;
/// parent directories are created as needed.
pub fn copy_to_destination(report: &Path, dest: &Path) -> Result<PathBuf, LintError> {
    let dest = if dest.is_dir() || dest.extension().is_none() {
        dest.join(REPORT_FILENAME)
    } else {
        dest.to_path_buf()
    };
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::copy(report, &dest)?;
    Ok(dest)
}

/// Parse every `violation` element out of a FlexPMD XML report, wherever it
/// sits in the document. Missing attributes are tolerated; malformed XML is
/// an error.
pub fn parse(xml: &str) -> Result<Vec<Violation>, LintError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut violations = Vec::new();
    let mut current: Option<Violation> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"violation" => {
                current = Some(violation_from_attrs(&e)?);
            }
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"violation" => {
                violations.push(violation_from_attrs(&e)?);
            }
            Ok(Event::Text(t)) => {
                if let Some(v) = current.as_mut() {
                    let text = t.unescape().map_err(|e| LintError::Parse(e.to_string()))?;
                    v.message.push_str(text.trim());
                }
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"violation" => {
                if let Some(v) = current.take() {
                    violations.push(v);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(LintError::Parse(e.to_string())),
        }
    }

    Ok(violations)
}

fn violation_from_attrs(e: &BytesStart<'_>) -> Result<Violation, LintError> {
    let mut v = Violation {
        package: None,
        class: None,
        priority: priority::DEFAULT_PRIORITY,
        begin_line: 0,
        begin_column: 0,
        message: String::new(),
    };

    for attr in e.attributes() {
        let attr = attr.map_err(|e| LintError::Parse(e.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|e| LintError::Parse(e.to_string()))?;
        let value = value.as_ref();
        match attr.key.local_name().as_ref() {
            b"package" => v.package = non_empty(value),
            b"class" => v.class = non_empty(value),
            b"priority" => v.priority = priority::normalize(Some(value)),
            b"beginline" => v.begin_line = parse_position(value),
            b"begincolumn" => v.begin_column = parse_position(value),
            _ => {}
        }
    }
    Ok(v)
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Negative or unparseable positions collapse to 0.
fn parse_position(s: &str) -> u32 {
    s.trim()
        .parse::<i64>()
        .map(|n| n.clamp(0, u32::MAX as i64) as u32)
        .unwrap_or(0)
}
