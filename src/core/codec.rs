// DocWatch - core/codec.rs
//
// CSV import/export codec: delimiter sniffing, RFC4180-style quoted-field
// splitting, header/row preview, positional column mapping to validated
// documents, and field escaping for export.
//
// Import is best-effort at the row level: a malformed data row is dropped
// (and logged at debug level), never an error. Only a missing header line
// or an I/O failure aborts an import.

use crate::core::dates::parse_due_date;
use crate::core::model::{normalize_path, Document};
use crate::util::constants;
use crate::util::error::CodecError;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Header names and raw field rows read for an import preview.
///
/// Rows may be ragged: a row can carry fewer fields than there are headers.
/// Consumers must treat out-of-range column indices as "missing".
#[derive(Debug, Clone)]
pub struct CsvPreview {
    /// Trimmed column header names, in file order.
    pub headers: Vec<String>,

    /// Raw field values per data row, in file order. Not trimmed.
    pub rows: Vec<Vec<String>>,
}

/// Positional column mapping chosen by the user from a preview.
///
/// Columns are selected by index, never by header name, so the same file
/// imports identically regardless of how its headers are spelled.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMapping {
    /// Index of the title column.
    pub title: usize,

    /// Index of the due-date column.
    pub due_date: usize,

    /// Index of the attachment-path column, if the file has one.
    pub attachment_path: Option<usize>,
}

/// Sniff the field separator from the header line: `;` wins if present,
/// otherwise `,`. Detected once and applied to the whole file.
pub fn detect_separator(header_line: &str) -> char {
    if header_line.contains(';') {
        ';'
    } else {
        ','
    }
}

/// Split one line into fields, honouring CSV quoting.
///
/// A `"` toggles quoted mode; inside quotes the separator is literal and
/// `""` is one literal quote. An unterminated quote at end of line is
/// tolerated: the remainder of the line becomes the field (best-effort,
/// no error for malformed input).
pub fn split_line(line: &str, separator: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '"' {
            if in_quotes && chars.peek() == Some(&'"') {
                current.push('"');
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
            continue;
        }

        if c == separator && !in_quotes {
            fields.push(std::mem::take(&mut current));
            continue;
        }

        current.push(c);
    }

    fields.push(current);
    fields
}

/// Escape one field for CSV output.
///
/// `None` serialises to an empty string. Quoting is applied only when the
/// value contains the separator, a quote, or a line break; internal quotes
/// are doubled inside the wrapping quotes.
pub fn escape_field(value: Option<&str>, separator: char) -> String {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return String::new(),
    };

    let needs_quotes = value.contains(separator)
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r');
    if !needs_quotes {
        return value.to_string();
    }

    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Read the header line and up to `max_rows` data rows for a preview.
///
/// Blank data lines are skipped without consuming a row slot, so the
/// preview always shows `max_rows` real rows when the file has that many.
/// Fails with [`CodecError::EmptyFile`] when the first line is missing
/// or blank.
pub fn load_preview(path: &Path, max_rows: usize) -> Result<CsvPreview, CodecError> {
    let mut lines = open_lines(path)?;

    let header_line = match lines.next() {
        Some(line) => line?,
        None => {
            return Err(CodecError::EmptyFile {
                path: path.to_path_buf(),
            })
        }
    };
    if header_line.trim().is_empty() {
        return Err(CodecError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    let separator = detect_separator(&header_line);
    let headers: Vec<String> = split_line(&header_line, separator)
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for line in lines {
        if rows.len() >= max_rows {
            break;
        }
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        rows.push(split_line(&line, separator));
    }

    tracing::debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        separator = %separator,
        "CSV preview loaded"
    );

    Ok(CsvPreview { headers, rows })
}

/// Stream the whole file and map every valid data row to a document.
///
/// A row is dropped when a required column index is out of range for that
/// row, the title or date field is blank after trimming, or the date does
/// not parse under the fallback policy. Rows are independent: one bad row
/// never aborts the file. Returns the valid documents in file order.
pub fn map_file_to_documents(
    path: &Path,
    mapping: &ColumnMapping,
) -> Result<Vec<Document>, CodecError> {
    let mut lines = open_lines(path)?;

    let header_line = match lines.next() {
        Some(line) => line?,
        None => {
            return Err(CodecError::EmptyFile {
                path: path.to_path_buf(),
            })
        }
    };
    if header_line.trim().is_empty() {
        return Err(CodecError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    let separator = detect_separator(&header_line);
    let mut docs = Vec::new();
    let mut dropped = 0usize;
    let mut line_number = 1u64;

    for line in lines {
        let line = line?;
        line_number += 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_line(&line, separator);
        match map_row(&fields, mapping) {
            Some(doc) => docs.push(doc),
            None => {
                dropped += 1;
                tracing::debug!(
                    path = %path.display(),
                    line = line_number,
                    "Dropped unmappable CSV row"
                );
            }
        }
    }

    tracing::info!(
        path = %path.display(),
        imported = docs.len(),
        dropped,
        "CSV mapping complete"
    );

    Ok(docs)
}

/// Map one split row to a document, or `None` when the row is unusable.
fn map_row(fields: &[String], mapping: &ColumnMapping) -> Option<Document> {
    let title = fields.get(mapping.title)?.trim();
    let date_str = fields.get(mapping.due_date)?.trim();
    if title.is_empty() || date_str.is_empty() {
        return None;
    }

    let due_date = parse_due_date(date_str)?;

    let attachment_path = mapping
        .attachment_path
        .and_then(|idx| fields.get(idx))
        .and_then(|raw| normalize_path(Some(raw.as_str())));

    // Title is known non-blank here, so construction cannot fail.
    Document::new(title, due_date, attachment_path.as_deref()).ok()
}

/// Serialise documents to CSV: a header row, then one row per document.
///
/// Due dates are written as `%Y-%m-%d`, which round-trips through the
/// import format list. Returns the number of data rows written.
/// `export_path` is used for error context only; the caller owns the writer.
pub fn export_documents<W: Write>(
    docs: &[Document],
    mut writer: W,
    separator: char,
    export_path: &Path,
) -> Result<usize, CodecError> {
    let io_err = |source| CodecError::Io {
        path: export_path.to_path_buf(),
        source,
    };

    let sep = separator.to_string();
    writeln!(writer, "{}", constants::EXPORT_HEADERS.join(sep.as_str())).map_err(io_err)?;

    let mut count = 0;
    for doc in docs {
        let row = [
            escape_field(Some(&doc.title), separator),
            doc.due_date.format(constants::EXPORT_DATE_FORMAT).to_string(),
            escape_field(doc.attachment_path.as_deref(), separator),
        ];
        writeln!(writer, "{}", row.join(sep.as_str())).map_err(io_err)?;
        count += 1;
    }

    writer.flush().map_err(io_err)?;
    Ok(count)
}

/// Open a file as a buffered line iterator with path-context errors.
fn open_lines(
    path: &Path,
) -> Result<impl Iterator<Item = Result<String, CodecError>> + '_, CodecError> {
    let file = File::open(path).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file).lines().map(move |line| {
        line.map_err(|source| CodecError::Io {
            path: path.to_path_buf(),
            source,
        })
    }))
}
