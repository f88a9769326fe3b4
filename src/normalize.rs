//! Tabular normalization
//!
//! Converts an uploaded file into a single UTF-8 text payload suitable for
//! prompt embedding. Workbook uploads are base64-decoded and the first sheet
//! is rendered as CSV; everything else passes through as text. Pure
//! transformation, no file-system or network access.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use calamine::{Data, Range, Reader, Xlsx};

use crate::models::{DataSource, UploadedFile};
use crate::types::{AppError, AppResult};

/// MIME type browsers report for `.xlsx` uploads.
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Resolve either input shape to a normalized payload.
pub fn prepare_payload(source: &DataSource) -> AppResult<String> {
    match source {
        DataSource::Raw(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(AppError::EmptyPayload);
            }
            Ok(trimmed.to_string())
        }
        DataSource::File(file) => normalize(file),
    }
}

/// Normalize an uploaded file to text.
///
/// The binary-workbook path is taken iff `is_binary` is set and the file is
/// recognized as a workbook by MIME type or extension. Any other content is
/// treated as already-text and passed through. The result is trimmed;
/// nothing left means the upload was blank.
pub fn normalize(file: &UploadedFile) -> AppResult<String> {
    let (content, file_name) = match (&file.content, &file.file_name) {
        (Some(content), Some(name)) if !name.is_empty() => (content, name),
        _ => return Err(AppError::MissingInput),
    };

    let text = if file.is_binary && is_workbook(file_name, file.file_type.as_deref()) {
        workbook_to_csv(content)?
    } else {
        content.clone()
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AppError::EmptyPayload);
    }
    Ok(trimmed.to_string())
}

fn is_workbook(file_name: &str, file_type: Option<&str>) -> bool {
    file_type == Some(XLSX_MIME_TYPE) || file_name.to_lowercase().ends_with(".xlsx")
}

/// Decode a base64 workbook and render its first sheet (by stored order) as
/// CSV text. Every failure inside this path is an unreadable-workbook error,
/// except a workbook that parses but has no sheets at all.
fn workbook_to_csv(content: &str) -> AppResult<String> {
    let bytes = BASE64
        .decode(content.trim())
        .map_err(|e| AppError::UnreadableWorkbook(e.to_string()))?;

    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| AppError::UnreadableWorkbook(e.to_string()))?;

    if workbook.sheet_names().is_empty() {
        return Err(AppError::EmptyWorkbook);
    }

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(AppError::EmptyWorkbook)?
        .map_err(|e| AppError::UnreadableWorkbook(e.to_string()))?;

    sheet_to_csv(&range)
}

fn sheet_to_csv(range: &Range<Data>) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in range.rows() {
        let record: Vec<String> = row.iter().map(cell_to_string).collect();
        writer
            .write_record(&record)
            .map_err(|e| AppError::UnreadableWorkbook(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::UnreadableWorkbook(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::UnreadableWorkbook(e.to_string()))
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}
