//! Reviewed-table export: tab-separated text with the review columns appended.

use std::collections::HashMap;
use crate::types::AnnotationTable;

const DEFAULT_EXPORT_NAME: &str = "annotations-Reviewed.txt";

/// Reviewer verdict for one annotation row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewMark {
    pub ok: bool,
    pub remarks: String,
}

impl Default for ReviewMark {
    /// Rows start out accepted.
    fn default() -> Self {
        Self { ok: true, remarks: String::new() }
    }
}

/// Tabs and line breaks would break the row structure.
fn clean_cell(value: &str) -> String {
    value.replace('\t', " ").replace("\r\n", " ").replace('\n', " ")
}

/// Render the reviewed table. Rows without a mark count as accepted.
pub fn reviewed_tsv(table: &AnnotationTable, marks: &HashMap<usize, ReviewMark>) -> String {
    let mut lines = Vec::with_capacity(table.rows.len() + 1);

    let mut header = vec!["Sr.".to_string()];
    header.extend(table.headers.iter().cloned());
    header.push("Reviewed OK".to_string());
    header.push("Rejection remarks".to_string());
    lines.push(header.join("\t"));

    let default_mark = ReviewMark::default();
    for (idx, row) in table.rows.iter().enumerate() {
        let mark = marks.get(&idx).unwrap_or(&default_mark);
        let mut cells = vec![(idx + 1).to_string()];
        cells.extend(
            table
                .headers
                .iter()
                .map(|h| row.get(h).map(|v| clean_cell(v)).unwrap_or_default()),
        );
        cells.push(if mark.ok { "OK" } else { "Not OK" }.to_string());
        cells.push(clean_cell(&mark.remarks));
        lines.push(cells.join("\t"));
    }
    lines.join("\n")
}

/// `calls.txt` → `calls-Reviewed.txt`; no extension → `.txt`.
pub fn reviewed_file_name(source_name: Option<&str>) -> String {
    let Some(src) = source_name.filter(|s| !s.is_empty()) else {
        return DEFAULT_EXPORT_NAME.to_string();
    };
    match src.rfind('.') {
        Some(dot) if dot > 0 => format!("{}-Reviewed{}", &src[..dot], &src[dot..]),
        _ => format!("{src}-Reviewed.txt"),
    }
}
