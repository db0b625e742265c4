//! Header resolution for the review table.
//!
//! Annotation files come from several tools with different column names, so
//! canonical columns are found by case-insensitive substring candidates.

use crate::hit_test::{lookup, parse_leading_f64};
use crate::types::{AnnotationRecord, AnnotationTable};

/// Band shown in the table when a row carries no frequency columns.
pub const DEFAULT_LOW_HZ: f64 = 0.0;
pub const DEFAULT_HIGH_HZ: f64 = 25_000.0;

const START_CANDIDATES: &[&str] = &["start", "onset", "time", "tstart"];
const END_CANDIDATES: &[&str] = &["end", "offset", "tend", "time_end"];
const LOW_CANDIDATES: &[&str] = &["low", "fmin", "minfreq"];
const FREQ_CANDIDATES: &[&str] = &["freq"];
const HIGH_CANDIDATES: &[&str] = &["high", "fmax", "maxfreq"];

/// Resolved canonical header names; empty when nothing matched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedKeys {
    pub start: String,
    pub end: String,
    pub low: String,
    pub high: String,
}

fn find_header(headers: &[String], candidates: &[&str]) -> Option<String> {
    headers
        .iter()
        .find(|h| {
            let lower = h.to_lowercase();
            candidates.iter().any(|c| lower.contains(c))
        })
        .cloned()
}

pub fn resolve_keys(headers: &[String]) -> ResolvedKeys {
    let start = find_header(headers, START_CANDIDATES)
        .or_else(|| headers.first().cloned())
        .unwrap_or_default();
    let end = find_header(headers, END_CANDIDATES)
        .or_else(|| headers.get(1).cloned())
        .unwrap_or_else(|| start.clone());
    let low = find_header(headers, LOW_CANDIDATES)
        .or_else(|| find_header(headers, FREQ_CANDIDATES))
        .unwrap_or_default();
    let high = find_header(headers, HIGH_CANDIDATES).unwrap_or_else(|| low.clone());
    ResolvedKeys { start, end, low, high }
}

/// True when at least one row has a usable start < end; otherwise playback
/// of individual rows is disabled.
pub fn has_valid_start_end(table: &AnnotationTable) -> bool {
    let keys = resolve_keys(&table.headers);
    table.rows.iter().any(|row| {
        let s = parse_leading_f64(lookup(row, &keys.start, &["start", "Start", "Begin Time (s)"]));
        let e = parse_leading_f64(lookup(row, &keys.end, &["end", "End"]));
        matches!((s, e), (Some(s), Some(e)) if e > s)
    })
}

/// Frequency band shown for a row in the table, with 0 / 25 kHz defaults.
pub fn display_band(row: &AnnotationRecord, keys: &ResolvedKeys) -> (f64, f64) {
    let low = parse_leading_f64(lookup(row, &keys.low, &["Low", "fmin"])).unwrap_or(DEFAULT_LOW_HZ);
    let high = parse_leading_f64(lookup(row, &keys.high, &["High", "fmax"])).unwrap_or(DEFAULT_HIGH_HZ);
    (low, high)
}

/// Default label column: a header named "scientific name", if any.
pub fn default_label_column(headers: &[String]) -> Option<String> {
    headers
        .iter()
        .find(|h| h.eq_ignore_ascii_case("scientific name"))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_raven_headers() {
        let keys = resolve_keys(&headers(&[
            "Selection",
            "Begin Time (s)",
            "End Time (s)",
            "Low Freq (Hz)",
            "High Freq (Hz)",
        ]));
        // "Begin Time (s)" matches "time" before anything matches "start"
        assert_eq!(keys.start, "Begin Time (s)");
        assert_eq!(keys.end, "End Time (s)");
        assert_eq!(keys.low, "Low Freq (Hz)");
        assert_eq!(keys.high, "High Freq (Hz)");
    }

    #[test]
    fn test_resolve_fallbacks() {
        let keys = resolve_keys(&headers(&["a", "b", "Peak Freq"]));
        assert_eq!(keys.start, "a");
        assert_eq!(keys.end, "b");
        assert_eq!(keys.low, "Peak Freq");
        assert_eq!(keys.high, "Peak Freq");

        let none = resolve_keys(&[]);
        assert_eq!(none, ResolvedKeys::default());
    }

    #[test]
    fn test_has_valid_start_end() {
        let good = AnnotationTable {
            headers: headers(&["start", "end"]),
            rows: vec![record(&[("start", "3"), ("end", "1")]), record(&[("start", "1"), ("end", "3")])],
        };
        assert!(has_valid_start_end(&good));

        let bad = AnnotationTable {
            headers: headers(&["start", "end"]),
            rows: vec![record(&[("start", "x"), ("end", "1")])],
        };
        assert!(!has_valid_start_end(&bad));
    }

    #[test]
    fn test_display_band_defaults() {
        let keys = resolve_keys(&headers(&["start", "end"]));
        let row = record(&[("start", "1"), ("end", "2")]);
        assert_eq!(display_band(&row, &keys), (DEFAULT_LOW_HZ, DEFAULT_HIGH_HZ));

        let keys = resolve_keys(&headers(&["start", "end", "fmin", "fmax"]));
        let row = record(&[("fmin", "1200"), ("fmax", "4800")]);
        assert_eq!(display_band(&row, &keys), (1200.0, 4800.0));
    }

    #[test]
    fn test_default_label_column() {
        assert_eq!(
            default_label_column(&headers(&["Start", "Scientific Name"])),
            Some("Scientific Name".to_string())
        );
        assert_eq!(default_label_column(&headers(&["Start", "Label"])), None);
    }
}
