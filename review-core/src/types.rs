use std::collections::HashMap;

/// One parsed annotation record: header name → raw cell text.
pub type AnnotationRecord = HashMap<String, String>;

/// Annotation file as handed over by the annotation parser.
///
/// Replaced wholesale whenever a new file is loaded; never mutated here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnnotationTable {
    pub headers: Vec<String>,
    pub rows: Vec<AnnotationRecord>,
}

impl AnnotationTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Which headers hold the start/end/low/high/label columns.
/// An empty string means "unmapped"; lookups then fall back to well-known names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    pub start: String,
    pub end: String,
    pub low: String,
    pub high: String,
    pub label: String,
}

impl ColumnMapping {
    /// True when either frequency bound is mapped to a column.
    pub fn has_freq_band(&self) -> bool {
        !self.low.is_empty() || !self.high.is_empty()
    }
}

/// Pointer position in CSS pixels, relative to the viewport's bounding rect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the viewport's bounding rect in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportRect {
    pub width: f64,
    pub height: f64,
}

impl ViewportRect {
    pub fn center(&self) -> PointerPosition {
        PointerPosition::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A point in audio coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeFreq {
    pub time_secs: f64,
    pub freq_hz: f64,
}

/// Cursor affordance for the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorHint {
    #[default]
    Default,
    Pointer,
}

impl CursorHint {
    /// CSS `cursor` value ("" leaves the stylesheet default in place).
    pub fn css(self) -> &'static str {
        match self {
            CursorHint::Default => "",
            CursorHint::Pointer => "pointer",
        }
    }
}
