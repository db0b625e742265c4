//! Element ids shared with the host page.

pub const CANVAS: &str = "canvas";
pub const REVIEW_TABLE_FRAME: &str = "reviewTableFrame";
pub const PLAY_TOGGLE: &str = "playToggle";
pub const STOP: &str = "stop";
pub const PLAY_FROM_START: &str = "playFromStart";
pub const X_ZOOM: &str = "xZoom";
/// Legacy zoom input still read by the draw engine.
pub const SPEED: &str = "speed";
pub const Y_PRESET: &str = "yPreset";
pub const LABEL_COLUMN: &str = "annotationLabel";
pub const SAVE_REVIEW: &str = "saveReview";
pub const ANN_FILE: &str = "annFile";

/// Row attribute carrying the annotation index.
pub const ROW_INDEX_ATTR: &str = "data-row-index";
pub const PLAY_CHECKBOX_SELECTOR: &str = "input.play-checkbox";
pub const REVIEWED_OK_SELECTOR: &str = "input.compact-checkbox";
pub const REMARKS_SELECTOR: &str = "input.compact-input";
pub const ROWS_SELECTOR: &str = "table tbody tr";
