use serde::{Deserialize, Serialize};
use crate::scale::ScaleSettings;

/// User preferences carried between sessions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewPrefs {
    pub scale: ScaleSettings,
    /// Header used to label annotation boxes; `None` draws them unlabeled.
    pub label_column: Option<String>,
}
