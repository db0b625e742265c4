//! Preferences persisted in `localStorage`.

use web_sys::Storage;
use spectro_review_core::prefs::ReviewPrefs;

const PREFS_KEY: &str = "spectro-review.prefs";

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Stored preferences, or defaults when none are stored or they don't parse.
pub fn load_prefs() -> ReviewPrefs {
    let Some(storage) = local_storage() else {
        return ReviewPrefs::default();
    };
    match storage.get_item(PREFS_KEY) {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("prefs: ignoring stored value: {e}");
            ReviewPrefs::default()
        }),
        Ok(None) => ReviewPrefs::default(),
        Err(e) => {
            log::warn!("prefs: localStorage read failed: {e:?}");
            ReviewPrefs::default()
        }
    }
}

pub fn save_prefs(prefs: &ReviewPrefs) {
    let Some(storage) = local_storage() else { return };
    let json = match serde_json::to_string(prefs) {
        Ok(j) => j,
        Err(e) => {
            log::error!("prefs: {e}");
            return;
        }
    };
    if let Err(e) = storage.set_item(PREFS_KEY, &json) {
        log::warn!("prefs: localStorage write failed: {e:?}");
    }
}
