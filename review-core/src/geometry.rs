//! Screen ↔ time/frequency mapping for the spectrogram viewport.
//!
//! The draw engine scrolls right-to-left: the newest column sits at the right
//! edge, and when fewer columns exist than fit on screen the content is pushed
//! right, leaving empty space on the left.
//!
//! Geometry is re-derived from the canvas on every query, since zoom and
//! viewport size can change between two pointer events.

use crate::scale::TimeFreqScale;
use crate::types::{PointerPosition, TimeFreq};

/// Width reserved for the frequency axis labels, CSS px.
pub const AXIS_LEFT_CSS: f64 = 64.0;
/// Height reserved for the time axis labels, CSS px.
pub const AXIS_BOTTOM_CSS: f64 = 48.0;

const MIN_CANVAS_WIDTH_CSS: f64 = 300.0;
const MIN_CANVAS_HEIGHT_CSS: f64 = 120.0;
const MIN_VIEWPORT_WIDTH_CSS: f64 = 64.0;
const MIN_VISIBLE_COLS: usize = 4;

/// Raw measurements of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasMetrics {
    /// Layout size in CSS px (0 when not laid out yet).
    pub client_width: f64,
    pub client_height: f64,
    /// Backing store size in device px.
    pub backing_width: u32,
    pub backing_height: u32,
    pub device_pixel_ratio: f64,
}

/// Derived viewport geometry. Every size is clamped to a safe minimum so the
/// mapping never divides by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportGeometry {
    pub device_pixel_ratio: f64,
    pub axis_left_css: f64,
    /// Logical columns that fit in the plot area (one per CSS px).
    pub visible_cols: usize,
    /// Plot area in device px.
    pub device_width: f64,
    pub device_height: f64,
}

impl ViewportGeometry {
    pub fn from_canvas(m: &CanvasMetrics) -> Self {
        let dpr = if m.device_pixel_ratio.is_finite() && m.device_pixel_ratio > 0.0 {
            m.device_pixel_ratio
        } else {
            1.0
        };
        let css_w = css_extent(m.client_width, m.backing_width, dpr).max(MIN_CANVAS_WIDTH_CSS);
        let css_h = css_extent(m.client_height, m.backing_height, dpr).max(MIN_CANVAS_HEIGHT_CSS);

        let plot_w_css = (css_w - AXIS_LEFT_CSS).round().max(MIN_VIEWPORT_WIDTH_CSS);
        let visible_cols = (plot_w_css as usize).max(MIN_VISIBLE_COLS);

        Self {
            device_pixel_ratio: dpr,
            axis_left_css: AXIS_LEFT_CSS,
            visible_cols,
            device_width: (plot_w_css * dpr).round().max(1.0),
            device_height: ((css_h - AXIS_BOTTOM_CSS) * dpr).round().max(1.0),
        }
    }

    /// Leftmost logical column on screen and how many columns actually hold data.
    pub fn visible_window(&self, total_cols: usize) -> (usize, usize) {
        let used = self.visible_cols.min(total_cols.max(1)).max(1);
        let rightmost = total_cols.saturating_sub(1);
        let leftmost = (rightmost + 1).saturating_sub(used);
        (leftmost, used)
    }

    /// Device px skipped at the left edge when content is narrower than the viewport.
    fn empty_offset_px(&self, used: usize) -> f64 {
        let empty = self.visible_cols - used;
        ((empty as f64 / self.visible_cols as f64) * self.device_width).round()
    }
}

/// Client size in CSS px, falling back to the backing store when not laid out.
fn css_extent(client: f64, backing: u32, dpr: f64) -> f64 {
    if client.is_finite() && client > 0.0 {
        client.round()
    } else {
        (backing as f64 / dpr).round()
    }
}

/// Map a pointer position to audio time and frequency.
///
/// Returns `None` over the axis label strip. Points outside the plot area map
/// to times/frequencies outside the visible range rather than being rejected.
pub fn screen_to_time_freq(
    pointer: PointerPosition,
    geom: &ViewportGeometry,
    scale: &TimeFreqScale,
    total_cols: usize,
) -> Option<TimeFreq> {
    if !(pointer.x >= geom.axis_left_css) {
        return None;
    }
    let dpr = geom.device_pixel_ratio;
    let spp = scale.seconds_per_pixel;

    let local_x_dev = (pointer.x - geom.axis_left_css).max(0.0) * dpr;
    let (leftmost, used) = geom.visible_window(total_cols);
    let x_offset = geom.empty_offset_px(used);
    let frac_x = (local_x_dev - x_offset) / geom.device_width;
    let time_secs = leftmost as f64 * spp + frac_x * (geom.visible_cols as f64 * spp);

    let local_y_dev = (pointer.y * dpr).round();
    let frac_from_top = local_y_dev / geom.device_height;
    let freq_hz = (1.0 - frac_from_top) * scale.ceiling_hz;

    Some(TimeFreq { time_secs, freq_hz })
}
