//! Small scroll and pointer effects: the reading progress bar and the
//! button ripple origin.

/// Percentage of the page scrolled, for the progress bar width.
///
/// `scroll_height - client_height` is the scrollable track. A page with
/// no overflow reports 0, and rubber-band overscroll is clamped so the
/// bar never renders outside its track.
pub fn scroll_progress(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let track = scroll_height - client_height;
    if track <= 0.0 {
        return 0.0;
    }
    (scroll_top / track * 100.0).clamp(0.0, 100.0)
}

/// Pointer position relative to a button, where its glow sits. Updated
/// on every pointer move so the glow tracks the cursor across the
/// button face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleOrigin {
    pub x: f64,
    pub y: f64,
}

impl RippleOrigin {
    /// Offset a viewport-space pointer position into the button's own
    /// box using its bounding rect.
    pub fn from_pointer(client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) -> Self {
        Self {
            x: client_x - rect_left,
            y: client_y - rect_top,
        }
    }

    /// Value for the `--x` custom property.
    pub fn css_x(&self) -> String {
        format!("{}px", self.x)
    }

    /// Value for the `--y` custom property.
    pub fn css_y(&self) -> String {
        format!("{}px", self.y)
    }
}

/// Inline `inset` for a skill bar's fill span, exposing `level` percent
/// of the track from the left. Levels above 100 clamp to a full bar.
pub fn skill_bar_inset(level: u32) -> String {
    format!("0 {}% 0 0", 100u32.saturating_sub(level))
}

/// Whether a lazily revealed element has scrolled far enough up to
/// trigger, using the same 85%-of-viewport line as the section reveals.
pub fn bar_in_view(rect_top: f64, viewport_height: f64) -> bool {
    rect_top < viewport_height * 0.85
}
