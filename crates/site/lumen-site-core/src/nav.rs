//! Header navigation: the mobile menu toggle and scroll-position
//! highlighting of the section links.

/// How far below the top of the viewport a section heading may sit and
/// still count as the current section. Matches the sticky header
/// height plus a little slack.
pub const SCROLL_BIAS: f64 = 120.0;

/// Open state of the collapsible mobile menu.
#[derive(Debug, Default)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the menu and report the new state, for the `open` class.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Collapse the menu, as when a link inside it is followed.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Value for the toggle button's `aria-expanded` attribute.
    pub fn aria_expanded(&self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }
}

/// Pick the id of the section the viewport is currently in.
///
/// `sections` comes in document order as `(id, offset_top)` pairs. The
/// scan keeps the last section whose top has scrolled past the biased
/// line, so the lowest passed heading wins; above the first section the
/// first id is returned so one link is always highlighted.
pub fn active_section<'a>(sections: &[(&'a str, f64)], scroll_y: f64) -> Option<&'a str> {
    let from_top = scroll_y + SCROLL_BIAS;
    let mut current = sections.first().map(|(id, _)| *id);
    for (id, top) in sections {
        if *top <= from_top {
            current = Some(id);
        }
    }
    current
}
