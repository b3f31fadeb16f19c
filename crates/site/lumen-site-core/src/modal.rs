//! Project detail modal: open/close state, the slide carousel, and the
//! keyboard handling that keeps focus trapped inside while it is open.

/// Wrapping slide index for the modal's image carousel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Advance one slide, wrapping past the end. Returns the new index.
    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    /// Step back one slide, wrapping before the start. Returns the new
    /// index.
    pub fn prev(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }
}

/// What the page should do in response to a keydown routed through
/// [`ProjectModal::on_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKeyAction {
    /// Hide the modal and restore focus to the element that opened it.
    Close,
    /// Show this slide of the carousel.
    ShowSlide(usize),
    /// Tab pressed inside the trap. Resolve with [`trap_target`] and
    /// move focus only when it says to wrap.
    WrapFocus { backward: bool },
}

/// Open/closed state of the project modal plus its carousel.
///
/// The element that had focus before opening stays on the DOM side;
/// this only tracks what the attributes and keyboard should do.
#[derive(Debug, Default)]
pub struct ProjectModal {
    open: bool,
    carousel: Carousel,
}

impl ProjectModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the modal for a project with `slide_count` carousel images.
    /// The carousel always restarts at the first slide.
    pub fn open(&mut self, slide_count: usize) {
        self.open = true;
        self.carousel = Carousel::new(slide_count);
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    /// Value for the modal's `aria-hidden` attribute.
    pub fn aria_hidden(&self) -> &'static str {
        if self.open {
            "false"
        } else {
            "true"
        }
    }

    /// Value for `document.body.style.overflow`, which pins page scroll
    /// while the modal is up.
    pub fn body_overflow(&self) -> &'static str {
        if self.open {
            "hidden"
        } else {
            ""
        }
    }

    /// Route a document-level keydown. Returns `None` when the modal is
    /// closed or the key is not one it handles, so page shortcuts keep
    /// working whenever the modal is away.
    pub fn on_key(&mut self, key: &str, shift: bool) -> Option<ModalKeyAction> {
        if !self.open {
            return None;
        }
        match key {
            "Escape" => {
                self.close();
                Some(ModalKeyAction::Close)
            }
            "ArrowLeft" => Some(ModalKeyAction::ShowSlide(self.carousel.prev())),
            "ArrowRight" => Some(ModalKeyAction::ShowSlide(self.carousel.next())),
            "Tab" => Some(ModalKeyAction::WrapFocus { backward: shift }),
            _ => None,
        }
    }
}

/// Decide whether a Tab press must be intercepted to keep focus inside
/// the modal.
///
/// `focused` is the position of the active element among the modal's
/// focusable elements (`None` when focus sits somewhere unexpected) and
/// `count` how many there are. Only wrapping off either end needs
/// intervention; anywhere else the browser's own order already stays
/// inside the trap.
pub fn trap_target(focused: Option<usize>, count: usize, backward: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let last = count - 1;
    match (focused, backward) {
        (Some(0), true) => Some(last),
        (Some(i), false) if i == last => Some(0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carousel_wraps_both_directions() {
        let mut carousel = Carousel::new(3);
        assert_eq!(carousel.next(), 1);
        assert_eq!(carousel.next(), 2);
        assert_eq!(carousel.next(), 0);
        assert_eq!(carousel.prev(), 2);
    }

    #[test]
    fn empty_and_single_slide_carousels_stay_put() {
        let mut empty = Carousel::new(0);
        assert_eq!(empty.next(), 0);
        assert_eq!(empty.prev(), 0);

        let mut single = Carousel::new(1);
        assert_eq!(single.next(), 0);
        assert_eq!(single.prev(), 0);
    }

    #[test]
    fn opening_resets_the_carousel() {
        let mut modal = ProjectModal::new();
        modal.open(4);
        modal.carousel_mut().next();
        modal.carousel_mut().next();
        modal.close();
        modal.open(2);
        assert_eq!(modal.carousel().index(), 0);
        assert_eq!(modal.carousel().len(), 2);
    }

    #[test]
    fn attribute_values_follow_open_state() {
        let mut modal = ProjectModal::new();
        assert_eq!(modal.aria_hidden(), "true");
        assert_eq!(modal.body_overflow(), "");
        modal.open(3);
        assert_eq!(modal.aria_hidden(), "false");
        assert_eq!(modal.body_overflow(), "hidden");
    }

    #[test]
    fn keys_are_ignored_while_closed() {
        let mut modal = ProjectModal::new();
        assert_eq!(modal.on_key("Escape", false), None);
        assert_eq!(modal.on_key("ArrowRight", false), None);
    }

    #[test]
    fn escape_closes_and_reports_it() {
        let mut modal = ProjectModal::new();
        modal.open(3);
        assert_eq!(modal.on_key("Escape", false), Some(ModalKeyAction::Close));
        assert!(!modal.is_open());
    }

    #[test]
    fn arrows_step_the_carousel() {
        let mut modal = ProjectModal::new();
        modal.open(3);
        assert_eq!(
            modal.on_key("ArrowRight", false),
            Some(ModalKeyAction::ShowSlide(1))
        );
        assert_eq!(
            modal.on_key("ArrowLeft", false),
            Some(ModalKeyAction::ShowSlide(0))
        );
        assert_eq!(
            modal.on_key("ArrowLeft", false),
            Some(ModalKeyAction::ShowSlide(2))
        );
    }

    #[test]
    fn tab_requests_a_trap_check() {
        let mut modal = ProjectModal::new();
        modal.open(3);
        assert_eq!(
            modal.on_key("Tab", false),
            Some(ModalKeyAction::WrapFocus { backward: false })
        );
        assert_eq!(
            modal.on_key("Tab", true),
            Some(ModalKeyAction::WrapFocus { backward: true })
        );
        assert_eq!(modal.on_key("a", false), None);
    }

    #[test]
    fn trap_only_intercepts_the_ends() {
        assert_eq!(trap_target(Some(0), 5, true), Some(4));
        assert_eq!(trap_target(Some(4), 5, false), Some(0));
        assert_eq!(trap_target(Some(2), 5, false), None);
        assert_eq!(trap_target(Some(2), 5, true), None);
        assert_eq!(trap_target(None, 5, false), None);
        assert_eq!(trap_target(Some(0), 0, true), None);
    }

    #[test]
    fn single_focusable_wraps_onto_itself() {
        assert_eq!(trap_target(Some(0), 1, false), Some(0));
        assert_eq!(trap_target(Some(0), 1, true), Some(0));
    }
}
