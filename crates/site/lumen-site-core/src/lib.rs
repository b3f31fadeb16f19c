//! Shared page logic for the portfolio site, kept free of any DOM
//! types so it can be unit tested natively and reused from the wasm
//! bindings.
//!
//! Everything here is deterministic: the DOM layer reads positions and
//! key events off the page, calls into these modules, and writes the
//! returned attribute values, markup, and style properties back.

pub mod effects;
pub mod encode;
pub mod form;
pub mod modal;
pub mod nav;
pub mod projects;

pub use effects::{bar_in_view, scroll_progress, skill_bar_inset, RippleOrigin};
pub use encode::percent_encode;
pub use form::{ContactForm, FieldError, FormField, SubmitOutcome};
pub use modal::{trap_target, Carousel, ModalKeyAction, ProjectModal};
pub use nav::{active_section, NavMenu, SCROLL_BIAS};
pub use projects::{card_html, find, placeholder_svg, tag_list_html, Project, PROJECTS};
