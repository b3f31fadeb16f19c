//! wasm-bindgen interface for the portfolio page logic.
//!
//! One [`SitePage`] instance drives everything outside the hero canvas:
//! the scroll progress bar, nav state and section highlighting, flip
//! cards, the project grid and its detail modal, skill bar reveals, the
//! button glow, and contact form validation with the mailto handoff.
//! All decisions live in `lumen-site-core`; this crate only reads the
//! DOM, calls in, and writes the results back.

use std::cell::RefCell;
use std::rc::Rc;

use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlFormElement, HtmlImageElement, HtmlInputElement,
    HtmlTextAreaElement, KeyboardEvent, MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

use lumen_site_core::{
    active_section, bar_in_view, card_html, projects, scroll_progress, skill_bar_inset,
    tag_list_html, trap_target, ContactForm, FieldError, ModalKeyAction, NavMenu, Project,
    ProjectModal, RippleOrigin, SubmitOutcome, PROJECTS,
};

/// Address a passing contact form submission is mailed to.
const MAIL_RECIPIENT: &str = "your.email@example.com";

/// Same candidates the focus trap cycles through as the page's own
/// markup offers.
const FOCUSABLE_SELECTOR: &str = "a, button, input, textarea, [tabindex]:not([tabindex='-1'])";

/// Sets up a panic hook to log panic messages to the browser console.
#[wasm_bindgen(start)]
pub fn on_start() {
    console_error_panic_hook::set_once();
}

struct PageState {
    window: Window,
    document: Document,
    nav: NavMenu,
    modal: ProjectModal,
    active_project: Option<&'static Project>,
    last_focused: Option<HtmlElement>,
}

impl PageState {
    /// Push nav state into the hamburger's aria attribute and the menu
    /// class.
    fn sync_nav(&self, open: bool) {
        if let Ok(Some(hamburger)) = self.document.query_selector(".hamburger") {
            let _ = hamburger.set_attribute("aria-expanded", self.nav.aria_expanded());
        }
        if let Some(nav) = self.document.get_element_by_id("site-nav") {
            let _ = nav.class_list().toggle_with_force("open", open);
        }
    }

    fn sync_modal_dom(&self) {
        if let Some(modal) = self.document.get_element_by_id("project-modal") {
            let _ = modal.set_attribute("aria-hidden", self.modal.aria_hidden());
        }
        if let Some(body) = self.document.body() {
            let _ = body.style().set_property("overflow", self.modal.body_overflow());
        }
    }

    /// Fill the modal with a project and show it, remembering where
    /// focus came from.
    fn open_project(&mut self, id: &str) {
        let project = match projects::find(id) {
            Some(project) => project,
            None => return,
        };
        self.active_project = Some(project);
        self.last_focused = self
            .document
            .active_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        self.modal.open(project.image_labels.len());

        set_text(&self.document, "modal-title", &project.title);
        set_text(&self.document, "modal-description", &project.description);
        if let Some(tags) = self.document.get_element_by_id("modal-tags") {
            tags.set_inner_html(&tag_list_html(&project.tags));
        }
        if let Some(link) = self.document.get_element_by_id("modal-repo") {
            let _ = link.set_attribute("href", &project.repo);
        }
        if let Some(link) = self.document.get_element_by_id("modal-demo") {
            let _ = link.set_attribute("href", &project.demo);
        }
        self.show_slide(0);
        self.sync_modal_dom();
        self.focus_first_in_dialog();
    }

    /// Hide the modal and hand focus back to the element that opened
    /// it. Safe to call when already closed.
    fn close_modal(&mut self) {
        self.modal.close();
        self.sync_modal_dom();
        self.active_project = None;
        if let Some(last) = self.last_focused.take() {
            let _ = last.focus();
        }
    }

    fn show_slide(&self, index: usize) {
        let project = match self.active_project {
            Some(project) => project,
            None => return,
        };
        let images = project.images();
        let src = match images.get(index) {
            Some(src) => src,
            None => return,
        };
        if let Some(image) = self
            .document
            .get_element_by_id("modal-image")
            .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
        {
            image.set_src(src);
            image.set_alt(&format!("{} slide {}", project.title, index + 1));
        }
    }

    fn focus_first_in_dialog(&self) {
        let first = self
            .document
            .query_selector(".modal-dialog")
            .ok()
            .flatten()
            .and_then(|dialog| dialog.query_selector(FOCUSABLE_SELECTOR).ok().flatten())
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(first) = first {
            let _ = first.focus();
        }
    }

    /// Keep Tab inside the dialog: only wrapping off either end needs
    /// intervention.
    fn wrap_focus(&self, event: &Event, backward: bool) {
        let dialog = match self.document.query_selector(".modal-dialog").ok().flatten() {
            Some(dialog) => dialog,
            None => return,
        };
        let focusables = match dialog.query_selector_all(FOCUSABLE_SELECTOR) {
            Ok(list) => list,
            Err(_) => return,
        };
        let active = self.document.active_element();
        let mut focused = None;
        for i in 0..focusables.length() {
            if let Some(node) = focusables.item(i) {
                if let (Some(el), Some(active)) = (node.dyn_ref::<Element>(), active.as_ref()) {
                    if el == active {
                        focused = Some(i as usize);
                    }
                }
            }
        }
        if let Some(index) = trap_target(focused, focusables.length() as usize, backward) {
            event.prevent_default();
            let target = focusables
                .item(index as u32)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok());
            if let Some(target) = target {
                let _ = target.focus();
            }
        }
    }
}

fn event_element(event: &Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}

fn closest(event: &Event, selector: &str) -> Option<Element> {
    event_element(event).and_then(|el| el.closest(selector).ok().flatten())
}

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(element) = document.get_element_by_id(id) {
        element.set_text_content(Some(text));
    }
}

fn input_value(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

fn textarea_value(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
        .map(|area| area.value())
        .unwrap_or_default()
}

fn render_grid(document: &Document) {
    if let Some(grid) = document.get_element_by_id("project-grid") {
        let cards: String = PROJECTS.iter().map(card_html).collect();
        grid.set_inner_html(&cards);
    }
}

fn init_flip_cards(document: &Document) {
    if let Ok(cards) = document.query_selector_all(".flip") {
        for i in 0..cards.length() {
            if let Some(card) = cards.item(i).and_then(|node| node.dyn_into::<Element>().ok()) {
                let _ = card.set_attribute("tabindex", "0");
                let _ = card.set_attribute("role", "button");
                let _ = card.set_attribute("aria-pressed", "false");
            }
        }
    }
}

fn toggle_flip(card: &Element) {
    let flipped = card.class_list().toggle("flipped").unwrap_or(false);
    let _ = card.set_attribute("aria-pressed", if flipped { "true" } else { "false" });
}

fn set_footer_year(document: &Document) {
    if let Some(year) = document.get_element_by_id("year") {
        year.set_text_content(Some(&js_sys::Date::new_0().get_full_year().to_string()));
    }
}

/// Progress bar, section highlight and skill bar reveals, all driven by
/// the same scroll position.
fn update_scroll_ui(state: &PageState) {
    if let Some(root) = state.document.document_element() {
        let progress = scroll_progress(
            root.scroll_top() as f64,
            root.scroll_height() as f64,
            root.client_height() as f64,
        );
        let bar = state
            .document
            .query_selector(".scroll-progress")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(bar) = bar {
            let _ = bar.style().set_property("width", &format!("{}%", progress));
        }
    }

    let scroll_y = state.window.scroll_y().unwrap_or(0.0);
    let mut owned: Vec<(String, f64)> = Vec::new();
    if let Ok(sections) = state.document.query_selector_all("section[id]") {
        for i in 0..sections.length() {
            if let Some(section) = sections
                .item(i)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            {
                owned.push((section.id(), section.offset_top() as f64));
            }
        }
    }
    let pairs: Vec<(&str, f64)> = owned.iter().map(|(id, top)| (id.as_str(), *top)).collect();
    if let Some(current) = active_section(&pairs, scroll_y) {
        let target = format!("#{}", current);
        if let Ok(links) = state.document.query_selector_all(".nav a") {
            for i in 0..links.length() {
                if let Some(link) = links.item(i).and_then(|node| node.dyn_into::<Element>().ok()) {
                    let is_current = link.get_attribute("href").as_deref() == Some(target.as_str());
                    let _ = link.class_list().toggle_with_force("active", is_current);
                }
            }
        }
    }

    let viewport_height = state
        .window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    if let Ok(bars) = state.document.query_selector_all(".bar:not([data-animate='in'])") {
        for i in 0..bars.length() {
            if let Some(bar) = bars.item(i).and_then(|node| node.dyn_into::<Element>().ok()) {
                if !bar_in_view(bar.get_bounding_client_rect().top(), viewport_height) {
                    continue;
                }
                let _ = bar.set_attribute("data-animate", "in");
                let level = bar
                    .get_attribute("data-level")
                    .and_then(|v| v.parse::<u32>().ok())
                    .unwrap_or(0);
                let span = bar
                    .query_selector("span")
                    .ok()
                    .flatten()
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok());
                if let Some(span) = span {
                    let _ = span.style().set_property("inset", &skill_bar_inset(level));
                }
            }
        }
    }
}

/// Move every button's glow to track the pointer.
fn update_ripples(state: &PageState, event: &Event) {
    let pointer = match event.dyn_ref::<MouseEvent>() {
        Some(pointer) => pointer,
        None => return,
    };
    let (client_x, client_y) = (pointer.client_x() as f64, pointer.client_y() as f64);
    if let Ok(buttons) = state.document.query_selector_all(".btn") {
        for i in 0..buttons.length() {
            if let Some(btn) = buttons
                .item(i)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            {
                let rect = btn.get_bounding_client_rect();
                let origin = RippleOrigin::from_pointer(client_x, client_y, rect.left(), rect.top());
                let style = btn.style();
                let _ = style.set_property("--x", &origin.css_x());
                let _ = style.set_property("--y", &origin.css_y());
            }
        }
    }
}

fn on_click(state: &Rc<RefCell<PageState>>, event: &Event) {
    // Same-page anchors scroll smoothly instead of jumping.
    if let Some(anchor) = closest(event, "a[href^='#']") {
        if let Some(href) = anchor.get_attribute("href") {
            if href.len() > 1 {
                event.prevent_default();
                let guard = state.borrow();
                if let Ok(Some(section)) = guard.document.query_selector(&href) {
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    options.set_block(ScrollLogicalPosition::Start);
                    section.scroll_into_view_with_scroll_into_view_options(&options);
                }
            }
        }
        return;
    }
    if closest(event, ".hamburger").is_some() {
        let mut guard = state.borrow_mut();
        let open = guard.nav.toggle();
        guard.sync_nav(open);
        return;
    }
    if let Some(card) = closest(event, ".flip") {
        toggle_flip(&card);
        return;
    }
    if let Some(card) = closest(event, ".project-card[data-project]") {
        if let Some(id) = card.get_attribute("data-project") {
            state.borrow_mut().open_project(&id);
        }
        return;
    }
    let hit_close = closest(event, "[data-close]").is_some()
        || event_element(event)
            .map(|el| el.class_list().contains("modal-backdrop"))
            .unwrap_or(false);
    if hit_close {
        state.borrow_mut().close_modal();
        return;
    }
    if closest(event, ".carousel-prev").is_some() {
        let mut guard = state.borrow_mut();
        let index = guard.modal.carousel_mut().prev();
        guard.show_slide(index);
        return;
    }
    if closest(event, ".carousel-next").is_some() {
        let mut guard = state.borrow_mut();
        let index = guard.modal.carousel_mut().next();
        guard.show_slide(index);
    }
}

fn on_keydown(state: &Rc<RefCell<PageState>>, event: &Event) {
    let key_event = match event.dyn_ref::<KeyboardEvent>() {
        Some(key_event) => key_event,
        None => return,
    };
    let key = key_event.key();

    // Flip cards act as buttons.
    if key == "Enter" || key == " " {
        if let Some(card) = closest(event, ".flip") {
            event.prevent_default();
            toggle_flip(&card);
            return;
        }
    }

    let mut guard = state.borrow_mut();
    match guard.modal.on_key(&key, key_event.shift_key()) {
        Some(ModalKeyAction::Close) => guard.close_modal(),
        Some(ModalKeyAction::ShowSlide(index)) => guard.show_slide(index),
        Some(ModalKeyAction::WrapFocus { backward }) => guard.wrap_focus(event, backward),
        None => {}
    }
}

fn on_submit(state: &Rc<RefCell<PageState>>, event: &Event) {
    event.prevent_default();
    let guard = state.borrow();
    let document = &guard.document;
    let form = ContactForm {
        name: input_value(document, "name"),
        email: input_value(document, "email"),
        subject: input_value(document, "subject"),
        message: textarea_value(document, "message"),
        company: input_value(document, "company"),
    };
    match form.submit(MAIL_RECIPIENT) {
        SubmitOutcome::Discard => {}
        SubmitOutcome::Reject { errors } => {
            clear_errors(document);
            for error in &errors {
                set_error_text(document, error);
            }
        }
        SubmitOutcome::OpenMailto { href } => {
            clear_errors(document);
            let _ = guard.window.location().set_href(&href);
            if let Some(form_el) = document
                .get_element_by_id("contact-form")
                .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
            {
                form_el.reset();
            }
        }
    }
}

fn clear_errors(document: &Document) {
    if let Ok(slots) = document.query_selector_all(".error") {
        for i in 0..slots.length() {
            if let Some(slot) = slots.item(i) {
                slot.set_text_content(Some(""));
            }
        }
    }
}

fn set_error_text(document: &Document, error: &FieldError) {
    let selector = format!("#{} + .error", error.field.id());
    if let Ok(Some(slot)) = document.query_selector(&selector) {
        slot.set_text_content(Some(error.message));
    }
}

struct Listener {
    target: web_sys::EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Browser driver for the page. Construct once, `mount()` after the DOM
/// is ready, `unmount()` to detach everything again.
#[wasm_bindgen]
pub struct SitePage {
    state: Rc<RefCell<PageState>>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl SitePage {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SitePage, JsError> {
        let window =
            web_sys::window().ok_or_else(|| JsError::new("no window in this environment"))?;
        let document = window
            .document()
            .ok_or_else(|| JsError::new("no document in this environment"))?;
        Ok(SitePage {
            state: Rc::new(RefCell::new(PageState {
                window,
                document,
                nav: NavMenu::new(),
                modal: ProjectModal::new(),
                active_project: None,
                last_focused: None,
            })),
            listeners: Vec::new(),
        })
    }

    /// Render the project grid, stamp static bits, and attach all
    /// listeners. Calling again while mounted is a no-op.
    pub fn mount(&mut self) -> Result<(), JsError> {
        if !self.listeners.is_empty() {
            return Ok(());
        }
        let (window, document) = {
            let guard = self.state.borrow();
            (guard.window.clone(), guard.document.clone())
        };
        render_grid(&document);
        init_flip_cards(&document);
        set_footer_year(&document);

        let state = Rc::clone(&self.state);
        self.listen(
            document.as_ref(),
            "scroll",
            Closure::wrap(Box::new(move |_event: Event| {
                update_scroll_ui(&state.borrow());
            }) as Box<dyn FnMut(Event)>),
        )?;

        let state = Rc::clone(&self.state);
        self.listen(
            window.as_ref(),
            "resize",
            Closure::wrap(Box::new(move |_event: Event| {
                update_scroll_ui(&state.borrow());
            }) as Box<dyn FnMut(Event)>),
        )?;

        let state = Rc::clone(&self.state);
        self.listen(
            document.as_ref(),
            "pointermove",
            Closure::wrap(Box::new(move |event: Event| {
                update_ripples(&state.borrow(), &event);
            }) as Box<dyn FnMut(Event)>),
        )?;

        let state = Rc::clone(&self.state);
        self.listen(
            document.as_ref(),
            "click",
            Closure::wrap(Box::new(move |event: Event| {
                on_click(&state, &event);
            }) as Box<dyn FnMut(Event)>),
        )?;

        let state = Rc::clone(&self.state);
        self.listen(
            document.as_ref(),
            "keydown",
            Closure::wrap(Box::new(move |event: Event| {
                on_keydown(&state, &event);
            }) as Box<dyn FnMut(Event)>),
        )?;

        if let Some(form) = document.get_element_by_id("contact-form") {
            let state = Rc::clone(&self.state);
            self.listen(
                form.as_ref(),
                "submit",
                Closure::wrap(Box::new(move |event: Event| {
                    on_submit(&state, &event);
                }) as Box<dyn FnMut(Event)>),
            )?;
        }

        update_scroll_ui(&self.state.borrow());
        Ok(())
    }

    /// Detach every listener and close the modal if it is up.
    pub fn unmount(&mut self) {
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.kind,
                listener.callback.as_ref().unchecked_ref(),
            );
        }
        let mut guard = self.state.borrow_mut();
        if guard.modal.is_open() {
            guard.close_modal();
        }
    }

    /// Open the detail modal for a project id from the bundled catalog.
    pub fn open_project(&mut self, id: &str) {
        self.state.borrow_mut().open_project(id);
    }

    pub fn close_modal(&mut self) {
        self.state.borrow_mut().close_modal();
    }

    pub fn is_modal_open(&self) -> bool {
        self.state.borrow().modal.is_open()
    }

    pub fn is_nav_open(&self) -> bool {
        self.state.borrow().nav.is_open()
    }

    /// Advance the modal carousel one slide.
    pub fn next_slide(&mut self) {
        let mut guard = self.state.borrow_mut();
        let index = guard.modal.carousel_mut().next();
        guard.show_slide(index);
    }

    /// Step the modal carousel back one slide.
    pub fn prev_slide(&mut self) {
        let mut guard = self.state.borrow_mut();
        let index = guard.modal.carousel_mut().prev();
        guard.show_slide(index);
    }

    /// The bundled project catalog, for pages that render their own
    /// markup.
    pub fn catalog(&self) -> Result<JsValue, JsError> {
        swb::to_value(&*PROJECTS).map_err(|e| JsError::new(&format!("catalog error: {e}")))
    }

    fn listen(
        &mut self,
        target: &web_sys::EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<(), JsError> {
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(|err| JsError::new(&format!("{} listener: {:?}", kind, err)))?;
        self.listeners.push(Listener {
            target: target.clone(),
            kind,
            callback,
        });
        Ok(())
    }
}
