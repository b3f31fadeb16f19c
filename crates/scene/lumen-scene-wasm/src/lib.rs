//! wasm-bindgen interface for the hero scene controller.
//!
//! The browser keeps ownership of WebGL and the DOM; this crate owns the
//! wiring between them and the controller. It adapts
//! `requestAnimationFrame` and `setTimeout` to the scheduler traits,
//! probes the device, forwards pointer, resize and visibility events,
//! and calls back into a JS hooks object for the actual rendering:
//!
//! ```js
//! const scene = new HeroScene("bg-canvas", {
//!   create(config, report, viewport) {
//!     // build the renderer, return its surface
//!     return { render(pose) {...}, resize(viewport) {...}, setParticles(count) {...} };
//!   },
//! });
//! scene.mount();
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use js_sys::{Function, Reflect};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};

use lumen_scene_core::{
    motion, CapabilityProbe, CapabilityReport, DeferredTasks, FrameHandle, FrameScheduler,
    HandleAllocator, RenderSurface, SceneConfig, SceneController, SceneError, SceneInput,
    ScenePose, SceneTime, SurfaceProvider, TaskHandle, Viewport,
};

/// Sets up a panic hook to log panic messages to the browser console
/// and routes `log` records there as well.
#[wasm_bindgen(start)]
pub fn on_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn browser_window() -> Result<Window, JsError> {
    web_sys::window().ok_or_else(|| JsError::new("no window in this environment"))
}

/// Current `performance.now()` as scene time. Falls back to zero when
/// the performance API is missing, which stalls motion but keeps every
/// call safe.
fn timestamp(window: &Window) -> SceneTime {
    let ms = window.performance().map(|p| p.now()).unwrap_or(0.0);
    SceneTime::from_millis(ms).unwrap_or_else(|_| SceneTime::zero())
}

/// Capability probe backed by the real browser: user agent class, a
/// throwaway WebGL context, and the advertised core count.
pub struct BrowserProbe {
    window: Window,
}

impl BrowserProbe {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn webgl_available(&self) -> bool {
        let document = match self.window.document() {
            Some(document) => document,
            None => return false,
        };
        let canvas: HtmlCanvasElement = match document
            .create_element("canvas")
            .ok()
            .and_then(|element| element.dyn_into().ok())
        {
            Some(canvas) => canvas,
            None => return false,
        };
        for kind in ["webgl", "experimental-webgl"] {
            if let Ok(Some(_)) = canvas.get_context(kind) {
                return true;
            }
        }
        false
    }
}

impl CapabilityProbe for BrowserProbe {
    fn probe(&mut self) -> CapabilityReport {
        let user_agent = self
            .window
            .navigator()
            .user_agent()
            .unwrap_or_default()
            .to_ascii_lowercase();
        if user_agent.contains("mobi") || user_agent.contains("android") {
            return CapabilityReport::unsupported("mobile device");
        }
        if !self.webgl_available() {
            return CapabilityReport::unsupported("webgl unavailable");
        }
        let cores = self.window.navigator().hardware_concurrency();
        if cores > 0.0 && cores <= 2.0 {
            return CapabilityReport::low_power();
        }
        CapabilityReport::supported()
    }
}

/// Frame scheduler over `requestAnimationFrame`. One shared callback is
/// installed at mount; browser frame ids are positive and round-trip
/// through the handle's `u32`.
struct RafScheduler {
    window: Window,
    callback: Option<Function>,
}

impl RafScheduler {
    fn new(window: Window) -> Self {
        Self {
            window,
            callback: None,
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn schedule(&mut self) -> FrameHandle {
        let id = match self.callback.as_ref() {
            Some(callback) => self.window.request_animation_frame(callback).unwrap_or(0),
            None => 0,
        };
        FrameHandle(id as u32)
    }

    fn cancel(&mut self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0 as i32);
    }
}

/// Deferred tasks over `setTimeout`. Each pending task owns its closure
/// alongside the timer id, so cancelling frees the callback; a one-shot
/// handed off to the JS garbage collector is only reclaimed when it
/// actually fires. A fired task removes its own entry; wasm-bindgen
/// defers that free until the call returns.
struct TimeoutTasks {
    window: Window,
    state: Weak<RefCell<SceneState>>,
    handles: HandleAllocator,
    pending: HashMap<TaskHandle, PendingTimeout>,
}

struct PendingTimeout {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl TimeoutTasks {
    fn new(window: Window) -> Self {
        Self {
            window,
            state: Weak::new(),
            handles: HandleAllocator::new(),
            pending: HashMap::new(),
        }
    }
}

impl DeferredTasks for TimeoutTasks {
    fn defer(&mut self, delay: SceneTime) -> TaskHandle {
        let handle = self.handles.alloc_task();
        let state = self.state.clone();
        let callback = Closure::wrap(Box::new(move || {
            if let Some(state) = state.upgrade() {
                let mut guard = state.borrow_mut();
                guard.tasks.pending.remove(&handle);
                guard.controller.on_upgrade_due(handle);
            }
        }) as Box<dyn FnMut()>);
        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay.as_millis() as i32,
            )
            .unwrap_or(-1);
        if id >= 0 {
            self.pending.insert(
                handle,
                PendingTimeout {
                    id,
                    _callback: callback,
                },
            );
        }
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        if let Some(pending) = self.pending.remove(&handle) {
            self.window.clear_timeout_with_handle(pending.id);
        }
    }
}

fn hook_function(target: &JsValue, name: &str) -> Result<Function, SceneError> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
        .ok_or_else(|| SceneError::SurfaceCreation {
            reason: format!("hooks.{} is not a function", name),
        })
}

/// Surface provider backed by the JS hooks object passed to
/// [`HeroScene`]. `create` receives the config, the capability report
/// and the initial viewport, and returns the surface object.
struct HooksProvider {
    hooks: JsValue,
}

impl HooksProvider {
    fn new(hooks: JsValue) -> Self {
        Self { hooks }
    }
}

impl SurfaceProvider for HooksProvider {
    fn create(
        &mut self,
        config: &SceneConfig,
        report: &CapabilityReport,
        viewport: Viewport,
    ) -> Result<Box<dyn RenderSurface>, SceneError> {
        let create = hook_function(&self.hooks, "create")?;
        let serialize = |err: swb::Error| SceneError::SurfaceCreation {
            reason: format!("hooks.create arguments: {err}"),
        };
        let config_js = swb::to_value(config).map_err(serialize)?;
        let report_js = swb::to_value(report).map_err(serialize)?;
        let viewport_js = swb::to_value(&viewport).map_err(serialize)?;

        let surface = create
            .call3(&self.hooks, &config_js, &report_js, &viewport_js)
            .map_err(|err| SceneError::SurfaceCreation {
                reason: format!("hooks.create threw: {:?}", err),
            })?;
        if jsvalue_is_undefined_or_null(&surface) {
            return Err(SceneError::SurfaceCreation {
                reason: "hooks.create returned nothing".to_string(),
            });
        }
        let surface = JsSurface::from_object(surface)?;
        Ok(Box::new(surface))
    }
}

/// Render surface that forwards every call to the object returned by
/// `hooks.create`.
struct JsSurface {
    target: JsValue,
    render: Function,
    resize: Function,
    set_particles: Function,
}

impl JsSurface {
    fn from_object(target: JsValue) -> Result<Self, SceneError> {
        let render = hook_function(&target, "render")?;
        let resize = hook_function(&target, "resize")?;
        let set_particles = hook_function(&target, "setParticles")?;
        Ok(Self {
            target,
            render,
            resize,
            set_particles,
        })
    }
}

impl RenderSurface for JsSurface {
    fn resize(&mut self, viewport: Viewport) {
        if let Ok(value) = swb::to_value(&viewport) {
            let _ = self.resize.call1(&self.target, &value);
        }
    }

    fn set_particle_count(&mut self, count: u32) {
        let _ = self.set_particles.call1(&self.target, &JsValue::from(count));
    }

    fn render(&mut self, pose: &ScenePose) {
        if let Ok(value) = swb::to_value(pose) {
            let _ = self.render.call1(&self.target, &value);
        }
    }
}

/// Everything the callbacks need behind one shared cell. Callbacks hold
/// weak references, so dropping the [`HeroScene`] tears the cycle down.
struct SceneState {
    controller: SceneController,
    scheduler: RafScheduler,
    tasks: TimeoutTasks,
    probe: BrowserProbe,
    provider: HooksProvider,
    window: Window,
    canvas: HtmlCanvasElement,
}

impl SceneState {
    /// Measure the canvas and cap the device pixel ratio per config.
    fn viewport(&self) -> Viewport {
        let width = self.canvas.client_width() as f32;
        let height = self.canvas.client_height() as f32;
        let cap = self.controller.config().max_pixel_ratio as f64;
        let ratio = self.window.device_pixel_ratio().min(cap) as f32;
        Viewport::new(width, height, ratio)
    }
}

/// Browser driver for one hero scene canvas.
#[wasm_bindgen]
pub struct HeroScene {
    state: Rc<RefCell<SceneState>>,
    raf_closure: Option<Closure<dyn FnMut(f64)>>,
    pointer_listener: Option<Closure<dyn FnMut(web_sys::PointerEvent)>>,
    resize_listener: Option<Closure<dyn FnMut()>>,
    visibility_listener: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl HeroScene {
    /// Bind to the canvas with the given id. `hooks` must offer a
    /// `create(config, report, viewport)` function; `config` may be a
    /// partial override of the scene defaults, or undefined/null.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, hooks: JsValue, config: JsValue) -> Result<HeroScene, JsError> {
        let window = browser_window()?;
        let document = window
            .document()
            .ok_or_else(|| JsError::new("no document in this environment"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsError::new(&format!("no element with id '{}'", canvas_id)))?
            .dyn_into()
            .map_err(|_| JsError::new(&format!("'{}' is not a canvas", canvas_id)))?;

        let cfg: SceneConfig = if jsvalue_is_undefined_or_null(&config) {
            SceneConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        let state = Rc::new(RefCell::new(SceneState {
            controller: SceneController::new(cfg),
            scheduler: RafScheduler::new(window.clone()),
            tasks: TimeoutTasks::new(window.clone()),
            probe: BrowserProbe::new(window.clone()),
            provider: HooksProvider::new(hooks),
            window,
            canvas,
        }));
        state.borrow_mut().tasks.state = Rc::downgrade(&state);

        Ok(HeroScene {
            state,
            raf_closure: None,
            pointer_listener: None,
            resize_listener: None,
            visibility_listener: None,
        })
    }

    /// Probe the device, build the surface through the hooks and start
    /// the frame loop. Listeners for pointer, resize and visibility are
    /// attached here. Returns the resulting phase name; on an
    /// unsupported device that is `"disabled"` and the page's static
    /// fallback simply stays visible.
    pub fn mount(&mut self) -> Result<String, JsError> {
        self.install_frame_callback();
        self.install_listeners()?;

        let mut guard = self.state.borrow_mut();
        let viewport = guard.viewport();
        let now = timestamp(&guard.window);
        let SceneState {
            controller,
            scheduler,
            tasks,
            probe,
            provider,
            ..
        } = &mut *guard;
        let phase = controller.initialize(probe, provider, scheduler, tasks, viewport, now);
        Ok(phase.name().to_string())
    }

    /// Tear the scene down and detach every listener. A later `mount`
    /// starts a fresh lifecycle with a fresh probe.
    pub fn unmount(&mut self) {
        {
            let mut guard = self.state.borrow_mut();
            let SceneState {
                controller,
                scheduler,
                tasks,
                ..
            } = &mut *guard;
            controller.shutdown(scheduler, tasks);
            guard.scheduler.callback = None;
        }
        self.remove_listeners();
        self.raf_closure = None;
    }

    /// Stop the frame loop without tearing anything down.
    pub fn pause(&mut self) {
        let mut guard = self.state.borrow_mut();
        let now = timestamp(&guard.window);
        let SceneState {
            controller,
            scheduler,
            ..
        } = &mut *guard;
        controller.pause(scheduler, now);
    }

    /// Restart the frame loop where pause left it.
    pub fn resume(&mut self) {
        let mut guard = self.state.borrow_mut();
        let now = timestamp(&guard.window);
        let SceneState {
            controller,
            scheduler,
            ..
        } = &mut *guard;
        controller.resume(scheduler, now);
    }

    /// Current lifecycle phase name: `idle`, `disabled`, `basic` or
    /// `upgraded`.
    pub fn phase(&self) -> String {
        self.state.borrow().controller.phase().name().to_string()
    }

    pub fn is_paused(&self) -> bool {
        self.state.borrow().controller.is_paused()
    }

    /// Particles currently in the field; zero before mount.
    pub fn particle_count(&self) -> u32 {
        self.state.borrow().controller.particle_count()
    }

    /// Override the pointer with an already normalized position, for
    /// demos driving the parallax without a real pointer.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.state.borrow_mut().controller.set_pointer(x, y);
    }

    /// Pose of the most recent frame, for debugging overlays.
    pub fn pose(&self) -> Result<JsValue, JsError> {
        let pose = self.state.borrow().controller.pose();
        swb::to_value(&pose).map_err(|e| JsError::new(&format!("pose error: {e}")))
    }

    /// Effective configuration after defaults were applied.
    pub fn config(&self) -> Result<JsValue, JsError> {
        let cfg = self.state.borrow().controller.config().clone();
        swb::to_value(&cfg).map_err(|e| JsError::new(&format!("config error: {e}")))
    }

    /// Drain lifecycle events buffered since the last call, oldest
    /// first. Poll after mount and visibility changes, or on an
    /// interval; per-frame rendering never emits events.
    pub fn take_events(&mut self) -> Result<JsValue, JsError> {
        let events = self.state.borrow_mut().controller.take_events();
        swb::to_value(&events).map_err(|e| JsError::new(&format!("events error: {e}")))
    }

    fn install_frame_callback(&mut self) {
        if self.raf_closure.is_some() {
            return;
        }
        let state = Rc::downgrade(&self.state);
        let closure = Closure::wrap(Box::new(move |ms: f64| {
            if let Some(state) = state.upgrade() {
                let mut guard = state.borrow_mut();
                let now = SceneTime::from_millis(ms).unwrap_or_else(|_| SceneTime::zero());
                let SceneState {
                    controller,
                    scheduler,
                    ..
                } = &mut *guard;
                controller.on_frame(scheduler, now);
            }
        }) as Box<dyn FnMut(f64)>);
        self.state.borrow_mut().scheduler.callback =
            Some(closure.as_ref().unchecked_ref::<Function>().clone());
        self.raf_closure = Some(closure);
    }

    fn install_listeners(&mut self) -> Result<(), JsError> {
        if self.pointer_listener.is_some() {
            return Ok(());
        }
        let window = self.state.borrow().window.clone();
        let document = window
            .document()
            .ok_or_else(|| JsError::new("no document in this environment"))?;

        let state = Rc::downgrade(&self.state);
        let pointer = Closure::wrap(Box::new(move |event: web_sys::PointerEvent| {
            if let Some(state) = state.upgrade() {
                let mut guard = state.borrow_mut();
                let width = guard
                    .window
                    .inner_width()
                    .ok()
                    .and_then(|w| w.as_f64())
                    .unwrap_or(0.0) as f32;
                let height = guard
                    .window
                    .inner_height()
                    .ok()
                    .and_then(|h| h.as_f64())
                    .unwrap_or(0.0) as f32;
                let pointer = motion::normalize_pointer(
                    event.client_x() as f32,
                    event.client_y() as f32,
                    width,
                    height,
                );
                guard.controller.set_pointer(pointer.x, pointer.y);
            }
        }) as Box<dyn FnMut(web_sys::PointerEvent)>);
        window
            .add_event_listener_with_callback("pointermove", pointer.as_ref().unchecked_ref())
            .map_err(|e| JsError::new(&format!("pointermove listener: {:?}", e)))?;
        self.pointer_listener = Some(pointer);

        let state = Rc::downgrade(&self.state);
        let resize = Closure::wrap(Box::new(move || {
            if let Some(state) = state.upgrade() {
                let mut guard = state.borrow_mut();
                let viewport = guard.viewport();
                let now = timestamp(&guard.window);
                let SceneState {
                    controller,
                    scheduler,
                    ..
                } = &mut *guard;
                controller.apply(SceneInput::Resized { viewport }, scheduler, now);
            }
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())
            .map_err(|e| JsError::new(&format!("resize listener: {:?}", e)))?;
        self.resize_listener = Some(resize);

        let state = Rc::downgrade(&self.state);
        let visibility = Closure::wrap(Box::new(move || {
            if let Some(state) = state.upgrade() {
                let mut guard = state.borrow_mut();
                let hidden = guard
                    .window
                    .document()
                    .map(|document| document.hidden())
                    .unwrap_or(false);
                let now = timestamp(&guard.window);
                let SceneState {
                    controller,
                    scheduler,
                    ..
                } = &mut *guard;
                controller.apply(SceneInput::VisibilityChanged { hidden }, scheduler, now);
            }
        }) as Box<dyn FnMut()>);
        document
            .add_event_listener_with_callback("visibilitychange", visibility.as_ref().unchecked_ref())
            .map_err(|e| JsError::new(&format!("visibilitychange listener: {:?}", e)))?;
        self.visibility_listener = Some(visibility);

        Ok(())
    }

    fn remove_listeners(&mut self) {
        let window = self.state.borrow().window.clone();
        if let Some(listener) = self.pointer_listener.take() {
            let _ = window.remove_event_listener_with_callback(
                "pointermove",
                listener.as_ref().unchecked_ref(),
            );
        }
        if let Some(listener) = self.resize_listener.take() {
            let _ = window
                .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
        }
        if let Some(listener) = self.visibility_listener.take() {
            if let Some(document) = window.document() {
                let _ = document.remove_event_listener_with_callback(
                    "visibilitychange",
                    listener.as_ref().unchecked_ref(),
                );
            }
        }
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
