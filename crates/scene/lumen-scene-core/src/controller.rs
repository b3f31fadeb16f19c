//! Scene lifecycle controller: construction, per-frame update, quality
//! upgrade, pause/resume, teardown.
//!
//! Methods:
//! - new, initialize (probe + surface construction), on_frame,
//!   on_upgrade_due, pause/resume, set_pointer, resize, shutdown,
//!   apply (input funnel), take_events

use log::{debug, info, warn};
use nalgebra::{Vector2, Vector3};

use crate::clock::SceneClock;
use crate::config::SceneConfig;
use crate::events::{SceneEvent, SceneEvents};
use crate::ids::{FrameHandle, TaskHandle};
use crate::inputs::SceneInput;
use crate::motion;
use crate::probe::CapabilityProbe;
use crate::schedule::{DeferredTasks, FrameScheduler};
use crate::state::ScenePhase;
use crate::surface::{RenderSurface, ScenePose, SurfaceProvider, Viewport};
use crate::time::SceneTime;

/// Owns one hero scene from probe to teardown.
///
/// All collaborators are injected: the probe and surface provider at
/// `initialize`, the scheduler and deferred tasks wherever a call can
/// schedule or cancel. The controller holds no clocks and no event
/// subscriptions of its own, so every path through it is reproducible
/// from the timestamps the host feeds in.
///
/// Invariant: a frame request is outstanding if and only if the phase is
/// active (`Basic`/`Upgraded`) and the scene is not paused. Every method
/// preserves this, including duplicate pause/resume calls.
pub struct SceneController {
    cfg: SceneConfig,

    // Lifecycle
    phase: ScenePhase,
    paused: bool,
    low_power: bool,

    // Quality
    particle_count: u32,

    // Scheduling
    frame: Option<FrameHandle>,
    upgrade_task: Option<TaskHandle>,

    // Motion
    clock: SceneClock,
    viewport: Viewport,
    pointer: Vector2<f32>,
    camera: Vector3<f32>,
    pose: ScenePose,

    // Host-facing
    surface: Option<Box<dyn RenderSurface>>,
    events: SceneEvents,
}

impl SceneController {
    /// Create a controller in the `Idle` phase with the given config.
    pub fn new(cfg: SceneConfig) -> Self {
        Self {
            cfg,
            phase: ScenePhase::Idle,
            paused: false,
            low_power: false,
            particle_count: 0,
            frame: None,
            upgrade_task: None,
            clock: SceneClock::new(),
            viewport: Viewport::default(),
            pointer: Vector2::zeros(),
            camera: Vector3::zeros(),
            pose: ScenePose::default(),
            surface: None,
            events: SceneEvents::default(),
        }
    }

    pub fn phase(&self) -> ScenePhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_low_power(&self) -> bool {
        self.low_power
    }

    /// Current particle count; zero before construction.
    pub fn particle_count(&self) -> u32 {
        self.particle_count
    }

    /// Pose rendered by the most recent frame.
    pub fn pose(&self) -> ScenePose {
        self.pose
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Most recent normalized pointer position.
    pub fn pointer(&self) -> [f32; 2] {
        [self.pointer.x, self.pointer.y]
    }

    /// Elapsed scene time at the given host timestamp. Frozen while
    /// paused.
    pub fn elapsed(&self, now: SceneTime) -> SceneTime {
        self.clock.elapsed(now)
    }

    /// Handle of the outstanding frame request, if any.
    pub fn scheduled_frame(&self) -> Option<FrameHandle> {
        self.frame
    }

    /// Handle of the pending one-shot upgrade, if any.
    pub fn pending_upgrade(&self) -> Option<TaskHandle> {
        self.upgrade_task
    }

    pub fn config(&self) -> &SceneConfig {
        &self.cfg
    }

    /// Drain lifecycle events buffered since the last call.
    pub fn take_events(&mut self) -> Vec<SceneEvent> {
        self.events.take()
    }

    /// Probe capability and construct the scene.
    ///
    /// Runs the probe exactly once per lifecycle. An unsupported device
    /// or a surface construction failure lands in `Disabled` with the
    /// reason logged and emitted; nothing propagates to the caller. On
    /// success the particle field starts at the base density, the clock
    /// starts at `now`, the one-shot upgrade is deferred and the first
    /// frame is requested.
    ///
    /// Idempotent: any call outside `Idle` changes nothing.
    pub fn initialize(
        &mut self,
        probe: &mut dyn CapabilityProbe,
        provider: &mut dyn SurfaceProvider,
        scheduler: &mut dyn FrameScheduler,
        tasks: &mut dyn DeferredTasks,
        viewport: Viewport,
        now: SceneTime,
    ) -> ScenePhase {
        if self.phase != ScenePhase::Idle {
            debug!("initialize in phase {}; ignoring", self.phase.name());
            return self.phase;
        }
        self.viewport = viewport;

        let report = probe.probe();
        if !report.supported {
            let reason = report
                .reason
                .unwrap_or_else(|| "unsupported device".to_string());
            return self.disable(reason);
        }
        self.low_power = report.low_power;

        let mut surface = match provider.create(&self.cfg, &report, viewport) {
            Ok(surface) => surface,
            Err(err) => return self.disable(err.to_string()),
        };

        self.particle_count = self.cfg.base_particle_count;
        surface.set_particle_count(self.particle_count);
        self.surface = Some(surface);

        let [rx, ry, rz] = self.cfg.camera_rest;
        self.camera = Vector3::new(rx, ry, rz);
        self.pose = ScenePose {
            yaw: 0.0,
            pitch: 0.0,
            camera_position: self.cfg.camera_rest,
        };
        self.clock.start(now);

        self.phase = ScenePhase::Basic;
        self.upgrade_task = Some(tasks.defer(self.cfg.upgrade_delay));
        self.frame = Some(scheduler.schedule());

        info!(
            "hero scene up: {} particles, low_power={}",
            self.particle_count, self.low_power
        );
        self.events.push(SceneEvent::Initialized {
            phase: self.phase,
            particle_count: self.particle_count,
        });
        debug_assert!(self.frame_request_matches_state());
        self.phase
    }

    /// Advance one frame at the given host timestamp: recompute the
    /// group rotation from elapsed time, damp the camera toward the
    /// pointer target, render, and request the next frame.
    ///
    /// Callbacks from frames that were cancelled in the meantime are
    /// dropped on the floor.
    pub fn on_frame(&mut self, scheduler: &mut dyn FrameScheduler, now: SceneTime) {
        if self.frame.take().is_none() {
            return;
        }

        let elapsed = self.clock.elapsed(now).as_seconds();
        let (yaw, pitch) = motion::spin_angles(&self.cfg, elapsed);
        let target = motion::parallax_target(&self.cfg, self.pointer);
        self.camera = motion::damp_camera(self.camera, target, self.cfg.camera_smoothing);
        self.pose = ScenePose {
            yaw,
            pitch,
            camera_position: [self.camera.x, self.camera.y, self.camera.z],
        };

        if let Some(surface) = self.surface.as_mut() {
            surface.render(&self.pose);
        }
        self.frame = Some(scheduler.schedule());
        debug_assert!(self.frame_request_matches_state());
    }

    /// Apply the one-shot quality upgrade if `task` is the pending
    /// upgrade's handle. Handles that were cancelled or already fired
    /// are ignored, so a late timer callback cannot upgrade a scene it
    /// no longer belongs to.
    pub fn on_upgrade_due(&mut self, task: TaskHandle) {
        if self.upgrade_task != Some(task) {
            debug!("stale deferred task {:?}; ignoring", task);
            return;
        }
        self.upgrade_task = None;

        self.particle_count = self.cfg.upgrade_count(self.low_power);
        if let Some(surface) = self.surface.as_mut() {
            surface.set_particle_count(self.particle_count);
        }
        self.phase = ScenePhase::Upgraded;
        info!("particle field upgraded to {}", self.particle_count);
        self.events.push(SceneEvent::Upgraded {
            particle_count: self.particle_count,
        });
    }

    /// Stop the frame loop and freeze the clock. No-op when already
    /// paused or never constructed. The pending upgrade stays scheduled;
    /// it applies while paused and shows on resume.
    pub fn pause(&mut self, scheduler: &mut dyn FrameScheduler, now: SceneTime) {
        if !self.phase.is_active() || self.paused {
            return;
        }
        self.paused = true;
        if let Some(frame) = self.frame.take() {
            scheduler.cancel(frame);
        }
        self.clock.pause(now);
        debug!("hero scene paused");
        self.events.push(SceneEvent::Paused);
        debug_assert!(self.frame_request_matches_state());
    }

    /// Restart the frame loop, re-basing the clock at `now` so elapsed
    /// time continues from where pause left it. No-op when not paused or
    /// never constructed.
    pub fn resume(&mut self, scheduler: &mut dyn FrameScheduler, now: SceneTime) {
        if !self.phase.is_active() || !self.paused {
            return;
        }
        self.paused = false;
        self.clock.resume(now);
        self.frame = Some(scheduler.schedule());
        debug!("hero scene resumed");
        self.events.push(SceneEvent::Resumed);
        debug_assert!(self.frame_request_matches_state());
    }

    /// Record the latest normalized pointer position. Values are clamped
    /// to [-1, 1]; non-finite coordinates are dropped.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.pointer = Vector2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0));
    }

    /// Apply a new container size to projection and output. Scene
    /// content, elapsed time and the current pose are untouched. No-op
    /// while no surface exists; `initialize` takes its own viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        if let Some(surface) = self.surface.as_mut() {
            self.viewport = viewport;
            surface.resize(viewport);
        }
    }

    /// Tear the scene down: cancel the outstanding frame and pending
    /// upgrade, drop the surface and return to `Idle`. A later
    /// `initialize` starts a fresh lifecycle with a fresh probe.
    pub fn shutdown(&mut self, scheduler: &mut dyn FrameScheduler, tasks: &mut dyn DeferredTasks) {
        if self.phase == ScenePhase::Idle {
            return;
        }
        if let Some(frame) = self.frame.take() {
            scheduler.cancel(frame);
        }
        if let Some(task) = self.upgrade_task.take() {
            tasks.cancel(task);
        }
        self.surface = None;
        self.paused = false;
        self.low_power = false;
        self.particle_count = 0;
        self.clock = SceneClock::new();
        self.pointer = Vector2::zeros();
        self.camera = Vector3::zeros();
        self.pose = ScenePose::default();
        self.phase = ScenePhase::Idle;
        info!("hero scene shut down");
        self.events.push(SceneEvent::ShutDown);
        debug_assert!(self.frame_request_matches_state());
    }

    /// Funnel for host signals; adapters translate their event sources
    /// into [`SceneInput`] and route everything through here.
    pub fn apply(&mut self, input: SceneInput, scheduler: &mut dyn FrameScheduler, now: SceneTime) {
        match input {
            SceneInput::PointerMoved { x, y } => self.set_pointer(x, y),
            SceneInput::Resized { viewport } => self.resize(viewport),
            SceneInput::VisibilityChanged { hidden } => {
                if hidden {
                    self.pause(scheduler, now);
                } else {
                    self.resume(scheduler, now);
                }
            }
            SceneInput::TaskFired { task } => self.on_upgrade_due(task),
        }
    }

    fn disable(&mut self, reason: String) -> ScenePhase {
        warn!("hero scene disabled: {}", reason);
        self.phase = ScenePhase::Disabled;
        self.events.push(SceneEvent::Disabled { reason });
        self.phase
    }

    /// A frame request is outstanding exactly while the loop should run.
    fn frame_request_matches_state(&self) -> bool {
        self.frame.is_some() == (self.phase.is_active() && !self.paused)
    }
}

impl Default for SceneController {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}
