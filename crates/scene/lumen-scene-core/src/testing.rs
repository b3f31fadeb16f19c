//! Recording test doubles for the host seams.
//!
//! Used by this crate's integration tests and by adapter crates that
//! want to exercise wiring without a real browser or GPU. Each double
//! records every call so tests can assert on scheduling and rendering
//! behavior rather than on side effects.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::ids::{FrameHandle, HandleAllocator, TaskHandle};
use crate::probe::{CapabilityProbe, CapabilityReport};
use crate::schedule::{DeferredTasks, FrameScheduler};
use crate::surface::{RenderSurface, ScenePose, SurfaceProvider, Viewport};
use crate::time::SceneTime;

/// Probe returning a fixed report, counting how often it is consulted.
pub struct StaticProbe {
    report: CapabilityReport,
    calls: u32,
}

impl StaticProbe {
    pub fn new(report: CapabilityReport) -> Self {
        Self { report, calls: 0 }
    }

    /// How many times `probe` has run.
    pub fn calls(&self) -> u32 {
        self.calls
    }
}

impl CapabilityProbe for StaticProbe {
    fn probe(&mut self) -> CapabilityReport {
        self.calls += 1;
        self.report.clone()
    }
}

/// Scheduler that hands out handles and records every call.
#[derive(Default)]
pub struct RecordingScheduler {
    handles: HandleAllocator,
    scheduled: u32,
    cancelled: Vec<FrameHandle>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of schedule calls so far.
    pub fn scheduled(&self) -> u32 {
        self.scheduled
    }

    /// Handles cancelled so far, in order.
    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }
}

impl FrameScheduler for RecordingScheduler {
    fn schedule(&mut self) -> FrameHandle {
        self.scheduled += 1;
        self.handles.alloc_frame()
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.cancelled.push(handle);
    }
}

/// Deferred-task source that records delays and cancellations.
#[derive(Default)]
pub struct RecordingTasks {
    handles: HandleAllocator,
    deferred: Vec<(TaskHandle, SceneTime)>,
    cancelled: Vec<TaskHandle>,
}

impl RecordingTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks deferred so far with their requested delays.
    pub fn deferred(&self) -> &[(TaskHandle, SceneTime)] {
        &self.deferred
    }

    /// Handle of the most recently deferred task.
    pub fn last_deferred(&self) -> Option<TaskHandle> {
        self.deferred.last().map(|(handle, _)| *handle)
    }

    pub fn cancelled(&self) -> &[TaskHandle] {
        &self.cancelled
    }
}

impl DeferredTasks for RecordingTasks {
    fn defer(&mut self, delay: SceneTime) -> TaskHandle {
        let handle = self.handles.alloc_task();
        self.deferred.push((handle, delay));
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.cancelled.push(handle);
    }
}

/// Everything the recording surface saw, shared between the surface
/// boxed into the controller and the test that inspects it.
#[derive(Default)]
pub struct SurfaceLog {
    pub resizes: Vec<Viewport>,
    pub particle_counts: Vec<u32>,
    pub rendered: Vec<ScenePose>,
}

/// Surface that records calls instead of touching a rendering API.
pub struct RecordingSurface {
    log: Rc<RefCell<SurfaceLog>>,
}

impl RenderSurface for RecordingSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.log.borrow_mut().resizes.push(viewport);
    }

    fn set_particle_count(&mut self, count: u32) {
        self.log.borrow_mut().particle_counts.push(count);
    }

    fn render(&mut self, pose: &ScenePose) {
        self.log.borrow_mut().rendered.push(*pose);
    }
}

/// Provider producing [`RecordingSurface`]s that all share one log, or
/// failing on demand to exercise the disabled fallback.
pub struct RecordingProvider {
    log: Rc<RefCell<SurfaceLog>>,
    fail_with: Option<String>,
    creates: u32,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(SurfaceLog::default())),
            fail_with: None,
            creates: 0,
        }
    }

    /// Provider whose `create` always fails with the given reason.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            fail_with: Some(reason.into()),
            ..Self::new()
        }
    }

    /// Shared log of every surface this provider has created.
    pub fn log(&self) -> Rc<RefCell<SurfaceLog>> {
        Rc::clone(&self.log)
    }

    /// How many surfaces have been created.
    pub fn creates(&self) -> u32 {
        self.creates
    }
}

impl Default for RecordingProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceProvider for RecordingProvider {
    fn create(
        &mut self,
        _config: &SceneConfig,
        _report: &CapabilityReport,
        _viewport: Viewport,
    ) -> Result<Box<dyn RenderSurface>, SceneError> {
        if let Some(reason) = &self.fail_with {
            return Err(SceneError::SurfaceCreation {
                reason: reason.clone(),
            });
        }
        self.creates += 1;
        Ok(Box::new(RecordingSurface {
            log: Rc::clone(&self.log),
        }))
    }
}
