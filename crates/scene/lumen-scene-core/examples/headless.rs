use anyhow::Result;
use log::info;

use lumen_scene_core::testing::StaticProbe;
use lumen_scene_core::{
    CapabilityReport, DeferredTasks, FrameHandle, FrameScheduler, HandleAllocator, RenderSurface,
    SceneConfig, SceneController, SceneError, ScenePose, SceneTime, SurfaceProvider, TaskHandle,
    Viewport,
};

// A synthetic host: handles come from an allocator, deferred tasks queue
// up for the main loop to fire, and the surface logs instead of drawing.

#[derive(Default)]
struct LoopScheduler {
    handles: HandleAllocator,
}

impl FrameScheduler for LoopScheduler {
    fn schedule(&mut self) -> FrameHandle {
        self.handles.alloc_frame()
    }
    fn cancel(&mut self, _handle: FrameHandle) {}
}

#[derive(Default)]
struct QueueTasks {
    handles: HandleAllocator,
    pending: Vec<TaskHandle>,
}

impl DeferredTasks for QueueTasks {
    fn defer(&mut self, _delay: SceneTime) -> TaskHandle {
        let handle = self.handles.alloc_task();
        self.pending.push(handle);
        handle
    }
    fn cancel(&mut self, handle: TaskHandle) {
        self.pending.retain(|h| *h != handle);
    }
}

struct ConsoleSurface;

impl RenderSurface for ConsoleSurface {
    fn resize(&mut self, viewport: Viewport) {
        info!("surface resized to {}x{}", viewport.width, viewport.height);
    }
    fn set_particle_count(&mut self, count: u32) {
        info!("particle field rebuilt with {} points", count);
    }
    fn render(&mut self, _pose: &ScenePose) {}
}

struct ConsoleProvider;

impl SurfaceProvider for ConsoleProvider {
    fn create(
        &mut self,
        _config: &SceneConfig,
        _report: &CapabilityReport,
        viewport: Viewport,
    ) -> Result<Box<dyn RenderSurface>, SceneError> {
        info!("creating surface at {}x{}", viewport.width, viewport.height);
        Ok(Box::new(ConsoleSurface))
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut probe = StaticProbe::new(CapabilityReport::supported());
    let mut provider = ConsoleProvider;
    let mut scheduler = LoopScheduler::default();
    let mut tasks = QueueTasks::default();
    let mut controller = SceneController::default();

    controller.initialize(
        &mut probe,
        &mut provider,
        &mut scheduler,
        &mut tasks,
        Viewport::new(1280.0, 720.0, 1.0),
        SceneTime::zero(),
    );
    controller.set_pointer(0.3, -0.2);

    let upgrade_delay = controller.config().upgrade_delay;

    // Three simulated seconds at 60 fps, hidden for half a second in the
    // middle, with the upgrade timer fired once its delay elapses.
    for tick in 1..=180u64 {
        let now = SceneTime::from_millis(tick as f64 * 1000.0 / 60.0)?;

        if now >= upgrade_delay {
            if let Some(task) = tasks.pending.pop() {
                controller.on_upgrade_due(task);
            }
        }
        if tick == 60 {
            controller.pause(&mut scheduler, now);
        }
        if tick == 90 {
            controller.resume(&mut scheduler, now);
        }
        if controller.scheduled_frame().is_some() {
            controller.on_frame(&mut scheduler, now);
        }
    }

    for event in controller.take_events() {
        info!("event: {:?}", event);
    }

    let pose = controller.pose();
    println!(
        "final pose: yaw {:.3} pitch {:.3} camera [{:.3}, {:.3}, {:.3}]",
        pose.yaw,
        pose.pitch,
        pose.camera_position[0],
        pose.camera_position[1],
        pose.camera_position[2]
    );
    Ok(())
}
