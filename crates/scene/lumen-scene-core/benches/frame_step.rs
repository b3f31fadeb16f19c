use criterion::{criterion_group, criterion_main, Criterion};

use lumen_scene_core::testing::StaticProbe;
use lumen_scene_core::{
    CapabilityReport, DeferredTasks, FrameHandle, FrameScheduler, HandleAllocator, RenderSurface,
    SceneConfig, SceneController, SceneError, ScenePose, SceneTime, SurfaceProvider, TaskHandle,
    Viewport,
};

// No-op host doubles; the recording ones would grow without bound under
// criterion's iteration counts.

#[derive(Default)]
struct NullScheduler {
    handles: HandleAllocator,
}

impl FrameScheduler for NullScheduler {
    fn schedule(&mut self) -> FrameHandle {
        self.handles.alloc_frame()
    }
    fn cancel(&mut self, _handle: FrameHandle) {}
}

#[derive(Default)]
struct NullTasks {
    handles: HandleAllocator,
}

impl DeferredTasks for NullTasks {
    fn defer(&mut self, _delay: SceneTime) -> TaskHandle {
        self.handles.alloc_task()
    }
    fn cancel(&mut self, _handle: TaskHandle) {}
}

struct NullSurface;

impl RenderSurface for NullSurface {
    fn resize(&mut self, _viewport: Viewport) {}
    fn set_particle_count(&mut self, _count: u32) {}
    fn render(&mut self, _pose: &ScenePose) {}
}

struct NullProvider;

impl SurfaceProvider for NullProvider {
    fn create(
        &mut self,
        _config: &SceneConfig,
        _report: &CapabilityReport,
        _viewport: Viewport,
    ) -> Result<Box<dyn RenderSurface>, SceneError> {
        Ok(Box::new(NullSurface))
    }
}

fn bench_frame_step(c: &mut Criterion) {
    let mut probe = StaticProbe::new(CapabilityReport::supported());
    let mut provider = NullProvider;
    let mut scheduler = NullScheduler::default();
    let mut tasks = NullTasks::default();

    let mut controller = SceneController::default();
    controller.initialize(
        &mut probe,
        &mut provider,
        &mut scheduler,
        &mut tasks,
        Viewport::new(1920.0, 1080.0, 2.0),
        SceneTime::zero(),
    );
    controller.set_pointer(0.4, -0.2);

    let mut tick: u64 = 0;
    c.bench_function("frame_step", |b| {
        b.iter(|| {
            tick += 1;
            let now = SceneTime::from_nanos(tick * 16_666_667);
            controller.on_frame(&mut scheduler, now);
        })
    });
}

criterion_group!(benches, bench_frame_step);
criterion_main!(benches);
