use lumen_scene_core::testing::{
    RecordingProvider, RecordingScheduler, RecordingTasks, StaticProbe,
};
use lumen_scene_core::{
    CapabilityReport, SceneController, SceneEvent, ScenePhase, SceneTime, Viewport,
};

fn secs(s: f64) -> SceneTime {
    SceneTime::from_seconds(s).unwrap()
}

fn viewport() -> Viewport {
    Viewport::new(800.0, 600.0, 1.0)
}

/// Bundle of host-side doubles a controller is wired to.
struct Host {
    probe: StaticProbe,
    provider: RecordingProvider,
    scheduler: RecordingScheduler,
    tasks: RecordingTasks,
}

impl Host {
    fn new(report: CapabilityReport) -> Self {
        Self {
            probe: StaticProbe::new(report),
            provider: RecordingProvider::new(),
            scheduler: RecordingScheduler::new(),
            tasks: RecordingTasks::new(),
        }
    }

    fn initialize(&mut self, controller: &mut SceneController, now: SceneTime) -> ScenePhase {
        controller.initialize(
            &mut self.probe,
            &mut self.provider,
            &mut self.scheduler,
            &mut self.tasks,
            viewport(),
            now,
        )
    }
}

#[test]
fn construction_probes_once_and_starts_basic() {
    let mut host = Host::new(CapabilityReport::supported());
    let mut controller = SceneController::default();

    let phase = host.initialize(&mut controller, secs(0.0));

    assert_eq!(phase, ScenePhase::Basic);
    assert_eq!(host.probe.calls(), 1);
    assert_eq!(host.provider.creates(), 1);
    assert_eq!(host.scheduler.scheduled(), 1, "first frame requested");
    assert_eq!(controller.particle_count(), 300);
    assert_eq!(
        host.provider.log().borrow().particle_counts,
        vec![300],
        "surface seeded with the base density"
    );

    let deferred = host.tasks.deferred();
    assert_eq!(deferred.len(), 1, "upgrade deferred exactly once");
    assert_eq!(deferred[0].1.as_millis(), 1200.0);
}

#[test]
fn initialize_twice_is_a_no_op() {
    let mut host = Host::new(CapabilityReport::supported());
    let mut controller = SceneController::default();

    host.initialize(&mut controller, secs(0.0));
    let phase = host.initialize(&mut controller, secs(0.5));

    assert_eq!(phase, ScenePhase::Basic);
    assert_eq!(host.probe.calls(), 1, "capability probed once per lifecycle");
    assert_eq!(host.provider.creates(), 1, "no duplicate surface");
    assert_eq!(host.scheduler.scheduled(), 1, "no duplicate frame loop");
    assert_eq!(host.tasks.deferred().len(), 1);
}

#[test]
fn unsupported_probe_builds_nothing() {
    let mut host = Host::new(CapabilityReport::unsupported("mobile device"));
    let mut controller = SceneController::default();

    let phase = host.initialize(&mut controller, secs(0.0));

    assert_eq!(phase, ScenePhase::Disabled);
    assert_eq!(host.provider.creates(), 0, "no render surface constructed");
    assert_eq!(host.scheduler.scheduled(), 0, "no frame ever scheduled");
    assert!(host.tasks.deferred().is_empty(), "no upgrade deferred");
    assert_eq!(controller.particle_count(), 0);

    let events = controller.take_events();
    assert_eq!(
        events,
        vec![SceneEvent::Disabled {
            reason: "mobile device".to_string()
        }]
    );

    // Disabled is terminal: a second call neither re-probes nor builds.
    host.initialize(&mut controller, secs(1.0));
    assert_eq!(host.probe.calls(), 1);
    assert_eq!(controller.phase(), ScenePhase::Disabled);
}

#[test]
fn surface_failure_falls_back_to_disabled() {
    let mut host = Host::new(CapabilityReport::supported());
    host.provider = RecordingProvider::failing("context lost");
    let mut controller = SceneController::default();

    let phase = host.initialize(&mut controller, secs(0.0));

    assert_eq!(phase, ScenePhase::Disabled);
    assert_eq!(host.scheduler.scheduled(), 0);
    assert!(controller.scheduled_frame().is_none());

    let events = controller.take_events();
    match &events[0] {
        SceneEvent::Disabled { reason } => assert!(reason.contains("context lost")),
        other => panic!("expected Disabled event, got {other:?}"),
    }
}

#[test]
fn shutdown_cancels_everything_and_returns_to_idle() {
    let mut host = Host::new(CapabilityReport::supported());
    let mut controller = SceneController::default();

    host.initialize(&mut controller, secs(0.0));
    let frame = controller.scheduled_frame().expect("frame outstanding");
    let task = controller.pending_upgrade().expect("upgrade pending");

    controller.shutdown(&mut host.scheduler, &mut host.tasks);

    assert_eq!(controller.phase(), ScenePhase::Idle);
    assert_eq!(controller.particle_count(), 0);
    assert_eq!(host.scheduler.cancelled(), &[frame]);
    assert_eq!(host.tasks.cancelled(), &[task]);

    // A later initialize starts a fresh lifecycle with a fresh probe.
    let phase = host.initialize(&mut controller, secs(5.0));
    assert_eq!(phase, ScenePhase::Basic);
    assert_eq!(host.probe.calls(), 2);
    assert_eq!(host.provider.creates(), 2);
}

#[test]
fn shutdown_before_initialize_is_a_no_op() {
    let mut host = Host::new(CapabilityReport::supported());
    let mut controller = SceneController::default();

    controller.shutdown(&mut host.scheduler, &mut host.tasks);

    assert_eq!(controller.phase(), ScenePhase::Idle);
    assert!(host.scheduler.cancelled().is_empty());
    assert!(controller.take_events().is_empty());
}

#[test]
fn events_trace_the_lifecycle_in_order() {
    let mut host = Host::new(CapabilityReport::supported());
    let mut controller = SceneController::default();

    host.initialize(&mut controller, secs(0.0));
    controller.pause(&mut host.scheduler, secs(1.0));
    controller.resume(&mut host.scheduler, secs(2.0));
    controller.shutdown(&mut host.scheduler, &mut host.tasks);

    let events = controller.take_events();
    assert_eq!(
        events,
        vec![
            SceneEvent::Initialized {
                phase: ScenePhase::Basic,
                particle_count: 300
            },
            SceneEvent::Paused,
            SceneEvent::Resumed,
            SceneEvent::ShutDown,
        ]
    );
    assert!(controller.take_events().is_empty(), "drained on take");
}
