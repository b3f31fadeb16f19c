use lumen_scene_core::testing::{
    RecordingProvider, RecordingScheduler, RecordingTasks, StaticProbe,
};
use lumen_scene_core::{
    CapabilityReport, SceneConfig, SceneController, SceneEvent, ScenePhase, SceneTime, Viewport,
};

fn secs(s: f64) -> SceneTime {
    SceneTime::from_seconds(s).unwrap()
}

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

    fn initialize(&mut self, controller: &mut SceneController, now: SceneTime) {
        controller.initialize(
            &mut self.probe,
            &mut self.provider,
            &mut self.scheduler,
            &mut self.tasks,
            Viewport::new(800.0, 600.0, 1.0),
            now,
        );
    }
}

#[test]
fn upgrade_fires_once_and_raises_density() {
    let mut host = Host::new(CapabilityReport::supported());
    let mut controller = SceneController::default();
    host.initialize(&mut controller, secs(0.0));

    let task = host.tasks.last_deferred().expect("upgrade deferred");
    controller.on_upgrade_due(task);

    assert_eq!(controller.phase(), ScenePhase::Upgraded);
    assert_eq!(controller.particle_count(), 900);
    assert_eq!(host.provider.log().borrow().particle_counts, vec![300, 900]);

    // The handle was consumed; replaying it must change nothing.
    controller.on_upgrade_due(task);
    assert_eq!(host.provider.log().borrow().particle_counts, vec![300, 900]);

    let upgrades = controller
        .take_events()
        .into_iter()
        .filter(|e| matches!(e, SceneEvent::Upgraded { .. }))
        .count();
    assert_eq!(upgrades, 1, "one-shot upgrade fires at most once");
}

#[test]
fn low_power_device_keeps_reduced_density() {
    let mut host = Host::new(CapabilityReport::low_power());
    let mut controller = SceneController::default();
    host.initialize(&mut controller, secs(0.0));
    assert!(controller.is_low_power());

    let task = host.tasks.last_deferred().expect("upgrade deferred");
    controller.on_upgrade_due(task);

    assert_eq!(controller.particle_count(), 400);
    assert_eq!(
        controller.take_events().last(),
        Some(&SceneEvent::Upgraded {
            particle_count: 400
        })
    );
}

#[test]
fn handle_from_a_previous_lifecycle_is_ignored() {
    let mut host = Host::new(CapabilityReport::supported());
    let mut controller = SceneController::default();

    host.initialize(&mut controller, secs(0.0));
    let stale = host.tasks.last_deferred().expect("upgrade deferred");

    controller.shutdown(&mut host.scheduler, &mut host.tasks);
    host.initialize(&mut controller, secs(1.0));

    // The old lifecycle's timer fires late.
    controller.on_upgrade_due(stale);
    assert_eq!(controller.phase(), ScenePhase::Basic);
    assert_eq!(controller.particle_count(), 300);

    let current = host.tasks.last_deferred().expect("new upgrade deferred");
    assert_ne!(current, stale);
    controller.on_upgrade_due(current);
    assert_eq!(controller.phase(), ScenePhase::Upgraded);
    assert_eq!(controller.particle_count(), 900);
}

#[test]
fn upgrade_applies_while_paused() {
    let mut host = Host::new(CapabilityReport::supported());
    let mut controller = SceneController::default();
    host.initialize(&mut controller, secs(0.0));

    controller.pause(&mut host.scheduler, secs(0.5));
    let task = host.tasks.last_deferred().expect("upgrade deferred");
    controller.on_upgrade_due(task);

    assert_eq!(controller.phase(), ScenePhase::Upgraded);
    assert_eq!(controller.particle_count(), 900);
    assert!(
        controller.scheduled_frame().is_none(),
        "upgrade alone must not restart the frame loop"
    );

    controller.resume(&mut host.scheduler, secs(1.0));
    assert_eq!(host.scheduler.scheduled(), 2);
}

#[test]
fn upgrade_density_follows_configuration() {
    let cfg = SceneConfig {
        upgraded_particle_count: 1500,
        ..SceneConfig::default()
    };
    let mut host = Host::new(CapabilityReport::supported());
    let mut controller = SceneController::new(cfg);
    host.initialize(&mut controller, secs(0.0));

    let task = host.tasks.last_deferred().expect("upgrade deferred");
    controller.on_upgrade_due(task);
    assert_eq!(controller.particle_count(), 1500);
}
