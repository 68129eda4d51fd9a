// Teleop panel driven through the pointer, with mocked middleware seams.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use embedded_graphics::prelude::Point;
use mockall::mock;
use mockall::predicate::always;
use robot_gui::core::FAILURE_SENTINEL;
use robot_gui::gui::{Canvas, Pointer, Ui, WidgetId, layout_entry};
use robot_gui::{
    CommandPublisher, DistanceOutcome, DistanceService, Inbound, PanelConfig, PanelError, PoseSnapshot,
    TeleopPanel, VelocityCommand,
};
use rstest::{fixture, rstest};

mock! {
    Distance {}
    impl DistanceService for Distance {
        fn request(&self, timeout: Duration) -> DistanceOutcome;
    }
}

/// Records every published command.
#[derive(Clone, Default)]
struct Recorder {
    sent: Arc<Mutex<Vec<VelocityCommand>>>,
}

impl CommandPublisher for Recorder {
    fn publish(&self, command: &VelocityCommand) -> Result<(), PanelError> {
        self.sent.lock().unwrap().push(*command);
        Ok(())
    }
}

struct Harness {
    panel: TeleopPanel<Recorder, MockDistance>,
    sent: Arc<Mutex<Vec<VelocityCommand>>>,
    ui: Ui,
    canvas: Canvas,
}

impl Harness {
    fn new(config: PanelConfig, distance: MockDistance) -> Self {
        let recorder = Recorder::default();
        let sent = recorder.sent.clone();
        Harness {
            canvas: Canvas::new(config.display.width, config.display.height),
            panel: TeleopPanel::new(&config, recorder, distance),
            sent,
            ui: Ui::new(),
        }
    }

    /// Presses and releases the left button over `id`, one frame each.
    fn click(&mut self, id: WidgetId) -> Option<WidgetId> {
        let at = layout_entry(id).area.center();
        self.frame(Pointer { position: Some(at), left_down: true });
        self.frame(Pointer { position: Some(at), left_down: false })
    }

    fn frame(&mut self, pointer: Pointer) -> Option<WidgetId> {
        self.canvas.reset();
        self.ui.begin_frame(pointer);
        self.panel.update(&self.ui, &mut self.canvas)
    }

    fn published(&self) -> Vec<VelocityCommand> {
        self.sent.lock().unwrap().clone()
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new(PanelConfig::default(), MockDistance::new())
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[rstest]
fn single_forward_click_is_single_increment(mut harness: Harness) {
    assert_eq!(harness.click(WidgetId::Forward), Some(WidgetId::Forward));

    let sent = harness.published();
    assert_eq!(sent.len(), 1);
    assert!(close(sent[0].linear, 0.1));
}

#[rstest]
fn forward_then_backward_restores_speed(mut harness: Harness) {
    harness.click(WidgetId::Forward);
    harness.click(WidgetId::Backward);

    let sent = harness.published();
    assert_eq!(sent.len(), 2);
    assert!(close(sent[1].linear, 0.0));
    assert!(close(harness.panel.command().linear, 0.0));
}

#[rstest]
fn every_publish_carries_the_full_command(mut harness: Harness) {
    harness.click(WidgetId::Forward);
    harness.click(WidgetId::Left);
    harness.click(WidgetId::Forward);
    harness.click(WidgetId::Right);
    harness.click(WidgetId::Right);

    let sent = harness.published();
    let pairs: Vec<(f64, f64)> = sent.iter().map(|c| (c.linear, c.angular)).collect();
    let expected = [(0.1, 0.0), (0.1, 0.1), (0.2, 0.1), (0.2, 0.0), (0.2, -0.1)];
    assert_eq!(pairs.len(), expected.len());
    for ((lin, ang), (el, ea)) in pairs.iter().zip(expected) {
        assert!(close(*lin, el) && close(*ang, ea), "got ({}, {}) want ({}, {})", lin, ang, el, ea);
    }
}

#[rstest]
#[case(&[WidgetId::Forward, WidgetId::Forward, WidgetId::Left])]
#[case(&[WidgetId::Backward, WidgetId::Right, WidgetId::Right])]
#[case(&[])]
fn stop_always_zeroes(mut harness: Harness, #[case] before: &[WidgetId]) {
    for id in before {
        harness.click(*id);
    }
    harness.click(WidgetId::Stop);

    let last = *harness.published().last().unwrap();
    assert_eq!(last, VelocityCommand { linear: 0.0, angular: 0.0 });
}

#[rstest]
fn quick_tap_between_frames_still_clicks(mut harness: Harness) {
    let at = Some(layout_entry(WidgetId::Forward).area.center());
    harness.frame(Pointer { position: at, left_down: false });

    harness.ui.sample(Pointer { position: at, left_down: true });
    harness.ui.sample(Pointer { position: at, left_down: false });
    assert_eq!(
        harness.frame(Pointer { position: at, left_down: false }),
        Some(WidgetId::Forward)
    );

    assert_eq!(harness.published().len(), 1);
    assert_eq!(harness.frame(Pointer { position: at, left_down: false }), None);
}

#[rstest]
fn hovering_without_release_does_nothing(mut harness: Harness) {
    let over_forward = layout_entry(WidgetId::Forward).area.center();
    harness.frame(Pointer { position: Some(over_forward), left_down: false });
    harness.frame(Pointer { position: Some(over_forward), left_down: true });
    assert!(harness.published().is_empty());
}

#[rstest]
fn release_outside_any_button_does_nothing(mut harness: Harness) {
    let empty = Point::new(300, 20);
    harness.frame(Pointer { position: Some(empty), left_down: true });
    assert_eq!(harness.frame(Pointer { position: Some(empty), left_down: false }), None);
    assert!(harness.published().is_empty());
}

#[test]
fn step_sizes_come_from_config() {
    let config = PanelConfig::from_yaml_str("teleop:\n  linear_step: 0.5\n  angular_step: 0.25\n").unwrap();
    let mut harness = Harness::new(config, MockDistance::new());

    harness.click(WidgetId::Forward);
    harness.click(WidgetId::Left);
    assert_eq!(harness.panel.command(), VelocityCommand { linear: 0.5, angular: 0.25 });
}

#[test]
fn call_uses_configured_timeout_and_shows_answer() {
    let config = PanelConfig::from_yaml_str("ros:\n  service_timeout_ms: 750\n").unwrap();
    let mut distance = MockDistance::new();
    distance
        .expect_request()
        .withf(|timeout| *timeout == Duration::from_millis(750))
        .times(1)
        .returning(|_| DistanceOutcome::Success("The total distance is 3.21 m".to_string()));
    let mut harness = Harness::new(config, distance);

    assert_eq!(harness.click(WidgetId::Call), Some(WidgetId::Call));
    assert_eq!(harness.panel.distance_reading(), "The total distance is 3.21 m");
    assert!(harness.published().is_empty());
}

#[rstest]
#[case(DistanceOutcome::Timeout)]
#[case(DistanceOutcome::TransportError("service unavailable".to_string()))]
fn failed_call_shows_sentinel(#[case] outcome: DistanceOutcome) {
    let mut distance = MockDistance::new();
    distance
        .expect_request()
        .with(always())
        .times(1)
        .returning(move |_| outcome.clone());
    let mut harness = Harness::new(PanelConfig::default(), distance);

    harness.click(WidgetId::Call);
    assert_eq!(harness.panel.distance_reading(), FAILURE_SENTINEL);
}

#[rstest]
fn pose_updates_replace_wholesale(mut harness: Harness) {
    harness.panel.handle(Inbound::Odometry(PoseSnapshot::at(4.0, 5.0, 6.0)));
    harness.panel.handle(Inbound::Odometry(PoseSnapshot::at(1.0, 0.0, 0.0)));
    harness.frame(Pointer::default());

    let pose = harness.panel.pose();
    assert_eq!((pose.position.x, pose.position.y, pose.position.z), (1.0, 0.0, 0.0));
}
