use timeline_rs::api::{TimelineConfig, TimelineEngine};
use timeline_rs::core::{Row, TimeInterval, Viewport};
use timeline_rs::interaction::{
    HitKind, InteractionState, PanState, PointerPhase, TimelineEvent, place_tooltip, tooltip_text,
};

fn scene_with_one_bar() -> timeline_rs::api::TimelineScene {
    let rows = vec![Row::new(
        "route",
        vec![TimeInterval::new(0.0, 100.0, "drive to the terminal").expect("interval")],
    )];
    let engine =
        TimelineEngine::new(TimelineConfig::default().with_width(600.0).stacked()).expect("engine");
    engine.render(&rows, Viewport::new(600, 400)).expect("scene")
}

#[test]
fn hit_test_resolves_the_interval_under_the_pointer() {
    let scene = scene_with_one_bar();
    let bar = &scene.rows[0].intervals[0];

    let hit = scene
        .hit_test(bar.x + bar.width / 2.0, bar.y + bar.height / 2.0)
        .expect("hit");
    assert_eq!(
        hit.kind,
        HitKind::Interval {
            row_index: 0,
            interval_index: 0,
        }
    );

    assert!(scene.hit_test(bar.x - 1.0, 0.0).is_none());
}

#[test]
fn click_on_an_interval_dispatches_a_click_event() {
    let scene = scene_with_one_bar();
    let bar = &scene.rows[0].intervals[0];
    let mut state = InteractionState::default();

    let event = state
        .on_click(
            &scene.hit_regions,
            scene.domain(),
            bar.x + 1.0,
            bar.y + 1.0,
        )
        .expect("event");
    assert!(matches!(
        event,
        TimelineEvent::Pointer {
            phase: PointerPhase::Click,
            target: HitKind::Interval { row_index: 0, .. },
        }
    ));
}

#[test]
fn nav_clicks_report_the_current_domain_edges() {
    let rows = vec![Row::new(
        "route",
        vec![TimeInterval::new(10.0, 110.0, "drive").expect("interval")],
    )];
    let config = TimelineConfig::default()
        .with_width(600.0)
        .stacked()
        .with_axis_nav(true);
    let engine = TimelineEngine::new(config).expect("engine");
    let scene = engine.render(&rows, Viewport::new(600, 400)).expect("scene");

    let backward = scene
        .hit_regions
        .iter()
        .find(|region| region.kind == HitKind::NavBackward)
        .expect("backward region");
    let mut state = InteractionState::default();
    let event = state
        .on_click(
            &scene.hit_regions,
            scene.domain(),
            backward.x + 1.0,
            backward.y + 1.0,
        )
        .expect("event");
    assert_eq!(event, TimelineEvent::NavigateBackward { beginning: 10.0 });
}

#[test]
fn tooltip_anchors_below_the_region_and_clamps_to_the_viewport() {
    let scene = scene_with_one_bar();
    let region = scene.hit_regions[0];

    let placement = place_tooltip(region, 120.0, 600.0);
    assert_eq!(placement.y, region.y + region.height + 3.0);
    assert!(placement.x >= 0.0);

    // A tooltip wider than the space right of the anchor shifts left.
    let wide = place_tooltip(region, 590.0, 600.0);
    assert_eq!(wide.x, 10.0);
}

#[test]
fn tooltip_text_combines_start_time_and_description() {
    let interval =
        TimeInterval::new(1_622_556_000_000.0, 1_622_559_600_000.0, "drive to the terminal")
            .expect("interval");
    assert_eq!(
        tooltip_text(&interval, "%I %p"),
        "02 PM drive to the terminal"
    );
}

#[test]
fn pan_clamps_to_container_minus_content() {
    let mut pan = PanState::default();

    assert_eq!(pan.apply_drag(-5_000.0, 800.0, 1_400.0).expect("drag"), -600.0);
    assert_eq!(pan.apply_drag(50.0, 800.0, 1_400.0).expect("drag"), -550.0);
    assert_eq!(pan.apply_drag(5_000.0, 800.0, 1_400.0).expect("drag"), 0.0);
}

#[test]
fn pan_availability_requires_overflowing_content() {
    let rows = vec![Row::new(
        "route",
        vec![TimeInterval::new(0.0, 100.0, "drive").expect("interval")],
    )];
    let engine =
        TimelineEngine::new(TimelineConfig::default().with_width(1_200.0).stacked()).expect("engine");

    let overflowing = engine.render(&rows, Viewport::new(800, 400)).expect("scene");
    assert!(overflowing.pan_available());

    let fitting = engine.render(&rows, Viewport::new(1_600, 400)).expect("scene");
    assert!(!fitting.pan_available());
}

#[test]
fn scroll_update_carries_offset_and_scale() {
    let rows = vec![Row::new(
        "route",
        vec![TimeInterval::new(0.0, 100.0, "drive").expect("interval")],
    )];
    let engine =
        TimelineEngine::new(TimelineConfig::default().with_width(1_200.0).stacked()).expect("engine");
    let scene = engine.render(&rows, Viewport::new(800, 400)).expect("scene");

    let mut pan = PanState::default();
    pan.apply_drag(-100.0, scene.container_width, scene.content_width)
        .expect("drag");

    let update = scene.scroll_update(&pan);
    assert_eq!(update.offset_px, -100.0);
    assert_eq!(update.scale.domain(), scene.domain());
}
