use timeline_rs::api::{
    AxisOrientation, TickSpec, TimelineConfig, TimelineEngine, calendar_year_label,
};
use timeline_rs::core::{Row, TimeInterval, Viewport};
use timeline_rs::render::LineStrokeStyle;

const HOUR_MS: f64 = 3_600_000.0;

fn hourly_rows() -> Vec<Row> {
    vec![Row::new(
        "route",
        vec![TimeInterval::new(0.0, 12.0 * HOUR_MS, "drive").expect("interval")],
    )]
}

fn axis_baseline_ys(scene: &timeline_rs::api::TimelineScene) -> Vec<f64> {
    scene
        .frame
        .lines
        .iter()
        .filter(|line| line.y1 == line.y2)
        .map(|line| line.y1)
        .collect()
}

#[test]
fn bottom_axis_sits_below_the_last_lane() {
    let config = TimelineConfig::default().with_width(600.0).stacked();
    let engine = TimelineEngine::new(config).expect("engine");
    let scene = engine
        .render(&hourly_rows(), Viewport::new(600, 400))
        .expect("scene");

    // margin.top 30 + one lane of (20 + 5).
    assert!(axis_baseline_ys(&scene).contains(&55.0));
}

#[test]
fn top_axis_sits_above_the_first_lane() {
    let config = TimelineConfig::default()
        .with_width(600.0)
        .stacked()
        .with_orientation(AxisOrientation::Top);
    let engine = TimelineEngine::new(config).expect("engine");
    let scene = engine
        .render(&hourly_rows(), Viewport::new(600, 400))
        .expect("scene");

    assert!(axis_baseline_ys(&scene).contains(&30.0));
}

#[test]
fn hourly_ticks_label_every_generated_instant() {
    let spec = TickSpec {
        granularity: timeline_rs::api::TickGranularity::Hours,
        interval: 3,
        ..TickSpec::default()
    };
    let config = TimelineConfig::default()
        .with_width(600.0)
        .stacked()
        .with_tick_spec(spec);
    let engine = TimelineEngine::new(config).expect("engine");
    let scene = engine
        .render(&hourly_rows(), Viewport::new(600, 400))
        .expect("scene");

    // 0, 3, 6, 9, 12 hours plus the row label.
    let tick_labels: Vec<&str> = scene
        .frame
        .texts
        .iter()
        .map(|text| text.text.as_str())
        .filter(|text| text.ends_with("AM") || text.ends_with("PM"))
        .collect();
    assert_eq!(tick_labels.len(), 5);
    assert_eq!(tick_labels[0], "12 AM");
    assert_eq!(tick_labels[1], "03 AM");
}

#[test]
fn explicit_tick_values_suppress_generation() {
    let spec = TickSpec {
        tick_values: Some(vec![2.0 * HOUR_MS, 7.0 * HOUR_MS]),
        ..TickSpec::default()
    };
    let config = TimelineConfig::default()
        .with_width(600.0)
        .stacked()
        .with_tick_spec(spec);
    let engine = TimelineEngine::new(config).expect("engine");
    let scene = engine
        .render(&hourly_rows(), Viewport::new(600, 400))
        .expect("scene");

    let tick_labels: Vec<&str> = scene
        .frame
        .texts
        .iter()
        .map(|text| text.text.as_str())
        .filter(|text| text.ends_with("AM") || text.ends_with("PM"))
        .collect();
    assert_eq!(tick_labels, vec!["02 AM", "07 AM"]);
}

#[test]
fn rotated_tick_labels_carry_the_configured_angle() {
    let config = TimelineConfig::default()
        .with_width(600.0)
        .stacked()
        .with_rotate_ticks_degrees(45.0);
    let engine = TimelineEngine::new(config).expect("engine");
    let scene = engine
        .render(&hourly_rows(), Viewport::new(600, 400))
        .expect("scene");

    assert!(
        scene
            .frame
            .texts
            .iter()
            .filter(|text| text.text.ends_with('M'))
            .all(|text| text.rotation_degrees == 45.0)
    );
}

#[test]
fn axis_guide_lines_are_dashed_and_span_the_lanes() {
    let config = TimelineConfig::default()
        .with_width(600.0)
        .stacked()
        .with_axis_guide_lines(timeline_rs::api::AxisGuideStyle::default());
    let engine = TimelineEngine::new(config).expect("engine");
    let scene = engine
        .render(&hourly_rows(), Viewport::new(600, 400))
        .expect("scene");

    let dashed: Vec<_> = scene
        .frame
        .lines
        .iter()
        .filter(|line| matches!(line.stroke_style, LineStrokeStyle::Dashed { .. }))
        .collect();
    assert!(!dashed.is_empty());
    assert!(dashed.iter().all(|line| line.x1 == line.x2));
}

#[test]
fn calendar_label_shows_a_range_across_years() {
    assert_eq!(
        calendar_year_label(1_640_822_400_000.0, 1_641_081_600_000.0),
        "2021-2022"
    );
    assert_eq!(
        calendar_year_label(1_622_505_600_000.0, 1_627_776_000_000.0),
        "2021"
    );
}

#[test]
fn nav_chevrons_register_hit_regions() {
    let config = TimelineConfig::default()
        .with_width(600.0)
        .stacked()
        .with_axis_nav(true);
    let engine = TimelineEngine::new(config).expect("engine");
    let scene = engine
        .render(&hourly_rows(), Viewport::new(600, 400))
        .expect("scene");

    let chevrons: Vec<&str> = scene
        .frame
        .texts
        .iter()
        .map(|text| text.text.as_str())
        .filter(|text| *text == "<" || *text == ">")
        .collect();
    assert_eq!(chevrons.len(), 2);

    use timeline_rs::interaction::HitKind;
    assert!(
        scene
            .hit_regions
            .iter()
            .any(|region| region.kind == HitKind::NavBackward)
    );
    assert!(
        scene
            .hit_regions
            .iter()
            .any(|region| region.kind == HitKind::NavForward)
    );
}
