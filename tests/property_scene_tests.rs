use proptest::prelude::*;
use timeline_rs::api::{TimelineConfig, TimelineEngine};
use timeline_rs::core::{Row, TimeInterval, Viewport};

proptest! {
    #[test]
    fn scene_build_is_deterministic_and_finite(
        samples in prop::collection::vec((0u32..100_000u32, 1u32..50_000u32), 1..64)
    ) {
        let rows: Vec<Row> = samples
            .chunks(8)
            .enumerate()
            .map(|(index, chunk)| {
                Row::new(
                    format!("row {index}"),
                    chunk
                        .iter()
                        .map(|&(start, duration)| {
                            let start = f64::from(start);
                            TimeInterval::new(start, start + f64::from(duration), "segment")
                                .expect("generated interval")
                        })
                        .collect(),
                )
            })
            .collect();

        let engine = TimelineEngine::new(TimelineConfig::default().with_width(800.0).stacked())
            .expect("engine");

        let first = engine.render(&rows, Viewport::new(800, 600)).expect("first scene");
        let second = engine.render(&rows, Viewport::new(800, 600)).expect("second scene");

        prop_assert_eq!(&first.frame, &second.frame);
        prop_assert!(first.frame.rects.iter().all(|rect|
            rect.x.is_finite()
            && rect.y.is_finite()
            && rect.width.is_finite()
            && rect.width >= 0.0
            && rect.height > 0.0
        ));
        prop_assert!(first.frame.validate().is_ok());
    }

    #[test]
    fn bar_edges_stay_inside_the_plot_range(
        samples in prop::collection::vec((0u32..100_000u32, 1u32..50_000u32), 2..64)
    ) {
        let rows = vec![Row::new(
            "row",
            samples
                .iter()
                .map(|&(start, duration)| {
                    let start = f64::from(start);
                    TimeInterval::new(start, start + f64::from(duration), "segment")
                        .expect("generated interval")
                })
                .collect(),
        )];

        let engine = TimelineEngine::new(TimelineConfig::default().with_width(800.0).stacked())
            .expect("engine");
        let scene = engine.render(&rows, Viewport::new(800, 600)).expect("scene");

        let (range_start, range_end) = scene.scale.range();
        let epsilon = 1e-6;
        for rendered in scene.rows[0].intervals.iter() {
            prop_assert!(rendered.x >= range_start - epsilon);
            prop_assert!(rendered.x + rendered.width <= range_end + epsilon);
        }
    }

    #[test]
    fn pan_offset_never_escapes_its_clamp(
        drags in prop::collection::vec(-2_000.0f64..2_000.0f64, 1..32),
        container in 100.0f64..1_000.0f64,
        overflow in 1.0f64..2_000.0f64,
    ) {
        let content = container + overflow;
        let mut pan = timeline_rs::interaction::PanState::default();

        for delta in drags {
            let offset = pan.apply_drag(delta, container, content).expect("drag");
            prop_assert!(offset <= 0.0);
            prop_assert!(offset >= container - content);
        }
    }
}
