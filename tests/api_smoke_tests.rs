use chart_model::api::{
    ChartEngineConfigJsonContractV1, ENGINE_CONFIG_JSON_SCHEMA_V1, PieConfig,
};
use chart_model::core::{AnimationPhase, ChartData, ChartKind, Entry, SeriesStore, Viewport};
use chart_model::interaction::{Highlight, TouchPoint};
use chart_model::render::{LegendConfig, NullRenderer};
use chart_model::{ChartEngine, ChartEngineConfig, ChartError};

fn grouped_data() -> ChartData {
    ChartData::new(
        vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
        vec![
            SeriesStore::new(
                "North",
                vec![Entry::new(0.0, 1.0), Entry::new(1.0, 5.0), Entry::new(2.0, 2.0)],
            ),
            SeriesStore::new(
                "South",
                vec![Entry::new(0.0, 3.0), Entry::new(1.0, 4.0), Entry::new(2.0, 1.0)],
            ),
        ],
    )
}

fn pie_data() -> ChartData {
    ChartData::new(
        vec!["Q1".to_owned(), "Q2".to_owned(), "Q3".to_owned()],
        vec![SeriesStore::new(
            "Share",
            vec![Entry::new(0.0, 1.0), Entry::new(1.0, 0.0), Entry::new(2.0, 3.0)],
        )],
    )
}

fn bar_engine() -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(750, 500), ChartKind::Bar)
        .with_group_space(0.5);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_data(grouped_data());
    engine
}

fn pie_engine() -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(Viewport::new(200, 200), ChartKind::Pie);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_data(pie_data());
    engine
}

#[test]
fn engine_rejects_invalid_viewport() {
    let config = ChartEngineConfig::new(Viewport::new(0, 10), ChartKind::Bar);
    let result = ChartEngine::new(NullRenderer::default(), config);
    assert!(matches!(
        result,
        Err(ChartError::InvalidViewport {
            width: 0,
            height: 10
        })
    ));

    let mut engine = bar_engine();
    assert!(engine.set_viewport(Viewport::new(10, 0)).is_err());
    assert_eq!(engine.config().viewport, Viewport::new(750, 500));
}

#[test]
fn config_validation_catches_out_of_range_values() {
    let viewport = Viewport::new(100, 100);
    let base = ChartEngineConfig::new(viewport, ChartKind::Pie);
    assert!(base.validate().is_ok());

    let bad_hole = base.with_pie(PieConfig {
        hole_radius_percent: 150.0,
        ..PieConfig::default()
    });
    assert!(bad_hole.validate().is_err());

    assert!(base.with_group_space(-1.0).validate().is_err());
    assert!(
        base.with_phase(AnimationPhase::new(1.5, 1.0))
            .validate()
            .is_err()
    );
    assert!(
        base.with_legend(LegendConfig {
            text_size: 0.0,
            ..LegendConfig::default()
        })
        .validate()
        .is_err()
    );
}

#[test]
fn config_json_round_trips_and_accepts_contract_payloads() {
    let config = ChartEngineConfig::new(Viewport::new(320, 240), ChartKind::Pie)
        .with_group_space(0.25)
        .with_phase(AnimationPhase::new(0.5, 1.0));

    let json = config.to_json_pretty().expect("serialize");
    assert_eq!(ChartEngineConfig::from_json_str(&json).expect("parse"), config);
    assert_eq!(
        ChartEngineConfig::from_json_compat_str(&json).expect("bare payload"),
        config
    );

    let contract = config.to_json_contract_v1_pretty().expect("serialize contract");
    assert!(contract.contains("\"schema_version\": 1"));
    assert_eq!(
        ChartEngineConfig::from_json_compat_str(&contract).expect("contract payload"),
        config
    );
}

#[test]
fn unsupported_contract_version_is_rejected() {
    let payload = ChartEngineConfigJsonContractV1 {
        schema_version: ENGINE_CONFIG_JSON_SCHEMA_V1 + 1,
        config: ChartEngineConfig::new(Viewport::new(10, 10), ChartKind::Line),
    };
    let json = serde_json::to_string(&payload).expect("serialize");
    let error = ChartEngineConfig::from_json_compat_str(&json).expect_err("version 2");
    assert!(matches!(error, ChartError::InvalidData(message) if message.contains("unsupported")));
}

#[test]
fn minimal_json_fills_defaults() {
    let config = ChartEngineConfig::from_json_str(r#"{"viewport":{"width":10,"height":20}}"#)
        .expect("parse");
    assert_eq!(config.kind, ChartKind::Bar);
    assert_eq!(config.group_space, 0.8);
    assert_eq!(config.pie, PieConfig::default());
    assert_eq!(config.legend, LegendConfig::default());
    assert_eq!(config.phase, AnimationPhase::COMPLETE);
}

#[test]
fn set_data_applies_configured_group_space() {
    let engine = bar_engine();
    assert_eq!(engine.data().group_space(), 0.5);
    assert_eq!(engine.data().get_data_set_count(), 2);
}

#[test]
fn bar_frame_contains_bars_highlight_and_legend() {
    let mut engine = bar_engine();
    let frame = engine.build_frame().expect("frame");
    assert_eq!(frame.rects.len(), 6);
    // One glyph and one label per single-color series.
    assert_eq!(frame.legend.len(), 4);
    assert!(frame.arcs.is_empty());

    engine.set_highlights(vec![Highlight::new(1.0, 0)]);
    engine.render().expect("render");
    let renderer = engine.renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_rect_count, 7);
    assert_eq!(renderer.last_legend_run_count, 4);
}

#[test]
fn bar_pixels_follow_value_transform() {
    let mut engine = bar_engine();
    let frame = engine.build_frame().expect("frame");
    let transform = engine.value_transform().expect("transform");

    // North at x = 0: lane center 0.25, top at y = 1.
    let first = frame.rects[0];
    let (left, top) = transform.value_to_pixel(0.25 - 0.425, 1.0);
    assert!((first.left - left).abs() < 1e-9);
    assert!((first.top - top).abs() < 1e-9);
    assert!((first.bottom - 500.0).abs() < 1e-9);
}

#[test]
fn pixel_touch_resolves_through_transform() {
    let mut engine = bar_engine();
    // 100 px per x unit from -0.5; 310 px lands on 2.6, category 1 lane 0.
    let highlight = engine.highlight_at_pixel(310.0, 300.0).expect("transform");
    assert_eq!(highlight, Some(Highlight::new(1.0, 0)));
    assert_eq!(engine.highlights(), &[Highlight::new(1.0, 0)]);

    assert_eq!(engine.highlight_at_pixel(-100.0, 300.0).expect("transform"), None);
    assert!(engine.highlights().is_empty());
}

#[test]
fn update_data_drops_highlights_of_removed_series() {
    let mut engine = bar_engine();
    engine.set_highlights(vec![Highlight::new(0.0, 0), Highlight::new(0.0, 1)]);
    let removed = engine.update_data(|data| data.remove_data_set(1));
    assert_eq!(removed.map(|series| series.label().to_owned()), Some("South".to_owned()));
    assert_eq!(engine.highlights(), &[Highlight::new(0.0, 0)]);
    assert_eq!(engine.data().y_max(), 5.0);
}

#[test]
fn pie_frame_skips_zero_slices_and_labels_percentages() {
    let mut engine = pie_engine();
    let frame = engine.build_frame().expect("frame");
    assert_eq!(frame.arcs.len(), 2);
    assert_eq!(frame.arcs[0].outer_radius, 80.0);
    assert_eq!(frame.arcs[0].inner_radius, 40.0);
    let texts: Vec<&str> = frame.texts.iter().map(|text| text.text.as_str()).collect();
    assert_eq!(texts, vec!["25.0 %", "75.0 %"]);
    assert!(frame.validate().is_ok());
}

#[test]
fn pie_frame_skips_labels_of_near_zero_slices() {
    let mut engine = pie_engine();
    engine.set_data(ChartData::new(
        Vec::new(),
        vec![SeriesStore::new(
            "Share",
            vec![Entry::new(0.0, 5e-7), Entry::new(1.0, 2.0)],
        )],
    ));
    let frame = engine.build_frame().expect("frame");
    assert_eq!(frame.arcs.len(), 1);
    let texts: Vec<&str> = frame.texts.iter().map(|text| text.text.as_str()).collect();
    assert_eq!(texts, vec!["100.0 %"]);
}

#[test]
fn pie_touch_pushes_slice_out() {
    let mut engine = pie_engine();
    let highlight = engine.highlight_at(TouchPoint::new(100.0, 60.0));
    assert_eq!(highlight, Some(Highlight::new(0.0, 0)));

    let frame = engine.build_frame().expect("frame");
    assert_eq!(frame.arcs[0].outer_radius, 98.0);
    assert_eq!(frame.arcs[1].outer_radius, 80.0);
}

#[test]
fn resizing_reallocates_offscreen_surface() {
    let mut engine = pie_engine();
    engine.build_frame().expect("frame");
    assert_eq!(engine.surface().generation(), 1);

    engine.build_frame().expect("frame");
    assert_eq!(engine.surface().generation(), 1);

    engine.set_viewport(Viewport::new(300, 200)).expect("resize");
    engine.build_frame().expect("frame");
    assert_eq!(engine.surface().generation(), 2);
    assert_eq!(engine.surface().size(), (300, 200));
    assert!(engine.surface().is_valid());
}

#[test]
fn line_frame_connects_revealed_finite_points() {
    let config = ChartEngineConfig::new(Viewport::new(400, 300), ChartKind::Line)
        .with_legend(LegendConfig {
            enabled: false,
            ..LegendConfig::default()
        });
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_data(ChartData::new(
        vec!["a".to_owned(), "b".to_owned(), "c".to_owned()],
        vec![
            SeriesStore::new(
                "Up",
                vec![Entry::new(0.0, 1.0), Entry::new(1.0, 2.0), Entry::new(2.0, 3.0)],
            ),
            SeriesStore::new(
                "Gap",
                vec![Entry::new(0.0, 2.0), Entry::new(1.0, f64::NAN), Entry::new(2.0, 1.0)],
            ),
        ],
    ));

    let frame = engine.build_frame().expect("frame");
    assert_eq!(frame.lines.len(), 3);
    assert!(frame.legend.is_empty());

    engine.set_phase(AnimationPhase::new(0.5, 1.0)).expect("phase");
    engine.set_highlights(vec![Highlight::new(1.0, 0)]);
    let frame = engine.build_frame().expect("frame");
    // One revealed segment of "Up" plus the highlight marker.
    assert_eq!(frame.lines.len(), 2);
    assert_eq!(frame.lines[1].y2, 300.0);
}

#[test]
fn line_touch_picks_nearest_series_at_category() {
    let config = ChartEngineConfig::new(Viewport::new(400, 300), ChartKind::Line);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_data(grouped_data());
    assert_eq!(
        engine.highlight_at(TouchPoint::new(0.9, 4.2)),
        Some(Highlight::new(1.0, 1))
    );
    assert_eq!(
        engine.highlight_at(TouchPoint::new(1.2, 4.8)),
        Some(Highlight::new(1.0, 0))
    );
}
