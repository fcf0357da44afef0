use approx::assert_abs_diff_eq;
use chart_model::core::{AnimationPhase, ChartData, Entry, SeriesStore};
use chart_model::interaction::Highlight;
use chart_model::render::{BarRect, bar_bounds, highlight_rect, project_all_bar_rects, project_bar_rects};

fn grouped_data() -> ChartData {
    ChartData::new(
        vec!["a".to_owned(), "b".to_owned()],
        vec![
            SeriesStore::new(
                "First",
                vec![Entry::new(0.0, 3.0), Entry::stacked(1.0, [2.0, -1.0, 3.0])],
            ),
            SeriesStore::new("Second", vec![Entry::new(0.0, -3.0), Entry::new(1.0, 4.0)])
                .with_bar_space(0.0),
        ],
    )
    .with_group_space(0.5)
}

fn projected(data: &ChartData, phase: AnimationPhase) -> Vec<BarRect> {
    let mut rects = Vec::new();
    project_all_bar_rects(data, phase, &mut rects);
    rects
}

#[test]
fn bars_sit_in_their_lane_with_bar_space_trimmed() {
    let rects = projected(&grouped_data(), AnimationPhase::COMPLETE);
    let first = rects[0];
    // center = 0 * 2 + 0 + 0.5 * 0 + 0.25; half width 0.5 - 0.15 / 2
    assert_abs_diff_eq!(first.center_x(), 0.25, epsilon = 1e-12);
    assert_abs_diff_eq!(first.left, 0.25 - 0.425, epsilon = 1e-12);
    assert_abs_diff_eq!(first.right, 0.25 + 0.425, epsilon = 1e-12);
    assert_eq!((first.top, first.bottom), (3.0, 0.0));

    let second_lane = rects
        .iter()
        .find(|rect| rect.series_index == 1 && rect.entry_index == 1)
        .expect("second lane bar");
    // center = 1 * 2 + 1 + 0.5 + 0.25, full lane width
    assert_abs_diff_eq!(second_lane.center_x(), 3.75, epsilon = 1e-12);
    assert_abs_diff_eq!(second_lane.right - second_lane.left, 1.0, epsilon = 1e-12);
}

#[test]
fn negative_bars_grow_downward() {
    let rects = projected(&grouped_data(), AnimationPhase::COMPLETE);
    let negative = rects
        .iter()
        .find(|rect| rect.series_index == 1 && rect.entry_index == 0)
        .expect("negative bar");
    assert_eq!((negative.top, negative.bottom), (0.0, -3.0));
}

#[test]
fn stacked_entry_projects_one_rect_per_value() {
    let rects = projected(&grouped_data(), AnimationPhase::COMPLETE);
    let stack: Vec<(Option<usize>, f64, f64)> = rects
        .iter()
        .filter(|rect| rect.series_index == 0 && rect.entry_index == 1)
        .map(|rect| (rect.stack_index, rect.top, rect.bottom))
        .collect();
    assert_eq!(
        stack,
        vec![
            (Some(0), 2.0, 0.0),
            (Some(1), 0.0, -1.0),
            (Some(2), 5.0, 2.0),
        ]
    );
}

#[test]
fn phases_reveal_entries_and_scale_heights() {
    let data = grouped_data();
    let mut rects = Vec::new();
    project_bar_rects(&data, 1, AnimationPhase::new(0.5, 0.5), &mut rects);
    assert_eq!(rects.len(), 1);
    assert_eq!((rects[0].top, rects[0].bottom), (0.0, -1.5));

    rects.clear();
    project_bar_rects(&data, 1, AnimationPhase::new(0.0, 1.0), &mut rects);
    assert!(rects.is_empty());
}

#[test]
fn hidden_series_and_nan_values_are_skipped() {
    let data = ChartData::new(
        Vec::new(),
        vec![
            SeriesStore::new("Hidden", vec![Entry::new(0.0, 1.0)]).with_visible(false),
            SeriesStore::new("Gaps", vec![Entry::new(0.0, f64::NAN), Entry::new(1.0, 2.0)]),
        ],
    );
    let rects = projected(&data, AnimationPhase::COMPLETE);
    assert_eq!(rects.len(), 1);
    assert_eq!(rects[0].series_index, 1);
    assert_eq!(rects[0].entry_index, 1);
}

#[test]
fn projection_reuses_buffer_contents() {
    let data = grouped_data();
    let mut rects = vec![projected(&data, AnimationPhase::COMPLETE)[0]; 32];
    project_all_bar_rects(&data, AnimationPhase::COMPLETE, &mut rects);
    assert_eq!(rects.len(), 6);
}

#[test]
fn bounds_ignore_animation_and_highlight_follows_stack() {
    let data = grouped_data();
    let entry = Entry::new(1.0, 4.0);
    let bounds = bar_bounds(&data, 1, &entry).expect("bounds");
    assert_eq!((bounds.top, bounds.bottom), (4.0, 0.0));
    assert!(bar_bounds(&data, 1, &Entry::new(1.0, 9.0)).is_none());

    let whole = highlight_rect(&data, &Highlight::new(1.0, 0), AnimationPhase::COMPLETE)
        .expect("whole stacked bar");
    assert_eq!((whole.top, whole.bottom), (5.0, -1.0));

    let segment = highlight_rect(
        &data,
        &Highlight::new(1.0, 0).with_stack_index(2),
        AnimationPhase::COMPLETE,
    )
    .expect("stack segment");
    assert_eq!((segment.top, segment.bottom), (5.0, 2.0));

    assert!(highlight_rect(&data, &Highlight::new(1.5, 0), AnimationPhase::COMPLETE).is_none());
}
