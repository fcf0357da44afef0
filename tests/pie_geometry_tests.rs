use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use chart_model::core::{AnimationPhase, ChartData, ChartKind, Entry, PieAngles, SeriesStore};
use chart_model::interaction::{
    Highlight, HighlightResolver, PieHighlighter, PieHitLayout, TouchPoint,
};
use chart_model::render::{PieLayout, SliceArc, project_slices, slice_gap_angle, slice_labels};

fn quarter_data() -> ChartData {
    ChartData::new(
        vec!["Q1".to_owned(), "Q2".to_owned(), "Q3".to_owned()],
        vec![SeriesStore::new(
            "Revenue",
            vec![Entry::new(0.0, 1.0), Entry::new(1.0, 0.0), Entry::new(2.0, -3.0)],
        )],
    )
}

fn layout(slice_space: f64, hole_enabled: bool) -> PieLayout {
    PieLayout {
        center_x: 100.0,
        center_y: 100.0,
        radius: 50.0,
        rotation_angle: 270.0,
        hole_radius_percent: 50.0,
        hole_enabled,
        slice_space,
    }
}

fn arcs(
    data: &ChartData,
    layout: &PieLayout,
    phase: AnimationPhase,
    highlights: &[Highlight],
) -> Vec<SliceArc> {
    let angles = PieAngles::compute(data);
    let mut out = Vec::new();
    project_slices(data, &angles, layout, phase, highlights, &mut out);
    out
}

#[test]
fn angles_use_absolute_magnitudes_and_sum_to_full_circle() {
    let angles = PieAngles::compute(&quarter_data());
    assert_eq!(angles.draw_angles(), &[90.0, 0.0, 270.0]);
    assert_eq!(angles.absolute_angles(), &[90.0, 90.0, 360.0]);
    let total: f64 = angles.draw_angles().iter().sum();
    assert_abs_diff_eq!(total, 360.0, epsilon = 1e-9);
}

#[test]
fn near_zero_values_contribute_no_angle() {
    let data = ChartData::new(
        Vec::new(),
        vec![SeriesStore::new(
            "Tiny",
            vec![Entry::new(0.0, 5e-7), Entry::new(1.0, 2.0)],
        )],
    );
    let angles = PieAngles::compute(&data);
    assert_eq!(angles.draw_angles(), &[0.0, 360.0]);
}

#[test]
fn zero_slices_are_not_drawn() {
    let slices = arcs(&quarter_data(), &layout(0.0, false), AnimationPhase::COMPLETE, &[]);
    assert_eq!(slices.len(), 2);
    assert_eq!(slices[0].entry_index, 0);
    assert_eq!(slices[1].entry_index, 2);
    assert_abs_diff_eq!(slices[0].start_angle, 270.0, epsilon = 1e-9);
    assert_abs_diff_eq!(slices[0].sweep_angle, 90.0, epsilon = 1e-9);
    assert_abs_diff_eq!(slices[1].start_angle, 360.0, epsilon = 1e-9);
    assert_abs_diff_eq!(slices[1].sweep_angle, 270.0, epsilon = 1e-9);
    assert_eq!(slices[1].inner_radius, 0.0);
}

#[test]
fn slice_space_becomes_angle_gap_per_radius() {
    let gap = 2.0 / (PI / 180.0 * 50.0);
    assert_abs_diff_eq!(slice_gap_angle(2.0, 50.0), gap, epsilon = 1e-12);

    let slices = arcs(&quarter_data(), &layout(2.0, true), AnimationPhase::COMPLETE, &[]);
    let first = slices[0];
    assert_abs_diff_eq!(first.start_angle, 270.0 + gap / 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(first.sweep_angle, 90.0 - gap, epsilon = 1e-9);

    // Hole radius 25 doubles the inner gap.
    assert_eq!(first.inner_radius, 25.0);
    assert_abs_diff_eq!(first.inner_start_angle, 270.0 + gap, epsilon = 1e-9);
    assert_abs_diff_eq!(first.inner_sweep_angle, 90.0 - 2.0 * gap, epsilon = 1e-9);
}

#[test]
fn sweep_never_goes_negative() {
    let slices = arcs(&quarter_data(), &layout(500.0, false), AnimationPhase::COMPLETE, &[]);
    assert!(slices.iter().all(|slice| slice.sweep_angle == 0.0));
}

#[test]
fn phases_scale_start_and_sweep_independently() {
    let data = quarter_data();
    let grown = arcs(&data, &layout(0.0, false), AnimationPhase::new(1.0, 0.5), &[]);
    assert_abs_diff_eq!(grown[1].start_angle, 315.0, epsilon = 1e-9);
    assert_abs_diff_eq!(grown[1].sweep_angle, 135.0, epsilon = 1e-9);

    let revealed = arcs(&data, &layout(0.0, false), AnimationPhase::new(0.5, 1.0), &[]);
    assert_abs_diff_eq!(revealed[1].start_angle, 315.0, epsilon = 1e-9);
    assert_abs_diff_eq!(revealed[1].sweep_angle, 270.0, epsilon = 1e-9);
}

#[test]
fn highlighted_slice_is_pushed_out_by_selection_shift() {
    let slices = arcs(
        &quarter_data(),
        &layout(0.0, false),
        AnimationPhase::COMPLETE,
        &[Highlight::new(2.0, 0)],
    );
    assert!(!slices[0].highlighted);
    assert_eq!(slices[0].outer_radius, 50.0);
    assert!(slices[1].highlighted);
    assert_eq!(slices[1].outer_radius, 68.0);
}

#[test]
fn labels_sit_at_mid_angle_with_percent_of_absolute_total() {
    let data = quarter_data();
    let angles = PieAngles::compute(&data);
    let labels = slice_labels(&data, &angles, &layout(0.0, false), AnimationPhase::COMPLETE);
    assert_eq!(labels.len(), 3);

    // Label radius 50 - 50 / 10 * 3.6 = 32, mid-angle 270 + 45.
    let radians = 315.0f64.to_radians();
    assert_abs_diff_eq!(labels[0].x, 100.0 + 32.0 * radians.cos(), epsilon = 1e-9);
    assert_abs_diff_eq!(labels[0].y, 100.0 + 32.0 * radians.sin(), epsilon = 1e-9);
    assert_abs_diff_eq!(labels[0].percent, 25.0, epsilon = 1e-9);
    assert_abs_diff_eq!(labels[2].percent, -75.0, epsilon = 1e-9);
    assert_eq!(labels[0].category.as_deref(), Some("Q1"));
}

#[test]
fn label_percentages_share_the_angle_total() {
    let data = ChartData::new(
        Vec::new(),
        vec![SeriesStore::new(
            "Tiny",
            vec![
                Entry::new(0.0, 1.0),
                Entry::new(1.0, 5e-7),
                Entry::new(2.0, f64::INFINITY),
                Entry::new(3.0, 3.0),
            ],
        )],
    );
    let angles = PieAngles::compute(&data);
    assert_eq!(angles.total(), 4.0);

    let labels = slice_labels(&data, &angles, &layout(0.0, false), AnimationPhase::COMPLETE);
    assert_eq!(labels[0].percent, 25.0);
    assert_eq!(labels[3].percent, 75.0);
}

#[test]
fn hidden_series_get_no_labels() {
    let data = ChartData::new(
        Vec::new(),
        vec![
            SeriesStore::new("Hidden", vec![Entry::new(0.0, 2.0)]).with_visible(false),
            SeriesStore::new("Shown", vec![Entry::new(0.0, 1.0), Entry::new(1.0, 1.0)]),
        ],
    );
    let angles = PieAngles::compute(&data);
    let labels = slice_labels(&data, &angles, &layout(0.0, false), AnimationPhase::COMPLETE);
    let indices: Vec<usize> = labels.iter().map(|label| label.slice_index).collect();
    assert_eq!(indices, vec![1, 2]);
    assert_eq!(labels[0].percent, 25.0);
}

fn hit_layout() -> PieHitLayout {
    PieHitLayout {
        center_x: 100.0,
        center_y: 100.0,
        radius: 50.0,
        rotation_angle: 270.0,
    }
}

#[test]
fn touches_resolve_to_slices_clockwise_from_rotation() {
    let data = quarter_data();
    let resolver = PieHighlighter::new(hit_layout());

    let top = resolver.resolve(&data, TouchPoint::new(100.0, 60.0));
    assert_eq!(top, Some(Highlight::new(0.0, 0)));

    // 90 degrees past the rotation is exactly the first slice's end; the
    // zero slice there is never selected.
    let right = resolver.resolve(&data, TouchPoint::new(140.0, 100.0));
    assert_eq!(right, Some(Highlight::new(2.0, 0)));

    let bottom = resolver.resolve(&data, TouchPoint::new(100.0, 140.0));
    assert_eq!(bottom, Some(Highlight::new(2.0, 0)));
}

#[test]
fn touches_outside_radius_miss() {
    let data = quarter_data();
    let resolver = PieHighlighter::new(hit_layout());
    assert_eq!(resolver.resolve(&data, TouchPoint::new(100.0, 10.0)), None);
    assert_eq!(
        ChartKind::Pie.highlight(&data, TouchPoint::new(151.0, 100.0), hit_layout()),
        None
    );
}
