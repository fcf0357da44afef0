use tracing::{debug, trace, warn};

use crate::core::{
    AnimationPhase, ChartData, ChartKind, Color, PieAngles, ValueTransform, Viewport,
    is_zero_value,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{Highlight, TouchPoint};
use crate::render::{
    ArcPrimitive, EstimatedTextMeasurer, LegendItem, LinePrimitive, OffscreenSurface, PieLayout,
    RectPrimitive, RenderFrame, RenderScratch, Renderer, TextHAlign, TextPrimitive,
    bar_geometry::{highlight_rect, project_all_bar_rects, revealed_count},
    compute_legend, layout_legend, project_slices, slice_labels,
};

use super::ChartEngineConfig;

const HIGHLIGHT_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 120.0 / 255.0);
const LINE_STROKE_WIDTH: f64 = 1.0;

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the chart data, the active highlights and the
/// per-pass scratch buffers, and hands finished frames to its renderer.
pub struct ChartEngine<R: Renderer> {
    renderer: R,
    config: ChartEngineConfig,
    data: ChartData,
    highlights: Vec<Highlight>,
    scratch: RenderScratch,
    surface: OffscreenSurface,
    measurer: EstimatedTextMeasurer,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        config.validate()?;
        debug!(
            kind = ?config.kind,
            width = config.viewport.width,
            height = config.viewport.height,
            "chart engine created"
        );
        Ok(Self {
            renderer,
            config,
            data: ChartData::default().with_group_space(config.group_space),
            highlights: Vec::new(),
            scratch: RenderScratch::new(),
            surface: OffscreenSurface::new(),
            measurer: EstimatedTextMeasurer::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.config.kind
    }

    #[must_use]
    pub fn data(&self) -> &ChartData {
        &self.data
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Off-screen pie target; its generation changes whenever the
    /// viewport size does.
    #[must_use]
    pub fn surface(&self) -> &OffscreenSurface {
        &self.surface
    }

    /// Replaces the chart data. Highlights are cleared.
    pub fn set_data(&mut self, mut data: ChartData) {
        data.set_group_space(self.config.group_space);
        debug!(
            series = data.get_data_set_count(),
            entries = data.entry_count(),
            "chart data replaced"
        );
        self.data = data;
        self.highlights.clear();
    }

    /// Applies `mutate` to the chart data, then recomputes its bounds and
    /// drops highlights that point at removed series.
    pub fn update_data<T>(&mut self, mutate: impl FnOnce(&mut ChartData) -> T) -> T {
        let result = mutate(&mut self.data);
        self.data.calc_min_max();
        let series_count = self.data.get_data_set_count();
        self.highlights
            .retain(|highlight| highlight.series_index < series_count);
        result
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.config.viewport = viewport;
        Ok(())
    }

    pub fn set_phase(&mut self, phase: AnimationPhase) -> ChartResult<()> {
        phase.validate()?;
        self.config.phase = phase;
        Ok(())
    }

    pub fn set_text_measurer(&mut self, measurer: EstimatedTextMeasurer) {
        self.measurer = measurer;
    }

    /// Value-to-pixel transform for bar and line charts.
    pub fn value_transform(&self) -> ChartResult<ValueTransform> {
        let extent = self.data.x_extent(self.config.kind);
        ValueTransform::fit(
            (extent.chart_min, extent.chart_max),
            (self.data.y_min(), self.data.y_max()),
            self.config.viewport,
        )
    }

    #[must_use]
    pub fn pie_layout(&self) -> PieLayout {
        PieLayout::fit(self.config.viewport, &self.config.pie)
    }

    /// Resolves `touch` and makes the result the only active highlight.
    ///
    /// Bar and line charts take chart-value coordinates; pie charts take
    /// pixel coordinates. A miss clears the highlights.
    pub fn highlight_at(&mut self, touch: TouchPoint) -> Option<Highlight> {
        let highlight =
            self.config
                .kind
                .highlight(&self.data, touch, self.pie_layout().hit_layout());
        self.highlights.clear();
        self.highlights.extend(highlight);
        highlight
    }

    /// Like `highlight_at`, with bar and line touches given in pixels.
    pub fn highlight_at_pixel(&mut self, x: f64, y: f64) -> ChartResult<Option<Highlight>> {
        let touch = match self.config.kind {
            ChartKind::Pie => TouchPoint::new(x, y),
            ChartKind::Bar | ChartKind::Line => {
                let (value_x, value_y) = self.value_transform()?.pixel_to_value(x, y);
                TouchPoint::new(value_x, value_y)
            }
        };
        Ok(self.highlight_at(touch))
    }

    pub fn set_highlights(&mut self, highlights: Vec<Highlight>) {
        trace!(count = highlights.len(), "highlights set");
        self.highlights = highlights;
    }

    pub fn clear_highlights(&mut self) {
        self.highlights.clear();
    }

    #[must_use]
    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    #[must_use]
    pub fn legend_items(&self) -> Vec<LegendItem> {
        compute_legend(&self.data, self.config.kind)
    }

    /// Materializes the current chart state into a backend-agnostic frame.
    pub fn build_frame(&mut self) -> ChartResult<RenderFrame> {
        let viewport = self.config.viewport;
        let mut frame = RenderFrame::new(viewport);
        self.scratch.clear();

        match self.config.kind {
            ChartKind::Bar => self.push_bars(&mut frame)?,
            ChartKind::Line => self.push_lines(&mut frame)?,
            ChartKind::Pie => self.push_pie(&mut frame),
        }

        if self.config.legend.enabled {
            let items = self.legend_items();
            layout_legend(
                &items,
                &self.config.legend,
                viewport,
                &self.measurer,
                &mut self.scratch.runs,
            );
            frame.legend.extend(self.scratch.runs.drain(..));
        }

        trace!(
            rects = frame.rects.len(),
            arcs = frame.arcs.len(),
            lines = frame.lines.len(),
            texts = frame.texts.len(),
            legend = frame.legend.len(),
            "frame built"
        );
        Ok(frame)
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_frame()?;
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn push_bars(&mut self, frame: &mut RenderFrame) -> ChartResult<()> {
        let transform = self.value_transform()?;
        let phase = self.config.phase;
        project_all_bar_rects(&self.data, phase, &mut self.scratch.rects);

        let to_pixels = |left: f64, top: f64, right: f64, bottom: f64, color: Color| {
            let (px_left, px_top) = transform.value_to_pixel(left, top);
            let (px_right, px_bottom) = transform.value_to_pixel(right, bottom);
            RectPrimitive::new(px_left, px_top, px_right, px_bottom, color)
        };

        for rect in &self.scratch.rects {
            let Some(series) = self.data.get_data_set_by_index(rect.series_index) else {
                continue;
            };
            let color = series.color_at(rect.stack_index.unwrap_or(rect.entry_index));
            frame
                .rects
                .push(to_pixels(rect.left, rect.top, rect.right, rect.bottom, color));
        }

        for highlight in &self.highlights {
            if let Some(rect) = highlight_rect(&self.data, highlight, phase) {
                frame.rects.push(to_pixels(
                    rect.left,
                    rect.top,
                    rect.right,
                    rect.bottom,
                    HIGHLIGHT_COLOR,
                ));
            }
        }
        Ok(())
    }

    fn push_lines(&self, frame: &mut RenderFrame) -> ChartResult<()> {
        let transform = self.value_transform()?;
        let phase = self.config.phase;

        for series in self.data.data_sets().iter().filter(|series| series.is_visible()) {
            let revealed = revealed_count(series.entry_count(), phase.x);
            let color = series.color_at(0);
            let points: Vec<(f64, f64)> = series.entries()[..revealed]
                .iter()
                .filter(|entry| entry.y().is_finite())
                .map(|entry| transform.value_to_pixel(entry.x(), entry.y() * phase.y))
                .collect();
            frame.lines.extend(points.windows(2).map(|pair| {
                LinePrimitive::new(
                    pair[0].0,
                    pair[0].1,
                    pair[1].0,
                    pair[1].1,
                    LINE_STROKE_WIDTH,
                    color,
                )
            }));
        }

        let height = f64::from(self.config.viewport.height);
        for highlight in &self.highlights {
            let (x, _) = transform.value_to_pixel(highlight.x_position, 0.0);
            if x.is_finite() {
                frame.lines.push(LinePrimitive::new(
                    x,
                    0.0,
                    x,
                    height,
                    LINE_STROKE_WIDTH,
                    HIGHLIGHT_COLOR,
                ));
            }
        }
        Ok(())
    }

    fn push_pie(&mut self, frame: &mut RenderFrame) {
        if !self.surface.ensure_size(self.config.viewport) {
            warn!(
                width = self.config.viewport.width,
                height = self.config.viewport.height,
                "offscreen surface unusable, skipping pie pass"
            );
            return;
        }

        let layout = self.pie_layout();
        let angles = PieAngles::compute(&self.data);
        project_slices(
            &self.data,
            &angles,
            &layout,
            self.config.phase,
            &self.highlights,
            &mut self.scratch.arcs,
        );
        frame.arcs.extend(self.scratch.arcs.iter().map(|arc| ArcPrimitive {
            center_x: layout.center_x,
            center_y: layout.center_y,
            outer_radius: arc.outer_radius,
            inner_radius: arc.inner_radius,
            start_angle: arc.start_angle,
            sweep_angle: arc.sweep_angle,
            inner_start_angle: arc.inner_start_angle,
            inner_sweep_angle: arc.inner_sweep_angle,
            color: arc.color,
        }));

        let legend = self.config.legend;
        for label in slice_labels(&self.data, &angles, &layout, self.config.phase) {
            if is_zero_value(label.value) || !label.percent.is_finite() {
                continue;
            }
            frame.texts.push(TextPrimitive::new(
                format!("{:.1} %", label.percent),
                label.x,
                label.y,
                legend.text_size,
                legend.text_color,
                TextHAlign::Center,
            ));
        }
    }
}
