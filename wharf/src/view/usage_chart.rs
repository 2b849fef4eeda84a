//! Active-user chart using Iced canvas.

use iced::mouse;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, LineDash, Path, Stroke, Text};
use iced::{Color, Element, Length, Point, Rectangle, Renderer, Size, Theme};

use wharf_api::{UsageInterval, UsageSample};

use super::formatting::{format_count, format_date};
use super::theme::ThemeColors;

/// Fraction of the user limit that observed usage must reach before the
/// limit line is drawn. Below this the line is visual clutter.
pub const USER_LIMIT_DISPLAY_THRESHOLD: f64 = 0.60;

/// Decide whether the limit-reference line should be drawn.
///
/// The line is shown iff a non-zero limit is configured, the series is
/// non-empty, and the maximum observed amount reaches the display threshold.
pub fn should_display_user_limit(limit: Option<u64>, samples: &[UsageSample]) -> bool {
    let Some(limit) = limit else {
        return false;
    };

    if limit == 0 || samples.is_empty() {
        return false;
    }

    let max = samples.iter().map(|s| s.amount).max().unwrap_or(0);
    max as f64 >= limit as f64 * USER_LIMIT_DISPLAY_THRESHOLD
}

/// Axis label step: label every sample up to 10 samples, then every second.
pub fn label_step(sample_count: usize) -> usize {
    if sample_count > 10 { 2 } else { 1 }
}

/// State for the active-user chart.
#[derive(Debug)]
pub struct UsageChartState {
    /// The series to display, chronological.
    samples: Vec<UsageSample>,
    /// Current granularity.
    interval: UsageInterval,
    /// Configured user limit, `None` when unlimited.
    limit: Option<u64>,
    /// Whether a series has been received yet.
    loaded: bool,
    /// Cache for the chart geometry.
    cache: Cache,
}

impl UsageChartState {
    /// Create a new chart state with the configured limit.
    pub fn new(limit: Option<u64>) -> Self {
        Self {
            samples: Vec::new(),
            interval: UsageInterval::default(),
            limit,
            loaded: false,
            cache: Cache::new(),
        }
    }

    /// Replace the series. Samples for a different granularity than the
    /// currently selected one are ignored (a stale in-flight response).
    pub fn set_samples(&mut self, interval: UsageInterval, samples: Vec<UsageSample>) {
        if interval != self.interval {
            return;
        }

        self.samples = samples;
        self.loaded = true;
        self.cache.clear();
    }

    /// Switch the granularity. The current series is kept on screen until
    /// the refetch for the new granularity lands.
    pub fn set_interval(&mut self, interval: UsageInterval) {
        if self.interval != interval {
            self.interval = interval;
            self.cache.clear();
        }
    }

    /// Get the current granularity.
    pub fn interval(&self) -> UsageInterval {
        self.interval
    }

    /// Get the configured limit.
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Get the current series.
    pub fn samples(&self) -> &[UsageSample] {
        &self.samples
    }

    /// Whether a series has been received yet.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Maximum observed amount in the series.
    fn max_amount(&self) -> u64 {
        self.samples.iter().map(|s| s.amount).max().unwrap_or(0)
    }

    /// Average amount in the series.
    fn avg_amount(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }

        let sum: u64 = self.samples.iter().map(|s| s.amount).sum();
        sum as f64 / self.samples.len() as f64
    }
}

/// Colors used by the chart, resolved from the theme before drawing.
///
/// Threaded into the canvas program explicitly so the chart carries no
/// global style state.
#[derive(Debug, Clone, Copy)]
pub struct ChartPalette {
    pub outer_background: Color,
    pub background: Color,
    pub grid: Color,
    pub label: Color,
    pub line: Color,
    pub fill: Color,
    pub point: Color,
    pub limit_line: Color,
    pub text: Color,
}

impl ChartPalette {
    /// Resolve the palette from theme colors.
    pub fn from_theme(colors: &ThemeColors<'_>) -> Self {
        Self {
            outer_background: colors.chart_outer_background(),
            background: colors.chart_background(),
            grid: colors.chart_grid(),
            label: colors.chart_label(),
            line: colors.chart_line(),
            fill: colors.chart_fill(),
            point: colors.chart_point(),
            limit_line: colors.chart_limit_line(),
            text: colors.text(),
        }
    }
}

/// Chart widget that renders the active-user series.
pub struct UsageChart<'a> {
    state: &'a UsageChartState,
    palette: ChartPalette,
}

impl<'a> UsageChart<'a> {
    /// Create a new chart widget.
    pub fn new(state: &'a UsageChartState, palette: ChartPalette) -> Self {
        Self { state, palette }
    }
}

impl<'a> canvas::Program<crate::message::Message> for UsageChart<'a> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.state.cache.draw(renderer, bounds.size(), |frame| {
            self.draw_chart(frame, bounds.size());
        });

        vec![geometry]
    }
}

impl<'a> UsageChart<'a> {
    /// Draw the chart onto the frame.
    fn draw_chart(&self, frame: &mut Frame, size: Size) {
        let padding = 50.0;
        let chart_width = size.width - padding * 2.0;
        let chart_height = size.height - padding * 2.0;

        if chart_width <= 0.0 || chart_height <= 0.0 {
            return;
        }

        // Draw background
        let background = Path::rectangle(Point::ORIGIN, size);
        frame.fill(&background, self.palette.outer_background);

        // Draw chart area background
        let chart_bg = Path::rectangle(
            Point::new(padding, padding),
            Size::new(chart_width, chart_height),
        );
        frame.fill(&chart_bg, self.palette.background);

        // Draw dataset label
        let title = Text {
            content: self.state.interval.dataset_label().to_string(),
            position: Point::new(padding, 10.0),
            color: self.palette.text,
            size: 14.0.into(),
            ..Text::default()
        };
        frame.fill_text(title);

        let samples = self.state.samples();

        if samples.is_empty() {
            let no_data = Text {
                content: "No data".to_string(),
                position: Point::new(size.width / 2.0 - 30.0, size.height / 2.0),
                color: self.palette.label,
                size: 16.0.into(),
                ..Text::default()
            };
            frame.fill_text(no_data);
            return;
        }

        let show_limit = should_display_user_limit(self.state.limit(), samples);

        // Value range: from zero up to the larger of the data and a shown
        // limit, with headroom so the top of the line is not clipped.
        let mut value_max = self.state.max_amount() as f64;
        if show_limit {
            if let Some(limit) = self.state.limit() {
                value_max = value_max.max(limit as f64);
            }
        }
        let value_max = (value_max * 1.1).max(1.0);

        self.draw_grid(frame, padding, chart_width, chart_height, value_max);
        self.draw_date_labels(frame, padding, chart_width, chart_height, samples);

        let x_at = |index: usize| -> f32 {
            if samples.len() > 1 {
                padding + (index as f32 / (samples.len() - 1) as f32) * chart_width
            } else {
                padding + chart_width / 2.0
            }
        };
        let y_at = |amount: f64| -> f32 {
            padding + chart_height - (amount / value_max) as f32 * chart_height
        };

        // Draw the filled area under the line
        if samples.len() >= 2 {
            let mut area_builder = canvas::path::Builder::new();
            area_builder.move_to(Point::new(x_at(0), y_at(0.0)));
            for (i, sample) in samples.iter().enumerate() {
                area_builder.line_to(Point::new(x_at(i), y_at(sample.amount as f64)));
            }
            area_builder.line_to(Point::new(x_at(samples.len() - 1), y_at(0.0)));
            area_builder.close();
            frame.fill(&area_builder.build(), self.palette.fill);

            // Draw the data line
            let mut line_builder = canvas::path::Builder::new();
            for (i, sample) in samples.iter().enumerate() {
                let point = Point::new(x_at(i), y_at(sample.amount as f64));
                if i == 0 {
                    line_builder.move_to(point);
                } else {
                    line_builder.line_to(point);
                }
            }
            frame.stroke(
                &line_builder.build(),
                Stroke::default()
                    .with_color(self.palette.line)
                    .with_width(2.0),
            );
        }

        // Draw point markers
        for (i, sample) in samples.iter().enumerate() {
            let dot = Path::circle(Point::new(x_at(i), y_at(sample.amount as f64)), 3.0);
            frame.fill(&dot, self.palette.point);
        }

        // Draw the limit annotation line
        if show_limit {
            if let Some(limit) = self.state.limit() {
                let y = y_at(limit as f64);
                let line = Path::line(Point::new(padding, y), Point::new(padding + chart_width, y));
                frame.stroke(
                    &line,
                    Stroke {
                        line_dash: LineDash {
                            segments: &[6.0, 4.0],
                            offset: 0,
                        },
                        ..Stroke::default()
                            .with_color(self.palette.limit_line)
                            .with_width(2.0)
                    },
                );

                let label = Text {
                    content: "User limit".to_string(),
                    position: Point::new(padding + 6.0, y - 16.0),
                    color: self.palette.limit_line,
                    size: 11.0.into(),
                    ..Text::default()
                };
                frame.fill_text(label);
            }
        }

        self.draw_stats(frame, size, padding);
    }

    /// Draw horizontal grid lines with integer value labels.
    fn draw_grid(
        &self,
        frame: &mut Frame,
        padding: f32,
        chart_width: f32,
        chart_height: f32,
        value_max: f64,
    ) {
        let num_h_lines = 4;

        for i in 0..=num_h_lines {
            let y = padding + (i as f32 / num_h_lines as f32) * chart_height;
            let value = value_max * (1.0 - i as f64 / num_h_lines as f64);

            let line = Path::line(Point::new(padding, y), Point::new(padding + chart_width, y));
            frame.stroke(
                &line,
                Stroke::default()
                    .with_color(self.palette.grid)
                    .with_width(1.0),
            );

            // Integer tick labels (user counts)
            let label = Text {
                content: format_count(value.round()),
                position: Point::new(5.0, y - 6.0),
                color: self.palette.label,
                size: 10.0.into(),
                ..Text::default()
            };
            frame.fill_text(label);
        }
    }

    /// Draw date labels along the x axis.
    fn draw_date_labels(
        &self,
        frame: &mut Frame,
        padding: f32,
        chart_width: f32,
        chart_height: f32,
        samples: &[UsageSample],
    ) {
        let step = label_step(samples.len());

        for (i, sample) in samples.iter().enumerate().step_by(step) {
            let x = if samples.len() > 1 {
                padding + (i as f32 / (samples.len() - 1) as f32) * chart_width
            } else {
                padding + chart_width / 2.0
            };

            let label = Text {
                content: format_date(sample.date),
                position: Point::new(x - 28.0, padding + chart_height + 8.0),
                color: self.palette.label,
                size: 9.0.into(),
                ..Text::default()
            };
            frame.fill_text(label);
        }
    }

    /// Draw peak/average overlay.
    fn draw_stats(&self, frame: &mut Frame, size: Size, padding: f32) {
        let stats_x = size.width - padding - 90.0;
        let stats_y = padding + 8.0;
        let line_height = 14.0;

        let stats_lines = [
            format!("Peak: {}", format_count(self.state.max_amount() as f64)),
            format!("Avg: {}", format_count(self.state.avg_amount())),
        ];

        for (i, line) in stats_lines.iter().enumerate() {
            let text = Text {
                content: line.clone(),
                position: Point::new(stats_x, stats_y + i as f32 * line_height),
                color: self.palette.label,
                size: 11.0.into(),
                ..Text::default()
            };
            frame.fill_text(text);
        }
    }
}

/// Create a chart element.
pub fn usage_chart_view(
    state: &UsageChartState,
    palette: ChartPalette,
) -> Element<'_, crate::message::Message> {
    Canvas::new(UsageChart::new(state, palette))
        .width(Length::Fill)
        .height(Length::Fixed(220.0))
        .into()
}
