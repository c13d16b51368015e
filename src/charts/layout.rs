use crate::core::Viewport;
use crate::error::{FunnelError, FunnelResult};
use crate::render::{RenderFrame, TextHAlign, TextPrimitive};

use super::ChartStyle;

pub(crate) const NOT_ENOUGH_DATA: &str = "Not enough data";

/// Pixel rectangle left for marks once margins are taken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    /// Plot area with explicit margins; collapses instead of inverting when
    /// the viewport is smaller than the margins.
    pub fn with_margins(
        viewport: Viewport,
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
    ) -> FunnelResult<Self> {
        ensure_viewport(viewport)?;
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let left = left.min(width);
        let top = top.min(height);
        Ok(Self {
            left,
            top,
            right: (width - right).max(left),
            bottom: (height - bottom).max(top),
        })
    }

    /// Standard horizontal layout: stage gutter on the left, title band on top.
    pub fn horizontal(viewport: Viewport, style: &ChartStyle) -> FunnelResult<Self> {
        Self::with_margins(
            viewport,
            style.label_gutter_px,
            style.title_band_px,
            style.margin_px,
            style.margin_px * 2.0,
        )
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn center_x(self) -> f64 {
        (self.left + self.right) * 0.5
    }

    /// Vertical band `(top, height)` for row `index` of `count` evenly stacked rows.
    #[must_use]
    pub fn row_band(self, index: usize, count: usize) -> (f64, f64) {
        let band = self.height() / count.max(1) as f64;
        (self.top + band * index as f64, band)
    }

    /// Horizontal band `(left, width)` for column `index` of `count` columns.
    #[must_use]
    pub fn column_band(self, index: usize, count: usize) -> (f64, f64) {
        let band = self.width() / count.max(1) as f64;
        (self.left + band * index as f64, band)
    }
}

/// Largest finite value in `values`, `0` when there is none.
pub(crate) fn finite_max(values: impl IntoIterator<Item = f64>) -> f64 {
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(0.0, f64::max)
}

/// Pins `value` into `0..=ceiling` for plotting. `NaN` plots as zero and
/// infinities land on the axis ends.
pub(crate) fn plot_value(value: f64, ceiling: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, ceiling)
    }
}

pub(crate) fn ensure_viewport(viewport: Viewport) -> FunnelResult<()> {
    if viewport.is_valid() {
        Ok(())
    } else {
        Err(FunnelError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        })
    }
}

/// Empty frame carrying only the centered chart title.
pub(crate) fn titled_frame(
    viewport: Viewport,
    style: &ChartStyle,
    title: &str,
) -> FunnelResult<RenderFrame> {
    ensure_viewport(viewport)?;
    Ok(RenderFrame::new(viewport).with_text(TextPrimitive::new(
        style.title(title),
        f64::from(viewport.width) * 0.5,
        style.title_band_px * 0.5,
        style.title_font_size_px,
        style.text_color,
        TextHAlign::Center,
    )))
}

/// Title plus a centered "Not enough data" label.
pub(crate) fn placeholder_frame(
    viewport: Viewport,
    style: &ChartStyle,
    title: &str,
) -> FunnelResult<RenderFrame> {
    let frame = titled_frame(viewport, style, title)?;
    Ok(frame.with_text(TextPrimitive::new(
        NOT_ENOUGH_DATA,
        f64::from(viewport.width) * 0.5,
        f64::from(viewport.height) * 0.5,
        style.font_size_px,
        style.muted_text_color,
        TextHAlign::Center,
    )))
}

/// Stage name right-aligned against the plot's left edge.
pub(crate) fn stage_label(
    style: &ChartStyle,
    area: PlotArea,
    stage: &str,
    center_y: f64,
) -> Option<TextPrimitive> {
    if stage.is_empty() {
        return None;
    }
    Some(TextPrimitive::new(
        stage,
        (area.left - 8.0).max(0.0),
        center_y,
        style.font_size_px,
        style.text_color,
        TextHAlign::Right,
    ))
}

#[cfg(test)]
mod tests {
    use super::{PlotArea, finite_max, plot_value};
    use crate::charts::ChartStyle;
    use crate::core::Viewport;

    #[test]
    fn rows_split_plot_height_evenly() {
        let area = PlotArea::horizontal(Viewport::new(800, 500), &ChartStyle::default())
            .expect("plot area");
        let (top, band) = area.row_band(1, 4);

        assert!((band - area.height() / 4.0).abs() <= 1e-9);
        assert!((top - (area.top + band)).abs() <= 1e-9);
    }

    #[test]
    fn non_finite_values_pin_to_axis_ends() {
        let ceiling = finite_max([3.0, f64::INFINITY, f64::NAN, 7.5, -2.0]);

        assert_eq!(ceiling, 7.5);
        assert_eq!(plot_value(f64::INFINITY, ceiling), 7.5);
        assert_eq!(plot_value(f64::NEG_INFINITY, ceiling), 0.0);
        assert_eq!(plot_value(f64::NAN, ceiling), 0.0);
        assert_eq!(plot_value(4.0, ceiling), 4.0);
    }

    #[test]
    fn tiny_viewport_collapses_instead_of_inverting() {
        let area = PlotArea::horizontal(Viewport::new(50, 30), &ChartStyle::default())
            .expect("plot area");

        assert!(area.width() >= 0.0);
        assert!(area.height() >= 0.0);
    }
}
