//! Stage count charts: bar, centered funnel, lollipop and waterfall.

use crate::core::{FunnelRow, LinearScale, Viewport, drop_counts, format_count_short};
use crate::error::FunnelResult;
use crate::render::{
    CirclePrimitive, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::ChartStyle;
use super::layout::{
    PlotArea, finite_max, placeholder_frame, plot_value, stage_label, titled_frame,
};

pub const COUNTS_TITLE: &str = "Early Player Funnel (Counts)";

const BAR_FILL_RATIO: f64 = 0.7;
const LOLLIPOP_STEM_WIDTH_PX: f64 = 6.0;
const LOLLIPOP_HEAD_RADIUS_PX: f64 = 6.0;
const VALUE_LABEL_GAP_PX: f64 = 6.0;

/// Horizontal count axis from the plot's left edge.
#[derive(Debug, Clone, Copy)]
struct CountAxis {
    scale: LinearScale,
    ceiling: f64,
}

impl CountAxis {
    fn new(rows: &[FunnelRow], area: PlotArea) -> FunnelResult<Self> {
        let ceiling = finite_max(rows.iter().map(|row| row.count));
        Ok(Self {
            scale: LinearScale::from_zero(ceiling, area.left, area.right)?,
            ceiling,
        })
    }

    fn to_pixel(self, count: f64) -> FunnelResult<f64> {
        self.scale.to_pixel(plot_value(count, self.ceiling))
    }

    fn extent(self, count: f64) -> FunnelResult<f64> {
        self.scale.extent(plot_value(count, self.ceiling))
    }
}

/// Horizontal bars from a shared baseline, one per stage.
pub fn build_bar(
    rows: &[FunnelRow],
    style: &ChartStyle,
    viewport: Viewport,
) -> FunnelResult<RenderFrame> {
    if rows.is_empty() {
        return placeholder_frame(viewport, style, COUNTS_TITLE);
    }
    let area = PlotArea::horizontal(viewport, style)?;
    let axis = CountAxis::new(rows, area)?;
    let mut frame = titled_frame(viewport, style, COUNTS_TITLE)?.with_line(LinePrimitive::new(
        area.left,
        area.top,
        area.left,
        area.bottom,
        1.0,
        style.muted_text_color,
    ));

    for (index, row) in rows.iter().enumerate() {
        let (band_top, band) = area.row_band(index, rows.len());
        let bar_height = band * BAR_FILL_RATIO;
        let center_y = band_top + band * 0.5;
        let width = axis.extent(row.count)?;

        frame = frame
            .with_rect(RectPrimitive::new(
                area.left,
                center_y - bar_height * 0.5,
                width,
                bar_height,
                style.counts_color,
            ))
            .with_text(TextPrimitive::new(
                format_count_short(row.count),
                area.left + width + VALUE_LABEL_GAP_PX,
                center_y,
                style.font_size_px,
                style.text_color,
                TextHAlign::Left,
            ));
        if let Some(label) = stage_label(style, area, &row.stage, center_y) {
            frame = frame.with_text(label);
        }
    }

    Ok(frame)
}

/// Bars centered on the plot's vertical axis, narrowing stage by stage.
pub fn build_funnel(
    rows: &[FunnelRow],
    style: &ChartStyle,
    viewport: Viewport,
) -> FunnelResult<RenderFrame> {
    if rows.is_empty() {
        return placeholder_frame(viewport, style, COUNTS_TITLE);
    }
    let area = PlotArea::horizontal(viewport, style)?;
    let axis = CountAxis::new(rows, area)?;
    let center_x = area.center_x();
    let mut frame = titled_frame(viewport, style, COUNTS_TITLE)?;

    for (index, row) in rows.iter().enumerate() {
        let (band_top, band) = area.row_band(index, rows.len());
        let bar_height = band * BAR_FILL_RATIO;
        let center_y = band_top + band * 0.5;
        let width = axis.extent(row.count)?;

        frame = frame
            .with_rect(RectPrimitive::new(
                center_x - width * 0.5,
                center_y - bar_height * 0.5,
                width,
                bar_height,
                style.counts_color,
            ))
            .with_text(TextPrimitive::new(
                format_count_short(row.count),
                center_x + width * 0.5 + VALUE_LABEL_GAP_PX,
                center_y,
                style.font_size_px,
                style.text_color,
                TextHAlign::Left,
            ));
        if let Some(label) = stage_label(style, area, &row.stage, center_y) {
            frame = frame.with_text(label);
        }
    }

    Ok(frame)
}

/// Stem from the baseline to the count, capped by a circle.
pub fn build_lollipop(
    rows: &[FunnelRow],
    style: &ChartStyle,
    viewport: Viewport,
) -> FunnelResult<RenderFrame> {
    if rows.is_empty() {
        return placeholder_frame(viewport, style, COUNTS_TITLE);
    }
    let area = PlotArea::horizontal(viewport, style)?;
    let axis = CountAxis::new(rows, area)?;
    let mut frame = titled_frame(viewport, style, COUNTS_TITLE)?;

    for (index, row) in rows.iter().enumerate() {
        let (band_top, band) = area.row_band(index, rows.len());
        let center_y = band_top + band * 0.5;
        let end_x = axis.to_pixel(row.count)?;

        if end_x > area.left {
            frame = frame.with_line(LinePrimitive::new(
                area.left,
                center_y,
                end_x,
                center_y,
                LOLLIPOP_STEM_WIDTH_PX,
                style.counts_color,
            ));
        }
        frame = frame
            .with_circle(CirclePrimitive::new(
                end_x,
                center_y,
                LOLLIPOP_HEAD_RADIUS_PX,
                style.counts_accent_color,
            ))
            .with_text(TextPrimitive::new(
                format_count_short(row.count),
                end_x + LOLLIPOP_HEAD_RADIUS_PX + VALUE_LABEL_GAP_PX,
                center_y - LOLLIPOP_HEAD_RADIUS_PX,
                style.font_size_px,
                style.text_color,
                TextHAlign::Left,
            ));
        if let Some(label) = stage_label(style, area, &row.stage, center_y) {
            frame = frame.with_text(label);
        }
    }

    Ok(frame)
}

/// First stage as a full bar, then each step as the floating segment lost
/// (or gained) relative to the previous stage.
pub fn build_waterfall(
    rows: &[FunnelRow],
    style: &ChartStyle,
    viewport: Viewport,
) -> FunnelResult<RenderFrame> {
    if rows.len() < 2 {
        return placeholder_frame(viewport, style, COUNTS_TITLE);
    }
    let area = PlotArea::horizontal(viewport, style)?;
    let axis = CountAxis::new(rows, area)?;
    let drops = drop_counts(rows);
    let mut frame = titled_frame(viewport, style, COUNTS_TITLE)?;
    let mut previous_edge: Option<(f64, f64)> = None;

    for (index, (row, drop)) in rows.iter().zip(drops).enumerate() {
        let (band_top, band) = area.row_band(index, rows.len());
        let bar_height = band * BAR_FILL_RATIO;
        let bar_top = band_top + (band - bar_height) * 0.5;
        let center_y = band_top + band * 0.5;
        let current_x = axis.to_pixel(row.count)?;

        let (rect, label, color) = if index == 0 {
            (
                RectPrimitive::new(
                    area.left,
                    bar_top,
                    current_x - area.left,
                    bar_height,
                    style.counts_color,
                ),
                format_count_short(row.count),
                style.text_color,
            )
        } else {
            let previous_x = axis.to_pixel(rows[index - 1].count)?;
            let (sign, color) = if drop >= 0.0 {
                ("-", style.drop_color)
            } else {
                ("+", style.gain_color)
            };
            (
                RectPrimitive::new(
                    current_x.min(previous_x),
                    bar_top,
                    (previous_x - current_x).abs(),
                    bar_height,
                    color,
                ),
                format!("{sign}{}", format_count_short(drop.abs())),
                color,
            )
        };

        if let Some((edge_x, edge_y)) = previous_edge {
            frame = frame.with_line(LinePrimitive::new(
                edge_x,
                edge_y,
                edge_x,
                bar_top,
                1.0,
                style.muted_text_color,
            ));
        }
        previous_edge = Some((current_x, bar_top + bar_height));

        frame = frame.with_rect(rect).with_text(TextPrimitive::new(
            label,
            rect.x + rect.width + VALUE_LABEL_GAP_PX,
            center_y,
            style.font_size_px,
            color,
            TextHAlign::Left,
        ));
        if let Some(label) = stage_label(style, area, &row.stage, center_y) {
            frame = frame.with_text(label);
        }
    }

    Ok(frame)
}
