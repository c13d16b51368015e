//! Conversion-from-previous charts. Every view skips the first stage.

use crate::core::{ConversionPoint, FunnelRow, LinearScale, Viewport, conversion_pcts};
use crate::error::FunnelResult;
use crate::render::{
    CirclePrimitive, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::ChartStyle;
use super::layout::{
    PlotArea, finite_max, placeholder_frame, plot_value, stage_label, titled_frame,
};

pub const CONVERSION_TITLE: &str = "Conversion From Previous Stage (%)";

const BAR_FILL_RATIO: f64 = 0.7;
const SLOPE_MARKER_RADIUS_PX: f64 = 5.0;
const SLOPE_BOTTOM_MARGIN_PX: f64 = 120.0;

/// Conversion point ready for plotting; the label keeps the unpinned value.
struct PlotPoint {
    stage: String,
    pct: f64,
    label: String,
}

/// Conversion points with non-finite percentages pinned onto the axis.
fn plot_points(rows: &[FunnelRow]) -> Vec<PlotPoint> {
    let points = conversion_pcts(rows);
    let ceiling = 100.0_f64.max(finite_max(points.iter().map(|point| point.pct)));
    points
        .into_iter()
        .map(|ConversionPoint { stage, pct }| PlotPoint {
            stage,
            pct: plot_value(pct, ceiling),
            label: format!("{pct:.1}%"),
        })
        .collect()
}

/// Horizontal percentage bars; the axis spans at least `0..100`.
pub fn build_bar(
    rows: &[FunnelRow],
    style: &ChartStyle,
    viewport: Viewport,
) -> FunnelResult<RenderFrame> {
    let points = plot_points(rows);
    if points.is_empty() {
        return placeholder_frame(viewport, style, CONVERSION_TITLE);
    }
    let area = PlotArea::horizontal(viewport, style)?;
    let max_pct = points.iter().map(|point| point.pct).fold(0.0, f64::max);
    let scale = LinearScale::new(0.0, 100.0_f64.max(max_pct + 5.0), area.left, area.right)?;
    let mut frame = titled_frame(viewport, style, CONVERSION_TITLE)?;

    for (index, point) in points.iter().enumerate() {
        let (band_top, band) = area.row_band(index, points.len());
        let bar_height = band * BAR_FILL_RATIO;
        let center_y = band_top + band * 0.5;
        let width = scale.extent(point.pct)?;

        frame = frame
            .with_rect(RectPrimitive::new(
                area.left,
                center_y - bar_height * 0.5,
                width,
                bar_height,
                style.conversion_color,
            ))
            .with_text(TextPrimitive::new(
                point.label.as_str(),
                area.left + width + 6.0,
                center_y,
                style.font_size_px,
                style.text_color,
                TextHAlign::Left,
            ));
        if let Some(label) = stage_label(style, area, &point.stage, center_y) {
            frame = frame.with_text(label);
        }
    }

    Ok(frame)
}

/// Stacked, centered bands whose widths follow the conversion percentage.
pub fn build_funnel_area(
    rows: &[FunnelRow],
    style: &ChartStyle,
    viewport: Viewport,
) -> FunnelResult<RenderFrame> {
    let points = plot_points(rows);
    if points.is_empty() {
        return placeholder_frame(viewport, style, CONVERSION_TITLE);
    }
    let area = PlotArea::horizontal(viewport, style)?;
    let max_pct = points.iter().map(|point| point.pct).fold(0.0, f64::max);
    let scale = LinearScale::from_zero(max_pct, 0.0, area.width())?;
    let center_x = area.center_x();
    let mut frame = titled_frame(viewport, style, CONVERSION_TITLE)?;

    for (index, point) in points.iter().enumerate() {
        let (band_top, band) = area.row_band(index, points.len());
        let center_y = band_top + band * 0.5;
        let width = scale.extent(point.pct)?;

        frame = frame
            .with_rect(RectPrimitive::new(
                center_x - width * 0.5,
                band_top,
                width,
                band,
                style.series_color(index),
            ))
            .with_text(TextPrimitive::new(
                point.label.as_str(),
                center_x,
                center_y,
                style.font_size_px,
                style.text_color,
                TextHAlign::Center,
            ));
        if let Some(label) = stage_label(style, area, &point.stage, center_y) {
            frame = frame.with_text(label);
        }
    }

    Ok(frame)
}

/// Percentages joined left to right, stage names along the bottom.
pub fn build_slope(
    rows: &[FunnelRow],
    style: &ChartStyle,
    viewport: Viewport,
) -> FunnelResult<RenderFrame> {
    let points = plot_points(rows);
    if points.is_empty() {
        return placeholder_frame(viewport, style, CONVERSION_TITLE);
    }
    let area = PlotArea::with_margins(
        viewport,
        style.margin_px * 3.0,
        style.title_band_px,
        style.margin_px,
        SLOPE_BOTTOM_MARGIN_PX,
    )?;
    let max_pct = points.iter().map(|point| point.pct).fold(0.0, f64::max);
    let y_scale = LinearScale::new(0.0, 100.0_f64.max(max_pct), area.bottom, area.top)?;
    let mut frame = titled_frame(viewport, style, CONVERSION_TITLE)?
        .with_line(LinePrimitive::new(
            area.left,
            area.bottom,
            area.right,
            area.bottom,
            1.0,
            style.muted_text_color,
        ))
        .with_text(TextPrimitive::new(
            "%",
            (area.left - 8.0).max(0.0),
            area.top,
            style.font_size_px,
            style.muted_text_color,
            TextHAlign::Right,
        ));

    let mut previous: Option<(f64, f64)> = None;
    for (index, point) in points.iter().enumerate() {
        let (column_left, column) = area.column_band(index, points.len());
        let x = column_left + column * 0.5;
        let y = y_scale.to_pixel(point.pct)?;

        if let Some((prev_x, prev_y)) = previous {
            frame = frame.with_line(LinePrimitive::new(
                prev_x,
                prev_y,
                x,
                y,
                2.0,
                style.conversion_color,
            ));
        }
        previous = Some((x, y));

        frame = frame
            .with_circle(CirclePrimitive::new(
                x,
                y,
                SLOPE_MARKER_RADIUS_PX,
                style.conversion_color,
            ))
            .with_text(TextPrimitive::new(
                point.label.as_str(),
                x,
                y - SLOPE_MARKER_RADIUS_PX - 4.0,
                style.font_size_px,
                style.text_color,
                TextHAlign::Center,
            ));
        if !point.stage.is_empty() {
            frame = frame.with_text(TextPrimitive::new(
                point.stage.as_str(),
                x,
                area.bottom + style.font_size_px * 1.5,
                style.font_size_px,
                style.text_color,
                TextHAlign::Center,
            ));
        }
    }

    Ok(frame)
}
