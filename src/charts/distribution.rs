use std::f64::consts::TAU;

use crate::core::{FunnelRow, Viewport, drop_counts, format_count_short};
use crate::error::FunnelResult;
use crate::render::{ArcPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::ChartStyle;
use super::layout::{PlotArea, placeholder_frame, titled_frame};

pub const DISTRIBUTION_TITLE: &str = "Drop-off Distribution";

const DONUT_HOLE_RATIO: f64 = 0.55;
const LABEL_OFFSET_PX: f64 = 18.0;

/// Donut of each stage's share of the players lost along the funnel.
///
/// Stages that gained players contribute no wedge. Falls back to the
/// placeholder when fewer than two stages exist, nothing was lost, or the
/// total loss overflows.
pub fn build_donut(
    rows: &[FunnelRow],
    style: &ChartStyle,
    viewport: Viewport,
) -> FunnelResult<RenderFrame> {
    if rows.len() < 2 {
        return placeholder_frame(viewport, style, DISTRIBUTION_TITLE);
    }
    let losses: Vec<f64> = drop_counts(rows)
        .into_iter()
        .map(|drop| drop.max(0.0))
        .collect();
    let total: f64 = losses.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return placeholder_frame(viewport, style, DISTRIBUTION_TITLE);
    }

    let area = PlotArea::with_margins(
        viewport,
        style.margin_px,
        style.title_band_px,
        style.margin_px,
        style.margin_px,
    )?;
    let cx = area.center_x();
    let cy = area.top + area.height() * 0.5;
    // Room for the outside labels.
    let outer_radius = (area.width().min(area.height()) * 0.5 - LABEL_OFFSET_PX * 2.0).max(2.0);
    let inner_radius = outer_radius * DONUT_HOLE_RATIO;

    let mut frame = titled_frame(viewport, style, DISTRIBUTION_TITLE)?.with_text(
        TextPrimitive::new(
            format!("{} lost", format_count_short(total)),
            cx,
            cy,
            style.font_size_px,
            style.text_color,
            TextHAlign::Center,
        ),
    );

    let mut start_angle = 0.0;
    for (index, (row, loss)) in rows.iter().zip(&losses).enumerate() {
        if *loss <= 0.0 {
            continue;
        }
        let share = loss / total;
        let end_angle = (start_angle + share * TAU).min(TAU);
        let mid_angle = (start_angle + end_angle) * 0.5;
        let label_radius = outer_radius + LABEL_OFFSET_PX;
        let label_x = cx + label_radius * mid_angle.sin();
        let h_align = if label_x >= cx {
            TextHAlign::Left
        } else {
            TextHAlign::Right
        };

        frame = frame
            .with_arc(ArcPrimitive::new(
                cx,
                cy,
                inner_radius,
                outer_radius,
                start_angle,
                end_angle,
                style.series_color(index),
            ))
            .with_text(TextPrimitive::new(
                format!("{}: {:.1}%", row.stage, share * 100.0),
                label_x,
                cy - label_radius * mid_angle.cos(),
                style.font_size_px,
                style.text_color,
                h_align,
            ));
        start_angle = end_angle;
    }

    Ok(frame)
}
