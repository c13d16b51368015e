use std::f64::consts::{FRAC_PI_2, PI};

use crate::core::{KpiSummary, Viewport};
use crate::error::FunnelResult;
use crate::render::{ArcPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::ChartStyle;
use super::layout::{PlotArea, titled_frame};

pub const KPI_TITLE: &str = "Key Metrics";

const GAUGE_THICKNESS_RATIO: f64 = 0.25;

/// Three half-circle percentage gauges followed by the sessions-per-player figure.
pub fn build_kpi_gauges(
    kpis: &KpiSummary,
    style: &ChartStyle,
    viewport: Viewport,
) -> FunnelResult<RenderFrame> {
    let area = PlotArea::with_margins(
        viewport,
        style.margin_px,
        style.title_band_px,
        style.margin_px,
        style.margin_px,
    )?;
    let gauges = [
        ("Level Completion", kpis.level_completion_pct),
        ("Purchase Rate", kpis.purchase_pct),
        ("Uninstall Rate", kpis.uninstall_pct),
    ];
    let panels = gauges.len() + 1;
    let mut frame = titled_frame(viewport, style, KPI_TITLE)?;

    for (index, (label, pct)) in gauges.into_iter().enumerate() {
        let (panel_left, panel) = area.column_band(index, panels);
        let cx = panel_left + panel * 0.5;
        let cy = area.top + area.height() * 0.65;
        let outer_radius = (panel * 0.4).min(area.height() * 0.5).max(2.0);
        let inner_radius = outer_radius * (1.0 - GAUGE_THICKNESS_RATIO);
        let fill = (pct / 100.0).clamp(0.0, 1.0);

        frame = frame.with_arc(ArcPrimitive::new(
            cx,
            cy,
            inner_radius,
            outer_radius,
            -FRAC_PI_2,
            FRAC_PI_2,
            style.track_color,
        ));
        if fill > 0.0 {
            frame = frame.with_arc(ArcPrimitive::new(
                cx,
                cy,
                inner_radius,
                outer_radius,
                -FRAC_PI_2,
                -FRAC_PI_2 + fill * PI,
                style.conversion_color,
            ));
        }
        frame = frame
            .with_text(TextPrimitive::new(
                format!("{pct:.1}%"),
                cx,
                cy - style.font_size_px * 0.5,
                style.title_font_size_px,
                style.text_color,
                TextHAlign::Center,
            ))
            .with_text(TextPrimitive::new(
                label,
                cx,
                cy + style.font_size_px * 1.5,
                style.font_size_px,
                style.muted_text_color,
                TextHAlign::Center,
            ));
    }

    let (panel_left, panel) = area.column_band(panels - 1, panels);
    let cx = panel_left + panel * 0.5;
    let cy = area.top + area.height() * 0.5;
    Ok(frame
        .with_text(TextPrimitive::new(
            format!("{:.2}", kpis.avg_sessions_per_player),
            cx,
            cy,
            style.title_font_size_px * 2.0,
            style.text_color,
            TextHAlign::Center,
        ))
        .with_text(TextPrimitive::new(
            "Avg Sessions / Player",
            cx,
            cy + style.title_font_size_px * 1.5,
            style.font_size_px,
            style.muted_text_color,
            TextHAlign::Center,
        )))
}
