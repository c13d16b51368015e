use crate::core::{LinearScale, RawEventCounts, Viewport, format_count_short};
use crate::error::FunnelResult;
use crate::render::{LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::ChartStyle;
use super::layout::{PlotArea, finite_max, plot_value, titled_frame};

pub const EVENTS_TITLE: &str = "Raw Event Counts";

const COLUMN_FILL_RATIO: f64 = 0.6;

/// Vertical bars for the five raw analytics counters.
pub fn build_event_bars(
    events: &RawEventCounts,
    style: &ChartStyle,
    viewport: Viewport,
) -> FunnelResult<RenderFrame> {
    let area = PlotArea::with_margins(
        viewport,
        style.margin_px,
        style.title_band_px,
        style.margin_px,
        style.margin_px * 3.0,
    )?;
    let entries = events.entries();
    let max = finite_max(entries.iter().map(|(_, count)| *count));
    let scale = LinearScale::from_zero(max, area.bottom, area.top)?;
    let mut frame = titled_frame(viewport, style, EVENTS_TITLE)?.with_line(LinePrimitive::new(
        area.left,
        area.bottom,
        area.right,
        area.bottom,
        1.0,
        style.muted_text_color,
    ));

    for (index, (event, count)) in entries.iter().enumerate() {
        let (column_left, column) = area.column_band(index, entries.len());
        let bar_width = column * COLUMN_FILL_RATIO;
        let center_x = column_left + column * 0.5;
        let top_y = scale.to_pixel(plot_value(*count, max))?;

        frame = frame
            .with_rect(RectPrimitive::new(
                center_x - bar_width * 0.5,
                top_y,
                bar_width,
                area.bottom - top_y,
                style.counts_color,
            ))
            .with_text(TextPrimitive::new(
                format_count_short(*count),
                center_x,
                top_y - 4.0,
                style.font_size_px,
                style.text_color,
                TextHAlign::Center,
            ))
            .with_text(TextPrimitive::new(
                *event,
                center_x,
                area.bottom + style.font_size_px * 1.5,
                style.font_size_px,
                style.muted_text_color,
                TextHAlign::Center,
            ));
    }

    Ok(frame)
}
