use serde::{Deserialize, Serialize};

use crate::error::{FunnelError, FunnelResult};
use crate::render::Color;

/// Colors, fonts and margins shared by every chart builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    /// Prepended to each chart title when set.
    pub title_prefix: Option<String>,
    pub counts_color: Color,
    pub counts_accent_color: Color,
    pub conversion_color: Color,
    pub drop_color: Color,
    pub gain_color: Color,
    pub track_color: Color,
    pub text_color: Color,
    pub muted_text_color: Color,
    /// Cycled through by the donut wedges and the funnel-area bands.
    pub series_palette: Vec<Color>,
    pub font_size_px: f64,
    pub title_font_size_px: f64,
    /// Left margin reserved for stage names on horizontal charts.
    pub label_gutter_px: f64,
    pub margin_px: f64,
    pub title_band_px: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title_prefix: None,
            counts_color: Color::rgb8(0x5a, 0xc8, 0xfa),
            counts_accent_color: Color::rgb8(0x0e, 0xa5, 0xe9),
            conversion_color: Color::rgb8(0x34, 0xc7, 0x59),
            drop_color: Color::rgb8(0xff, 0x3b, 0x30),
            gain_color: Color::rgb8(0x34, 0xc7, 0x59),
            track_color: Color::rgb8(0xe5, 0xe7, 0xeb),
            text_color: Color::rgb8(0x1f, 0x29, 0x37),
            muted_text_color: Color::rgb8(0x6b, 0x72, 0x80),
            series_palette: vec![
                Color::rgb8(0xe5, 0xf5, 0xe0),
                Color::rgb8(0xc7, 0xe9, 0xc0),
                Color::rgb8(0xa1, 0xd9, 0x9b),
                Color::rgb8(0x74, 0xc4, 0x76),
                Color::rgb8(0x41, 0xab, 0x5d),
                Color::rgb8(0x23, 0x8b, 0x45),
                Color::rgb8(0x00, 0x6d, 0x2c),
                Color::rgb8(0x00, 0x44, 0x1b),
            ],
            font_size_px: 12.0,
            title_font_size_px: 16.0,
            label_gutter_px: 140.0,
            margin_px: 20.0,
            title_band_px: 60.0,
        }
    }
}

impl ChartStyle {
    #[must_use]
    pub fn with_title_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.title_prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn title(&self, chart_title: &str) -> String {
        match self.title_prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}: {chart_title}"),
            _ => chart_title.to_owned(),
        }
    }

    /// Palette color for the `index`-th series entry.
    #[must_use]
    pub fn series_color(&self, index: usize) -> Color {
        if self.series_palette.is_empty() {
            return self.counts_color;
        }
        self.series_palette[index % self.series_palette.len()]
    }

    pub fn validate(&self) -> FunnelResult<()> {
        for color in [
            self.counts_color,
            self.counts_accent_color,
            self.conversion_color,
            self.drop_color,
            self.gain_color,
            self.track_color,
            self.text_color,
            self.muted_text_color,
        ]
        .iter()
        .chain(&self.series_palette)
        {
            color.validate()?;
        }

        for (name, value) in [
            ("font_size_px", self.font_size_px),
            ("title_font_size_px", self.title_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(FunnelError::Config(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("label_gutter_px", self.label_gutter_px),
            ("margin_px", self.margin_px),
            ("title_band_px", self.title_band_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FunnelError::Config(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}
