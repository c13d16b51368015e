use crate::error::{FunnelError, FunnelResult};

/// Maps a numeric domain onto a pixel interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        pixel_start: f64,
        pixel_end: f64,
    ) -> FunnelResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(FunnelError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !pixel_start.is_finite() || !pixel_end.is_finite() {
            return Err(FunnelError::InvalidData(
                "scale pixel range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            pixel_start,
            pixel_end,
        })
    }

    /// Scale from zero to `max`, widened to `1.0` when `max` is not positive.
    pub fn from_zero(max: f64, pixel_start: f64, pixel_end: f64) -> FunnelResult<Self> {
        let domain_end = if max.is_finite() && max > 0.0 { max } else { 1.0 };
        Self::new(0.0, domain_end, pixel_start, pixel_end)
    }

    /// Projects `value`, clamping to the pixel interval.
    pub fn to_pixel(self, value: f64) -> FunnelResult<f64> {
        if !value.is_finite() {
            return Err(FunnelError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = ((value - self.domain_start) / span).clamp(0.0, 1.0);
        Ok(self.pixel_start + normalized * (self.pixel_end - self.pixel_start))
    }

    /// Pixel length covered by `value` measured from the domain start.
    pub fn extent(self, value: f64) -> FunnelResult<f64> {
        Ok((self.to_pixel(value)? - self.pixel_start).abs())
    }
}
