mod frame;
mod null_renderer;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use primitives::{
    ArcPrimitive, CirclePrimitive, Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};

use crate::error::FunnelResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from funnel metrics and input handling.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> FunnelResult<()>;
}
