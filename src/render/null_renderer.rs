use crate::error::FunnelResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless dashboards.
///
/// It still validates frame content so invalid geometry is caught without a
/// drawing backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_line_count: usize,
    pub last_rect_count: usize,
    pub last_text_count: usize,
    pub last_primitive_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> FunnelResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_line_count = frame.lines.len();
        self.last_rect_count = frame.rects.len();
        self.last_text_count = frame.texts.len();
        self.last_primitive_count = frame.primitive_count();
        Ok(())
    }
}
