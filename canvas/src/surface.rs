//! Host capabilities: the drawing surface and the frame scheduler.
//!
//! The engine never talks to a concrete graphics API. Everything it draws
//! goes through [`Surface`], a thin mirror of a 2D canvas context, and every
//! frame it asks a [`FrameScheduler`] for the next callback.
//! [`RecordingSurface`] and [`ManualScheduler`] are deterministic in-process
//! implementations used by tests and by the headless host.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::error::EngineError;
use crate::geometry::Size;

/// Opaque handle for an image the host has already decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub u32);

/// Opaque handle for a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// One color stop of a gradient paint, offset in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: String,
}

/// A fill paint resolved against concrete coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(String),
    Linear { x0: f64, y0: f64, x1: f64, y1: f64, stops: Vec<ColorStop> },
    Radial { x0: f64, y0: f64, r0: f64, x1: f64, y1: f64, r1: f64, stops: Vec<ColorStop> },
}

/// Text measurement result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
}

/// The rasterized target entities paint onto.
///
/// Fallible operations return [`EngineError::Surface`]; callers propagate
/// with `?` and the frame is abandoned.
pub trait Surface {
    /// Logical (CSS pixel) size of the surface.
    fn size(&self) -> Size;

    fn save(&mut self);
    fn restore(&mut self);
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    // --- transform / compositing state ---
    fn translate(&mut self, x: f64, y: f64) -> Result<(), EngineError>;
    fn rotate(&mut self, radians: f64) -> Result<(), EngineError>;
    fn scale(&mut self, sx: f64, sy: f64) -> Result<(), EngineError>;
    fn set_global_alpha(&mut self, alpha: f64);
    fn set_shadow(&mut self, color: &str, blur: f64, offset_x: f64, offset_y: f64);

    // --- styles ---
    fn set_fill(&mut self, paint: &Paint) -> Result<(), EngineError>;
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);

    // --- paths ---
    fn begin_path(&mut self);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn round_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) -> Result<(), EngineError>;
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) -> Result<(), EngineError>;
    fn fill(&mut self);
    fn stroke(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    // --- text ---
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: &str);
    fn set_text_baseline(&mut self, baseline: &str);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>) -> Result<(), EngineError>;
    fn stroke_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>) -> Result<(), EngineError>;
    fn measure_text(&mut self, text: &str) -> Result<TextMetrics, EngineError>;

    // --- images / host chrome ---
    fn draw_image(&mut self, image: ImageId, x: f64, y: f64, width: f64, height: f64) -> Result<(), EngineError>;
    fn set_cursor(&mut self, cursor: &str);
}

/// Host frame scheduler (`requestAnimationFrame` / `cancelAnimationFrame`).
pub trait FrameScheduler {
    /// Ask the host to invoke the renderer once more.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the host refuses the request.
    fn request_frame(&mut self) -> Result<FrameHandle, EngineError>;

    /// Withdraw a previously issued request. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

// =============================================================
// Recording surface
// =============================================================

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    Translate { x: f64, y: f64 },
    Rotate { radians: f64 },
    Scale { sx: f64, sy: f64 },
    GlobalAlpha(f64),
    Shadow { color: String, blur: f64, offset_x: f64, offset_y: f64 },
    Fill(Paint),
    StrokeStyle(String),
    LineWidth(f64),
    BeginPath,
    Rect { x: f64, y: f64, width: f64, height: f64 },
    RoundRect { x: f64, y: f64, width: f64, height: f64, radius: f64 },
    Arc { cx: f64, cy: f64, radius: f64 },
    FillPath,
    StrokePath,
    FillRect { x: f64, y: f64, width: f64, height: f64 },
    StrokeRect { x: f64, y: f64, width: f64, height: f64 },
    Font(String),
    TextAlign(String),
    TextBaseline(String),
    FillText { text: String, x: f64, y: f64 },
    StrokeText { text: String, x: f64, y: f64 },
    DrawImage { image: ImageId, x: f64, y: f64, width: f64, height: f64 },
    Cursor(String),
}

/// A surface that records every call instead of rasterizing.
///
/// Text is measured as a fixed-advance font: every character is
/// `char_width` wide.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    char_width: f64,
    ops: Vec<DrawOp>,
    cursor: String,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { size: Size::new(width, height), char_width: 8.0, ops: Vec::new(), cursor: "default".into() }
    }

    /// Override the per-character advance used by `measure_text`.
    #[must_use]
    pub fn with_char_width(mut self, char_width: f64) -> Self {
        self.char_width = char_width;
        self
    }

    /// All calls recorded so far.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drop the recorded calls.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// The cursor most recently applied by the engine.
    #[must_use]
    pub fn cursor(&self) -> &str {
        &self.cursor
    }

    /// Text drawn with `fill_text`, in call order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillText { text, .. } | DrawOp::StrokeText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn save(&mut self) {
        self.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.push(DrawOp::Restore);
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawOp::ClearRect { x, y, width, height });
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), EngineError> {
        self.push(DrawOp::Translate { x, y });
        Ok(())
    }

    fn rotate(&mut self, radians: f64) -> Result<(), EngineError> {
        self.push(DrawOp::Rotate { radians });
        Ok(())
    }

    fn scale(&mut self, sx: f64, sy: f64) -> Result<(), EngineError> {
        self.push(DrawOp::Scale { sx, sy });
        Ok(())
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.push(DrawOp::GlobalAlpha(alpha));
    }

    fn set_shadow(&mut self, color: &str, blur: f64, offset_x: f64, offset_y: f64) {
        self.push(DrawOp::Shadow { color: color.to_owned(), blur, offset_x, offset_y });
    }

    fn set_fill(&mut self, paint: &Paint) -> Result<(), EngineError> {
        self.push(DrawOp::Fill(paint.clone()));
        Ok(())
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.push(DrawOp::StrokeStyle(color.to_owned()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(DrawOp::LineWidth(width));
    }

    fn begin_path(&mut self) {
        self.push(DrawOp::BeginPath);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawOp::Rect { x, y, width, height });
    }

    fn round_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) -> Result<(), EngineError> {
        self.push(DrawOp::RoundRect { x, y, width, height, radius });
        Ok(())
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, _start: f64, _end: f64) -> Result<(), EngineError> {
        self.push(DrawOp::Arc { cx, cy, radius });
        Ok(())
    }

    fn fill(&mut self) {
        self.push(DrawOp::FillPath);
    }

    fn stroke(&mut self) {
        self.push(DrawOp::StrokePath);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawOp::FillRect { x, y, width, height });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawOp::StrokeRect { x, y, width, height });
    }

    fn set_font(&mut self, font: &str) {
        self.push(DrawOp::Font(font.to_owned()));
    }

    fn set_text_align(&mut self, align: &str) {
        self.push(DrawOp::TextAlign(align.to_owned()));
    }

    fn set_text_baseline(&mut self, baseline: &str) {
        self.push(DrawOp::TextBaseline(baseline.to_owned()));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, _max_width: Option<f64>) -> Result<(), EngineError> {
        self.push(DrawOp::FillText { text: text.to_owned(), x, y });
        Ok(())
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64, _max_width: Option<f64>) -> Result<(), EngineError> {
        self.push(DrawOp::StrokeText { text: text.to_owned(), x, y });
        Ok(())
    }

    fn measure_text(&mut self, text: &str) -> Result<TextMetrics, EngineError> {
        #[allow(clippy::cast_precision_loss)]
        let chars = text.chars().count() as f64;
        Ok(TextMetrics { width: chars * self.char_width })
    }

    fn draw_image(&mut self, image: ImageId, x: f64, y: f64, width: f64, height: f64) -> Result<(), EngineError> {
        self.push(DrawOp::DrawImage { image, x, y, width, height });
        Ok(())
    }

    fn set_cursor(&mut self, cursor: &str) {
        cursor.clone_into(&mut self.cursor);
        self.push(DrawOp::Cursor(cursor.to_owned()));
    }
}

// =============================================================
// Manual scheduler
// =============================================================

/// A frame scheduler driven by hand: the host polls [`ManualScheduler::take_pending`]
/// and calls `Renderer::frame` when a request is outstanding.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_handle: u64,
    pending: Option<FrameHandle>,
    cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The outstanding request, if any, without consuming it.
    #[must_use]
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Consume the outstanding request.
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    /// Handles withdrawn through `cancel_frame`, in order.
    #[must_use]
    pub fn cancelled(&self) -> &[FrameHandle] {
        &self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, EngineError> {
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        self.pending = Some(handle);
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled.push(handle);
    }
}
