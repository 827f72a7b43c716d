//! Browser host: a [`Surface`] over `CanvasRenderingContext2d` and a
//! `requestAnimationFrame` scheduler. Compiled with the `web` feature.

use std::collections::HashMap;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Window};

use crate::config::GameConfig;
use crate::error::EngineError;
use crate::geometry::Size;
use crate::surface::{ColorStop, FrameHandle, FrameScheduler, ImageId, Paint, Surface, TextMetrics};

fn js_error(e: JsValue) -> EngineError {
    EngineError::Surface(format!("{e:?}"))
}

/// A canvas element bound as the engine's drawing surface.
pub struct WebSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    size: Size,
    images: HashMap<ImageId, HtmlImageElement>,
    next_image: u32,
}

impl WebSurface {
    /// Bind to the `<canvas>` with id `element_id`, sizing its backing store
    /// to `config` scaled by the pixel ratio.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if there is no such element, it is not a
    /// canvas, or it has no 2D context.
    pub fn bind(element_id: &str, config: &GameConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| EngineError::Configuration("no document available".into()))?;
        let canvas = document
            .get_element_by_id(element_id)
            .ok_or_else(|| EngineError::Configuration(format!("no element with id \"{element_id}\"")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| EngineError::Configuration(format!("element \"{element_id}\" is not a canvas")))?;
        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or_else(|| EngineError::Configuration("canvas has no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::Configuration("2d context has an unexpected type".into()))?;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            canvas.set_width((config.width * config.pixel_ratio).round() as u32);
            canvas.set_height((config.height * config.pixel_ratio).round() as u32);
        }
        ctx.scale(config.pixel_ratio, config.pixel_ratio).map_err(js_error)?;
        tracing::info!(element_id, width = config.width, height = config.height, "surface bound");

        Ok(Self { canvas, ctx, size: config.size(), images: HashMap::new(), next_image: 0 })
    }

    /// Make a decoded image drawable and return its handle.
    pub fn register_image(&mut self, image: HtmlImageElement) -> ImageId {
        self.next_image += 1;
        let id = ImageId(self.next_image);
        self.images.insert(id, image);
        id
    }

    fn gradient_stops(gradient: &CanvasGradient, stops: &[ColorStop]) -> Result<(), EngineError> {
        for stop in stops {
            #[allow(clippy::cast_possible_truncation)]
            gradient.add_color_stop(stop.offset as f32, &stop.color).map_err(js_error)?;
        }
        Ok(())
    }
}

impl Surface for WebSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), EngineError> {
        self.ctx.translate(x, y).map_err(js_error)
    }

    fn rotate(&mut self, radians: f64) -> Result<(), EngineError> {
        self.ctx.rotate(radians).map_err(js_error)
    }

    fn scale(&mut self, sx: f64, sy: f64) -> Result<(), EngineError> {
        self.ctx.scale(sx, sy).map_err(js_error)
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_shadow(&mut self, color: &str, blur: f64, offset_x: f64, offset_y: f64) {
        self.ctx.set_shadow_color(color);
        self.ctx.set_shadow_blur(blur);
        self.ctx.set_shadow_offset_x(offset_x);
        self.ctx.set_shadow_offset_y(offset_y);
    }

    fn set_fill(&mut self, paint: &Paint) -> Result<(), EngineError> {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(color),
            Paint::Linear { x0, y0, x1, y1, stops } => {
                let gradient = self.ctx.create_linear_gradient(*x0, *y0, *x1, *y1);
                Self::gradient_stops(&gradient, stops)?;
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
            Paint::Radial { x0, y0, r0, x1, y1, r1, stops } => {
                let gradient = self.ctx.create_radial_gradient(*x0, *y0, *r0, *x1, *y1, *r1).map_err(js_error)?;
                Self::gradient_stops(&gradient, stops)?;
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
        Ok(())
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.rect(x, y, width, height);
    }

    fn round_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) -> Result<(), EngineError> {
        let r = radius.min(width / 2.0).min(height / 2.0).max(0.0);
        let ctx = &self.ctx;
        ctx.move_to(x + r, y);
        ctx.arc_to(x + width, y, x + width, y + height, r).map_err(js_error)?;
        ctx.arc_to(x + width, y + height, x, y + height, r).map_err(js_error)?;
        ctx.arc_to(x, y + height, x, y, r).map_err(js_error)?;
        ctx.arc_to(x, y, x + width, y, r).map_err(js_error)?;
        ctx.close_path();
        Ok(())
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) -> Result<(), EngineError> {
        self.ctx.arc(cx, cy, radius.max(0.0), start, end).map_err(js_error)
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.stroke_rect(x, y, width, height);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: &str) {
        self.ctx.set_text_align(align);
    }

    fn set_text_baseline(&mut self, baseline: &str) {
        self.ctx.set_text_baseline(baseline);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>) -> Result<(), EngineError> {
        match max_width {
            Some(max) => self.ctx.fill_text_with_max_width(text, x, y, max),
            None => self.ctx.fill_text(text, x, y),
        }
        .map_err(js_error)
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64, max_width: Option<f64>) -> Result<(), EngineError> {
        match max_width {
            Some(max) => self.ctx.stroke_text_with_max_width(text, x, y, max),
            None => self.ctx.stroke_text(text, x, y),
        }
        .map_err(js_error)
    }

    fn measure_text(&mut self, text: &str) -> Result<TextMetrics, EngineError> {
        let metrics = self.ctx.measure_text(text).map_err(js_error)?;
        Ok(TextMetrics { width: metrics.width() })
    }

    fn draw_image(&mut self, image: ImageId, x: f64, y: f64, width: f64, height: f64) -> Result<(), EngineError> {
        let element = self
            .images
            .get(&image)
            .ok_or_else(|| EngineError::Surface(format!("unknown image {}", image.0)))?;
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(element, x, y, width, height)
            .map_err(js_error)
    }

    fn set_cursor(&mut self, cursor: &str) {
        if let Err(e) = self.canvas.style().set_property("cursor", cursor) {
            tracing::warn!(error = ?e, cursor, "failed to set cursor");
        }
    }
}

/// `requestAnimationFrame` scheduler invoking a host-owned JS callback.
///
/// The callback is expected to call `Renderer::frame` (or `Game::frame`) with
/// the timestamp it receives.
pub struct RafScheduler {
    window: Window,
    callback: js_sys::Function,
}

impl RafScheduler {
    /// # Errors
    ///
    /// Returns `Configuration` if there is no window.
    pub fn new(callback: js_sys::Function) -> Result<Self, EngineError> {
        let window = web_sys::window().ok_or_else(|| EngineError::Configuration("no window available".into()))?;
        Ok(Self { window, callback })
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, EngineError> {
        let id = self.window.request_animation_frame(&self.callback).map_err(js_error)?;
        Ok(FrameHandle(u64::from(id.unsigned_abs())))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let Ok(id) = i32::try_from(handle.0) else {
            tracing::warn!(handle = handle.0, "frame handle out of range");
            return;
        };
        if let Err(e) = self.window.cancel_animation_frame(id) {
            tracing::warn!(error = ?e, "failed to cancel animation frame");
        }
    }
}
