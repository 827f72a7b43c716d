//! Visual style: fill, stroke, opacity, gradients, shadows and symbolic positions.

#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use std::str::FromStr;

use crate::consts::{COLOR_BLACK, OPACITY_MAX};
use crate::error::EngineError;
use crate::geometry::{BoxRegion, Point, Size};
use crate::surface::{ColorStop, Paint};

/// Fill, stroke and compositing state of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Solid fill color; `None` leaves shapes unfilled.
    pub fill: Option<String>,
    /// Stroke color, used when `stroke_width > 0`.
    pub stroke: String,
    pub stroke_width: f64,
    /// Opacity in percent, `0..=100`.
    pub opacity: u8,
    /// Gradient fill; takes precedence over `fill`.
    pub gradient: Option<Gradient>,
    pub shadow: Option<Shadow>,
    /// Corner radius for rectangles; `0` draws square corners.
    pub corner_radius: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Some(COLOR_BLACK.to_owned()),
            stroke: COLOR_BLACK.to_owned(),
            stroke_width: 0.0,
            opacity: OPACITY_MAX,
            gradient: None,
            shadow: None,
            corner_radius: 0.0,
        }
    }
}

impl Style {
    /// Set opacity, saturating at 100.
    pub fn set_opacity(&mut self, opacity: u8) {
        self.opacity = opacity.min(OPACITY_MAX);
    }

    /// Opacity as a compositing alpha in `0.0..=1.0`.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        f64::from(self.opacity) / f64::from(OPACITY_MAX)
    }

    /// The paint used to fill the entity's path, if any.
    #[must_use]
    pub fn fill_paint(&self, bounds: BoxRegion) -> Option<Paint> {
        if let Some(gradient) = &self.gradient {
            return Some(gradient.resolve(bounds));
        }
        self.fill.as_ref().map(|color| Paint::Solid(color.clone()))
    }
}

// =============================================================
// Gradient
// =============================================================

/// Geometry of a gradient, relative to the painted entity.
#[derive(Debug, Clone, PartialEq)]
pub enum GradientKind {
    /// Linear gradient across the entity's bounds.
    ///
    /// `angle` is the direction in degrees (0 = left to right); `inset`
    /// pulls both ends towards the center.
    Linear { angle: f64, inset: f64 },
    /// Radial gradient between two circles given relative to the top-left corner.
    Radial { x0: f64, y0: f64, r0: f64, x1: f64, y1: f64, r1: f64 },
}

/// A multi-stop gradient fill.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub kind: GradientKind,
    pub colors: Vec<String>,
}

impl Gradient {
    #[must_use]
    pub fn linear(colors: Vec<String>, angle: f64) -> Self {
        Self { kind: GradientKind::Linear { angle, inset: 0.0 }, colors }
    }

    /// Resolve against the entity's painted bounds.
    #[must_use]
    pub fn resolve(&self, bounds: BoxRegion) -> Paint {
        let stops = self.stops();
        match self.kind {
            GradientKind::Linear { angle, inset } => {
                let (sin, cos) = angle.to_radians().sin_cos();
                let cx = bounds.x + bounds.width / 2.0;
                let cy = bounds.y + bounds.height / 2.0;
                let half = ((bounds.width * cos.abs() + bounds.height * sin.abs()) / 2.0 - inset).max(0.0);
                Paint::Linear {
                    x0: cx - cos * half,
                    y0: cy - sin * half,
                    x1: cx + cos * half,
                    y1: cy + sin * half,
                    stops,
                }
            }
            GradientKind::Radial { x0, y0, r0, x1, y1, r1 } => Paint::Radial {
                x0: bounds.x + x0,
                y0: bounds.y + y0,
                r0,
                x1: bounds.x + x1,
                y1: bounds.y + y1,
                r1,
                stops,
            },
        }
    }

    fn stops(&self) -> Vec<ColorStop> {
        let last = self.colors.len().saturating_sub(1).max(1);
        self.colors
            .iter()
            .enumerate()
            .map(|(i, color)| {
                #[allow(clippy::cast_precision_loss)]
                let offset = i as f64 / last as f64;
                ColorStop { offset: offset.min(1.0), color: color.clone() }
            })
            .collect()
    }
}

// =============================================================
// Shadow
// =============================================================

/// Drop shadow applied before filling.
#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    pub color: String,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Shadow {
    #[must_use]
    pub fn new(color: impl Into<String>, blur: f64) -> Self {
        Self { color: color.into(), blur, offset_x: 0.0, offset_y: 0.0 }
    }

    /// The soft dark shadow used by the built-in widgets.
    #[must_use]
    pub fn soft() -> Self {
        Self::new(COLOR_BLACK, 10.0)
    }
}

// =============================================================
// Symbolic positions
// =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Center,
    Right,
}

/// A symbolic position such as `"bottom center"`: vertical keyword first,
/// horizontal keyword second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
}

impl FromStr for Anchor {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace().map(str::to_ascii_lowercase);
        let (Some(v), Some(h), None) = (words.next(), words.next(), words.next()) else {
            return Err(EngineError::InvalidPosition(s.to_owned()));
        };
        let vertical = match v.as_str() {
            "top" => Vertical::Top,
            "middle" => Vertical::Middle,
            "bottom" => Vertical::Bottom,
            _ => return Err(EngineError::InvalidPosition(s.to_owned())),
        };
        let horizontal = match h.as_str() {
            "left" => Horizontal::Left,
            "center" => Horizontal::Center,
            "right" => Horizontal::Right,
            _ => return Err(EngineError::InvalidPosition(s.to_owned())),
        };
        Ok(Self { vertical, horizontal })
    }
}

impl Anchor {
    /// Top-left corner for a box of `size` placed in `viewport`, keeping
    /// `margin` from the edges it is anchored to.
    #[must_use]
    pub fn resolve(&self, size: Size, viewport: Size, margin: f64) -> Point {
        let x = match self.horizontal {
            Horizontal::Left => margin,
            Horizontal::Center => (viewport.width - size.width) / 2.0,
            Horizontal::Right => viewport.width - size.width - margin,
        };
        let y = match self.vertical {
            Vertical::Top => margin,
            Vertical::Middle => (viewport.height - size.height) / 2.0,
            Vertical::Bottom => viewport.height - size.height - margin,
        };
        Point::new(x, y)
    }
}
