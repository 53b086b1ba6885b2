//! Mid-level IR
//!
//! Layout engines draw through the [`Canvas`] trait; [`Document`] records every primitive in
//! drawing order so that renderers (and tests) can replay it.
//!
//! coordinate system: top-left origin
//!
//! ```svgbob
//! +--------------------------
//! | (0, 0)           (800, 0)
//! |
//! |
//! |
//! | (0, 600)
//! ```
use crate::color::WebColor;
use crate::geometry::{Point, Rect, Size};
use derive_builder::Builder;
use derive_more::Display;

/// Drawing primitives.
pub trait Canvas {
    fn draw_rect(&mut self, rect: Rect, style: ShapeStyle);

    /// Draws `span` with its anchor point at `origin`.
    fn draw_text(&mut self, span: TextSpan, origin: Point);

    fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: WebColor,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: impl Into<WebColor>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Builder)]
#[builder(default, build_fn(error = "crate::error::LayoutError"))]
pub struct ShapeStyle {
    #[builder(setter(into, strip_option))]
    pub fill: Option<WebColor>,
    #[builder(setter(strip_option))]
    pub stroke: Option<Stroke>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TextAnchor {
    #[display(fmt = "start")]
    Start,
    #[display(fmt = "middle")]
    Middle,
    #[display(fmt = "end")]
    End,
}

#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(build_fn(error = "crate::error::LayoutError"))]
pub struct TextSpan {
    #[builder(setter(into))]
    pub text: String,
    #[builder(default, setter(into, strip_option))]
    pub color: Option<WebColor>,
    #[builder(default, setter(strip_option))]
    pub anchor: Option<TextAnchor>,
    #[builder(default, setter(strip_option))]
    pub font_size: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Rect {
        rect: Rect,
        style: ShapeStyle,
    },
    Text {
        span: TextSpan,
        origin: Point,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
}

impl Shape {
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }
}

/// A fixed-size drawing.
#[derive(Debug, Clone)]
pub struct Document {
    size: Size,
    border: Option<Stroke>,
    shapes: Vec<Shape>,
}

impl Document {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            border: None,
            shapes: vec![],
        }
    }

    pub fn with_border(mut self, border: Stroke) -> Self {
        self.border = Some(border);
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn view_box(&self) -> Rect {
        Rect::new(Point::default(), self.size)
    }

    pub fn border(&self) -> Option<&Stroke> {
        self.border.as_ref()
    }

    pub fn shapes(&self) -> impl ExactSizeIterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn rects(&self) -> impl Iterator<Item = (&Rect, &ShapeStyle)> {
        self.shapes.iter().filter_map(|shape| match &shape.kind {
            ShapeKind::Rect { rect, style } => Some((rect, style)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&TextSpan, &Point)> {
        self.shapes.iter().filter_map(|shape| match &shape.kind {
            ShapeKind::Text { span, origin } => Some((span, origin)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (&Point, &Point, &Stroke)> {
        self.shapes.iter().filter_map(|shape| match &shape.kind {
            ShapeKind::Line { from, to, stroke } => Some((from, to, stroke)),
            _ => None,
        })
    }

    fn push(&mut self, kind: ShapeKind) {
        self.shapes.push(Shape { kind });
    }
}

impl Canvas for Document {
    fn draw_rect(&mut self, rect: Rect, style: ShapeStyle) {
        self.push(ShapeKind::Rect { rect, style });
    }

    fn draw_text(&mut self, span: TextSpan, origin: Point) {
        self.push(ShapeKind::Text { span, origin });
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.push(ShapeKind::Line { from, to, stroke });
    }
}
