//! Renderers translate MIR into graphics format.
use crate::{
    error::BackendError,
    geometry::{Point, Rect},
    mir::{self, ShapeKind},
};
use std::io::Write;
use svg::node::element;

pub trait Renderer {
    fn render(&self, doc: &mir::Document, writer: &mut impl Write) -> Result<(), BackendError>;

    fn render_to_string(&self, doc: &mir::Document) -> Result<String, BackendError> {
        let mut bytes: Vec<u8> = vec![];

        self.render(doc, &mut bytes)?;
        Ok(String::from_utf8(bytes)?)
    }
}

#[derive(Debug, Default)]
pub struct SVGRenderer {}

impl SVGRenderer {
    pub fn new() -> Self {
        Self {}
    }
}

impl Renderer for SVGRenderer {
    fn render(&self, doc: &mir::Document, writer: &mut impl Write) -> Result<(), BackendError> {
        let size = doc.size();
        let view_box = doc.view_box();

        // -- Build a SVG document
        let mut svg_doc = svg::Document::new()
            .set("version", "1.1")
            .set("width", size.width)
            .set("height", size.height)
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    view_box.min_x(),
                    view_box.min_y(),
                    view_box.width(),
                    view_box.height()
                ),
            );
        if let Some(border) = doc.border() {
            svg_doc = svg_doc.set(
                "style",
                format!("border: {}px solid {}", border.width, border.color),
            );
        }

        // -- Draw shapes in recording order
        for shape in doc.shapes() {
            svg_doc = match shape.kind() {
                ShapeKind::Rect { rect, style } => svg_doc.add(self.draw_rect(rect, style)),
                ShapeKind::Text { span, origin } => svg_doc.add(self.draw_text(span, *origin)),
                ShapeKind::Line { from, to, stroke } => {
                    svg_doc.add(self.draw_line(*from, *to, stroke))
                }
            };
        }

        writer.write_all(svg_doc.to_string().as_bytes())?;
        Ok(())
    }
}

impl SVGRenderer {
    fn draw_rect(&self, rect: &Rect, style: &mir::ShapeStyle) -> element::Rectangle {
        let mut shape = element::Rectangle::new()
            .set("x", rect.min_x())
            .set("y", rect.min_y())
            .set("width", rect.width())
            .set("height", rect.height());

        if let Some(fill) = &style.fill {
            shape = shape.set("fill", fill.to_string());
        }
        if let Some(stroke) = &style.stroke {
            shape = shape
                .set("stroke", stroke.color.to_string())
                .set("stroke-width", stroke.width);
        }

        shape
    }

    fn draw_text(&self, span: &mir::TextSpan, origin: Point) -> element::Text {
        let mut label = element::Text::new()
            .set("x", origin.x)
            .set("y", origin.y)
            .add(svg::node::Text::new(span.text.clone()));

        if let Some(text_anchor) = &span.anchor {
            label = label.set("text-anchor", text_anchor.to_string());
        }
        if let Some(text_color) = &span.color {
            label = label.set("fill", text_color.to_string());
        }
        if let Some(font_size) = span.font_size {
            label = label.set("font-size", font_size);
        }

        label
    }

    fn draw_line(&self, from: Point, to: Point, stroke: &mir::Stroke) -> element::Line {
        element::Line::new()
            .set("x1", from.x)
            .set("y1", from.y)
            .set("x2", to.x)
            .set("y2", to.y)
            .set("stroke", stroke.color.to_string())
            .set("stroke-width", stroke.width)
    }
}
