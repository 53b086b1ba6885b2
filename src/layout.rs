//! Layout engine
//!
//! Pieces are placed at fixed offsets; nothing is packed or measured. With the default
//! configuration a pattern is drawn as follows:
//!
//! ```svgbob
//!        "Main Tube Body"          "Reinforcement 1"     "Reinforcement 2"
//!                                        (y - 10)
//!  (50, 50) +-------------+         +-------+            +-----+
//!           |             |         |       |            |     |
//!           |             |         +-------+            +-----+
//!           |             |       (50 + 0 * 200)      (50 + 1 * 200)
//!           +-------------+
//!           <------------->  (bottom + 20)
//!               "500.0mm"    (bottom + 35)
//! ```
//!
//! Reinforcements start at the main piece's anchor and advance horizontally by a fixed spacing,
//! whatever their own width. Their vertical offset comes from the piece position.
use crate::{
    color::{NamedColor, DIMENSION_LINE, MAIN_PIECE_FILL, OUTLINE, REINFORCEMENT_FILL},
    error::{ConfigError, LayoutError},
    geometry::{Point, Rect, Size},
    mir::{Canvas, ShapeStyleBuilder, Stroke, TextAnchor, TextSpanBuilder},
    pattern::{Pattern, Piece},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const MAIN_PIECE_LABEL: &str = "Main Tube Body";

const MAIN_LABEL_RAISE: f64 = 20.0;
const LABEL_GAP: f64 = 10.0;
const OUTLINE_WIDTH: f64 = 2.0;
const DIMENSION_LINE_GAP: f64 = 20.0;
const DIMENSION_LINE_WIDTH: f64 = 1.0;
const DIMENSION_TEXT_GAP: f64 = 35.0;
const DIMENSION_FONT_SIZE: f64 = 12.0;

/// Geometry of the pattern canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Canvas units per millimeter.
    pub scale: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Top-left corner of the main piece.
    pub anchor_x: f64,
    pub anchor_y: f64,
    /// Horizontal distance between consecutive reinforcements.
    pub reinforcement_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            scale: 0.1,
            canvas_width: 800.0,
            canvas_height: 600.0,
            anchor_x: 50.0,
            anchor_y: 50.0,
            reinforcement_spacing: 200.0,
        }
    }
}

impl LayoutConfig {
    /// Reads a configuration. Missing fields keep their default values.
    pub fn from_json(src: &str) -> Result<Self, ConfigError> {
        let config: LayoutConfig = serde_json::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        let valid_side = |side: f64| side.is_finite() && side > 0.0;
        if !valid_side(self.canvas_width) || !valid_side(self.canvas_height) {
            return Err(ConfigError::InvalidCanvas(
                self.canvas_width,
                self.canvas_height,
            ));
        }
        Ok(())
    }

    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    pub fn anchor(&self) -> Point {
        Point::new(self.anchor_x, self.anchor_y)
    }
}

pub trait LayoutEngine {
    fn canvas_size(&self) -> Size;

    /// Draw the main piece with its label.
    ///
    /// Returns the rectangle occupied by the piece.
    fn place_main_piece(
        &self,
        piece: &Piece,
        canvas: &mut impl Canvas,
    ) -> Result<Rect, LayoutError>;

    /// Draw every reinforcement with its label, in order.
    fn place_reinforcements(
        &self,
        pieces: &[Piece],
        canvas: &mut impl Canvas,
    ) -> Result<Vec<Rect>, LayoutError>;

    /// Draw the width annotation beneath `main_rect`.
    fn annotate_width(
        &self,
        piece: &Piece,
        main_rect: &Rect,
        canvas: &mut impl Canvas,
    ) -> Result<(), LayoutError>;

    fn draw_pattern(&self, pattern: &Pattern, canvas: &mut impl Canvas) -> Result<(), LayoutError> {
        let main_piece = pattern.main_piece();
        let main_rect = self.place_main_piece(main_piece, canvas)?;

        self.place_reinforcements(pattern.reinforcements(), canvas)?;
        self.annotate_width(main_piece, &main_rect, canvas)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PatternLayoutEngine {
    config: LayoutConfig,
}

impl PatternLayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    fn piece_size(&self, piece: &Piece) -> Size {
        Size::new(piece.width, piece.height).scale(self.config.scale)
    }

    fn outline() -> Stroke {
        Stroke::new(OUTLINE, OUTLINE_WIDTH)
    }

    fn draw_label(
        &self,
        text: impl Into<String>,
        origin: Point,
        canvas: &mut impl Canvas,
    ) -> Result<(), LayoutError> {
        let span = TextSpanBuilder::default()
            .text(text)
            .color(NamedColor::Black)
            .anchor(TextAnchor::Middle)
            .build()?;
        canvas.draw_text(span, origin);
        Ok(())
    }
}

impl LayoutEngine for PatternLayoutEngine {
    fn canvas_size(&self) -> Size {
        self.config.canvas_size()
    }

    fn place_main_piece(
        &self,
        piece: &Piece,
        canvas: &mut impl Canvas,
    ) -> Result<Rect, LayoutError> {
        let rect = Rect::new(self.config.anchor(), self.piece_size(piece));
        debug!(width = rect.width(), height = rect.height(), "placing main piece");

        let style = ShapeStyleBuilder::default()
            .fill(MAIN_PIECE_FILL)
            .stroke(Self::outline())
            .build()?;
        canvas.draw_rect(rect, style);

        self.draw_label(
            MAIN_PIECE_LABEL,
            Point::new(rect.mid_x(), rect.min_y() - MAIN_LABEL_RAISE),
            canvas,
        )?;
        Ok(rect)
    }

    fn place_reinforcements(
        &self,
        pieces: &[Piece],
        canvas: &mut impl Canvas,
    ) -> Result<Vec<Rect>, LayoutError> {
        let mut rects = Vec::with_capacity(pieces.len());

        for (index, piece) in pieces.iter().enumerate() {
            let origin = Point::new(
                self.config.anchor_x + index as f64 * self.config.reinforcement_spacing,
                self.config.anchor_y + piece.position.y * self.config.scale,
            );
            let rect = Rect::new(origin, self.piece_size(piece));
            debug!(index, x = origin.x, y = origin.y, "placing reinforcement");

            let style = ShapeStyleBuilder::default()
                .fill(REINFORCEMENT_FILL)
                .stroke(Self::outline())
                .build()?;
            canvas.draw_rect(rect, style);

            self.draw_label(
                format!("Reinforcement {}", index + 1),
                Point::new(rect.mid_x(), rect.min_y() - LABEL_GAP),
                canvas,
            )?;
            rects.push(rect);
        }

        Ok(rects)
    }

    fn annotate_width(
        &self,
        piece: &Piece,
        main_rect: &Rect,
        canvas: &mut impl Canvas,
    ) -> Result<(), LayoutError> {
        let line_y = main_rect.max_y() + DIMENSION_LINE_GAP;
        canvas.draw_line(
            Point::new(main_rect.min_x(), line_y),
            Point::new(main_rect.max_x(), line_y),
            Stroke::new(DIMENSION_LINE, DIMENSION_LINE_WIDTH),
        );

        let span = TextSpanBuilder::default()
            .text(format_millimeters(piece.width))
            .color(NamedColor::Black)
            .anchor(TextAnchor::Middle)
            .font_size(DIMENSION_FONT_SIZE)
            .build()?;
        canvas.draw_text(
            span,
            Point::new(main_rect.mid_x(), main_rect.max_y() + DIMENSION_TEXT_GAP),
        );
        Ok(())
    }
}

/// Formats a physical length with one decimal, e.g. `123.5mm`.
///
/// Exact ties round away from zero (`12.25` gives `12.3mm`), like JavaScript's `toFixed`.
pub fn format_millimeters(value: f64) -> String {
    // A tie at the second decimal is a value whose quadruple is an odd integer.
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        let rounded = (value.abs() * 10.0).ceil() / 10.0;
        return format!("{:.1}mm", rounded.copysign(value));
    }
    format!("{:.1}mm", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mir::{Document, ShapeKind},
        pattern::Position,
    };

    fn piece(width: f64, height: f64, y: f64) -> Piece {
        Piece::new(width, height, Position::new(0.0, y))
    }

    fn draw(pieces: Vec<Piece>) -> Document {
        let pattern = Pattern::new(pieces).unwrap();
        let engine = PatternLayoutEngine::default();
        let mut doc = Document::new(engine.canvas_size());

        engine.draw_pattern(&pattern, &mut doc).unwrap();
        doc
    }

    #[test]
    fn shape_counts() {
        for n in 1..=4 {
            let pieces = (0..n).map(|i| piece(100.0 + i as f64, 50.0, 0.0)).collect();
            let doc = draw(pieces);

            assert_eq!(doc.rects().count(), n);
            // one label per piece plus the width annotation
            assert_eq!(doc.texts().count(), n + 1);
            assert_eq!(doc.lines().count(), 1);
        }
    }

    #[test]
    fn main_piece_is_scaled() {
        let doc = draw(vec![piece(123.456, 78.9, 0.0)]);
        let (rect, style) = doc.rects().next().unwrap();

        assert_eq!(rect.origin, Point::new(50.0, 50.0));
        assert_eq!(rect.width(), 123.456 * 0.1);
        assert_eq!(rect.height(), 78.9 * 0.1);
        assert_eq!(style.fill, Some(MAIN_PIECE_FILL.into()));
        assert_eq!(style.stroke, Some(Stroke::new(OUTLINE, 2.0)));

        let (label, origin) = doc.texts().next().unwrap();
        assert_eq!(label.text, MAIN_PIECE_LABEL);
        assert_eq!(label.anchor, Some(TextAnchor::Middle));
        assert_eq!(*origin, Point::new(50.0 + 123.456 * 0.1 / 2.0, 30.0));
    }

    #[test]
    fn reinforcement_spacing_ignores_width() {
        let doc = draw(vec![
            piece(500.0, 300.0, 0.0),
            piece(1500.0, 20.0, 0.0),
            piece(10.0, 20.0, 100.0),
            piece(900.0, 20.0, 0.0),
        ]);
        let xs: Vec<f64> = doc.rects().skip(1).map(|(rect, _)| rect.min_x()).collect();

        assert_eq!(xs, vec![50.0, 250.0, 450.0]);

        let (rect, style) = doc.rects().nth(2).unwrap();
        assert_eq!(rect.min_y(), 60.0);
        assert_eq!(style.fill, Some(REINFORCEMENT_FILL.into()));
    }

    #[test]
    fn reinforcement_labels() {
        let doc = draw(vec![
            piece(500.0, 300.0, 0.0),
            piece(50.0, 20.0, 400.0),
            piece(60.0, 20.0, 0.0),
        ]);
        let labels: Vec<(&str, Point)> = doc
            .texts()
            .map(|(span, origin)| (span.text.as_str(), *origin))
            .collect();

        assert_eq!(labels[1], ("Reinforcement 1", Point::new(52.5, 80.0)));
        assert_eq!(labels[2], ("Reinforcement 2", Point::new(253.0, 40.0)));
    }

    #[test]
    fn width_annotation() {
        let doc = draw(vec![piece(500.0, 300.0, 0.0)]);

        let (from, to, stroke) = doc.lines().next().unwrap();
        assert_eq!(*from, Point::new(50.0, 100.0));
        assert_eq!(*to, Point::new(100.0, 100.0));
        assert_eq!(*stroke, Stroke::new(DIMENSION_LINE, 1.0));

        let Some(ShapeKind::Text { span, origin }) = doc.shapes().last().map(|s| s.kind()) else { panic!() };
        assert_eq!(span.text, "500.0mm");
        assert_eq!(span.font_size, Some(12.0));
        assert_eq!(*origin, Point::new(75.0, 115.0));
    }

    #[test]
    fn format_width() {
        assert_eq!(format_millimeters(123.456), "123.5mm");
        assert_eq!(format_millimeters(100.0), "100.0mm");
        assert_eq!(format_millimeters(12.25), "12.3mm");
        assert_eq!(format_millimeters(0.75), "0.8mm");
        assert_eq!(format_millimeters(3.25), "3.3mm");
        assert_eq!(format_millimeters(12.5), "12.5mm");
        // not a binary tie: 0.15 is stored slightly below 0.15
        assert_eq!(format_millimeters(0.15), "0.1mm");
    }

    #[test]
    fn alternate_geometry() {
        let config = LayoutConfig {
            scale: 1.0,
            anchor_x: 10.0,
            anchor_y: 20.0,
            reinforcement_spacing: 15.0,
            ..LayoutConfig::default()
        };
        let engine = PatternLayoutEngine::new(config);
        let pattern = Pattern::new(vec![piece(40.0, 30.0, 0.0), piece(5.0, 5.0, 0.0), piece(5.0, 5.0, 2.0)])
            .unwrap();
        let mut doc = Document::new(engine.canvas_size());

        engine.draw_pattern(&pattern, &mut doc).unwrap();

        let origins: Vec<Point> = doc.rects().map(|(rect, _)| rect.origin).collect();
        let (label, label_origin) = doc.texts().next().unwrap();
        assert_eq!(label.text, MAIN_PIECE_LABEL);
        assert_eq!(*label_origin, Point::new(30.0, 0.0));
        assert_eq!(
            origins,
            vec![
                Point::new(10.0, 20.0),
                Point::new(10.0, 20.0),
                Point::new(25.0, 22.0)
            ]
        );
    }

    #[test]
    fn parse_config() {
        let config = LayoutConfig::from_json(r#"{"scale": 0.5, "canvas_width": 1024}"#).unwrap();

        assert_eq!(config.scale, 0.5);
        assert_eq!(config.canvas_size(), Size::new(1024.0, 600.0));
        assert_eq!(config.reinforcement_spacing, 200.0);

        assert!(matches!(
            LayoutConfig::from_json(r#"{"scale": 0}"#),
            Err(ConfigError::InvalidScale(_))
        ));
        assert!(matches!(
            LayoutConfig::from_json(r#"{"canvas_height": -1}"#),
            Err(ConfigError::InvalidCanvas(_, _))
        ));
        assert!(matches!(
            LayoutConfig::from_json("{"),
            Err(ConfigError::Parse(_))
        ));
    }
}
