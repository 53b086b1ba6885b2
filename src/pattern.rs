//! Pattern data model
//!
//! A pattern is an ordered list of rectangular pieces measured in millimeters. The first piece is
//! the main body; every other piece is a reinforcement.
//!
//! ```json
//! {"pieces": [
//!   {"width": 500, "height": 300, "position": {"x": 0, "y": 0}},
//!   {"width": 50, "height": 20, "position": {"x": 0, "y": 400}}
//! ]}
//! ```
use crate::error::PatternError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub position: Position,
}

impl Piece {
    pub fn new(width: f64, height: f64, position: Position) -> Self {
        Self {
            width,
            height,
            position,
        }
    }

    fn validate(&self, index: usize) -> Result<(), PatternError> {
        for (dimension, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PatternError::InvalidDimension {
                    index,
                    dimension,
                    value,
                });
            }
        }
        for value in [self.position.x, self.position.y] {
            if !value.is_finite() {
                return Err(PatternError::InvalidPosition { index, value });
            }
        }
        Ok(())
    }
}

/// Unchecked wire form of [`Pattern`].
#[derive(Debug, Clone, Deserialize)]
pub struct PatternData {
    pub pieces: Vec<Piece>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PatternData")]
pub struct Pattern {
    pieces: Vec<Piece>,
}

impl Pattern {
    pub fn new(pieces: Vec<Piece>) -> Result<Self, PatternError> {
        if pieces.is_empty() {
            return Err(PatternError::Empty);
        }
        for (index, piece) in pieces.iter().enumerate() {
            piece.validate(index)?;
        }
        Ok(Self { pieces })
    }

    pub fn from_json(src: &str) -> Result<Self, PatternError> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn pieces(&self) -> impl ExactSizeIterator<Item = &Piece> {
        self.pieces.iter()
    }

    pub fn main_piece(&self) -> &Piece {
        // Construction rejects empty patterns.
        &self.pieces[0]
    }

    pub fn reinforcements(&self) -> &[Piece] {
        &self.pieces[1..]
    }
}

impl TryFrom<PatternData> for Pattern {
    type Error = PatternError;

    fn try_from(data: PatternData) -> Result<Self, Self::Error> {
        Pattern::new(data.pieces)
    }
}
