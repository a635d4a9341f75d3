//! Signature pad: strokes drawn on a canvas, kept as point lists.

use grow_types::Blob;
use serde::{Deserialize, Serialize};

use crate::error::VerificationError;

pub const SIGNATURE_MIME: &str = "application/vnd.grow.signature+json";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SignaturePad {
    strokes: Vec<Vec<Point>>,
}

impl SignaturePad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer down: start a new stroke.
    pub fn begin_stroke(&mut self, at: Point) {
        self.strokes.push(vec![at]);
    }

    /// Pointer move: extend the current stroke. Starts one if none is open.
    pub fn line_to(&mut self, to: Point) {
        match self.strokes.last_mut() {
            Some(stroke) => stroke.push(to),
            None => self.strokes.push(vec![to]),
        }
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.iter().all(|s| s.is_empty())
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Encode the strokes as a blob for storage and review.
    pub fn to_blob(&self) -> Result<Blob, VerificationError> {
        let bytes = serde_json::to_vec(&self.strokes)
            .map_err(|e| VerificationError::Signature(e.to_string()))?;
        Ok(Blob::new(SIGNATURE_MIME, bytes))
    }
}
