//! Positioned text fragments as produced by a PDF text layer or OCR pass.

use serde::{Deserialize, Serialize};

/// One atomic piece of text on a page, with its layout position.
///
/// Coordinates use the source layer's convention: larger `y` is higher on
/// the page. Width and height are carried for future refinement; the
/// row/column logic only reads `x` and `y`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionedFragment {
    /// Text content.
    pub text: String,

    /// Horizontal position in layout units.
    pub x: f32,

    /// Vertical position in layout units (larger = higher on page).
    pub y: f32,

    /// Bounding box width.
    #[serde(default)]
    pub width: f32,

    /// Bounding box height.
    #[serde(default)]
    pub height: f32,
}

impl PositionedFragment {
    /// Create a fragment at a position, with no bounding box size.
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width: 0.0,
            height: 0.0,
        }
    }

    /// Set the bounding box size.
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}
