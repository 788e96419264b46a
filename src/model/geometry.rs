//! Rectangles for overlay placement.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle on a page, in points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of the origin corner
    pub x: f32,
    /// Y coordinate of the origin corner
    pub y: f32,
    /// Width of the rectangle
    pub width: f32,
    /// Height of the rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the y-coordinate of the edge opposite the origin.
    pub fn far_edge(&self) -> f32 {
        self.y + self.height
    }

    /// Area of the rectangle.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// PDF quad points for a text markup annotation covering this rectangle.
    ///
    /// Eight numbers, counter-clockwise from the origin corner.
    pub fn quad_points(&self) -> [f32; 8] {
        [
            self.x,
            self.y,
            self.right(),
            self.y,
            self.right(),
            self.far_edge(),
            self.x,
            self.far_edge(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.far_edge(), 70.0);
        assert_eq!(rect.area(), 5000.0);
    }

    #[test]
    fn test_quad_points() {
        let rect = Rect::new(72.0, 720.0, 100.0, 12.0);
        assert_eq!(
            rect.quad_points(),
            [72.0, 720.0, 172.0, 720.0, 172.0, 732.0, 72.0, 732.0]
        );
    }
}
