use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Location and size of an element in CSS pixels, relative to the document.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One text region returned by the OCR service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectedTextRegion {
    pub text: String,
    pub top_left: Point,
    pub bottom_right: Point,
}

impl DetectedTextRegion {
    pub fn new(text: impl Into<String>, top_left: (f64, f64), bottom_right: (f64, f64)) -> Self {
        Self {
            text: text.into(),
            top_left: Point {
                x: top_left.0,
                y: top_left.1,
            },
            bottom_right: Point {
                x: bottom_right.0,
                y: bottom_right.1,
            },
        }
    }

    pub fn width(&self) -> f64 {
        (self.bottom_right.x - self.top_left.x).max(0.0)
    }

    pub fn height(&self) -> f64 {
        (self.bottom_right.y - self.top_left.y).max(0.0)
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_area() {
        let region = DetectedTextRegion::new("Login", (10.0, 4.0), (50.0, 24.0));
        assert_eq!(region.width(), 40.0);
        assert_eq!(region.height(), 20.0);
        assert_eq!(region.area(), 800.0);
    }

    #[test]
    fn test_inverted_region_has_no_area() {
        let region = DetectedTextRegion::new("x", (50.0, 24.0), (10.0, 4.0));
        assert_eq!(region.area(), 0.0);
    }

    #[test]
    fn test_geometry_empty() {
        assert!(Geometry::default().is_empty());
        assert!(!Geometry::new(0.0, 0.0, 80.0, 30.0).is_empty());
    }
}
