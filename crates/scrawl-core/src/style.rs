//! Visual styles for ink and lasso strokes.

use kurbo::{Cap, Join, Stroke};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Near-black ink.
    pub fn ink() -> Self {
        Self::new(30, 30, 30, 255)
    }

    /// Accent blue used for the lasso preview.
    pub fn accent() -> Self {
        Self::new(59, 130, 246, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// How a stroke is drawn: width, color and optional dash pattern.
///
/// Joins and caps are always round. An empty `dash` list draws a solid line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Line width in CSS pixels.
    pub width: f64,
    /// Stroke color.
    pub color: SerializableColor,
    /// Alternating dash/gap lengths in CSS pixels.
    #[serde(default)]
    pub dash: Vec<f64>,
}

impl StrokeStyle {
    /// Default style for committed ink: solid and narrow.
    pub fn ink() -> Self {
        Self {
            width: 2.0,
            color: SerializableColor::ink(),
            dash: Vec::new(),
        }
    }

    /// Default style for the lasso preview: thin, dashed, accent color.
    pub fn lasso() -> Self {
        Self {
            width: 1.0,
            color: SerializableColor::accent(),
            dash: vec![6.0, 4.0],
        }
    }

    /// Whether this style draws a dashed line.
    pub fn is_dashed(&self) -> bool {
        !self.dash.is_empty()
    }

    /// Get the color as a peniko Color.
    pub fn color(&self) -> Color {
        self.color.into()
    }

    /// Radius of the dot painted when a gesture starts.
    pub fn dot_radius(&self) -> f64 {
        self.width / 2.0
    }

    /// Build the equivalent `kurbo` stroke (round joins and caps).
    pub fn to_kurbo(&self) -> Stroke {
        let stroke = Stroke::new(self.width)
            .with_join(Join::Round)
            .with_caps(Cap::Round);
        if self.is_dashed() {
            stroke.with_dashes(0.0, self.dash.iter().copied())
        } else {
            stroke
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::ink()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_roundtrip_through_peniko() {
        let c = SerializableColor::new(10, 20, 30, 40);
        let peniko: Color = c.into();
        assert_eq!(SerializableColor::from(peniko), c);
    }

    #[test]
    fn test_default_styles() {
        let ink = StrokeStyle::ink();
        assert!(!ink.is_dashed());
        assert!((ink.dot_radius() - 1.0).abs() < f64::EPSILON);

        let lasso = StrokeStyle::lasso();
        assert!(lasso.is_dashed());
        assert!(lasso.width < ink.width);
        assert_ne!(lasso.color, ink.color);
    }

    #[test]
    fn test_to_kurbo_stroke() {
        let stroke = StrokeStyle::lasso().to_kurbo();
        assert!((stroke.width - 1.0).abs() < f64::EPSILON);
        assert_eq!(stroke.join, Join::Round);
        assert_eq!(stroke.start_cap, Cap::Round);
        assert_eq!(stroke.dash_pattern.len(), 2);

        let solid = StrokeStyle::ink().to_kurbo();
        assert!(solid.dash_pattern.is_empty());
    }
}
