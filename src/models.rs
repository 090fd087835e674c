//! Core data models for layoutscore
//!
//! These models describe the geometry being rated (a canvas and the element
//! rectangles placed on it) and the ratings produced for it.

use crate::error::{RateError, RateResult};
use serde::{Deserialize, Serialize};

/// The rectangular reference frame every element is positioned on.
///
/// Midpoints and aspect ratio are computed once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    width: f64,
    height: f64,
    aspect_ratio: f64,
    x_mid: f64,
    y_mid: f64,
}

impl Canvas {
    /// Create a canvas, rejecting non-positive or non-finite dimensions
    pub fn new(width: f64, height: f64) -> RateResult<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(RateError::InvalidCanvas { width, height });
        }
        Ok(Self {
            width,
            height,
            aspect_ratio: width / height,
            x_mid: width / 2.0,
            y_mid: height / 2.0,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Horizontal center line
    pub fn x_mid(&self) -> f64 {
        self.x_mid
    }

    /// Vertical center line
    pub fn y_mid(&self) -> f64 {
        self.y_mid
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Raw canvas descriptor as it appears on the wire
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CanvasSpec {
    pub width: f64,
    pub height: f64,
}

impl TryFrom<CanvasSpec> for Canvas {
    type Error = RateError;

    fn try_from(spec: CanvasSpec) -> Result<Self, Self::Error> {
        Canvas::new(spec.width, spec.height)
    }
}

/// One UI element in canvas-relative fractional coordinates.
///
/// Fields are expected in `[0, 1]` but only checked in strict mode
/// (see [`Layout::check_bounds`]). Absolute quantities are always derived
/// against a specific canvas and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Element {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn absolute_x(&self, canvas: &Canvas) -> f64 {
        self.x * canvas.width()
    }

    pub fn absolute_y(&self, canvas: &Canvas) -> f64 {
        self.y * canvas.height()
    }

    pub fn absolute_width(&self, canvas: &Canvas) -> f64 {
        self.width * canvas.width()
    }

    pub fn absolute_height(&self, canvas: &Canvas) -> f64 {
        self.height * canvas.height()
    }

    /// Absolute x coordinate of the element's center
    pub fn x_midpoint(&self, canvas: &Canvas) -> f64 {
        self.absolute_x(canvas) + self.absolute_width(canvas) / 2.0
    }

    /// Absolute y coordinate of the element's center
    pub fn y_midpoint(&self, canvas: &Canvas) -> f64 {
        self.absolute_y(canvas) + self.absolute_height(canvas) / 2.0
    }

    pub fn area(&self, canvas: &Canvas) -> f64 {
        self.absolute_width(canvas) * self.absolute_height(canvas)
    }

    /// Fractional width/height ratio, independent of the canvas
    pub fn proportion(&self) -> f64 {
        self.width / self.height
    }

    fn within_unit_square(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| (0.0..=1.0).contains(v))
    }
}

/// A single named score produced by a heuristic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Metric id, e.g. `balance_horizontal`
    #[serde(rename = "type")]
    pub metric_id: String,
    /// Human score in `0..=100`
    pub score: u8,
    /// Explanation of the score
    pub comment: String,
}

impl Rating {
    pub fn new(metric_id: &str, score: u8, comment: impl Into<String>) -> Self {
        Self {
            metric_id: metric_id.to_string(),
            score,
            comment: comment.into(),
        }
    }

    /// Human-readable title for the metric id, falling back to the id itself
    pub fn title(&self) -> &str {
        match self.metric_id.as_str() {
            "balance_horizontal" => "Horizontal balance",
            "balance_vertical" => "Vertical balance",
            "equilibrium_horizontal" => "Horizontal equilibrium",
            "equilibrium_vertical" => "Vertical equilibrium",
            "symmetry_horizontal" => "Horizontal symmetry",
            "symmetry_vertical" => "Vertical symmetry",
            "harmony_density" => "Density",
            "harmony_proportion" => "Proportion",
            other => other,
        }
    }
}

/// All ratings produced by one heuristic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricGroup {
    /// Heuristic name
    pub section: String,
    #[serde(rename = "metrics")]
    pub ratings: Vec<Rating>,
}

impl MetricGroup {
    pub fn new(section: impl Into<String>, ratings: Vec<Rating>) -> Self {
        Self {
            section: section.into(),
            ratings,
        }
    }

    /// Floor of the mean rating score, `None` for an empty group
    pub fn average(&self) -> Option<u8> {
        floor_mean(self.ratings.iter().map(|r| r.score))
    }

    /// Section name with its first letter uppercased
    pub fn title(&self) -> String {
        let mut chars = self.section.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Final result of rating one layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingResponse {
    /// Overall score in `0..=100`
    pub score: u8,
    #[serde(rename = "metrics")]
    pub groups: Vec<MetricGroup>,
}

/// Integer mean with truncation, as used at both aggregation levels
pub fn floor_mean(scores: impl IntoIterator<Item = u8>) -> Option<u8> {
    let (sum, count) = scores
        .into_iter()
        .fold((0u32, 0u32), |(sum, count), s| (sum + u32::from(s), count + 1));
    if count == 0 {
        return None;
    }
    // sum/count of values in 0..=100 stays in 0..=100
    Some((sum / count) as u8)
}

/// Request body shape: `{canvas: {width, height}, items: [...]}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutRequest {
    #[serde(default)]
    pub canvas: Option<CanvasSpec>,
    #[serde(default, alias = "elements")]
    pub items: Option<Vec<Element>>,
}

impl LayoutRequest {
    /// Validate the request shape and build the canvas
    pub fn into_layout(self) -> RateResult<Layout> {
        let canvas = self
            .canvas
            .ok_or_else(|| RateError::MalformedInput("missing 'canvas'".into()))?;
        let elements = self
            .items
            .ok_or_else(|| RateError::MalformedInput("missing 'items'".into()))?;
        Ok(Layout {
            canvas: Canvas::try_from(canvas)?,
            elements,
        })
    }
}

/// A validated canvas plus its ordered elements
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub canvas: Canvas,
    pub elements: Vec<Element>,
}

impl Layout {
    pub fn new(canvas: Canvas, elements: Vec<Element>) -> Self {
        Self { canvas, elements }
    }

    /// Parse a JSON layout request
    pub fn from_json(content: &str) -> RateResult<Self> {
        let request: LayoutRequest = serde_json::from_str(content)
            .map_err(|e| RateError::MalformedInput(e.to_string()))?;
        request.into_layout()
    }

    /// Reject any element with a fractional field outside `[0, 1]`
    pub fn check_bounds(&self) -> RateResult<()> {
        match self
            .elements
            .iter()
            .enumerate()
            .find(|(_, el)| !el.within_unit_square())
        {
            Some((index, element)) => Err(RateError::ElementOutOfBounds {
                index,
                element: *element,
            }),
            None => Ok(()),
        }
    }
}
