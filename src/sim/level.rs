//! Level documents
//!
//! A level arrives as JSON (hand-written or produced by a generator) and is
//! validated before the simulation ever sees it. Anything malformed is
//! replaced by [`LevelDocument::default_level`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point in level space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Point> for glam::Vec2 {
    fn from(p: Point) -> Self {
        glam::Vec2::new(p.x, p.y)
    }
}

/// A static rectangular platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// CSS hex color, e.g. `#4b5563`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl PlatformSpec {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            w,
            h,
            color: None,
        }
    }
}

/// Why a level document was rejected
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level JSON is malformed or missing required fields: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level {field} must be finite and positive, got {value}")]
    BadDimension { field: &'static str, value: f32 },
    #[error("level contains a non-finite coordinate in {0}")]
    NonFinite(&'static str),
}

/// Static description of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDocument {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub player_start: Point,
    pub platforms: Vec<PlatformSpec>,
    pub enemies: Vec<Point>,
    pub coins: Vec<Point>,
    pub goal: Point,
}

impl Default for LevelDocument {
    fn default() -> Self {
        Self::default_level()
    }
}

impl LevelDocument {
    /// Built-in fallback and tutorial level
    pub fn default_level() -> Self {
        Self {
            id: "world-1-1".to_string(),
            name: "World 1-1".to_string(),
            width: 3000.0,
            height: 600.0,
            player_start: Point::new(100.0, 300.0),
            platforms: vec![
                // Floor
                PlatformSpec::new(0.0, 500.0, 3000.0, 100.0),
                // Steps
                PlatformSpec::new(400.0, 350.0, 200.0, 40.0),
                PlatformSpec::new(700.0, 250.0, 200.0, 40.0),
                PlatformSpec::new(1000.0, 350.0, 200.0, 40.0),
                // High platform
                PlatformSpec::new(1400.0, 200.0, 400.0, 40.0),
                // Obstacles
                PlatformSpec::new(2000.0, 400.0, 100.0, 100.0),
                PlatformSpec::new(2200.0, 300.0, 100.0, 40.0),
                PlatformSpec::new(2400.0, 200.0, 100.0, 40.0),
            ],
            enemies: vec![
                Point::new(500.0, 300.0),
                Point::new(1500.0, 150.0),
                Point::new(1700.0, 150.0),
                Point::new(2100.0, 450.0),
            ],
            coins: vec![
                Point::new(450.0, 300.0),
                Point::new(500.0, 300.0),
                Point::new(550.0, 300.0),
                Point::new(800.0, 200.0),
                Point::new(1500.0, 150.0),
                Point::new(1600.0, 150.0),
                Point::new(1700.0, 150.0),
                Point::new(2450.0, 150.0),
            ],
            goal: Point::new(2800.0, 400.0),
        }
    }

    /// Parse and validate a level document
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Self::from_json_with_id(json, "custom")
    }

    /// Parse and validate, naming the level `fallback_id` if it has no id
    pub fn from_json_with_id(json: &str, fallback_id: &str) -> Result<Self, LevelError> {
        let mut doc: LevelDocument = serde_json::from_str(json)?;
        doc.validate()?;
        if doc.id.is_empty() {
            doc.id = fallback_id.to_string();
        }
        Ok(doc)
    }

    /// Parse a level, substituting the default level on any failure
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("Rejected level document ({}), using default level", e);
                Self::default_level()
            }
        }
    }

    /// Check dimensions and coordinates
    ///
    /// Degenerate platform sizes are allowed; they simply never collide.
    pub fn validate(&self) -> Result<(), LevelError> {
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LevelError::BadDimension { field, value });
            }
        }

        let point_ok = |p: &Point| p.x.is_finite() && p.y.is_finite();
        if !point_ok(&self.player_start) {
            return Err(LevelError::NonFinite("playerStart"));
        }
        if !point_ok(&self.goal) {
            return Err(LevelError::NonFinite("goal"));
        }
        if !self.enemies.iter().all(point_ok) {
            return Err(LevelError::NonFinite("enemies"));
        }
        if !self.coins.iter().all(point_ok) {
            return Err(LevelError::NonFinite("coins"));
        }
        if !self
            .platforms
            .iter()
            .all(|p| [p.x, p.y, p.w, p.h].iter().all(|v| v.is_finite()))
        {
            return Err(LevelError::NonFinite("platforms"));
        }
        Ok(())
    }
}
