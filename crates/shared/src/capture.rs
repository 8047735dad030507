//! Freehand drawing state for the capture page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{resolve_title, Point2D};

pub const SURFACE_WIDTH: f64 = 400.0;
pub const SURFACE_HEIGHT: f64 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl LineCap {
    /// Value for `CanvasRenderingContext2D.lineCap`
    pub fn as_str(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub cap: LineCap,
    pub color: &'static str,
}

pub const STROKE_STYLE: StrokeStyle = StrokeStyle {
    width: 4.0,
    cap: LineCap::Round,
    color: "#000",
};

/// Position of the drawing surface in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
}

impl SurfaceRect {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }

    pub fn to_surface(&self, client_x: f64, client_y: f64) -> Point2D {
        Point2D::new(client_x - self.left, client_y - self.top)
    }
}

/// Line piece to render right away
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point2D,
    pub to: Point2D,
}

/// Pointer state for one drawing surface. Pixels live on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawingSurface {
    drawing: bool,
    last: Option<Point2D>,
}

impl DrawingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Start a new path at `point`
    pub fn pointer_down(&mut self, point: Point2D) {
        self.drawing = true;
        self.last = Some(point);
    }

    /// Extend the current path. Returns the segment to draw, or `None` when
    /// the pointer is not pressed.
    pub fn pointer_move(&mut self, point: Point2D) -> Option<Segment> {
        if !self.drawing {
            return None;
        }
        let from = self.last.replace(point)?;
        Some(Segment { from, to: point })
    }

    /// Released anywhere in the window
    pub fn pointer_up(&mut self) {
        self.drawing = false;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Payload posted when the user submits a drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub title: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub bookmarks: u64,
}

impl Submission {
    pub fn new(title: Option<&str>, image: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            title: resolve_title(title),
            image: image.into(),
            created_at,
            bookmarks: 0,
        }
    }
}
