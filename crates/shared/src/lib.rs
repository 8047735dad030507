use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod assembly;
pub mod capture;
pub mod paths;

/// Title stored when a drawing is submitted without one
pub const DEFAULT_TITLE: &str = "My Drawing";

/// Store-assigned identifier of a puzzle document.
///
/// Any string is a valid lookup key; an unknown key simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PuzzleId(String);

impl PuzzleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PuzzleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for PuzzleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// 2D point in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point2D {
        Point2D::new(self.x + dx, self.y + dy)
    }
}

/// A stored drawing.
///
/// `image` is a data URI and never changes after insert. `bookmarks` only
/// ever grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleDocument {
    #[serde(rename = "_id", alias = "id")]
    pub id: PuzzleId,
    pub image: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub bookmarks: u64,
}

/// Body accepted by the create route.
///
/// Clients also send `createdAt` and `bookmarks`; both are ignored because the
/// store stamps its own values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPuzzle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub image: String,
}

impl NewPuzzle {
    pub fn resolved_title(&self) -> String {
        resolve_title(self.title.as_deref())
    }

    /// Turn the payload into a stored document
    pub fn into_document(self, id: PuzzleId, created_at: DateTime<Utc>) -> PuzzleDocument {
        let title = self.resolved_title();
        PuzzleDocument {
            id,
            image: self.image,
            title,
            created_at,
            bookmarks: 0,
        }
    }
}

/// Missing or empty titles fall back to [`DEFAULT_TITLE`].
pub fn resolve_title(title: Option<&str>) -> String {
    match title {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => DEFAULT_TITLE.to_string(),
    }
}

/// Documents shown in the home-page gallery
pub fn bookmarked(puzzles: &[PuzzleDocument]) -> impl Iterator<Item = &PuzzleDocument> {
    puzzles.iter().filter(|p| p.bookmarks > 0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkResponse {
    pub success: bool,
    pub message: String,
}

impl BookmarkResponse {
    pub fn bookmarked() -> Self {
        Self {
            success: true,
            message: "puzzle bookmarked".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
    pub count: u64,
}

impl DeleteResponse {
    pub fn deleted(count: u64) -> Self {
        Self {
            message: "Successfully deleted".to_string(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_puzzles: u64,
    pub status: String,
}

impl StatsResponse {
    pub fn active(total_puzzles: u64) -> Self {
        Self {
            total_puzzles,
            status: "Active".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str, bookmarks: u64) -> PuzzleDocument {
        PuzzleDocument {
            id: PuzzleId::new(id),
            image: "data:image/png;base64,AAA".to_string(),
            title: DEFAULT_TITLE.to_string(),
            created_at: DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            bookmarks,
        }
    }

    #[test]
    fn test_document_wire_names() {
        let json = serde_json::to_value(sample("abc", 3)).unwrap();
        assert_eq!(json["_id"], "abc");
        assert_eq!(json["bookmarks"], 3);
        assert_eq!(json["createdAt"], "2024-05-01T10:00:00Z");
        assert!(json.get("id").is_none());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_document_accepts_plain_id() {
        let json = r#"{"id":"xyz","image":"data:,","title":"t","createdAt":"2024-05-01T10:00:00Z"}"#;
        let doc: PuzzleDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.id.as_str(), "xyz");
        assert_eq!(doc.bookmarks, 0);
    }

    #[test]
    fn test_new_puzzle_ignores_client_metadata() {
        let json = r#"{"image":"data:image/png;base64,AAA","createdAt":"not a date","bookmarks":99}"#;
        let new: NewPuzzle = serde_json::from_str(json).unwrap();
        assert_eq!(new.title, None);

        let created = Utc::now();
        let doc = new.into_document(PuzzleId::new("p1"), created);
        assert_eq!(doc.bookmarks, 0);
        assert_eq!(doc.created_at, created);
        assert_eq!(doc.title, "My Drawing");
    }

    #[test]
    fn test_new_puzzle_requires_image() {
        let result = serde_json::from_str::<NewPuzzle>(r#"{"title":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_title() {
        assert_eq!(resolve_title(None), "My Drawing");
        assert_eq!(resolve_title(Some("")), "My Drawing");
        assert_eq!(resolve_title(Some("Cat")), "Cat");
        assert_eq!(resolve_title(Some("  ")), "  ");
    }

    #[test]
    fn test_bookmarked_filters_zero() {
        let docs = vec![sample("a", 0), sample("b", 2), sample("c", 0), sample("d", 1)];
        let ids: Vec<&str> = bookmarked(&docs).map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d"]);
    }

    #[test]
    fn test_response_shapes() {
        let json = serde_json::to_value(StatsResponse::active(7)).unwrap();
        assert_eq!(json, serde_json::json!({ "totalPuzzles": 7, "status": "Active" }));

        let json = serde_json::to_value(DeleteResponse::deleted(1)).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Successfully deleted", "count": 1 }));

        let json = serde_json::to_value(BookmarkResponse::bookmarked()).unwrap();
        assert_eq!(json["success"], true);
    }

    #[test]
    fn test_point_distance() {
        let a = Point2D::new(0.0, 0.0);
        assert_eq!(a.distance_to(Point2D::new(3.0, 4.0)), 5.0);
        assert_eq!(a.offset(1.5, -2.0), Point2D::new(1.5, -2.0));
    }
}
