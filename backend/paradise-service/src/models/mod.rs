/// Data models for paradise-service
///
/// This module defines structures for:
/// - PostWithLikes: a stored post joined with its like count
/// - PostView: the redacted payload returned to clients
/// - PostColor: the five crab tints the renderer knows how to draw
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Crab tint chosen by the poster. Stored by name; the hex values are what
/// the front end feeds to its materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostColor {
    Orange,
    Blue,
    Pink,
    Green,
    Yellow,
}

impl PostColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostColor::Orange => "orange",
            PostColor::Blue => "blue",
            PostColor::Pink => "pink",
            PostColor::Green => "green",
            PostColor::Yellow => "yellow",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "orange" => Some(PostColor::Orange),
            "blue" => Some(PostColor::Blue),
            "pink" => Some(PostColor::Pink),
            "green" => Some(PostColor::Green),
            "yellow" => Some(PostColor::Yellow),
            _ => None,
        }
    }

    /// RGB tint applied to the crab model for this color.
    pub fn hex(&self) -> &'static str {
        match self {
            PostColor::Orange => "ff9e00",
            PostColor::Blue => "1da4ff",
            PostColor::Pink => "ff69b4",
            PostColor::Green => "36d241",
            PostColor::Yellow => "fffb01",
        }
    }
}

/// A stored post joined with its like count. `author_key` is the caller's
/// network origin and never leaves the service; `author_id` is the derived
/// identifier safe to expose.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostWithLikes {
    pub id: Uuid,
    pub author_key: String,
    pub author_id: Uuid,
    pub content: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub like_count: i64,
}

impl PostWithLikes {
    /// Convert to the client payload, dropping the author key. Returns None
    /// if the stored color is not one of the five known tints.
    pub fn into_view(self, is_viewer: bool) -> Option<PostView> {
        let color = PostColor::from_str(&self.color)?;
        Some(PostView {
            post_id: self.id,
            author_id: self.author_id,
            content: self.content,
            color,
            likes: self.like_count,
            is_viewer,
            created_at: self.created_at,
        })
    }
}

/// Redacted post payload: like-set collapsed to a count, author identity
/// replaced by the viewer flag and the derived author id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub color: PostColor,
    pub likes: i64,
    pub is_viewer: bool,
    pub created_at: DateTime<Utc>,
}

/// Derive the exposed author identifier from the internal author key.
/// Deterministic, so the same caller always maps to the same id without
/// the key itself ever appearing in a payload.
pub fn derive_author_id(author_key: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, author_key.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_names_round_trip() {
        for color in [
            PostColor::Orange,
            PostColor::Blue,
            PostColor::Pink,
            PostColor::Green,
            PostColor::Yellow,
        ] {
            assert_eq!(PostColor::from_str(color.as_str()), Some(color));
        }
        assert_eq!(PostColor::from_str("mauve"), None);
    }

    #[test]
    fn color_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&PostColor::Blue).unwrap();
        assert_eq!(json, "\"blue\"");
        let parsed: PostColor = serde_json::from_str("\"yellow\"").unwrap();
        assert_eq!(parsed, PostColor::Yellow);
    }

    #[test]
    fn color_hex_matches_renderer_palette() {
        assert_eq!(PostColor::Orange.hex(), "ff9e00");
        assert_eq!(PostColor::Blue.hex(), "1da4ff");
        assert_eq!(PostColor::Pink.hex(), "ff69b4");
        assert_eq!(PostColor::Green.hex(), "36d241");
        assert_eq!(PostColor::Yellow.hex(), "fffb01");
    }

    #[test]
    fn author_id_is_stable_per_key() {
        let a = derive_author_id("203.0.113.7");
        let b = derive_author_id("203.0.113.7");
        let c = derive_author_id("203.0.113.8");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn view_drops_author_key() {
        let row = PostWithLikes {
            id: Uuid::new_v4(),
            author_key: "203.0.113.7".to_string(),
            author_id: derive_author_id("203.0.113.7"),
            content: "crab facts".to_string(),
            color: "green".to_string(),
            created_at: Utc::now(),
            like_count: 3,
        };
        let view = row.into_view(true).unwrap();
        assert_eq!(view.likes, 3);
        assert!(view.is_viewer);
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("203.0.113.7"));
        assert!(json.contains("\"postId\""));
        assert!(json.contains("\"isViewer\""));
    }

    #[test]
    fn view_rejects_unknown_color() {
        let row = PostWithLikes {
            id: Uuid::new_v4(),
            author_key: "203.0.113.7".to_string(),
            author_id: derive_author_id("203.0.113.7"),
            content: "crab facts".to_string(),
            color: "chartreuse".to_string(),
            created_at: Utc::now(),
            like_count: 0,
        };
        assert!(row.into_view(false).is_none());
    }
}
