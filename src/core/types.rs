//! Core types used across the application
//!
//! Domain records produced by the normalizer and returned to callers.
//! Field names serialize in camelCase to match the JSON contract of the
//! trending-posts route.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default number of posts requested when the caller does not say
pub const DEFAULT_LIMIT: u32 = 10;

/// Kind of media attached to a post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    /// Plain text post
    #[default]
    Text,
    /// Poll
    Poll,
    /// Native video
    Video,
    /// One or more images
    Image,
}

impl PostType {
    /// Wire name of the post type
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Text => "text",
            PostType::Poll => "poll",
            PostType::Video => "video",
            PostType::Image => "image",
        }
    }
}

impl std::fmt::Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Post author
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Display name
    pub name: String,
    /// Link to the author's profile
    pub profile_url: String,
    /// Company or headline; never equal to `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// Count for a single reaction type (LIKE, PRAISE, EMPATHY, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCount {
    /// Vendor reaction type name
    #[serde(rename = "type")]
    pub reaction_type: String,
    /// Number of reactions of this type
    pub count: u64,
}

/// Engagement counters for a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Engagement {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    /// Sum of `reaction_breakdown` counts; the ranking signal
    pub total_reactions: u64,
    #[serde(default)]
    pub reaction_breakdown: Vec<ReactionCount>,
}

/// A normalized trending post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingPost {
    /// Best-effort unique id (vendor URN or synthetic)
    pub id: String,
    /// Post body, never empty
    pub content: String,
    pub author: Author,
    pub engagement: Engagement,
    /// Link to the original post, may be empty
    #[serde(default)]
    pub post_url: String,
    /// Relative-time label as supplied by the vendor ("2d", "1w")
    #[serde(default)]
    pub posted_at: String,
    #[serde(default)]
    pub post_type: PostType,
    /// Hashtags in order of appearance, without the leading `#`
    #[serde(default)]
    pub hashtags: Vec<String>,
}

/// Aggregate statistics over a set of posts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementSummary {
    pub total_posts: u64,
    pub avg_likes: u64,
    pub avg_comments: u64,
    pub avg_shares: u64,
    pub avg_total_reactions: u64,
    /// Hashtag -> number of occurrences across the set
    #[serde(default)]
    pub top_hashtags: BTreeMap<String, u64>,
    /// Post type -> number of posts
    #[serde(default)]
    pub post_types: BTreeMap<String, u64>,
}

impl EngagementSummary {
    /// The `n` most frequent hashtags, most frequent first, ties by name
    pub fn top_hashtags(&self, n: usize) -> Vec<(&str, u64)> {
        let mut tags: Vec<(&str, u64)> = self
            .top_hashtags
            .iter()
            .map(|(tag, count)| (tag.as_str(), *count))
            .collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        tags.truncate(n);
        tags
    }
}

/// Caller-facing search parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub min_engagement: u64,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl SearchRequest {
    /// Create a request with default paging and no engagement filter
    pub fn new(query: impl Into<String>) -> Self {
        SearchRequest {
            query: query.into(),
            limit: DEFAULT_LIMIT,
            offset: 0,
            min_engagement: 0,
        }
    }

    /// Set the page size
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the page offset
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Set the minimum total reactions a post must have
    pub fn with_min_engagement(mut self, min_engagement: u64) -> Self {
        self.min_engagement = min_engagement;
        self
    }
}

/// Result of a trending-post search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Ranked by `engagement.total_reactions`, descending
    pub posts: Vec<TrendingPost>,
    pub total_results: u64,
    /// Whether the posts came from the cache
    pub cached: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_summary: Option<EngagementSummary>,
    /// Set when stale results are served after an upstream rate limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_defaults() {
        let req: SearchRequest = serde_json::from_str(r#"{"query":"ai"}"#).unwrap();
        assert_eq!(req, SearchRequest::new("ai"));
        assert_eq!(req.limit, 10);

        let req: SearchRequest =
            serde_json::from_str(r#"{"query":"ai","limit":5,"offset":10,"minEngagement":60}"#)
                .unwrap();
        assert_eq!(req.limit, 5);
        assert_eq!(req.offset, 10);
        assert_eq!(req.min_engagement, 60);
    }

    #[test]
    fn test_post_wire_format() {
        let post = TrendingPost {
            id: "urn:li:activity:1".to_string(),
            content: "Hello #rust".to_string(),
            author: Author {
                name: "Ada".to_string(),
                profile_url: "https://www.linkedin.com/in/ada".to_string(),
                company: None,
            },
            engagement: Engagement {
                likes: 3,
                comments: 1,
                shares: 0,
                total_reactions: 4,
                reaction_breakdown: vec![ReactionCount {
                    reaction_type: "LIKE".to_string(),
                    count: 4,
                }],
            },
            post_url: String::new(),
            posted_at: "2d".to_string(),
            post_type: PostType::Video,
            hashtags: vec!["rust".to_string()],
        };

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["postType"], "video");
        assert_eq!(json["engagement"]["totalReactions"], 4);
        assert_eq!(json["engagement"]["reactionBreakdown"][0]["type"], "LIKE");
        assert!(json["author"].get("company").is_none());
    }

    #[test]
    fn test_top_hashtags_ordering() {
        let mut summary = EngagementSummary::default();
        summary.top_hashtags.insert("ai".to_string(), 3);
        summary.top_hashtags.insert("rust".to_string(), 5);
        summary.top_hashtags.insert("ml".to_string(), 3);

        let top = summary.top_hashtags(2);
        assert_eq!(top, vec![("rust", 5), ("ai", 3)]);
    }
}
