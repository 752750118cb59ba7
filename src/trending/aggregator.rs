//! Engagement aggregation over a set of posts

use std::collections::BTreeMap;

use crate::core::types::{EngagementSummary, TrendingPost};

/// Summarize engagement across `posts`. An empty slice yields all zeros.
pub fn summarize(posts: &[TrendingPost]) -> EngagementSummary {
    if posts.is_empty() {
        return EngagementSummary::default();
    }

    let mut likes = 0u64;
    let mut comments = 0u64;
    let mut shares = 0u64;
    let mut reactions = 0u64;
    let mut top_hashtags: BTreeMap<String, u64> = BTreeMap::new();
    let mut post_types: BTreeMap<String, u64> = BTreeMap::new();

    for post in posts {
        likes += post.engagement.likes;
        comments += post.engagement.comments;
        shares += post.engagement.shares;
        reactions += post.engagement.total_reactions;

        for tag in &post.hashtags {
            *top_hashtags.entry(tag.clone()).or_insert(0) += 1;
        }
        *post_types.entry(post.post_type.to_string()).or_insert(0) += 1;
    }

    let total = posts.len() as u64;

    EngagementSummary {
        total_posts: total,
        avg_likes: rounded_mean(likes, total),
        avg_comments: rounded_mean(comments, total),
        avg_shares: rounded_mean(shares, total),
        avg_total_reactions: rounded_mean(reactions, total),
        top_hashtags,
        post_types,
    }
}

fn rounded_mean(sum: u64, count: u64) -> u64 {
    (sum as f64 / count as f64).round() as u64
}
