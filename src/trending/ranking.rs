//! Engagement ranking and filtering

use crate::core::types::TrendingPost;

/// Sort by total reactions, highest first. Stable, so ties keep vendor order.
pub fn rank_by_engagement(posts: &mut [TrendingPost]) {
    posts.sort_by(|a, b| b.engagement.total_reactions.cmp(&a.engagement.total_reactions));
}

/// Keep posts with at least `min_engagement` total reactions; 0 keeps all
pub fn filter_by_engagement(posts: Vec<TrendingPost>, min_engagement: u64) -> Vec<TrendingPost> {
    if min_engagement == 0 {
        return posts;
    }
    posts
        .into_iter()
        .filter(|p| p.engagement.total_reactions >= min_engagement)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Author, Engagement, PostType};

    fn post(id: &str, reactions: u64) -> TrendingPost {
        TrendingPost {
            id: id.to_string(),
            content: id.to_string(),
            author: Author::default(),
            engagement: Engagement {
                total_reactions: reactions,
                ..Engagement::default()
            },
            post_url: String::new(),
            posted_at: String::new(),
            post_type: PostType::Text,
            hashtags: vec![],
        }
    }

    fn ids(posts: &[TrendingPost]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_rank_descending_and_stable() {
        let mut posts = vec![post("a", 50), post("b", 200), post("c", 50), post("d", 10), post("e", 200)];
        rank_by_engagement(&mut posts);

        assert_eq!(ids(&posts), vec!["b", "e", "a", "c", "d"]);
        assert!(posts
            .windows(2)
            .all(|w| w[0].engagement.total_reactions >= w[1].engagement.total_reactions));
    }

    #[test]
    fn test_filter_by_engagement() {
        let posts = vec![post("a", 200), post("b", 60), post("c", 59)];

        let kept = filter_by_engagement(posts.clone(), 60);
        assert_eq!(ids(&kept), vec!["a", "b"]);
        assert!(kept.iter().all(|p| p.engagement.total_reactions >= 60));

        assert_eq!(filter_by_engagement(posts, 0).len(), 3);
    }
}
