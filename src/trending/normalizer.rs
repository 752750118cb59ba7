//! Vendor payload -> `TrendingPost` normalization
//!
//! Pure and infallible. An update missing its social detail, actor or
//! commentary, or whose commentary text is empty, is dropped; nothing in
//! here returns an error.

use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

use super::vendor::{
    Actor, SearchFeedUpdate, SocialActivityCounts, TextViewModel, Update, UpdateContent,
};
use crate::core::types::{Author, Engagement, PostType, ReactionCount, TrendingPost};

const ACTIVITY_URN_PREFIX: &str = "urn:li:activity:";
const SHARE_URN_PREFIX: &str = "urn:li:share:";
const POST_URL_BASE: &str = "https://www.linkedin.com/feed/update/urn:li:activity:";

/// Normalize a raw vendor response into posts, in vendor order
pub fn normalize(payload: &super::VendorSearchResponse) -> Vec<TrendingPost> {
    payload.feed_updates().filter_map(normalize_update).collect()
}

/// Normalize a single feed update, or `None` if required parts are missing
pub fn normalize_update(feed_update: &SearchFeedUpdate) -> Option<TrendingPost> {
    let update = feed_update.update.as_ref()?;
    let social_detail = update.social_detail.as_ref()?;
    let actor = update.actor.as_ref()?;
    let commentary = update.commentary.as_ref()?;

    let content = TextViewModel::text_of(commentary.text.as_ref())?;
    if content.is_empty() {
        return None;
    }

    let engagement = extract_engagement(social_detail.total_social_activity_counts.as_ref());

    Some(TrendingPost {
        id: post_id(update),
        content: content.to_string(),
        author: extract_author(actor),
        engagement,
        post_url: post_url(feed_update, update),
        posted_at: TextViewModel::text_of(actor.sub_description.as_ref())
            .unwrap_or_default()
            .to_string(),
        post_type: classify(update.content.as_ref()),
        hashtags: extract_hashtags(content),
    })
}

fn extract_engagement(counts: Option<&SocialActivityCounts>) -> Engagement {
    let Some(counts) = counts else {
        return Engagement::default();
    };

    let reaction_breakdown: Vec<ReactionCount> = counts
        .reaction_type_counts
        .iter()
        .flatten()
        .map(|r| ReactionCount {
            reaction_type: r.reaction_type.clone().unwrap_or_default(),
            count: r.count.unwrap_or(0),
        })
        .collect();

    // Emoji reactions are included, so this can exceed likes + comments + shares
    let total_reactions = reaction_breakdown.iter().map(|r| r.count).sum();

    Engagement {
        likes: counts.num_likes.unwrap_or(0),
        comments: counts.num_comments.unwrap_or(0),
        shares: counts.num_shares.unwrap_or(0),
        total_reactions,
        reaction_breakdown,
    }
}

fn extract_author(actor: &Actor) -> Author {
    let name = TextViewModel::text_of(actor.name.as_ref())
        .unwrap_or_default()
        .to_string();
    let profile_url = actor
        .navigation_context
        .as_ref()
        .and_then(|n| n.action_target.clone())
        .unwrap_or_default();

    let company = TextViewModel::text_of(actor.supplementary_actor_info.as_ref())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            TextViewModel::text_of(actor.description.as_ref()).filter(|d| d.contains("followers"))
        })
        .map(str::to_string)
        .filter(|company| *company != name);

    Author {
        name,
        profile_url,
        company,
    }
}

fn backend_urn(update: &Update) -> Option<&str> {
    update
        .metadata
        .as_ref()
        .and_then(|m| m.backend_urn.as_deref())
        .filter(|urn| !urn.is_empty())
}

fn post_url(feed_update: &SearchFeedUpdate, update: &Update) -> String {
    let share_url = |social: Option<&super::vendor::SocialContent>| {
        social
            .and_then(|s| s.share_url.as_deref())
            .filter(|url| !url.is_empty())
            .map(str::to_string)
    };

    share_url(update.social_content.as_ref())
        .or_else(|| share_url(feed_update.social_content.as_ref()))
        .or_else(|| {
            backend_urn(update).map(|urn| {
                let activity_id = urn.strip_prefix(ACTIVITY_URN_PREFIX).unwrap_or(urn);
                format!("{}{}/", POST_URL_BASE, activity_id)
            })
        })
        .unwrap_or_default()
}

fn post_id(update: &Update) -> String {
    if let Some(urn) = backend_urn(update) {
        return urn.to_string();
    }

    let share_urn = update
        .metadata
        .as_ref()
        .and_then(|m| m.share_urn.as_deref())
        .filter(|urn| !urn.is_empty());

    match share_urn {
        Some(urn) => urn.strip_prefix(SHARE_URN_PREFIX).unwrap_or(urn).to_string(),
        None => synthetic_id(),
    }
}

/// `post-<unix millis>-<random>`; display/dedup key only, not stable
fn synthetic_id() -> String {
    let suffix: u32 = rand::rng().random_range(0..1_000_000_000);
    format!(
        "post-{}-{:x}",
        chrono::Utc::now().timestamp_millis(),
        suffix
    )
}

fn classify(content: Option<&UpdateContent>) -> PostType {
    let Some(content) = content else {
        return PostType::Text;
    };

    if content.poll_component.is_some() {
        PostType::Poll
    } else if content.linked_in_video_component.is_some() {
        PostType::Video
    } else if content.image_component.is_some() {
        PostType::Image
    } else {
        PostType::Text
    }
}

fn hashtag_regex() -> &'static Regex {
    static HASHTAG: OnceLock<Regex> = OnceLock::new();
    HASHTAG.get_or_init(|| Regex::new(r"#([A-Za-z0-9_\x{0600}-\x{06FF}]+)").expect("valid hashtag regex"))
}

/// Hashtags in `content`, in order of appearance, without the `#`
///
/// Tags are ASCII word characters plus the Arabic block; any other script
/// ends the tag.
pub fn extract_hashtags(content: &str) -> Vec<String> {
    hashtag_regex()
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trending::VendorSearchResponse;
    use serde_json::{json, Value};

    fn update_item(urn: &str, text: &str, reactions: &[(&str, u64)]) -> Value {
        let counts: Vec<Value> = reactions
            .iter()
            .map(|(t, c)| json!({ "reactionType": t, "count": c }))
            .collect();
        json!({
            "item": {
                "searchFeedUpdate": {
                    "update": {
                        "metadata": { "backendUrn": urn },
                        "socialDetail": {
                            "totalSocialActivityCounts": {
                                "numLikes": 5,
                                "numComments": 2,
                                "numShares": 1,
                                "reactionTypeCounts": counts
                            }
                        },
                        "actor": {
                            "name": { "text": "Jane Doe" },
                            "description": { "text": "12,345 followers" },
                            "subDescription": { "text": "3d • Edited" },
                            "navigationContext": { "actionTarget": "https://www.linkedin.com/in/jane" }
                        },
                        "commentary": { "text": { "text": text } }
                    }
                }
            }
        })
    }

    fn payload(items: Vec<Value>) -> VendorSearchResponse {
        serde_json::from_value(json!({ "elements": [ { "items": items } ] })).unwrap()
    }

    #[test]
    fn test_normalize_well_formed_item() {
        let posts = normalize(&payload(vec![update_item(
            "urn:li:activity:42",
            "Shipping #rust today",
            &[("LIKE", 10), ("PRAISE", 4)],
        )]));

        assert_eq!(posts.len(), 1);
        let post = &posts[0];
        assert_eq!(post.id, "urn:li:activity:42");
        assert_eq!(post.content, "Shipping #rust today");
        assert_eq!(post.author.name, "Jane Doe");
        assert_eq!(post.author.profile_url, "https://www.linkedin.com/in/jane");
        assert_eq!(post.author.company.as_deref(), Some("12,345 followers"));
        assert_eq!(post.engagement.likes, 5);
        assert_eq!(post.engagement.total_reactions, 14);
        assert_eq!(post.posted_at, "3d • Edited");
        assert_eq!(post.post_type, PostType::Text);
        assert_eq!(post.post_url, "https://www.linkedin.com/feed/update/urn:li:activity:42/");
        assert_eq!(post.hashtags, vec!["rust"]);
    }

    #[test]
    fn test_items_missing_required_parts_are_skipped() {
        let mut no_social = update_item("urn:li:activity:1", "a", &[("LIKE", 1)]);
        no_social["item"]["searchFeedUpdate"]["update"]
            .as_object_mut()
            .unwrap()
            .remove("socialDetail");

        let mut no_actor = update_item("urn:li:activity:2", "b", &[("LIKE", 1)]);
        no_actor["item"]["searchFeedUpdate"]["update"]["actor"] = Value::Null;

        let mut no_commentary = update_item("urn:li:activity:3", "c", &[("LIKE", 1)]);
        no_commentary["item"]["searchFeedUpdate"]["update"]
            .as_object_mut()
            .unwrap()
            .remove("commentary");

        let empty_text = update_item("urn:li:activity:4", "", &[("LIKE", 1)]);
        let keep = update_item("urn:li:activity:5", "kept", &[("LIKE", 1)]);

        let posts = normalize(&payload(vec![
            no_social,
            no_actor,
            no_commentary,
            empty_text,
            json!({}),
            json!({ "item": { "searchFeedUpdate": {} } }),
            keep,
        ]));

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "urn:li:activity:5");
    }

    #[test]
    fn test_total_reactions_is_sum_of_breakdown() {
        let posts = normalize(&payload(vec![
            update_item("urn:li:activity:1", "one", &[("LIKE", 3), ("EMPATHY", 9), ("FUNNY", 1)]),
            update_item("urn:li:activity:2", "two", &[]),
        ]));

        for post in &posts {
            let sum: u64 = post.engagement.reaction_breakdown.iter().map(|r| r.count).sum();
            assert_eq!(post.engagement.total_reactions, sum);
        }
        // Independent of likes + comments + shares
        assert_eq!(posts[0].engagement.total_reactions, 13);
        assert_eq!(posts[1].engagement.total_reactions, 0);
    }

    #[test]
    fn test_company_prefers_supplementary_info_and_drops_duplicates() {
        let mut item = update_item("urn:li:activity:1", "x", &[]);
        item["item"]["searchFeedUpdate"]["update"]["actor"]["supplementaryActorInfo"] =
            json!({ "text": "Acme Corp" });
        let posts = normalize(&payload(vec![item]));
        assert_eq!(posts[0].author.company.as_deref(), Some("Acme Corp"));

        let mut same_as_name = update_item("urn:li:activity:2", "y", &[]);
        same_as_name["item"]["searchFeedUpdate"]["update"]["actor"]["supplementaryActorInfo"] =
            json!({ "text": "Jane Doe" });
        let posts = normalize(&payload(vec![same_as_name]));
        assert_eq!(posts[0].author.company, None);

        let mut headline = update_item("urn:li:activity:3", "z", &[]);
        headline["item"]["searchFeedUpdate"]["update"]["actor"]["description"] =
            json!({ "text": "Staff Engineer" });
        let posts = normalize(&payload(vec![headline]));
        assert_eq!(posts[0].author.company, None);
    }

    #[test]
    fn test_post_url_fallback_order() {
        let mut on_update = update_item("urn:li:activity:1", "a", &[]);
        on_update["item"]["searchFeedUpdate"]["update"]["socialContent"] =
            json!({ "shareUrl": "https://lnkd.in/update" });
        on_update["item"]["searchFeedUpdate"]["socialContent"] =
            json!({ "shareUrl": "https://lnkd.in/wrapper" });

        let mut on_wrapper = update_item("urn:li:activity:2", "b", &[]);
        on_wrapper["item"]["searchFeedUpdate"]["socialContent"] =
            json!({ "shareUrl": "https://lnkd.in/wrapper" });

        let mut nothing = update_item("urn:li:activity:3", "c", &[]);
        nothing["item"]["searchFeedUpdate"]["update"]
            .as_object_mut()
            .unwrap()
            .remove("metadata");

        let posts = normalize(&payload(vec![on_update, on_wrapper, nothing]));
        assert_eq!(posts[0].post_url, "https://lnkd.in/update");
        assert_eq!(posts[1].post_url, "https://lnkd.in/wrapper");
        assert_eq!(posts[2].post_url, "");
    }

    #[test]
    fn test_id_fallbacks() {
        let mut share_only = update_item("", "a", &[]);
        share_only["item"]["searchFeedUpdate"]["update"]["metadata"] =
            json!({ "shareUrn": "urn:li:share:777" });

        let mut none = update_item("", "b", &[]);
        none["item"]["searchFeedUpdate"]["update"]
            .as_object_mut()
            .unwrap()
            .remove("metadata");

        let posts = normalize(&payload(vec![share_only, none]));
        assert_eq!(posts[0].id, "777");
        assert!(posts[1].id.starts_with("post-"));
    }

    #[test]
    fn test_post_type_priority() {
        let with_content = |content: Value| {
            let mut item = update_item("urn:li:activity:1", "a", &[]);
            item["item"]["searchFeedUpdate"]["update"]["content"] = content;
            normalize(&payload(vec![item]))[0].post_type
        };

        assert_eq!(
            with_content(json!({ "pollComponent": {}, "linkedInVideoComponent": {} })),
            PostType::Poll
        );
        assert_eq!(
            with_content(json!({ "linkedInVideoComponent": {}, "imageComponent": {} })),
            PostType::Video
        );
        assert_eq!(with_content(json!({ "imageComponent": { "images": [] } })), PostType::Image);
        assert_eq!(with_content(json!({ "articleComponent": {} })), PostType::Text);
        assert_eq!(with_content(json!({ "pollComponent": null })), PostType::Text);
    }

    #[test]
    fn test_extract_hashtags() {
        assert_eq!(
            extract_hashtags("Big week #AI #rust_lang and #مرحبا! #"),
            vec!["AI", "rust_lang", "مرحبا"]
        );
        assert!(extract_hashtags("no tags here").is_empty());
        assert_eq!(extract_hashtags("#café #日本 #ok"), vec!["caf", "ok"]);
    }

    #[test]
    fn test_empty_payload_yields_no_posts() {
        assert!(normalize(&VendorSearchResponse::default()).is_empty());
    }
}
