//! Vendor search payload
//!
//! The upstream schema is undocumented and drifts. Every field is optional
//! and defaulted so that absence at any depth deserializes to `None`
//! instead of failing the whole payload. Elements and items are decoded one
//! at a time; one that does not match the expected shape is dropped and the
//! rest of the page survives.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level search response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VendorSearchResponse {
    #[serde(deserialize_with = "lenient_vec")]
    pub elements: Option<Vec<SearchElement>>,
    #[serde(deserialize_with = "lenient")]
    pub paging: Option<Paging>,
}

impl VendorSearchResponse {
    /// Vendor-reported total number of matches, if any
    pub fn total(&self) -> Option<u64> {
        self.paging.as_ref().and_then(|p| p.total)
    }

    /// Every feed update in the payload, in vendor order
    pub fn feed_updates(&self) -> impl Iterator<Item = &SearchFeedUpdate> {
        self.elements
            .iter()
            .flatten()
            .filter_map(|element| element.items.as_ref())
            .flatten()
            .filter_map(|item| item.item.as_ref())
            .filter_map(|body| body.search_feed_update.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Paging {
    pub total: Option<u64>,
    pub count: Option<u64>,
    pub start: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchElement {
    #[serde(deserialize_with = "lenient_vec")]
    pub items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchItem {
    pub item: Option<SearchItemBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchItemBody {
    pub search_feed_update: Option<SearchFeedUpdate>,
}

/// Wrapper around a single update; may carry its own share URL
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchFeedUpdate {
    pub update: Option<Update>,
    pub social_content: Option<SocialContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Update {
    pub metadata: Option<UpdateMetadata>,
    pub social_detail: Option<SocialDetail>,
    pub actor: Option<Actor>,
    pub commentary: Option<Commentary>,
    pub content: Option<UpdateContent>,
    pub social_content: Option<SocialContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateMetadata {
    /// e.g. `urn:li:activity:7123456789`
    pub backend_urn: Option<String>,
    /// e.g. `urn:li:share:7123456789`
    pub share_urn: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialContent {
    pub share_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialDetail {
    pub total_social_activity_counts: Option<SocialActivityCounts>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialActivityCounts {
    pub num_likes: Option<u64>,
    pub num_comments: Option<u64>,
    pub num_shares: Option<u64>,
    pub reaction_type_counts: Option<Vec<VendorReactionCount>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VendorReactionCount {
    pub reaction_type: Option<String>,
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Actor {
    pub name: Option<TextViewModel>,
    pub description: Option<TextViewModel>,
    pub sub_description: Option<TextViewModel>,
    pub supplementary_actor_info: Option<TextViewModel>,
    pub navigation_context: Option<NavigationContext>,
}

/// `{ "text": "..." }` wrapper used throughout the vendor payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextViewModel {
    pub text: Option<String>,
}

impl TextViewModel {
    /// Text of an optional view model
    pub fn text_of(model: Option<&TextViewModel>) -> Option<&str> {
        model.and_then(|m| m.text.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigationContext {
    pub action_target: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Commentary {
    pub text: Option<TextViewModel>,
}

/// Media components; only their presence matters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateContent {
    pub poll_component: Option<Value>,
    pub linked_in_video_component: Option<Value>,
    pub image_component: Option<Value>,
}

/// Wrong-typed value becomes `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Array whose entries are decoded independently; bad entries are skipped
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(values) => Ok(Some(
            values
                .into_iter()
                .filter_map(|v| serde_json::from_value(v).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_payload_deserializes() {
        let payload: VendorSearchResponse = serde_json::from_value(serde_json::json!({
            "elements": [
                { "items": [ {}, { "item": null }, { "item": { "searchFeedUpdate": {} } } ] },
                {},
                { "items": null }
            ]
        }))
        .unwrap();

        assert_eq!(payload.feed_updates().count(), 1);
        assert_eq!(payload.total(), None);
    }

    #[test]
    fn test_empty_object_deserializes() {
        let payload: VendorSearchResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.feed_updates().count(), 0);
    }

    #[test]
    fn test_drifted_item_is_dropped_not_fatal() {
        let good = serde_json::json!({ "item": { "searchFeedUpdate": { "update": {} } } });
        let payload: VendorSearchResponse = serde_json::from_value(serde_json::json!({
            "paging": { "total": "many" },
            "elements": [
                { "items": [
                    good.clone(),
                    { "item": { "searchFeedUpdate": { "update": { "actor": { "name": "Jane" } } } } },
                    { "item": { "searchFeedUpdate": { "update": { "socialDetail": {
                        "totalSocialActivityCounts": { "numLikes": 12.5 }
                    } } } } }
                ] },
                { "items": "not a list" },
                42,
                { "items": [ good ] }
            ]
        }))
        .unwrap();

        assert_eq!(payload.feed_updates().count(), 2);
        assert_eq!(payload.total(), None);
    }

    #[test]
    fn test_paging_total() {
        let payload: VendorSearchResponse =
            serde_json::from_str(r#"{"paging":{"total":137,"count":10,"start":0}}"#).unwrap();
        assert_eq!(payload.total(), Some(137));
    }
}
