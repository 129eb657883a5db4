use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Pricing lookup request: a free-text title plus the platform and release
/// date used to narrow the marketplace search. Immutable input.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub title: String,
    pub platform: String,
    pub release_date: NaiveDate,
}

// ============================================================================
// Primary marketplace (ItemSearch) wire types
// ============================================================================

/// Outer envelope of an ItemSearch response.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemSearchEnvelope {
    #[serde(rename = "ItemSearchResponse")]
    pub response: ItemSearchBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemSearchBody {
    #[serde(rename = "Items")]
    pub items: ItemSearchResponse,
}

/// Result page of a primary-marketplace keyword search.
///
/// The upstream serializes numbers as strings, so `TotalResults` accepts
/// either form.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemSearchResponse {
    #[serde(rename = "TotalResults", deserialize_with = "stringly_u32", default)]
    pub total_results: u32,
    #[serde(rename = "Item", default)]
    pub items: Vec<MarketplaceItem>,
}

fn stringly_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// One commercial listing in a search result page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceItem {
    #[serde(rename = "ASIN", default)]
    pub item_id: Option<String>,
    #[serde(rename = "DetailPageURL")]
    pub detail_page_url: String,
    #[serde(rename = "ItemAttributes")]
    pub attributes: ItemAttributes,
    #[serde(rename = "OfferSummary", default)]
    pub offer_summary: Option<OfferSummary>,
}

/// Attribute bag attached to a listing. Platform, release date and universal
/// product code drive the matching pipeline; all are optional upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemAttributes {
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Platform", default)]
    pub platform: Option<String>,
    #[serde(rename = "ReleaseDate", default)]
    pub release_date: Option<NaiveDate>,
    #[serde(rename = "UPC", default)]
    pub upc: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferSummary {
    #[serde(rename = "LowestNewPrice", default)]
    pub lowest_new_price: Option<Price>,
    #[serde(rename = "LowestUsedPrice", default)]
    pub lowest_used_price: Option<Price>,
    #[serde(rename = "TotalNew", default)]
    pub total_new: Option<String>,
    #[serde(rename = "TotalUsed", default)]
    pub total_used: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    #[serde(rename = "Amount", default)]
    pub amount: Option<String>,
    #[serde(rename = "CurrencyCode", default)]
    pub currency_code: Option<String>,
    #[serde(rename = "FormattedPrice", default)]
    pub formatted_price: Option<String>,
}

/// The listing selected by the matcher, reduced to what the client renders.
#[derive(Debug, Clone, Serialize)]
pub struct MarketplaceListing {
    pub url: String,
    pub attributes: ItemAttributes,
    pub pricing: Option<OfferSummary>,
}

impl From<&MarketplaceItem> for MarketplaceListing {
    fn from(item: &MarketplaceItem) -> Self {
        Self {
            url: item.detail_page_url.clone(),
            attributes: item.attributes.clone(),
            pricing: item.offer_summary.clone(),
        }
    }
}

// ============================================================================
// Secondary marketplace (Finding) wire types
// ============================================================================

/// Product-keyed search response. The upstream wraps every field, scalar or
/// not, in a single-element array; accessors on [`FindingItem`] hide that.
#[derive(Debug, Clone, Deserialize)]
pub struct FindingResponse {
    #[serde(rename = "findItemsByProductResponse", default)]
    pub responses: Vec<FindingResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FindingResult {
    #[serde(default)]
    pub ack: Vec<String>,
    #[serde(rename = "searchResult", default)]
    pub search_result: Vec<FindingSearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FindingSearchResult {
    #[serde(rename = "item", default)]
    pub items: Vec<FindingItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FindingItem {
    #[serde(rename = "itemId", default)]
    pub item_id: Vec<String>,
    #[serde(rename = "viewItemURL", default)]
    pub view_item_url: Vec<String>,
    #[serde(default)]
    pub title: Vec<String>,
    #[serde(default)]
    pub condition: Vec<FindingCondition>,
    #[serde(rename = "sellingStatus", default)]
    pub selling_status: Vec<SellingStatus>,
    #[serde(rename = "listingInfo", default)]
    pub listing_info: Vec<ListingInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FindingCondition {
    #[serde(rename = "conditionDisplayName", default)]
    pub display_name: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SellingStatus {
    #[serde(rename = "currentPrice", default)]
    pub current_price: Vec<CurrentPrice>,
    #[serde(rename = "sellingState", default)]
    pub selling_state: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentPrice {
    #[serde(rename = "@currencyId", default)]
    pub currency_id: Option<String>,
    #[serde(rename = "__value__", default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingInfo {
    #[serde(rename = "buyItNowAvailable", default)]
    pub buy_it_now_available: Vec<String>,
}

/// Cross-referenced listing on the secondary marketplace, flattened out of
/// the array-wrapped wire form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossReferenceResult {
    pub item_id: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub condition: Option<String>,
    pub selling_state: Option<String>,
    pub current_price: Option<String>,
    pub buy_it_now_available: bool,
}

impl From<&FindingItem> for CrossReferenceResult {
    fn from(item: &FindingItem) -> Self {
        let selling = item.selling_status.first();
        Self {
            item_id: item.item_id.first().cloned(),
            url: item.view_item_url.first().cloned(),
            title: item.title.first().cloned(),
            condition: item
                .condition
                .first()
                .and_then(|c| c.display_name.first().cloned()),
            selling_state: selling.and_then(|s| s.selling_state.first().cloned()),
            current_price: selling
                .and_then(|s| s.current_price.first())
                .and_then(|p| p.value.clone()),
            buy_it_now_available: item
                .listing_info
                .first()
                .and_then(|l| l.buy_it_now_available.first())
                .map(|flag| flag == "true")
                .unwrap_or(false),
        }
    }
}

// ============================================================================
// Combined result
// ============================================================================

/// The only externally visible artifact of the reconciliation pipeline.
/// Both sides are independently nullable; a populated `secondary_listing`
/// implies a populated `primary_listing`, since the cross-reference key is
/// derived from the primary.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationResult {
    pub primary_listing: Option<MarketplaceListing>,
    pub secondary_listing: Option<CrossReferenceResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_search_envelope_deserializes() {
        let json = r#"{
            "ItemSearchResponse": {
                "Items": {
                    "TotalResults": "2",
                    "Item": [
                        {
                            "ASIN": "B01MY7GHKJ",
                            "DetailPageURL": "https://marketplace.example.com/dp/B01MY7GHKJ",
                            "ItemAttributes": {
                                "Title": "Super Mario Odyssey",
                                "Platform": "Nintendo Switch",
                                "ReleaseDate": "2017-10-27",
                                "UPC": "045496590741"
                            },
                            "OfferSummary": {
                                "LowestNewPrice": {
                                    "Amount": "4999",
                                    "CurrencyCode": "USD",
                                    "FormattedPrice": "$49.99"
                                }
                            }
                        },
                        {
                            "DetailPageURL": "https://marketplace.example.com/dp/B0000GHKJ7",
                            "ItemAttributes": {
                                "Platform": "PlayStation 4"
                            }
                        }
                    ]
                }
            }
        }"#;

        let envelope: ItemSearchEnvelope = serde_json::from_str(json).unwrap();
        let page = envelope.response.items;
        assert_eq!(page.total_results, 2);
        assert_eq!(page.items.len(), 2);

        let first = &page.items[0];
        assert_eq!(first.attributes.platform.as_deref(), Some("Nintendo Switch"));
        assert_eq!(
            first.attributes.release_date,
            NaiveDate::from_ymd_opt(2017, 10, 27)
        );
        assert_eq!(first.attributes.upc.as_deref(), Some("045496590741"));

        let second = &page.items[1];
        assert!(second.attributes.upc.is_none());
        assert!(second.offer_summary.is_none());
    }

    #[test]
    fn total_results_accepts_bare_number() {
        let json = r#"{"TotalResults": 0}"#;
        let page: ItemSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_results, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn finding_response_deserializes_array_wrapped_fields() {
        let json = r#"{
            "findItemsByProductResponse": [{
                "ack": ["Success"],
                "searchResult": [{
                    "item": [{
                        "itemId": ["254321098765"],
                        "viewItemURL": ["https://resale.example.com/itm/254321098765"],
                        "title": ["Super Mario Odyssey (Nintendo Switch, 2017)"],
                        "condition": [{"conditionDisplayName": ["Brand New"]}],
                        "sellingStatus": [{
                            "currentPrice": [{"@currencyId": "USD", "__value__": "39.99"}],
                            "sellingState": ["Active"]
                        }],
                        "listingInfo": [{"buyItNowAvailable": ["true"]}]
                    }]
                }]
            }]
        }"#;

        let response: FindingResponse = serde_json::from_str(json).unwrap();
        let result = &response.responses[0];
        assert_eq!(result.ack.first().map(String::as_str), Some("Success"));

        let item = &result.search_result[0].items[0];
        let cross: CrossReferenceResult = item.into();
        assert_eq!(cross.item_id.as_deref(), Some("254321098765"));
        assert_eq!(cross.condition.as_deref(), Some("Brand New"));
        assert_eq!(cross.selling_state.as_deref(), Some("Active"));
        assert_eq!(cross.current_price.as_deref(), Some("39.99"));
        assert!(cross.buy_it_now_available);
    }

    #[test]
    fn cross_reference_defaults_missing_fields() {
        let item = FindingItem {
            item_id: vec![],
            view_item_url: vec!["https://resale.example.com/itm/1".to_string()],
            title: vec![],
            condition: vec![],
            selling_status: vec![],
            listing_info: vec![],
        };

        let cross: CrossReferenceResult = (&item).into();
        assert!(cross.item_id.is_none());
        assert!(cross.condition.is_none());
        assert!(!cross.buy_it_now_available);
    }

    #[test]
    fn reconciliation_result_serializes_camel_case_nulls() {
        let json = serde_json::to_value(ReconciliationResult::default()).unwrap();
        assert!(json["primaryListing"].is_null());
        assert!(json["secondaryListing"].is_null());
    }

    #[test]
    fn search_query_deserializes_camel_case() {
        let json = r#"{"title": "Stardew Valley", "platform": "PC", "releaseDate": "2016-02-26"}"#;
        let query: SearchQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.platform, "PC");
        assert_eq!(
            query.release_date,
            NaiveDate::from_ymd_opt(2016, 2, 26).unwrap()
        );
    }
}
