//! Response DTOs for the listings API.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::engine::PageResult;
use crate::store::{Market, Property};

// == Listing Response ==
/// Paginated listing body consumed by the public website.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub data: Vec<Property>,
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub items_per_page: usize,
}

impl From<PageResult> for ListingResponse {
    fn from(page: PageResult) -> Self {
        Self {
            data: page.items,
            total_items: page.total_count,
            total_pages: page.total_pages,
            current_page: page.page,
            items_per_page: page.page_size,
        }
    }
}

// == Map Response ==
/// Lightweight marker payload for the map view.
#[derive(Debug, Clone, Serialize)]
pub struct MapResponse {
    pub data: Vec<MapPin>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapPin {
    pub id: i64,
    pub lat: f64,
    pub lng: f64,
    pub price: f64,
    pub market: Market,
    pub title: String,
    pub image: Option<String>,
    pub beds: u32,
    pub size: f64,
    #[serde(rename = "type")]
    pub subtype: String,
}

impl MapPin {
    /// Projects a record onto the map payload. Records that classify to no
    /// market are shown as resale, matching the public site's default.
    pub fn project(record: &Property, market: Option<Market>) -> Self {
        Self {
            id: record.id,
            lat: record.latitude,
            lng: record.longitude,
            price: record.price,
            market: market.unwrap_or(Market::Resale),
            title: record.development_name.clone(),
            image: record.cover_image().map(|url| url.to_string()),
            beds: record.beds,
            size: record.built_area,
            subtype: record.subtype.clone(),
        }
    }
}

// == Dashboard Stats ==
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_properties: usize,
    pub off_plan_properties: usize,
    pub developers: usize,
    pub min_price: f64,
    pub max_price: f64,
    pub countries: usize,
    pub towns: usize,
    pub provinces: usize,
    pub market_distribution: Distribution,
    pub town_distribution: RankedDistribution,
    pub bed_distribution: RankedDistribution,
    pub subtype_distribution: Distribution,
}

/// Label/series pair for donut-style charts.
#[derive(Debug, Clone, Serialize)]
pub struct Distribution {
    pub labels: Vec<String>,
    pub series: Vec<usize>,
}

/// Category/count pair for bar-style charts.
#[derive(Debug, Clone, Serialize)]
pub struct RankedDistribution {
    pub categories: Vec<String>,
    pub data: Vec<usize>,
}

// == Cache Stats Response ==
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub dataset_loads: u64,
    pub dataset_records: usize,
    pub dataset_stale: bool,
    pub listing: CacheStats,
    pub listing_hit_rate: f64,
    pub map: CacheStats,
    pub map_hit_rate: f64,
}

// == Message Response ==
/// Fixed-message body for delete confirmations.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// == Health Response ==
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// == Error Response ==
/// Error body shape for all failure responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_response_wire_names() {
        let response = ListingResponse {
            data: vec![],
            total_items: 12,
            total_pages: 2,
            current_page: 1,
            items_per_page: 10,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totalItems"], 12);
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["itemsPerPage"], 10);
    }

    #[test]
    fn test_map_pin_projection() {
        let mut record = Property::new(3);
        record.latitude = 36.5;
        record.longitude = -4.9;
        record.price = 350_000.0;
        record.development_name = "Alba Marina".to_string();
        record.subtype = "Apartment".to_string();

        let pin = MapPin::project(&record, None);
        let json = serde_json::to_value(&pin).unwrap();

        assert_eq!(json["market"], "resale");
        assert_eq!(json["type"], "Apartment");
        assert_eq!(json["image"], serde_json::Value::Null);
        assert_eq!(json["lat"], 36.5);
    }

    #[test]
    fn test_health_response() {
        let response = HealthResponse::healthy();
        assert_eq!(response.status, "healthy");
        assert!(!response.timestamp.is_empty());
    }
}
