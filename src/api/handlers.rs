//! Public read handlers and shared application state.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, RawQuery, State},
    http::HeaderMap,
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{DatasetCache, ResultCache, Snapshot};
use crate::config::Config;
use crate::engine::{self, ListingQuery};
use crate::error::{ApiError, Result};
use crate::geo::apply_geocoding;
use crate::models::{
    CacheStatsResponse, DashboardStats, Distribution, HealthResponse, ListingResponse, MapPin,
    MapResponse, RankedDistribution,
};
use crate::store::{JsonStore, Market, NewsArticle, Property};

use super::auth::authorize;

// == App State ==
/// Application state shared across all handlers.
///
/// The stores are plain path handles; the caches are explicit shared state
/// behind `Arc<RwLock<_>>` rather than globals, so tests can construct an
/// isolated instance per fixture directory.
#[derive(Clone)]
pub struct AppState {
    pub properties: JsonStore,
    pub news: JsonStore,
    pub api_keys: JsonStore,
    /// Optional allow-list of reference ids known to be new builds
    pub new_build_refs: JsonStore,
    pub dataset: Arc<RwLock<DatasetCache>>,
    pub listing_cache: Arc<RwLock<ResultCache>>,
    pub map_cache: Arc<RwLock<ResultCache>>,
}

impl AppState {
    /// Creates state with stores and caches wired from configuration.
    pub fn from_config(config: &Config) -> Self {
        let dir = &config.data_dir;
        Self {
            properties: JsonStore::new(dir.join("properties.json")),
            news: JsonStore::new(dir.join("news.json")),
            api_keys: JsonStore::new(dir.join("api_keys.json")),
            new_build_refs: JsonStore::new(dir.join("new_building_refs.json")),
            dataset: Arc::new(RwLock::new(DatasetCache::new(Duration::from_secs(
                config.base_cache_ttl,
            )))),
            listing_cache: Arc::new(RwLock::new(ResultCache::new(
                Duration::from_secs(config.listing_cache_ttl),
                config.result_cache_max_entries,
            ))),
            map_cache: Arc::new(RwLock::new(ResultCache::new(
                Duration::from_secs(config.map_cache_ttl),
                config.result_cache_max_entries,
            ))),
        }
    }
}

// == Snapshot ==
/// Returns the geocoded dataset, repopulating the base cache when stale.
///
/// Repopulation reads the whole file, derives missing random scores,
/// geocodes, and clears both result caches so no cached response outlives
/// the dataset it was computed from. Racing requests may each repopulate;
/// the install is idempotent so the duplicate work is harmless.
pub async fn snapshot(state: &AppState) -> Result<Snapshot> {
    if let Some(snapshot) = state.dataset.read().await.fresh() {
        return Ok(snapshot);
    }

    let mut records: Vec<Property> = state.properties.load()?;
    for record in &mut records {
        record.ensure_random_score();
    }
    let records = apply_geocoding(records);

    let refs: HashSet<String> = state
        .new_build_refs
        .load_or_default::<String>()?
        .into_iter()
        .collect();

    let snapshot = state.dataset.write().await.install(records, refs);
    state.listing_cache.write().await.clear();
    state.map_cache.write().await.clear();
    info!(
        records = snapshot.records.len(),
        "dataset snapshot repopulated"
    );
    Ok(snapshot)
}

// == Listing ==
/// Handler for GET /api/properties
///
/// The result-cache probe happens before anything else, including API-key
/// validation, so a repeated query is served straight from memory.
pub async fn list_properties(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Result<Json<Value>> {
    let cache_key = raw.unwrap_or_default();

    if let Some(body) = state.listing_cache.write().await.get(&cache_key) {
        debug!(key = %cache_key, "listing served from result cache");
        return Ok(Json(body));
    }

    authorize(&headers, &state.api_keys)?;

    let query = parse_query(&cache_key);
    let snapshot = snapshot(&state).await?;
    let page = engine::run_listing(&snapshot.records, &snapshot.new_build_refs, &query);
    let body = serde_json::to_value(ListingResponse::from(page))?;

    state
        .listing_cache
        .write()
        .await
        .insert(cache_key, body.clone());
    Ok(Json(body))
}

// == Map ==
/// Handler for GET /api/properties/map
///
/// Same grammar as the listing endpoint, but `ids` switches to an
/// everything-else-bypassed allow-list and the records are projected down to
/// marker pins. Only records with a resolved coordinate make it out.
pub async fn map_properties(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Result<Json<Value>> {
    let cache_key = raw.unwrap_or_default();

    if let Some(body) = state.map_cache.write().await.get(&cache_key) {
        debug!(key = %cache_key, "map served from result cache");
        return Ok(Json(body));
    }

    authorize(&headers, &state.api_keys)?;

    let query = parse_query(&cache_key);
    let snapshot = snapshot(&state).await?;
    let matches = engine::run_map(&snapshot.records, &snapshot.new_build_refs, &query);

    let pins: Vec<MapPin> = matches
        .into_iter()
        .filter(|record| record.has_coordinates())
        .map(|record| MapPin::project(record, record.classify(&snapshot.new_build_refs)))
        .collect();

    let body = serde_json::to_value(MapResponse {
        total: pins.len(),
        data: pins,
    })?;

    state.map_cache.write().await.insert(cache_key, body.clone());
    Ok(Json(body))
}

// == Single Property ==
/// Handler for GET /api/properties/:id
///
/// Reads the file directly so admin edit screens always see fresh data, even
/// while the listing snapshot is within its TTL.
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    let records: Vec<Property> = state.properties.load()?;
    let record = records
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| ApiError::NotFound("Property not found".to_string()))?;

    let mut geocoded = apply_geocoding(vec![record]);
    let record = geocoded.remove(0);
    Ok(Json(serde_json::to_value(record)?))
}

// == News ==
/// Handler for GET /api/news
pub async fn list_news(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<NewsArticle>>> {
    authorize(&headers, &state.api_keys)?;
    let articles: Vec<NewsArticle> = state.news.load_or_default()?;
    Ok(Json(articles))
}

// == Dashboard Stats ==
/// Handler for GET /api/dashboard/stats
///
/// Aggregates over the cached snapshot, so the figures refresh on the same
/// schedule as the listing data.
pub async fn dashboard_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    let snapshot = snapshot(&state).await?;
    let records = &snapshot.records;
    let refs = &snapshot.new_build_refs;

    let market_count = |market: Market| {
        records
            .iter()
            .filter(|p| p.classify(refs) == Some(market))
            .count()
    };
    let off_plan = market_count(Market::OffPlan);
    let resale = market_count(Market::Resale);
    let rent = market_count(Market::Rent);

    let prices: Vec<f64> = records.iter().map(|p| p.price).filter(|p| *p > 0.0).collect();
    let min_price = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max_price = prices.iter().copied().fold(0.0, f64::max);

    let distinct = |field: fn(&Property) -> &str| {
        records
            .iter()
            .map(field)
            .filter(|v| !v.is_empty())
            .collect::<HashSet<_>>()
            .len()
    };

    let stats = DashboardStats {
        total_properties: records.len(),
        off_plan_properties: off_plan,
        developers: distinct(|p| &p.developer),
        min_price: if prices.is_empty() { 0.0 } else { min_price },
        max_price,
        countries: distinct(|p| &p.country),
        towns: distinct(|p| &p.town),
        provinces: distinct(|p| &p.province),
        market_distribution: Distribution {
            labels: vec![
                "Off-Plan".to_string(),
                "Resale".to_string(),
                "Rent".to_string(),
            ],
            series: vec![off_plan, resale, rent],
        },
        town_distribution: top_counts(records.iter().map(|p| p.town.as_str()), 5),
        bed_distribution: bed_counts(records, 10),
        subtype_distribution: {
            let ranked = top_counts(records.iter().map(|p| p.subtype.as_str()), 5);
            Distribution {
                labels: ranked.categories,
                series: ranked.data,
            }
        },
    };

    Ok(Json(stats))
}

/// Counts non-empty values and keeps the `limit` most frequent, ties broken
/// alphabetically for a stable response.
fn top_counts<'a>(values: impl Iterator<Item = &'a str>, limit: usize) -> RankedDistribution {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values.filter(|v| !v.is_empty()) {
        *counts.entry(value).or_default() += 1;
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(limit);

    RankedDistribution {
        categories: ranked.iter().map(|(name, _)| name.to_string()).collect(),
        data: ranked.iter().map(|(_, count)| *count).collect(),
    }
}

/// Bedroom histogram, ascending by count-of-bedrooms label.
fn bed_counts(records: &[Property], limit: usize) -> RankedDistribution {
    let mut counts: HashMap<u32, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.beds).or_default() += 1;
    }
    let mut ranked: Vec<(u32, usize)> = counts.into_iter().collect();
    ranked.sort_by_key(|(beds, _)| *beds);
    ranked.truncate(limit);

    RankedDistribution {
        categories: ranked.iter().map(|(beds, _)| format!("{beds} Beds")).collect(),
        data: ranked.iter().map(|(_, count)| *count).collect(),
    }
}

// == Cache Stats ==
/// Handler for GET /api/cache/stats
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let dataset = state.dataset.read().await;
    let listing = state.listing_cache.read().await.stats();
    let map = state.map_cache.read().await.stats();

    Json(CacheStatsResponse {
        dataset_loads: dataset.loads(),
        dataset_records: dataset.record_count(),
        dataset_stale: dataset.is_stale(),
        listing_hit_rate: listing.hit_rate(),
        listing,
        map_hit_rate: map.hit_rate(),
        map,
    })
}

// == Health ==
/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

fn parse_query(raw: &str) -> ListingQuery {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw).unwrap_or_default();
    ListingQuery::from_pairs(&pairs)
}
