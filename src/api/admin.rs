//! Administrative CRUD handlers.
//!
//! Every mutation follows the store contract: read the whole array, change
//! it in memory, rewrite the whole file. The dataset snapshot is *not*
//! invalidated here; listings pick up admin changes when the base cache TTL
//! lapses, while the single-record endpoint always reads fresh.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::error::{ApiError, Result};
use crate::models::{ApiKeyCreate, MessageResponse, NewsPayload, PropertyPayload};
use crate::store::{ApiKeyRecord, ApiKeySummary, NewsArticle, Property};

use super::auth::authorize;
use super::handlers::AppState;

// == Properties ==

/// Handler for POST /api/properties
///
/// Ids are taken from the clock (epoch milliseconds), matching how imported
/// records were numbered.
pub async fn create_property(
    State(state): State<AppState>,
    Json(payload): Json<PropertyPayload>,
) -> Result<Json<Value>> {
    let mut records: Vec<Property> = state.properties.load_or_default()?;

    let mut record = Property::new(chrono::Utc::now().timestamp_millis());
    payload.apply(&mut record);
    records.push(record.clone());

    state.properties.save(&records)?;
    info!(id = record.id, "property created");
    Ok(Json(serde_json::to_value(record)?))
}

/// Handler for PATCH /api/properties/:id
///
/// Partial-field merge: absent payload fields leave the stored record
/// untouched, including legacy fields this server does not model.
pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<PropertyPayload>,
) -> Result<Json<Value>> {
    let mut records: Vec<Property> = state.properties.load()?;

    let record = records
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| ApiError::NotFound("Property not found".to_string()))?;
    payload.apply(record);
    let updated = record.clone();

    state.properties.save(&records)?;
    info!(id, "property updated");
    Ok(Json(serde_json::to_value(updated)?))
}

/// Handler for DELETE /api/properties/:id
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    let mut records: Vec<Property> = state.properties.load()?;

    let index = records
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| ApiError::NotFound("Property not found".to_string()))?;
    records.remove(index);

    state.properties.save(&records)?;
    info!(id, "property deleted");
    Ok(Json(MessageResponse::new("Property deleted successfully")))
}

// == News ==

/// Handler for POST /api/news
///
/// New articles are prepended so the list stays newest-first.
pub async fn create_news(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NewsPayload>,
) -> Result<Json<NewsArticle>> {
    authorize(&headers, &state.api_keys)?;

    let mut articles: Vec<NewsArticle> = state.news.load_or_default()?;

    let mut article = NewsArticle::new(
        payload.title.clone().unwrap_or_default(),
        payload.content.clone().unwrap_or_default(),
    );
    payload.apply(&mut article);
    articles.insert(0, article.clone());

    state.news.save(&articles)?;
    info!(id = %article.id, "news article created");
    Ok(Json(article))
}

/// Handler for PATCH /api/news/:id
pub async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NewsPayload>,
) -> Result<Json<NewsArticle>> {
    let mut articles: Vec<NewsArticle> = state.news.load()?;

    let article = articles
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or_else(|| ApiError::NotFound("Article not found".to_string()))?;
    payload.apply(article);
    let updated = article.clone();

    state.news.save(&articles)?;
    info!(id = %id, "news article updated");
    Ok(Json(updated))
}

/// Handler for DELETE /api/news/:id
pub async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let mut articles: Vec<NewsArticle> = state.news.load()?;

    let index = articles
        .iter()
        .position(|a| a.id == id)
        .ok_or_else(|| ApiError::NotFound("Article not found".to_string()))?;
    articles.remove(index);

    state.news.save(&articles)?;
    info!(id = %id, "news article deleted");
    Ok(Json(MessageResponse::new("Article deleted successfully")))
}

// == Api Keys ==

/// Handler for GET /api/api-keys
///
/// Secrets never appear in list responses.
pub async fn list_api_keys(State(state): State<AppState>) -> Result<Json<Vec<ApiKeySummary>>> {
    let records: Vec<ApiKeyRecord> = state.api_keys.load_or_default()?;
    Ok(Json(records.iter().map(ApiKeyRecord::summary).collect()))
}

/// Handler for POST /api/api-keys
///
/// Returns the full record, secret included. This is the only time the
/// secret is shown.
pub async fn create_api_key(
    State(state): State<AppState>,
    Json(payload): Json<ApiKeyCreate>,
) -> Result<Json<ApiKeyRecord>> {
    let mut records: Vec<ApiKeyRecord> = state.api_keys.load_or_default()?;

    let record = ApiKeyRecord::generate(payload.name.unwrap_or_else(|| "Untitled Key".to_string()));
    records.insert(0, record.clone());

    state.api_keys.save(&records)?;
    info!(name = %record.name, "api key created");
    Ok(Json(record))
}

/// Handler for DELETE /api/api-keys/:id
pub async fn delete_api_key(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let mut records: Vec<ApiKeyRecord> = state.api_keys.load()?;

    let index = records
        .iter()
        .position(|k| k.id == id)
        .ok_or_else(|| ApiError::NotFound("API key not found".to_string()))?;
    records.remove(index);

    state.api_keys.save(&records)?;
    info!(id = %id, "api key deleted");
    Ok(Json(MessageResponse::new("API key deleted successfully")))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::tempdir;

    fn empty_state(dir: &tempfile::TempDir) -> AppState {
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        AppState::from_config(&config)
    }

    #[tokio::test]
    async fn test_property_create_update_delete() {
        let dir = tempdir().unwrap();
        let state = empty_state(&dir);
        state.properties.save::<Property>(&[]).unwrap();

        let payload: PropertyPayload =
            serde_json::from_str(r#"{"development_name": "Nueva", "price": 400000}"#).unwrap();
        let created = create_property(State(state.clone()), Json(payload))
            .await
            .unwrap();
        let id = created.0["id"].as_i64().unwrap();

        let patch: PropertyPayload = serde_json::from_str(r#"{"price": 350000}"#).unwrap();
        let updated = update_property(State(state.clone()), Path(id), Json(patch))
            .await
            .unwrap();
        assert_eq!(updated.0["price"], 350000.0);
        assert_eq!(updated.0["development_name"], "Nueva");

        delete_property(State(state.clone()), Path(id)).await.unwrap();
        let remaining: Vec<Property> = state.properties.load().unwrap();
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_property_is_404() {
        let dir = tempdir().unwrap();
        let state = empty_state(&dir);
        state.properties.save::<Property>(&[]).unwrap();

        let result =
            update_property(State(state), Path(42), Json(PropertyPayload::default())).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_news_created_newest_first() {
        let dir = tempdir().unwrap();
        let state = empty_state(&dir);

        let first: NewsPayload = serde_json::from_str(r#"{"title": "First"}"#).unwrap();
        create_news(State(state.clone()), HeaderMap::new(), Json(first))
            .await
            .unwrap();
        let second: NewsPayload = serde_json::from_str(r#"{"title": "Second"}"#).unwrap();
        create_news(State(state.clone()), HeaderMap::new(), Json(second))
            .await
            .unwrap();

        let articles: Vec<NewsArticle> = state.news.load().unwrap();
        assert_eq!(articles[0].title, "Second");
        assert_eq!(articles[1].title, "First");
    }

    #[tokio::test]
    async fn test_api_key_lifecycle() {
        let dir = tempdir().unwrap();
        let state = empty_state(&dir);

        let created = create_api_key(
            State(state.clone()),
            Json(ApiKeyCreate {
                name: Some("Website".into()),
            }),
        )
        .await
        .unwrap();
        assert!(created.0.key.starts_with("pp_"));

        let listed = list_api_keys(State(state.clone())).await.unwrap();
        assert_eq!(listed.0.len(), 1);

        delete_api_key(State(state.clone()), Path(created.0.id.clone()))
            .await
            .unwrap();
        let listed = list_api_keys(State(state)).await.unwrap();
        assert!(listed.0.is_empty());
    }
}
