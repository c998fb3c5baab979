//! Request DTOs for the admin endpoints.
//!
//! Every field is optional so the same payload type serves create and
//! partial-merge edits: absent fields leave the stored record untouched.

use serde::Deserialize;

use crate::store::{NewsArticle, Property, PropertyImage};

// == Property Payload ==
/// Create/update body for a property record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyPayload {
    pub development_name: Option<String>,
    pub reference_id: Option<String>,
    pub country: Option<String>,
    pub province: Option<String>,
    pub town: Option<String>,
    #[serde(rename = "type")]
    pub subtype: Option<String>,
    pub market: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price: Option<f64>,
    pub price_to: Option<f64>,
    pub built_area: Option<f64>,
    pub built_area_to: Option<f64>,
    pub beds: Option<u32>,
    pub baths: Option<u32>,
    pub completion_date: Option<i64>,
    pub ready_project: Option<bool>,
    pub developer: Option<String>,
    pub description: Option<String>,
    pub amenities: Option<Vec<String>>,
    /// Image URLs; replaces the record's image list wholesale
    pub photos: Option<Vec<String>>,
}

impl PropertyPayload {
    /// Merges the present fields into `record`, leaving the rest untouched.
    pub fn apply(&self, record: &mut Property) {
        if let Some(v) = &self.development_name {
            record.development_name = v.clone();
        }
        if let Some(v) = &self.reference_id {
            record.reference_id = v.clone();
        }
        if let Some(v) = &self.country {
            record.country = v.clone();
        }
        if let Some(v) = &self.province {
            record.province = v.clone();
        }
        if let Some(v) = &self.town {
            record.town = v.clone();
        }
        if let Some(v) = &self.subtype {
            record.subtype = v.clone();
        }
        if let Some(v) = &self.market {
            record.market = Some(v.clone());
        }
        if let Some(v) = self.latitude {
            record.latitude = v;
        }
        if let Some(v) = self.longitude {
            record.longitude = v;
        }
        if let Some(v) = self.price {
            record.price = v;
        }
        if let Some(v) = self.price_to {
            record.price_to = v;
        }
        if let Some(v) = self.built_area {
            record.built_area = v;
        }
        if let Some(v) = self.built_area_to {
            record.built_area_to = v;
        }
        if let Some(v) = self.beds {
            record.beds = v;
        }
        if let Some(v) = self.baths {
            record.baths = v;
        }
        if let Some(v) = self.completion_date {
            record.completion_date = v;
        }
        if let Some(v) = self.ready_project {
            record.ready_project = v;
        }
        if let Some(v) = &self.developer {
            record.developer = v.clone();
        }
        if let Some(v) = &self.description {
            record.description = v.clone();
        }
        if let Some(v) = &self.amenities {
            record.amenities = v.clone();
        }
        if let Some(photos) = &self.photos {
            record.images = photos
                .iter()
                .map(|url| PropertyImage {
                    image_url: url.clone(),
                })
                .collect();
        }
    }
}

// == News Payload ==
/// Create/update body for a news article.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsPayload {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub published: Option<bool>,
}

impl NewsPayload {
    pub fn apply(&self, article: &mut NewsArticle) {
        if let Some(v) = &self.title {
            article.title = v.clone();
        }
        if let Some(v) = &self.content {
            article.content = v.clone();
        }
        if let Some(v) = &self.image {
            article.image = Some(v.clone());
        }
        if let Some(v) = self.published {
            article.published = v;
        }
    }
}

// == Api Key Create ==
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiKeyCreate {
    pub name: Option<String>,
}
