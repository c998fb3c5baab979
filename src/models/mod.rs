//! Request and Response models for the listings API
//!
//! DTOs used to deserialize admin payloads and serialize response bodies.

pub mod requests;
pub mod responses;

pub use requests::{ApiKeyCreate, NewsPayload, PropertyPayload};
pub use responses::{
    CacheStatsResponse, DashboardStats, Distribution, ErrorResponse, HealthResponse,
    ListingResponse, MapPin, MapResponse, MessageResponse, RankedDistribution,
};
