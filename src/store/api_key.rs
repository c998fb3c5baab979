//! API key records for the public read API.

use rand::RngCore;
use serde::{Deserialize, Serialize};

// == Api Key Record ==
/// A stored API credential pair.
///
/// The secret is kept verbatim in the store file and returned exactly once on
/// creation; list responses go through [`ApiKeySummary`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyRecord {
    pub id: String,
    pub name: String,
    pub key: String,
    pub secret: String,
    pub status: String,
    #[serde(default)]
    pub last_used: Option<String>,
    pub created_at: String,
}

impl ApiKeyRecord {
    /// Generates a fresh credential pair: `pp_` + 48 hex chars for the key,
    /// 64 hex chars for the secret.
    pub fn generate(name: String) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            id: chrono::Utc::now().timestamp_millis().to_string(),
            name,
            key: format!("pp_{}", hex_token(&mut rng, 24)),
            secret: hex_token(&mut rng, 32),
            status: "active".to_string(),
            last_used: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == "active"
    }

    pub fn summary(&self) -> ApiKeySummary {
        ApiKeySummary {
            id: self.id.clone(),
            name: self.name.clone(),
            key: self.key.clone(),
            status: self.status.clone(),
            last_used: self.last_used.clone(),
            created_at: self.created_at.clone(),
        }
    }
}

// == Api Key Summary ==
/// An API key record with the secret redacted, for list responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiKeySummary {
    pub id: String,
    pub name: String,
    pub key: String,
    pub status: String,
    pub last_used: Option<String>,
    pub created_at: String,
}

fn hex_token(rng: &mut impl RngCore, bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rng.fill_bytes(&mut buf);
    buf.iter().map(|b| format!("{b:02x}")).collect()
}
