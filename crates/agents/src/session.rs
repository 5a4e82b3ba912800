//! Per-conversation state: named JSON values written by tools plus the ad
//! request fields gathered so far.

use chrono::{DateTime, Utc};
use marketing_core::{AdRequest, MarketingResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

pub const IMAGE_GENERATION_OUTPUT: &str = "image_generation_output";
pub const IMAGE_EDITING_OUTPUT: &str = "image_editing_output";
pub const IMAGE_EDITING_REQUEST: &str = "image_editing_request";
pub const AD_COPY_OUTPUT: &str = "ad_copy_output";

/// State owned by one conversation. Nothing here is shared across sessions.
#[derive(Debug, Clone)]
pub struct SessionState {
    id: Uuid,
    created_at: DateTime<Utc>,
    values: BTreeMap<String, Value>,
    ad_request: Option<AdRequest>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            values: BTreeMap::new(),
            ad_request: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Serialize and store a value.
    pub fn set_json<T: Serialize>(&mut self, key: impl Into<String>, value: &T) -> MarketingResult<()> {
        let value = serde_json::to_value(value)?;
        self.set(key, value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Deserialize a stored value; `Ok(None)` when the key is absent.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> MarketingResult<Option<T>> {
        self.values
            .get(key)
            .map(|v| serde_json::from_value(v.clone()))
            .transpose()
            .map_err(Into::into)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn ad_request(&self) -> Option<&AdRequest> {
        self.ad_request.as_ref()
    }

    /// Fill blank fields of this turn's request from earlier turns and
    /// remember the result. Existing copy is never carried over.
    pub fn merge_request(&mut self, mut request: AdRequest) -> AdRequest {
        if let Some(previous) = &self.ad_request {
            if request.product_or_service.trim().is_empty() {
                request.product_or_service = previous.product_or_service.clone();
            }
            if request.target_audience.trim().is_empty() {
                request.target_audience = previous.target_audience.clone();
            }
            if request.promotion().is_none() {
                request.promotion_details = previous.promotion_details.clone();
            }
            if request.format.is_none() {
                request.format = previous.format;
            }
            if request.brand_voice.is_none() {
                request.brand_voice = previous.brand_voice.clone();
            }
        }
        let mut remembered = request.clone();
        remembered.existing_copy = None;
        self.ad_request = Some(remembered);
        request
    }

    /// Snapshot of every stored value, keyed by name.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
