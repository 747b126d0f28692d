use crate::error::{RadiantError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Where a paginated response keeps its items
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ItemField {
    /// The platform's default `results` array
    #[default]
    Results,
    /// A named array, e.g. `features` for GeoJSON collections
    Named(String),
}

impl ItemField {
    pub fn features() -> Self {
        ItemField::Named("features".to_string())
    }

    pub fn key(&self) -> &str {
        match self {
            ItemField::Results => "results",
            ItemField::Named(name) => name,
        }
    }
}

/// One response unit from a paged-list endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based index of this page as reported by the server
    pub page: u32,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u32, has_next: bool) -> Self {
        Self { items, page, has_next }
    }

    /// A page with no successor
    pub fn last(items: Vec<T>, page: u32) -> Self {
        Self::new(items, page, false)
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode a raw platform response, taking items from `field`.
    pub fn from_value(mut value: Value, field: &ItemField) -> Result<Self> {
        let page = value
            .get("page")
            .and_then(Value::as_u64)
            .ok_or_else(|| RadiantError::MissingField { field: "page".to_string() })?;
        let has_next = value
            .get("hasNext")
            .and_then(Value::as_bool)
            .ok_or_else(|| RadiantError::MissingField { field: "hasNext".to_string() })?;

        let items = match value.get_mut(field.key()).map(Value::take) {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(serde_json::from_value)
                .collect::<std::result::Result<Vec<T>, _>>()?,
            Some(Value::Null) | None => {
                return Err(RadiantError::MissingField { field: field.key().to_string() })
            }
            Some(other) => {
                return Err(RadiantError::Serialization(format!(
                    "expected '{}' to be an array, found {}",
                    field.key(),
                    other
                )))
            }
        };

        let page = u32::try_from(page).map_err(|_| RadiantError::Serialization(format!(
            "page index {} out of range",
            page
        )))?;

        Ok(Page { items, page, has_next })
    }
}
