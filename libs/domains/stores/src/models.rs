use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{StoreError, StoreResult};
use crate::slug::create_slug;

/// Store entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Store {
    pub id: Uuid,
    pub name: String,
    /// Slug derived from the name, not unique
    #[serde(rename = "url")]
    pub slug: String,
    pub address: String,
    pub phone: String,
    /// Opening hour (0-23)
    pub operational_time_start: i32,
    /// Closing hour (0-23)
    pub operational_time_end: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Product entity
///
/// `store` is attached when the product is read back through the service and
/// is never persisted with the product row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    #[serde(skip)]
    pub store_id: Uuid,
    pub name: String,
    /// Time-salted slug, unique across products
    #[serde(rename = "url")]
    pub slug: String,
    pub price: f64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub store: Option<Store>,
}

/// Body for creating or updating a store
///
/// Absent fields take their zero value so that validation, not JSON parsing,
/// reports what is missing.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct StoreRequest {
    #[validate(length(min = 1, message = "missing name"))]
    pub name: String,
    #[serde(skip)]
    pub slug: String,
    #[validate(length(min = 1, message = "missing address"))]
    pub address: String,
    #[validate(length(min = 1, message = "missing phone"))]
    pub phone: String,
    #[validate(range(min = 0, max = 23, message = "missing operational time start (0-23)"))]
    pub operational_time_start: i32,
    #[validate(range(min = 0, max = 23, message = "missing operational time end (0-23)"))]
    pub operational_time_end: i32,
}

/// Body for creating or updating a product
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct ProductRequest {
    #[validate(length(min = 1, message = "missing name"))]
    pub name: String,
    #[serde(skip)]
    pub slug: String,
    #[validate(range(min = 0.0, message = "missing price"))]
    pub price: f64,
    #[validate(length(min = 1, message = "missing description"))]
    pub description: String,
    /// `""` and `null` count as missing and fail validation
    #[serde(deserialize_with = "blank_as_nil")]
    #[validate(custom(function = "validate_store_id"))]
    pub store_id: Uuid,
}

fn blank_as_nil<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => {
            Uuid::parse_str(raw.trim()).map_err(serde::de::Error::custom)
        }
        _ => Ok(Uuid::nil()),
    }
}

fn validate_store_id(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::new("missing_store_id").with_message("missing store id".into()));
    }
    Ok(())
}

/// Report the first failing field in `order` as a BadRequest.
fn first_failure(result: Result<(), ValidationErrors>, order: &[&str]) -> StoreResult<()> {
    let Err(errors) = result else {
        return Ok(());
    };

    let fields = errors.field_errors();
    let message = order
        .iter()
        .find_map(|field| fields.get(*field))
        .and_then(|errs| errs.first())
        .and_then(|err| err.message.as_ref())
        .map(|msg| msg.to_string())
        .unwrap_or_else(|| errors.to_string());

    Err(StoreError::BadRequest(message))
}

impl StoreRequest {
    const FIELD_ORDER: [&'static str; 5] = [
        "name",
        "address",
        "phone",
        "operational_time_start",
        "operational_time_end",
    ];

    /// Validate and fill in the derived slug.
    pub fn prepare(&mut self) -> StoreResult<()> {
        first_failure(self.validate(), &Self::FIELD_ORDER)?;
        self.slug = create_slug(&self.name, false);
        Ok(())
    }
}

impl ProductRequest {
    const FIELD_ORDER: [&'static str; 4] = ["name", "price", "description", "store_id"];

    /// Validate and fill in the time-salted slug.
    pub fn prepare(&mut self) -> StoreResult<()> {
        first_failure(self.validate(), &Self::FIELD_ORDER)?;
        self.slug = create_slug(&self.name, true);
        Ok(())
    }
}

impl Store {
    pub fn new(input: StoreRequest) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            slug: input.slug,
            address: input.address,
            phone: input.phone,
            operational_time_start: input.operational_time_start,
            operational_time_end: input.operational_time_end,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Overwrite every mutable field, slug included.
    pub fn apply_update(&mut self, input: StoreRequest) {
        self.name = input.name;
        self.slug = input.slug;
        self.address = input.address;
        self.phone = input.phone;
        self.operational_time_start = input.operational_time_start;
        self.operational_time_end = input.operational_time_end;
        self.updated_at = Some(Utc::now());
    }
}

impl Product {
    pub fn new(input: ProductRequest) -> Self {
        Self {
            id: Uuid::now_v7(),
            store_id: input.store_id,
            name: input.name,
            slug: input.slug,
            price: input.price,
            description: input.description,
            created_at: Utc::now(),
            updated_at: None,
            store: None,
        }
    }

    /// Overwrite the mutable fields. The slug stays as it was at creation.
    pub fn apply_update(&mut self, input: ProductRequest) {
        self.store_id = input.store_id;
        self.name = input.name;
        self.price = input.price;
        self.description = input.description;
        self.updated_at = Some(Utc::now());
    }

    pub fn with_store(mut self, store: Store) -> Self {
        self.store = Some(store);
        self
    }
}
