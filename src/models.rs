use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::db::{Category, CategoryRef, NewRecord, RecordUpdate, RecordWithCategory};
use crate::error::ApiError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Request body for adding a record
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct AddRecordRequest {
    /// Date in YYYY-MM-DD form
    pub date: Option<String>,
    /// Number or numeric string
    #[schema(value_type = f64)]
    pub amount: Option<JsonValue>,
    pub category_id: Option<i64>,
    pub remarks: Option<String>,
}

impl AddRecordRequest {
    pub fn into_new_record(self) -> Result<NewRecord, ApiError> {
        let date = self.date.ok_or(ApiError::MissingField("date"))?;
        let amount = self.amount.ok_or(ApiError::MissingField("amount"))?;

        Ok(NewRecord {
            date: parse_date(&date)?,
            amount: parse_amount(&amount)?,
            category_id: self.category_id,
            remarks: self.remarks,
        })
    }
}

/// Request body for updating a record; absent fields are left unchanged
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateRecordRequest {
    /// Explicit `null` is rejected
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub date: Option<Option<String>>,
    /// A present `null` arrives as `Some(JsonValue::Null)` and is rejected
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub amount: Option<JsonValue>,
    /// Takes precedence over `category` when non-null
    pub category_id: Option<i64>,
    /// Category name; created when no category has this name
    pub category: Option<String>,
    /// Explicit `null` clears the remark
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub remarks: Option<Option<String>>,
}

impl UpdateRecordRequest {
    pub fn into_update(self) -> Result<RecordUpdate, ApiError> {
        let date = match self.date {
            Some(Some(date)) => Some(parse_date(&date)?),
            Some(None) => return Err(ApiError::InvalidDate("null".to_string())),
            None => None,
        };
        let amount = self.amount.as_ref().map(parse_amount).transpose()?;

        let category = match (self.category_id, self.category) {
            (Some(id), _) => Some(CategoryRef::Id(id)),
            (None, Some(name)) if !name.is_empty() => Some(CategoryRef::Name(name)),
            _ => None,
        };

        Ok(RecordUpdate {
            date,
            amount,
            category,
            remarks: self.remarks,
        })
    }
}

// Distinguishes a field set to null from an absent one.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn parse_date(value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ApiError::InvalidDate(value.to_string()))
}

fn parse_amount(value: &JsonValue) -> Result<f64, ApiError> {
    let amount = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    amount
        .filter(|a| a.is_finite())
        .ok_or_else(|| ApiError::InvalidAmount(value.to_string()))
}

/// Response for write operations
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<i64>,
}

/// A record as returned by the list endpoint
#[derive(Debug, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct RecordResponse {
    pub id: i64,
    pub date: String,
    pub amount: f64,
    pub category_id: Option<i64>,
    /// Empty when the record has no category
    pub category: String,
    pub remarks: Option<String>,
}

impl From<RecordWithCategory> for RecordResponse {
    fn from(record: RecordWithCategory) -> Self {
        RecordResponse {
            id: record.id,
            date: record.date.format(DATE_FORMAT).to_string(),
            amount: record.amount,
            category_id: record.category_id,
            category: record.category,
            remarks: record.remarks,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        CategoryResponse {
            id: category.id,
            name: category.name,
        }
    }
}

/// Settings the browser client reads at startup
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ClientConfigResponse {
    pub api_base_url: String,
}
