use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use tuitionhub_core::serde::deserialize_uuid_filter;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Chapter {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chapter with the breadcrumb back up to its class.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ChapterWithContext {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub subject_name: String,
    pub class_id: Uuid,
    pub class_name: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateChapterDto {
    pub subject_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[schema(example = "Quadratic Equations")]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateChapterDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChapterFilterParams {
    #[serde(default, deserialize_with = "deserialize_uuid_filter")]
    #[param(value_type = Option<String>)]
    pub subject_id: Option<Uuid>,
}
