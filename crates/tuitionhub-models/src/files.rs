use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use tuitionhub_core::serde::deserialize_uuid_filter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "file_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Video,
    Link,
    Note,
}

/// Leaf of the content hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ContentFile {
    pub id: Uuid,
    pub chapter_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub file_type: FileType,
    pub file_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFileDto {
    pub chapter_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub file_type: FileType,
    #[validate(url(message = "File URL must be a valid URL"))]
    #[schema(example = "https://cdn.example.com/notes/chapter-1.pdf")]
    pub file_url: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateFileDto {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub file_type: Option<FileType>,
    #[validate(url(message = "File URL must be a valid URL"))]
    pub file_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FileFilterParams {
    #[serde(default, deserialize_with = "deserialize_uuid_filter")]
    #[param(value_type = Option<String>)]
    pub chapter_id: Option<Uuid>,
}
