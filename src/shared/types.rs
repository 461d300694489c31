use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform JSON envelope returned by every endpoint.
///
/// Successful responses leave `code` unset; error responses always carry a
/// stable machine-readable `code` next to the human `message`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            code: None,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(
        code: &str,
        message: Option<String>,
        errors: Option<Vec<String>>,
    ) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            code: Some(code.to_string()),
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

/// Body returned by delete endpoints.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponseDto {
    pub id: uuid::Uuid,
    pub deleted: bool,
}
