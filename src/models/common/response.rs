use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::ErrorCode;
use crate::errors::ErpError;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success.as_i32(),
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success.as_i32(),
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.as_i32(),
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 将存储层/计算层错误映射为 HTTP 响应
    ///
    /// - Validation -> 400（使用调用方给出的业务码）
    /// - NotFound -> 404
    /// - Conflict -> 409
    /// - 其他 -> 500
    pub fn from_erp_error(err: &ErpError, validation_code: ErrorCode) -> HttpResponse {
        match err {
            ErpError::Validation(msg) => {
                HttpResponse::BadRequest().json(Self::error_empty(validation_code, msg.clone()))
            }
            ErpError::NotFound(msg) => {
                HttpResponse::NotFound().json(Self::error_empty(ErrorCode::NotFound, msg.clone()))
            }
            ErpError::Conflict(msg) => {
                HttpResponse::Conflict().json(Self::error_empty(ErrorCode::Conflict, msg.clone()))
            }
            other => HttpResponse::InternalServerError().json(Self::error_empty(
                ErrorCode::InternalServerError,
                other.format_simple(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_success_envelope() {
        let resp = ApiResponse::success(42_i64, "ok");
        assert_eq!(resp.code, 0);
        assert_eq!(resp.data, Some(42));
    }

    #[test]
    fn test_erp_error_status_mapping() {
        let cases = [
            (ErpError::validation("bad"), StatusCode::BAD_REQUEST),
            (ErpError::not_found("missing"), StatusCode::NOT_FOUND),
            (ErpError::conflict("dup"), StatusCode::CONFLICT),
            (
                ErpError::database_operation("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            let resp = ApiResponse::from_erp_error(&err, ErrorCode::ValidationFailed);
            assert_eq!(resp.status(), status);
        }
    }
}
