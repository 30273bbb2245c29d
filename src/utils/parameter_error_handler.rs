use actix_web::{HttpRequest, HttpResponse, error, error::InternalError};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

/// JSON 请求体解析失败时返回统一的 400 响应
pub fn json_error_handler(err: error::JsonPayloadError, req: &HttpRequest) -> error::Error {
    warn!("Invalid JSON payload on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid JSON payload: {err}"),
    ));
    InternalError::from_response(err, response).into()
}

/// 查询参数解析失败时返回统一的 400 响应
pub fn query_error_handler(err: error::QueryPayloadError, req: &HttpRequest) -> error::Error {
    warn!("Invalid query parameters on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid query parameters: {err}"),
    ));
    InternalError::from_response(err, response).into()
}

/// 路径参数解析失败时返回统一的 400 响应
pub fn path_error_handler(err: error::PathError, req: &HttpRequest) -> error::Error {
    warn!("Invalid path parameters on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::BadRequest,
        format!("Invalid path parameters: {err}"),
    ));
    InternalError::from_response(err, response).into()
}
