use serde::Serialize;
use ts_rs::TS;

/// 系统信息响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SystemInfoResponse {
    pub system_name: String,                          // 系统名称
    pub version: String,                              // 服务版本
    pub environment: String,                          // 运行环境
    pub started_at: chrono::DateTime<chrono::Utc>,    // 启动时间
    pub uptime_seconds: i64,                          // 已运行秒数
}
