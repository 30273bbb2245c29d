use crate::config::AppConfig;
use crate::storage::{Storage, create_storage, sea_orm_storage::SeaOrmStorage};
use std::sync::Arc;
use tracing::{debug, error, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 启动前准备：连接数据库并运行迁移
pub async fn prepare_server_startup() -> StartupContext {
    let config = AppConfig::get();

    warn!(
        "Preparing {} ({} environment)",
        config.app.system_name, config.app.environment
    );
    debug!(
        "Database url: {}",
        SeaOrmStorage::redact_database_url(&config.database.url)
    );

    let storage = match create_storage().await {
        Ok(storage) => storage,
        Err(e) => {
            error!("{}", e.format_simple());
            #[cfg(debug_assertions)]
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    warn!("Storage backend ready");

    StartupContext { storage }
}
