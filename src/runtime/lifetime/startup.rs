use crate::config::AppConfig;
use crate::errors::{ExamSystemError, Result};
use crate::storage::Storage;
use crate::storage::integrity::{DeletePolicies, VirtualRelation};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 打印虚拟外键及其删除策略
fn log_integrity_policies() {
    let policies = DeletePolicies::from_config(&AppConfig::get().integrity);
    for relation in VirtualRelation::ALL {
        debug!(
            "Virtual foreign key {} on delete: {:?}",
            relation,
            policies.policy(relation)
        );
    }
}

/// 启动时统计已有数据，确认存储可用
async fn report_existing_data(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(0) => info!("Database is empty, waiting for the first users"),
        Ok(count) => info!("Database already has {} user(s)", count),
        Err(e) => warn!("Failed to count users: {}", e),
    }
}

/// 准备服务器启动的上下文
/// 包括 TLS 提供者、存储和迁移
pub async fn prepare_server_startup() -> Result<StartupContext> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| ExamSystemError::configuration("Failed to install rustls crypto provider"))?;

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    if cfg!(debug_assertions) {
        log_integrity_policies();
    }

    report_existing_data(&storage).await;

    Ok(StartupContext { storage })
}
