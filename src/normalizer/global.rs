//! 全局归一化器单例管理
use once_cell::sync::Lazy;
use std::sync::Arc;
use serde_json::Value;
use tokio::sync::OnceCell;

use super::batch::BatchOutput;
use super::normalizer::RecordNormalizer;
use crate::config::{ConfigManager, NormalizerConfig};
use crate::error::{TaxonError, TaxonResult};

/// 全局归一化器实例
static GLOBAL_NORMALIZER: Lazy<Arc<OnceCell<RecordNormalizer>>> = Lazy::new(|| {
    Arc::new(OnceCell::new())
});

/// 初始化全局归一化器（默认配置）
pub async fn init_normalizer() -> TaxonResult<()> {
    init_normalizer_with_config(ConfigManager::get_default()).await
}

/// 带自定义配置初始化全局归一化器，已初始化时直接返回
pub async fn init_normalizer_with_config(config: NormalizerConfig) -> TaxonResult<()> {
    GLOBAL_NORMALIZER
        .get_or_try_init(|| RecordNormalizer::new(config))
        .await?;
    Ok(())
}

/// 获取全局归一化器
pub fn get_global_normalizer() -> TaxonResult<&'static RecordNormalizer> {
    GLOBAL_NORMALIZER.get()
        .ok_or(TaxonError::NormalizerNotInitialized)
}

/// 使用全局归一化器处理一批原始记录
pub fn normalize_products(values: Vec<Value>) -> TaxonResult<BatchOutput> {
    let normalizer = get_global_normalizer()?;
    Ok(normalizer.normalize_batch(values))
}
