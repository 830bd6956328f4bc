//! 全局归一化器单例测试（独立进程，避免与其他测试共享状态）
use std::path::PathBuf;

use serde_json::json;

use rtaxon::{init_normalizer_with_config, normalize_products, ConfigManager, TaxonError};

#[tokio::test]
async fn test_global_normalizer_lifecycle() {
    // 1. 未初始化时报错
    let result = normalize_products(vec![json!({"Name": "Shea Lip Balm"})]);
    assert!(matches!(result, Err(TaxonError::NormalizerNotInitialized)));

    // 2. 初始化（重复初始化无副作用）
    let maps_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("maps");
    let config = ConfigManager::custom().maps_dir(maps_dir).build();
    init_normalizer_with_config(config.clone()).await.unwrap();
    init_normalizer_with_config(config).await.unwrap();

    // 3. 批处理
    let output = normalize_products(vec![
        json!({"id": 1, "Name": "Shea Lip Balm"}),
        json!({"id": 1, "Name": "Shea Lip Balm Duplicate"}),
    ])
    .unwrap();
    assert_eq!(output.records.len(), 1);
    assert_eq!(output.records[0].id, "1");
    assert_eq!(output.records[0].product_type, "Lip Balm");
}
