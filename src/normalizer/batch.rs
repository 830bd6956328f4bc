//! 批处理器
//! 逐条归一化，单条失败只跳过该条；完成后按 ID 去重（首个出现者保留）并重建统计

use rustc_hash::FxHashSet;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::normalizer::RecordNormalizer;
use super::stats::ClassificationStats;
use crate::error::TaxonError;
use crate::record::NormalizedProductRecord;

/// 单条记录失败信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFailure {
    /// 在输入序列中的位置
    pub index: usize,
    pub reason: String,
}

/// 批处理结果
#[derive(Debug, Clone, Default)]
pub struct BatchOutput {
    /// 去重后的记录，保持输入顺序
    pub records: Vec<NormalizedProductRecord>,
    /// 基于 `records` 重建的统计
    pub stats: ClassificationStats,
    pub failures: Vec<RecordFailure>,
    pub duplicates_removed: usize,
}

/// 批处理器
pub struct BatchProcessor<'a> {
    normalizer: &'a RecordNormalizer,
}

impl<'a> BatchProcessor<'a> {
    pub fn new(normalizer: &'a RecordNormalizer) -> Self {
        Self { normalizer }
    }

    /// 处理整批原始记录
    pub fn process(&self, values: Vec<Value>) -> BatchOutput {
        let total = values.len();
        let mut normalized = Vec::with_capacity(total);
        let mut failures = Vec::new();

        // 1. 逐条归一化
        for (index, value) in values.into_iter().enumerate() {
            match self.normalizer.normalize_value(value, index) {
                Ok(record) => normalized.push(record),
                Err(e) => {
                    warn!("跳过第 {} 条记录：{}", index, e);
                    failures.push(RecordFailure {
                        index,
                        reason: failure_reason(e),
                    });
                }
            }
        }

        // 2. 去重
        let before = normalized.len();
        let records = dedup_first_wins(normalized);
        let duplicates_removed = before - records.len();
        if duplicates_removed > 0 {
            debug!("移除重复记录 {} 条", duplicates_removed);
        }

        // 3. 基于最终集合重建统计
        let config = self.normalizer.config();
        let stats = ClassificationStats::from_records(
            &records,
            config.other_sample_limit,
            config.other_name_width,
        );

        info!(
            "归一化完成：{} / {} 条（失败 {} 条，去重 {} 条）",
            records.len(),
            total,
            failures.len(),
            duplicates_removed
        );

        BatchOutput {
            records,
            stats,
            failures,
            duplicates_removed,
        }
    }
}

fn failure_reason(error: TaxonError) -> String {
    match error {
        TaxonError::InvalidRecord { reason, .. } => reason,
        other => other.to_string(),
    }
}

/// 按 ID 去重，保留输入顺序中的首个记录
pub fn dedup_first_wins(records: Vec<NormalizedProductRecord>) -> Vec<NormalizedProductRecord> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    records
        .into_iter()
        .filter(|record| seen.insert(record.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use crate::taxonomy::TaxonomyLoader;
    use serde_json::json;

    fn normalizer() -> RecordNormalizer {
        let maps = TaxonomyLoader::from_json_str(
            r#"{"hair care": "Hair Care", "clothing": "Clothing"}"#,
            r#"{"shampoo": "Shampoo"}"#,
        )
        .unwrap();
        RecordNormalizer::from_maps(&maps, ConfigManager::get_default()).unwrap()
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let output = normalizer().normalize_batch(vec![
            json!({"id": "1", "Name": "Moisture Shampoo", "Main Category": "Hair Care"}),
            json!({"id": "2", "Name": "Mystery Item"}),
            json!({"id": "1", "Name": "Different Name"}),
        ]);

        assert_eq!(output.records.len(), 2);
        assert_eq!(output.records[0].name, "Moisture Shampoo");
        assert_eq!(output.records[1].id, "2");
        assert_eq!(output.duplicates_removed, 1);

        // 统计只反映去重后的集合
        assert_eq!(output.stats.total, 2);
        assert_eq!(output.stats.count_product_type("Shampoo"), 1);
        assert_eq!(output.stats.count_product_type("Other"), 1);
        assert_eq!(output.stats.other_samples, vec!["Mystery Item".to_string()]);
    }

    #[test]
    fn test_bad_record_does_not_abort_batch() {
        let output = normalizer().normalize_batch(vec![
            json!({"id": "1", "Name": "Moisture Shampoo"}),
            json!([1, 2, 3]),
            json!(null),
            json!({"id": "2", "Name": "Silk Scarf"}),
        ]);

        assert_eq!(output.records.len(), 2);
        assert_eq!(
            output.failures.iter().map(|f| f.index).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert!(output.failures[0].reason.contains("array"));
    }

    #[test]
    fn test_empty_batch() {
        let output = normalizer().normalize_batch(Vec::new());
        assert!(output.records.is_empty());
        assert_eq!(output.stats.total, 0);
        assert_eq!(output.duplicates_removed, 0);
    }

    #[test]
    fn test_synthetic_ids_dedup_identical_products() {
        let output = normalizer().normalize_batch(vec![
            json!({"Name": "Oat Soap", "Company": "Acme", "Price": 5}),
            json!({"Name": "Oat Soap", "Company": "Acme", "Price": 7}),
        ]);
        assert_eq!(output.records.len(), 1);
        assert_eq!(output.records[0].price, 5.0);
    }
}
