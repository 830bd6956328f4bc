//! 分类统计
//! 负责统计数据的定义、汇总与报告输出，始终基于最终输出集合重建

use std::collections::BTreeMap;
use std::fmt;
use serde::Serialize;

use crate::record::NormalizedProductRecord;
use crate::taxonomy::labels;

/// 报告中展示的产品类型数量
const REPORT_TOP_TYPES: usize = 15;

/// 分类统计信息
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassificationStats {
    /// 记录总数
    pub total: usize,
    /// 主分类分布
    pub main_categories: BTreeMap<String, usize>,
    /// 产品类型分布
    pub product_types: BTreeMap<String, usize>,
    /// 形态分布
    pub forms: BTreeMap<String, usize>,
    /// 套装分布
    pub set_bundles: BTreeMap<String, usize>,
    /// 产品类型为 "Other" 的记录数
    pub other_total: usize,
    /// 产品类型为 "Other" 的名称样本（截断，有上限）
    pub other_samples: Vec<String>,
}

impl ClassificationStats {
    /// 由最终记录集合重建统计
    pub fn from_records(
        records: &[NormalizedProductRecord],
        sample_limit: usize,
        name_width: usize,
    ) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.record(record, sample_limit, name_width);
        }
        stats
    }

    fn record(&mut self, record: &NormalizedProductRecord, sample_limit: usize, name_width: usize) {
        self.total += 1;
        *self.main_categories.entry(record.main_category.clone()).or_default() += 1;
        *self.product_types.entry(record.product_type.clone()).or_default() += 1;
        *self.forms.entry(record.form.clone()).or_default() += 1;
        *self.set_bundles.entry(record.set_bundle.clone()).or_default() += 1;

        if record.product_type == labels::OTHER {
            self.other_total += 1;
            if self.other_samples.len() < sample_limit {
                self.other_samples.push(record.name.chars().take(name_width).collect());
            }
        }
    }

    /// 计数降序、标签升序
    pub fn most_common(counts: &BTreeMap<String, usize>, n: usize) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }

    pub fn count_main_category(&self, label: &str) -> usize {
        self.main_categories.get(label).copied().unwrap_or(0)
    }

    pub fn count_product_type(&self, label: &str) -> usize {
        self.product_types.get(label).copied().unwrap_or(0)
    }
}

// ======== 为 ClassificationStats 实现 Display trait（用于 CLI / Report 输出） ========
impl fmt::Display for ClassificationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(f, "NORMALIZATION REPORT ({} products)", self.total)?;
        writeln!(f, "{}", "=".repeat(50))?;

        writeln!(f, "\nALL MAIN CATEGORIES:")?;
        for (label, count) in Self::most_common(&self.main_categories, usize::MAX) {
            writeln!(f, "  {}: {}", label, count)?;
        }

        writeln!(f, "\nTOP PRODUCT TYPES:")?;
        for (label, count) in Self::most_common(&self.product_types, REPORT_TOP_TYPES) {
            writeln!(f, "  {}: {}", label, count)?;
        }

        writeln!(f, "\nPRODUCT FORMS:")?;
        for (label, count) in Self::most_common(&self.forms, usize::MAX) {
            writeln!(f, "  {}: {}", label, count)?;
        }

        writeln!(f, "\nSET/BUNDLE DISTRIBUTION:")?;
        for (label, count) in Self::most_common(&self.set_bundles, usize::MAX) {
            writeln!(f, "  {}: {}", label, count)?;
        }

        if !self.other_samples.is_empty() {
            writeln!(
                f,
                "\nUNKNOWN PRODUCT TYPES ({} total, first {}):",
                self.other_total,
                self.other_samples.len()
            )?;
            for name in &self.other_samples {
                writeln!(f, "  - {}", name)?;
            }
        }

        Ok(())
    }
}
