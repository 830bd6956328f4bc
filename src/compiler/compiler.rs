//! 映射表编译器核心
//! 将映射表编译为最长优先、带边界约束的匹配模式

use std::time::Instant;
use regex::{escape, Regex};
use tracing::{debug, warn};

use super::pattern::{CategoryPattern, CompiledTaxonomy, SynonymPattern};
use crate::error::TaxonResult;
use crate::taxonomy::{CategoryMap, SynonymMap, TaxonomyMaps};
use crate::utils::TextNormalizer;

/// 分类字段边界：字符串首尾或分隔符
const FIELD_LEFT_BOUND: &str = r"(?:^|[\s,;/\-])";
const FIELD_RIGHT_BOUND: &str = r"(?:$|[\s,;/\-])";
/// 名称推断的右边界额外允许 `'` 与 `s`（所有格/复数）
const NAME_RIGHT_BOUND: &str = r"(?:$|[\s,;/\-'s])";

/// 映射表编译器
pub struct TaxonomyCompiler;

impl TaxonomyCompiler {
    /// 编译映射库
    pub fn compile(maps: &TaxonomyMaps) -> TaxonResult<CompiledTaxonomy> {
        let start = Instant::now();
        let mut stats = CompileStats::default();

        // 1. 编译主分类键
        let category_patterns = Self::compile_category_map(&maps.category_map, &mut stats)?;

        // 2. 编译同义词
        let synonym_patterns = Self::compile_synonym_map(&maps.synonym_map, &mut stats)?;

        // 3. 输出编译统计
        debug!(
            "✅ 映射表编译完成，耗时{:?}：主分类键 {} 个，同义词 {} 个，跳过 {} 个",
            start.elapsed(),
            stats.category_count,
            stats.synonym_count,
            stats.skipped_count
        );

        Ok(CompiledTaxonomy {
            category_patterns,
            synonym_patterns,
        })
    }

    /// 编译主分类映射
    fn compile_category_map(
        map: &CategoryMap,
        stats: &mut CompileStats,
    ) -> TaxonResult<Vec<CategoryPattern>> {
        let mut patterns = Vec::with_capacity(map.len());

        for (key, label) in Self::longest_first(map) {
            let escaped = escape(key);
            let field_regex = Regex::new(&format!("{}{}{}", FIELD_LEFT_BOUND, escaped, FIELD_RIGHT_BOUND))?;
            let name_regex = Regex::new(&format!("{}{}{}", FIELD_LEFT_BOUND, escaped, NAME_RIGHT_BOUND))?;

            patterns.push(CategoryPattern {
                key: key.to_string(),
                label: label.to_string(),
                field_regex,
                name_regex,
            });
            stats.category_count += 1;
        }

        Ok(patterns)
    }

    /// 编译产品类型同义词
    fn compile_synonym_map(
        map: &SynonymMap,
        stats: &mut CompileStats,
    ) -> TaxonResult<Vec<SynonymPattern>> {
        let mut patterns = Vec::with_capacity(map.len());

        for (key, label) in Self::longest_first(map) {
            // 与被匹配文本使用同一清洗规则，否则带标点的键永远无法命中
            let match_key = TextNormalizer::clean_for_matching(key);
            if match_key.is_empty() {
                warn!("同义词 {:?} 不含任何单词字符，已跳过", key);
                stats.skipped_count += 1;
                continue;
            }

            let word_regex = Regex::new(&format!(r"\b{}\b", escape(&match_key)))?;
            let words = match_key.split(' ').map(str::to_string).collect();

            patterns.push(SynonymPattern {
                key: key.to_string(),
                match_key,
                label: label.to_string(),
                word_regex,
                words,
            });
            stats.synonym_count += 1;
        }

        Ok(patterns)
    }

    /// 派生最长优先顺序，长度相同时按字典序保证确定性
    fn longest_first(map: &crate::taxonomy::PhraseMap) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = map.iter().collect();
        entries.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.0.cmp(b.0))
        });
        entries
    }
}

/// 编译统计信息
#[derive(Debug, Clone, Default)]
struct CompileStats {
    category_count: usize,
    synonym_count: usize,
    skipped_count: usize,
}
