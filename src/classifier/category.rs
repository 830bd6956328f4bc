//! 主分类映射器
//! 分类字段优先，未命中时回退到名称/描述文本推断

use tracing::trace;

use crate::compiler::CompiledTaxonomy;
use crate::taxonomy::labels;
use crate::utils::TextNormalizer;

/// 主分类映射器
pub struct CategoryMapper;

impl CategoryMapper {
    /// 将原始分类/子分类映射为主分类，未命中返回 "Other"
    ///
    /// 所有输入按顺序展开为短语序列，每个短语按最长优先扫描映射键，
    /// 首个有界命中（或整串相等）即返回。
    pub fn map_main_category(
        compiled: &CompiledTaxonomy,
        categories: &[&str],
        subcategories: &str,
    ) -> String {
        let phrases = categories
            .iter()
            .copied()
            .chain(std::iter::once(subcategories))
            .filter(|s| !s.is_empty());

        for phrase in phrases {
            let normalized = TextNormalizer::normalize(phrase);
            if normalized.is_empty() {
                continue;
            }
            if let Some(pattern) = compiled
                .category_patterns
                .iter()
                .find(|p| p.matches_field(&normalized))
            {
                trace!("分类短语 {:?} 命中键 {:?}", normalized, pattern.key);
                return pattern.label.clone();
            }
        }

        labels::OTHER.to_string()
    }

    /// 名称回退：对名称+描述文本执行同样的最长优先有界扫描
    pub fn infer_category_from_name(
        compiled: &CompiledTaxonomy,
        name: &str,
        description: &str,
    ) -> String {
        let text = TextNormalizer::normalize(&format!("{} {}", name, description));
        if text.is_empty() {
            return labels::OTHER.to_string();
        }

        compiled
            .category_patterns
            .iter()
            .find(|p| p.matches_name(&text))
            .map(|p| p.label.clone())
            .unwrap_or_else(|| labels::OTHER.to_string())
    }

    /// 字段映射 + 名称回退
    pub fn resolve(
        compiled: &CompiledTaxonomy,
        categories: &[&str],
        subcategories: &str,
        name: &str,
        description: &str,
    ) -> String {
        let mapped = Self::map_main_category(compiled, categories, subcategories);
        if mapped != labels::OTHER {
            return mapped;
        }
        Self::infer_category_from_name(compiled, name, description)
    }
}
