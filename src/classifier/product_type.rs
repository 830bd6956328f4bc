//! 产品类型分类器
//! 六级策略级联，按固定优先级执行，首个命中即返回

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::compiler::{CompiledTaxonomy, SynonymPattern};
use crate::taxonomy::labels;
use crate::utils::TextNormalizer;

/// 分类策略（声明顺序即优先级）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// 信任供应商已给出的类型
    TrustExisting,
    /// 整词/整短语匹配
    BoundedPhrase,
    /// 多词子集匹配
    WordSubset,
    /// 无界子串匹配
    Substring,
    /// 分类字段回退（先有界，后子串）
    CategoryText,
    /// 固定正则兜底表
    FallbackPattern,
}

/// 级联顺序
pub const STRATEGY_ORDER: [Strategy; 6] = [
    Strategy::TrustExisting,
    Strategy::BoundedPhrase,
    Strategy::WordSubset,
    Strategy::Substring,
    Strategy::CategoryText,
    Strategy::FallbackPattern,
];

/// 兜底规则：all_of 中每个模式都须命中（与出现顺序无关）
struct FallbackRule {
    label: &'static str,
    all_of: &'static [&'static str],
}

/// 兜底规则表，按表序扫描
/// 组合规则须排在其单词规则之前：Face Cleanser 先于 Shampoo（后者也匹配 cleanser），
/// Leave-In Conditioner 先于 Conditioner，否则前者永远不会命中
const FALLBACK_RULES: &[FallbackRule] = &[
    FallbackRule { label: "Face Mask", all_of: &[r"\b(?:mask|masque)\b"] },
    FallbackRule { label: "Hair Cream", all_of: &[r"\b(?:cream|creme)\b", r"\b(?:hair|curl)\b"] },
    FallbackRule { label: "Hair Oil", all_of: &[r"\boil\b", r"\b(?:hair|scalp)\b"] },
    FallbackRule { label: "Hair Gel", all_of: &[r"\b(?:gel|gelly|custard)\b", r"\b(?:hair|curl|style)\b"] },
    FallbackRule { label: "Hair Butter", all_of: &[r"\bbutter\b", r"\b(?:hair|curl|body)\b"] },
    FallbackRule { label: "Hair Brush", all_of: &[r"\bbrush\b", r"\b(?:hair|wave|style)\b"] },
    FallbackRule { label: "Face Cleanser", all_of: &[r"\bcleanser\b", r"\b(?:face|facial)\b"] },
    FallbackRule { label: "Shampoo", all_of: &[r"\b(?:shampoo|cleanser)\b"] },
    FallbackRule { label: "Leave-In Conditioner", all_of: &[r"\bleave.?in\b"] },
    FallbackRule { label: "Conditioner", all_of: &[r"\bconditioner\b"] },
    FallbackRule { label: "Face Serum", all_of: &[r"\bserum\b", r"\b(?:face|facial|skin)\b"] },
    FallbackRule { label: "Face Scrub", all_of: &[r"\bscrub\b", r"\b(?:face|facial)\b"] },
    FallbackRule { label: "Body Scrub", all_of: &[r"\bscrub\b", r"\bbody\b"] },
    FallbackRule { label: "Face Moisturizer", all_of: &[r"\bmoisturizer\b", r"\b(?:face|facial)\b"] },
    FallbackRule { label: "Body Butter", all_of: &[r"\b(?:moisturizer|lotion)\b", r"\bbody\b"] },
    FallbackRule { label: "Lip Balm", all_of: &[r"\bbalm\b", r"\blip\b"] },
    FallbackRule { label: "Lip Gloss", all_of: &[r"\bgloss\b", r"\blip\b"] },
    FallbackRule { label: "Nail Polish", all_of: &[r"\bpolish\b", r"\bnail\b"] },
    FallbackRule { label: "Scented Candle", all_of: &[r"\bcandle\b"] },
    FallbackRule { label: "Perfume", all_of: &[r"\b(?:perfume|fragrance|cologne)\b"] },
    FallbackRule { label: "Dress", all_of: &[r"\bdress\b"] },
    FallbackRule { label: "Bikini", all_of: &[r"\bbikini\b"] },
    FallbackRule { label: "Handbag", all_of: &[r"\b(?:bag|handbag|purse)\b"] },
    FallbackRule { label: "Bar Soap", all_of: &[r"\bsoap\b", r"\bbar\b"] },
    FallbackRule { label: "Vitamins", all_of: &[r"\b(?:vitamins|supplements)\b"] },
];

/// 编译后的兜底规则
struct CompiledFallback {
    label: &'static str,
    regexes: Vec<Regex>,
}

static COMPILED_FALLBACK: Lazy<Vec<CompiledFallback>> = Lazy::new(|| {
    FALLBACK_RULES
        .iter()
        .map(|rule| CompiledFallback {
            label: rule.label,
            regexes: rule
                .all_of
                .iter()
                .map(|p| RegexBuilder::new(p).case_insensitive(true).build().unwrap())
                .collect(),
        })
        .collect()
});

/// 级联输入
struct Evidence<'a> {
    existing_type: &'a str,
    text: String,
    category_text: String,
}

/// 产品类型分类器
pub struct ProductTypeClassifier;

impl ProductTypeClassifier {
    /// 产品类型映射，未命中返回 "Other"
    pub fn map_product_type(
        compiled: &CompiledTaxonomy,
        name: &str,
        description: &str,
        categories: &[&str],
        existing_type: &str,
    ) -> String {
        Self::classify(compiled, name, description, categories, existing_type)
            .map(|(label, _)| label)
            .unwrap_or_else(|| labels::OTHER.to_string())
    }

    /// 执行级联，返回命中的标签与策略
    pub fn classify(
        compiled: &CompiledTaxonomy,
        name: &str,
        description: &str,
        categories: &[&str],
        existing_type: &str,
    ) -> Option<(String, Strategy)> {
        let evidence = Evidence {
            existing_type,
            text: TextNormalizer::clean_for_matching(&format!("{} {}", name, description)),
            category_text: TextNormalizer::clean_for_matching(&categories.join(" ")),
        };

        STRATEGY_ORDER.iter().find_map(|strategy| {
            Self::apply(*strategy, compiled, &evidence).map(|label| {
                trace!("产品类型 {:?} 由策略 {:?} 命中", label, strategy);
                (label, *strategy)
            })
        })
    }

    /// 单个策略求值
    fn apply(strategy: Strategy, compiled: &CompiledTaxonomy, evidence: &Evidence) -> Option<String> {
        let synonyms = &compiled.synonym_patterns;
        match strategy {
            Strategy::TrustExisting => {
                let existing = evidence.existing_type.trim();
                (!existing.is_empty() && existing != labels::OTHER).then(|| existing.to_string())
            }
            Strategy::BoundedPhrase => Self::first_label(synonyms, |s| s.matches_bounded(&evidence.text)),
            Strategy::WordSubset => {
                let words: FxHashSet<&str> = evidence.text.split(' ').filter(|w| !w.is_empty()).collect();
                Self::first_label(synonyms, |s| s.matches_subset(&words))
            }
            Strategy::Substring => Self::first_label(synonyms, |s| s.matches_substring(&evidence.text)),
            Strategy::CategoryText => {
                if evidence.category_text.is_empty() {
                    return None;
                }
                Self::first_label(synonyms, |s| s.matches_bounded(&evidence.category_text))
                    .or_else(|| Self::first_label(synonyms, |s| s.matches_substring(&evidence.category_text)))
            }
            Strategy::FallbackPattern => Self::fallback_label(&evidence.text).map(str::to_string),
        }
    }

    /// 按最长优先顺序返回首个满足条件的同义词标签
    fn first_label<F>(synonyms: &[SynonymPattern], predicate: F) -> Option<String>
    where
        F: Fn(&SynonymPattern) -> bool,
    {
        synonyms.iter().find(|s| predicate(s)).map(|s| s.label.clone())
    }

    /// 兜底规则表扫描
    pub fn fallback_label(text: &str) -> Option<&'static str> {
        if text.is_empty() {
            return None;
        }
        COMPILED_FALLBACK
            .iter()
            .find(|rule| rule.regexes.iter().all(|r| r.is_match(text)))
            .map(|rule| rule.label)
    }
}
