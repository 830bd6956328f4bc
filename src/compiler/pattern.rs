//! 编译后模式模型
//! 映射键编译后的结构，按最长优先排列

use regex::Regex;
use rustc_hash::FxHashSet;

/// 编译后的主分类键
#[derive(Debug, Clone)]
pub struct CategoryPattern {
    /// 归一化后的键
    pub key: String,
    /// 规范主分类
    pub label: String,
    /// 分类字段匹配：前后须为字符串边界或分隔符
    pub field_regex: Regex,
    /// 名称推断匹配：尾部额外允许撇号或复数 s
    pub name_regex: Regex,
}

impl CategoryPattern {
    /// 分类短语是否命中（有界匹配或整串相等）
    #[inline]
    pub fn matches_field(&self, phrase: &str) -> bool {
        phrase == self.key || self.field_regex.is_match(phrase)
    }

    /// 名称文本是否命中
    #[inline]
    pub fn matches_name(&self, text: &str) -> bool {
        self.name_regex.is_match(text)
    }
}

/// 编译后的产品类型同义词
#[derive(Debug, Clone)]
pub struct SynonymPattern {
    /// 归一化后的原始键（排序依据）
    pub key: String,
    /// 去标点后的匹配键
    pub match_key: String,
    /// 规范产品类型
    pub label: String,
    /// 单词边界匹配
    pub word_regex: Regex,
    /// 匹配键的单词集合
    pub words: Vec<String>,
}

impl SynonymPattern {
    /// 整词/整短语匹配
    #[inline]
    pub fn matches_bounded(&self, text: &str) -> bool {
        self.word_regex.is_match(text)
    }

    /// 多词子集匹配：同义词的每个词都出现在文本词集中（不要求顺序与相邻）
    #[inline]
    pub fn matches_subset(&self, text_words: &FxHashSet<&str>) -> bool {
        !self.words.is_empty() && self.words.iter().all(|w| text_words.contains(w.as_str()))
    }

    /// 无界子串匹配
    #[inline]
    pub fn matches_substring(&self, text: &str) -> bool {
        text.contains(&self.match_key)
    }
}

/// 编译后的映射库（运行期只读，可在多个工作线程间共享）
#[derive(Debug, Clone, Default)]
pub struct CompiledTaxonomy {
    /// 主分类键，最长优先
    pub category_patterns: Vec<CategoryPattern>,
    /// 产品类型同义词，最长优先
    pub synonym_patterns: Vec<SynonymPattern>,
}
