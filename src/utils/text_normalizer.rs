//! 文本归一化工具
//! 所有匹配器共用：去除标签、统一小写、折叠空白

use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static PUNCTUATION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());
static WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// 文本归一化工具
pub struct TextNormalizer;

impl TextNormalizer {
    /// 归一化文本：去除 `<...>` 标签、转小写、折叠空白、去首尾空白
    /// 幂等：`normalize(normalize(x)) == normalize(x)`
    pub fn normalize(text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let stripped = MARKUP_REGEX.replace_all(text, " ");
        Self::collapse_whitespace(&stripped.to_lowercase())
    }

    /// 去除标签并折叠空白，保留原始大小写（用于展示字段）
    pub fn strip_markup(text: &str) -> String {
        let stripped = MARKUP_REGEX.replace_all(text, " ");
        Self::collapse_whitespace(&stripped)
    }

    /// 匹配用文本：转小写，标点替换为空格，折叠空白
    pub fn clean_for_matching(text: &str) -> String {
        let lowered = text.to_lowercase();
        let replaced = PUNCTUATION_REGEX.replace_all(&lowered, " ");
        Self::collapse_whitespace(&replaced)
    }

    /// 按单词切分（小写），保持原文顺序
    pub fn words(text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        WORD_REGEX
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// 折叠连续空白为单个空格并去首尾空白
    #[inline]
    pub fn collapse_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
