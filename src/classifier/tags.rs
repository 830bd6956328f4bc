//! 标签提取器

use std::collections::BTreeSet;

use crate::utils::TextNormalizer;

/// 停用词
const STOP_WORDS: &[&str] = &["the", "and", "for", "with"];
/// 名称词上限
pub const MAX_NAME_TAGS: usize = 5;
/// 分类短语上限
pub const MAX_CATEGORY_TAGS: usize = 3;
/// 最短词长
const MIN_TOKEN_LEN: usize = 3;

/// 标签提取器
pub struct TagExtractor;

impl TagExtractor {
    /// 名称中前 5 个有效且去重的词 ∪ 前 3 个归一化分类短语
    pub fn extract_tags(name: &str, categories: &[&str]) -> BTreeSet<String> {
        let mut name_tags: Vec<String> = Vec::with_capacity(MAX_NAME_TAGS);
        for word in TextNormalizer::words(name) {
            if name_tags.len() == MAX_NAME_TAGS {
                break;
            }
            if word.chars().count() < MIN_TOKEN_LEN || STOP_WORDS.contains(&word.as_str()) {
                continue;
            }
            if !name_tags.contains(&word) {
                name_tags.push(word);
            }
        }

        let category_tags = categories
            .iter()
            .take(MAX_CATEGORY_TAGS)
            .map(|c| TextNormalizer::normalize(c))
            .filter(|c| !c.is_empty());

        name_tags.into_iter().chain(category_tags).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_name_tokens_filtered_and_bounded() {
        let tags = TagExtractor::extract_tags(
            "The Shea and Cocoa Butter Cream for Dry Skin with Oats",
            &[],
        );
        assert_eq!(tags, set(&["shea", "cocoa", "butter", "cream", "dry"]));
    }

    #[test]
    fn test_duplicates_collapse_before_limit() {
        let tags = TagExtractor::extract_tags("Curl Curl Curl Milk Gel Spray Mist Extra", &[]);
        assert_eq!(tags, set(&["curl", "milk", "gel", "spray", "mist"]));
    }

    #[test]
    fn test_category_phrases_union() {
        let tags = TagExtractor::extract_tags(
            "Argan Oil",
            &["Hair Care", "Oils & Serums", "<b>Natural</b>", "Ignored"],
        );
        assert_eq!(tags, set(&["argan", "oil", "hair care", "oils & serums", "natural"]));
    }
}
