//! 形态提取与套装检测
//! 均为关键字表驱动、按声明顺序首个命中生效

use crate::taxonomy::labels;
use crate::utils::TextNormalizer;

/// 形态关键字表
/// 更具体的形态须排在包含其别名的通用形态之前（serum 先于 oil）
const FORM_TABLE: &[(&str, &[&str])] = &[
    ("serum", &["serum"]),
    ("oil", &["oil", "serum"]),
    ("cream", &["cream", "lotion", "butter"]),
    ("gel", &["gel", "gelly"]),
    ("spray", &["spray", "mist"]),
    ("foam", &["foam", "mousse"]),
    ("bar", &["bar", "soap bar"]),
    ("balm", &["balm"]),
    ("wax", &["wax", "pomade"]),
    ("powder", &["powder"]),
    ("liquid", &["liquid", "shampoo", "conditioner"]),
];

/// 套装关键字
const BUNDLE_KEYWORDS: &[&str] = &["kit", "set", "bundle", "pack", "duo", "trio", "collection", "system"];

fn combined_text(name: &str, description: &str) -> String {
    TextNormalizer::normalize(&format!("{} {}", name, description))
}

/// 形态提取器
pub struct FormExtractor;

impl FormExtractor {
    /// 提取形态，未命中返回 "other"
    pub fn extract_form(name: &str, description: &str) -> String {
        let text = combined_text(name, description);
        FORM_TABLE
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|kw| text.contains(kw)))
            .map(|(form, _)| form.to_string())
            .unwrap_or_else(|| labels::FORM_OTHER.to_string())
    }
}

/// 套装检测器
pub struct BundleDetector;

impl BundleDetector {
    /// 是否为套装
    pub fn is_bundle(name: &str, description: &str) -> bool {
        let text = combined_text(name, description);
        BUNDLE_KEYWORDS.iter().any(|kw| text.contains(kw))
    }

    /// 套装标记："kit/bundle" 或 "single"
    pub fn detect_set_bundle(name: &str, description: &str) -> String {
        if Self::is_bundle(name, description) {
            labels::KIT_BUNDLE.to_string()
        } else {
            labels::SINGLE.to_string()
        }
    }
}
