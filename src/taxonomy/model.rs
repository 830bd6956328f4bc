//! 分类映射数据模型定义
//! 仅存储映射数据与规范标签，无任何匹配逻辑

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// 规范标签常量（封闭集合中的固定值）
pub mod labels {
    /// 未命中任何规则时的主分类/产品类型
    pub const OTHER: &str = "Other";
    /// 未命中任何形态关键字时的形态
    pub const FORM_OTHER: &str = "other";

    pub const SINGLE: &str = "single";
    pub const KIT_BUNDLE: &str = "kit/bundle";

    // 细分前的分类桶
    pub const CLOTHING: &str = "Clothing";
    pub const HEALTH_WELLNESS: &str = "Health & Wellness";
    pub const ACCESSORIES: &str = "Accessories";

    // 细分后的分类
    pub const WOMENS_CARE: &str = "Women's Care";
    pub const BABY_KIDS: &str = "Baby & Kids";
    pub const WOMENS_CLOTHING: &str = "Women's Clothing";
    pub const MENS_CLOTHING: &str = "Men's Clothing";
    pub const VITAMINS_SUPPLEMENTS: &str = "Vitamins & Supplements";
    pub const MENS_CARE: &str = "Men's Care";
    pub const BODY_CARE: &str = "Body Care";
    pub const HOME_CARE: &str = "Home Care";
    pub const BOOKS_MORE: &str = "Books & More";
}

/// 映射表种类（用于日志与错误信息）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapKind {
    /// 原始分类短语 -> 主分类
    Category,
    /// 产品类型同义词 -> 产品类型
    Synonym,
}

impl MapKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapKind::Category => "主分类映射表",
            MapKind::Synonym => "产品类型同义词表",
        }
    }
}

/// 短语映射表（短语 -> 规范标签）
/// 键在加载时已归一化；最长优先的顺序由编译期派生，不在此存储
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PhraseMap {
    entries: BTreeMap<String, String>,
}

impl PhraseMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入一条映射，返回被覆盖的旧标签
    pub fn insert(&mut self, phrase: impl Into<String>, label: impl Into<String>) -> Option<String> {
        self.entries.insert(phrase.into(), label.into())
    }

    pub fn get(&self, phrase: &str) -> Option<&str> {
        self.entries.get(phrase).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PhraseMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PhraseMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// 原始分类短语 -> 主分类
pub type CategoryMap = PhraseMap;
/// 产品类型同义词 -> 产品类型
pub type SynonymMap = PhraseMap;

/// 完整映射库（一次加载，运行期只读）
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TaxonomyMaps {
    pub category_map: CategoryMap,
    pub synonym_map: SynonymMap,
}
