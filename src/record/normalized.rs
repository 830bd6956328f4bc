//! 归一化商品记录
//! 由归一化器一次性生成，之后不再修改

use std::collections::BTreeSet;
use std::fmt;
use serde::{Deserialize, Serialize};

use super::raw::RawProductRecord;

/// 归一化商品记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProductRecord {
    pub id: String,
    pub name: String,
    pub company: String,
    /// 非负，已按来源完成币种换算
    pub price: f64,
    pub image_url: String,
    pub product_url: String,
    pub main_category: String,
    pub product_type: String,
    pub form: String,
    pub set_bundle: String,
    /// 标签集合，顺序无意义
    pub tags: BTreeSet<String>,
    pub subcategory_2: String,
    /// 原始记录（审计用，下游建索引前剥离）
    #[serde(rename = "_raw")]
    pub raw: RawProductRecord,
}

impl NormalizedProductRecord {
    /// 是否为套装
    pub fn is_bundle(&self) -> bool {
        self.set_bundle == crate::taxonomy::labels::KIT_BUNDLE
    }
}

// ======== 为 NormalizedProductRecord 实现 Display trait（用于 CLI / Report 输出） ========
impl fmt::Display for NormalizedProductRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{} / {} / {} / {}]",
            self.name, self.main_category, self.product_type, self.form, self.set_bundle
        )
    }
}
