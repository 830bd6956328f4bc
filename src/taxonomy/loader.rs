//! 映射表加载管理器
//! 负责从本地 JSON 文件读取两张映射表，加载失败属于启动期致命错误

use std::path::Path;
use serde_json::Value;
use tracing::{debug, warn};

use super::model::{MapKind, PhraseMap, TaxonomyMaps};
use crate::config::NormalizerConfig;
use crate::error::{TaxonError, TaxonResult};
use crate::utils::TextNormalizer;

/// 映射表加载管理器
pub struct TaxonomyLoader;

impl TaxonomyLoader {
    /// 按配置加载两张映射表
    pub async fn load(config: &NormalizerConfig) -> TaxonResult<TaxonomyMaps> {
        let category_map = Self::load_file(&config.category_map_path(), MapKind::Category).await?;
        let synonym_map = Self::load_file(&config.synonym_map_path(), MapKind::Synonym).await?;

        debug!(
            "映射表加载完成：主分类映射 {} 条，产品类型同义词 {} 条",
            category_map.len(),
            synonym_map.len()
        );

        Ok(TaxonomyMaps {
            category_map,
            synonym_map,
        })
    }

    /// 从内存中的 JSON 文本构建映射表
    pub fn from_json_str(category_json: &str, synonym_json: &str) -> TaxonResult<TaxonomyMaps> {
        Ok(TaxonomyMaps {
            category_map: Self::parse_map(category_json, MapKind::Category)?,
            synonym_map: Self::parse_map(synonym_json, MapKind::Synonym)?,
        })
    }

    /// 读取单个映射文件
    pub async fn load_file(path: &Path, kind: MapKind) -> TaxonResult<PhraseMap> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            TaxonError::MapLoadError(format!("{}（{}）：{}", kind.as_str(), path.display(), e))
        })?;
        Self::parse_map(&content, kind)
    }

    /// 解析映射 JSON：必须是 `{"短语": "标签"}` 形式的对象
    pub fn parse_map(json: &str, kind: MapKind) -> TaxonResult<PhraseMap> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| TaxonError::MapParseError(format!("{}：{}", kind.as_str(), e)))?;

        let Value::Object(object) = value else {
            return Err(TaxonError::MapParseError(format!(
                "{}：应为 短语 -> 标签 形式的 JSON 对象",
                kind.as_str()
            )));
        };

        let mut map = PhraseMap::new();
        for (raw_key, raw_label) in object {
            let Value::String(label) = raw_label else {
                return Err(TaxonError::MapParseError(format!(
                    "{}：{:?} 的标签不是字符串",
                    kind.as_str(),
                    raw_key
                )));
            };
            let label = label.trim();
            if label.is_empty() {
                return Err(TaxonError::MapParseError(format!(
                    "{}：{:?} 的标签为空",
                    kind.as_str(),
                    raw_key
                )));
            }

            // 键统一归一化，空键会匹配任意文本，直接丢弃
            let key = TextNormalizer::normalize(&raw_key);
            if key.is_empty() {
                warn!("{} 中存在空键，已跳过", kind.as_str());
                continue;
            }

            if let Some(previous) = map.insert(key.clone(), label) {
                if previous != label {
                    warn!(
                        "{1} 中键 {0:?} 归一化后重复，{2:?} 被 {3:?} 覆盖",
                        key,
                        kind.as_str(),
                        previous,
                        label
                    );
                }
            }
        }

        Ok(map)
    }
}
