//! 全局配置管理,存储所有可配置项

use std::path::PathBuf;

/// 默认按奈拉计价的来源站点
pub const DEFAULT_FOREIGN_CURRENCY_SOURCES: [&str; 2] = ["nubanbeauty.com", "yangabeauty.com"];

/// NGN -> USD 固定汇率
pub const DEFAULT_EXCHANGE_RATE: f64 = 1.0 / 1500.0;

/// 归一化配置
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    // 映射表目录
    pub maps_dir: PathBuf,
    // 主分类映射文件名
    pub category_map_file: String,
    // 产品类型同义词文件名
    pub synonym_map_file: String,
    // 以外币计价的来源
    pub foreign_currency_sources: Vec<String>,
    // 外币 -> 美元汇率
    pub exchange_rate: f64,
    // 统计中保留的 "Other" 名称样本上限
    pub other_sample_limit: usize,
    // 样本名称截断长度（字符数）
    pub other_name_width: usize,
    // 是否启用详细日志
    pub verbose: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            maps_dir: PathBuf::from("maps"),
            category_map_file: "main_category_map.json".to_string(),
            synonym_map_file: "product_type_synonyms.json".to_string(),
            foreign_currency_sources: DEFAULT_FOREIGN_CURRENCY_SOURCES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            other_sample_limit: 10,
            other_name_width: 50,
            verbose: false,
        }
    }
}

impl NormalizerConfig {
    /// 主分类映射文件完整路径
    pub fn category_map_path(&self) -> PathBuf {
        self.maps_dir.join(&self.category_map_file)
    }

    /// 同义词映射文件完整路径
    pub fn synonym_map_path(&self) -> PathBuf {
        self.maps_dir.join(&self.synonym_map_file)
    }

    /// 来源是否以外币计价
    pub fn is_foreign_currency_source(&self, source: &str) -> bool {
        self.foreign_currency_sources.iter().any(|s| s == source)
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> NormalizerConfig {
        NormalizerConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }
}

/// 配置构建器（便于自定义配置）
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: NormalizerConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn maps_dir(mut self, dir: PathBuf) -> Self {
        self.config.maps_dir = dir;
        self
    }

    pub fn category_map_file(mut self, file: impl Into<String>) -> Self {
        self.config.category_map_file = file.into();
        self
    }

    pub fn synonym_map_file(mut self, file: impl Into<String>) -> Self {
        self.config.synonym_map_file = file.into();
        self
    }

    pub fn foreign_currency_sources(mut self, sources: Vec<String>) -> Self {
        self.config.foreign_currency_sources = sources;
        self
    }

    pub fn exchange_rate(mut self, rate: f64) -> Self {
        self.config.exchange_rate = rate;
        self
    }

    pub fn other_sample_limit(mut self, limit: usize) -> Self {
        self.config.other_sample_limit = limit;
        self
    }

    pub fn other_name_width(mut self, width: usize) -> Self {
        self.config.other_name_width = width;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> NormalizerConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = ConfigManager::custom()
            .maps_dir(PathBuf::from("/tmp/maps"))
            .exchange_rate(0.5)
            .other_sample_limit(3)
            .build();

        assert_eq!(config.category_map_path(), PathBuf::from("/tmp/maps/main_category_map.json"));
        assert_eq!(config.synonym_map_path(), PathBuf::from("/tmp/maps/product_type_synonyms.json"));
        assert_eq!(config.exchange_rate, 0.5);
        assert_eq!(config.other_sample_limit, 3);
    }

    #[test]
    fn test_default_foreign_sources() {
        let config = ConfigManager::get_default();
        assert!(config.is_foreign_currency_source("nubanbeauty.com"));
        assert!(config.is_foreign_currency_source("yangabeauty.com"));
        assert!(!config.is_foreign_currency_source("example.com"));
    }
}
