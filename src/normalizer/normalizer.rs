//! 记录归一化器：串联各分类器，输出单条归一化记录
use std::hash::Hasher;
use std::sync::Arc;

use rustc_hash::FxHasher;
use serde_json::Value;
use tracing::trace;

use super::batch::{BatchOutput, BatchProcessor};
use crate::classifier::{
    BundleDetector, CategoryMapper, CategoryRefiner, FormExtractor, ProductTypeClassifier, TagExtractor,
};
use crate::compiler::{CompiledTaxonomy, TaxonomyCompiler};
use crate::config::NormalizerConfig;
use crate::error::{TaxonError, TaxonResult};
use crate::record::{NormalizedProductRecord, RawField, RawProductRecord};
use crate::taxonomy::{TaxonomyLoader, TaxonomyMaps};
use crate::utils::TextNormalizer;

/// 记录归一化器
#[derive(Debug, Clone)]
pub struct RecordNormalizer {
    compiled: Arc<CompiledTaxonomy>,
    config: NormalizerConfig,
}

impl RecordNormalizer {
    /// 创建归一化器
    pub async fn new(config: NormalizerConfig) -> TaxonResult<Self> {
        // 1. 加载映射表
        let maps = TaxonomyLoader::load(&config).await?;

        // 2. 编译映射表
        Self::from_maps(&maps, config)
    }

    /// 由已加载的映射表创建
    pub fn from_maps(maps: &TaxonomyMaps, config: NormalizerConfig) -> TaxonResult<Self> {
        if !config.exchange_rate.is_finite() || config.exchange_rate <= 0.0 {
            return Err(TaxonError::InvalidInput(format!(
                "汇率必须为有限正数，当前为 {}",
                config.exchange_rate
            )));
        }

        let compiled = TaxonomyCompiler::compile(maps)?;
        Ok(Self {
            compiled: Arc::new(compiled),
            config,
        })
    }

    pub fn compiled(&self) -> &Arc<CompiledTaxonomy> {
        &self.compiled
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// 归一化单条原始记录
    pub fn normalize(&self, raw: &RawProductRecord) -> TaxonResult<NormalizedProductRecord> {
        // 1. 展示字段清洗
        let name = TextNormalizer::strip_markup(raw.name());
        let company = TextNormalizer::strip_markup(raw.company());
        let description = raw.description();

        // 2. 价格与币种换算
        let price = self.convert_price(raw.price(), raw.source());
        if !price.is_finite() || price < 0.0 {
            return Err(TaxonError::InvalidInput(format!(
                "{:?} 的价格换算结果无效：{}",
                name, price
            )));
        }

        // 3. 主分类（字段映射 + 名称回退）
        let categories = raw.category_fields();
        let subcategories = raw.subcategories();
        let main_category =
            CategoryMapper::resolve(&self.compiled, &categories, &subcategories, &name, description);

        // 4. 产品类型
        let product_type = ProductTypeClassifier::map_product_type(
            &self.compiled,
            &name,
            description,
            &categories,
            raw.product_type(),
        );

        // 5. 主分类细分（替换临时主分类）
        let main_category = CategoryRefiner::refine(&main_category, raw, &product_type);

        // 6. 形态、套装、标签
        let form = FormExtractor::extract_form(&name, description);
        let set_bundle = BundleDetector::detect_set_bundle(&name, description);
        let tags = TagExtractor::extract_tags(&name, &categories);

        // 7. ID：优先使用来源 ID，否则由名称+公司派生
        let id = raw.id().unwrap_or_else(|| synthetic_id(&name, &company));

        trace!("记录 {:?} 归一化为 {} / {}", id, main_category, product_type);

        Ok(NormalizedProductRecord {
            id,
            name,
            company,
            price,
            image_url: raw.text(RawField::ImageUrl).to_string(),
            product_url: raw.text(RawField::ProductUrl).to_string(),
            main_category,
            product_type,
            form,
            set_bundle,
            tags,
            subcategory_2: raw.subcategory_2().to_string(),
            raw: raw.clone(),
        })
    }

    /// 归一化单个 JSON 值，失败时携带其位置
    pub fn normalize_value(&self, value: Value, index: usize) -> TaxonResult<NormalizedProductRecord> {
        let raw = RawProductRecord::from_value(value, index)?;
        self.normalize(&raw).map_err(|e| match e {
            err @ TaxonError::InvalidRecord { .. } => err,
            other => TaxonError::InvalidRecord {
                index,
                reason: other.to_string(),
            },
        })
    }

    /// 批量归一化
    pub fn normalize_batch(&self, values: Vec<Value>) -> BatchOutput {
        BatchProcessor::new(self).process(values)
    }

    /// 外币来源按固定汇率换算并保留两位小数，其余来源原样返回
    pub fn convert_price(&self, price: f64, source: &str) -> f64 {
        if price > 0.0 && self.config.is_foreign_currency_source(source) {
            round_cents(price * self.config.exchange_rate)
        } else {
            price
        }
    }
}

#[inline]
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 由清洗后的名称与公司派生确定性 ID
fn synthetic_id(name: &str, company: &str) -> String {
    let mut hasher = FxHasher::default();
    hasher.write(name.as_bytes());
    hasher.write_u8(0xff);
    hasher.write(company.as_bytes());
    format!("product_{:016x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;
    use crate::taxonomy::TaxonomyLoader;
    use serde_json::json;

    const CATEGORY_JSON: &str = r#"{
        "hair care": "Hair Care",
        "skin care": "Skin Care",
        "clothing": "Clothing",
        "lip": "Skin Care"
    }"#;
    const SYNONYM_JSON: &str = r#"{
        "shampoo": "Shampoo",
        "argan oil": "Hair Oil"
    }"#;

    fn normalizer() -> RecordNormalizer {
        let maps = TaxonomyLoader::from_json_str(CATEGORY_JSON, SYNONYM_JSON).unwrap();
        RecordNormalizer::from_maps(&maps, ConfigManager::get_default()).unwrap()
    }

    fn normalize(value: Value) -> NormalizedProductRecord {
        normalizer().normalize_value(value, 0).unwrap()
    }

    #[test]
    fn test_full_record() {
        let record = normalize(json!({
            "id": "sku-1",
            "Name": "<b>Argan Oil</b> Treatment",
            "Company": "Acme",
            "Price": "18.50",
            "Image URL": "https://img.example/1.png",
            "Link": "https://shop.example/1",
            "Main Category": "Hair Care",
            "Subcategory 2": "Oils"
        }));

        assert_eq!(record.id, "sku-1");
        assert_eq!(record.name, "Argan Oil Treatment");
        assert_eq!(record.price, 18.5);
        assert_eq!(record.main_category, "Hair Care");
        assert_eq!(record.product_type, "Hair Oil");
        assert_eq!(record.form, "oil");
        assert_eq!(record.set_bundle, "single");
        assert_eq!(record.image_url, "https://img.example/1.png");
        assert_eq!(record.product_url, "https://shop.example/1");
        assert_eq!(record.subcategory_2, "Oils");
        assert!(record.tags.contains("argan"));
        assert!(record.tags.contains("hair care"));
        assert_eq!(record.raw.name(), "<b>Argan Oil</b> Treatment");
    }

    #[test]
    fn test_name_fallback_for_category() {
        let record = normalize(json!({"Name": "Shea Lip Balm"}));
        assert_eq!(record.main_category, "Skin Care");
        assert_eq!(record.product_type, "Lip Balm");
        assert_eq!(record.form, "balm");
    }

    #[test]
    fn test_list_valued_main_category() {
        let record = normalize(json!({"name": "Rosemary Blend", "Main Category": ["Hair Care", "Oils"]}));
        assert_eq!(record.main_category, "Hair Care");
        assert!(record.tags.contains("hair care"));
        assert!(record.tags.contains("oils"));
    }

    #[test]
    fn test_legacy_export_record() {
        let record = normalize(json!({
            "title": "Rosemary Hair Oil",
            "brand": "Acme",
            "cost": 9.5,
            "image": "https://img.example/r.png",
            "url": "https://shop.example/r",
            "categories": ["Hair Care"]
        }));
        assert_eq!(record.name, "Rosemary Hair Oil");
        assert_eq!(record.company, "Acme");
        assert_eq!(record.price, 9.5);
        assert_eq!(record.image_url, "https://img.example/r.png");
        assert_eq!(record.product_url, "https://shop.example/r");
        assert_eq!(record.main_category, "Hair Care");
        assert_eq!(record.product_type, "Hair Oil");
    }

    #[test]
    fn test_empty_record_gets_defaults() {
        let record = normalize(json!({}));
        assert_eq!(record.main_category, "Other");
        assert_eq!(record.product_type, "Other");
        assert_eq!(record.form, "other");
        assert_eq!(record.set_bundle, "single");
        assert_eq!(record.price, 0.0);
        assert!(record.id.starts_with("product_"));
        assert!(record.tags.is_empty());
    }

    #[test]
    fn test_synthetic_id_is_deterministic() {
        let a = normalize(json!({"Name": "Oat Soap", "Company": "Acme"}));
        let b = normalize(json!({"Name": "Oat Soap", "Company": "Acme", "Price": 3}));
        let c = normalize(json!({"Name": "Oat Soap", "Company": "Other Co"}));
        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_numeric_id_is_kept() {
        let record = normalize(json!({"id": 1234, "Name": "Oat Soap"}));
        assert_eq!(record.id, "1234");
    }

    #[test]
    fn test_foreign_currency_conversion() {
        let normalizer = normalizer();
        assert_eq!(normalizer.convert_price(15000.0, "nubanbeauty.com"), 10.0);
        assert_eq!(normalizer.convert_price(2500.0, "yangabeauty.com"), 1.67);
        assert_eq!(normalizer.convert_price(2500.0, "example.com"), 2500.0);
        assert_eq!(normalizer.convert_price(0.0, "nubanbeauty.com"), 0.0);

        let record = normalize(json!({"Name": "Oat Soap", "Price": "4500", "Source": "nubanbeauty.com"}));
        assert_eq!(record.price, 3.0);
    }

    #[test]
    fn test_existing_type_is_trusted() {
        let record = normalize(json!({"Name": "Argan Oil", "Product Type": "Styling Gel"}));
        assert_eq!(record.product_type, "Styling Gel");
    }

    #[test]
    fn test_non_object_is_record_failure() {
        let result = normalizer().normalize_value(json!("not a record"), 3);
        assert!(matches!(result, Err(TaxonError::InvalidRecord { index: 3, .. })));
    }

    #[test]
    fn test_rejects_invalid_exchange_rate() {
        let maps = TaxonomyLoader::from_json_str("{}", "{}").unwrap();
        let config = ConfigManager::custom().exchange_rate(f64::NAN).build();
        assert!(matches!(
            RecordNormalizer::from_maps(&maps, config),
            Err(TaxonError::InvalidInput(_))
        ));
    }
}
