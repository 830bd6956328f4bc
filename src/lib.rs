//! rtaxon - 商品分类归一化引擎
//! 将异构来源的商品记录归一化为封闭分类体系（主分类、产品类型、形态、套装标记、标签）

// 导出全局错误类型
pub use self::error::{TaxonError, TaxonResult};

// 导出配置模块
pub use self::config::{NormalizerConfig, ConfigManager, CustomConfigBuilder};

// 导出映射表模块核心接口
pub use self::taxonomy::{
    labels, CategoryMap, SynonymMap, PhraseMap, MapKind, TaxonomyMaps, TaxonomyLoader
};

// 导出编译模块核心接口
pub use self::compiler::{
    CompiledTaxonomy, CategoryPattern, SynonymPattern, TaxonomyCompiler
};

// 导出记录模块核心接口
pub use self::record::{RawField, RawProductRecord, NormalizedProductRecord};

// 导出分类模块核心接口
pub use self::classifier::{
    CategoryMapper, ProductTypeClassifier, Strategy, CategoryRefiner,
    FormExtractor, BundleDetector, TagExtractor
};

// 导出工具模块核心接口
pub use self::utils::{TextNormalizer, RecordReader, JsonlWriter};

// 导出归一化模块核心接口（含全局单例的简化接口）
pub use self::normalizer::{
    RecordNormalizer,
    BatchProcessor,
    BatchOutput,
    RecordFailure,
    ClassificationStats,
    init_normalizer,
    init_normalizer_with_config,
    normalize_products,
};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod taxonomy;
pub mod compiler;
pub mod record;
pub mod classifier;
pub mod utils;
pub mod normalizer;
