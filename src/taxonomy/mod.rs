//! 映射表模块：负责映射表的数据模型与加载
pub mod model;
pub mod loader;

// 导出核心接口
pub use self::model::{labels, CategoryMap, MapKind, PhraseMap, SynonymMap, TaxonomyMaps};
pub use self::loader::TaxonomyLoader;
