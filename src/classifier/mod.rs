//! 分类模块：主分类、产品类型、细分、形态、套装与标签
pub mod category;
pub mod product_type;
pub mod refiner;
pub mod form;
pub mod tags;

// 导出核心接口
pub use self::category::CategoryMapper;
pub use self::product_type::{ProductTypeClassifier, Strategy, STRATEGY_ORDER};
pub use self::refiner::CategoryRefiner;
pub use self::form::{BundleDetector, FormExtractor};
pub use self::tags::TagExtractor;
