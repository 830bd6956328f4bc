//! 归一化模块：单条记录归一化、批处理、统计与全局单例
pub mod global;
pub mod normalizer;
pub mod batch;
pub mod stats;

// 导出核心接口
pub use self::global::{get_global_normalizer, init_normalizer, init_normalizer_with_config, normalize_products};
pub use self::normalizer::RecordNormalizer;
pub use self::batch::{dedup_first_wins, BatchOutput, BatchProcessor, RecordFailure};
pub use self::stats::ClassificationStats;
