//! 编译模块：将映射表编译为有序匹配模式
pub mod compiler;
pub mod pattern;

pub use self::compiler::TaxonomyCompiler;
pub use self::pattern::{CategoryPattern, CompiledTaxonomy, SynonymPattern};
