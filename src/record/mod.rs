//! 记录模块：原始记录与归一化记录
pub mod raw;
pub mod normalized;

pub use self::raw::{RawField, RawProductRecord};
pub use self::normalized::NormalizedProductRecord;
