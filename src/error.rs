//! 全局错误类型定义

use thiserror::Error;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;

#[derive(Error, Debug)]
pub enum TaxonError {
    // 映射表相关错误（启动期致命错误）
    #[error("映射表加载失败：{0}")]
    MapLoadError(String),
    #[error("映射表解析失败：{0}")]
    MapParseError(String),

    // 编译相关错误
    #[error("正则编译失败：{0}")]
    RegexCompileError(#[from] RegexError),

    // 输入相关错误
    #[error("输入加载失败：{0}")]
    InputError(String),
    /// 单条记录无法归一化，携带其在输入序列中的位置
    #[error("第 {index} 条记录无效：{reason}")]
    InvalidRecord { index: usize, reason: String },

    // 归一化器相关错误
    #[error("归一化器未初始化")]
    NormalizerNotInitialized,

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
    #[error("无效输入：{0}")]
    InvalidInput(String),
}

// 全局Result类型
pub type TaxonResult<T> = Result<T, TaxonError>;
