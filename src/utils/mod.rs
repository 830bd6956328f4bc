//! 工具模块：文本归一化、输入读取、JSONL 输出
pub mod text_normalizer;
pub mod record_reader;
pub mod jsonl_writer;

// 导出核心接口
pub use self::text_normalizer::TextNormalizer;
pub use self::record_reader::RecordReader;
pub use self::jsonl_writer::JsonlWriter;
