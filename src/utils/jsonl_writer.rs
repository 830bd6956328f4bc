//! JSONL 输出：每行一个归一化记录

use std::path::Path;
use tracing::info;

use crate::error::TaxonResult;
use crate::record::NormalizedProductRecord;

/// JSONL 写出器
pub struct JsonlWriter;

impl JsonlWriter {
    /// 序列化为 JSONL 文本（每条记录以换行结尾）
    pub fn to_string(records: &[NormalizedProductRecord]) -> TaxonResult<String> {
        let mut out = String::new();
        for record in records {
            out.push_str(&serde_json::to_string(record)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// 写出到文件（整体写入，失败时不保留半截输出之外的状态）
    pub async fn write_file(path: &Path, records: &[NormalizedProductRecord]) -> TaxonResult<()> {
        let content = Self::to_string(records)?;
        tokio::fs::write(path, content).await?;
        info!("已写出 {} 条记录到 {}", records.len(), path.display());
        Ok(())
    }
}
