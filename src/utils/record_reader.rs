//! 输入读取器
//! 支持三种输入形态：JSON 数组、带 "products" 数组的对象、单个对象

use std::path::Path;
use serde_json::Value;
use tracing::debug;

use crate::error::{TaxonError, TaxonResult};

/// 包装对象中的记录数组键
const PRODUCTS_KEY: &str = "products";

/// 输入读取器
pub struct RecordReader;

impl RecordReader {
    /// 解析输入 JSON 文本为原始记录值序列（记录本身不在此校验）
    pub fn from_json_str(json: &str) -> TaxonResult<Vec<Value>> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| TaxonError::InputError(format!("输入不是合法 JSON：{}", e)))?;
        Self::from_value(value)
    }

    /// 展开已解码的输入值
    pub fn from_value(value: Value) -> TaxonResult<Vec<Value>> {
        match value {
            Value::Array(items) => Ok(items),
            Value::Object(mut object) => match object.remove(PRODUCTS_KEY) {
                Some(Value::Array(items)) => Ok(items),
                Some(_) => Err(TaxonError::InputError(format!(
                    "\"{}\" 必须是数组",
                    PRODUCTS_KEY
                ))),
                // 无 products 键时视为单条记录
                None => Ok(vec![Value::Object(object)]),
            },
            _ => Err(TaxonError::InputError(
                "输入必须是 JSON 数组、带 \"products\" 的对象或单个对象".to_string(),
            )),
        }
    }

    /// 读取输入文件
    pub async fn read_file(path: &Path) -> TaxonResult<Vec<Value>> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| TaxonError::InputError(format!("{}：{}", path.display(), e)))?;
        let records = Self::from_json_str(&content)?;
        debug!("从 {} 读取原始记录 {} 条", path.display(), records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_array_input() {
        let records = RecordReader::from_json_str(r#"[{"Name": "a"}, {"Name": "b"}]"#).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_products_wrapper() {
        let records = RecordReader::from_json_str(r#"{"products": [{"Name": "a"}], "count": 1}"#).unwrap();
        assert_eq!(records, vec![json!({"Name": "a"})]);
    }

    #[test]
    fn test_single_object() {
        let records = RecordReader::from_json_str(r#"{"Name": "Argan Oil"}"#).unwrap();
        assert_eq!(records, vec![json!({"Name": "Argan Oil"})]);
    }

    #[test]
    fn test_rejects_scalars_and_bad_wrappers() {
        assert!(matches!(RecordReader::from_json_str("42"), Err(TaxonError::InputError(_))));
        assert!(matches!(
            RecordReader::from_json_str(r#"{"products": "nope"}"#),
            Err(TaxonError::InputError(_))
        ));
        assert!(matches!(RecordReader::from_json_str("{not json"), Err(TaxonError::InputError(_))));
    }

    #[tokio::test]
    async fn test_read_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"products": [{"Name": "Shea Lip Balm"}, {"Name": "Argan Oil"}]}"#)
            .unwrap();

        let records = RecordReader::read_file(file.path()).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["Name"], "Argan Oil");
    }

    #[tokio::test]
    async fn test_missing_file_is_input_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.json");
        let result = RecordReader::read_file(&path).await;
        assert!(matches!(result, Err(TaxonError::InputError(_))));
    }
}
