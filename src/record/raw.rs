//! 原始商品记录
//! 各来源字段结构不一，所有字段均通过带默认值的访问器读取

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{TaxonError, TaxonResult};

/// 逻辑字段及其候选键（按顺序回退）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawField {
    Id,
    Name,
    Company,
    Price,
    ImageUrl,
    ProductUrl,
    MainCategory,
    Subcategory1,
    Subcategory2,
    ProductType,
    Description,
    Source,
}

impl RawField {
    /// 候选键：供应商原始键优先，其次 snake_case，最后是旧版导出格式的键
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            RawField::Id => &["id", "ID", "Id"],
            RawField::Name => &["Name", "name", "title"],
            RawField::Company => &["Company", "company", "brand", "vendor"],
            RawField::Price => &["Price", "price", "cost"],
            RawField::ImageUrl => &["Image URL", "image_url", "image"],
            RawField::ProductUrl => &["Link", "product_url", "link", "url"],
            RawField::MainCategory => &["Main Category", "main_category", "categories", "category"],
            RawField::Subcategory1 => &["Subcategory 1", "subcategory_1", "subcategories"],
            RawField::Subcategory2 => &["Subcategory 2", "subcategory_2"],
            RawField::ProductType => &["Product Type", "product_type"],
            RawField::Description => &["Description", "description"],
            RawField::Source => &["Source", "source"],
        }
    }
}

/// 参与分类的字段，按展开顺序
const CATEGORY_FIELDS: [RawField; 4] = [
    RawField::MainCategory,
    RawField::Subcategory1,
    RawField::Subcategory2,
    RawField::ProductType,
];

/// 原始商品记录（不可变，原样保留用于审计）
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RawProductRecord {
    fields: Map<String, Value>,
}

impl RawProductRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// 从任意 JSON 值构建，非对象视为无效记录
    pub fn from_value(value: Value, index: usize) -> TaxonResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(TaxonError::InvalidRecord {
                index,
                reason: format!("应为 JSON 对象，实际为 {}", json_type_name(&other)),
            }),
        }
    }

    /// 按候选键顺序取第一个存在且非 null 的原始值
    pub fn value(&self, field: RawField) -> Option<&Value> {
        field
            .keys()
            .iter()
            .filter_map(|key| self.fields.get(*key))
            .find(|v| !v.is_null())
    }

    /// 文本字段：仅接受字符串，其余一律视为空
    pub fn text(&self, field: RawField) -> &str {
        match self.value(field) {
            Some(Value::String(s)) => s.as_str(),
            _ => "",
        }
    }

    /// 多值文本字段：字符串或字符串数组（数组中的非字符串元素忽略），空串丢弃
    pub fn texts(&self, field: RawField) -> Vec<&str> {
        match self.value(field) {
            Some(Value::String(s)) if !s.is_empty() => vec![s.as_str()],
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// 多值文本字段以空格拼接
    pub fn joined(&self, field: RawField) -> String {
        self.texts(field).join(" ")
    }

    /// 价格字段：数字或数字字符串，无法解析时为 0.0，结果非负
    pub fn price(&self) -> f64 {
        let parsed = match self.value(RawField::Price) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        };
        if parsed.is_finite() && parsed > 0.0 { parsed } else { 0.0 }
    }

    /// 供应商提供的稳定 ID（字符串或数字），空值视为缺失
    pub fn id(&self) -> Option<String> {
        match self.value(RawField::Id)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        self.text(RawField::Name)
    }

    pub fn company(&self) -> &str {
        self.text(RawField::Company)
    }

    pub fn main_category(&self) -> &str {
        self.text(RawField::MainCategory)
    }

    pub fn subcategory_1(&self) -> &str {
        self.text(RawField::Subcategory1)
    }

    pub fn subcategory_2(&self) -> &str {
        self.text(RawField::Subcategory2)
    }

    pub fn product_type(&self) -> &str {
        self.text(RawField::ProductType)
    }

    pub fn description(&self) -> &str {
        self.text(RawField::Description)
    }

    pub fn source(&self) -> &str {
        self.text(RawField::Source)
    }

    /// 参与分类的字段：主分类、子分类1/2、供应商产品类型，数组逐项展开（去空）
    pub fn category_fields(&self) -> Vec<&str> {
        CATEGORY_FIELDS
            .iter()
            .flat_map(|field| self.texts(*field))
            .collect()
    }

    /// 子分类拼接文本
    pub fn subcategories(&self) -> String {
        let mut parts = self.texts(RawField::Subcategory1);
        parts.extend(self.texts(RawField::Subcategory2));
        parts.join(" ")
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for RawProductRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
