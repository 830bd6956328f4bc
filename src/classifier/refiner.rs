//! 主分类细分器
//! 在主分类与产品类型确定后，结合原始字段拆分映射表无法区分的分类

use crate::record::{RawField, RawProductRecord};
use crate::taxonomy::labels;

/// 女性私护关键字（最高优先级，任何主分类下都先检查）
const WOMENS_CARE_KEYWORDS: &[&str] = &[
    "yoni", "feminine wash", "feminine hygiene", "feminine deodorant",
    "feminine care", "feminine spray", "feminine oil", "feminine foam",
    "feminine soothing", "feminine skin", "foaming feminine",
    "intimate wash", "intimate spray", "intimate oil", "intimate gel",
    "intimate flora", "vaginal", "vagina", "menstrual", "period underwear",
    "period panty", "reusable period", "boric acid", "v steam", "vsteam",
    "womb detox", "womb matter", "yoni steam", "yoni oil", "yoni wash",
    "yoni egg", "yoni toning", "yoni elixir", "yoni duo", "kitty potion",
    "cookie wash", "cookie oil", "cookie restore", "ph balance",
    "prenatal", "postpartum", "fertility supplement", "ovulation",
    "menstrual cup", "feminine hygiene bundle", "yin trifecta",
];

const KIDS_PET_INDICATORS: &[&str] = &[
    "girls' clothing", "baby", "toddler", "kids'", "pet supplies", "pet clothing", "pet apparel", "dog",
];
const WOMENS_INDICATORS: &[&str] = &["women's", "female", "bridal", "lingerie"];
const MENS_INDICATOR: &[&str] = &["men's"];

const VITAMIN_KEYWORDS: &[&str] = &[
    "vitamin", "supplement", "protein", "collagen", "probiotic",
    "gummies", "gummy", "creatine", "elderberry", "melatonin",
    "testosterone", "multivitamin", "capsule", "tablet",
    "meal replacement", "nutritional shake", "weight gain",
    "pre-workout", "energy supplement", "superfood",
    "sea moss", "herbal extract", "herbal supplement",
];
const MENS_GROOMING_KEYWORDS: &[&str] = &["razor", "beard", "shav", "grooming", "shaver"];

const BATTERY_KEYWORDS: &[&str] = &["battery", "batteries", "charger pack", "battery charger"];
const BOOKS_KEYWORDS: &[&str] = &[
    "book", "ebook", "e-book", "journal", "planner", "guide",
    "workbook", "coloring", "print", "painting", "postcard",
    "dice", "play dough", "affirmation cards", "banner",
    "pencil", "crayon", "paint brush", "stationery",
    "recipe book", "digital download", "digital workbook",
];

/// 判定依据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Evidence {
    /// 名称 + 已判定产品类型 + 供应商产品类型
    NameAndType,
    /// 原始主分类 + 子分类1
    RawCategories,
}

/// 关键字判定
#[derive(Debug, Clone, Copy)]
enum KeywordTest {
    /// 命中任一关键字
    Any(&'static [&'static str]),
    /// 命中任一关键字且不含任何排除词（长短性别词互为子串）
    AnyWithout {
        any: &'static [&'static str],
        without: &'static [&'static str],
    },
}

impl KeywordTest {
    fn matches(&self, text: &str) -> bool {
        match self {
            KeywordTest::Any(keywords) => keywords.iter().any(|kw| text.contains(kw)),
            KeywordTest::AnyWithout { any, without } => {
                any.iter().any(|kw| text.contains(kw)) && !without.iter().any(|kw| text.contains(kw))
            }
        }
    }
}

/// 细分规则：依据命中则改写为目标分类
#[derive(Debug, Clone, Copy)]
struct RefineRule {
    evidence: Evidence,
    test: KeywordTest,
    label: &'static str,
}

/// 分支兜底
#[derive(Debug, Clone, Copy)]
enum Fallback {
    Label(&'static str),
    Keep,
}

/// 针对单个分类桶的规则分支
struct RefineBranch {
    bucket: &'static str,
    rules: &'static [RefineRule],
    fallback: Fallback,
}

/// 全局最高优先级规则
const OVERRIDE_RULE: RefineRule = RefineRule {
    evidence: Evidence::NameAndType,
    test: KeywordTest::Any(WOMENS_CARE_KEYWORDS),
    label: labels::WOMENS_CARE,
};

/// 分支表：按主分类选择分支，分支内按规则顺序首个命中生效
const REFINE_BRANCHES: &[RefineBranch] = &[
    RefineBranch {
        bucket: labels::CLOTHING,
        rules: &[
            RefineRule {
                evidence: Evidence::RawCategories,
                test: KeywordTest::Any(KIDS_PET_INDICATORS),
                label: labels::BABY_KIDS,
            },
            RefineRule {
                evidence: Evidence::RawCategories,
                test: KeywordTest::Any(WOMENS_INDICATORS),
                label: labels::WOMENS_CLOTHING,
            },
            RefineRule {
                evidence: Evidence::RawCategories,
                test: KeywordTest::AnyWithout { any: MENS_INDICATOR, without: &["women's"] },
                label: labels::MENS_CLOTHING,
            },
        ],
        fallback: Fallback::Label(labels::WOMENS_CLOTHING),
    },
    RefineBranch {
        bucket: labels::HEALTH_WELLNESS,
        rules: &[
            RefineRule {
                evidence: Evidence::NameAndType,
                test: KeywordTest::Any(VITAMIN_KEYWORDS),
                label: labels::VITAMINS_SUPPLEMENTS,
            },
            RefineRule {
                evidence: Evidence::NameAndType,
                test: KeywordTest::Any(MENS_GROOMING_KEYWORDS),
                label: labels::MENS_CARE,
            },
        ],
        fallback: Fallback::Label(labels::BODY_CARE),
    },
    RefineBranch {
        bucket: labels::ACCESSORIES,
        rules: &[
            RefineRule {
                evidence: Evidence::NameAndType,
                test: KeywordTest::Any(BATTERY_KEYWORDS),
                label: labels::HOME_CARE,
            },
            RefineRule {
                evidence: Evidence::NameAndType,
                test: KeywordTest::Any(BOOKS_KEYWORDS),
                label: labels::BOOKS_MORE,
            },
        ],
        fallback: Fallback::Keep,
    },
];

/// 细分所需的小写文本
struct RefineContext {
    name_and_type: String,
    raw_categories: String,
}

impl RefineContext {
    fn new(record: &RawProductRecord, product_type: &str) -> Self {
        let name_and_type = format!(
            "{} {} {}",
            record.name(),
            product_type,
            record.product_type()
        )
        .to_lowercase();
        let raw_categories = format!(
            "{} {}",
            record.joined(RawField::MainCategory),
            record.joined(RawField::Subcategory1)
        )
        .to_lowercase();

        Self {
            name_and_type,
            raw_categories,
        }
    }

    fn text(&self, evidence: Evidence) -> &str {
        match evidence {
            Evidence::NameAndType => &self.name_and_type,
            Evidence::RawCategories => &self.raw_categories,
        }
    }

    fn matches(&self, rule: &RefineRule) -> bool {
        rule.test.matches(self.text(rule.evidence))
    }
}

/// 主分类细分器
pub struct CategoryRefiner;

impl CategoryRefiner {
    /// 细分主分类：确定性决策树，严格按分支顺序裁决
    pub fn refine(main_category: &str, record: &RawProductRecord, product_type: &str) -> String {
        let context = RefineContext::new(record, product_type);

        // 1. 女性私护优先于一切分支
        if context.matches(&OVERRIDE_RULE) {
            return OVERRIDE_RULE.label.to_string();
        }

        // 2. 按主分类选择分支
        let Some(branch) = REFINE_BRANCHES.iter().find(|b| b.bucket == main_category) else {
            return main_category.to_string();
        };

        // 3. 分支内首个命中的规则生效
        if let Some(rule) = branch.rules.iter().find(|rule| context.matches(rule)) {
            return rule.label.to_string();
        }

        match branch.fallback {
            Fallback::Label(label) => label.to_string(),
            Fallback::Keep => main_category.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(value: Value) -> RawProductRecord {
        RawProductRecord::from_value(value, 0).unwrap()
    }

    #[test]
    fn test_clothing_gender_split() {
        let mens = record(json!({"Name": "Bow Tie", "Main Category": "Clothing", "Subcategory 1": "Men's Accessories"}));
        assert_eq!(CategoryRefiner::refine("Clothing", &mens, "Other"), "Men's Clothing");

        let womens = record(json!({"Name": "Veil", "Main Category": "Clothing", "Subcategory 1": "Women's Bridal"}));
        assert_eq!(CategoryRefiner::refine("Clothing", &womens, "Other"), "Women's Clothing");

        let both = record(json!({
            "Name": "Scarf",
            "Main Category": "Clothing",
            "Subcategory 1": "Women's & Men's Accessories"
        }));
        assert_eq!(CategoryRefiner::refine("Clothing", &both, "Other"), "Women's Clothing");
    }

    #[test]
    fn test_clothing_kids_before_gender() {
        let kids = record(json!({"Name": "Onesie", "Main Category": "Clothing", "Subcategory 1": "Baby Women's Gift"}));
        assert_eq!(CategoryRefiner::refine("Clothing", &kids, "Other"), "Baby & Kids");
    }

    #[test]
    fn test_clothing_split_reads_list_subcategories() {
        let mens = record(json!({"Name": "Bow Tie", "categories": ["Clothing"], "subcategories": ["Ties", "Men's"]}));
        assert_eq!(CategoryRefiner::refine("Clothing", &mens, "Other"), "Men's Clothing");
    }

    #[test]
    fn test_ambiguous_clothing_defaults_to_womens() {
        let hat = record(json!({"Name": "Bucket Hat", "Main Category": "Clothing"}));
        assert_eq!(CategoryRefiner::refine("Clothing", &hat, "Hat"), "Women's Clothing");
    }

    #[test]
    fn test_womens_care_overrides_every_branch() {
        let yoni = record(json!({"Name": "Yoni Steam Herbs", "Main Category": "Clothing", "Subcategory 1": "Men's"}));
        assert_eq!(CategoryRefiner::refine("Clothing", &yoni, "Other"), "Women's Care");
        assert_eq!(CategoryRefiner::refine("Health & Wellness", &yoni, "Other"), "Women's Care");
        assert_eq!(CategoryRefiner::refine("Hair Care", &yoni, "Other"), "Women's Care");

        let by_type = record(json!({"Name": "Gentle Wash", "Product Type": "Feminine Wash"}));
        assert_eq!(CategoryRefiner::refine("Body Care", &by_type, "Other"), "Women's Care");
    }

    #[test]
    fn test_wellness_redistribution() {
        let gummies = record(json!({"Name": "Elderberry Gummies"}));
        assert_eq!(CategoryRefiner::refine("Health & Wellness", &gummies, "Other"), "Vitamins & Supplements");

        let razor = record(json!({"Name": "Safety Razor"}));
        assert_eq!(CategoryRefiner::refine("Health & Wellness", &razor, "Other"), "Men's Care");

        let soap = record(json!({"Name": "Oat Soap"}));
        assert_eq!(CategoryRefiner::refine("Health & Wellness", &soap, "Bar Soap"), "Body Care");
    }

    #[test]
    fn test_accessories_redistribution() {
        let batteries = record(json!({"Name": "AA Batteries 4ct"}));
        assert_eq!(CategoryRefiner::refine("Accessories", &batteries, "Other"), "Home Care");

        let journal = record(json!({"Name": "Gratitude Journal"}));
        assert_eq!(CategoryRefiner::refine("Accessories", &journal, "Other"), "Books & More");

        let scarf = record(json!({"Name": "Silk Scarf"}));
        assert_eq!(CategoryRefiner::refine("Accessories", &scarf, "Other"), "Accessories");
    }

    #[test]
    fn test_other_categories_pass_through() {
        let item = record(json!({"Name": "Vitamin Shampoo"}));
        assert_eq!(CategoryRefiner::refine("Hair Care", &item, "Shampoo"), "Hair Care");
        assert_eq!(CategoryRefiner::refine("Other", &item, "Shampoo"), "Other");
    }
}
