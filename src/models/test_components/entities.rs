use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考核项类别：只有理论和实验两类
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/test_component.ts")]
pub enum ComponentCategory {
    Theory, // 理论考核（MSE、Task 等）
    Lab,    // 实验考核（实验记录、平时实验、实验期中等）
}

impl ComponentCategory {
    pub const THEORY: &'static str = "theory";
    pub const LAB: &'static str = "lab";
}

impl<'de> Deserialize<'de> for ComponentCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ComponentCategory>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的考核项类别: '{s}'. 支持的类别: theory, lab"
            ))
        })
    }
}

impl std::fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentCategory::Theory => write!(f, "{}", ComponentCategory::THEORY),
            ComponentCategory::Lab => write!(f, "{}", ComponentCategory::LAB),
        }
    }
}

impl std::str::FromStr for ComponentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "theory" => Ok(ComponentCategory::Theory),
            "lab" => Ok(ComponentCategory::Lab),
            _ => Err(format!("Invalid component category: {s}")),
        }
    }
}

// 考核项：课程下的一个可评分项目，由管理员动态配置
//
// category 保留数据库中的原始字符串，由成绩汇总时解析校验
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/test_component.ts")]
pub struct TestComponent {
    pub id: i64,
    pub course_id: i64,
    // 显示名称，如 "MSE1"、"Lab Record"
    pub name: String,
    pub category: String,
    // 满分
    pub max_marks: f64,
    // 权重（仅用于展示，不参与汇总）
    pub weightage: f64,
    pub sort_order: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(
            "theory".parse::<ComponentCategory>(),
            Ok(ComponentCategory::Theory)
        );
        assert_eq!(" Lab".parse::<ComponentCategory>(), Ok(ComponentCategory::Lab));
        assert!("practical".parse::<ComponentCategory>().is_err());
        assert!("".parse::<ComponentCategory>().is_err());
    }

    #[test]
    fn test_category_display_roundtrip() {
        for c in [ComponentCategory::Theory, ComponentCategory::Lab] {
            assert_eq!(c.to_string().parse::<ComponentCategory>(), Ok(c));
        }
    }
}
