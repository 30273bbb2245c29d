use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub enum CourseType {
    Theory,    // 纯理论课
    Lab,       // 纯实验课
    TheoryLab, // 理论 + 实验
}

impl CourseType {
    pub const THEORY: &'static str = "theory";
    pub const LAB: &'static str = "lab";
    pub const THEORY_LAB: &'static str = "theory_lab";
}

impl<'de> Deserialize<'de> for CourseType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<CourseType>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的课程类型: '{s}'. 支持的类型: theory, lab, theory_lab"
            ))
        })
    }
}

impl std::fmt::Display for CourseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseType::Theory => write!(f, "{}", CourseType::THEORY),
            CourseType::Lab => write!(f, "{}", CourseType::LAB),
            CourseType::TheoryLab => write!(f, "{}", CourseType::THEORY_LAB),
        }
    }
}

impl std::str::FromStr for CourseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "theory" => Ok(CourseType::Theory),
            "lab" => Ok(CourseType::Lab),
            "theory_lab" => Ok(CourseType::TheoryLab),
            _ => Err(format!("Invalid course type: {s}")),
        }
    }
}

// 课程
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    // 课程代码，如 "CS301"
    pub course_code: String,
    // 课程名称
    pub course_name: String,
    pub course_type: CourseType,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_type_parse() {
        assert_eq!("theory".parse::<CourseType>(), Ok(CourseType::Theory));
        assert_eq!(" LAB ".parse::<CourseType>(), Ok(CourseType::Lab));
        assert_eq!(
            "theory_lab".parse::<CourseType>(),
            Ok(CourseType::TheoryLab)
        );
        assert!("practical".parse::<CourseType>().is_err());
    }

    #[test]
    fn test_course_type_serde() {
        let t: CourseType = serde_json::from_str("\"theory_lab\"").unwrap();
        assert_eq!(t, CourseType::TheoryLab);
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"theory_lab\"");
        assert!(serde_json::from_str::<CourseType>("\"seminar\"").is_err());
    }
}
