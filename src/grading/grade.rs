use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub enum Grade {
    #[serde(rename = "O")]
    O,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    /// 按等级从高到低排列的全部等级
    pub const ALL: [Grade; 7] = [
        Grade::O,
        Grade::APlus,
        Grade::A,
        Grade::BPlus,
        Grade::B,
        Grade::C,
        Grade::F,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::O => "O",
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::C => "C",
            Grade::F => "F",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 等级分段：百分比下限 -> 等级，从高到低匹配，第一个命中即返回
pub const GRADE_BANDS: [(f64, Grade); 6] = [
    (90.0, Grade::O),
    (80.0, Grade::APlus),
    (70.0, Grade::A),
    (60.0, Grade::BPlus),
    (50.0, Grade::B),
    (40.0, Grade::C),
];

/// 根据百分比评定等级，低于所有分段为 F
pub fn grade_for(percentage: f64) -> Grade {
    GRADE_BANDS
        .iter()
        .find(|(threshold, _)| percentage >= *threshold)
        .map(|(_, grade)| *grade)
        .unwrap_or(Grade::F)
}

/// 四舍五入到两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 计算百分比（两位小数），满分为 0 时按约定返回 0
pub fn percentage_of(obtained: f64, max: f64) -> f64 {
    if max > 0.0 {
        round2(obtained / max * 100.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(grade_for(100.0), Grade::O);
        assert_eq!(grade_for(90.0), Grade::O);
        assert_eq!(grade_for(89.99), Grade::APlus);
        assert_eq!(grade_for(80.0), Grade::APlus);
        assert_eq!(grade_for(79.99), Grade::A);
        assert_eq!(grade_for(70.0), Grade::A);
        assert_eq!(grade_for(60.0), Grade::BPlus);
        assert_eq!(grade_for(50.0), Grade::B);
        assert_eq!(grade_for(49.99), Grade::C);
        assert_eq!(grade_for(40.0), Grade::C);
        assert_eq!(grade_for(39.99), Grade::F);
        assert_eq!(grade_for(0.0), Grade::F);
    }

    #[test]
    fn test_bands_are_descending() {
        for pair in GRADE_BANDS.windows(2) {
            assert!(pair[0].0 > pair[1].0);
        }
    }

    #[test]
    fn test_grade_serialization() {
        assert_eq!(serde_json::to_string(&Grade::APlus).unwrap(), "\"A+\"");
        assert_eq!(serde_json::to_string(&Grade::BPlus).unwrap(), "\"B+\"");
        assert_eq!(serde_json::to_string(&Grade::O).unwrap(), "\"O\"");
        let g: Grade = serde_json::from_str("\"B+\"").unwrap();
        assert_eq!(g, Grade::BPlus);
        assert_eq!(Grade::APlus.to_string(), "A+");
    }

    #[test]
    fn test_percentage_of() {
        assert_eq!(percentage_of(39.0, 50.0), 78.0);
        assert_eq!(percentage_of(2.0, 3.0), 66.67);
        assert_eq!(percentage_of(1.0, 3.0), 33.33);
        assert_eq!(percentage_of(0.0, 0.0), 0.0);
        assert_eq!(percentage_of(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(78.00000000000001), 78.0);
        assert_eq!(round2(89.994), 89.99);
        assert_eq!(round2(12.345678), 12.35);
    }
}
