use super::grade::{Grade, round2};
use crate::models::marks::responses::{GradeCount, PercentageStats};

/// 统计等级分布，按等级从高到低返回，包含数量为 0 的等级
pub fn grade_distribution(grades: &[Grade]) -> Vec<GradeCount> {
    Grade::ALL
        .iter()
        .map(|grade| GradeCount {
            grade: *grade,
            count: grades.iter().filter(|g| *g == grade).count() as i64,
        })
        .collect()
}

/// 百分比的平均值、最高值、最低值；无数据时返回 None
pub fn percentage_stats(percentages: &[f64]) -> Option<PercentageStats> {
    if percentages.is_empty() {
        return None;
    }
    let sum: f64 = percentages.iter().sum();
    let max = percentages.iter().copied().fold(f64::MIN, f64::max);
    let min = percentages.iter().copied().fold(f64::MAX, f64::min);

    Some(PercentageStats {
        average: round2(sum / percentages.len() as f64),
        max,
        min,
    })
}
