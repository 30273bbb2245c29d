use serde::Serialize;
use ts_rs::TS;

use super::grade::{Grade, grade_for, percentage_of};
use crate::errors::{ErpError, Result};
use crate::models::marks::entities::StudentMark;
use crate::models::test_components::entities::{ComponentCategory, TestComponent};

/// 成绩明细行（展示用）
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/marks.ts")]
pub struct ComponentMarkRow {
    #[serde(rename = "testComponentId")]
    pub test_component_id: i64,
    #[serde(rename = "testName")]
    pub test_name: String,
    // null 表示未评分，前端显示为 "-"
    #[serde(rename = "marksObtained")]
    pub marks_obtained: Option<f64>,
    #[serde(rename = "maxMarks")]
    pub max_marks: f64,
    pub weightage: f64,
}

/// 单个类别（理论/实验）的小计
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBreakdown {
    pub rows: Vec<ComponentMarkRow>,
    pub obtained: f64,
    pub max: f64,
}

impl CategoryBreakdown {
    fn push(&mut self, component: &TestComponent, marks_obtained: Option<f64>) {
        self.obtained += marks_obtained.unwrap_or(0.0);
        self.max += component.max_marks;
        self.rows.push(ComponentMarkRow {
            test_component_id: component.id,
            test_name: component.name.clone(),
            marks_obtained,
            max_marks: component.max_marks,
            weightage: component.weightage,
        });
    }

    /// 本类别的百分比，无该类别考核项时为 0
    pub fn percentage(&self) -> f64 {
        percentage_of(self.obtained, self.max)
    }
}

/// 一个选课记录的汇总结果，不落库
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedResult {
    pub theory: CategoryBreakdown,
    pub lab: CategoryBreakdown,
    pub combined_obtained: f64,
    pub combined_max: f64,
    pub percentage: f64,
    pub grade: Grade,
}

/// 校验考核项定义：满分与权重必须为有限正数
pub fn validate_component(component: &TestComponent) -> Result<()> {
    if !component.max_marks.is_finite() || component.max_marks <= 0.0 {
        return Err(ErpError::validation(format!(
            "考核项 '{}' 的满分必须为正数，当前为 {}",
            component.name, component.max_marks
        )));
    }
    if !component.weightage.is_finite() || component.weightage <= 0.0 {
        return Err(ErpError::validation(format!(
            "考核项 '{}' 的权重必须为正数，当前为 {}",
            component.name, component.weightage
        )));
    }
    Ok(())
}

/// 校验成绩范围：非空成绩必须落在 [0, 满分] 内
pub fn validate_mark(component: &TestComponent, marks_obtained: Option<f64>) -> Result<()> {
    let Some(value) = marks_obtained else {
        return Ok(());
    };
    if !value.is_finite() {
        return Err(ErpError::validation(format!(
            "考核项 '{}' 的成绩不是有效数字",
            component.name
        )));
    }
    if value < 0.0 || value > component.max_marks {
        return Err(ErpError::validation(format!(
            "考核项 '{}' 的成绩 {} 超出范围 [0, {}]",
            component.name, value, component.max_marks
        )));
    }
    Ok(())
}

/// 汇总一个选课记录的全部考核项成绩
///
/// 输入顺序无要求；明细行保持输入顺序。任一记录校验失败即返回错误，
/// 不返回部分结果。
pub fn aggregate(records: &[(TestComponent, StudentMark)]) -> Result<AggregatedResult> {
    let mut theory = CategoryBreakdown::default();
    let mut lab = CategoryBreakdown::default();

    for (component, mark) in records {
        let category = component
            .category
            .parse::<ComponentCategory>()
            .map_err(|_| {
                ErpError::validation(format!(
                    "考核项 '{}' 的类别 '{}' 无效，仅支持 theory 或 lab",
                    component.name, component.category
                ))
            })?;

        if mark.test_component_id != component.id {
            return Err(ErpError::validation(format!(
                "成绩记录 {} 引用的考核项 {} 与 '{}' ({}) 不一致",
                mark.id, mark.test_component_id, component.name, component.id
            )));
        }

        validate_component(component)?;
        validate_mark(component, mark.marks_obtained)?;

        let bucket = match category {
            ComponentCategory::Theory => &mut theory,
            ComponentCategory::Lab => &mut lab,
        };
        bucket.push(component, mark.marks_obtained);
    }

    let combined_obtained = theory.obtained + lab.obtained;
    let combined_max = theory.max + lab.max;
    let percentage = percentage_of(combined_obtained, combined_max);

    Ok(AggregatedResult {
        theory,
        lab,
        combined_obtained,
        combined_max,
        percentage,
        grade: grade_for(percentage),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(id: i64, name: &str, category: &str, max_marks: f64) -> TestComponent {
        TestComponent {
            id,
            course_id: 1,
            name: name.to_string(),
            category: category.to_string(),
            max_marks,
            weightage: 1.0,
            sort_order: id as i32,
            created_at: chrono::DateTime::<chrono::Utc>::default(),
            updated_at: chrono::DateTime::<chrono::Utc>::default(),
        }
    }

    fn mark(component_id: i64, marks_obtained: Option<f64>) -> StudentMark {
        StudentMark {
            id: component_id * 10,
            enrollment_id: 7,
            test_component_id: component_id,
            marks_obtained,
            updated_at: chrono::DateTime::<chrono::Utc>::default(),
        }
    }

    fn record(
        id: i64,
        category: &str,
        max_marks: f64,
        obtained: Option<f64>,
    ) -> (TestComponent, StudentMark) {
        (
            component(id, &format!("C{id}"), category, max_marks),
            mark(id, obtained),
        )
    }

    #[test]
    fn test_theory_and_lab_scenario() {
        let records = vec![
            record(1, "theory", 20.0, Some(18.0)),
            record(2, "lab", 30.0, Some(21.0)),
        ];
        let result = aggregate(&records).unwrap();

        assert_eq!(result.theory.obtained, 18.0);
        assert_eq!(result.theory.max, 20.0);
        assert_eq!(result.lab.obtained, 21.0);
        assert_eq!(result.lab.max, 30.0);
        assert_eq!(result.combined_obtained, 39.0);
        assert_eq!(result.combined_max, 50.0);
        assert_eq!(result.percentage, 78.0);
        assert_eq!(result.grade, Grade::A);
    }

    #[test]
    fn test_all_ungraded_is_zero_and_f() {
        let records = vec![
            record(1, "theory", 20.0, None),
            record(2, "theory", 20.0, None),
            record(3, "lab", 25.0, None),
        ];
        let result = aggregate(&records).unwrap();

        assert_eq!(result.combined_obtained, 0.0);
        assert_eq!(result.combined_max, 65.0);
        assert_eq!(result.percentage, 0.0);
        assert_eq!(result.grade, Grade::F);
        assert!(
            result
                .theory
                .rows
                .iter()
                .chain(result.lab.rows.iter())
                .all(|r| r.marks_obtained.is_none())
        );
    }

    #[test]
    fn test_empty_input() {
        let result = aggregate(&[]).unwrap();
        assert_eq!(result.combined_max, 0.0);
        assert_eq!(result.percentage, 0.0);
        assert_eq!(result.grade, Grade::F);
    }

    #[test]
    fn test_theory_only_course() {
        let records = vec![
            record(1, "theory", 20.0, Some(17.0)),
            record(2, "theory", 30.0, Some(28.0)),
        ];
        let result = aggregate(&records).unwrap();

        assert_eq!(result.lab.max, 0.0);
        assert_eq!(result.lab.obtained, 0.0);
        assert!(result.lab.rows.is_empty());
        assert_eq!(result.lab.percentage(), 0.0);
        assert_eq!(result.percentage, 90.0);
        assert_eq!(result.grade, Grade::O);
    }

    #[test]
    fn test_unknown_category_rejected() {
        let records = vec![
            record(1, "theory", 20.0, Some(10.0)),
            record(2, "practical", 30.0, Some(21.0)),
        ];
        let err = aggregate(&records).unwrap_err();
        assert!(err.is_validation());
        assert!(err.message().contains("practical"));
    }

    #[test]
    fn test_out_of_range_marks_rejected() {
        let over = vec![record(1, "theory", 20.0, Some(20.5))];
        assert!(aggregate(&over).unwrap_err().is_validation());

        let negative = vec![record(1, "lab", 20.0, Some(-1.0))];
        assert!(aggregate(&negative).unwrap_err().is_validation());

        let nan = vec![record(1, "lab", 20.0, Some(f64::NAN))];
        assert!(aggregate(&nan).unwrap_err().is_validation());
    }

    #[test]
    fn test_boundary_marks_accepted() {
        let records = vec![
            record(1, "theory", 20.0, Some(0.0)),
            record(2, "lab", 20.0, Some(20.0)),
        ];
        let result = aggregate(&records).unwrap();
        assert_eq!(result.percentage, 50.0);
        assert_eq!(result.grade, Grade::B);
    }

    #[test]
    fn test_invalid_component_rejected() {
        let records = vec![record(1, "theory", 0.0, None)];
        assert!(aggregate(&records).unwrap_err().is_validation());

        let (mut c, m) = record(2, "lab", 10.0, Some(5.0));
        c.weightage = -2.0;
        assert!(aggregate(&[(c, m)]).unwrap_err().is_validation());
    }

    #[test]
    fn test_mismatched_pair_rejected() {
        let records = vec![(component(1, "MSE1", "theory", 20.0), mark(2, Some(5.0)))];
        assert!(aggregate(&records).unwrap_err().is_validation());
    }

    #[test]
    fn test_category_is_case_insensitive() {
        let records = vec![
            record(1, "Theory", 10.0, Some(5.0)),
            record(2, "LAB", 10.0, Some(5.0)),
        ];
        let result = aggregate(&records).unwrap();
        assert_eq!(result.theory.rows.len(), 1);
        assert_eq!(result.lab.rows.len(), 1);
    }

    #[test]
    fn test_weightage_does_not_affect_totals() {
        let (mut heavy, heavy_mark) = record(1, "theory", 20.0, Some(10.0));
        heavy.weightage = 40.0;
        let (mut light, light_mark) = record(2, "theory", 20.0, Some(20.0));
        light.weightage = 10.0;
        let result = aggregate(&[(heavy, heavy_mark), (light, light_mark)]).unwrap();

        assert_eq!(result.theory.obtained, 30.0);
        assert_eq!(result.percentage, 75.0);
        assert_eq!(result.theory.rows[0].weightage, 40.0);
        assert_eq!(result.theory.rows[1].weightage, 10.0);
    }

    #[test]
    fn test_additivity_and_range() {
        let records = vec![
            record(1, "theory", 20.0, Some(13.5)),
            record(2, "lab", 15.0, None),
            record(3, "theory", 10.0, Some(7.25)),
            record(4, "lab", 25.0, Some(19.0)),
            record(5, "theory", 5.0, Some(5.0)),
        ];
        let result = aggregate(&records).unwrap();

        assert_eq!(
            result.theory.obtained + result.lab.obtained,
            result.combined_obtained
        );
        assert_eq!(result.theory.max + result.lab.max, result.combined_max);
        assert!((0.0..=100.0).contains(&result.percentage));
    }

    #[test]
    fn test_order_independent_totals() {
        let mut records = vec![
            record(1, "theory", 20.0, Some(12.0)),
            record(2, "lab", 30.0, Some(22.0)),
            record(3, "theory", 20.0, Some(15.0)),
        ];
        let forward = aggregate(&records).unwrap();
        records.reverse();
        let backward = aggregate(&records).unwrap();

        assert_eq!(forward.combined_obtained, backward.combined_obtained);
        assert_eq!(forward.percentage, backward.percentage);
        assert_eq!(forward.grade, backward.grade);
    }

    #[test]
    fn test_idempotent() {
        let records = vec![
            record(1, "theory", 20.0, Some(11.0)),
            record(2, "lab", 30.0, Some(29.0)),
        ];
        let first = aggregate(&records).unwrap();
        let second = aggregate(&records).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.percentage.to_bits(), second.percentage.to_bits());
    }

    #[test]
    fn test_grade_uses_rounded_percentage() {
        // 899.96 / 1000 = 89.996% -> 显示 90.00，等级与显示一致为 O
        let records = vec![record(1, "theory", 1000.0, Some(899.96))];
        let result = aggregate(&records).unwrap();
        assert_eq!(result.percentage, 90.0);
        assert_eq!(result.grade, Grade::O);
    }

    #[test]
    fn test_validate_mark_accepts_null() {
        let c = component(1, "MSE1", "theory", 20.0);
        assert!(validate_mark(&c, None).is_ok());
        assert!(validate_mark(&c, Some(20.0)).is_ok());
        assert!(validate_mark(&c, Some(20.01)).is_err());
    }
}
