//! 成绩汇总与等级评定
//!
//! 纯计算模块，不做任何 I/O：输入为某个选课记录的 (考核项, 成绩) 列表，
//! 输出理论/实验分类小计、总分、百分比和等级。每次请求重新计算，结果不落库。
//!
//! # 汇总口径
//! - 总分为原始得分直接相加，权重只随明细行返回用于展示，不参与计算
//! - 未评分（null）按 0 计入总分，但在明细中保持为 null
//! - 百分比保留两位小数，等级按四舍五入后的百分比评定

mod aggregate;
mod grade;
mod report;

pub use aggregate::{
    AggregatedResult, CategoryBreakdown, ComponentMarkRow, aggregate, validate_component,
    validate_mark,
};
pub use grade::{GRADE_BANDS, Grade, grade_for, percentage_of, round2};
pub use report::{grade_distribution, percentage_stats};
