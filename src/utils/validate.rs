use once_cell::sync::Lazy;
use regex::Regex;

static COURSE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9][A-Z0-9-]{1,19}$").expect("Invalid course code regex"));

static ROLL_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9/-]{3,32}$").expect("Invalid roll number regex"));

static TERM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-(ODD|EVEN|[1-9])$").expect("Invalid term regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

/// 规范化并校验课程代码，返回大写形式
pub fn normalize_course_code(code: &str) -> Result<String, &'static str> {
    let code = code.trim().to_ascii_uppercase();
    // 课程代码：2-20 位大写字母、数字或连字符，不能以连字符开头
    if !COURSE_CODE_RE.is_match(&code) {
        return Err(
            "Course code must be 2-20 characters of letters, digits or hyphens, not starting with a hyphen",
        );
    }
    Ok(code)
}

pub fn validate_roll_number(roll_number: &str) -> Result<(), &'static str> {
    if !ROLL_NUMBER_RE.is_match(roll_number) {
        return Err("Roll number must be 3-32 characters of letters, digits, '/' or '-'");
    }
    Ok(())
}

/// 学期格式：四位年份 + ODD/EVEN 或 1-9 学期序号，如 2025-ODD、2024-3
pub fn validate_term(term: &str) -> Result<(), &'static str> {
    if !TERM_RE.is_match(term) {
        return Err("Term must look like 2025-ODD, 2025-EVEN or 2025-1");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 名称类字段：去除首尾空白后不能为空，长度不超过 max_len 个字符
pub fn validate_display_name(name: &str, max_len: usize) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name must not be empty".to_string());
    }
    if trimmed.chars().count() > max_len {
        return Err(format!("Name must be at most {max_len} characters"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_code() {
        assert_eq!(normalize_course_code(" cs301 ").unwrap(), "CS301");
        assert_eq!(normalize_course_code("ma-101").unwrap(), "MA-101");
        assert!(normalize_course_code("C").is_err());
        assert!(normalize_course_code("-CS301").is_err());
        assert!(normalize_course_code("CS 301").is_err());
        assert!(normalize_course_code("ABCDEFGHIJKLMNOPQRSTU").is_err());
    }

    #[test]
    fn test_roll_number() {
        assert!(validate_roll_number("21CS001").is_ok());
        assert!(validate_roll_number("2021/CSE/042").is_ok());
        assert!(validate_roll_number("AB").is_err());
        assert!(validate_roll_number("21 CS 001").is_err());
    }

    #[test]
    fn test_term() {
        assert!(validate_term("2025-ODD").is_ok());
        assert!(validate_term("2025-EVEN").is_ok());
        assert!(validate_term("2024-3").is_ok());
        assert!(validate_term("2024-0").is_err());
        assert!(validate_term("25-ODD").is_err());
        assert!(validate_term("2025-odd").is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("student@college.edu").is_ok());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_display_name() {
        assert!(validate_display_name("MSE1", 64).is_ok());
        assert!(validate_display_name("   ", 64).is_err());
        assert!(validate_display_name(&"x".repeat(65), 64).is_err());
    }
}
