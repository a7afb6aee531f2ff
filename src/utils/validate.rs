use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::questions::entities::ChoiceOption;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_full_name(full_name: &str) -> Result<(), &'static str> {
    if full_name.chars().count() > 50 {
        return Err("Full name must be at most 50 characters");
    }
    Ok(())
}

pub fn validate_paper_title(title: &str) -> Result<(), &'static str> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Title must not be empty");
    }
    if title.chars().count() > 255 {
        return Err("Title must be at most 255 characters");
    }
    Ok(())
}

pub fn validate_question_content(content: &str) -> Result<(), &'static str> {
    if content.trim().is_empty() {
        return Err("Question content must not be empty");
    }
    Ok(())
}

/// 正确答案必须指向一个非空选项
pub fn validate_correct_option(
    correct: Option<ChoiceOption>,
    options: [Option<&str>; 4],
) -> Result<(), &'static str> {
    let Some(correct) = correct else {
        return Ok(());
    };
    let index = match correct {
        ChoiceOption::A => 0,
        ChoiceOption::B => 1,
        ChoiceOption::C => 2,
        ChoiceOption::D => 3,
    };
    match options[index] {
        Some(text) if !text.trim().is_empty() => Ok(()),
        _ => Err("Correct option must point at a non-empty option"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("teacher@school.edu").is_ok());
        assert!(validate_email("a.b+c@example.co").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
    }

    #[test]
    fn test_full_name_length() {
        assert!(validate_full_name("张三").is_ok());
        assert!(validate_full_name(&"x".repeat(50)).is_ok());
        assert!(validate_full_name(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_paper_title() {
        assert!(validate_paper_title("期中考试").is_ok());
        assert!(validate_paper_title("   ").is_err());
        assert!(validate_paper_title(&"t".repeat(256)).is_err());
    }

    #[test]
    fn test_correct_option_must_exist() {
        let options = [Some("1"), Some("2"), None, Some(" ")];
        assert!(validate_correct_option(None, options).is_ok());
        assert!(validate_correct_option(Some(ChoiceOption::B), options).is_ok());
        assert!(validate_correct_option(Some(ChoiceOption::C), options).is_err());
        assert!(validate_correct_option(Some(ChoiceOption::D), options).is_err());
    }
}
