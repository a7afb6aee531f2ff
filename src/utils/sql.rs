use sea_orm::sea_query::LikeExpr;

/// 转义 LIKE 模式中的通配符（`%`、`_`）和转义符本身
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// 构造「包含」匹配的 LIKE 表达式，显式声明转义符以兼容 SQLite
pub fn contains_pattern(search: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like_pattern(search))).escape('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("plain"), "plain");
        assert_eq!(escape_like_pattern("100%"), "100\\%");
        assert_eq!(escape_like_pattern("a_b"), "a\\_b");
        assert_eq!(escape_like_pattern("c:\\d"), "c:\\\\d");
    }
}
