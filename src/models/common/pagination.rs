use serde::{Deserialize, Serialize};

// 分页查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
    #[serde(
        default = "default_size",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub size: i64,
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

// 自定义反序列化函数，支持字符串到i64的转换
fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(value as i64)
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

/// 每页最大条数
pub const MAX_PAGE_SIZE: i64 = 100;

/// 最大页码，保证 OFFSET = (page - 1) * size 不会溢出 i64
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;

/// 规范化分页参数：页码限制在 1..=MAX_PAGE，每页条数限制在 1..=MAX_PAGE_SIZE
pub fn normalize_page(page: Option<i64>, size: Option<i64>) -> (u64, u64) {
    (
        page.unwrap_or(1).clamp(1, MAX_PAGE) as u64,
        size.unwrap_or(10).clamp(1, MAX_PAGE_SIZE) as u64,
    )
}

impl PaginationQuery {
    pub fn normalized(&self) -> (u64, u64) {
        normalize_page(Some(self.page), Some(self.size))
    }
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_numbers_are_accepted() {
        let query: PaginationQuery =
            serde_json::from_str(r#"{"page": "3", "size": 20}"#).expect("valid pagination");
        assert_eq!(query.page, 3);
        assert_eq!(query.size, 20);
    }

    #[test]
    fn test_defaults_and_normalization() {
        let query: PaginationQuery = serde_json::from_str("{}").expect("valid pagination");
        assert_eq!(query.normalized(), (1, 10));

        let query = PaginationQuery { page: -4, size: 1000 };
        assert_eq!(query.normalized(), (1, 100));
    }

    #[test]
    fn test_huge_page_is_capped() {
        let (page, size) = normalize_page(Some(i64::MAX), Some(i64::MAX));
        assert_eq!(page, MAX_PAGE as u64);
        assert_eq!(size, MAX_PAGE_SIZE as u64);
        assert!((page - 1).checked_mul(size).is_some_and(|o| o <= i64::MAX as u64));
    }
}
