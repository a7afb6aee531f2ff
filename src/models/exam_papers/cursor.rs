use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// 教师试卷游标：上一页最后一份试卷的 (创建时间, ID)
///
/// 文本形式为 `{created_at}_{id}`，按 (created_at, id) 降序翻页。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaperCursor {
    pub created_at: i64,
    pub id: Uuid,
}

impl fmt::Display for PaperCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.created_at, self.id.simple())
    }
}

impl FromStr for PaperCursor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid cursor: '{s}'");
        let (created_at, id) = s.split_once('_').ok_or_else(invalid)?;
        Ok(Self {
            created_at: created_at.parse().map_err(|_| invalid())?,
            id: Uuid::parse_str(id).map_err(|_| invalid())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_text_form() {
        let cursor = PaperCursor {
            created_at: 1_700_000_000,
            id: Uuid::now_v7(),
        };
        let text = cursor.to_string();
        assert!(text.starts_with("1700000000_"));
        assert_eq!(text.parse::<PaperCursor>(), Ok(cursor));
    }

    #[test]
    fn test_malformed_cursors_are_rejected() {
        for bad in ["", "abc", "12_not-a-uuid", "x_0190a0b0c0d07000800000000000000a"] {
            assert!(bad.parse::<PaperCursor>().is_err(), "{bad} should be rejected");
        }
    }
}
