use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 单选题选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoiceOption {
    A,
    B,
    C,
    D,
}

impl std::fmt::Display for ChoiceOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChoiceOption::A => write!(f, "A"),
            ChoiceOption::B => write!(f, "B"),
            ChoiceOption::C => write!(f, "C"),
            ChoiceOption::D => write!(f, "D"),
        }
    }
}

impl std::str::FromStr for ChoiceOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(ChoiceOption::A),
            "B" => Ok(ChoiceOption::B),
            "C" => Ok(ChoiceOption::C),
            "D" => Ok(ChoiceOption::D),
            _ => Err(format!("Invalid choice option: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    // 所属试卷（虚拟外键 -> exam_papers.id）
    pub paper_id: Uuid,
    pub content: String,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    pub correct_option: Option<ChoiceOption>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Question {
    /// 取出某个选项的文本
    pub fn option_text(&self, option: ChoiceOption) -> Option<&str> {
        match option {
            ChoiceOption::A => self.option_a.as_deref(),
            ChoiceOption::B => self.option_b.as_deref(),
            ChoiceOption::C => self.option_c.as_deref(),
            ChoiceOption::D => self.option_d.as_deref(),
        }
    }
}
