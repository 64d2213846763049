use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Binder 上使用的標籤鍵
pub mod labels {
    pub const JUDGE_ID: &str = "judgeId";
    pub const PHYSICAL_FILE_ID: &str = "physicalFileId";
    pub const PARTICIPANT_ID: &str = "participantId";
    pub const COURT_CLASS_CD: &str = "courtClassCd";
    pub const APPEARANCE_ID: &str = "appearanceId";
    pub const COURT_LEVEL_CD: &str = "courtLevelCd";
    pub const PROF_SEQ_NO: &str = "profSeqNo";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentKind {
    #[default]
    File,
    CourtSummary,
    Transcript,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinderDocument {
    pub document_id: String,
    pub order: i32,
    #[serde(default)]
    pub document_type: DocumentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl BinderDocument {
    pub fn new(document_id: impl Into<String>, order: i32) -> Self {
        Self {
            document_id: document_id.into(),
            order,
            document_type: DocumentKind::File,
            order_id: None,
            file_name: None,
            category: None,
        }
    }

    pub fn transcript(document_id: impl Into<String>, order_id: impl Into<String>, order: i32) -> Self {
        Self {
            document_type: DocumentKind::Transcript,
            order_id: Some(order_id.into()),
            ..Self::new(document_id, order)
        }
    }

    pub fn is_transcript(&self) -> bool {
        self.document_type == DocumentKind::Transcript
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binder {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub documents: Vec<BinderDocument>,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_date: Option<DateTime<Utc>>,
}

impl Binder {
    pub fn with_labels(labels: HashMap<String, String>) -> Self {
        Self {
            labels,
            ..Default::default()
        }
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    pub fn set_label(&mut self, key: &str, value: impl Into<String>) {
        self.labels.insert(key.to_string(), value.into());
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

/// 階段執行結果：業務規則失敗不以 Err 表示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    succeeded: bool,
    errors: Vec<String>,
}

impl OperationResult {
    pub fn success() -> Self {
        Self {
            succeeded: true,
            errors: Vec::new(),
        }
    }

    pub fn failure<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut errors: Vec<String> = errors.into_iter().map(Into::into).collect();
        if errors.is_empty() {
            errors.push("Operation failed.".to_string());
        }
        Self {
            succeeded: false,
            errors,
        }
    }

    pub fn from_errors(errors: Vec<String>) -> Self {
        if errors.is_empty() {
            Self::success()
        } else {
            Self::failure(errors)
        }
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

/// 法院案件類別代碼（封閉集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourtClass {
    /// Adult criminal
    A,
    /// Youth criminal
    Y,
    /// Traffic and ticketing
    T,
    /// Civil
    C,
    /// Family
    F,
    /// Small claims
    L,
    /// Enforcement
    M,
}

impl CourtClass {
    pub const ALL: [CourtClass; 7] = [
        CourtClass::A,
        CourtClass::Y,
        CourtClass::T,
        CourtClass::C,
        CourtClass::F,
        CourtClass::L,
        CourtClass::M,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            CourtClass::A => "A",
            CourtClass::Y => "Y",
            CourtClass::T => "T",
            CourtClass::C => "C",
            CourtClass::F => "F",
            CourtClass::L => "L",
            CourtClass::M => "M",
        }
    }
}

impl fmt::Display for CourtClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCourtClass(pub String);

impl fmt::Display for UnknownCourtClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown court class '{}'", self.0)
    }
}

impl std::error::Error for UnknownCourtClass {}

impl FromStr for CourtClass {
    type Err = UnknownCourtClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        CourtClass::ALL
            .into_iter()
            .find(|class| class.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnknownCourtClass(s.to_string()))
    }
}

/// 目前操作的法官身分與租戶範圍
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActingUser {
    pub user_id: String,
    pub agency_id: String,
    pub participant_id: String,
    pub application_code: String,
}
