use serde::{Deserialize, Serialize};

/// 檔案紀錄服務回傳的民事/家事案件快照
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSnapshot {
    pub court_class: String,
    #[serde(default)]
    pub appearances: Vec<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub reference_documents: Vec<String>,
}

/// 刑事案件內容：每位被告一筆紀錄
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    #[serde(default)]
    pub accused_files: Vec<AccusedFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccusedFile {
    pub physical_file_id: String,
    pub participant_id: String,
    #[serde(default)]
    pub prof_seq_no: Option<String>,
    #[serde(default)]
    pub court_level_cd: Option<String>,
    #[serde(default)]
    pub court_class_cd: Option<String>,
    #[serde(default)]
    pub documents: Vec<CriminalDocument>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriminalDocument {
    pub document_id: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub document_type_description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTranscript {
    pub order_id: u64,
    pub document_id: u64,
}

impl FileContent {
    pub fn find_accused(&self, physical_file_id: &str, participant_id: &str) -> Option<&AccusedFile> {
        self.accused_files
            .iter()
            .find(|a| a.physical_file_id == physical_file_id && a.participant_id == participant_id)
    }
}
