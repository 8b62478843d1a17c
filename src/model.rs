// ABOUTME: Serde data models for Dynalist API responses
// ABOUTME: Tolerant parsing with optional fields and defaulted flags

use serde::{Deserialize, Serialize};

/// One folder or document entry from `/file/list`. The `type` field stays a
/// raw string so an unrecognized value can be reported verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub file_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub children: Vec<String>,
}


/// One bullet within a document body from `/doc/read`. Children are ids into
/// the same flat node list; the id `"root"` marks the document root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutlineNode {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub checkbox: bool,
    #[serde(default)]
    pub heading: u8,
    #[serde(default)]
    pub color: Option<usize>,
    #[serde(default)]
    pub numbered: bool,
}


/// Envelope for `/file/list`. `_code == "Ok"` is success.
#[derive(Debug, Clone, Deserialize)]
pub struct FileListResponse {
    #[serde(rename = "_code")]
    pub code: String,
    #[serde(rename = "_msg", default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub root_file_id: Option<String>,
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

/// Envelope for `/doc/read`.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentReadResponse {
    #[serde(rename = "_code")]
    pub code: String,
    #[serde(rename = "_msg", default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub nodes: Vec<OutlineNode>,
}

impl FileListResponse {
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

impl DocumentReadResponse {
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}
