use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Document;
use crate::parsing::render_document;

/// Keys a workspace import must carry
const REQUIRED_KEYS: [&str; 3] = ["selectedFile", "markdownOutputOpen", "files"];

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("Invalid workspace data: {0}")]
    InvalidData(String),
    #[error("No file with id {0} in the workspace")]
    UnknownFile(u64),
    #[error("Failed to serialize workspace: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// The notebook's persisted editor state: every file plus the selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub selected_file: u64,
    pub markdown_output_open: bool,
    #[serde(deserialize_with = "super::id_keys::deserialize")]
    pub files: BTreeMap<u64, Document>,
    /// Editor state this crate does not interpret, carried through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Workspace {
    /// Parse an exported workspace, rejecting anything the notebook could not load.
    pub fn import_json(text: &str) -> Result<Self, WorkspaceError> {
        let value: Value = serde_json::from_str(text).map_err(WorkspaceError::InvalidJson)?;
        let Some(object) = value.as_object() else {
            return Err(WorkspaceError::InvalidData(
                "expected a JSON object".to_string(),
            ));
        };
        if let Some(missing) = REQUIRED_KEYS.iter().find(|key| !object.contains_key(**key)) {
            return Err(WorkspaceError::InvalidData(format!("missing `{missing}`")));
        }

        let workspace: Workspace = serde_json::from_value(value)
            .map_err(|e| WorkspaceError::InvalidData(e.to_string()))?;
        if workspace.files.is_empty() {
            return Err(WorkspaceError::InvalidData(
                "workspace has no files".to_string(),
            ));
        }
        if !workspace.files.contains_key(&workspace.selected_file) {
            return Err(WorkspaceError::InvalidData(format!(
                "selected file {} is not in the workspace",
                workspace.selected_file
            )));
        }
        Ok(workspace)
    }

    pub fn to_json(&self) -> Result<String, WorkspaceError> {
        serde_json::to_string_pretty(self).map_err(WorkspaceError::Serialize)
    }

    /// One past the largest file id, so imports never collide
    pub fn next_id(&self) -> u64 {
        self.files.keys().next_back().map_or(0, |id| id + 1)
    }

    /// Store a document under a fresh id and select it
    pub fn insert_document(&mut self, document: Document) -> u64 {
        let id = self.next_id();
        self.files.insert(id, document);
        self.selected_file = id;
        id
    }

    /// Insert documents in order; the last one ends up selected.
    pub fn apply_imports(&mut self, documents: impl IntoIterator<Item = Document>) -> Vec<u64> {
        documents
            .into_iter()
            .map(|document| self.insert_document(document))
            .collect()
    }

    pub fn document(&self, id: u64) -> Option<&Document> {
        self.files.get(&id)
    }

    pub fn selected_document(&self) -> Option<&Document> {
        self.document(self.selected_file)
    }

    /// Render a document (the selected one when `id` is `None`) as fenced text
    pub fn export_markdown(&self, id: Option<u64>) -> Result<String, WorkspaceError> {
        let id = id.unwrap_or(self.selected_file);
        let document = self.document(id).ok_or(WorkspaceError::UnknownFile(id))?;
        Ok(render_document(document))
    }
}
