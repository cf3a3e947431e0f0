//! Note payload shapes returned by the note service.
//!
//! # Responsibility
//! - Model the loosely typed, recursively nested note content as sum types.
//! - Decode JSON snapshots of notes and task lists.
//!
//! # Invariants
//! - Every node field is optional; any JSON object decodes as a `NoteBlock`.
//! - A field of the wrong shape decodes as absent. Ids may be strings or
//!   numbers; numbers keep their decimal text.
//! - Non-object entries of child arrays are dropped; their siblings survive.
//! - Unrecognized content items decode as `Other` and are skipped by the walker.
//! - Task list entries that do not decode as tasks are dropped with a warning.
//!
//! # Preconditions
//! - Payloads are a string, an object, or an array. Other JSON values
//!   (numbers, booleans, null) are outside the contract and fail to decode.

use crate::model::task::{parse_date_prefix, CraftTask, TaskInfo, TaskState};
use chrono::NaiveDate;
use log::warn;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for payload decoding.
pub type PayloadResult<T> = Result<T, PayloadError>;

/// Errors raised while decoding snapshots at the crate boundary.
#[derive(Debug)]
pub enum PayloadError {
    /// JSON text could not be decoded into the expected shape.
    Json(serde_json::Error),
    /// Date input is not an ISO `YYYY-MM-DD` value.
    InvalidDate(String),
}

impl Display for PayloadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid payload json: {err}"),
            Self::InvalidDate(value) => write!(f, "invalid ISO date `{value}`"),
        }
    }
}

impl Error for PayloadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::InvalidDate(_) => None,
        }
    }
}

impl From<serde_json::Error> for PayloadError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Declared list style of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListStyle {
    Task,
    Todo,
    Checkbox,
    Bullet,
    Numbered,
    #[serde(other)]
    Other,
}

impl ListStyle {
    /// Returns whether the host renders this node as a checkbox item.
    pub fn is_task_like(self) -> bool {
        matches!(self, Self::Task | Self::Todo | Self::Checkbox)
    }
}

/// `color` field: either a plain name or an object carrying one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockColor {
    Name(String),
    Spec {
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
    Other(serde_json::Value),
}

impl BlockColor {
    fn resolve(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name.as_str()),
            Self::Spec { color, name } => color.as_deref().or(name.as_deref()),
            Self::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockStyle {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub highlight: Option<String>,
}

/// `content` field: a text leaf or a list of mixed children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockContent {
    Text(String),
    Items(Vec<ContentItem>),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentItem {
    Text(String),
    Block(NoteBlock),
    Other(serde_json::Value),
}

/// One node of a note tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NoteBlock {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub block_type: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub text_style: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub markdown: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub content: Option<BlockContent>,
    #[serde(deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub page_title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub color: Option<BlockColor>,
    #[serde(deserialize_with = "lenient")]
    pub highlight: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub highlight_color: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub style: Option<BlockStyle>,
    #[serde(deserialize_with = "lenient")]
    pub list_style: Option<ListStyle>,
    #[serde(deserialize_with = "lenient")]
    pub task_info: Option<TaskInfo>,
    #[serde(deserialize_with = "lenient_blocks")]
    pub blocks: Vec<NoteBlock>,
    #[serde(deserialize_with = "lenient_blocks")]
    pub subblocks: Vec<NoteBlock>,
    #[serde(deserialize_with = "lenient_blocks")]
    pub children: Vec<NoteBlock>,
    #[serde(deserialize_with = "lenient")]
    pub page: Option<Box<NoteBlock>>,
}

impl NoteBlock {
    /// Structural color of the node.
    ///
    /// Priority: `color`, `highlight`, `highlightColor`, `style.color`,
    /// `style.highlight`.
    pub fn resolved_color(&self) -> Option<&str> {
        let structural = self
            .color
            .as_ref()
            .and_then(BlockColor::resolve)
            .or(self.highlight.as_deref())
            .or(self.highlight_color.as_deref())
            .filter(|value| !value.is_empty());
        if structural.is_some() {
            return structural;
        }
        self.style
            .as_ref()
            .and_then(|style| style.color.as_deref().or(style.highlight.as_deref()))
            .filter(|value| !value.is_empty())
    }

    /// Host-reported task state, when present.
    pub fn task_state(&self) -> Option<TaskState> {
        self.task_info.as_ref().and_then(|info| info.state)
    }
}

/// Decodes the field as `T`, or `None` when it has another shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => Some(id),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    })
}

fn lenient_blocks<'de, D>(deserializer: D) -> Result<Vec<NoteBlock>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => decode_each(items),
        _ => Vec::new(),
    })
}

fn decode_each<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}

/// Top-level note payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NotePayload {
    /// Legacy XML-ish text with inline `<pageTitle>` / `<content>` tags.
    Legacy(String),
    Blocks(Vec<NoteBlock>),
    Block(Box<NoteBlock>),
}

impl<'de> Deserialize<'de> for NotePayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(Self::Legacy(text)),
            Value::Array(items) => Ok(Self::Blocks(decode_each(items))),
            value @ Value::Object(_) => serde_json::from_value(value)
                .map(|block| Self::Block(Box::new(block)))
                .map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "note payload must be a string, object, or array, got `{other}`"
            ))),
        }
    }
}

impl NotePayload {
    /// Decodes a payload from JSON text.
    pub fn from_json_str(json: &str) -> PayloadResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Decodes a task list from JSON text (a bare array or `{ "items": [...] }`).
pub fn parse_tasks_json(json: &str) -> PayloadResult<Vec<CraftTask>> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TaskList {
        Bare(Vec<Value>),
        Wrapped { items: Vec<Value> },
    }

    let items = match serde_json::from_str(json)? {
        TaskList::Bare(items) | TaskList::Wrapped { items } => items,
    };
    let total = items.len();
    let tasks: Vec<CraftTask> = decode_each(items);
    if tasks.len() < total {
        warn!(
            "event=tasks_decode module=payload status=partial decoded={} skipped={}",
            tasks.len(),
            total - tasks.len()
        );
    }
    Ok(tasks)
}

/// Parses a strict ISO `YYYY-MM-DD` date.
pub fn parse_iso_date(raw: &str) -> PayloadResult<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.len() != 10 {
        return Err(PayloadError::InvalidDate(raw.to_string()));
    }
    parse_date_prefix(trimmed).ok_or_else(|| PayloadError::InvalidDate(raw.to_string()))
}
