//! Plugs: typed, directed value ports on an operator.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::host::{ClipRef, FolderRef, ProjectRef, TimelineItemRef, TimelineRef};

/// Data-flow direction of a plug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

/// Kinds of host objects an instance plug can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceKind {
    Project,
    Folder,
    Clip,
    Timeline,
    TimelineItem,
}

impl InstanceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceKind::Project => "project",
            InstanceKind::Folder => "folder",
            InstanceKind::Clip => "clip",
            InstanceKind::Timeline => "timeline",
            InstanceKind::TimelineItem => "timeline item",
        }
    }
}

impl fmt::Display for InstanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A handle to a host object, as carried by instance plugs.
#[derive(Clone)]
pub enum Instance {
    Project(ProjectRef),
    Folder(FolderRef),
    Clip(ClipRef),
    Timeline(TimelineRef),
    TimelineItem(TimelineItemRef),
}

impl Instance {
    pub fn kind(&self) -> InstanceKind {
        match self {
            Instance::Project(_) => InstanceKind::Project,
            Instance::Folder(_) => InstanceKind::Folder,
            Instance::Clip(_) => InstanceKind::Clip,
            Instance::Timeline(_) => InstanceKind::Timeline,
            Instance::TimelineItem(_) => InstanceKind::TimelineItem,
        }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instance({})", self.kind())
    }
}

/// Value slot of a plug.
#[derive(Debug, Clone, Default)]
pub enum PlugValue {
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Text(String),
    Path(PathBuf),
    Instance(Instance),
    InstanceList(Vec<Instance>),
}

impl PlugValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            PlugValue::Empty => "empty",
            PlugValue::Bool(_) => "bool",
            PlugValue::Int(_) => "int",
            PlugValue::Text(_) => "text",
            PlugValue::Path(_) => "path",
            PlugValue::Instance(_) => "instance",
            PlugValue::InstanceList(_) => "instance list",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PlugValue::Empty)
    }

    /// Scalar rendering for values written into host text fields. Instances
    /// have no text form.
    pub fn render(&self) -> Option<String> {
        match self {
            PlugValue::Bool(value) => Some(value.to_string()),
            PlugValue::Int(value) => Some(value.to_string()),
            PlugValue::Text(value) => Some(value.clone()),
            PlugValue::Path(value) => Some(value.display().to_string()),
            PlugValue::Empty | PlugValue::Instance(_) | PlugValue::InstanceList(_) => None,
        }
    }
}

impl From<bool> for PlugValue {
    fn from(value: bool) -> Self {
        PlugValue::Bool(value)
    }
}

impl From<i64> for PlugValue {
    fn from(value: i64) -> Self {
        PlugValue::Int(value)
    }
}

impl From<&str> for PlugValue {
    fn from(value: &str) -> Self {
        PlugValue::Text(value.to_string())
    }
}

impl From<String> for PlugValue {
    fn from(value: String) -> Self {
        PlugValue::Text(value)
    }
}

impl From<PathBuf> for PlugValue {
    fn from(value: PathBuf) -> Self {
        PlugValue::Path(value)
    }
}

impl From<Instance> for PlugValue {
    fn from(value: Instance) -> Self {
        PlugValue::Instance(value)
    }
}

/// Declared value kind of a plug, for catalog introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Bool,
    Int,
    Text,
    Enum,
    Path,
    Instance,
    InstanceList,
}

impl ValueKind {
    fn default_value(&self) -> PlugValue {
        match self {
            ValueKind::Bool => PlugValue::Bool(false),
            ValueKind::Int => PlugValue::Int(0),
            ValueKind::Text | ValueKind::Enum => PlugValue::Text(String::new()),
            ValueKind::Path => PlugValue::Path(PathBuf::new()),
            ValueKind::Instance | ValueKind::InstanceList => PlugValue::Empty,
        }
    }
}

/// Static description of one plug of an operator.
#[derive(Debug, Clone, Serialize)]
pub struct PlugSpec {
    pub code: String,
    pub direction: Direction,
    pub kind: ValueKind,
    /// Accepted choices for [`ValueKind::Enum`] plugs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(skip)]
    pub default: PlugValue,
}

impl PlugSpec {
    pub fn input(code: &str, kind: ValueKind) -> Self {
        Self::new(code, Direction::In, kind)
    }

    pub fn output(code: &str, kind: ValueKind) -> Self {
        Self::new(code, Direction::Out, kind)
    }

    fn new(code: &str, direction: Direction, kind: ValueKind) -> Self {
        Self {
            code: code.to_string(),
            direction,
            kind,
            options: Vec::new(),
            default: kind.default_value(),
        }
    }

    pub fn with_default(mut self, value: impl Into<PlugValue>) -> Self {
        self.default = value.into();
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }
}
