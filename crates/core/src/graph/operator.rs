//! Operator trait and the runtime plug table.

use std::path::PathBuf;

use serde::Serialize;

use super::plug::{Direction, Instance, InstanceKind, PlugSpec, PlugValue};
use crate::error::{Error, Result};
use crate::host::{ClipRef, FolderRef, HostContext, ProjectRef, TimelineItemRef, TimelineRef};

/// Descriptive metadata for a catalog operator.
#[derive(Debug, Clone, Serialize)]
pub struct OperatorInfo {
    pub name: &'static str,
    pub summary: &'static str,
    /// Editable operators accept user-added plugs whose codes are read as
    /// host field names.
    pub editable: bool,
}

/// One plug instantiated with a value.
#[derive(Debug, Clone)]
pub struct Plug {
    pub spec: PlugSpec,
    pub value: PlugValue,
}

/// Runtime plug table for one operator execution.
#[derive(Debug, Clone, Default)]
pub struct PlugSet {
    plugs: Vec<Plug>,
}

impl PlugSet {
    pub fn from_specs(specs: Vec<PlugSpec>) -> Self {
        Self {
            plugs: specs
                .into_iter()
                .map(|spec| Plug {
                    value: spec.default.clone(),
                    spec,
                })
                .collect(),
        }
    }

    /// Add a user plug; only meaningful on editable operators.
    pub fn add(&mut self, spec: PlugSpec) {
        self.plugs.push(Plug {
            value: spec.default.clone(),
            spec,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Plug> + '_ {
        self.plugs.iter()
    }

    /// Plugs flowing in the given direction.
    pub fn direction(&self, direction: Direction) -> impl Iterator<Item = &Plug> + '_ {
        self.plugs
            .iter()
            .filter(move |plug| plug.spec.direction == direction)
    }

    pub fn value(&self, code: &str, direction: Direction) -> Result<&PlugValue> {
        self.plugs
            .iter()
            .find(|plug| plug.spec.code == code && plug.spec.direction == direction)
            .map(|plug| &plug.value)
            .ok_or_else(|| Error::UnknownPlug(code.to_string()))
    }

    pub fn set_value(
        &mut self,
        code: &str,
        direction: Direction,
        value: impl Into<PlugValue>,
    ) -> Result<()> {
        let plug = self
            .plugs
            .iter_mut()
            .find(|plug| plug.spec.code == code && plug.spec.direction == direction)
            .ok_or_else(|| Error::UnknownPlug(code.to_string()))?;
        plug.value = value.into();
        Ok(())
    }

    /// Set an input plug value; the usual way to feed an operator.
    pub fn set(&mut self, code: &str, value: impl Into<PlugValue>) -> Result<()> {
        self.set_value(code, Direction::In, value)
    }

    pub fn text(&self, code: &str) -> Result<String> {
        match self.value(code, Direction::In)? {
            PlugValue::Text(value) => Ok(value.clone()),
            other => Err(Error::PlugType {
                code: code.to_string(),
                expected: "text",
                found: other.kind_name(),
            }),
        }
    }

    pub fn flag(&self, code: &str) -> Result<bool> {
        match self.value(code, Direction::In)? {
            PlugValue::Bool(value) => Ok(*value),
            other => Err(Error::PlugType {
                code: code.to_string(),
                expected: "bool",
                found: other.kind_name(),
            }),
        }
    }

    pub fn int(&self, code: &str) -> Result<i64> {
        match self.value(code, Direction::In)? {
            PlugValue::Int(value) => Ok(*value),
            other => Err(Error::PlugType {
                code: code.to_string(),
                expected: "int",
                found: other.kind_name(),
            }),
        }
    }

    pub fn path(&self, code: &str) -> Result<PathBuf> {
        match self.value(code, Direction::In)? {
            PlugValue::Path(value) => Ok(value.clone()),
            other => Err(Error::PlugType {
                code: code.to_string(),
                expected: "path",
                found: other.kind_name(),
            }),
        }
    }

    fn instance(&self, code: &str, expected: InstanceKind) -> Result<&Instance> {
        match self.value(code, Direction::In)? {
            PlugValue::Instance(instance) => Ok(instance),
            PlugValue::Empty => Err(Error::MissingInstance {
                code: code.to_string(),
                expected,
            }),
            other => Err(Error::PlugType {
                code: code.to_string(),
                expected: "instance",
                found: other.kind_name(),
            }),
        }
    }

    fn instance_list(&self, code: &str, expected: InstanceKind) -> Result<&[Instance]> {
        match self.value(code, Direction::In)? {
            PlugValue::InstanceList(instances) => Ok(instances),
            PlugValue::Empty => Err(Error::MissingInstance {
                code: code.to_string(),
                expected,
            }),
            other => Err(Error::PlugType {
                code: code.to_string(),
                expected: "instance list",
                found: other.kind_name(),
            }),
        }
    }
}

macro_rules! instance_getters {
    ($(($single:ident, $list:ident, $variant:ident, $kind:ident, $reference:ty)),* $(,)?) => {
        impl PlugSet {
            $(
                pub fn $single(&self, code: &str) -> Result<$reference> {
                    match self.instance(code, InstanceKind::$kind)? {
                        Instance::$variant(handle) => Ok(handle.clone()),
                        other => Err(Error::WrongInstance {
                            expected: InstanceKind::$kind,
                            found: other.kind(),
                        }),
                    }
                }

                pub fn $list(&self, code: &str) -> Result<Vec<$reference>> {
                    self.instance_list(code, InstanceKind::$kind)?
                        .iter()
                        .map(|instance| match instance {
                            Instance::$variant(handle) => Ok(handle.clone()),
                            other => Err(Error::WrongInstance {
                                expected: InstanceKind::$kind,
                                found: other.kind(),
                            }),
                        })
                        .collect()
                }
            )*
        }
    };
}

instance_getters!(
    (project, projects, Project, Project, ProjectRef),
    (folder, folders, Folder, Folder, FolderRef),
    (clip, clips, Clip, Clip, ClipRef),
    (timeline, timelines, Timeline, Timeline, TimelineRef),
    (timeline_item, timeline_items, TimelineItem, TimelineItem, TimelineItemRef),
);

/// An operator of the catalog: reads input plugs, talks to the host, writes
/// output plugs.
pub trait Operator: Send + Sync {
    fn info(&self) -> OperatorInfo;

    /// Declared plugs of the operator.
    fn plugs(&self) -> Vec<PlugSpec>;

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()>;

    /// Fresh plug table seeded with the declared defaults.
    fn make_plugs(&self) -> PlugSet {
        PlugSet::from_specs(self.plugs())
    }
}
