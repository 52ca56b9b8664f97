//! Clip operators.

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::graph::{
    Direction, Instance, Operator, OperatorInfo, PlugSet, PlugSpec, PlugValue, ValueKind,
};
use crate::host::{Clip, Folder, HostContext};

/// Selection strategies for [`ClipGet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipSelect {
    ByName,
}

impl ClipSelect {
    pub const OPTIONS: [&'static str; 1] = ["ByName"];
}

impl FromStr for ClipSelect {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "ByName" => Ok(ClipSelect::ByName),
            other => Err(Error::invalid(format!(
                "Get method '{other}' is not supported. Choose between: 'ByName'."
            ))),
        }
    }
}

/// Pick one clip out of a clip list by its clip name. A miss leaves the
/// output Empty.
pub struct ClipGet;

impl Operator for ClipGet {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "clip.get",
            summary: "Get a specific clip from a list of clips",
            editable: false,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![
            PlugSpec::input("clips", ValueKind::InstanceList),
            PlugSpec::input("get_method", ValueKind::Enum)
                .with_options(ClipSelect::OPTIONS)
                .with_default("ByName"),
            PlugSpec::input("key", ValueKind::Text),
            PlugSpec::output("clip", ValueKind::Instance),
        ]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        host.session()?;
        let clips = plugs.clips("clips")?;
        let ClipSelect::ByName = plugs.text("get_method")?.parse()?;
        let key = plugs.text("key")?;
        let mut target = None;
        for clip in clips {
            let name = clip
                .clip_property("Clip Name")
                .map_err(|e| Error::host("reading a clip name", e))?;
            if name.as_deref() == Some(key.as_str()) {
                target = Some(clip);
                break;
            }
        }
        match target {
            Some(clip) => plugs.set_value("clip", Direction::Out, Instance::Clip(clip))?,
            None => plugs.set_value("clip", Direction::Out, PlugValue::Empty)?,
        }
        Ok(())
    }
}

/// List all clips of a folder.
pub struct ClipListGet;

impl Operator for ClipListGet {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "clip.list",
            summary: "Get all the clips of a media pool folder",
            editable: false,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![
            PlugSpec::input("folder", ValueKind::Instance),
            PlugSpec::output("clips", ValueKind::InstanceList),
        ]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        host.session()?;
        let folder = plugs.folder("folder")?;
        let clips = folder
            .clips()
            .map_err(|e| Error::host("listing the folder's clips", e))?;
        plugs.set_value(
            "clips",
            Direction::Out,
            PlugValue::InstanceList(clips.into_iter().map(Instance::Clip).collect()),
        )
    }
}

/// Read clip properties into user-added output plugs: each custom output
/// plug code is used as the property key.
pub struct ClipPropertiesGet;

impl Operator for ClipPropertiesGet {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "clip.properties.get",
            summary: "Read named clip properties into custom output plugs",
            editable: true,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![PlugSpec::input("clip", ValueKind::Instance)]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        host.session()?;
        let clip = plugs.clip("clip")?;
        let codes: Vec<String> = plugs
            .direction(Direction::Out)
            .map(|plug| plug.spec.code.clone())
            .collect();
        for code in codes {
            let value = clip
                .clip_property(&code)
                .map_err(|e| Error::host(format!("reading clip property '{code}'"), e))?;
            if let Some(value) = value {
                plugs.set_value(&code, Direction::Out, value)?;
            }
        }
        Ok(())
    }
}
