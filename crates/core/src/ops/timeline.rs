//! Timeline operators: retrieval, naming, export/import, item listing.

use std::str::FromStr;

use tracing::warn;

use crate::error::{Error, Result};
use crate::graph::{
    Direction, Instance, Operator, OperatorInfo, PlugSet, PlugSpec, PlugValue, ValueKind,
};
use crate::host::{
    Clip, HostContext, MediaPool, Project, Timeline, TimelineExportFormat, TimelineImportOptions,
    TimelineItem, TimelineItemRef, TimelineRef, TrackKind,
};
use crate::util::{ensure_suffix, to_valid_index};

use super::{ensure_host_ok, media_pool};

/// Suffix of the host's native timeline format; it takes no import options.
const NATIVE_TIMELINE_SUFFIX: &str = "drt";

/// Selection strategies for [`TimelineGet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineSelect {
    ByName,
    ByIndex,
    Current,
}

impl TimelineSelect {
    pub const OPTIONS: [&'static str; 3] = ["ByName", "ByIndex", "Current"];
}

impl FromStr for TimelineSelect {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "ByName" => Ok(TimelineSelect::ByName),
            "ByIndex" => Ok(TimelineSelect::ByIndex),
            "Current" => Ok(TimelineSelect::Current),
            other => Err(Error::invalid(format!(
                "Get method '{other}' is not supported. Choose between: 'ByName', 'ByIndex', 'Current'."
            ))),
        }
    }
}

/// Get a timeline: by name (linear 1-based scan, warn and leave the output
/// Empty on a miss), by validated index, or the currently open one.
pub struct TimelineGet;

impl Operator for TimelineGet {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "timeline.get",
            summary: "Get a timeline by name, by index, or the current one",
            editable: false,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![
            PlugSpec::input("project", ValueKind::Instance),
            PlugSpec::input("get_method", ValueKind::Enum)
                .with_options(TimelineSelect::OPTIONS)
                .with_default("ByName"),
            PlugSpec::input("key", ValueKind::Text),
            PlugSpec::output("timeline", ValueKind::Instance),
        ]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        host.session()?;
        let project = plugs.project("project")?;
        let method: TimelineSelect = plugs.text("get_method")?.parse()?;
        let key = plugs.text("key")?;
        let timeline = match method {
            TimelineSelect::ByName => {
                let count = project
                    .timeline_count()
                    .map_err(|e| Error::host("counting the timelines", e))?;
                let mut found = None;
                for index in 1..=count {
                    let timeline = project
                        .timeline_by_index(index)
                        .map_err(|e| Error::host(format!("getting timeline {index}"), e))?;
                    let name = timeline
                        .name()
                        .map_err(|e| Error::host(format!("reading the name of timeline {index}"), e))?;
                    if name == key {
                        found = Some(timeline);
                        break;
                    }
                }
                if found.is_none() {
                    warn!("timeline '{key}' not found");
                }
                found
            }
            TimelineSelect::ByIndex => {
                let count = project
                    .timeline_count()
                    .map_err(|e| Error::host("counting the timelines", e))?;
                let index = to_valid_index(&key, "Timeline", count)?;
                Some(
                    project
                        .timeline_by_index(index)
                        .map_err(|e| Error::host(format!("getting the timeline at index {index}"), e))?,
                )
            }
            TimelineSelect::Current => Some(
                project
                    .current_timeline()
                    .map_err(|e| Error::host("getting the current timeline", e))?,
            ),
        };
        match timeline {
            Some(timeline) => {
                plugs.set_value("timeline", Direction::Out, Instance::Timeline(timeline))?
            }
            None => plugs.set_value("timeline", Direction::Out, PlugValue::Empty)?,
        }
        Ok(())
    }
}

/// Make a timeline the project's current timeline.
pub struct TimelineSetCurrent;

impl Operator for TimelineSetCurrent {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "timeline.set_current",
            summary: "Set a timeline as the project's current timeline",
            editable: false,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![
            PlugSpec::input("project", ValueKind::Instance),
            PlugSpec::input("timeline", ValueKind::Instance),
        ]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        host.session()?;
        let project = plugs.project("project")?;
        let timeline = plugs.timeline("timeline")?;
        let ok = project
            .set_current_timeline(&timeline)
            .map_err(|e| Error::host("setting the current timeline", e))?;
        ensure_host_ok(ok, "setting the current timeline")
    }
}

/// Get the name of a timeline.
pub struct TimelineNameGet;

impl Operator for TimelineNameGet {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "timeline.name.get",
            summary: "Get the name of a timeline",
            editable: false,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![
            PlugSpec::input("timeline", ValueKind::Instance),
            PlugSpec::output("name", ValueKind::Text),
        ]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        host.session()?;
        let timeline = plugs.timeline("timeline")?;
        let name = timeline
            .name()
            .map_err(|e| Error::host("reading the timeline name", e))?;
        plugs.set_value("name", Direction::Out, name)
    }
}

/// Rename a timeline.
pub struct TimelineNameSet;

impl Operator for TimelineNameSet {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "timeline.name.set",
            summary: "Set the name of a timeline",
            editable: false,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![
            PlugSpec::input("timeline", ValueKind::Instance),
            PlugSpec::input("name", ValueKind::Text),
        ]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        host.session()?;
        let timeline = plugs.timeline("timeline")?;
        let name = plugs.text("name")?;
        let ok = timeline
            .set_name(&name)
            .map_err(|e| Error::host("setting the timeline name", e))?;
        ensure_host_ok(ok, "setting the timeline name")
    }
}

/// Export a timeline in one of the host's interchange formats. The file path
/// must carry the suffix the chosen format expects.
pub struct TimelineExport;

impl Operator for TimelineExport {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "timeline.export",
            summary: "Export a timeline to an interchange file",
            editable: false,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![
            PlugSpec::input("timeline", ValueKind::Instance),
            PlugSpec::input("filepath", ValueKind::Path),
            PlugSpec::input("format", ValueKind::Enum)
                .with_options(TimelineExportFormat::ALL.map(|format| format.label()))
                .with_default(TimelineExportFormat::Fcp7Xml.label()),
            PlugSpec::output("filepath", ValueKind::Path),
        ]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        host.session()?;
        let timeline = plugs.timeline("timeline")?;
        let path = plugs.path("filepath")?;
        let format: TimelineExportFormat = plugs.text("format")?.parse()?;
        ensure_suffix(&path, format.suffix())?;
        let ok = timeline
            .export(&path, format)
            .map_err(|e| Error::host(format!("exporting the timeline as {format}"), e))?;
        ensure_host_ok(ok, "exporting the timeline")?;
        plugs.set_value("filepath", Direction::Out, path)
    }
}

/// Import a timeline file into the project. The native timeline format
/// ignores import options; when a name is given it is applied by renaming
/// after the import, and a failed rename only warns.
pub struct TimelineImport;

impl Operator for TimelineImport {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "timeline.import",
            summary: "Import a timeline file into the project",
            editable: false,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![
            PlugSpec::input("project", ValueKind::Instance),
            PlugSpec::input("filepath", ValueKind::Path),
            PlugSpec::input("timeline_name", ValueKind::Text),
            PlugSpec::input("import_source_clips", ValueKind::Bool).with_default(true),
            PlugSpec::input("source_clips_path", ValueKind::Path),
            PlugSpec::input("source_clips_folders", ValueKind::InstanceList),
            PlugSpec::output("timeline", ValueKind::Instance),
        ]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        host.session()?;
        let project = plugs.project("project")?;
        let path = plugs.path("filepath")?;
        if !path.is_file() {
            return Err(Error::invalid(format!(
                "'{}' is not a timeline file",
                path.display()
            )));
        }
        let is_native = path
            .extension()
            .is_some_and(|extension| extension == NATIVE_TIMELINE_SUFFIX);
        let name = plugs.text("timeline_name")?;
        let mut options = TimelineImportOptions::default();
        if !is_native {
            options.import_source_clips = plugs.flag("import_source_clips")?;
            if !name.is_empty() {
                options.timeline_name = Some(name.clone());
            }
            let clips_path = plugs.path("source_clips_path")?;
            if !clips_path.as_os_str().is_empty() {
                options.source_clips_path = Some(clips_path);
            }
            match plugs.value("source_clips_folders", Direction::In)? {
                PlugValue::Empty => {}
                PlugValue::InstanceList(_) => {
                    options.source_clips_folders = plugs.folders("source_clips_folders")?;
                }
                other => {
                    return Err(Error::PlugType {
                        code: "source_clips_folders".to_string(),
                        expected: "instance list",
                        found: other.kind_name(),
                    });
                }
            }
        }
        let pool = media_pool(&project)?;
        let timeline = pool
            .import_timeline_from_file(&path, &options)
            .map_err(|e| Error::host("importing the timeline", e))?;
        if is_native && !name.is_empty() {
            match timeline.set_name(&name) {
                Ok(true) => {}
                Ok(false) => warn!("the timeline could not be renamed after the import"),
                Err(e) => warn!("the timeline could not be renamed after the import: {e}"),
            }
        }
        plugs.set_value("timeline", Direction::Out, Instance::Timeline(timeline))
    }
}

/// Selection strategies for [`TimelineItemsGet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemsSelect {
    All,
    ByTrackIdx,
    ByTrackName,
}

impl ItemsSelect {
    pub const OPTIONS: [&'static str; 3] = ["All", "ByTrackIdx", "ByTrackName"];
}

impl FromStr for ItemsSelect {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "All" => Ok(ItemsSelect::All),
            "ByTrackIdx" => Ok(ItemsSelect::ByTrackIdx),
            "ByTrackName" => Ok(ItemsSelect::ByTrackName),
            other => Err(Error::invalid(format!(
                "Get method '{other}' is not valid. Choose between: 'All', 'ByTrackIdx', 'ByTrackName'."
            ))),
        }
    }
}

/// List timeline items of one track kind: every track, one track by
/// validated index, or one track by name.
pub struct TimelineItemsGet;

impl TimelineItemsGet {
    fn items_in_track(
        timeline: &TimelineRef,
        kind: TrackKind,
        index: usize,
    ) -> Result<Vec<TimelineItemRef>> {
        timeline
            .items_in_track(kind, index)
            .map_err(|e| Error::host(format!("reading the items of {kind} track {index}"), e))
    }
}

impl Operator for TimelineItemsGet {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "timeline.items.get",
            summary: "List the items of a timeline's tracks",
            editable: false,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![
            PlugSpec::input("timeline", ValueKind::Instance),
            PlugSpec::input("track_type", ValueKind::Enum)
                .with_options(TrackKind::ALL.map(|kind| kind.as_str()))
                .with_default("video"),
            PlugSpec::input("get_method", ValueKind::Enum)
                .with_options(ItemsSelect::OPTIONS)
                .with_default("All"),
            PlugSpec::input("key", ValueKind::Text),
            PlugSpec::output("items", ValueKind::InstanceList),
        ]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        host.session()?;
        let timeline = plugs.timeline("timeline")?;
        let kind: TrackKind = plugs.text("track_type")?.parse()?;
        let method: ItemsSelect = plugs.text("get_method")?.parse()?;
        let key = plugs.text("key")?;
        let count = timeline
            .track_count(kind)
            .map_err(|e| Error::host(format!("counting the {kind} tracks"), e))?;
        let items = match method {
            ItemsSelect::All => {
                let mut items = Vec::new();
                for index in 1..=count {
                    items.extend(Self::items_in_track(&timeline, kind, index)?);
                }
                if items.is_empty() {
                    warn!("no timeline items found");
                }
                items
            }
            ItemsSelect::ByTrackIdx => {
                let index = to_valid_index(&key, "Track", count)?;
                Self::items_in_track(&timeline, kind, index)?
            }
            ItemsSelect::ByTrackName => {
                let mut items = Vec::new();
                for index in 1..=count {
                    let name = timeline
                        .track_name(kind, index)
                        .map_err(|e| Error::host(format!("reading the name of {kind} track {index}"), e))?;
                    if name == key {
                        items = Self::items_in_track(&timeline, kind, index)?;
                        break;
                    }
                }
                if items.is_empty() {
                    warn!("track '{key}' not found or empty");
                }
                items
            }
        };
        plugs.set_value(
            "items",
            Direction::Out,
            PlugValue::InstanceList(items.into_iter().map(Instance::TimelineItem).collect()),
        )
    }
}

/// Where [`TimelineItemGet`] reads the name to match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemNameSource {
    TimelineItem,
    MediaPoolClip,
}

impl ItemNameSource {
    pub const OPTIONS: [&'static str; 2] = ["TimelineItem", "MediaPoolClip"];
}

impl FromStr for ItemNameSource {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "TimelineItem" => Ok(ItemNameSource::TimelineItem),
            "MediaPoolClip" => Ok(ItemNameSource::MediaPoolClip),
            other => Err(Error::invalid(format!(
                "Name source '{other}' is not valid. Choose between: 'TimelineItem', 'MediaPoolClip'."
            ))),
        }
    }
}

/// Pick one item out of an item list by name, matched against either the
/// timeline item's own name or the name of its media pool clip. Outputs the
/// item and its clip.
pub struct TimelineItemGet;

impl Operator for TimelineItemGet {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "timeline.item.get",
            summary: "Get a timeline item from a list by name",
            editable: false,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![
            PlugSpec::input("items", ValueKind::InstanceList),
            PlugSpec::input("name_source", ValueKind::Enum)
                .with_options(ItemNameSource::OPTIONS)
                .with_default("TimelineItem"),
            PlugSpec::input("name", ValueKind::Text),
            PlugSpec::output("item", ValueKind::Instance),
            PlugSpec::output("clip", ValueKind::Instance),
        ]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        host.session()?;
        let items = plugs.timeline_items("items")?;
        if items.is_empty() {
            return Err(Error::invalid(
                "a list of timeline items is required to get one item",
            ));
        }
        let source: ItemNameSource = plugs.text("name_source")?.parse()?;
        let wanted = plugs.text("name")?;
        let mut found = None;
        for item in items {
            let name = match source {
                ItemNameSource::TimelineItem => item
                    .name()
                    .map_err(|e| Error::host("reading a timeline item name", e))?,
                ItemNameSource::MediaPoolClip => {
                    let Some(clip) = item
                        .media_pool_item()
                        .map_err(|e| Error::host("reading a media pool item", e))?
                    else {
                        continue;
                    };
                    clip.clip_property("Clip Name")
                        .map_err(|e| Error::host("reading a clip name", e))?
                        .unwrap_or_default()
                }
            };
            if name == wanted {
                found = Some(item);
                break;
            }
        }
        let clip = match &found {
            Some(item) => match item.media_pool_item() {
                Ok(clip) => clip,
                Err(e) => {
                    warn!("the media pool item could not be read from the timeline item: {e}");
                    None
                }
            },
            None => None,
        };
        match found {
            Some(item) => plugs.set_value("item", Direction::Out, Instance::TimelineItem(item))?,
            None => plugs.set_value("item", Direction::Out, PlugValue::Empty)?,
        }
        match clip {
            Some(clip) => plugs.set_value("clip", Direction::Out, Instance::Clip(clip))?,
            None => plugs.set_value("clip", Direction::Out, PlugValue::Empty)?,
        }
        Ok(())
    }
}
