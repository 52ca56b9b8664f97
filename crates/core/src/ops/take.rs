//! Take operators over a timeline item's take selector.

use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::{
    Direction, Instance, Operator, OperatorInfo, PlugSet, PlugSpec, PlugValue, ValueKind,
};
use crate::host::{Clip, ClipRef, HostContext, TimelineItem, TimelineItemRef};
use crate::util::to_valid_index;

use super::ensure_host_ok;

/// Selection strategies for [`TakeGet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakeSelect {
    ByName,
    ByIndex,
    Current,
}

impl TakeSelect {
    pub const OPTIONS: [&'static str; 3] = ["ByName", "ByIndex", "Current"];
}

impl FromStr for TakeSelect {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "ByName" => Ok(TakeSelect::ByName),
            "ByIndex" => Ok(TakeSelect::ByIndex),
            "Current" => Ok(TakeSelect::Current),
            other => Err(Error::invalid(format!(
                "Get method '{other}' is not supported. Choose between: 'ByName', 'ByIndex', 'Current'."
            ))),
        }
    }
}

/// Add a clip to a timeline item's take selector, with an optional frame
/// range. Equal start and end frames mean "use the clip's full range".
pub struct TakeAdd;

impl Operator for TakeAdd {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "take.add",
            summary: "Add a clip as a take of a timeline item",
            editable: false,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![
            PlugSpec::input("item", ValueKind::Instance),
            PlugSpec::input("clip", ValueKind::Instance),
            PlugSpec::input("start_frame", ValueKind::Int),
            PlugSpec::input("end_frame", ValueKind::Int),
        ]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        host.session()?;
        let item = plugs.timeline_item("item")?;
        let clip = plugs.clip("clip")?;
        let start = plugs.int("start_frame")?;
        let end = plugs.int("end_frame")?;
        if start > end {
            return Err(Error::invalid(format!(
                "the frame range {start}-{end} is not valid"
            )));
        }
        let range = (start != end).then_some((start, end));
        let ok = item
            .add_take(&clip, range)
            .map_err(|e| Error::host("adding the take", e))?;
        ensure_host_ok(ok, "adding the take")
    }
}

/// Get the clip and 1-based index of a take: by clip name, by index, or the
/// currently selected one. A name miss outputs index -1 and an Empty clip.
pub struct TakeGet;

impl TakeGet {
    fn find_by_name(item: &TimelineItemRef, key: &str) -> Result<Option<(usize, ClipRef)>> {
        let count = item
            .take_count()
            .map_err(|e| Error::host("counting the takes", e))?;
        for index in 1..=count {
            let take = item
                .take_by_index(index)
                .map_err(|e| Error::host(format!("reading take {index}"), e))?;
            let Some(clip) = take.clip else {
                warn!("take {index} has no media pool item attached");
                continue;
            };
            let name = clip
                .clip_property("Clip Name")
                .map_err(|e| Error::host(format!("reading the clip name of take {index}"), e))?;
            if name.as_deref() == Some(key) {
                return Ok(Some((index, clip)));
            }
        }
        Ok(None)
    }
}

impl Operator for TakeGet {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "take.get",
            summary: "Get the clip and index of a take of a timeline item",
            editable: false,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![
            PlugSpec::input("item", ValueKind::Instance),
            PlugSpec::input("get_method", ValueKind::Enum)
                .with_options(TakeSelect::OPTIONS)
                .with_default("ByName"),
            PlugSpec::input("key", ValueKind::Text),
            PlugSpec::output("clip", ValueKind::Instance),
            PlugSpec::output("index", ValueKind::Int),
        ]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        host.session()?;
        let item = plugs.timeline_item("item")?;
        let method: TakeSelect = plugs.text("get_method")?.parse()?;
        let key = plugs.text("key")?;
        let (index, clip) = match method {
            TakeSelect::ByName => match Self::find_by_name(&item, &key)? {
                Some((index, clip)) => (index as i64, Some(clip)),
                None => {
                    debug!("no take with clip name '{key}'");
                    (-1, None)
                }
            },
            TakeSelect::ByIndex => {
                let count = item
                    .take_count()
                    .map_err(|e| Error::host("counting the takes", e))?;
                let index = to_valid_index(&key, "Take", count)?;
                let take = item
                    .take_by_index(index)
                    .map_err(|e| Error::host(format!("getting the take at index {index}"), e))?;
                (index as i64, take.clip)
            }
            TakeSelect::Current => {
                let index = item
                    .selected_take_index()
                    .map_err(|e| Error::host("getting the selected take index", e))?;
                let take = item
                    .take_by_index(index)
                    .map_err(|e| Error::host(format!("getting the take at index {index}"), e))?;
                (index as i64, take.clip)
            }
        };
        match clip {
            Some(clip) => plugs.set_value("clip", Direction::Out, Instance::Clip(clip))?,
            None => plugs.set_value("clip", Direction::Out, PlugValue::Empty)?,
        }
        plugs.set_value("index", Direction::Out, index)
    }
}

/// Select the take at a 1-based index and output its clip.
pub struct TakeSet;

impl Operator for TakeSet {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "take.set",
            summary: "Select a take of a timeline item by index",
            editable: false,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![
            PlugSpec::input("item", ValueKind::Instance),
            PlugSpec::input("index", ValueKind::Int),
            PlugSpec::output("clip", ValueKind::Instance),
        ]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        host.session()?;
        let item = plugs.timeline_item("item")?;
        let index = plugs.int("index")?;
        let count = item
            .take_count()
            .map_err(|e| Error::host("counting the takes", e))?;
        if index < 1 || index > count as i64 {
            return Err(Error::IndexOutOfRange {
                entity: "Take".to_string(),
                index,
                available: count,
            });
        }
        let index = index as usize;
        let ok = item
            .select_take_by_index(index)
            .map_err(|e| Error::host(format!("selecting the take at index {index}"), e))?;
        ensure_host_ok(ok, "selecting the take")?;
        let take = item
            .take_by_index(index)
            .map_err(|e| Error::host(format!("getting the take at index {index}"), e))?;
        match take.clip {
            Some(clip) => plugs.set_value("clip", Direction::Out, Instance::Clip(clip)),
            None => plugs.set_value("clip", Direction::Out, PlugValue::Empty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{MemoryClip, MemoryTimelineItem};
    use crate::ops::testing;

    fn item_with_takes(names: &[&str]) -> TimelineItemRef {
        let item = MemoryTimelineItem::new("item", None);
        for name in names {
            item.push_take(Some(MemoryClip::new(name) as ClipRef));
        }
        item
    }

    fn run_take_get(item: TimelineItemRef, method: &str, key: &str) -> Result<(i64, PlugValue)> {
        let project = testing::project();
        let host = testing::context(&project);
        let mut plugs = TakeGet.make_plugs();
        plugs.set("item", Instance::TimelineItem(item))?;
        plugs.set("get_method", method)?;
        plugs.set("key", key)?;
        TakeGet.execute(&mut plugs, &host)?;
        let PlugValue::Int(index) = plugs.value("index", Direction::Out)? else {
            panic!("expected an int index");
        };
        Ok((*index, plugs.value("clip", Direction::Out)?.clone()))
    }

    #[test]
    fn take_get_by_name_returns_index_and_clip() -> Result<()> {
        let (index, clip) = run_take_get(item_with_takes(&["t1", "t2", "t3"]), "ByName", "t2")?;
        assert_eq!(index, 2);
        assert!(matches!(clip, PlugValue::Instance(Instance::Clip(_))));
        Ok(())
    }

    #[test]
    fn take_get_by_name_miss_signals_minus_one() -> Result<()> {
        let (index, clip) = run_take_get(item_with_takes(&["t1"]), "ByName", "t9")?;
        assert_eq!(index, -1);
        assert!(clip.is_empty());
        Ok(())
    }

    #[test]
    fn take_get_by_index_validates_the_key() {
        let err = run_take_get(item_with_takes(&["t1", "t2"]), "ByIndex", "3").unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 3, .. }));
        let err = run_take_get(item_with_takes(&["t1"]), "ByIndex", "x").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn take_set_then_current_round_trip() -> Result<()> {
        let project = testing::project();
        let host = testing::context(&project);
        let item = item_with_takes(&["t1", "t2"]);

        let mut plugs = TakeSet.make_plugs();
        plugs.set("item", Instance::TimelineItem(item.clone()))?;
        plugs.set("index", 2i64)?;
        TakeSet.execute(&mut plugs, &host)?;
        assert!(matches!(
            plugs.value("clip", Direction::Out)?,
            PlugValue::Instance(Instance::Clip(_))
        ));

        let (index, _) = run_take_get(item, "Current", "")?;
        assert_eq!(index, 2);
        Ok(())
    }

    #[test]
    fn take_set_rejects_out_of_range_indices() {
        let project = testing::project();
        let host = testing::context(&project);
        let item = item_with_takes(&["t1"]);

        let mut plugs = TakeSet.make_plugs();
        plugs
            .set("item", Instance::TimelineItem(item.clone()))
            .unwrap();
        plugs.set("index", 0i64).unwrap();
        let err = TakeSet.execute(&mut plugs, &host).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 0, .. }));
    }

    #[test]
    fn take_add_rejects_an_inverted_range() {
        let project = testing::project();
        let host = testing::context(&project);
        let item = item_with_takes(&[]);

        let mut plugs = TakeAdd.make_plugs();
        plugs
            .set("item", Instance::TimelineItem(item.clone()))
            .unwrap();
        plugs
            .set("clip", Instance::Clip(MemoryClip::new("c") as ClipRef))
            .unwrap();
        plugs.set("start_frame", 20i64).unwrap();
        plugs.set("end_frame", 10i64).unwrap();
        let err = TakeAdd.execute(&mut plugs, &host).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn take_add_appends_to_the_selector() -> Result<()> {
        let project = testing::project();
        let host = testing::context(&project);
        let item = item_with_takes(&["t1"]);

        let mut plugs = TakeAdd.make_plugs();
        plugs.set("item", Instance::TimelineItem(item.clone()))?;
        plugs.set("clip", Instance::Clip(MemoryClip::new("t2") as ClipRef))?;
        TakeAdd.execute(&mut plugs, &host)?;
        assert_eq!(item.take_count().unwrap(), 2);
        Ok(())
    }
}
