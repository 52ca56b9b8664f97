//! Clip metadata operators. Both are editable: user-added plug codes are
//! the metadata field names.

use tracing::warn;

use crate::error::{Error, Result};
use crate::graph::{Direction, Operator, OperatorInfo, PlugSet, PlugSpec, ValueKind};
use crate::host::{Clip, HostContext};

/// Read metadata fields into user-added output plugs. A field that cannot be
/// read is logged and skipped, never fatal.
pub struct MetadataGet;

impl Operator for MetadataGet {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "metadata.get",
            summary: "Read clip metadata fields into custom output plugs",
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
            match clip.metadata(&code) {
                Ok(Some(value)) => plugs.set_value(&code, Direction::Out, value)?,
                Ok(None) => {}
                Err(e) => warn!("the metadata field '{code}' could not be read: {e}"),
            }
        }
        Ok(())
    }
}

/// Write metadata fields from user-added input plugs. Fields the host
/// refuses are collected and reported together.
pub struct MetadataSet;

impl Operator for MetadataSet {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "metadata.set",
            summary: "Write clip metadata fields from custom input plugs",
            editable: true,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![PlugSpec::input("clip", ValueKind::Instance)]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        host.session()?;
        let clip = plugs.clip("clip")?;
        let fields: Vec<(String, Option<String>)> = plugs
            .direction(Direction::In)
            .filter(|plug| plug.spec.code != "clip")
            .map(|plug| (plug.spec.code.clone(), plug.value.render()))
            .collect();
        let mut failed = Vec::new();
        for (code, value) in fields {
            let Some(value) = value else {
                warn!("the plug '{code}' holds no text-representable value");
                failed.push(code);
                continue;
            };
            match clip.set_metadata(&code, &value) {
                Ok(true) => {}
                Ok(false) => failed.push(code),
                Err(e) => {
                    warn!("the metadata field '{code}' could not be set: {e}");
                    failed.push(code);
                }
            }
        }
        if !failed.is_empty() {
            return Err(Error::invalid(format!(
                "the metadata fields {failed:?} could not be set"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryClip;
    use crate::graph::Instance;
    use crate::host::ClipRef;
    use crate::ops::testing;

    #[test]
    fn metadata_round_trips_through_the_host() -> Result<()> {
        let project = testing::project();
        let host = testing::context(&project);
        let clip = MemoryClip::new("A001") as ClipRef;

        let mut plugs = MetadataSet.make_plugs();
        plugs.add(PlugSpec::input("Scene", ValueKind::Text));
        plugs.add(PlugSpec::input("Take", ValueKind::Int));
        plugs.set("clip", Instance::Clip(clip.clone()))?;
        plugs.set("Scene", "12A")?;
        plugs.set("Take", 3i64)?;
        MetadataSet.execute(&mut plugs, &host)?;

        let mut plugs = MetadataGet.make_plugs();
        plugs.add(PlugSpec::output("Scene", ValueKind::Text));
        plugs.add(PlugSpec::output("Take", ValueKind::Text));
        plugs.set("clip", Instance::Clip(clip))?;
        MetadataGet.execute(&mut plugs, &host)?;

        assert!(
            matches!(plugs.value("Scene", Direction::Out)?, crate::graph::PlugValue::Text(v) if v == "12A")
        );
        assert!(
            matches!(plugs.value("Take", Direction::Out)?, crate::graph::PlugValue::Text(v) if v == "3")
        );
        Ok(())
    }

    #[test]
    fn non_renderable_fields_are_reported() {
        let project = testing::project();
        let host = testing::context(&project);
        let clip = MemoryClip::new("A001") as ClipRef;

        let mut plugs = MetadataSet.make_plugs();
        plugs.add(PlugSpec::input("Reference", ValueKind::Instance));
        plugs.set("clip", Instance::Clip(clip)).unwrap();
        let err = MetadataSet.execute(&mut plugs, &host).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(message) if message.contains("Reference")));
    }

    #[test]
    fn metadata_get_skips_absent_fields() -> Result<()> {
        let project = testing::project();
        let host = testing::context(&project);
        let clip = MemoryClip::new("A001") as ClipRef;

        let mut plugs = MetadataGet.make_plugs();
        plugs.add(PlugSpec::output("Scene", ValueKind::Text));
        plugs.set("clip", Instance::Clip(clip))?;
        MetadataGet.execute(&mut plugs, &host)?;
        assert!(
            matches!(plugs.value("Scene", Direction::Out)?, crate::graph::PlugValue::Text(v) if v.is_empty())
        );
        Ok(())
    }
}
