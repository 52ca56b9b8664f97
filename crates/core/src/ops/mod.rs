//! The built-in operator catalog.
//!
//! Every operator follows the same shape: check the host session, read the
//! input plugs, make one or two host calls, write the output plugs. Failures
//! from the host are wrapped with the operation that was in flight; "not
//! found" is an Empty output plug, never an error.

mod clip;
mod folder;
mod metadata;
mod project;
mod take;
mod timeline;

pub use clip::{ClipGet, ClipListGet, ClipPropertiesGet, ClipSelect};
pub use folder::{FolderAdd, FolderGet, FolderNameGet, FolderSetCurrent, FolderSource};
pub use metadata::{MetadataGet, MetadataSet};
pub use project::{ProjectExport, ProjectGet, ProjectImport};
pub use take::{TakeAdd, TakeGet, TakeSelect, TakeSet};
pub use timeline::{
    ItemNameSource, ItemsSelect, TimelineExport, TimelineGet, TimelineImport, TimelineItemGet,
    TimelineItemsGet, TimelineNameGet, TimelineNameSet, TimelineSelect, TimelineSetCurrent,
};

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::graph::Catalog;
use crate::host::{HostError, MediaPoolRef, Project, ProjectRef};

/// Assemble the built-in catalog.
pub fn builtin() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.register(Arc::new(ClipGet));
    catalog.register(Arc::new(ClipListGet));
    catalog.register(Arc::new(ClipPropertiesGet));
    catalog.register(Arc::new(FolderAdd));
    catalog.register(Arc::new(FolderGet));
    catalog.register(Arc::new(FolderNameGet));
    catalog.register(Arc::new(FolderSetCurrent));
    catalog.register(Arc::new(MetadataGet));
    catalog.register(Arc::new(MetadataSet));
    catalog.register(Arc::new(ProjectExport));
    catalog.register(Arc::new(ProjectGet));
    catalog.register(Arc::new(ProjectImport));
    catalog.register(Arc::new(TakeAdd));
    catalog.register(Arc::new(TakeGet));
    catalog.register(Arc::new(TakeSet));
    catalog.register(Arc::new(TimelineExport));
    catalog.register(Arc::new(TimelineGet));
    catalog.register(Arc::new(TimelineImport));
    catalog.register(Arc::new(TimelineItemGet));
    catalog.register(Arc::new(TimelineItemsGet));
    catalog.register(Arc::new(TimelineNameGet));
    catalog.register(Arc::new(TimelineNameSet));
    catalog.register(Arc::new(TimelineSetCurrent));
    catalog
}

/// Map a host `false` result into a failure carrying `context`.
pub(crate) fn ensure_host_ok(result: bool, context: &str) -> Result<()> {
    if result {
        Ok(())
    } else {
        Err(Error::host(
            context,
            HostError::new("the host rejected the operation"),
        ))
    }
}

pub(crate) fn media_pool(project: &ProjectRef) -> Result<MediaPoolRef> {
    project
        .media_pool()
        .map_err(|e| Error::host("getting the media pool", e))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use crate::host::memory::{MemoryHost, MemoryProject};
    use crate::host::HostContext;

    pub fn project() -> Arc<MemoryProject> {
        MemoryProject::new("Demo Project")
    }

    pub fn context(project: &Arc<MemoryProject>) -> HostContext {
        MemoryHost::new(project.clone()).context()
    }
}
