//! Capability layer over the editing host's scripting interface.
//!
//! Operators never import a host SDK; they receive a [`HostContext`] and go
//! through the traits in [`api`]. The context is explicitly connected or
//! detached, which makes "the host is not available" an ordinary, testable
//! error instead of process-wide state.

mod api;
mod formats;
pub mod memory;

pub use api::{
    Clip, ClipRef, Folder, FolderRef, HostError, HostResult, MediaPool, MediaPoolRef, Project,
    ProjectManager, ProjectManagerRef, ProjectRef, Take, Timeline, TimelineItem, TimelineItemRef,
    TimelineRef,
};
pub use formats::{TimelineExportFormat, TimelineImportOptions, TrackKind};

use std::sync::Arc;

use crate::error::{Error, Result};

/// Entry point into a running host: hands out the project manager.
pub trait HostSession: Send + Sync {
    fn project_manager(&self) -> HostResult<ProjectManagerRef>;
}

/// The session handle operators execute against.
///
/// Detached is a normal state (the catalog can be loaded and inspected
/// anywhere), but executing an operator against a detached context fails
/// with [`Error::HostUnavailable`].
#[derive(Clone)]
pub struct HostContext {
    session: Option<Arc<dyn HostSession>>,
}

impl HostContext {
    pub fn connected(session: Arc<dyn HostSession>) -> Self {
        Self {
            session: Some(session),
        }
    }

    pub fn detached() -> Self {
        Self { session: None }
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Result<&Arc<dyn HostSession>> {
        self.session.as_ref().ok_or(Error::HostUnavailable)
    }

    /// Project manager of the connected session.
    pub fn project_manager(&self) -> Result<ProjectManagerRef> {
        self.session()?
            .project_manager()
            .map_err(|e| Error::host("getting the project manager", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_context_reports_host_unavailable() {
        let context = HostContext::detached();
        assert!(!context.is_connected());
        assert!(matches!(context.session(), Err(Error::HostUnavailable)));
        assert!(matches!(
            context.project_manager(),
            Err(Error::HostUnavailable)
        ));
    }
}
