//! Object-safe traits for the host object model.
//!
//! Every host object the operators touch is reached through one of these
//! traits, so a live scripting connection and the in-memory host used in
//! tests are interchangeable. Handles are reference-counted trait objects;
//! the host owns the underlying objects and the catalog never caches a
//! handle across operator executions.

use std::any::Any;
use std::path::Path;
use std::sync::Arc;

use super::formats::{TimelineExportFormat, TimelineImportOptions, TrackKind};

/// Failure reported by the host scripting interface.
///
/// Carries whatever message the host produced. Callers wrap it with the
/// operation that was in flight via [`crate::Error::host`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct HostError {
    message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type for host-side calls
pub type HostResult<T> = std::result::Result<T, HostError>;

pub type ProjectManagerRef = Arc<dyn ProjectManager>;
pub type ProjectRef = Arc<dyn Project>;
pub type MediaPoolRef = Arc<dyn MediaPool>;
pub type FolderRef = Arc<dyn Folder>;
pub type ClipRef = Arc<dyn Clip>;
pub type TimelineRef = Arc<dyn Timeline>;
pub type TimelineItemRef = Arc<dyn TimelineItem>;

/// Project-level operations of the host.
pub trait ProjectManager: Send + Sync {
    fn current_project(&self) -> HostResult<ProjectRef>;

    /// Export the named project to a project file. `false` means the host
    /// refused without giving a reason.
    fn export_project(&self, name: &str, path: &Path) -> HostResult<bool>;

    fn import_project(&self, path: &Path) -> HostResult<bool>;
}

/// An open project. Collection indices are 1-based, like everything on the
/// host side.
pub trait Project: Send + Sync {
    fn name(&self) -> HostResult<String>;

    fn media_pool(&self) -> HostResult<MediaPoolRef>;

    fn timeline_count(&self) -> HostResult<usize>;

    fn timeline_by_index(&self, index: usize) -> HostResult<TimelineRef>;

    fn current_timeline(&self) -> HostResult<TimelineRef>;

    fn set_current_timeline(&self, timeline: &TimelineRef) -> HostResult<bool>;
}

/// The project's media pool: a folder tree plus timeline file import.
pub trait MediaPool: Send + Sync {
    fn root_folder(&self) -> HostResult<FolderRef>;

    fn current_folder(&self) -> HostResult<FolderRef>;

    fn set_current_folder(&self, folder: &FolderRef) -> HostResult<bool>;

    /// Create a subfolder under `parent`. The host does not enforce name
    /// uniqueness among siblings.
    fn add_subfolder(&self, parent: &FolderRef, name: &str) -> HostResult<FolderRef>;

    fn import_timeline_from_file(
        &self,
        path: &Path,
        options: &TimelineImportOptions,
    ) -> HostResult<TimelineRef>;
}

/// A folder in the media pool tree.
pub trait Folder: Send + Sync {
    fn name(&self) -> HostResult<String>;

    fn subfolders(&self) -> HostResult<Vec<FolderRef>>;

    fn clips(&self) -> HostResult<Vec<ClipRef>>;

    /// Concrete-type access for host adapters that must recognize their own
    /// handles when a folder is passed back in (e.g. `add_subfolder`).
    fn as_any(&self) -> &dyn Any;
}

/// A media pool item.
pub trait Clip: Send + Sync {
    /// Read a named clip property ("Clip Name", "Resolution", ...). `None`
    /// when the host has no value for the key.
    fn clip_property(&self, key: &str) -> HostResult<Option<String>>;

    fn metadata(&self, field: &str) -> HostResult<Option<String>>;

    fn set_metadata(&self, field: &str, value: &str) -> HostResult<bool>;
}

/// A timeline of the project.
pub trait Timeline: Send + Sync {
    fn name(&self) -> HostResult<String>;

    fn set_name(&self, name: &str) -> HostResult<bool>;

    fn track_count(&self, kind: TrackKind) -> HostResult<usize>;

    fn track_name(&self, kind: TrackKind, index: usize) -> HostResult<String>;

    fn items_in_track(&self, kind: TrackKind, index: usize) -> HostResult<Vec<TimelineItemRef>>;

    fn export(&self, path: &Path, format: TimelineExportFormat) -> HostResult<bool>;
}

/// One take slot of a timeline item. The host can report takes whose backing
/// media pool item is gone.
#[derive(Clone)]
pub struct Take {
    pub clip: Option<ClipRef>,
}

/// A clip placed on a timeline track.
pub trait TimelineItem: Send + Sync {
    fn name(&self) -> HostResult<String>;

    fn media_pool_item(&self) -> HostResult<Option<ClipRef>>;

    fn take_count(&self) -> HostResult<usize>;

    fn take_by_index(&self, index: usize) -> HostResult<Take>;

    /// Add `clip` to the item's take selector. `range` is (start, end) in
    /// frames; `None` keeps the clip's full range.
    fn add_take(&self, clip: &ClipRef, range: Option<(i64, i64)>) -> HostResult<bool>;

    fn selected_take_index(&self) -> HostResult<usize>;

    fn select_take_by_index(&self, index: usize) -> HostResult<bool>;
}
