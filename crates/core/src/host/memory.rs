//! In-memory host implementation.
//!
//! Backs the tests and the CLI demo with a small editing project: one
//! project, a media pool folder tree, clips with properties and metadata,
//! timelines with tracks and items. Like the real host it does not enforce
//! name uniqueness among sibling folders, and its collections are 1-based.
//!
//! Interior mutability is only there to satisfy the `&self` capability
//! signatures; nothing here is shared across threads in practice.

use std::any::Any;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::api::{
    Clip, ClipRef, Folder, FolderRef, HostError, HostResult, MediaPool, MediaPoolRef, Project,
    ProjectManager, ProjectManagerRef, ProjectRef, Take, Timeline, TimelineItem, TimelineItemRef,
    TimelineRef,
};
use super::formats::{TimelineExportFormat, TimelineImportOptions, TrackKind};
use super::{HostContext, HostSession};

/// In-memory host session.
pub struct MemoryHost {
    manager: Arc<MemoryProjectManager>,
}

impl MemoryHost {
    pub fn new(project: Arc<MemoryProject>) -> Arc<Self> {
        Arc::new(Self {
            manager: MemoryProjectManager::new(project),
        })
    }

    pub fn manager(&self) -> &Arc<MemoryProjectManager> {
        &self.manager
    }

    /// A connected [`HostContext`] over this session.
    pub fn context(self: Arc<Self>) -> HostContext {
        HostContext::connected(self)
    }
}

impl HostSession for MemoryHost {
    fn project_manager(&self) -> HostResult<ProjectManagerRef> {
        Ok(self.manager.clone())
    }
}

/// Project manager over a single in-memory project.
pub struct MemoryProjectManager {
    project: Arc<MemoryProject>,
    exported: Mutex<Vec<(String, PathBuf)>>,
    imported: Mutex<Vec<PathBuf>>,
}

impl MemoryProjectManager {
    pub fn new(project: Arc<MemoryProject>) -> Arc<Self> {
        Arc::new(Self {
            project,
            exported: Mutex::new(Vec::new()),
            imported: Mutex::new(Vec::new()),
        })
    }

    /// Project exports recorded so far, as (project name, path) pairs.
    pub fn exported_projects(&self) -> Vec<(String, PathBuf)> {
        self.exported.lock().unwrap().clone()
    }

    pub fn imported_projects(&self) -> Vec<PathBuf> {
        self.imported.lock().unwrap().clone()
    }
}

impl ProjectManager for MemoryProjectManager {
    fn current_project(&self) -> HostResult<ProjectRef> {
        Ok(self.project.clone())
    }

    fn export_project(&self, name: &str, path: &Path) -> HostResult<bool> {
        self.exported
            .lock()
            .unwrap()
            .push((name.to_string(), path.to_path_buf()));
        Ok(true)
    }

    fn import_project(&self, path: &Path) -> HostResult<bool> {
        self.imported.lock().unwrap().push(path.to_path_buf());
        Ok(true)
    }
}

/// In-memory project with a media pool and timelines.
pub struct MemoryProject {
    name: String,
    pool: Arc<MemoryMediaPool>,
    timelines: Arc<Mutex<Vec<Arc<MemoryTimeline>>>>,
    current_timeline: Mutex<Option<TimelineRef>>,
}

impl MemoryProject {
    /// New project with an empty media pool rooted at "Master".
    pub fn new(name: &str) -> Arc<Self> {
        let timelines = Arc::new(Mutex::new(Vec::new()));
        Arc::new(Self {
            name: name.to_string(),
            pool: MemoryMediaPool::new(timelines.clone()),
            timelines,
            current_timeline: Mutex::new(None),
        })
    }

    pub fn add_timeline(&self, timeline: Arc<MemoryTimeline>) {
        self.timelines.lock().unwrap().push(timeline);
    }
}

impl Project for MemoryProject {
    fn name(&self) -> HostResult<String> {
        Ok(self.name.clone())
    }

    fn media_pool(&self) -> HostResult<MediaPoolRef> {
        Ok(self.pool.clone())
    }

    fn timeline_count(&self) -> HostResult<usize> {
        Ok(self.timelines.lock().unwrap().len())
    }

    fn timeline_by_index(&self, index: usize) -> HostResult<TimelineRef> {
        let timelines = self.timelines.lock().unwrap();
        index
            .checked_sub(1)
            .and_then(|i| timelines.get(i))
            .map(|t| t.clone() as TimelineRef)
            .ok_or_else(|| HostError::new(format!("no timeline at index {index}")))
    }

    fn current_timeline(&self) -> HostResult<TimelineRef> {
        self.current_timeline
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| HostError::new("no current timeline"))
    }

    fn set_current_timeline(&self, timeline: &TimelineRef) -> HostResult<bool> {
        *self.current_timeline.lock().unwrap() = Some(timeline.clone());
        Ok(true)
    }
}

/// In-memory media pool.
pub struct MemoryMediaPool {
    root: Arc<MemoryFolder>,
    current: Mutex<FolderRef>,
    timelines: Arc<Mutex<Vec<Arc<MemoryTimeline>>>>,
}

impl MemoryMediaPool {
    fn new(timelines: Arc<Mutex<Vec<Arc<MemoryTimeline>>>>) -> Arc<Self> {
        let root = MemoryFolder::new("Master");
        Arc::new(Self {
            current: Mutex::new(root.clone() as FolderRef),
            root,
            timelines,
        })
    }
}

impl MediaPool for MemoryMediaPool {
    fn root_folder(&self) -> HostResult<FolderRef> {
        Ok(self.root.clone())
    }

    fn current_folder(&self) -> HostResult<FolderRef> {
        Ok(self.current.lock().unwrap().clone())
    }

    fn set_current_folder(&self, folder: &FolderRef) -> HostResult<bool> {
        *self.current.lock().unwrap() = folder.clone();
        Ok(true)
    }

    fn add_subfolder(&self, parent: &FolderRef, name: &str) -> HostResult<FolderRef> {
        let parent = parent
            .as_any()
            .downcast_ref::<MemoryFolder>()
            .ok_or_else(|| HostError::new("foreign folder handle"))?;
        let child = MemoryFolder::new(name);
        parent.children.lock().unwrap().push(child.clone());
        Ok(child)
    }

    fn import_timeline_from_file(
        &self,
        path: &Path,
        options: &TimelineImportOptions,
    ) -> HostResult<TimelineRef> {
        let name = options
            .timeline_name
            .clone()
            .or_else(|| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(|stem| stem.to_string())
            })
            .ok_or_else(|| HostError::new("timeline file has no usable name"))?;
        let timeline = MemoryTimeline::new(&name);
        self.timelines.lock().unwrap().push(timeline.clone());
        Ok(timeline)
    }
}

/// In-memory media pool folder. Sibling names may repeat.
pub struct MemoryFolder {
    name: String,
    children: Mutex<Vec<Arc<MemoryFolder>>>,
    clips: Mutex<Vec<Arc<MemoryClip>>>,
}

impl MemoryFolder {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            children: Mutex::new(Vec::new()),
            clips: Mutex::new(Vec::new()),
        })
    }

    pub fn add_child(&self, child: Arc<MemoryFolder>) {
        self.children.lock().unwrap().push(child);
    }

    pub fn add_clip(&self, clip: Arc<MemoryClip>) {
        self.clips.lock().unwrap().push(clip);
    }
}

impl Folder for MemoryFolder {
    fn name(&self) -> HostResult<String> {
        Ok(self.name.clone())
    }

    fn subfolders(&self) -> HostResult<Vec<FolderRef>> {
        Ok(self
            .children
            .lock()
            .unwrap()
            .iter()
            .map(|child| child.clone() as FolderRef)
            .collect())
    }

    fn clips(&self) -> HostResult<Vec<ClipRef>> {
        Ok(self
            .clips
            .lock()
            .unwrap()
            .iter()
            .map(|clip| clip.clone() as ClipRef)
            .collect())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// In-memory media pool item.
pub struct MemoryClip {
    properties: Mutex<HashMap<String, String>>,
    metadata: Mutex<HashMap<String, String>>,
}

impl MemoryClip {
    /// New clip; `name` is stored as the "Clip Name" property.
    pub fn new(name: &str) -> Arc<Self> {
        let clip = Arc::new(Self {
            properties: Mutex::new(HashMap::new()),
            metadata: Mutex::new(HashMap::new()),
        });
        clip.set_property("Clip Name", name);
        clip
    }

    pub fn set_property(&self, key: &str, value: &str) {
        self.properties
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

impl Clip for MemoryClip {
    fn clip_property(&self, key: &str) -> HostResult<Option<String>> {
        Ok(self.properties.lock().unwrap().get(key).cloned())
    }

    fn metadata(&self, field: &str) -> HostResult<Option<String>> {
        Ok(self.metadata.lock().unwrap().get(field).cloned())
    }

    fn set_metadata(&self, field: &str, value: &str) -> HostResult<bool> {
        self.metadata
            .lock()
            .unwrap()
            .insert(field.to_string(), value.to_string());
        Ok(true)
    }
}

/// One track of an in-memory timeline.
pub struct MemoryTrack {
    pub name: String,
    pub items: Vec<Arc<MemoryTimelineItem>>,
}

impl MemoryTrack {
    pub fn new(name: &str, items: Vec<Arc<MemoryTimelineItem>>) -> Self {
        Self {
            name: name.to_string(),
            items,
        }
    }
}

/// In-memory timeline. Exports are recorded instead of written to disk.
pub struct MemoryTimeline {
    name: Mutex<String>,
    video: Mutex<Vec<MemoryTrack>>,
    audio: Mutex<Vec<MemoryTrack>>,
    subtitle: Mutex<Vec<MemoryTrack>>,
    exports: Mutex<Vec<(PathBuf, TimelineExportFormat)>>,
}

impl MemoryTimeline {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: Mutex::new(name.to_string()),
            video: Mutex::new(Vec::new()),
            audio: Mutex::new(Vec::new()),
            subtitle: Mutex::new(Vec::new()),
            exports: Mutex::new(Vec::new()),
        })
    }

    pub fn add_track(&self, kind: TrackKind, track: MemoryTrack) {
        self.tracks(kind).lock().unwrap().push(track);
    }

    /// Exports recorded so far, as (path, format) pairs.
    pub fn exports(&self) -> Vec<(PathBuf, TimelineExportFormat)> {
        self.exports.lock().unwrap().clone()
    }

    fn tracks(&self, kind: TrackKind) -> &Mutex<Vec<MemoryTrack>> {
        match kind {
            TrackKind::Video => &self.video,
            TrackKind::Audio => &self.audio,
            TrackKind::Subtitle => &self.subtitle,
        }
    }
}

impl Timeline for MemoryTimeline {
    fn name(&self) -> HostResult<String> {
        Ok(self.name.lock().unwrap().clone())
    }

    fn set_name(&self, name: &str) -> HostResult<bool> {
        *self.name.lock().unwrap() = name.to_string();
        Ok(true)
    }

    fn track_count(&self, kind: TrackKind) -> HostResult<usize> {
        Ok(self.tracks(kind).lock().unwrap().len())
    }

    fn track_name(&self, kind: TrackKind, index: usize) -> HostResult<String> {
        let tracks = self.tracks(kind).lock().unwrap();
        index
            .checked_sub(1)
            .and_then(|i| tracks.get(i))
            .map(|track| track.name.clone())
            .ok_or_else(|| HostError::new(format!("no {kind} track at index {index}")))
    }

    fn items_in_track(&self, kind: TrackKind, index: usize) -> HostResult<Vec<TimelineItemRef>> {
        let tracks = self.tracks(kind).lock().unwrap();
        let track = index
            .checked_sub(1)
            .and_then(|i| tracks.get(i))
            .ok_or_else(|| HostError::new(format!("no {kind} track at index {index}")))?;
        Ok(track
            .items
            .iter()
            .map(|item| item.clone() as TimelineItemRef)
            .collect())
    }

    fn export(&self, path: &Path, format: TimelineExportFormat) -> HostResult<bool> {
        self.exports
            .lock()
            .unwrap()
            .push((path.to_path_buf(), format));
        Ok(true)
    }
}

/// In-memory timeline item with a take selector.
pub struct MemoryTimelineItem {
    name: String,
    clip: Option<ClipRef>,
    takes: Mutex<Vec<Option<ClipRef>>>,
    selected_take: Mutex<usize>,
}

impl MemoryTimelineItem {
    pub fn new(name: &str, clip: Option<ClipRef>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            clip,
            takes: Mutex::new(Vec::new()),
            selected_take: Mutex::new(0),
        })
    }

    /// Seed a take slot directly; `None` models a take whose media pool item
    /// is gone.
    pub fn push_take(&self, clip: Option<ClipRef>) {
        self.takes.lock().unwrap().push(clip);
    }
}

impl TimelineItem for MemoryTimelineItem {
    fn name(&self) -> HostResult<String> {
        Ok(self.name.clone())
    }

    fn media_pool_item(&self) -> HostResult<Option<ClipRef>> {
        Ok(self.clip.clone())
    }

    fn take_count(&self) -> HostResult<usize> {
        Ok(self.takes.lock().unwrap().len())
    }

    fn take_by_index(&self, index: usize) -> HostResult<Take> {
        let takes = self.takes.lock().unwrap();
        index
            .checked_sub(1)
            .and_then(|i| takes.get(i))
            .map(|clip| Take { clip: clip.clone() })
            .ok_or_else(|| HostError::new(format!("no take at index {index}")))
    }

    fn add_take(&self, clip: &ClipRef, _range: Option<(i64, i64)>) -> HostResult<bool> {
        self.takes.lock().unwrap().push(Some(clip.clone()));
        Ok(true)
    }

    fn selected_take_index(&self) -> HostResult<usize> {
        Ok(*self.selected_take.lock().unwrap())
    }

    fn select_take_by_index(&self, index: usize) -> HostResult<bool> {
        if index == 0 || index > self.takes.lock().unwrap().len() {
            return Ok(false);
        }
        *self.selected_take.lock().unwrap() = index;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_subfolder_allows_duplicate_names() {
        let project = MemoryProject::new("Test");
        let pool = project.media_pool().unwrap();
        let root = pool.root_folder().unwrap();
        pool.add_subfolder(&root, "Dailies").unwrap();
        pool.add_subfolder(&root, "Dailies").unwrap();
        assert_eq!(root.subfolders().unwrap().len(), 2);
    }

    #[test]
    fn timeline_indices_are_one_based() {
        let project = MemoryProject::new("Test");
        project.add_timeline(MemoryTimeline::new("Cut 01"));
        assert!(project.timeline_by_index(0).is_err());
        assert_eq!(
            project.timeline_by_index(1).unwrap().name().unwrap(),
            "Cut 01"
        );
        assert!(project.timeline_by_index(2).is_err());
    }

    #[test]
    fn select_take_rejects_out_of_range_indices() {
        let item = MemoryTimelineItem::new("item", None);
        item.push_take(Some(MemoryClip::new("a") as ClipRef));
        assert!(!item.select_take_by_index(0).unwrap());
        assert!(!item.select_take_by_index(2).unwrap());
        assert!(item.select_take_by_index(1).unwrap());
        assert_eq!(item.selected_take_index().unwrap(), 1);
    }
}
