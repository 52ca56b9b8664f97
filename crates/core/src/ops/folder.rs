//! Folder operators over the project media pool.

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::graph::{
    Direction, Instance, Operator, OperatorInfo, PlugSet, PlugSpec, PlugValue, ValueKind,
};
use crate::host::{Folder, HostContext, MediaPool};
use crate::pool::{resolve_folder, FolderPath};

use super::{ensure_host_ok, media_pool};

/// Retrieval strategies for [`FolderGet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderSource {
    Current,
    Root,
    FullPath,
}

impl FolderSource {
    pub const OPTIONS: [&'static str; 3] = ["Current", "Root", "FullPath"];
}

impl FromStr for FolderSource {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "Current" => Ok(FolderSource::Current),
            "Root" => Ok(FolderSource::Root),
            "FullPath" => Ok(FolderSource::FullPath),
            other => Err(Error::invalid(format!(
                "Get method '{other}' is not supported. Choose between: 'Current', 'Root', 'FullPath'."
            ))),
        }
    }
}

/// Get a folder from the media pool: the current one, the root, or one
/// addressed by full path. In full-path mode missing levels can be created
/// on the way down; a path that does not resolve leaves the output Empty.
pub struct FolderGet;

impl Operator for FolderGet {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "folder.get",
            summary: "Get a media pool folder: current, root, or by full path",
            editable: false,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![
            PlugSpec::input("project", ValueKind::Instance),
            PlugSpec::input("get_method", ValueKind::Enum)
                .with_options(FolderSource::OPTIONS)
                .with_default("Current"),
            PlugSpec::input("folder_path", ValueKind::Text),
            PlugSpec::input("create_folders", ValueKind::Bool),
            PlugSpec::output("folder", ValueKind::Instance),
        ]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        host.session()?;
        let project = plugs.project("project")?;
        let method: FolderSource = plugs.text("get_method")?.parse()?;
        let pool = media_pool(&project)?;
        let folder = match method {
            FolderSource::Current => Some(
                pool.current_folder()
                    .map_err(|e| Error::host("getting the current folder", e))?,
            ),
            FolderSource::Root => Some(
                pool.root_folder()
                    .map_err(|e| Error::host("getting the root folder", e))?,
            ),
            FolderSource::FullPath => {
                let path = FolderPath::new(&plugs.text("folder_path")?)?;
                let create = plugs.flag("create_folders")?;
                let root = pool
                    .root_folder()
                    .map_err(|e| Error::host("getting the root folder", e))?;
                resolve_folder(pool.as_ref(), &root, &path, create)?
            }
        };
        match folder {
            Some(folder) => plugs.set_value("folder", Direction::Out, Instance::Folder(folder))?,
            None => plugs.set_value("folder", Direction::Out, PlugValue::Empty)?,
        }
        Ok(())
    }
}

/// Create a subfolder with the given name under a folder.
pub struct FolderAdd;

impl Operator for FolderAdd {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "folder.add",
            summary: "Create a subfolder under a media pool folder",
            editable: false,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![
            PlugSpec::input("project", ValueKind::Instance),
            PlugSpec::input("folder", ValueKind::Instance),
            PlugSpec::input("name", ValueKind::Text),
            PlugSpec::output("folder", ValueKind::Instance),
        ]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        host.session()?;
        let project = plugs.project("project")?;
        let parent = plugs.folder("folder")?;
        let name = plugs.text("name")?;
        let pool = media_pool(&project)?;
        let created = pool
            .add_subfolder(&parent, &name)
            .map_err(|e| Error::host(format!("creating the subfolder '{name}'"), e))?;
        plugs.set_value("folder", Direction::Out, Instance::Folder(created))
    }
}

/// Get the display name of a folder.
pub struct FolderNameGet;

impl Operator for FolderNameGet {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "folder.name",
            summary: "Get the name of a media pool folder",
            editable: false,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![
            PlugSpec::input("folder", ValueKind::Instance),
            PlugSpec::output("name", ValueKind::Text),
        ]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        host.session()?;
        let folder = plugs.folder("folder")?;
        let name = folder
            .name()
            .map_err(|e| Error::host("reading the folder name", e))?;
        plugs.set_value("name", Direction::Out, name)
    }
}

/// Set the media pool's current folder.
pub struct FolderSetCurrent;

impl Operator for FolderSetCurrent {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "folder.set_current",
            summary: "Set the current folder of the media pool",
            editable: false,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![
            PlugSpec::input("project", ValueKind::Instance),
            PlugSpec::input("folder", ValueKind::Instance),
        ]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        host.session()?;
        let project = plugs.project("project")?;
        let folder = plugs.folder("folder")?;
        let pool = media_pool(&project)?;
        let ok = pool
            .set_current_folder(&folder)
            .map_err(|e| Error::host("setting the current folder", e))?;
        ensure_host_ok(ok, "setting the current folder")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostContext, Project};
    use crate::ops::testing;

    fn run_folder_get(
        host: &HostContext,
        project: Instance,
        method: &str,
        path: &str,
        create: bool,
    ) -> Result<PlugValue> {
        let mut plugs = FolderGet.make_plugs();
        plugs.set("project", project)?;
        plugs.set("get_method", method)?;
        plugs.set("folder_path", path)?;
        plugs.set("create_folders", create)?;
        FolderGet.execute(&mut plugs, host)?;
        Ok(plugs.value("folder", Direction::Out)?.clone())
    }

    #[test]
    fn detached_host_fails_before_reading_plugs() {
        let mut plugs = FolderGet.make_plugs();
        let err = FolderGet
            .execute(&mut plugs, &HostContext::detached())
            .unwrap_err();
        assert!(matches!(err, Error::HostUnavailable));
    }

    #[test]
    fn current_and_root_strategies() -> Result<()> {
        let project = testing::project();
        let host = testing::context(&project);
        let instance = Instance::Project(project.clone());

        let root = run_folder_get(&host, instance.clone(), "Root", "", false)?;
        let PlugValue::Instance(Instance::Folder(root)) = root else {
            panic!("expected a folder instance");
        };
        assert_eq!(root.name().unwrap(), "Master");

        // The current folder starts out at the root.
        let current = run_folder_get(&host, instance, "Current", "", false)?;
        let PlugValue::Instance(Instance::Folder(current)) = current else {
            panic!("expected a folder instance");
        };
        assert_eq!(current.name().unwrap(), "Master");
        Ok(())
    }

    #[test]
    fn full_path_creates_then_finds() -> Result<()> {
        let project = testing::project();
        let host = testing::context(&project);
        let instance = Instance::Project(project.clone());

        let absent = run_folder_get(&host, instance.clone(), "FullPath", "Footage/Day 01", false)?;
        assert!(absent.is_empty());

        let created = run_folder_get(&host, instance.clone(), "FullPath", "Footage/Day 01", true)?;
        let PlugValue::Instance(Instance::Folder(created)) = created else {
            panic!("expected a folder instance");
        };
        assert_eq!(created.name().unwrap(), "Day 01");

        let found = run_folder_get(&host, instance, "FullPath", "Footage/Day 01", false)?;
        assert!(!found.is_empty());
        Ok(())
    }

    #[test]
    fn full_path_requires_a_path() {
        let project = testing::project();
        let host = testing::context(&project);
        let err = run_folder_get(
            &host,
            Instance::Project(project.clone()),
            "FullPath",
            "",
            false,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn unknown_get_method_is_rejected() {
        let project = testing::project();
        let host = testing::context(&project);
        let err = run_folder_get(
            &host,
            Instance::Project(project.clone()),
            "ByName",
            "",
            false,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn add_and_set_current_round_trip() -> Result<()> {
        let project = testing::project();
        let host = testing::context(&project);
        let pool = project.media_pool().unwrap();
        let root = pool.root_folder().unwrap();

        let mut plugs = FolderAdd.make_plugs();
        plugs.set("project", Instance::Project(project.clone()))?;
        plugs.set("folder", Instance::Folder(root.clone()))?;
        plugs.set("name", "Renders")?;
        FolderAdd.execute(&mut plugs, &host)?;
        let PlugValue::Instance(Instance::Folder(renders)) =
            plugs.value("folder", Direction::Out)?.clone()
        else {
            panic!("expected a folder instance");
        };
        assert_eq!(renders.name().unwrap(), "Renders");

        let mut plugs = FolderSetCurrent.make_plugs();
        plugs.set("project", Instance::Project(project.clone()))?;
        plugs.set("folder", Instance::Folder(renders))?;
        FolderSetCurrent.execute(&mut plugs, &host)?;
        assert_eq!(pool.current_folder().unwrap().name().unwrap(), "Renders");
        Ok(())
    }

    #[test]
    fn folder_name_reports_wrong_instance_kind() {
        let project = testing::project();
        let host = testing::context(&project);
        let mut plugs = FolderNameGet.make_plugs();
        plugs
            .set("folder", Instance::Project(project.clone()))
            .unwrap();
        let err = FolderNameGet.execute(&mut plugs, &host).unwrap_err();
        assert!(matches!(err, Error::WrongInstance { .. }));
    }
}
