//! Project operators: current project access, project file export/import.

use crate::error::{Error, Result};
use crate::graph::{Direction, Instance, Operator, OperatorInfo, PlugSet, PlugSpec, ValueKind};
use crate::host::{HostContext, Project, ProjectManager};
use crate::util::ensure_suffix;

use super::ensure_host_ok;

/// Suffix of the host's project file format.
const PROJECT_SUFFIX: &str = ".drp";

/// Get the currently open project.
pub struct ProjectGet;

impl Operator for ProjectGet {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "project.get",
            summary: "Get the currently open project",
            editable: false,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![PlugSpec::output("project", ValueKind::Instance)]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        let manager = host.project_manager()?;
        let project = manager
            .current_project()
            .map_err(|e| Error::host("getting the current project", e))?;
        plugs.set_value("project", Direction::Out, Instance::Project(project))
    }
}

/// Export a project to a project file.
pub struct ProjectExport;

impl Operator for ProjectExport {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "project.export",
            summary: "Export a project to a project file",
            editable: false,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![
            PlugSpec::input("project", ValueKind::Instance),
            PlugSpec::input("filepath", ValueKind::Path),
            PlugSpec::output("filepath", ValueKind::Path),
        ]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        let manager = host.project_manager()?;
        let project = plugs.project("project")?;
        let path = plugs.path("filepath")?;
        ensure_suffix(&path, PROJECT_SUFFIX)?;
        let name = project
            .name()
            .map_err(|e| Error::host("reading the project name", e))?;
        let ok = manager
            .export_project(&name, &path)
            .map_err(|e| Error::host(format!("exporting project '{name}'"), e))?;
        ensure_host_ok(ok, "exporting the project")?;
        plugs.set_value("filepath", Direction::Out, path)
    }
}

/// Import a project from a project file.
pub struct ProjectImport;

impl Operator for ProjectImport {
    fn info(&self) -> OperatorInfo {
        OperatorInfo {
            name: "project.import",
            summary: "Import a project from a project file",
            editable: false,
        }
    }

    fn plugs(&self) -> Vec<PlugSpec> {
        vec![PlugSpec::input("filepath", ValueKind::Path)]
    }

    fn execute(&self, plugs: &mut PlugSet, host: &HostContext) -> Result<()> {
        let manager = host.project_manager()?;
        let path = plugs.path("filepath")?;
        ensure_suffix(&path, PROJECT_SUFFIX)?;
        let ok = manager
            .import_project(&path)
            .map_err(|e| Error::host("importing the project", e))?;
        ensure_host_ok(ok, "importing the project")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PlugValue;
    use crate::host::memory::MemoryHost;
    use crate::ops::testing;
    use std::path::PathBuf;

    #[test]
    fn project_get_returns_the_open_project() -> Result<()> {
        let project = testing::project();
        let host = testing::context(&project);

        let mut plugs = ProjectGet.make_plugs();
        ProjectGet.execute(&mut plugs, &host)?;
        let PlugValue::Instance(Instance::Project(found)) = plugs.value("project", Direction::Out)?
        else {
            panic!("expected a project instance");
        };
        assert_eq!(found.name().unwrap(), "Demo Project");
        Ok(())
    }

    #[test]
    fn export_records_name_and_path() -> Result<()> {
        let project = testing::project();
        let session = MemoryHost::new(project.clone());
        let host = session.clone().context();

        let mut plugs = ProjectExport.make_plugs();
        plugs.set("project", Instance::Project(project.clone()))?;
        plugs.set("filepath", PathBuf::from("/tmp/demo.drp"))?;
        ProjectExport.execute(&mut plugs, &host)?;

        let exported = session.manager().exported_projects();
        assert_eq!(exported.len(), 1);
        assert_eq!(exported[0].0, "Demo Project");
        assert_eq!(exported[0].1, PathBuf::from("/tmp/demo.drp"));
        assert!(
            matches!(plugs.value("filepath", Direction::Out)?, PlugValue::Path(p) if p.ends_with("demo.drp"))
        );
        Ok(())
    }

    #[test]
    fn export_rejects_a_wrong_suffix() {
        let project = testing::project();
        let host = testing::context(&project);

        let mut plugs = ProjectExport.make_plugs();
        plugs
            .set("project", Instance::Project(project.clone()))
            .unwrap();
        plugs.set("filepath", PathBuf::from("/tmp/demo.xml")).unwrap();
        let err = ProjectExport.execute(&mut plugs, &host).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn import_records_the_path() -> Result<()> {
        let project = testing::project();
        let session = MemoryHost::new(project.clone());
        let host = session.clone().context();

        let mut plugs = ProjectImport.make_plugs();
        plugs.set("filepath", PathBuf::from("/tmp/other.drp"))?;
        ProjectImport.execute(&mut plugs, &host)?;
        assert_eq!(
            session.manager().imported_projects(),
            [PathBuf::from("/tmp/other.drp")]
        );
        Ok(())
    }
}
