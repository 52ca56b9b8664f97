use anyhow::{Context, Result};
use serde_json::json;
use tracing::debug;

use reelgraph_core::host::memory::{MemoryHost, MemoryProject};
use reelgraph_core::host::Folder;
use reelgraph_core::{Catalog, Direction, Instance, Operator, PlugValue};

pub fn list_command(json: bool) -> Result<()> {
    let catalog = Catalog::builtin();
    if json {
        println!("{}", serde_json::to_string_pretty(&catalog.infos())?);
        return Ok(());
    }
    for info in catalog.infos() {
        let editable = if info.editable { " (editable)" } else { "" };
        println!("{:<24} {}{editable}", info.name, info.summary);
    }
    Ok(())
}

pub fn describe_command(name: &str, json: bool) -> Result<()> {
    let catalog = Catalog::builtin();
    let operator = catalog
        .get(name)
        .with_context(|| format!("no operator named '{name}' in the catalog"))?;
    let info = operator.info();
    let plugs = operator.plugs();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "operator": info,
                "plugs": plugs,
            }))?
        );
        return Ok(());
    }
    println!("{} - {}", info.name, info.summary);
    if info.editable {
        println!("editable: user plug codes are read as host field names");
    }
    for plug in plugs {
        let direction = match plug.direction {
            Direction::In => "in ",
            Direction::Out => "out",
        };
        if plug.options.is_empty() {
            println!("  {direction} {:<22} {:?}", plug.code, plug.kind);
        } else {
            println!(
                "  {direction} {:<22} {:?} [{}]",
                plug.code,
                plug.kind,
                plug.options.join(", ")
            );
        }
    }
    Ok(())
}

/// Drive a small folder workflow through the catalog, the way a wired graph
/// would: resolve (and create) a folder path, then confirm a second lookup
/// finds it.
pub fn demo_command(path: &str) -> Result<()> {
    let catalog = Catalog::builtin();
    let project = MemoryProject::new("Demo Project");
    let host = MemoryHost::new(project).context();

    let project_get = catalog
        .get("project.get")
        .context("catalog is missing project.get")?;
    let mut plugs = project_get.make_plugs();
    project_get.execute(&mut plugs, &host)?;
    let project_instance = match plugs.value("project", Direction::Out)? {
        PlugValue::Instance(instance) => instance.clone(),
        other => anyhow::bail!("project.get produced {other:?}"),
    };
    debug!("got the open project");

    let folder_get = catalog
        .get("folder.get")
        .context("catalog is missing folder.get")?;
    let mut plugs = folder_get.make_plugs();
    plugs.set("project", project_instance.clone())?;
    plugs.set("get_method", "FullPath")?;
    plugs.set("folder_path", path)?;
    plugs.set("create_folders", true)?;
    folder_get.execute(&mut plugs, &host)?;
    let folder = match plugs.value("folder", Direction::Out)? {
        PlugValue::Instance(Instance::Folder(folder)) => folder.clone(),
        other => anyhow::bail!("folder.get produced {other:?}"),
    };
    println!("created '{}' at '{path}'", folder.name()?);

    let mut plugs = folder_get.make_plugs();
    plugs.set("project", project_instance)?;
    plugs.set("get_method", "FullPath")?;
    plugs.set("folder_path", path)?;
    folder_get.execute(&mut plugs, &host)?;
    match plugs.value("folder", Direction::Out)? {
        PlugValue::Instance(Instance::Folder(_)) => println!("lookup without creation: found"),
        _ => println!("lookup without creation: absent"),
    }
    Ok(())
}
