/*
[INPUT]:  Loaded catalog, parser client, and inspection flags
[OUTPUT]: Project listings, leaf paths, and health reports on stdout
[POS]:    CLI read-only commands (projects, paths, check)
[UPDATE]: When inspection output changes
*/

use anyhow::{Result, anyhow};
use console::style;
use timelog_adapter::ParserClient;
use timelog_workflow::{Catalog, ProjectId, enumerate_leaf_paths, filter_tasks};

pub fn list_projects(catalog: &Catalog) {
    println!("{}", style("Projects").bold().cyan());
    for project in catalog.projects() {
        println!(
            "{:>4}  {}  {}",
            style(project.id).dim(),
            style(&project.name).bold(),
            style(&project.description).dim()
        );
    }
}

pub fn print_paths(catalog: &Catalog, project: ProjectId, filter: Option<&str>) -> Result<()> {
    let project = catalog
        .project(project)
        .ok_or_else(|| anyhow!("unknown project id {project}"))?;
    let paths = enumerate_leaf_paths(&filter_tasks(&project.tasks, filter.unwrap_or_default()));
    if paths.is_empty() {
        eprintln!("{}", style("No tasks match the filter.").yellow());
        return Ok(());
    }
    for path in paths {
        println!("{path}");
    }
    Ok(())
}

/// Validate the catalog and, unless `offline`, probe the parser
pub async fn check(catalog: &Catalog, client: &ParserClient, offline: bool) -> Result<()> {
    let leaves: usize = catalog
        .projects()
        .iter()
        .map(|project| enumerate_leaf_paths(&project.tasks).len())
        .sum();
    println!(
        "{} catalog ok: {} projects, {} selectable tasks",
        style("✔").green(),
        catalog.projects().len(),
        leaves
    );

    if offline {
        return Ok(());
    }

    match client.health().await {
        Ok(health) => {
            println!(
                "{} parser reachable at {}: {}",
                style("✔").green(),
                client.base_url(),
                health.message
            );
            Ok(())
        }
        Err(err) => {
            println!(
                "{} parser unreachable at {}",
                style("✘").red(),
                client.base_url()
            );
            Err(anyhow!(err).context("parser health check"))
        }
    }
}
