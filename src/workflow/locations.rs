//! `adrm config`: show where the resolved config points.
use super::context::RunContext;
use crate::cli::ConfigArgs;
use crate::util::relative_display;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LocationsReport {
    pub config_path: String,
    pub working_dir: String,
    pub steps_file: PathEntry,
    pub directories: Vec<PathEntry>,
    pub files: Vec<PathEntry>,
}

#[derive(Debug, Serialize)]
pub struct PathEntry {
    pub role: String,
    pub path: String,
    pub exists: bool,
}

impl PathEntry {
    fn new(role: &str, path: &Path, working_dir: &Path) -> Self {
        Self {
            role: role.to_string(),
            path: relative_display(path, working_dir),
            exists: path.exists(),
        }
    }
}

pub fn run_config(args: &ConfigArgs) -> Result<()> {
    let ctx = RunContext::load_from_cwd(args.config.as_deref())?;
    let report = locations_report(&ctx);
    if args.json {
        let text = serde_json::to_string_pretty(&report).context("serialize config report")?;
        println!("{text}");
    } else {
        print!("{}", render_text(&report));
    }
    Ok(())
}

pub fn locations_report(ctx: &RunContext) -> LocationsReport {
    let working_dir = ctx.working_dir.as_path();
    let directories = ctx
        .config
        .directory_paths(working_dir)
        .iter()
        .map(|(role, path)| PathEntry::new(role, path, working_dir))
        .collect();
    let files = ctx
        .config
        .files
        .iter()
        .map(|(role, rel)| PathEntry::new(role, &working_dir.join(rel), working_dir))
        .collect();
    LocationsReport {
        config_path: ctx.config_path.display().to_string(),
        working_dir: working_dir.display().to_string(),
        steps_file: PathEntry::new("steps", &ctx.steps_path(), working_dir),
        directories,
        files,
    }
}

fn render_text(report: &LocationsReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("config: {}\n", report.config_path));
    out.push_str(&format!("working dir: {}\n", report.working_dir));
    out.push_str(&format!(
        "steps file: {}{}\n",
        report.steps_file.path,
        missing_marker(report.steps_file.exists)
    ));
    out.push_str("directories:\n");
    for entry in &report.directories {
        out.push_str(&format!(
            "  {}: {}{}\n",
            entry.role,
            entry.path,
            missing_marker(entry.exists)
        ));
    }
    out.push_str("files:\n");
    for entry in &report.files {
        out.push_str(&format!(
            "  {}: {}{}\n",
            entry.role,
            entry.path,
            missing_marker(entry.exists)
        ));
    }
    out
}

fn missing_marker(exists: bool) -> &'static str {
    if exists {
        ""
    } else {
        " (missing)"
    }
}
