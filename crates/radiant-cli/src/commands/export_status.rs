use crate::cli::ExportStatusArgs;
use crate::errors::from_radiant;
use crate::output::OutputWriter;
use anyhow::Result;
use radiant_client::{Client, Project};
use serde::Serialize;

#[derive(Serialize)]
struct ExportStatusOutput {
    project_id: String,
    export_id: String,
    status: String,
    finished: bool,
}

pub fn execute(client: &Client, args: ExportStatusArgs, output: &OutputWriter) -> Result<()> {
    let project = Project::fetch(client, &args.project).map_err(from_radiant)?;
    let status = project.export_status(&args.export).map_err(from_radiant)?;

    if output.is_json() {
        output.result(ExportStatusOutput {
            project_id: args.project,
            export_id: args.export,
            status: status.to_string(),
            finished: status.is_terminal(),
        })?;
    } else {
        output.kv("Project", project.name());
        output.kv("Export", &args.export);
        output.kv("Status", status);
        if !status.is_terminal() {
            output.info("Export still in progress; check again later");
        }
    }

    Ok(())
}
