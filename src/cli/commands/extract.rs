use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::debug;

use super::super::args::ExtractCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::{ExtractSummary, print_extract_summary};
use super::super::scanner::scan_files;
use crate::config::{CONFIG_FILE_NAME, Config, load_config};
use crate::core::{ExtractOptions, catalog::po, parse};

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let verbose = cmd.common.verbose;
    let base_dir = std::env::current_dir().context("Failed to read the working directory")?;

    let loaded = load_config(&base_dir)?;
    if !loaded.from_file {
        debug!("No {CONFIG_FILE_NAME} found, using defaults");
    }
    let config = loaded.config;

    let mut options = resolve_options(&cmd, &config);
    let output = cmd
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output));
    let output_path = base_dir.join(&output);

    if cmd.join_existing {
        options.existing_po = read_existing(&output_path)?;
    }

    let includes = if cmd.paths.is_empty() {
        config.includes.clone()
    } else {
        cmd.paths
            .iter()
            .map(|path| path.to_string_lossy().into_owned())
            .collect()
    };
    let scan = scan_files(
        &base_dir,
        &includes,
        &config.ignores,
        &config.extensions,
        verbose,
    );
    debug!("Scanning {} files", scan.files.len());

    let mut sources = Vec::with_capacity(scan.files.len());
    for file in &scan.files {
        let text = fs::read_to_string(base_dir.join(file))
            .with_context(|| format!("Failed to read {file}"))?;
        sources.push((file.as_str(), text));
    }

    let catalog = parse(sources, &options)?;

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&output_path, po::write(&catalog))
        .with_context(|| format!("Failed to write {}", output.display()))?;

    print_extract_summary(
        &ExtractSummary {
            message_count: catalog.len(),
            file_count: scan.files.len(),
            skipped_count: scan.skipped_count,
        },
        &output,
        verbose,
    );

    Ok(ExitStatus::Success)
}

/// Command line flags take precedence over the config file.
fn resolve_options(cmd: &ExtractCommand, config: &Config) -> ExtractOptions {
    let mut options = config.extract_options();

    if let Some(fn_names) = &cmd.fn_names {
        options.fn_names = fn_names.clone();
    }
    if let Some(prefix) = &cmd.comment_prefix {
        options.comment_prefix = prefix.clone();
    }
    if let Some(count) = cmd.plural_forms {
        options.plural_form_count = count;
    }
    if cmd.project_id_version.is_some() {
        options.project_id_version = cmd.project_id_version.clone();
    }
    if cmd.report_bugs_to.is_some() {
        options.report_bugs_to = cmd.report_bugs_to.clone();
    }
    if cmd.language.is_some() {
        options.language = cmd.language.clone();
    }

    options
}

/// The current catalog text, or `None` when there is nothing to join yet.
fn read_existing(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("{} does not exist yet, starting fresh", path.display());
            Ok(None)
        }
        Err(err) => {
            Err(err).with_context(|| format!("Failed to read existing catalog {}", path.display()))
        }
    }
}
