use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use remap_cli::handlers::{
    DownloadArtifact, GenerateRequest, GenerateResponse, PreviewRequest, PreviewResponse,
    generate, new_mapping, preview, show_mapping,
};
use remap_config::{RemapConfig, config_path, load_config};
use remap_ingest::UploadedFile;
use remap_model::ColumnMapping;

use crate::cli::{GenerateArgs, PreviewArgs};
use crate::summary::{columns_table, mapping_table, print_preview};

pub fn load(explicit: Option<&Path>) -> Result<RemapConfig> {
    let path = config_path(explicit);
    let config =
        load_config(&path).with_context(|| format!("load config {}", path.display()))?;
    info!(
        path = %path.display(),
        columns = config.expected_columns().len(),
        "loaded configuration"
    );
    Ok(config)
}

pub fn run_columns(config: &RemapConfig) -> Result<()> {
    println!("{}", columns_table(config.expected_columns()));
    Ok(())
}

/// Returns `false` when the upload could not be read.
pub fn run_preview(config: &RemapConfig, args: &PreviewArgs) -> Result<bool> {
    let upload = UploadedFile::from_path(&args.file)?;
    let request = PreviewRequest::new(Some(upload), args.separator.as_str()).with_rows(args.rows);
    match preview(config, &request) {
        PreviewResponse::Ready(preview) => {
            print_preview(&preview);
            Ok(true)
        }
        PreviewResponse::Failed { message } => {
            eprintln!("error: {message}");
            Ok(false)
        }
        PreviewResponse::Empty => Ok(false),
    }
}

/// Returns `false` when nothing was generated.
pub fn run_generate(config: &RemapConfig, args: &GenerateArgs) -> Result<bool> {
    let mapping = collect_mapping(config, args)?;
    eprintln!("{}", mapping_table(&show_mapping(config, &mapping)));

    let upload = UploadedFile::from_path(&args.file)?;
    let request = GenerateRequest {
        upload: Some(upload),
        separator: args.separator.clone(),
        mapping,
    };
    match generate(config, &request) {
        GenerateResponse::Ready(artifact) => {
            deliver(&artifact, args)?;
            Ok(true)
        }
        GenerateResponse::Incomplete { message, unmapped } => {
            eprintln!("error: {message}");
            for column in unmapped {
                eprintln!("- {column}");
            }
            Ok(false)
        }
        GenerateResponse::Failed { message } => {
            eprintln!("error: {message}");
            Ok(false)
        }
        GenerateResponse::Empty => Ok(false),
    }
}

fn deliver(artifact: &DownloadArtifact, args: &GenerateArgs) -> Result<()> {
    if let Some(path) = &args.output {
        fs::write(path, artifact.document.as_bytes())
            .with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), "wrote {}", artifact.filename());
    } else if args.data_uri {
        println!("{}", artifact.data_uri);
    } else {
        let mut stdout = io::stdout().lock();
        stdout.write_all(artifact.document.as_bytes())?;
        stdout.flush()?;
    }
    Ok(())
}

/// Selections from `--mapping`, then `--map` overrides.
///
/// The mapping file must name every expected column once, with `null` for
/// columns left unmapped. Without a file every column starts unmapped.
fn collect_mapping(config: &RemapConfig, args: &GenerateArgs) -> Result<ColumnMapping> {
    let mut mapping = match &args.mapping_file {
        Some(path) => read_mapping_file(config, path)?,
        None => new_mapping(config),
    };
    for (canonical, source) in &args.assignments {
        mapping
            .assign(canonical, source.as_str())
            .with_context(|| format!("--map {canonical}={source}"))?;
    }
    debug!(
        mapped = mapping.len() - mapping.unmapped_columns().len(),
        "collected selections"
    );
    Ok(mapping)
}

fn read_mapping_file(config: &RemapConfig, path: &Path) -> Result<ColumnMapping> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let selections: BTreeMap<String, Option<String>> = serde_json::from_str(&text)
        .with_context(|| format!("parse mapping file {}", path.display()))?;
    ColumnMapping::from_selections(config.expected_columns(), selections)
        .with_context(|| format!("mapping file {}", path.display()))
}
