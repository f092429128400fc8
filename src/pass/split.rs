use std::fs;
use std::path::Path;

use tracing::{info, warn};

use super::state::{ComponentState, Progress};
use super::summary::{CategoryReport, Operation, RunSummary};
use crate::config::Config;
use crate::error::{Result, RewriteError};
use crate::parser::{import_block, LocateError};
use crate::rewrite::{build_category_file, write_atomic, CategoryFile};

/// Build every category file of the manifest from the unmodified source.
///
/// Nothing is written here; files with no extracted component are kept in
/// the result but marked as not to be written.
pub fn run_split(src: &str, config: &Config) -> (Vec<CategoryFile>, RunSummary) {
    let imports = import_block(src);
    let mut summary = RunSummary::default();
    let mut progress = Progress::new();
    let mut files = Vec::with_capacity(config.categories.len());

    for group in &config.categories {
        let file = build_category_file(src, imports, group);

        for name in &file.found {
            progress.advance(name, ComponentState::Extracted);
            summary.succeeded(Operation::Extract);
        }
        for err in &file.missing {
            match err {
                LocateError::NotFound { name } => {
                    warn!(component = %name, file = %file.file_name, "could not extract component");
                    summary.skipped_with_warning(Operation::Extract, name, err.to_string());
                }
                LocateError::BoundaryMismatch { name, .. } => {
                    warn!(
                        component = %name,
                        file = %file.file_name,
                        error = %err,
                        "could not extract component"
                    );
                    progress.fail(name);
                    summary.failed(Operation::Extract, name, err.to_string());
                }
            }
        }

        if file.is_partial() {
            summary.warn(
                Operation::Extract,
                &file.file_name,
                format!("partial extraction: {}/{} components", file.found_count(), file.total),
            );
        }

        summary.categories.push(CategoryReport {
            file_name: file.file_name.clone(),
            found: file.found_count(),
            total: file.total,
            written: file.should_write(),
            missing: file.missing.iter().map(|e| e.name().to_string()).collect(),
        });
        files.push(file);
    }

    summary.components = progress.finish();
    (files, summary)
}

/// Write the files that have at least one component into `out_dir`,
/// creating it if needed. Returns how many files were written.
pub fn write_split(out_dir: &Path, files: &[CategoryFile]) -> Result<usize> {
    fs::create_dir_all(out_dir).map_err(|e| RewriteError::io(out_dir, e))?;

    let mut written = 0usize;
    for file in files.iter().filter(|f| f.should_write()) {
        let path = out_dir.join(&file.file_name);
        write_atomic(&path, &file.content)?;
        info!(
            file = %path.display(),
            found = file.found_count(),
            total = file.total,
            "created {}", file.file_name
        );
        written += 1;
    }

    Ok(written)
}
