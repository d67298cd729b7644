use crate::output_utils;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use anyhow::Context;
use lazyfetch::LazyAssociations;
use lazyfetch::LazyAssociationsConfig;
use lazyfetch::PersistenceNamespace;
use lazyfetch::SourceRewrite;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

#[derive(Debug, clap::Args)]
pub(crate) struct RewriteCmd {
    #[arg(
        help="Report the files that would change without writing them. Exits \
             with a failure code if any file would change.",
        long,
    )]
    check: bool,

    #[arg(
        default_values_t=["java".to_string()],
        help="Set of file extensions to filter to when searching for files \
             within a directory.",
        long,
        value_delimiter = ',',
    )]
    java_file_exts: Vec<String>,

    #[arg(
        default_value_t=PersistenceNamespace::Jakarta,
        help="Package family of the persistence annotations: `jakarta` or \
             `javax`.",
        long,
    )]
    namespace: PersistenceNamespace,

    #[arg(
        help="Fold a package's single-type imports into one on-demand import \
             once it has this many and one of them was added.",
        long,
        value_name="N",
    )]
    fold_imports: Option<usize>,

    #[arg(
        help="Paths to one or more Java files or directories containing Java \
             files which need to be rewritten.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    file_or_dir_paths: Vec<PathBuf>,
}

/// What happened to one file.
#[derive(Debug)]
struct FileReport {
    path: PathBuf,
    result: anyhow::Result<SourceRewrite>,
}

#[inherent::inherent]
impl RunnableCommand for RewriteCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let (file_paths, walk_errors) = self.find_java_files();
        log::debug!("Found {} Java files to be rewritten.", file_paths.len());

        let recipe = LazyAssociations::new(LazyAssociationsConfig {
            namespace: self.namespace,
            fold_threshold: self.fold_imports,
        });
        let check = self.check;
        let reports = tokio::task::spawn_blocking(move || {
            file_paths
                .par_iter()
                .map(|path| FileReport {
                    path: path.clone(),
                    result: rewrite_file(&recipe, path, check),
                })
                .collect::<Vec<_>>()
        })
        .await;
        let reports = match reports {
            Ok(reports) => reports,
            Err(e) => {
                return CommandResult::stderr(format_args!(
                    "{} Rewrite workers failed: {e}",
                    output_utils::RED_X,
                ));
            },
        };

        summarize(&reports, walk_errors, check)
    }
}

impl RewriteCmd {
    /// Finds every file at or under the input paths with one of the
    /// `--java-file-exts`. A single file argument is taken as-is.
    fn find_java_files(&self) -> (Vec<PathBuf>, Vec<anyhow::Error>) {
        let mut errors: Vec<anyhow::Error> = vec![];
        let java_file_exts: HashSet<&str> = self
            .java_file_exts
            .iter()
            .map(|ext| ext.trim_start_matches('.'))
            .collect();

        log::debug!("Scanning {} input paths...", self.file_or_dir_paths.len());
        let mut file_paths = vec![];
        for path in &self.file_or_dir_paths {
            if path.is_file() {
                file_paths.push(path.clone());
                continue;
            }
            for entry in WalkDir::new(path.as_path()).follow_links(true).sort_by_file_name() {
                match entry {
                    Ok(entry) => {
                        let path = entry.path();
                        if !entry.file_type().is_file() {
                            log::trace!("Skipping non-file: {path:#?}.");
                            continue;
                        }
                        let matches_ext = path
                            .extension()
                            .and_then(|ext| ext.to_str())
                            .is_some_and(|ext| java_file_exts.contains(ext));
                        if matches_ext {
                            log::trace!("Found file at {path:#?}.");
                            file_paths.push(path.to_path_buf());
                        }
                    },

                    Err(e) => {
                        log::trace!(
                            "Encountered an error while iterating recursive \
                            filesystem entities at/under {path:#?}."
                        );
                        errors.push(anyhow::Error::new(e).context(format!(
                            "Failed to scan {}",
                            path.display(),
                        )));
                    },
                }
            }
        }
        (file_paths, errors)
    }
}

fn rewrite_file(
    recipe: &LazyAssociations,
    path: &Path,
    check: bool,
) -> anyhow::Result<SourceRewrite> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let rewrite = recipe.rewrite_source(&source, Some(path))?;
    if rewrite.is_changed() && !check {
        std::fs::write(path, &rewrite.output)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::debug!("Wrote {}.", path.display());
    }
    Ok(rewrite)
}

fn summarize(
    reports: &[FileReport],
    walk_errors: Vec<anyhow::Error>,
    check: bool,
) -> CommandResult {
    let mut changed_files = vec![];
    let mut num_sites = 0;
    let mut num_failures = 0;

    for report in reports {
        let rewrite = match &report.result {
            Ok(rewrite) => rewrite,
            Err(e) => {
                log::error!("{e:#}");
                continue;
            },
        };
        for site in &rewrite.changed_sites {
            log::info!("{}: `{}` -> `{}`", site.location(), site.before, site.after);
        }
        for failure in &rewrite.failures {
            log::error!("{failure}");
        }
        num_sites += rewrite.changed_sites.len();
        num_failures += rewrite.failures.len();
        if rewrite.is_changed() {
            changed_files.push(report.path.as_path());
        }
    }
    for e in &walk_errors {
        log::error!("{e:#}");
    }
    let num_errors = walk_errors.len()
        + reports.iter().filter(|report| report.result.is_err()).count();

    let verb = if check { "Would rewrite" } else { "Rewrote" };
    let mut summary = format!(
        concat!(
            "{} {} annotation(s) in {} file(s):\n",
            "  * Analyzed {} files.\n",
            "  * {} path(s) could not be processed.\n",
            "  * {} annotation(s) could not be rewritten.",
        ),
        verb,
        num_sites,
        changed_files.len(),
        reports.len(),
        num_errors,
        num_failures,
    );
    for path in &changed_files {
        summary.push_str(&format!("\n    {}", path.display()));
    }

    if num_errors > 0 || num_failures > 0 {
        CommandResult::stderr(format_args!("{} {summary}", output_utils::RED_X))
    } else if check && !changed_files.is_empty() {
        CommandResult::stdout(format_args!("{} {summary}", output_utils::PENCIL))
    } else {
        CommandResult::success(format_args!("{} {summary}", output_utils::GREEN_CHECK))
    }
}
