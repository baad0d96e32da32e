use anyhow::{anyhow, bail, Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::time::Instant;

use crate::pipeline::{sort_operations, Pipeline};

/// Everything an executor needs to run one operation file: the file, the
/// directory to run it in, and the ledger paths its output goes to.
pub struct ExecutionContext<'a> {
    pub filename: &'a Path,
    pub working_dir: &'a Path,
    pub stdout_path: &'a Path,
    pub stderr_path: &'a Path,
}

pub trait OperationExecutor: Send + Sync {
    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<()>;
}

/// Default executor: hands the operation file to a configured interpreter
/// and redirects its output into the ledger files.
pub struct ProcessExecutor {
    program: String,
}

impl ProcessExecutor {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new("python3")
    }
}

impl OperationExecutor for ProcessExecutor {
    fn execute(&self, ctx: &ExecutionContext<'_>) -> Result<()> {
        let stdout = File::create(ctx.stdout_path)?;
        let stderr = File::create(ctx.stderr_path)?;
        let status = Command::new(&self.program)
            .arg(ctx.filename)
            .current_dir(ctx.working_dir)
            .stdout(stdout)
            .stderr(stderr)
            .status()
            .with_context(|| format!("failed to run {}", self.program))?;
        if !status.success() {
            bail!("{} exited with {status}", ctx.filename.display());
        }
        Ok(())
    }
}

/// Runs a pipeline locally: operations are ordered by their dependency
/// graph and executed one after another, as if each file were run by hand.
/// Each run gets a timestamped work directory holding a per-file
/// stdout/stderr ledger. Runtime-specific capabilities beyond the file to
/// execute are ignored.
pub struct LocalPipelineProcessor {
    root_dir: PathBuf,
    work_root: PathBuf,
    executor: Arc<dyn OperationExecutor>,
}

impl LocalPipelineProcessor {
    pub fn new(root_dir: impl Into<PathBuf>, executor: Arc<dyn OperationExecutor>) -> Self {
        Self {
            root_dir: root_dir.into(),
            work_root: std::env::temp_dir().join("experiment_panel"),
            executor,
        }
    }

    /// Override where run ledgers are written. Defaults to an
    /// `experiment_panel` directory under the system temp dir.
    pub fn with_work_root(mut self, work_root: impl Into<PathBuf>) -> Self {
        self.work_root = work_root.into();
        self
    }

    /// Execute every operation in dependency order. Returns the work
    /// directory holding the run's ledger.
    pub fn process(&self, pipeline: &Pipeline) -> Result<PathBuf> {
        let timestamp = chrono::Local::now().format("%m%d%H%M%S");
        let work_dir = self.work_root.join(format!("{}-{timestamp}", pipeline.name));
        std::fs::create_dir_all(&work_dir)
            .with_context(|| format!("failed to create work dir {}", work_dir.display()))?;
        tracing::info!(
            pipeline = %pipeline.name,
            work_dir = %work_dir.display(),
            "processing pipeline"
        );

        for operation in sort_operations(pipeline)? {
            let filename = self.absolute_path(&operation.filename);
            self.execute_file(&work_dir, &filename)?;
        }
        Ok(work_dir)
    }

    fn absolute_path(&self, filename: &str) -> PathBuf {
        let path = Path::new(filename);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_dir.join(path)
        }
    }

    fn execute_file(&self, work_dir: &Path, filepath: &Path) -> Result<()> {
        if !filepath.is_file() {
            bail!("could not find {}", filepath.display());
        }
        let file_name = filepath
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| anyhow!("invalid operation filename {}", filepath.display()))?;
        let working_dir = filepath.parent().unwrap_or_else(|| Path::new("."));
        let stdout_path = work_dir.join(format!("{file_name}.out"));
        let stderr_path = work_dir.join(format!("{file_name}.err"));
        // The ledger entry exists even when the executor produces no output.
        File::create(&stdout_path)?;
        File::create(&stderr_path)?;

        tracing::debug!(file = %filepath.display(), "executing operation file");
        let started = Instant::now();
        self.executor
            .execute(&ExecutionContext {
                filename: filepath,
                working_dir,
                stdout_path: &stdout_path,
                stderr_path: &stderr_path,
            })
            .with_context(|| {
                format!(
                    "error executing {}, details available at {}",
                    filepath.display(),
                    work_dir.display()
                )
            })?;
        let duration = started.elapsed();
        tracing::debug!(file = file_name, ?duration, "operation finished");
        Ok(())
    }
}
