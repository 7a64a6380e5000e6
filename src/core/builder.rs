//! Build orchestration
//!
//! Serializes competing build requests, stages a component tree into a
//! scratch directory mirroring the source layout, aggregates per-leaf
//! imports, hands the aggregate to the external style compiler, and cleans
//! up. At most one build owns the scratch directory at any instant: the
//! scheduler task drains the queue one item at a time and only dequeues the
//! next request after the previous build's cleanup has finished.
//!
//! Within a build, independent work runs concurrently: dependency copies
//! fan out per component and sibling subtrees stage in parallel. Import
//! contributions are concatenated in sorted child order, so the aggregate
//! file is deterministic regardless of completion order.

use std::future::Future;
use std::path::{Path, PathBuf};

use futures::future::{try_join_all, BoxFuture, FutureExt};
use tokio::sync::{mpsc, oneshot};

use crate::config::defaults::AGGREGATE_FILE_NAME;
use crate::core::component::{Component, ComponentKind};
use crate::error::{BuildError, CompileError};
use crate::infra::filesystem;

/// The external style-sheet compiler, treated as a black box: given the
/// aggregate entry file, it returns compiled output text or a diagnostic.
pub trait StyleCompiler {
    /// Compile the aggregate file at `entry` into final output text
    fn compile(&self, entry: &Path) -> impl Future<Output = Result<String, CompileError>> + Send;
}

/// A queued build request
struct BuildQueueItem {
    component: Component,
    done: oneshot::Sender<Result<String, BuildError>>,
}

/// Serialized build queue over a scratch staging area
///
/// Constructed with an injected scratch root and compiler adapter; spawns
/// its scheduler task on the current tokio runtime. Dropping the
/// orchestrator closes the queue and ends the scheduler.
#[derive(Debug, Clone)]
pub struct BuildOrchestrator {
    queue: mpsc::UnboundedSender<BuildQueueItem>,
}

impl BuildOrchestrator {
    /// Create an orchestrator staging into `scratch_root` and compiling
    /// with `compiler`. Must be called within a tokio runtime.
    pub fn new<C>(scratch_root: PathBuf, compiler: C) -> Self
    where
        C: StyleCompiler + Send + Sync + 'static,
    {
        let (queue, rx) = mpsc::unbounded_channel();
        let worker = BuildWorker {
            scratch_root,
            compiler,
        };
        tokio::spawn(run_scheduler(rx, worker));
        Self { queue }
    }

    /// Submit an index component for building.
    ///
    /// Enqueues the request and resolves with the compiled output once its
    /// turn completes. Builds may only be initiated on the index component;
    /// anything else fails immediately with [`BuildError::InvalidRoot`]
    /// before enqueueing.
    pub async fn submit(&self, component: Component) -> Result<String, BuildError> {
        if !component.is_index || !component.is_module() {
            return Err(BuildError::InvalidRoot {
                name: component.name.clone(),
            });
        }

        let (done, result) = oneshot::channel();
        self.queue
            .send(BuildQueueItem { component, done })
            .map_err(|_| BuildError::QueueClosed)?;
        result.await.map_err(|_| BuildError::QueueClosed)?
    }
}

impl std::fmt::Debug for BuildQueueItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildQueueItem")
            .field("component", &self.component.name)
            .finish_non_exhaustive()
    }
}

/// Drain the queue strictly one build at a time (FIFO)
async fn run_scheduler<C>(mut rx: mpsc::UnboundedReceiver<BuildQueueItem>, worker: BuildWorker<C>)
where
    C: StyleCompiler + Send + Sync,
{
    while let Some(item) = rx.recv().await {
        let result = worker.run_build(&item.component).await;
        if let Err(e) = &result {
            tracing::warn!("Build of '{}' failed: {e}", item.component.name);
        }
        // the caller may have abandoned its future
        let _ = item.done.send(result);
    }
}

/// Owns the scratch directory for the in-flight build
struct BuildWorker<C> {
    scratch_root: PathBuf,
    compiler: C,
}

impl<C> BuildWorker<C>
where
    C: StyleCompiler + Send + Sync,
{
    /// Run one build to completion. Scratch cleanup is unconditional so a
    /// failed build can never corrupt the next one.
    async fn run_build(&self, index: &Component) -> Result<String, BuildError> {
        tracing::info!("Building theme '{}'", index.name);
        let result = self.build_index(index).await;
        if let Err(e) = filesystem::remove_dir_all(&self.scratch_root).await {
            tracing::warn!("Failed to clean scratch directory: {e}");
        }
        result
    }

    async fn build_index(&self, index: &Component) -> Result<String, BuildError> {
        // fresh scratch root per build
        filesystem::remove_dir_all(&self.scratch_root).await?;
        filesystem::create_dir_all(&self.scratch_root).await?;

        let imports = self.stage(&index.path, index).await?;

        let entry = self.scratch_root.join(AGGREGATE_FILE_NAME);
        filesystem::write_file(&entry, &render_aggregate(&imports)).await?;

        tracing::info!("Compiling {} imports", imports.len());
        let output = self.compiler.compile(&entry).await?;
        Ok(output)
    }

    /// Recursively stage a component subtree, returning its import
    /// contributions in traversal order.
    fn stage<'a>(
        &'a self,
        index_path: &'a Path,
        component: &'a Component,
    ) -> BoxFuture<'a, Result<Vec<String>, BuildError>> {
        async move {
            if component.optional && component.skip_build {
                tracing::debug!("Skipping optional component '{}'", component.name);
                return Ok(Vec::new());
            }

            match &component.kind {
                ComponentKind::Module {
                    children,
                    oneof,
                    selected,
                } => {
                    let mirror = self
                        .scratch_root
                        .join(relative_to(index_path, &component.path));
                    filesystem::create_dir_all(&mirror).await?;
                    self.copy_dependencies(index_path, component).await?;

                    if *oneof {
                        // selection validated at resolve time
                        match children.get(*selected) {
                            Some(child) => self.stage(index_path, child).await,
                            None => Ok(Vec::new()),
                        }
                    } else {
                        let staged = try_join_all(
                            children.iter().map(|child| self.stage(index_path, child)),
                        )
                        .await?;
                        Ok(staged.into_iter().flatten().collect())
                    }
                }
                ComponentKind::Content { .. } => {
                    self.copy_dependencies(index_path, component).await?;

                    let relative = relative_to(index_path, &component.path);
                    let target = self.scratch_root.join(&relative);
                    let text = component.staged_text().unwrap_or_default();
                    filesystem::write_file(&target, &text).await?;
                    tracing::debug!("Staged '{}'", relative.display());
                    Ok(vec![posix_path(&relative)])
                }
            }
        }
        .boxed()
    }

    /// Copy all dependency files concurrently, joining before the caller
    /// proceeds.
    async fn copy_dependencies(
        &self,
        index_path: &Path,
        component: &Component,
    ) -> Result<(), BuildError> {
        try_join_all(component.dependencies.iter().map(|dep| async move {
            let target = self.scratch_root.join(relative_to(index_path, dep));
            filesystem::copy_file(dep, &target).await
        }))
        .await?;
        Ok(())
    }
}

/// One `@import` statement per staged leaf, in traversal order
fn render_aggregate(imports: &[String]) -> String {
    imports
        .iter()
        .map(|import| format!("@import \"{}\";", import.replace('"', "\\\"")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Path of `target` relative to `base`, walking up with `..` when `target`
/// lies outside `base`.
fn relative_to(base: &Path, target: &Path) -> PathBuf {
    if let Ok(relative) = target.strip_prefix(base) {
        return relative.to_path_buf();
    }

    let base_parts: Vec<_> = base.components().collect();
    let target_parts: Vec<_> = target.components().collect();
    let common = base_parts
        .iter()
        .zip(&target_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &target_parts[common..] {
        relative.push(part);
    }
    relative
}

/// Render a relative path with forward slashes for import statements
fn posix_path(path: &Path) -> String {
    path.components()
        .map(|part| part.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
