//! End-to-end scaffolding: resolve, prepare, fetch, patch.

use crate::cancel::CancellationToken;
use crate::catalog::{TemplateCatalog, TemplateNode};
use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::fetch::{CloneCommand, FetchOutcome, FetchProgress, Fetcher};
use crate::fsutil;
use crate::patch::{detect_package_manager, next_steps, patch_manifest, PackageManager};
use crate::resolver::{CancelReason, InitialFlags, Prompter, Resolution, ResolvedSession, Resolver};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

/// Final state of a scaffolding run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Project cloned and patched
    Created {
        session: ResolvedSession,
        package_manager: PackageManager,
        next_steps: Vec<String>,
    },
    /// The session ended before anything was fetched
    Cancelled(CancelReason),
    /// The clone failed
    FetchFailed { reason: String },
    /// The clone was interrupted
    Aborted,
}

impl Outcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Created { .. } | Outcome::Cancelled(_) => 0,
            Outcome::FetchFailed { .. } | Outcome::Aborted => 1,
        }
    }
}

/// Owns everything a run needs besides user interaction
pub struct Scaffolder {
    config: RuntimeConfig,
    cwd: Utf8PathBuf,
    owners: Vec<TemplateNode>,
    catalog: TemplateCatalog,
}

impl Scaffolder {
    pub fn new(config: RuntimeConfig, cwd: Utf8PathBuf) -> Self {
        let owners = config.owner_tree();
        let catalog = TemplateCatalog::from_tree(&owners);
        debug!("Catalog holds {} templates", catalog.len());
        Self {
            config,
            cwd,
            owners,
            catalog,
        }
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn owners(&self) -> &[TemplateNode] {
        &self.owners
    }

    pub fn cwd(&self) -> &Utf8Path {
        &self.cwd
    }

    /// Resolve the session interactively without touching the filesystem
    pub fn resolve(&self, flags: InitialFlags, prompter: &mut dyn Prompter) -> Result<Resolution> {
        Resolver::new(
            &self.owners,
            &self.catalog,
            &self.cwd,
            &self.config.default_target_dir,
        )
        .resolve(flags, prompter)
    }

    /// Run the whole pipeline
    pub async fn run(
        &self,
        flags: InitialFlags,
        prompter: &mut dyn Prompter,
        progress: &dyn FetchProgress,
        token: &CancellationToken,
        user_agent: Option<&str>,
    ) -> Result<Outcome> {
        match self.resolve(flags, prompter)? {
            Resolution::Resolved(session) => {
                self.create(session, progress, token, user_agent).await
            }
            Resolution::Cancelled(reason) => {
                info!("Session cancelled: {:?}", reason);
                Ok(Outcome::Cancelled(reason))
            }
        }
    }

    /// Prepare the target, clone into it, and patch the manifest.
    ///
    /// `token` only needs to exist from this point on. Interrupts during
    /// resolution are handled by the prompter.
    pub async fn create(
        &self,
        session: ResolvedSession,
        progress: &dyn FetchProgress,
        token: &CancellationToken,
        user_agent: Option<&str>,
    ) -> Result<Outcome> {
        if session.overwrite {
            info!("Clearing {}", session.root);
            fsutil::empty_dir(&session.root)?;
        }

        let command = CloneCommand::new(
            &self.config.vcs_command,
            &session.template_locator,
            &session.target_dir,
        )
        .with_depth(self.config.clone_depth);

        match Fetcher::new(self.cwd.clone())
            .fetch(&command, progress, token)
            .await
        {
            FetchOutcome::Completed => {}
            FetchOutcome::Failed { reason } => return Ok(Outcome::FetchFailed { reason }),
            FetchOutcome::Aborted => return Ok(Outcome::Aborted),
        }

        patch_manifest(&session.root, &session.package_name)?;

        let package_manager = detect_package_manager(&session.root, user_agent);
        let next_steps = next_steps(&self.cwd, &session.root, &package_manager);

        Ok(Outcome::Created {
            session,
            package_manager,
            next_steps,
        })
    }

    /// User agent read from the configured environment variable
    pub fn user_agent(&self) -> Option<String> {
        std::env::var(&self.config.user_agent_var).ok()
    }
}
