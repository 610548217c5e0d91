//! Interactive session resolution.
//!
//! The resolver walks a fixed list of [`Step`]s. Before each step a skip
//! predicate is evaluated against the accumulated [`ResolverState`]; steps
//! that apply either ask the [`Prompter`] or, for the zero-UI
//! [`Step::OverwriteCheck`], gate the session. The result is a
//! [`Resolution`]: a fully resolved session or an explicit cancellation.
//!
//! Locator precedence, highest first:
//! 1. the variant answer
//! 2. the chosen owner's own locator
//! 3. the flat catalog entry for the `--template` flag

use crate::catalog::{ColorTag, TemplateCatalog, TemplateNode};
use crate::error::Result;
use crate::fsutil;
use crate::naming::{format_target_dir, is_valid_package_name, to_valid_package_name};
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use tracing::debug;

/// Message shown when a submitted package name fails validation
pub const INVALID_PACKAGE_NAME: &str = "Invalid package.json name";

/// Validation hook run by a prompter before accepting text input
pub type Validator = fn(&str) -> std::result::Result<(), String>;

/// A free-text prompt
#[derive(Debug, Clone)]
pub struct TextPrompt {
    pub message: String,
    pub initial: Option<String>,
    pub validate: Option<Validator>,
}

/// One entry of a selection list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub color: ColorTag,
}

impl From<&TemplateNode> for Choice {
    fn from(node: &TemplateNode) -> Self {
        Self {
            label: node.name.clone(),
            color: node.color,
        }
    }
}

/// Source of user answers.
///
/// Every method returns `Ok(None)` when the user aborts the prompt.
pub trait Prompter {
    /// Ask for free text
    fn text(&mut self, prompt: &TextPrompt) -> Result<Option<String>>;

    /// Ask a yes/no question
    fn confirm(&mut self, message: &str, default: bool) -> Result<Option<bool>>;

    /// Ask the user to pick one entry, returning its index
    fn select(&mut self, message: &str, choices: &[Choice]) -> Result<Option<usize>>;
}

/// Flags taken from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitialFlags {
    /// Normalized positional target directory
    pub target_dir: Option<String>,
    /// Raw `--template` value
    pub template: Option<String>,
}

impl InitialFlags {
    /// Build flags from raw CLI input, normalizing the directory
    pub fn new(target_dir: Option<&str>, template: Option<String>) -> Self {
        Self {
            target_dir: format_target_dir(target_dir),
            template,
        }
    }
}

/// Prompt steps, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ProjectName,
    Overwrite,
    OverwriteCheck,
    PackageName,
    Owner,
    Variant,
}

impl Step {
    pub const ORDER: [Step; 6] = [
        Step::ProjectName,
        Step::Overwrite,
        Step::OverwriteCheck,
        Step::PackageName,
        Step::Owner,
        Step::Variant,
    ];
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::ProjectName => "project name",
            Step::Overwrite => "overwrite confirmation",
            Step::OverwriteCheck => "overwrite check",
            Step::PackageName => "package name",
            Step::Owner => "owner selection",
            Step::Variant => "variant selection",
        };
        f.write_str(name)
    }
}

/// Answers collected so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    pub project_name: Option<String>,
    pub overwrite: Option<bool>,
    pub package_name: Option<String>,
    /// Index into the owner list
    pub owner: Option<usize>,
    /// Locator of the chosen variant
    pub variant: Option<String>,
}

/// Working state threaded through the steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverState {
    pub flags: InitialFlags,
    pub target_dir: String,
    pub answers: Answers,
}

impl ResolverState {
    pub fn new(flags: InitialFlags, default_target_dir: &str) -> Self {
        let target_dir = flags
            .target_dir
            .clone()
            .unwrap_or_else(|| default_target_dir.to_string());
        Self {
            flags,
            target_dir,
            answers: Answers::default(),
        }
    }

    /// Project name implied by the target directory.
    ///
    /// `.` stands for the current directory and yields its basename.
    pub fn project_name(&self, cwd: &Utf8Path) -> String {
        if self.target_dir == "." {
            cwd.file_name().unwrap_or_default().to_string()
        } else {
            self.target_dir.clone()
        }
    }

    /// Record the project-name prompt value.
    ///
    /// Called for every value the prompt reports, so the target directory
    /// always tracks the latest input.
    pub fn bind_project_name(&mut self, value: &str, default_target_dir: &str) {
        self.target_dir =
            format_target_dir(Some(value)).unwrap_or_else(|| default_target_dir.to_string());
        self.answers.project_name = Some(value.to_string());
    }
}

/// Why a session was cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The user aborted a prompt
    Aborted(Step),
    /// The user declined to clear a non-empty target directory
    OverwriteDeclined,
    /// No locator could be derived from the answers
    NoTemplate,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Aborted(_) | CancelReason::OverwriteDeclined => {
                f.write_str("Operation cancelled")
            }
            CancelReason::NoTemplate => f.write_str("Operation cancelled: no template selected"),
        }
    }
}

/// Fully determined scaffolding choices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSession {
    /// Target directory as typed, relative to cwd
    pub target_dir: String,
    /// Absolute target root
    pub root: Utf8PathBuf,
    pub package_name: String,
    pub template_locator: String,
    /// Whether the target must be cleared before fetching
    pub overwrite: bool,
}

/// Outcome of the interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedSession),
    Cancelled(CancelReason),
}

/// Drives the prompt steps against a catalog
pub struct Resolver<'a> {
    owners: &'a [TemplateNode],
    catalog: &'a TemplateCatalog,
    cwd: &'a Utf8Path,
    default_target_dir: &'a str,
}

impl<'a> Resolver<'a> {
    pub fn new(
        owners: &'a [TemplateNode],
        catalog: &'a TemplateCatalog,
        cwd: &'a Utf8Path,
        default_target_dir: &'a str,
    ) -> Self {
        Self {
            owners,
            catalog,
            cwd,
            default_target_dir,
        }
    }

    /// Run every applicable step and produce a resolution
    pub fn resolve(
        &self,
        flags: InitialFlags,
        prompter: &mut dyn Prompter,
    ) -> Result<Resolution> {
        let mut state = ResolverState::new(flags, self.default_target_dir);

        for step in Step::ORDER {
            if !self.applies(step, &state)? {
                debug!("Skipping step: {}", step);
                continue;
            }
            debug!("Running step: {}", step);
            if let Some(reason) = self.run_step(step, &mut state, prompter)? {
                return Ok(Resolution::Cancelled(reason));
            }
        }

        Ok(self.finish(state))
    }

    /// Skip predicate: whether `step` has work to do in `state`
    pub fn applies(&self, step: Step, state: &ResolverState) -> Result<bool> {
        Ok(match step {
            Step::ProjectName => state.flags.target_dir.is_none(),
            Step::Overwrite => fsutil::needs_overwrite(&self.root(state))?,
            Step::OverwriteCheck => state.answers.overwrite == Some(false),
            Step::PackageName => !is_valid_package_name(&state.project_name(self.cwd)),
            Step::Owner => !self.template_flag_is_known(state),
            Step::Variant => state
                .answers
                .owner
                .and_then(|i| self.owners.get(i))
                .is_some_and(TemplateNode::has_children),
        })
    }

    /// Prompt message for owner selection
    pub fn owner_message(&self, state: &ResolverState) -> String {
        match &state.flags.template {
            Some(template) if !self.catalog.contains(template) => format!(
                "\"{}\" isn't a valid template. Please choose from below: ",
                template
            ),
            _ => "Select an owner:".to_string(),
        }
    }

    fn template_flag_is_known(&self, state: &ResolverState) -> bool {
        state
            .flags
            .template
            .as_deref()
            .is_some_and(|t| self.catalog.contains(t))
    }

    fn root(&self, state: &ResolverState) -> Utf8PathBuf {
        self.cwd.join(&state.target_dir)
    }

    fn run_step(
        &self,
        step: Step,
        state: &mut ResolverState,
        prompter: &mut dyn Prompter,
    ) -> Result<Option<CancelReason>> {
        let aborted = Some(CancelReason::Aborted(step));

        match step {
            Step::ProjectName => {
                let prompt = TextPrompt {
                    message: "Project name:".to_string(),
                    initial: Some(self.default_target_dir.to_string()),
                    validate: None,
                };
                let Some(value) = prompter.text(&prompt)? else {
                    return Ok(aborted);
                };
                state.bind_project_name(&value, self.default_target_dir);
            }
            Step::Overwrite => {
                let subject = if state.target_dir == "." {
                    "Current directory".to_string()
                } else {
                    format!("Target directory \"{}\"", state.target_dir)
                };
                let message = format!("{} is not empty. Remove existing files and continue?", subject);
                let Some(answer) = prompter.confirm(&message, false)? else {
                    return Ok(aborted);
                };
                state.answers.overwrite = Some(answer);
            }
            Step::OverwriteCheck => return Ok(Some(CancelReason::OverwriteDeclined)),
            Step::PackageName => {
                let prompt = TextPrompt {
                    message: "Package name:".to_string(),
                    initial: Some(to_valid_package_name(&state.project_name(self.cwd))),
                    validate: Some(validate_package_name),
                };
                loop {
                    let Some(value) = prompter.text(&prompt)? else {
                        return Ok(aborted);
                    };
                    if is_valid_package_name(&value) {
                        state.answers.package_name = Some(value);
                        break;
                    }
                    debug!("Rejected package name: {}", value);
                }
            }
            Step::Owner => {
                let choices: Vec<Choice> = self.owners.iter().map(Choice::from).collect();
                let message = self.owner_message(state);
                let Some(index) = prompter.select(&message, &choices)? else {
                    return Ok(aborted);
                };
                state.answers.owner = Some(index);
            }
            Step::Variant => {
                let Some(owner) = state.answers.owner.and_then(|i| self.owners.get(i)) else {
                    return Ok(None);
                };
                let choices: Vec<Choice> = owner.children.iter().map(Choice::from).collect();
                let Some(index) = prompter.select("Select a framework:", &choices)? else {
                    return Ok(aborted);
                };
                state.answers.variant = owner
                    .children
                    .get(index)
                    .and_then(|variant| variant.locator.clone());
            }
        }

        Ok(None)
    }

    fn finish(&self, state: ResolverState) -> Resolution {
        let owner_locator = state
            .answers
            .owner
            .and_then(|i| self.owners.get(i))
            .and_then(|owner| owner.locator.clone());
        let flag_locator = state
            .flags
            .template
            .as_deref()
            .and_then(|t| self.catalog.get(t))
            .map(str::to_string);

        let Some(template_locator) = state
            .answers
            .variant
            .clone()
            .or(owner_locator)
            .or(flag_locator)
        else {
            return Resolution::Cancelled(CancelReason::NoTemplate);
        };

        let package_name = state
            .answers
            .package_name
            .clone()
            .unwrap_or_else(|| state.project_name(self.cwd));

        Resolution::Resolved(ResolvedSession {
            root: self.root(&state),
            target_dir: state.target_dir,
            package_name,
            template_locator,
            overwrite: state.answers.overwrite == Some(true),
        })
    }
}

fn validate_package_name(value: &str) -> std::result::Result<(), String> {
    if is_valid_package_name(value) {
        Ok(())
    } else {
        Err(INVALID_PACKAGE_NAME.to_string())
    }
}
