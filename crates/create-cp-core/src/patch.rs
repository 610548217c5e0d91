//! Post-fetch manifest patching and package manager detection

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use std::fmt;
use std::fs;
use tracing::debug;

/// Manifest rewritten after cloning
pub const MANIFEST_FILE: &str = "package.json";

/// Lockfiles in detection priority order
pub const LOCK_FILES: [(&str, PackageManager); 3] = [
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("package-lock.json", PackageManager::Npm),
];

/// Package manager used for next-step instructions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageManager {
    Pnpm,
    Yarn,
    Npm,
    Other(String),
}

impl PackageManager {
    fn from_name(name: &str) -> Self {
        match name {
            "pnpm" => Self::Pnpm,
            "yarn" => Self::Yarn,
            "npm" => Self::Npm,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Npm => "npm",
            Self::Other(name) => name,
        }
    }

    /// Commands to install dependencies and start the dev server
    pub fn commands(&self) -> Vec<String> {
        match self {
            Self::Yarn => vec!["yarn".to_string(), "yarn dev".to_string()],
            other => vec![
                format!("{} install", other.as_str()),
                format!("{} run dev", other.as_str()),
            ],
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Package manager identity parsed from a user agent string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgentInfo {
    pub name: String,
    pub version: Option<String>,
}

/// Parse `name/version ...` into its first token's parts
pub fn pkg_from_user_agent(user_agent: Option<&str>) -> Option<UserAgentInfo> {
    let spec = user_agent?.split(' ').next()?;
    if spec.is_empty() {
        return None;
    }
    let mut parts = spec.split('/');
    let name = parts.next()?.to_string();
    let version = parts.next().map(str::to_string);
    Some(UserAgentInfo { name, version })
}

/// Set the manifest's `name` field, preserving key order
pub fn patch_manifest(root: &Utf8Path, package_name: &str) -> Result<Utf8PathBuf> {
    let path = root.join(MANIFEST_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::manifest_not_found(path.as_str()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut manifest: Value = serde_json::from_str(&content)?;
    let Some(object) = manifest.as_object_mut() else {
        return Err(Error::invalid_manifest(format!(
            "{} is not a JSON object",
            path
        )));
    };
    object.insert("name".to_string(), Value::String(package_name.to_string()));

    fs::write(&path, serde_json::to_string_pretty(&manifest)?)?;
    debug!("Set {} name to {}", path, package_name);
    Ok(path)
}

/// First lockfile present in `root`, by priority
pub fn detect_lockfile(root: &Utf8Path) -> Option<PackageManager> {
    LOCK_FILES
        .iter()
        .find(|(file, _)| root.join(file).is_file())
        .map(|(_, manager)| manager.clone())
}

/// Infer the package manager from lockfiles, then the user agent, then npm
pub fn detect_package_manager(root: &Utf8Path, user_agent: Option<&str>) -> PackageManager {
    if let Some(manager) = detect_lockfile(root) {
        debug!("Package manager from lockfile: {}", manager);
        return manager;
    }
    match pkg_from_user_agent(user_agent) {
        Some(info) => PackageManager::from_name(&info.name),
        None => PackageManager::Npm,
    }
}

/// Instructions printed once the project is ready
pub fn next_steps(cwd: &Utf8Path, root: &Utf8Path, manager: &PackageManager) -> Vec<String> {
    let mut steps = Vec::new();
    if root != cwd {
        steps.push(format!("cd {}", relative_display(cwd, root)));
    }
    steps.extend(manager.commands());
    steps
}

fn relative_display(cwd: &Utf8Path, root: &Utf8Path) -> String {
    let relative = root.strip_prefix(cwd).unwrap_or(root);
    let rendered = relative.as_str();
    if rendered.contains(' ') {
        format!("\"{}\"", rendered)
    } else {
        rendered.to_string()
    }
}
