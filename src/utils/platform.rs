//! Platform helpers: path expansion and the Go package path of a directory.

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Returns the user's home directory.
///
/// # Errors
///
/// Fails when neither `HOME` (Unix) nor the Windows profile directory can be
/// determined.
pub fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        let platform_help = if cfg!(windows) {
            "On Windows: Check that the USERPROFILE environment variable is set"
        } else {
            "On Unix/Linux: Check that the HOME environment variable is set"
        };
        anyhow::anyhow!("Could not determine home directory.\n\n{platform_help}")
    })
}

/// Expand a leading `~` and `$VAR` / `${VAR}` references in a configured path.
///
/// ```rust,no_run
/// use depsync_cli::utils::platform::resolve_path;
///
/// # fn example() -> anyhow::Result<()> {
/// let vendor = resolve_path("$GOPATH/src/example.com/app/vendor")?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Fails on references to undefined environment variables.
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path)
        .with_context(|| format!("Failed to expand environment variables in path: {path}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Go package path of `dir`, used to label the current project in reports.
///
/// `dir` is made relative to `<first GOPATH entry>/src` the way Go's
/// `filepath.Rel` does it: `.` for the `src` directory itself and a `../`
/// path for directories outside it. When `GOPATH` is unset, or no relative
/// path exists (one side absolute and the other not), `dir` is returned
/// unchanged.
pub fn package_path(dir: &Path, gopath: Option<&OsStr>) -> String {
    let Some(first) = gopath.and_then(|g| std::env::split_paths(g).next()) else {
        return dir.display().to_string();
    };
    if first.as_os_str().is_empty() {
        return dir.display().to_string();
    }

    match relative_path(&first.join("src"), dir) {
        Some(relative) => relative.to_string_lossy().replace('\\', "/"),
        None => dir.display().to_string(),
    }
}

/// Lexically normalized components: `.` dropped, `..` folded into its parent
/// where there is one.
fn clean_components(path: &Path) -> Vec<Component<'_>> {
    let mut cleaned: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.last() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => cleaned.push(component),
            },
            _ => cleaned.push(component),
        }
    }
    cleaned
}

/// Path of `target` relative to `base`, computed lexically.
fn relative_path(base: &Path, target: &Path) -> Option<PathBuf> {
    if base.is_absolute() != target.is_absolute() {
        return None;
    }
    let base = clean_components(base);
    let target = clean_components(target);

    let common = base.iter().zip(&target).take_while(|(a, b)| a == b).count();
    let rest = &base[common..];
    if rest.iter().any(|c| !matches!(c, Component::Normal(_))) {
        return None;
    }
    if target[common..].iter().any(|c| matches!(c, Component::Prefix(_) | Component::RootDir)) {
        return None;
    }

    let mut relative = PathBuf::new();
    for _ in rest {
        relative.push("..");
    }
    for component in &target[common..] {
        relative.push(component);
    }
    if relative.as_os_str().is_empty() {
        relative.push(".");
    }
    Some(relative)
}
