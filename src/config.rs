use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use tracing_subscriber::{fmt, EnvFilter};

pub const APP_TITLE: &str = "Sales Dashboard";
const SESSION_DB_FILE: &str = "session.sqlite";

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "salesdashboard", "sales-dashboard")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

/// The session database is reset at startup, so nothing outlives a run.
pub fn default_db_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join(SESSION_DB_FILE))
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}

/// `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_db_path_uses_app_directory() {
        let path = default_db_path().expect("db path should resolve");
        assert!(path.ends_with(SESSION_DB_FILE));
        assert!(path.to_string_lossy().contains("sales-dashboard"));
    }
}
