use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorklogConfig {
    /// Base URL of the issue tracker, e.g. "https://tracker.example.com/"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// CSRF token of the issue page, sent with every POST.
    #[serde(default)]
    pub csrf_token: String,
    /// Session cookie value (`PHPSESSID`) for the tracker, if it requires one.
    #[serde(default)]
    pub session_cookie: Option<String>,
    /// Seconds between draft auto-saves while the work log is open.
    #[serde(default = "default_interval_secs")]
    pub draft_autosave_secs: u64,
    /// Seconds between checks for new activity on the issue.
    #[serde(default = "default_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default)]
    pub endpoints: Endpoints,
}

/// Endpoint paths, relative to `api_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub submit_work_log: String,
    pub abandon_issue: String,
    pub add_comment: String,
    pub poll_updates: String,
    /// Where the page goes after an issue is abandoned.
    pub available_issues: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            submit_work_log: "process-work-log.php".to_string(),
            abandon_issue: "abandon-issue.php".to_string(),
            add_comment: "add-comment.php".to_string(),
            poll_updates: "get-issue-updates.php".to_string(),
            available_issues: "available-issues.php".to_string(),
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:8000/".to_string()
}

fn default_interval_secs() -> u64 {
    60
}

impl Default for WorklogConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            csrf_token: String::new(),
            session_cookie: None,
            draft_autosave_secs: default_interval_secs(),
            poll_interval_secs: default_interval_secs(),
            endpoints: Endpoints::default(),
        }
    }
}

impl WorklogConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("worklog-tui")
            .join("config.toml"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    fn parse(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        anyhow::ensure!(
            config.draft_autosave_secs > 0 && config.poll_interval_secs > 0,
            "intervals must be at least one second"
        );
        Ok(config)
    }

    /// Write the default config if none exists yet and return its path.
    pub fn ensure_exists() -> Result<PathBuf> {
        let path = Self::config_path()?;
        if !path.exists() {
            Self::default().save()?;
        }
        Ok(path)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(WorklogConfig::parse("").unwrap(), WorklogConfig::default());
    }

    #[test]
    fn partial_endpoints_keep_other_defaults() {
        let cfg = WorklogConfig::parse(
            r#"
            api_url = "https://tracker.example.com/issues/"
            csrf_token = "abc123"

            [endpoints]
            add_comment = "comments/add.php"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.csrf_token, "abc123");
        assert_eq!(cfg.endpoints.add_comment, "comments/add.php");
        assert_eq!(cfg.endpoints.submit_work_log, "process-work-log.php");
        assert_eq!(cfg.poll_interval_secs, 60);
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(WorklogConfig::parse("poll_interval_secs = 0").is_err());
    }

    #[test]
    fn default_round_trips_through_toml() {
        let raw = toml::to_string_pretty(&WorklogConfig::default()).unwrap();
        assert_eq!(WorklogConfig::parse(&raw).unwrap(), WorklogConfig::default());
    }
}
