use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://mythdex.db?mode=rwc";
pub const DEFAULT_MEDIA_ROOT: &str = "media";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    /// Directory uploaded images are written under.
    pub media_root: PathBuf,
}

impl AppConfig {
    /// Reads `DATABASE_URL` and `MEDIA_ROOT`; `.env` must already be loaded.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            database_url: non_empty("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            media_root: non_empty("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MEDIA_ROOT)),
        }
    }

    /// Command-line flags win over the environment.
    pub fn with_overrides(
        mut self,
        database_url: Option<String>,
        media_root: Option<PathBuf>,
    ) -> Self {
        if let Some(url) = database_url {
            self.database_url = url;
        }
        if let Some(root) = media_root {
            self.media_root = root;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_unset_or_blank() {
        let env: HashMap<&str, &str> = [("DATABASE_URL", "  ")].into_iter().collect();
        let config = AppConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.media_root, PathBuf::from(DEFAULT_MEDIA_ROOT));
    }

    #[test]
    fn flags_override_environment() {
        let env: HashMap<&str, &str> = [
            ("DATABASE_URL", "sqlite://env.db?mode=rwc"),
            ("MEDIA_ROOT", "/srv/media"),
        ]
        .into_iter()
        .collect();
        let config = AppConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.media_root, PathBuf::from("/srv/media"));

        let config = config.with_overrides(Some("sqlite::memory:".to_string()), None);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.media_root, PathBuf::from("/srv/media"));
    }
}
