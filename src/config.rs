use anyhow::Result;
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5001";
pub const DEFAULT_CONTEXT: &str = "shakespeare";

#[derive(Debug, Deserialize, Clone)]
pub struct Theme {
    pub bg: String,      // background
    pub main: String,    // brand color, highlighted candidate
    pub caret: String,   // cursor block color
    pub text: String,    // typed text and candidate words
    pub sub: String,     // shortcut labels, hints
    #[serde(alias = "subAlt")]
    pub sub_alt: String, // borders, footer
    pub error: String,   // "no suggestions" indicator
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: "#2c2e34".to_string(),
            main: "#e2b714".to_string(),
            caret: "#e2b714".to_string(),
            text: "#d1d0c5".to_string(),
            sub: "#646669".to_string(),
            sub_alt: "#45474d".to_string(),
            error: "#ca4754".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub url: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ServerConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL.to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub theme: Theme,
    pub server: ServerConfig,
    /// Author/style keys offered by the context selector, in order.
    pub contexts: Vec<String>,
    pub default_context: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            server: ServerConfig::default(),
            contexts: vec![DEFAULT_CONTEXT.to_string()],
            default_context: DEFAULT_CONTEXT.to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let defaults = AppConfig::default();
        let theme = defaults.theme;

        let mut builder = Config::builder()
            .set_default("theme.bg", theme.bg)?
            .set_default("theme.main", theme.main)?
            .set_default("theme.caret", theme.caret)?
            .set_default("theme.text", theme.text)?
            .set_default("theme.sub", theme.sub)?
            .set_default("theme.subAlt", theme.sub_alt)?
            .set_default("theme.error", theme.error)?
            .set_default("server.url", defaults.server.url)?
            .set_default("contexts", defaults.contexts)?
            .set_default("default_context", defaults.default_context)?;

        if let Some(proj_dirs) = ProjectDirs::from("", "", "nextword") {
            let config_path = proj_dirs.config_dir().join("config.toml");

            if config_path.exists() {
                builder = builder.add_source(File::from(config_path));
            }
        }

        // e.g. NEXTWORD__SERVER__URL=http://example.com
        builder = builder.add_source(
            Environment::with_prefix("NEXTWORD")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("contexts"),
        );

        let cfg = builder.build()?;
        let mut app_config: AppConfig = cfg.try_deserialize()?;
        app_config.normalize();
        Ok(app_config)
    }

    /// Lower-cases context keys, drops duplicates and makes sure the default
    /// context is selectable.
    pub fn normalize(&mut self) {
        let mut seen = Vec::with_capacity(self.contexts.len());
        for key in self.contexts.drain(..) {
            let key = key.trim().to_lowercase();
            if !key.is_empty() && !seen.contains(&key) {
                seen.push(key);
            }
        }
        self.contexts = seen;

        self.default_context = self.default_context.trim().to_lowercase();
        if self.default_context.is_empty() {
            self.default_context = self
                .contexts
                .first()
                .cloned()
                .unwrap_or_else(|| DEFAULT_CONTEXT.to_string());
        }
        if !self.contexts.contains(&self.default_context) {
            self.contexts.insert(0, self.default_context.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_dedupes_and_keeps_default_selectable() {
        let mut cfg = AppConfig {
            contexts: vec!["Austen".into(), "austen".into(), " ".into(), "Twain".into()],
            default_context: "Poe".into(),
            ..AppConfig::default()
        };
        cfg.normalize();
        assert_eq!(cfg.contexts, vec!["poe", "austen", "twain"]);
        assert_eq!(cfg.default_context, "poe");
    }

    #[test]
    fn empty_default_falls_back_to_first_context() {
        let mut cfg = AppConfig {
            contexts: vec!["austen".into()],
            default_context: String::new(),
            ..AppConfig::default()
        };
        cfg.normalize();
        assert_eq!(cfg.default_context, "austen");
        assert_eq!(cfg.contexts, vec!["austen"]);
    }

    #[test]
    fn environment_overrides_contexts_and_server() {
        std::env::set_var("NEXTWORD__CONTEXTS", "Austen,twain");
        std::env::set_var("NEXTWORD__SERVER__URL", "http://example.test");
        let loaded = AppConfig::load();
        std::env::remove_var("NEXTWORD__CONTEXTS");
        std::env::remove_var("NEXTWORD__SERVER__URL");

        let cfg = loaded.unwrap();
        assert_eq!(cfg.server.url, "http://example.test");
        assert!(cfg.contexts.contains(&"austen".to_string()));
        assert!(cfg.contexts.contains(&"twain".to_string()));
        assert!(cfg.contexts.contains(&cfg.default_context));
    }

    #[test]
    fn server_timeout_is_optional() {
        assert_eq!(ServerConfig::default().timeout(), None);
        let server = ServerConfig {
            timeout_secs: Some(3),
            ..ServerConfig::default()
        };
        assert_eq!(server.timeout(), Some(Duration::from_secs(3)));
    }
}
