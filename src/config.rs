use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub vnstat: VnstatConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VnstatConfig {
    /// vnstat executable; an absolute path or a name resolved via PATH.
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Interface passed to `vnstat -i`. Must match [A-Za-z0-9._-]{1,15}.
    pub interface: String,
    /// Hard timeout for one vnstat invocation.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How many of the most recent 5-minute rows the dashboard shows.
    #[serde(default = "default_five_minute_window")]
    pub five_minute_window: usize,
    /// How many of the most recent hourly rows the dashboard shows.
    #[serde(default = "default_hourly_window")]
    pub hourly_window: usize,
}

fn default_binary() -> String {
    "vnstat".into()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_five_minute_window() -> usize {
    12
}

fn default_hourly_window() -> usize {
    24
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// How many most-recent years the dashboard expands by default.
    #[serde(default = "default_years")]
    pub default_years: i64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_years: default_years(),
        }
    }
}

fn default_years() -> i64 {
    1
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.vnstat.binary.is_empty(),
            "vnstat.binary must be non-empty"
        );
        anyhow::ensure!(
            crate::vnstat_repo::interface_name_is_valid(&self.vnstat.interface),
            "vnstat.interface must match [A-Za-z0-9._-]{{1,15}}, got {:?}",
            self.vnstat.interface
        );
        anyhow::ensure!(
            self.vnstat.timeout_secs > 0,
            "vnstat.timeout_secs must be > 0, got {}",
            self.vnstat.timeout_secs
        );
        anyhow::ensure!(
            self.vnstat.five_minute_window > 0,
            "vnstat.five_minute_window must be > 0, got {}",
            self.vnstat.five_minute_window
        );
        anyhow::ensure!(
            self.vnstat.hourly_window > 0,
            "vnstat.hourly_window must be > 0, got {}",
            self.vnstat.hourly_window
        );
        anyhow::ensure!(
            self.display.default_years >= 1,
            "display.default_years must be >= 1, got {}",
            self.display.default_years
        );
        Ok(())
    }
}
