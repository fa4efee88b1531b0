use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::pages::calendar::CalendarSettings;
use crate::scenario::scenarios::ScenarioId;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "ui-scenarios",
    version,
    about = "End-to-end browser scenarios driven over WebDriver"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: ui-scenarios.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run scenarios against a browser
    Run {
        /// Scenario to run; repeat for several (default: all, in order)
        #[arg(long = "scenario", value_enum)]
        scenarios: Vec<ScenarioId>,

        /// Output format: console, html, junit
        #[arg(long)]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Run the browser without a window
        #[arg(long)]
        headless: bool,

        /// WebDriver server URL
        #[arg(long)]
        webdriver_url: Option<String>,

        /// Append a JSONL action trace to this file
        #[arg(long)]
        trace: Option<String>,
    },

    /// List the available scenarios
    List,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `ui-scenarios.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub urls: UrlConfig,
    #[serde(default)]
    pub fixtures: FixtureConfig,
    #[serde(default)]
    pub expectations: ExpectationConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    #[serde(default)]
    pub headless: bool,

    /// When set, this chromedriver binary is started for the run.
    pub chromedriver_path: Option<PathBuf>,

    #[serde(default = "default_driver_port")]
    pub driver_port: u16,

    #[serde(default = "default_window_size")]
    pub window_size: Option<(u32, u32)>,

    #[serde(default = "default_ten")]
    pub page_load_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            headless: false,
            chromedriver_path: None,
            driver_port: default_driver_port(),
            window_size: default_window_size(),
            page_load_timeout_secs: 10,
        }
    }
}

impl BrowserConfig {
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_ten")]
    pub default_wait_secs: u64,

    #[serde(default = "default_five")]
    pub cookie_wait_secs: u64,

    #[serde(default = "default_poll_ms")]
    pub poll_interval_ms: u64,

    /// Pause after actions the page animates (drag, date pick, tab open).
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            default_wait_secs: 10,
            cookie_wait_secs: 5,
            poll_interval_ms: default_poll_ms(),
            settle_ms: default_settle_ms(),
        }
    }
}

impl TimeoutConfig {
    pub fn default_wait(&self) -> Duration {
        Duration::from_secs(self.default_wait_secs)
    }

    pub fn cookie_wait(&self) -> Duration {
        Duration::from_secs(self.cookie_wait_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    #[serde(default = "default_upload_url")]
    pub upload: String,
    #[serde(default = "default_drag_and_drop_url")]
    pub drag_and_drop: String,
    #[serde(default = "default_aubergine_url")]
    pub aubergine: String,
    #[serde(default = "default_tockify_url")]
    pub tockify: String,
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            upload: default_upload_url(),
            drag_and_drop: default_drag_and_drop_url(),
            aubergine: default_aubergine_url(),
            tockify: default_tockify_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureConfig {
    #[serde(default = "default_upload_file")]
    pub upload_file: PathBuf,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            upload_file: default_upload_file(),
        }
    }
}

impl FixtureConfig {
    /// File name component of the upload fixture, as the page displays it.
    pub fn upload_file_name(&self) -> String {
        self.upload_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectationConfig {
    #[serde(default = "default_upload_success")]
    pub upload_success: String,
    #[serde(default = "default_tockify_date")]
    pub tockify_date: String,
    #[serde(default = "default_tockify_title_part")]
    pub tockify_title_part: String,
}

impl Default for ExpectationConfig {
    fn default() -> Self {
        Self {
            upload_success: default_upload_success(),
            tockify_date: default_tockify_date(),
            tockify_title_part: default_tockify_title_part(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_ten_u32")]
    pub read_attempts: u32,
    #[serde(default = "default_read_backoff_ms")]
    pub read_backoff_ms: u64,
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            read_attempts: 10,
            read_backoff_ms: default_read_backoff_ms(),
            max_steps: default_max_steps(),
        }
    }
}

impl CalendarConfig {
    pub fn settings(&self) -> CalendarSettings {
        CalendarSettings {
            read_attempts: self.read_attempts,
            read_backoff: Duration::from_millis(self.read_backoff_ms),
            max_steps: self.max_steps,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_console")]
    pub format: String,

    pub output: Option<String>,

    pub trace: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            format: "console".to_string(),
            output: None,
            trace: None,
        }
    }
}

// Serde default helpers
fn default_ten() -> u64 { 10 }
fn default_ten_u32() -> u32 { 10 }
fn default_five() -> u64 { 5 }
fn default_poll_ms() -> u64 { 250 }
fn default_settle_ms() -> u64 { 1000 }
fn default_read_backoff_ms() -> u64 { 500 }
fn default_max_steps() -> u32 { 600 }
fn default_driver_port() -> u16 { 9515 }
fn default_window_size() -> Option<(u32, u32)> { Some((1920, 1080)) }
fn default_webdriver_url() -> String { "http://localhost:9515".to_string() }
fn default_upload_url() -> String { "https://the-internet.herokuapp.com/upload".to_string() }
fn default_drag_and_drop_url() -> String { "https://the-internet.herokuapp.com/drag_and_drop".to_string() }
fn default_aubergine_url() -> String { "https://auberginesolutions.com/".to_string() }
fn default_tockify_url() -> String { "https://tockify.com/".to_string() }
fn default_upload_file() -> PathBuf { PathBuf::from("fixtures/test_file.pdf") }
fn default_upload_success() -> String { "File Uploaded!".to_string() }
fn default_tockify_date() -> String { "28/02/40".to_string() }
fn default_tockify_title_part() -> String { "Tockify".to_string() }
fn default_console() -> String { "console".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("ui-scenarios.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => match serde_yaml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring malformed config '{}': {}", config_path, e);
                AppConfig::default()
            }
        },
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Apply `run` flags on top of the file config. Flags win when given.
pub fn apply_run_overrides(
    mut config: AppConfig,
    format: Option<&str>,
    output: Option<&str>,
    headless: bool,
    webdriver_url: Option<&str>,
    trace: Option<&str>,
) -> AppConfig {
    if let Some(format) = format {
        config.run.format = format.to_string();
    }
    if let Some(output) = output {
        config.run.output = Some(output.to_string());
    }
    if headless {
        config.browser.headless = true;
    }
    if let Some(url) = webdriver_url {
        config.browser.webdriver_url = url.to_string();
    }
    if let Some(trace) = trace {
        config.run.trace = Some(trace.to_string());
    }
    config
}
