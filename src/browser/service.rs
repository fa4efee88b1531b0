use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::browser::webdriver::WebDriverClient;
use crate::error::{UiError, UiResult};

const READY_POLL: Duration = Duration::from_millis(100);

/// A chromedriver process started by this run.
///
/// The process is killed on `stop` or drop.
pub struct DriverService {
    child: Child,
    url: String,
}

impl DriverService {
    /// Spawn `path --port=<port>` and wait until `/status` reports ready.
    pub fn start(path: &Path, port: u16, startup_timeout: Duration) -> UiResult<Self> {
        if !path.is_file() {
            return Err(UiError::ResourceMissing {
                path: path.to_path_buf(),
            });
        }

        let child = Command::new(path)
            .arg(format!("--port={}", port))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| UiError::ServiceStart(format!("{}: {}", path.display(), e)))?;

        let mut service = DriverService {
            child,
            url: format!("http://localhost:{}", port),
        };

        let http = Client::builder().timeout(Duration::from_secs(2)).build()?;
        let started = Instant::now();
        while started.elapsed() < startup_timeout {
            if let Ok(Some(status)) = service.child.try_wait() {
                return Err(UiError::ServiceStart(format!(
                    "{} exited early with {}",
                    path.display(),
                    status
                )));
            }
            if WebDriverClient::server_ready(&http, &service.url) {
                info!(url = %service.url, "driver service ready");
                return Ok(service);
            }
            thread::sleep(READY_POLL);
        }

        service.stop();
        Err(UiError::ServiceStart(format!(
            "{} not ready after {:?}",
            path.display(),
            startup_timeout
        )))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn stop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        debug!(url = %self.url, "driver service stopped");
    }
}

impl Drop for DriverService {
    fn drop(&mut self) {
        self.stop();
    }
}
