use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use crate::browser::session::BrowserSession;
use crate::cli::config::AppConfig;
use crate::error::{UiError, UiResult};
use crate::facade::page::Page;
use crate::locators::upload;

/// `the-internet` file upload page.
pub struct UploadPage<'s> {
    page: Page<'s>,
    url: String,
    settle: Duration,
}

impl<'s> UploadPage<'s> {
    pub fn new(session: &'s mut BrowserSession, config: &AppConfig) -> Self {
        UploadPage {
            page: Page::new(session, &config.timeouts),
            url: config.urls.upload.clone(),
            settle: config.timeouts.settle(),
        }
    }

    /// Navigate and wait for the "File Uploader" heading.
    pub fn load(&mut self) -> UiResult<()> {
        self.page.go_to_url(&self.url)?;
        self.page.wait_visible(&upload::CONTENT, None)?;
        self.page.wait_visible(&upload::MAIN_HEADING, None)?;
        info!("upload page loaded");
        Ok(())
    }

    /// Hand the file to the form input and, when present, to the drop area
    /// so its preview shows the name.
    pub fn upload_file(&mut self, path: &Path) -> UiResult<()> {
        let absolute = path.canonicalize().map_err(|_| UiError::ResourceMissing {
            path: path.to_path_buf(),
        })?;
        let absolute = absolute.to_string_lossy().into_owned();

        self.page.send_keys(&upload::FILE_INPUT, &absolute, None)?;

        match self.page.send_keys(&upload::DROPZONE_INPUT, &absolute, Some(self.settle)) {
            Ok(()) => {}
            Err(UiError::ElementNotReady { .. }) => debug!("no drop area on upload page"),
            Err(e) => return Err(e),
        }

        info!(file = %absolute, "file sent to upload input");
        self.page.pause(self.settle);
        Ok(())
    }

    /// Name shown in the drop-area preview.
    pub fn get_displayed_file_name(&mut self) -> UiResult<String> {
        self.page.wait_visible(&upload::UPLOADED_FILES_DISPLAY, None)?;
        self.page.get_element_text(&upload::UPLOADED_FILES_DISPLAY, None)
    }

    pub fn click_upload_button(&mut self) -> UiResult<()> {
        self.page.click_element(&upload::UPLOAD_BUTTON, None)
    }

    /// Heading of the result page.
    pub fn get_upload_success_message(&mut self) -> UiResult<String> {
        // The form page has an h3 too; wait for something only the result page has.
        self.page.wait_visible(&upload::UPLOADED_FILES_RESULT, None)?;
        self.page.wait_visible(&upload::SUCCESS_MESSAGE_HEADER, None)?;
        self.page.get_element_text(&upload::SUCCESS_MESSAGE_HEADER, None)
    }

    /// File name echoed on the result page.
    pub fn get_uploaded_files_result(&mut self) -> UiResult<String> {
        self.page.get_element_text(&upload::UPLOADED_FILES_RESULT, None)
    }
}
