use std::time::Duration;

use tracing::{info, warn};

use crate::browser::session::BrowserSession;
use crate::cli::config::AppConfig;
use crate::error::UiResult;
use crate::facade::page::Page;
use crate::locators::dnd;

/// Dispatches the HTML5 drag events a real drag would produce.
const HTML5_DRAG_SCRIPT: &str = r#"
const source = arguments[0];
const target = arguments[1];
const data = new DataTransfer();
const fire = (el, type) => el.dispatchEvent(
    new DragEvent(type, { bubbles: true, cancelable: true, dataTransfer: data }));
fire(source, 'dragstart');
fire(target, 'dragenter');
fire(target, 'dragover');
fire(target, 'drop');
fire(source, 'dragend');
"#;

/// `the-internet` drag and drop page: two columns, A and B.
pub struct DragAndDropPage<'s> {
    page: Page<'s>,
    url: String,
    settle: Duration,
}

impl<'s> DragAndDropPage<'s> {
    pub fn new(session: &'s mut BrowserSession, config: &AppConfig) -> Self {
        DragAndDropPage {
            page: Page::new(session, &config.timeouts),
            url: config.urls.drag_and_drop.clone(),
            settle: config.timeouts.settle(),
        }
    }

    pub fn load(&mut self) -> UiResult<()> {
        self.page.go_to_url(&self.url)?;
        self.page.wait_visible(&dnd::COLUMN_A, None)?;
        Ok(())
    }

    /// Drag column A onto column B.
    ///
    /// Pointer actions come first; HTML5 drag-and-drop ignores synthesized
    /// pointer input in some browsers, so when the headers did not move the
    /// drag events are dispatched by script.
    pub fn drag_a_to_b(&mut self) -> UiResult<()> {
        let before = self.get_column_a_header_text()?;

        self.page.drag_and_drop(&dnd::COLUMN_A, &dnd::COLUMN_B, None)?;
        self.page.pause(self.settle);

        if self.get_column_a_header_text()? == before {
            warn!("pointer drag did not move the columns, dispatching drag events");
            let source = self.page.find_element(&dnd::COLUMN_A, None)?;
            let target = self.page.find_element(&dnd::COLUMN_B, None)?;
            self.page
                .execute_script(HTML5_DRAG_SCRIPT, vec![source.to_json(), target.to_json()])?;
            self.page.pause(self.settle);
        }

        info!("dragged A onto B");
        Ok(())
    }

    pub fn get_column_a_header_text(&mut self) -> UiResult<String> {
        self.page.get_element_text(&dnd::HEADER_A, None)
    }

    pub fn get_column_b_header_text(&mut self) -> UiResult<String> {
        self.page.get_element_text(&dnd::HEADER_B, None)
    }
}
