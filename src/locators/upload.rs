use crate::locators::locator::Locator;

/// `<input id="file-upload" type="file">`, submitted by the Upload button.
pub const FILE_INPUT: Locator = Locator::id("file-upload");

/// Hidden input Dropzone attaches for its drag-and-drop area.
pub const DROPZONE_INPUT: Locator = Locator::css("input.dz-hidden-input");

pub const UPLOAD_BUTTON: Locator = Locator::id("file-submit");

pub const CONTENT: Locator = Locator::id("content");

pub const MAIN_HEADING: Locator = Locator::xpath("//h3[normalize-space()='File Uploader']");

/// File name shown in the drop area preview before submitting.
pub const UPLOADED_FILES_DISPLAY: Locator =
    Locator::css(".dz-preview.dz-file-preview .dz-filename [data-dz-name]");

/// File name echoed back on the result page after submitting.
pub const UPLOADED_FILES_RESULT: Locator = Locator::id("uploaded-files");

pub const SUCCESS_MESSAGE_HEADER: Locator = Locator::tag_name("h3");
