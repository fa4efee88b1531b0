use crate::locators::locator::Locator;

pub const COLUMN_A: Locator = Locator::xpath("//div[@id='column-a']");

pub const COLUMN_B: Locator = Locator::xpath("//div[@id='column-b']");

pub const HEADER_A: Locator = Locator::xpath("//div[@id='column-a']/header");

pub const HEADER_B: Locator = Locator::xpath("//div[@id='column-b']/header");
