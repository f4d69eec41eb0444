mod locator;
mod session;

pub use locator::Locator;
pub use session::{new_session, BrowserConfig, Session};
