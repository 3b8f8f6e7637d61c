#[cfg(feature = "chrome")]
pub mod chrome;
pub mod discovery;
pub mod session;
pub mod static_page;

#[cfg(feature = "chrome")]
pub use chrome::ChromeBrowser;
pub use discovery::discover;
pub use session::BrowserSession;
pub use static_page::{NodeRef, StaticPage};
