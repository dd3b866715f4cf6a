//! Browser automation over the W3C WebDriver protocol
//!
//! - [`session`]: a single exclusively owned browser session
//! - [`page`]: the bookings calendar as a [`CalendarSurface`]
//! - [`login`]: the sign-in form flow
//!
//! [`CalendarSurface`]: bookingcal_core::CalendarSurface

pub mod login;
pub mod page;
pub mod protocol;
pub mod session;

pub use login::LoginFlow;
pub use page::{NextControl, PageSelectors, ParentZonePage};
pub use protocol::{BrowserOptions, ElementRef, Locator};
pub use session::WebDriverSession;
