//! Attendee-facing flow: the registration form, the screen controller and the HTTP client.

pub mod api;
pub mod form;
pub mod notice;
pub mod view;

pub use api::HttpRegistrationClient;
pub use form::{RegistrationForm, SubmitOutcome};
pub use notice::{Notice, NoticeVariant};
pub use view::{Screen, ViewController, ViewState};
