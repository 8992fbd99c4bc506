//! Form module - the wizard that collects a profile, gates each step on its
//! required fields, and fences the single outstanding prediction request.

mod errors;
mod field;
mod notice;
mod screen;
mod session;

pub use errors::FormError;
pub use field::{required_fields, step_fields, step_title, FieldStatus, FormField, Slider};
pub use notice::ErrorNotice;
pub use screen::Screen;
pub use session::{FormSession, SubmissionTicket, TAG_OVERFLOW_WINDOW};
