//! Profile module - what the user tells us about themselves and, in measure
//! mode, about the specific partner they want scored.

mod partner;
mod traits;
mod user;

pub use partner::SpecificPartnerDetails;
pub use traits::{TagError, TraitTags, MAX_TAGS};
pub use user::{EyeColorChoice, Gender, GenderPreference, UserProfile, ZodiacSign, EYE_COLOR_PALETTE};
pub(crate) use user::parse_age_input;
