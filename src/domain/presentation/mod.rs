//! Presentation module - values derived locally for the loading and result
//! screens.

mod loading;
mod numerology;
mod view;

pub use loading::{message_at, message_index, progress_at, LOADING_DURATION, LOADING_MESSAGES};
pub use numerology::life_path;
pub use view::{
    headline, portrait_file_name, score_label, share_text, DetailCard, ResultView, ScoreBand,
    StatusTreatment, Tone,
};
