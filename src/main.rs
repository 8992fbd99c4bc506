//! AuraMatch terminal front-end.
//!
//! Walks the landing screen, the stepped profile form, the loading screen and
//! the result screen on top of a shared [`FormSession`].

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use colored::{Color, Colorize};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use tokio::sync::Mutex;

use auramatch::adapters::ai::{GeminiConfig, GeminiModel};
use auramatch::application::{PredictionService, SubmissionOutcome, SubmitPredictionHandler};
use auramatch::config::{AppConfig, ConfigError, ValidationError};
use auramatch::domain::form::{step_fields, FieldStatus, FormError, FormField, FormSession, Screen, Slider};
use auramatch::domain::foundation::{DomainError, Percentage};
use auramatch::domain::prediction::{GeneratedImage, PredictionMode, PredictionResult};
use auramatch::domain::presentation::{message_at, portrait_file_name, progress_at, ResultView, Tone};
use auramatch::domain::profile::{
    EyeColorChoice, Gender, GenderPreference, ZodiacSign, EYE_COLOR_PALETTE, MAX_TAGS,
};
use auramatch::ports::ModelError;

const TICK: Duration = Duration::from_millis(250);

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<FormError> for CliError {
    fn from(err: FormError) -> Self {
        CliError::Domain(err.into())
    }
}

/// Where the form loop goes next.
enum FormExit {
    Landing,
    Result,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), CliError> {
    let config = AppConfig::load()?;
    config.validate()?;
    config.logging.init()?;

    let api_key = config
        .ai
        .gemini_api_key
        .clone()
        .ok_or(ValidationError::MissingRequired("GEMINI_API_KEY"))?;
    let thinking_budget = Some(config.ai.thinking_budget).filter(|b| *b > 0);
    let gemini = GeminiConfig::new(api_key)
        .with_text_model(config.ai.text_model.clone())
        .with_image_model(config.ai.image_model.clone())
        .with_base_url(config.ai.base_url.clone())
        .with_thinking_budget(thinking_budget);

    let model = Arc::new(GeminiModel::new(gemini)?);
    let gateway = Arc::new(PredictionService::new(model));
    let session = Arc::new(Mutex::new(FormSession::new()));
    let handler = SubmitPredictionHandler::new(gateway, session.clone());
    let theme = ColorfulTheme::default();

    tracing::info!(text_model = %config.ai.text_model, "auramatch started");

    loop {
        let Some(mode) = landing(&theme)? else {
            return Ok(());
        };
        session.lock().await.start(mode)?;

        match form_loop(&theme, &session, &handler).await? {
            FormExit::Landing => continue,
            FormExit::Result => result_loop(&theme, &session).await?,
        }
        session.lock().await.reset();
    }
}

fn landing(theme: &ColorfulTheme) -> Result<Option<PredictionMode>, CliError> {
    println!();
    println!("{}", "AuraMatch".bright_magenta().bold());
    println!("{}", "Decode your romantic destiny.".dimmed());

    let choice = Select::with_theme(theme)
        .with_prompt("Choose a reading")
        .items(&["Find My Soulmate", "Measure Compatibility", "Quit"])
        .default(0)
        .interact()?;

    Ok(match choice {
        0 => Some(PredictionMode::Archetype),
        1 => Some(PredictionMode::Measure),
        _ => None,
    })
}

async fn form_loop(
    theme: &ColorfulTheme,
    session: &Arc<Mutex<FormSession>>,
    handler: &SubmitPredictionHandler,
) -> Result<FormExit, CliError> {
    loop {
        let (mode, step) = {
            let mut guard = session.lock().await;
            print_step_header(&guard);
            if let Some(notice) = guard.error_notice() {
                println!("{}", notice.message().red().bold());
            }
            guard.dismiss_error();
            (guard.mode(), guard.step())
        };

        for field in step_fields(mode, step) {
            prompt_field(theme, session, *field).await?;
        }
        if step == 2 {
            prompt_sliders(theme, session).await?;
        }

        let (is_final, submit_label) = {
            let guard = session.lock().await;
            (guard.is_final_step(), guard.mode().submit_label())
        };
        let forward = if is_final { submit_label } else { "Next" };
        let retreat = if step == 1 { "Cancel" } else { "Back" };

        let action = Select::with_theme(theme)
            .items(&[forward, retreat, "Edit this step again"])
            .default(0)
            .interact()?;

        match action {
            0 if is_final => match submit(handler).await {
                Ok(SubmissionOutcome::Completed(_)) => return Ok(FormExit::Result),
                Ok(SubmissionOutcome::Failed(_)) => continue,
                Ok(SubmissionOutcome::Discarded(id)) => {
                    tracing::debug!(request_id = %id, "reply discarded");
                    return Ok(FormExit::Landing);
                }
                Err(err) => print_form_error(&err),
            },
            0 => {
                if let Err(err) = session.lock().await.next_step() {
                    print_form_error(&err);
                }
            }
            1 if step == 1 => {
                session.lock().await.cancel()?;
                return Ok(FormExit::Landing);
            }
            1 => {
                session.lock().await.previous_step()?;
            }
            _ => {}
        }
    }
}

fn print_step_header(session: &FormSession) {
    let (title, subtitle) = session.step_title();
    let width = 30;
    let filled = (session.progress_fraction() * width as f64).round() as usize;
    println!();
    println!(
        "{} {}",
        format!("Step {} of {}", session.step(), session.total_steps()).dimmed(),
        format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled)).magenta()
    );
    println!("{}", title.bold());
    println!("{}", subtitle.dimmed());
}

fn print_form_error(err: &FormError) {
    println!("{}", err.to_string().red());
}

fn print_field_status(session: &FormSession, field: FormField) {
    match session.field_status(field) {
        FieldStatus::Invalid => println!("  {}", format!("{} is required", field.label()).red()),
        FieldStatus::Valid | FieldStatus::Neutral => {}
    }
}

fn current_text(session: &FormSession, field: FormField) -> String {
    let user = session.user();
    let partner = session.partner();
    match field {
        FormField::Name => user.name.clone(),
        FormField::Age => user.age.to_string(),
        FormField::EyeColor => user.eye_color.clone(),
        FormField::FavoriteColor => user.favorite_color.clone(),
        FormField::StressReaction => user.stress_reaction.clone(),
        FormField::AdditionalDetails => user.additional_details.clone(),
        FormField::PartnerName => partner.name.clone(),
        FormField::PartnerAge => partner.age.to_string(),
        FormField::PartnerGender => partner.gender.clone(),
        FormField::PartnerReligion => partner.religion.clone(),
        FormField::PartnerTraitsPreference => user.partner_traits_preference.clone(),
        FormField::Gender => user.gender.to_string(),
        FormField::Zodiac => user.zodiac.to_string(),
        FormField::GenderPreference => user.gender_preference.to_string(),
    }
}

async fn prompt_field(
    theme: &ColorfulTheme,
    session: &Arc<Mutex<FormSession>>,
    field: FormField,
) -> Result<(), CliError> {
    match field {
        FormField::Gender => {
            let current = session.lock().await.user().gender;
            let index = select_from(theme, field.label(), &Gender::ALL, current)?;
            session.lock().await.set_gender(Gender::ALL[index])?;
        }
        FormField::Zodiac => {
            let current = session.lock().await.user().zodiac;
            let index = select_from(theme, field.label(), &ZodiacSign::ALL, current)?;
            session.lock().await.set_zodiac(ZodiacSign::ALL[index])?;
        }
        FormField::GenderPreference => {
            let current = session.lock().await.user().gender_preference;
            let index = select_from(theme, field.label(), &GenderPreference::ALL, current)?;
            session.lock().await.set_gender_preference(GenderPreference::ALL[index])?;
        }
        FormField::EyeColor => prompt_eye_color(theme, session).await?,
        FormField::PartnerTraitsPreference => prompt_traits(theme, session).await?,
        _ => {
            let initial = {
                let mut guard = session.lock().await;
                guard.set_focus_mode(true);
                current_text(&guard, field)
            };
            let raw: String = Input::with_theme(theme)
                .with_prompt(field.label())
                .with_initial_text(initial)
                .allow_empty(true)
                .interact_text()?;

            let mut guard = session.lock().await;
            guard.set_focus_mode(false);
            guard.set_text(field, raw)?;
            guard.mark_touched(field);
            print_field_status(&guard, field);
        }
    }
    Ok(())
}

fn select_from<T: PartialEq + ToString>(
    theme: &ColorfulTheme,
    prompt: &str,
    options: &[T],
    current: T,
) -> Result<usize, CliError> {
    let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
    let default = options.iter().position(|o| *o == current).unwrap_or(0);
    Ok(Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()?)
}

async fn prompt_eye_color(theme: &ColorfulTheme, session: &Arc<Mutex<FormSession>>) -> Result<(), CliError> {
    let stored = session.lock().await.user().eye_color.clone();
    let mut items: Vec<&str> = EYE_COLOR_PALETTE.to_vec();
    items.push("Other (Specify)");
    let default = match EyeColorChoice::for_stored(&stored) {
        EyeColorChoice::Palette(color) => items.iter().position(|c| *c == color).unwrap_or(0),
        EyeColorChoice::Other => EYE_COLOR_PALETTE.len(),
    };

    let index = Select::with_theme(theme)
        .with_prompt(FormField::EyeColor.label())
        .items(&items)
        .default(default)
        .interact()?;

    match EYE_COLOR_PALETTE.get(index) {
        Some(color) => {
            let mut guard = session.lock().await;
            guard.choose_eye_color(EyeColorChoice::Palette(color))?;
            guard.mark_touched(FormField::EyeColor);
        }
        None => {
            let keep = if EYE_COLOR_PALETTE.contains(&stored.as_str()) { String::new() } else { stored };
            session.lock().await.choose_eye_color(EyeColorChoice::Other)?;
            let custom: String = Input::with_theme(theme)
                .with_prompt("Describe your eye color")
                .with_initial_text(keep)
                .allow_empty(true)
                .interact_text()?;
            let mut guard = session.lock().await;
            guard.set_text(FormField::EyeColor, custom)?;
            guard.mark_touched(FormField::EyeColor);
            print_field_status(&guard, FormField::EyeColor);
        }
    }
    Ok(())
}

async fn prompt_traits(theme: &ColorfulTheme, session: &Arc<Mutex<FormSession>>) -> Result<(), CliError> {
    println!(
        "{}",
        format!("Partner traits (up to {}). Enter a blank line to finish, -tag to remove.", MAX_TAGS).dimmed()
    );
    loop {
        let tags = session.lock().await.trait_tags();
        if !tags.is_empty() {
            println!("  {}", tags.as_slice().join("  ").cyan());
        }

        let raw: String = Input::with_theme(theme)
            .with_prompt(format!("Trait {}/{}", tags.len(), MAX_TAGS))
            .allow_empty(true)
            .interact_text()?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(());
        }

        let now = Instant::now();
        let mut guard = session.lock().await;
        match raw.strip_prefix('-') {
            Some(tag) => {
                guard.remove_trait(tag.trim())?;
            }
            None => guard.add_trait(raw, now)?,
        }
        if guard.tag_overflow_active(now) {
            println!("  {}", format!("Only {} traits fit in the reading.", MAX_TAGS).yellow());
        }
    }
}

async fn prompt_sliders(theme: &ColorfulTheme, session: &Arc<Mutex<FormSession>>) -> Result<(), CliError> {
    for slider in Slider::ALL {
        let (title, low, high) = slider.labels();
        let current = {
            let guard = session.lock().await;
            let user = guard.user();
            match slider {
                Slider::IntrovertExtrovert => user.introvert_extrovert,
                Slider::LogicEmotion => user.logic_emotion,
                Slider::AdventureRoutine => user.adventure_routine,
            }
        };
        let value: u8 = Input::with_theme(theme)
            .with_prompt(format!("{} (0 {} .. 100 {})", title, low, high))
            .default(current.value())
            .validate_with(|v: &u8| if *v <= 100 { Ok(()) } else { Err("0 to 100") })
            .interact_text()?;
        session.lock().await.set_slider(slider, Percentage::new(value))?;
    }
    Ok(())
}

async fn submit(handler: &SubmitPredictionHandler) -> Result<SubmissionOutcome, FormError> {
    let started = Instant::now();
    let reply = handler.handle();
    tokio::pin!(reply);
    let mut ticker = tokio::time::interval(TICK);

    let outcome = loop {
        tokio::select! {
            outcome = &mut reply => break outcome,
            _ = ticker.tick() => {
                let elapsed = started.elapsed();
                print!("\r\x1b[2K{} {}", format!("{:>3.0}%", progress_at(elapsed)).magenta(), message_at(elapsed));
                let _ = std::io::stdout().flush();
            }
        }
    };
    println!();
    outcome
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Emerald => Color::Green,
        Tone::Yellow => Color::Yellow,
        Tone::Purple => Color::Magenta,
        Tone::Gray => Color::BrightBlack,
        Tone::Red => Color::Red,
        Tone::Pink => Color::BrightMagenta,
    }
}

async fn result_loop(theme: &ColorfulTheme, session: &Arc<Mutex<FormSession>>) -> Result<(), CliError> {
    loop {
        let (view, portrait, has_shadow) = {
            let guard = session.lock().await;
            if guard.screen() != Screen::Result {
                return Ok(());
            }
            let Some(result) = guard.result() else {
                return Ok(());
            };
            let (portrait, has_shadow) = match result {
                PredictionResult::Archetype(a) => (a.image.clone(), a.shadow_profile.is_some()),
                PredictionResult::Measure(_) => (None, false),
            };
            (
                ResultView::build(result, guard.user(), guard.is_shadow_shown()),
                portrait,
                has_shadow,
            )
        };

        render_result(&view);

        let mut actions = Vec::new();
        if has_shadow {
            actions.push(if view.shadow_view { "Show the archetype" } else { "Reveal the shadow" });
        }
        if portrait.is_some() {
            actions.push("Save portrait");
        }
        actions.push("Start over");

        let choice = Select::with_theme(theme).items(&actions).default(0).interact()?;
        match actions[choice] {
            "Save portrait" => {
                if let Some(image) = &portrait {
                    save_portrait(image, &view.display_name).await?;
                }
            }
            "Start over" => return Ok(()),
            _ => {
                session.lock().await.toggle_shadow()?;
            }
        }
    }
}

fn render_result(view: &ResultView) {
    let accent = if view.is_karmic() { Color::Red } else { Color::BrightMagenta };

    println!();
    println!("{}", view.headline.dimmed());
    println!("{}", view.display_name.color(accent).bold());
    if let Some(subtitle) = &view.subtitle {
        println!("{}", subtitle);
    }
    if let Some(trigger) = &view.shadow_trigger {
        println!("{} {}", "Trigger:".dimmed(), trigger);
    }

    println!(
        "{} {}%  {}  {} {}",
        view.score_label.dimmed(),
        view.score.value().to_string().color(accent).bold(),
        view.band.label().italic(),
        "Life Path".dimmed(),
        view.life_path
    );

    if let Some(status) = &view.status {
        let label = status.status.label().color(tone_color(status.tone));
        println!("{}", if status.glow { label.bold() } else { label });
        println!("{}", status.description().dimmed());
    }

    for card in &view.cards {
        println!();
        println!("{}", card.title.color(tone_color(card.tone)).bold());
        println!("{}", card.content);
    }

    if let Some(lesson) = &view.shadow_lesson {
        println!();
        println!("{} {}", "Lesson:".red().bold(), lesson);
    }

    if let Some(love) = &view.love_framework {
        println!();
        println!("{}", "Love Framework".bold());
        println!(
            "  Intimacy {}%  Passion {}%  Commitment {}%",
            love.intimacy_level.value(),
            love.passion_level.value(),
            love.commitment_level.value()
        );
        println!("  {}", love.attachment_dynamic.italic());
        println!("  {}", love.synastry_report);
    }

    if !view.traits.is_empty() && !view.shadow_view {
        println!();
        for t in &view.traits {
            println!("  {:<18} {:>3}  {}", t.name, t.score.value(), t.description.dimmed());
        }
    }

    println!();
    println!("{}", view.share_text.dimmed());
}

async fn save_portrait(image: &GeneratedImage, name: &str) -> Result<(), CliError> {
    let bytes = match image.decode() {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, "portrait payload is not valid base64");
            println!("{}", "The portrait could not be decoded.".red());
            return Ok(());
        }
    };
    let path = portrait_file_name(name);
    tokio::fs::write(&path, bytes).await?;
    println!("{} {}", "Saved".green(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use auramatch::domain::foundation::{ErrorCode, RequestId};

    #[test]
    fn form_errors_surface_with_their_code() {
        let err = CliError::from(FormError::StaleResponse(RequestId::new()));
        match &err {
            CliError::Domain(domain) => assert_eq!(domain.code, ErrorCode::StaleResponse),
            other => panic!("expected domain error, got {:?}", other),
        }
        assert!(err.to_string().starts_with("[STALE_RESPONSE]"));
    }
}
