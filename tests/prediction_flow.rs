//! End-to-end submission tests.
//!
//! Drives a `FormSession` through the form, submits it via
//! `SubmitPredictionHandler` backed by `PredictionService` and the mock model,
//! and checks what the result screen would render.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use auramatch::adapters::ai::MockGenerativeModel;
use auramatch::application::{PredictionService, SubmissionOutcome, SubmitPredictionHandler};
use auramatch::domain::form::{ErrorNotice, FormField, FormSession, Screen};
use auramatch::domain::prediction::{PredictionMode, RelationshipStatus};
use auramatch::domain::presentation::{ResultView, ScoreBand, Tone};
use auramatch::ports::ModelError;

// =============================================================================
// Fixtures
// =============================================================================

fn love_framework() -> serde_json::Value {
    json!({
        "intimacyLevel": 70,
        "passionLevel": 85,
        "commitmentLevel": 60,
        "attachmentDynamic": "Anxious - Avoidant",
        "synastryReport": "Venus squares Mars."
    })
}

fn archetype_reply() -> serde_json::Value {
    json!({
        "name": "Elara",
        "gender": "Female",
        "estimatedAge": 31,
        "occupation": "Cartographer",
        "compatibilityScore": 86,
        "reasoning": "She grounds your restlessness.",
        "physiologicalMatch": "Dark curls, hazel eyes, ink-stained fingers.",
        "psychologicalMatch": "Patient and wry.",
        "dominantTraits": [
            {"trait": "Patience", "score": 88, "description": "Waits out storms."},
            {"trait": "Wit", "score": 74, "description": "Dry and quick."}
        ],
        "loveFramework": love_framework(),
        "shadowProfile": {
            "archetype": "The Vanishing Poet",
            "triggerTrait": "Craving intensity",
            "description": "Brilliant, elusive, never quite present.",
            "lesson": "Presence over poetry."
        }
    })
}

fn measure_reply() -> serde_json::Value {
    json!({
        "partnerName": "Sam",
        "relationshipStatus": "Karmic Lesson",
        "successProbability": 42,
        "dynamicAnalysis": "Electric and unstable.",
        "potentialChallenges": "Old wounds reopen.",
        "loveFramework": love_framework()
    })
}

fn wire(model: &MockGenerativeModel) -> (Arc<Mutex<FormSession>>, SubmitPredictionHandler) {
    let session = Arc::new(Mutex::new(FormSession::new()));
    let gateway = Arc::new(PredictionService::new(Arc::new(model.clone())));
    let handler = SubmitPredictionHandler::new(gateway, session.clone());
    (session, handler)
}

/// Fills the form as Alex, 30, and walks to the final step.
async fn fill_form(session: &Mutex<FormSession>, mode: PredictionMode) {
    let mut s = session.lock().await;
    s.start(mode).unwrap();
    s.set_text(FormField::Name, "Alex").unwrap();
    s.set_age_input(FormField::Age, "30").unwrap();
    s.next_step().unwrap();
    s.next_step().unwrap();
    if mode == PredictionMode::Measure {
        s.next_step().unwrap();
        s.set_text(FormField::PartnerName, "Sam").unwrap();
        s.set_text(FormField::PartnerReligion, "Agnostic").unwrap();
    }
    assert!(s.is_final_step());
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn archetype_reading_without_portrait_reaches_result_screen() {
    let model = MockGenerativeModel::new().with_json(archetype_reply()).with_no_image();
    let (session, handler) = wire(&model);
    fill_form(&session, PredictionMode::Archetype).await;

    let outcome = handler.handle().await.unwrap();
    assert!(matches!(outcome, SubmissionOutcome::Completed(_)));

    let s = session.lock().await;
    assert_eq!(s.screen(), Screen::Result);
    let view = ResultView::build(s.result().unwrap(), s.user(), s.is_shadow_shown());
    assert_eq!(view.display_name, "Elara");
    assert_eq!(view.subtitle.as_deref(), Some("Cartographer, 31"));
    assert_eq!(view.band, ScoreBand::HighAlignment);
    assert_eq!(view.life_path, 7);
    assert!(!view.has_portrait);
    assert!(view.status.is_none());

    let prompt = &model.structured_calls()[0].prompt;
    assert!(prompt.contains("\"name\":\"Alex\""));
    assert_eq!(model.image_calls().len(), 1);
}

#[tokio::test]
async fn shadow_toggle_swaps_the_rendered_view() {
    let model = MockGenerativeModel::new().with_json(archetype_reply());
    let (session, handler) = wire(&model);
    fill_form(&session, PredictionMode::Archetype).await;
    handler.handle().await.unwrap();

    let mut s = session.lock().await;
    assert!(s.toggle_shadow().unwrap());
    let view = ResultView::build(s.result().unwrap(), s.user(), s.is_shadow_shown());

    assert!(view.shadow_view);
    assert!(view.is_karmic());
    assert_eq!(view.display_name, "The Vanishing Poet");
    assert!(view.love_framework.is_none());
    assert_eq!(view.cards.len(), 1);
}

#[tokio::test]
async fn karmic_measure_reading_gets_red_treatment() {
    let model = MockGenerativeModel::new().with_json(measure_reply());
    let (session, handler) = wire(&model);
    fill_form(&session, PredictionMode::Measure).await;

    handler.handle().await.unwrap();

    let s = session.lock().await;
    let view = ResultView::build(s.result().unwrap(), s.user(), false);
    let status = view.status.unwrap();
    assert_eq!(status.status, RelationshipStatus::KarmicLesson);
    assert_eq!(status.tone, Tone::Red);
    assert_eq!(status.description(), "Intense, volatile, meant for growth but likely to end.");
    assert!(view.is_karmic());
    assert_eq!(view.band, ScoreBand::ComplexDynamic);
    assert!(model.image_calls().is_empty());
    assert!(model.structured_calls()[0].prompt.contains("Name: Sam"));
}

#[tokio::test]
async fn rate_limit_returns_to_form_with_notice() {
    let model = MockGenerativeModel::new()
        .with_text_error(ModelError::Other("Error: 429 Too Many Requests".to_string()));
    let (session, handler) = wire(&model);
    fill_form(&session, PredictionMode::Archetype).await;

    let outcome = handler.handle().await.unwrap();

    assert_eq!(outcome, SubmissionOutcome::Failed(ErrorNotice::RateLimited));
    let s = session.lock().await;
    assert_eq!(s.screen(), Screen::Form);
    assert_eq!(s.step(), 3);
    assert_eq!(s.user().name, "Alex");
    assert_eq!(
        s.error_notice().map(|n| n.message()),
        Some("The stars are aligning too quickly. Please pause.".to_string())
    );
}

#[tokio::test]
async fn quota_error_is_reported_as_depleted_energy() {
    let model = MockGenerativeModel::new().with_text_error(ModelError::quota("daily limit"));
    let (session, handler) = wire(&model);
    fill_form(&session, PredictionMode::Measure).await;

    let outcome = handler.handle().await.unwrap();

    assert_eq!(outcome, SubmissionOutcome::Failed(ErrorNotice::QuotaExceeded));
}

#[tokio::test]
async fn reply_after_reset_is_discarded() {
    let model = MockGenerativeModel::new()
        .with_json(archetype_reply())
        .with_delay(Duration::from_millis(100));
    let (session, handler) = wire(&model);
    fill_form(&session, PredictionMode::Archetype).await;

    let (outcome, ()) = tokio::join!(handler.handle(), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        session.lock().await.reset();
    });

    assert!(matches!(outcome.unwrap(), SubmissionOutcome::Discarded(_)));
    let s = session.lock().await;
    assert_eq!(s.screen(), Screen::Landing);
    assert!(s.result().is_none());
    assert!(s.pending_request().is_none());
}
