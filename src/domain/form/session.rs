//! Form session aggregate.
//!
//! Owns everything one visitor does between the landing screen and a
//! reading: the chosen mode, the wizard step, the profile being filled in,
//! per-field touched flags, the single outstanding request and its outcome.
//!
//! # Request fencing
//!
//! `begin_submission` hands out a [`SubmissionTicket`] carrying a fresh
//! [`RequestId`]. Only a response presented with that same id is applied;
//! anything else (after a reset, or from an abandoned request) is rejected
//! as stale and leaves the session untouched.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::domain::foundation::{Percentage, RequestId, StateMachine, ValidationError};
use crate::domain::prediction::{PredictionMode, PredictionRequest, PredictionResult};
use crate::domain::profile::{
    parse_age_input, EyeColorChoice, Gender, GenderPreference, SpecificPartnerDetails, TagError,
    TraitTags, UserProfile, ZodiacSign,
};

use super::field::{required_fields, step_title};
use super::{ErrorNotice, FieldStatus, FormError, FormField, Screen, Slider};

/// How long the "maximum traits reached" hint stays up.
pub const TAG_OVERFLOW_WINDOW: Duration = Duration::from_secs(2);

/// A request handed to the caller to run against the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    pub id: RequestId,
    pub request: PredictionRequest,
}

/// Interactive session - one visitor's pass through the wizard.
///
/// # Invariants
///
/// - `step` is within `1..=mode.total_steps()`
/// - `pending` is `Some` exactly while the screen is `Loading`
/// - `result` is `Some` exactly while the screen is `Result`
#[derive(Debug, Clone)]
pub struct FormSession {
    mode: PredictionMode,
    screen: Screen,
    step: u8,
    user: UserProfile,
    partner: SpecificPartnerDetails,
    touched: BTreeSet<FormField>,
    focus_mode: bool,
    tag_overflow_at: Option<Instant>,
    error: Option<ErrorNotice>,
    result: Option<PredictionResult>,
    show_shadow: bool,
    pending: Option<RequestId>,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    /// A fresh session sitting on the landing screen.
    pub fn new() -> Self {
        Self {
            mode: PredictionMode::default(),
            screen: Screen::Landing,
            step: 1,
            user: UserProfile::default(),
            partner: SpecificPartnerDetails::default(),
            touched: BTreeSet::new(),
            focus_mode: false,
            tag_overflow_at: None,
            error: None,
            result: None,
            show_shadow: false,
            pending: None,
        }
    }

    // ══════════════════════════════════════════════════════════════════
    // Accessors
    // ══════════════════════════════════════════════════════════════════

    pub fn mode(&self) -> PredictionMode {
        self.mode
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn total_steps(&self) -> u8 {
        self.mode.total_steps()
    }

    pub fn is_final_step(&self) -> bool {
        self.step == self.total_steps()
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn partner(&self) -> &SpecificPartnerDetails {
        &self.partner
    }

    pub fn trait_tags(&self) -> TraitTags {
        TraitTags::parse(&self.user.partner_traits_preference)
    }

    pub fn error_notice(&self) -> Option<&ErrorNotice> {
        self.error.as_ref()
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending
    }

    pub fn is_focus_mode(&self) -> bool {
        self.focus_mode
    }

    pub fn is_shadow_shown(&self) -> bool {
        self.show_shadow
    }

    /// Fraction of the step indicator that is filled: `(step - 1) / (total - 1)`.
    pub fn progress_fraction(&self) -> f64 {
        let total = self.total_steps();
        if total <= 1 {
            return 1.0;
        }
        f64::from(self.step - 1) / f64::from(total - 1)
    }

    /// Title and subtitle of the current step.
    pub fn step_title(&self) -> (&'static str, &'static str) {
        step_title(self.step)
    }

    // ══════════════════════════════════════════════════════════════════
    // Navigation
    // ══════════════════════════════════════════════════════════════════

    /// Leaves the landing screen with the chosen mode on step 1.
    pub fn start(&mut self, mode: PredictionMode) -> Result<(), FormError> {
        self.ensure_screen(Screen::Landing)?;
        self.move_to(Screen::Form)?;
        self.mode = mode;
        self.step = 1;
        Ok(())
    }

    /// Advances one step if every required field on the current step passes.
    ///
    /// On failure the step's required fields are marked touched and the step
    /// does not change.
    ///
    /// # Errors
    ///
    /// - `WrongScreen` outside the form
    /// - `NoSuchStep` on the final step (submit instead)
    /// - `IncompleteStep` listing the failing fields
    pub fn next_step(&mut self) -> Result<u8, FormError> {
        self.ensure_screen(Screen::Form)?;
        if self.is_final_step() {
            return Err(FormError::NoSuchStep(self.step + 1));
        }
        self.validate_current_step()?;
        self.step += 1;
        self.focus_mode = false;
        Ok(self.step)
    }

    /// Goes back one step without validating.
    pub fn previous_step(&mut self) -> Result<u8, FormError> {
        self.ensure_screen(Screen::Form)?;
        if self.step <= 1 {
            return Err(FormError::NoSuchStep(0));
        }
        self.step -= 1;
        self.focus_mode = false;
        Ok(self.step)
    }

    /// Abandons the form from step 1 and returns to a fresh landing screen.
    pub fn cancel(&mut self) -> Result<(), FormError> {
        self.ensure_screen(Screen::Form)?;
        if self.step != 1 {
            return Err(FormError::CancelNotAllowed(self.step));
        }
        self.reset();
        Ok(())
    }

    /// Returns to the landing screen from anywhere, clearing every input,
    /// flag and result. Any outstanding request becomes stale.
    ///
    /// The mode is kept so the landing screen can preselect it.
    pub fn reset(&mut self) {
        let mode = self.mode;
        *self = Self::new();
        self.mode = mode;
    }

    // ══════════════════════════════════════════════════════════════════
    // Field editing
    // ══════════════════════════════════════════════════════════════════

    /// Sets one of the free-text fields.
    ///
    /// # Errors
    ///
    /// - `WrongScreen` outside the form
    /// - `InvalidInput` if `field` is not a free-text field
    pub fn set_text(&mut self, field: FormField, value: impl Into<String>) -> Result<(), FormError> {
        self.ensure_editable()?;
        let value = value.into();
        match field {
            FormField::Name => self.user.name = value,
            FormField::EyeColor => self.user.eye_color = value,
            FormField::FavoriteColor => self.user.favorite_color = value,
            FormField::StressReaction => self.user.stress_reaction = value,
            FormField::PartnerTraitsPreference => self.user.partner_traits_preference = value,
            FormField::AdditionalDetails => self.user.additional_details = value,
            FormField::PartnerName => self.partner.name = value,
            FormField::PartnerGender => self.partner.gender = value,
            FormField::PartnerReligion => self.partner.religion = value,
            FormField::Age | FormField::PartnerAge => {
                self.set_age_input(field, &value)?;
            }
            FormField::Gender | FormField::Zodiac | FormField::GenderPreference => {
                return Err(ValidationError::invalid_format(field.key(), "not a free-text field").into());
            }
        }
        Ok(())
    }

    /// Sets an age from raw keyboard input. Unparsable input stores 0.
    pub fn set_age_input(&mut self, field: FormField, raw: &str) -> Result<i32, FormError> {
        self.ensure_editable()?;
        let age = parse_age_input(raw);
        match field {
            FormField::Age => self.user.age = age,
            FormField::PartnerAge => self.partner.age = age,
            other => {
                return Err(ValidationError::invalid_format(other.key(), "not an age field").into());
            }
        }
        Ok(age)
    }

    pub fn set_gender(&mut self, gender: Gender) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.user.gender = gender;
        Ok(())
    }

    pub fn set_zodiac(&mut self, zodiac: ZodiacSign) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.user.zodiac = zodiac;
        Ok(())
    }

    pub fn set_gender_preference(&mut self, preference: GenderPreference) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.user.gender_preference = preference;
        Ok(())
    }

    pub fn set_slider(&mut self, slider: Slider, value: Percentage) -> Result<(), FormError> {
        self.ensure_editable()?;
        match slider {
            Slider::IntrovertExtrovert => self.user.introvert_extrovert = value,
            Slider::LogicEmotion => self.user.logic_emotion = value,
            Slider::AdventureRoutine => self.user.adventure_routine = value,
        }
        Ok(())
    }

    /// Picks a palette swatch, or "Other" which clears the value for free
    /// text entry.
    pub fn choose_eye_color(&mut self, choice: EyeColorChoice) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.user.eye_color = choice.stored_value().to_string();
        Ok(())
    }

    /// Adds a trait tag.
    ///
    /// Empty input is ignored. Hitting the limit raises the overflow hint for
    /// [`TAG_OVERFLOW_WINDOW`] starting at `now`.
    pub fn add_trait(&mut self, raw: &str, now: Instant) -> Result<(), FormError> {
        self.ensure_editable()?;
        let mut tags = self.trait_tags();
        match tags.add(raw) {
            Ok(()) => {
                self.user.partner_traits_preference = tags.to_joined();
                self.tag_overflow_at = None;
                Ok(())
            }
            Err(TagError::LimitReached) => {
                self.tag_overflow_at = Some(now);
                Ok(())
            }
            Err(TagError::Empty) | Err(TagError::Duplicate(_)) => Ok(()),
        }
    }

    /// Removes a trait tag. Returns whether anything was removed.
    pub fn remove_trait(&mut self, tag: &str) -> Result<bool, FormError> {
        self.ensure_editable()?;
        let mut tags = self.trait_tags();
        let removed = tags.remove(tag);
        if removed {
            self.user.partner_traits_preference = tags.to_joined();
        }
        Ok(removed)
    }

    /// Whether the "maximum traits reached" hint is still showing at `now`.
    pub fn tag_overflow_active(&self, now: Instant) -> bool {
        self.tag_overflow_at
            .map(|at| now.saturating_duration_since(at) < TAG_OVERFLOW_WINDOW)
            .unwrap_or(false)
    }

    pub fn set_focus_mode(&mut self, focused: bool) {
        self.focus_mode = focused && self.screen == Screen::Form;
    }

    // ══════════════════════════════════════════════════════════════════
    // Validation display
    // ══════════════════════════════════════════════════════════════════

    /// Records that the user has left `field`.
    pub fn mark_touched(&mut self, field: FormField) {
        self.touched.insert(field);
    }

    pub fn is_touched(&self, field: FormField) -> bool {
        self.touched.contains(&field)
    }

    pub fn is_field_valid(&self, field: FormField) -> bool {
        field.is_valid(&self.user, &self.partner)
    }

    /// Touched and currently invalid.
    pub fn has_error(&self, field: FormField) -> bool {
        self.is_touched(field) && !self.is_field_valid(field)
    }

    pub fn field_status(&self, field: FormField) -> FieldStatus {
        if self.has_error(field) {
            FieldStatus::Invalid
        } else if self.is_field_valid(field)
            && (self.is_touched(field) || field.has_value(&self.user, &self.partner))
        {
            FieldStatus::Valid
        } else {
            FieldStatus::Neutral
        }
    }

    // ══════════════════════════════════════════════════════════════════
    // Submission
    // ══════════════════════════════════════════════════════════════════

    /// Validates the final step and moves to the loading screen.
    ///
    /// # Errors
    ///
    /// - `RequestInFlight` if a request is already pending
    /// - `WrongScreen` outside the form
    /// - `NoSuchStep` before the final step
    /// - `IncompleteStep` listing the failing fields
    pub fn begin_submission(&mut self) -> Result<SubmissionTicket, FormError> {
        if let Some(id) = self.pending {
            return Err(FormError::RequestInFlight(id));
        }
        self.ensure_screen(Screen::Form)?;
        if !self.is_final_step() {
            return Err(FormError::NoSuchStep(self.total_steps()));
        }
        self.validate_current_step()?;

        self.move_to(Screen::Loading)?;
        self.error = None;
        self.focus_mode = false;

        let id = RequestId::new();
        self.pending = Some(id);

        let request = match self.mode {
            PredictionMode::Archetype => PredictionRequest::Archetype {
                user: self.user.clone(),
            },
            PredictionMode::Measure => PredictionRequest::Measure {
                user: self.user.clone(),
                partner: self.partner.clone(),
            },
        };
        Ok(SubmissionTicket { id, request })
    }

    /// Applies a successful reading for request `id`.
    pub fn complete_submission(&mut self, id: RequestId, result: PredictionResult) -> Result<(), FormError> {
        self.ensure_pending(id)?;
        self.move_to(Screen::Result)?;
        self.pending = None;
        self.result = Some(result);
        self.show_shadow = false;
        Ok(())
    }

    /// Applies a failure for request `id`: back to the form on the same step
    /// with the notice set.
    pub fn fail_submission(&mut self, id: RequestId, notice: ErrorNotice) -> Result<(), FormError> {
        self.ensure_pending(id)?;
        self.move_to(Screen::Form)?;
        self.pending = None;
        self.error = Some(notice);
        Ok(())
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Flips between the light and shadow sides of an archetype reading.
    pub fn toggle_shadow(&mut self) -> Result<bool, FormError> {
        self.ensure_screen(Screen::Result)?;
        match &self.result {
            Some(PredictionResult::Archetype(a)) if a.shadow_profile.is_some() => {
                self.show_shadow = !self.show_shadow;
                Ok(self.show_shadow)
            }
            _ => Err(FormError::NoShadowProfile),
        }
    }

    // ══════════════════════════════════════════════════════════════════
    // Internals
    // ══════════════════════════════════════════════════════════════════

    fn validate_current_step(&mut self) -> Result<(), FormError> {
        let required = required_fields(self.mode, self.step);
        let failing: Vec<FormField> = required
            .iter()
            .copied()
            .filter(|f| !self.is_field_valid(*f))
            .collect();
        if failing.is_empty() {
            return Ok(());
        }
        self.touched.extend(required.iter().copied());
        Err(FormError::IncompleteStep {
            step: self.step,
            fields: failing,
        })
    }

    fn ensure_pending(&self, id: RequestId) -> Result<(), FormError> {
        if self.pending == Some(id) {
            Ok(())
        } else {
            Err(FormError::StaleResponse(id))
        }
    }

    fn ensure_screen(&self, expected: Screen) -> Result<(), FormError> {
        if self.screen == expected {
            Ok(())
        } else {
            Err(FormError::wrong_screen(expected, self.screen))
        }
    }

    fn ensure_editable(&self) -> Result<(), FormError> {
        self.ensure_screen(Screen::Form)
    }

    fn move_to(&mut self, target: Screen) -> Result<(), FormError> {
        self.screen = self
            .screen
            .transition_to(target)
            .map_err(|_| FormError::wrong_screen(target, self.screen))?;
        self.focus_mode = false;
        Ok(())
    }
}
