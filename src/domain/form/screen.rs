//! Top-level screen of an interactive session.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Which screen the session is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Landing,
    Form,
    Loading,
    Result,
}

impl Screen {
    /// Returns true while field edits are accepted.
    pub fn is_editable(&self) -> bool {
        matches!(self, Screen::Form)
    }
}

impl StateMachine for Screen {
    /// Valid transitions:
    /// - Landing -> Form (mode chosen)
    /// - Form -> Loading (submit), Form -> Landing (cancel on step 1)
    /// - Loading -> Result (success), Loading -> Form (failure),
    ///   Loading -> Landing (reset while waiting)
    /// - Result -> Landing (reset)
    fn can_transition_to(&self, target: &Self) -> bool {
        use Screen::*;
        matches!(
            (self, target),
            (Landing, Form)
                | (Form, Loading)
                | (Form, Landing)
                | (Loading, Result)
                | (Loading, Form)
                | (Loading, Landing)
                | (Result, Landing)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use Screen::*;
        match self {
            Landing => vec![Form],
            Form => vec![Loading, Landing],
            Loading => vec![Result, Form, Landing],
            Result => vec![Landing],
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Screen::Landing => "landing",
            Screen::Form => "form",
            Screen::Loading => "loading",
            Screen::Result => "result",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_landing() {
        assert_eq!(Screen::default(), Screen::Landing);
    }

    #[test]
    fn only_form_is_editable() {
        assert!(Screen::Form.is_editable());
        assert!(!Screen::Landing.is_editable());
        assert!(!Screen::Loading.is_editable());
        assert!(!Screen::Result.is_editable());
    }

    #[test]
    fn landing_cannot_jump_to_loading() {
        assert!(Screen::Landing.transition_to(Screen::Loading).is_err());
    }

    #[test]
    fn result_cannot_go_back_to_form() {
        assert!(!Screen::Result.can_transition_to(&Screen::Form));
    }

    #[test]
    fn no_screen_is_terminal() {
        for screen in [Screen::Landing, Screen::Form, Screen::Loading, Screen::Result] {
            assert!(!screen.is_terminal());
        }
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for screen in [Screen::Landing, Screen::Form, Screen::Loading, Screen::Result] {
            for target in screen.valid_transitions() {
                assert!(screen.can_transition_to(&target), "{:?} -> {:?}", screen, target);
            }
        }
    }
}
