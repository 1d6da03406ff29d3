//! Session — the application state one client drives, and the only legal ways to change it.
//!
//! `Session::apply` is pure: it takes the current state and an event and returns
//! the next state, or a `SessionError` for a transition that is not allowed.
//! Handlers hold the lock only long enough to swap in the result.

pub mod handlers;

use serde::Serialize;
use thiserror::Error;

use crate::reply::models::{GeneratedResponse, RefinedReply, ReviewInput};
use crate::setup::models::MerchantConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Setup,
    Main,
}

/// Sub-state of the main screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Generating,
    Ready { response: GeneratedResponse },
    Refining { response: GeneratedResponse },
    Failed { message: String },
}

#[derive(Debug, Clone)]
pub enum Event {
    ConfigSubmitted(MerchantConfig),
    EditSettings,
    ConfigCleared,
    GenerationStarted(ReviewInput),
    GenerationSucceeded(GeneratedResponse),
    GenerationFailed(String),
    RefineStarted,
    RefineSucceeded(RefinedReply),
    RefineFailed,
    Reset,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("expected the {expected:?} screen, currently on {actual:?}")]
    WrongScreen { expected: Screen, actual: Screen },

    #[error("a reply is already being generated")]
    Busy,

    #[error("no generation is in flight")]
    NotInFlight,

    #[error("no generated response is displayed")]
    NoResponse,

    #[error("setup has not been completed")]
    NotConfigured,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub screen: Screen,
    /// Config in use on the main screen. Set only by a valid setup submission.
    pub config: Option<MerchantConfig>,
    /// Persisted copy, used to prefill the setup form.
    pub saved: Option<MerchantConfig>,
    pub review: ReviewInput,
    pub phase: Phase,
}

impl Session {
    pub fn new(saved: Option<MerchantConfig>) -> Self {
        Session {
            screen: Screen::Setup,
            config: None,
            saved,
            review: ReviewInput::default(),
            phase: Phase::Idle,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Generating | Phase::Refining { .. })
    }

    /// The response currently on screen, if any.
    pub fn response(&self) -> Option<&GeneratedResponse> {
        match &self.phase {
            Phase::Ready { response } | Phase::Refining { response } => Some(response),
            _ => None,
        }
    }

    pub fn apply(&self, event: Event) -> Result<Session, SessionError> {
        let mut next = self.clone();

        match event {
            Event::ConfigSubmitted(config) => {
                self.expect_screen(Screen::Setup)?;
                next.saved = Some(config.clone());
                next.config = Some(config);
                next.screen = Screen::Main;
            }
            Event::EditSettings => {
                self.expect_screen(Screen::Main)?;
                self.expect_not_busy()?;
                next.screen = Screen::Setup;
            }
            Event::ConfigCleared => {
                self.expect_screen(Screen::Setup)?;
                next.config = None;
                next.saved = None;
            }
            Event::GenerationStarted(review) => {
                self.expect_screen(Screen::Main)?;
                self.expect_not_busy()?;
                if self.config.is_none() {
                    return Err(SessionError::NotConfigured);
                }
                next.review = review;
                // the previous result is discarded as soon as a new one is requested
                next.phase = Phase::Generating;
            }
            Event::GenerationSucceeded(response) => match self.phase {
                Phase::Generating => next.phase = Phase::Ready { response },
                _ => return Err(SessionError::NotInFlight),
            },
            Event::GenerationFailed(message) => match self.phase {
                Phase::Generating => next.phase = Phase::Failed { message },
                _ => return Err(SessionError::NotInFlight),
            },
            Event::RefineStarted => {
                self.expect_screen(Screen::Main)?;
                match &self.phase {
                    Phase::Ready { response } => {
                        next.phase = Phase::Refining {
                            response: response.clone(),
                        }
                    }
                    Phase::Generating | Phase::Refining { .. } => return Err(SessionError::Busy),
                    Phase::Idle | Phase::Failed { .. } => return Err(SessionError::NoResponse),
                }
            }
            Event::RefineSucceeded(refined) => match &self.phase {
                Phase::Refining { response } => {
                    next.phase = Phase::Ready {
                        response: response.with_refined(refined),
                    }
                }
                _ => return Err(SessionError::NotInFlight),
            },
            Event::RefineFailed => match &self.phase {
                Phase::Refining { response } => {
                    next.phase = Phase::Ready {
                        response: response.clone(),
                    }
                }
                _ => return Err(SessionError::NotInFlight),
            },
            Event::Reset => {
                self.expect_screen(Screen::Main)?;
                self.expect_not_busy()?;
                next.review = ReviewInput::default();
                next.phase = Phase::Idle;
            }
        }

        Ok(next)
    }

    fn expect_screen(&self, expected: Screen) -> Result<(), SessionError> {
        if self.screen == expected {
            Ok(())
        } else {
            Err(SessionError::WrongScreen {
                expected,
                actual: self.screen,
            })
        }
    }

    fn expect_not_busy(&self) -> Result<(), SessionError> {
        if self.is_busy() {
            Err(SessionError::Busy)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::models::StarRating;

    fn config() -> MerchantConfig {
        MerchantConfig {
            app_name: "HızlıGetir".to_string(),
            features: "7/24 destek".to_string(),
            email: String::new(),
            campaign: String::new(),
        }
    }

    fn response() -> GeneratedResponse {
        GeneratedResponse {
            translation: "Harika".to_string(),
            original_language_reply: "Thanks! 💜".to_string(),
            turkish_reply: "Teşekkürler! 💜".to_string(),
            detected_language: "English".to_string(),
        }
    }

    fn review() -> ReviewInput {
        ReviewInput {
            comment: "Great app".to_string(),
            star_rating: StarRating::try_from(2).unwrap(),
            note: "sipariş no sor".to_string(),
        }
    }

    fn main_session() -> Session {
        Session::new(None)
            .apply(Event::ConfigSubmitted(config()))
            .unwrap()
    }

    fn ready_session() -> Session {
        main_session()
            .apply(Event::GenerationStarted(review()))
            .unwrap()
            .apply(Event::GenerationSucceeded(response()))
            .unwrap()
    }

    #[test]
    fn test_new_session_starts_on_setup() {
        let session = Session::new(Some(config()));
        assert_eq!(session.screen, Screen::Setup);
        assert!(session.config.is_none());
        assert_eq!(session.saved, Some(config()));
        assert_eq!(session.phase, Phase::Idle);
    }

    #[test]
    fn test_config_submission_moves_to_main() {
        let session = main_session();
        assert_eq!(session.screen, Screen::Main);
        assert_eq!(session.config, Some(config()));
        assert_eq!(session.saved, Some(config()));
    }

    #[test]
    fn test_generation_cycle() {
        let generating = main_session()
            .apply(Event::GenerationStarted(review()))
            .unwrap();
        assert_eq!(generating.phase, Phase::Generating);
        assert_eq!(generating.review, review());
        assert!(generating.is_busy());

        let ready = generating
            .apply(Event::GenerationSucceeded(response()))
            .unwrap();
        assert_eq!(ready.response(), Some(&response()));
    }

    #[test]
    fn test_second_trigger_while_generating_is_busy() {
        let generating = main_session()
            .apply(Event::GenerationStarted(review()))
            .unwrap();
        assert_eq!(
            generating.apply(Event::GenerationStarted(review())),
            Err(SessionError::Busy)
        );
    }

    #[test]
    fn test_new_generation_discards_previous_result() {
        let generating = ready_session()
            .apply(Event::GenerationStarted(review()))
            .unwrap();
        assert!(generating.response().is_none());
    }

    #[test]
    fn test_failure_leaves_no_result() {
        let failed = ready_session()
            .apply(Event::GenerationStarted(review()))
            .unwrap()
            .apply(Event::GenerationFailed("hata".to_string()))
            .unwrap();
        assert_eq!(
            failed.phase,
            Phase::Failed {
                message: "hata".to_string()
            }
        );
        assert!(failed.response().is_none());
    }

    #[test]
    fn test_generation_requires_main_screen() {
        let err = Session::new(None)
            .apply(Event::GenerationStarted(review()))
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::WrongScreen {
                expected: Screen::Main,
                actual: Screen::Setup
            }
        );
    }

    #[test]
    fn test_result_without_call_in_flight_is_rejected() {
        assert_eq!(
            main_session().apply(Event::GenerationSucceeded(response())),
            Err(SessionError::NotInFlight)
        );
    }

    #[test]
    fn test_reset_is_idempotent() {
        let once = ready_session().apply(Event::Reset).unwrap();
        let twice = once.apply(Event::Reset).unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.review.comment, "");
        assert_eq!(twice.review.note, "");
        assert_eq!(twice.review.star_rating.value(), 5);
        assert_eq!(twice.phase, Phase::Idle);
    }

    #[test]
    fn test_reset_from_failed_returns_to_idle() {
        let reset = main_session()
            .apply(Event::GenerationStarted(review()))
            .unwrap()
            .apply(Event::GenerationFailed("hata".to_string()))
            .unwrap()
            .apply(Event::Reset)
            .unwrap();
        assert_eq!(reset.phase, Phase::Idle);
    }

    #[test]
    fn test_reset_while_generating_is_busy() {
        let generating = main_session()
            .apply(Event::GenerationStarted(review()))
            .unwrap();
        assert_eq!(generating.apply(Event::Reset), Err(SessionError::Busy));
    }

    #[test]
    fn test_refine_merges_replies() {
        let refined = ready_session()
            .apply(Event::RefineStarted)
            .unwrap()
            .apply(Event::RefineSucceeded(RefinedReply {
                original_language_reply: "Thank you! 💜".to_string(),
                turkish_reply: "Çok teşekkürler! 💜".to_string(),
            }))
            .unwrap();
        let response = refined.response().unwrap();
        assert_eq!(response.translation, "Harika");
        assert_eq!(response.original_language_reply, "Thank you! 💜");
        assert!(matches!(refined.phase, Phase::Ready { .. }));
    }

    #[test]
    fn test_refine_failure_keeps_result() {
        let after = ready_session()
            .apply(Event::RefineStarted)
            .unwrap()
            .apply(Event::RefineFailed)
            .unwrap();
        assert_eq!(after.response(), Some(&response()));
    }

    #[test]
    fn test_refine_needs_a_result() {
        assert_eq!(
            main_session().apply(Event::RefineStarted),
            Err(SessionError::NoResponse)
        );
    }

    #[test]
    fn test_edit_settings_keeps_config_and_result() {
        let setup = ready_session().apply(Event::EditSettings).unwrap();
        assert_eq!(setup.screen, Screen::Setup);
        assert_eq!(setup.config, Some(config()));
        assert!(setup.response().is_some());
    }

    #[test]
    fn test_clear_drops_config_only_on_setup() {
        assert!(matches!(
            main_session().apply(Event::ConfigCleared),
            Err(SessionError::WrongScreen { .. })
        ));

        let cleared = main_session()
            .apply(Event::EditSettings)
            .unwrap()
            .apply(Event::ConfigCleared)
            .unwrap();
        assert!(cleared.config.is_none());
        assert!(cleared.saved.is_none());
    }

    #[test]
    fn test_phase_serializes_with_state_tag() {
        let json = serde_json::to_value(&Phase::Generating).unwrap();
        assert_eq!(json, serde_json::json!({"state": "generating"}));

        let json = serde_json::to_value(&Phase::Failed {
            message: "hata".to_string(),
        })
        .unwrap();
        assert_eq!(json["state"], "failed");
        assert_eq!(json["message"], "hata");
    }
}
