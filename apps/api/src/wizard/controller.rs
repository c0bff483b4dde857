use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::resume::{ResumeDocument, SectionKey, SectionValue};
use crate::models::template::TemplateCatalog;
use crate::session::NotificationQueue;
use crate::wizard::draft::{Draft, DraftError};
use crate::wizard::steps::Step;
use crate::wizard::validation::{validate_step, StepValidationError};

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Step index {index} is out of range (0..{total})")]
    StepOutOfRange { index: usize, total: usize },

    #[error("Unknown builder route '{0}'")]
    UnknownRoute(String),

    #[error("Template '{0}' not found")]
    UnknownTemplate(String),

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Validation(#[from] StepValidationError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub current_step_index: usize,
    pub total_steps: usize,
    pub selected_template_id: String,
    pub is_preview_mode: bool,
}

/// What an accepted submission did.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutcome {
    pub committed: SectionKey,
    pub current_step: Step,
    pub entered_preview: bool,
    pub warnings: Vec<String>,
}

/// Wizard state machine plus the committed document and the open step's draft.
#[derive(Debug, Clone)]
pub struct WizardSession {
    state: WizardState,
    document: ResumeDocument,
    draft: Draft,
}

impl WizardSession {
    pub fn new(template_id: &str) -> Self {
        let document = ResumeDocument::default();
        Self {
            state: WizardState {
                current_step_index: 0,
                total_steps: Step::COUNT,
                selected_template_id: template_id.to_string(),
                is_preview_mode: false,
            },
            draft: Draft::seed(Step::Personal, &document),
            document,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn current_step(&self) -> Step {
        match Step::from_index(self.state.current_step_index) {
            Some(step) => step,
            None => unreachable!(
                "step index {} escaped its clamp",
                self.state.current_step_index
            ),
        }
    }

    /// Moves one step forward. A no-op on the last step.
    pub fn advance(&mut self) -> Step {
        let last = self.state.total_steps - 1;
        let next = (self.state.current_step_index + 1).min(last);
        self.enter(next);
        self.current_step()
    }

    /// Moves one step back. A no-op on the first step.
    pub fn retreat(&mut self) -> Step {
        let prev = self.state.current_step_index.saturating_sub(1);
        self.enter(prev);
        self.current_step()
    }

    /// Jumps straight to a step. There is no completion gate.
    pub fn go_to_step(&mut self, index: usize) -> Result<Step, WizardError> {
        if index >= self.state.total_steps {
            return Err(WizardError::StepOutOfRange {
                index,
                total: self.state.total_steps,
            });
        }
        self.enter(index);
        Ok(self.current_step())
    }

    /// Restores the step named by a builder route path.
    pub fn navigate(&mut self, path: &str) -> Result<Step, WizardError> {
        let step =
            Step::from_route_path(path).ok_or_else(|| WizardError::UnknownRoute(path.to_string()))?;
        self.go_to_step(step.index())
    }

    /// Validates the draft and, if accepted, commits it and moves on. On the
    /// last step the index stays put and preview mode switches on.
    ///
    /// A rejection leaves the session untouched apart from one error
    /// notification.
    pub fn submit(
        &mut self,
        notifications: &mut NotificationQueue,
    ) -> Result<SubmitOutcome, StepValidationError> {
        let step = self.current_step();
        let accepted = match validate_step(self.draft.value().clone()) {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(step = ?step, error = %e, "Step submission rejected");
                notifications.error(e.to_string());
                return Err(e);
            }
        };

        let committed = accepted.value.key();
        self.document = self.document.update_section(accepted.value);
        for warning in &accepted.warnings {
            notifications.warning(warning.clone());
        }

        let entered_preview = step.is_last();
        if entered_preview {
            self.state.is_preview_mode = true;
            self.draft = Draft::seed(step, &self.document);
        } else {
            self.advance();
        }
        debug!(step = ?step, section = committed.as_str(), "Step committed");

        Ok(SubmitOutcome {
            committed,
            current_step: self.current_step(),
            entered_preview,
            warnings: accepted.warnings,
        })
    }

    /// Writes a section straight into the document, bypassing step
    /// validation. An open draft for the same section is reseeded.
    pub fn update_section(&mut self, value: SectionValue) {
        let key = value.key();
        self.document = self.document.update_section(value);
        if self.current_step().section_key() == key {
            self.draft = Draft::seed(self.current_step(), &self.document);
        }
    }

    pub fn set_template(
        &mut self,
        template_id: &str,
        catalog: &TemplateCatalog,
    ) -> Result<(), WizardError> {
        if !catalog.contains(template_id) {
            return Err(WizardError::UnknownTemplate(template_id.to_string()));
        }
        self.state.selected_template_id = template_id.to_string();
        Ok(())
    }

    pub fn toggle_preview(&mut self) -> bool {
        self.state.is_preview_mode = !self.state.is_preview_mode;
        self.state.is_preview_mode
    }

    /// Fresh document back on the first step. The selected template stays.
    pub fn reset(&mut self) {
        self.document = ResumeDocument::default();
        self.state.current_step_index = 0;
        self.state.is_preview_mode = false;
        self.draft = Draft::seed(Step::Personal, &self.document);
    }

    /// Re-entering the open step keeps its draft.
    fn enter(&mut self, index: usize) {
        if index == self.state.current_step_index {
            return;
        }
        self.state.current_step_index = index;
        self.draft = Draft::seed(self.current_step(), &self.document);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Experience, Language, Personal};
    use crate::models::template::DEFAULT_TEMPLATE_ID;
    use crate::session::notifications::NotificationLevel;
    use crate::wizard::validation::MISSING_TITLE_WARNING;

    fn session() -> WizardSession {
        WizardSession::new(DEFAULT_TEMPLATE_ID)
    }

    fn fill_personal(wizard: &mut WizardSession, title: &str) {
        wizard
            .draft_mut()
            .replace(SectionValue::Personal(Personal {
                name: "Jane Doe".to_string(),
                title: title.to_string(),
                email: "jane@example.com".to_string(),
                ..Default::default()
            }))
            .unwrap();
    }

    #[test]
    fn test_new_session_starts_at_first_step() {
        let wizard = session();
        assert_eq!(wizard.state().current_step_index, 0);
        assert_eq!(wizard.state().total_steps, 6);
        assert_eq!(wizard.state().selected_template_id, "modern-1");
        assert!(!wizard.state().is_preview_mode);
        assert_eq!(wizard.draft().step(), Step::Personal);
    }

    #[test]
    fn test_advance_is_pinned_at_last_step() {
        let mut wizard = session();
        for _ in 0..10 {
            wizard.advance();
        }
        assert_eq!(wizard.state().current_step_index, 5);
        assert_eq!(wizard.current_step(), Step::Certifications);
    }

    #[test]
    fn test_retreat_is_pinned_at_zero() {
        let mut wizard = session();
        wizard.retreat();
        wizard.retreat();
        assert_eq!(wizard.state().current_step_index, 0);
    }

    #[test]
    fn test_go_to_step_has_no_gate() {
        let mut wizard = session();
        assert_eq!(wizard.go_to_step(4).unwrap(), Step::Projects);
        assert_eq!(wizard.draft().step(), Step::Projects);
        assert!(matches!(
            wizard.go_to_step(6),
            Err(WizardError::StepOutOfRange { index: 6, total: 6 })
        ));
        assert_eq!(wizard.state().current_step_index, 4);
    }

    #[test]
    fn test_navigate_restores_step_from_route() {
        let mut wizard = session();
        assert_eq!(wizard.navigate("/builder/skills").unwrap(), Step::Skills);
        assert_eq!(wizard.navigate("/builder").unwrap(), Step::Personal);
        assert!(matches!(
            wizard.navigate("/builder/hobbies"),
            Err(WizardError::UnknownRoute(_))
        ));
    }

    #[test]
    fn test_rejected_submit_leaves_state_unchanged() {
        let mut wizard = session();
        let mut notifications = NotificationQueue::default();
        wizard.go_to_step(1).unwrap();
        wizard
            .draft_mut()
            .replace(SectionValue::Experience(vec![Experience {
                id: "e1".to_string(),
                title: "Engineer".to_string(),
                start_date: "2020-01".to_string(),
                ..Default::default()
            }]))
            .unwrap();
        let before_doc = wizard.document().clone();
        let before_state = wizard.state().clone();

        let err = wizard.submit(&mut notifications).unwrap_err();

        assert_eq!(err, StepValidationError::NoValidExperience);
        assert_eq!(wizard.document(), &before_doc);
        assert_eq!(wizard.state(), &before_state);
        assert_eq!(notifications.count(NotificationLevel::Error), 1);
        assert_eq!(notifications.len(), 1);
    }

    #[test]
    fn test_accepted_submit_commits_and_advances() {
        let mut wizard = session();
        let mut notifications = NotificationQueue::default();
        fill_personal(&mut wizard, "Engineer");

        let outcome = wizard.submit(&mut notifications).unwrap();

        assert_eq!(outcome.committed, SectionKey::Personal);
        assert_eq!(outcome.current_step, Step::Experience);
        assert_eq!(wizard.document().personal.name, "Jane Doe");
        assert_eq!(wizard.draft().step(), Step::Experience);
        assert!(notifications.is_empty());
    }

    #[test]
    fn test_submit_without_title_warns() {
        let mut wizard = session();
        let mut notifications = NotificationQueue::default();
        fill_personal(&mut wizard, "");

        let outcome = wizard.submit(&mut notifications).unwrap();

        assert_eq!(outcome.warnings, vec![MISSING_TITLE_WARNING.to_string()]);
        assert_eq!(notifications.count(NotificationLevel::Warning), 1);
    }

    #[test]
    fn test_submit_on_last_step_enters_preview() {
        let mut wizard = session();
        let mut notifications = NotificationQueue::default();
        wizard.go_to_step(5).unwrap();

        let outcome = wizard.submit(&mut notifications).unwrap();

        assert!(outcome.entered_preview);
        assert_eq!(wizard.state().current_step_index, 5);
        assert!(wizard.state().is_preview_mode);
    }

    #[test]
    fn test_back_navigation_discards_draft() {
        let mut wizard = session();
        fill_personal(&mut wizard, "Engineer");
        wizard.advance();
        wizard.retreat();
        match wizard.draft().value() {
            SectionValue::Personal(p) => assert!(p.name.is_empty()),
            other => panic!("unexpected section {:?}", other.key()),
        }
        assert!(wizard.document().personal.name.is_empty());
    }

    #[test]
    fn test_update_languages_section_commits_directly() {
        let mut wizard = session();
        wizard.update_section(SectionValue::Languages(vec![Language {
            id: "l1".to_string(),
            name: "French".to_string(),
            ..Default::default()
        }]));
        assert_eq!(wizard.document().languages.len(), 1);
        assert_eq!(wizard.draft().step(), Step::Personal);
    }

    #[test]
    fn test_set_template_rejects_unknown() {
        let mut wizard = session();
        let catalog = TemplateCatalog::builtin();
        wizard.set_template("creative-1", &catalog).unwrap();
        assert_eq!(wizard.state().selected_template_id, "creative-1");
        assert!(matches!(
            wizard.set_template("retro-9", &catalog),
            Err(WizardError::UnknownTemplate(_))
        ));
        assert_eq!(wizard.state().selected_template_id, "creative-1");
    }

    #[test]
    fn test_reset_keeps_template() {
        let mut wizard = session();
        let mut notifications = NotificationQueue::default();
        wizard
            .set_template("classic-1", &TemplateCatalog::builtin())
            .unwrap();
        fill_personal(&mut wizard, "Engineer");
        wizard.submit(&mut notifications).unwrap();
        wizard.toggle_preview();

        wizard.reset();

        assert_eq!(wizard.document(), &ResumeDocument::default());
        assert_eq!(wizard.state().current_step_index, 0);
        assert!(!wizard.state().is_preview_mode);
        assert_eq!(wizard.state().selected_template_id, "classic-1");
    }

    #[test]
    fn test_toggle_preview() {
        let mut wizard = session();
        assert!(wizard.toggle_preview());
        assert!(!wizard.toggle_preview());
    }
}
