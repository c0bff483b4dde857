//! The working copy of the open step.

use serde::Serialize;
use thiserror::Error;

use crate::enhance::EnhanceTarget;
use crate::models::resume::{
    Certification, Education, Experience, ListItem, Project, ResumeDocument, SectionValue,
    SkillGroup,
};
use crate::wizard::steps::Step;

#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("The {step:?} step cannot hold a '{got}' section")]
    WrongSection { step: Step, got: &'static str },

    #[error("The {0:?} step has no list items")]
    NotAList(Step),

    #[error("Item '{0}' not found in the open step")]
    ItemNotFound(String),
}

/// Uncommitted edits for exactly one step. `value` always holds the section
/// that `step` owns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Draft {
    step: Step,
    value: SectionValue,
}

/// Runs `$body` against the item list of a list section, binding it to
/// `$items`. Personal info has no list.
macro_rules! with_items {
    ($value:expr, $step:expr, |$items:ident| $body:expr) => {
        match $value {
            SectionValue::Experience($items) => $body,
            SectionValue::Education($items) => $body,
            SectionValue::Skills($items) => $body,
            SectionValue::Projects($items) => $body,
            SectionValue::Certifications($items) => $body,
            SectionValue::Languages($items) => $body,
            SectionValue::Personal(_) => Err(DraftError::NotAList($step)),
        }
    };
}

impl Draft {
    /// Starts a draft from the committed section. Empty list sections open
    /// with one blank item to fill in.
    pub fn seed(step: Step, document: &ResumeDocument) -> Self {
        let value = match document.section(step.section_key()) {
            SectionValue::Experience(v) if v.is_empty() => {
                SectionValue::Experience(vec![Experience::blank()])
            }
            SectionValue::Education(v) if v.is_empty() => {
                SectionValue::Education(vec![Education::blank()])
            }
            SectionValue::Skills(v) if v.is_empty() => {
                SectionValue::Skills(vec![SkillGroup::blank()])
            }
            SectionValue::Projects(v) if v.is_empty() => {
                SectionValue::Projects(vec![Project::blank()])
            }
            SectionValue::Certifications(v) if v.is_empty() => {
                SectionValue::Certifications(vec![Certification::blank()])
            }
            other => other,
        };
        Self { step, value }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn value(&self) -> &SectionValue {
        &self.value
    }

    /// Replaces the whole working copy.
    pub fn replace(&mut self, value: SectionValue) -> Result<(), DraftError> {
        if value.key() != self.step.section_key() {
            return Err(DraftError::WrongSection {
                step: self.step,
                got: value.key().as_str(),
            });
        }
        self.value = value;
        Ok(())
    }

    /// Appends a blank item and returns its id.
    pub fn add_item(&mut self) -> Result<String, DraftError> {
        let step = self.step;
        with_items!(&mut self.value, step, |items| Ok(push_blank(items)))
    }

    /// Removes an item. Removing the only item leaves a fresh blank one.
    pub fn remove_item(&mut self, item_id: &str) -> Result<(), DraftError> {
        let step = self.step;
        with_items!(&mut self.value, step, |items| remove_by_id(items, item_id))
    }

    /// Moves an item to `to`, clamped to the end of the list.
    pub fn move_item(&mut self, item_id: &str, to: usize) -> Result<(), DraftError> {
        let step = self.step;
        with_items!(&mut self.value, step, |items| move_by_id(items, item_id, to))
    }

    pub fn contains_item(&self, item_id: &str) -> bool {
        let step = self.step;
        let found: Result<bool, DraftError> = with_items!(&self.value, step, |items| Ok(items
            .iter()
            .any(|i| i.id() == item_id)));
        found.unwrap_or(false)
    }

    /// Current text of an enhancement target, if the target is open in this
    /// draft.
    pub fn target_text(&self, target: &EnhanceTarget) -> Option<String> {
        match (target, &self.value) {
            (EnhanceTarget::Summary, SectionValue::Personal(p)) => Some(p.summary.clone()),
            (EnhanceTarget::ExperienceDescription { item_id }, SectionValue::Experience(v)) => v
                .iter()
                .find(|e| &e.id == item_id)
                .map(|e| e.description.clone()),
            (EnhanceTarget::EducationDescription { item_id }, SectionValue::Education(v)) => v
                .iter()
                .find(|e| &e.id == item_id)
                .map(|e| e.description.clone().unwrap_or_default()),
            (EnhanceTarget::ProjectDescription { item_id }, SectionValue::Projects(v)) => v
                .iter()
                .find(|p| &p.id == item_id)
                .map(|p| p.description.clone()),
            _ => None,
        }
    }

    /// Writes `text` into the target. Returns `false` (and changes nothing)
    /// when the target is no longer open in this draft.
    pub fn apply_text(&mut self, target: &EnhanceTarget, text: &str) -> bool {
        match (target, &mut self.value) {
            (EnhanceTarget::Summary, SectionValue::Personal(p)) => {
                p.summary = text.to_string();
                true
            }
            (EnhanceTarget::ExperienceDescription { item_id }, SectionValue::Experience(v)) => {
                match v.iter_mut().find(|e| &e.id == item_id) {
                    Some(e) => {
                        e.description = text.to_string();
                        true
                    }
                    None => false,
                }
            }
            (EnhanceTarget::EducationDescription { item_id }, SectionValue::Education(v)) => {
                match v.iter_mut().find(|e| &e.id == item_id) {
                    Some(e) => {
                        e.description = Some(text.to_string());
                        true
                    }
                    None => false,
                }
            }
            (EnhanceTarget::ProjectDescription { item_id }, SectionValue::Projects(v)) => {
                match v.iter_mut().find(|p| &p.id == item_id) {
                    Some(p) => {
                        p.description = text.to_string();
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }
}

fn push_blank<T: ListItem>(items: &mut Vec<T>) -> String {
    let item = T::blank();
    let id = item.id().to_string();
    items.push(item);
    id
}

fn remove_by_id<T: ListItem>(items: &mut Vec<T>, item_id: &str) -> Result<(), DraftError> {
    let index = position(items, item_id)?;
    if items.len() == 1 {
        items[0] = T::blank();
    } else {
        items.remove(index);
    }
    Ok(())
}

fn move_by_id<T: ListItem>(items: &mut Vec<T>, item_id: &str, to: usize) -> Result<(), DraftError> {
    let from = position(items, item_id)?;
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
    Ok(())
}

fn position<T: ListItem>(items: &[T], item_id: &str) -> Result<usize, DraftError> {
    items
        .iter()
        .position(|i| i.id() == item_id)
        .ok_or_else(|| DraftError::ItemNotFound(item_id.to_string()))
}
