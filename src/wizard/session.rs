use crate::templates::{ModelEntry, StyleEntry, TemplateDocument};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    #[default]
    SelectModel,
    SelectStyle,
    FillFields,
    ShowOutput,
}

pub const ALL_WIZARD_STEPS: [WizardStep; 4] = [
    WizardStep::SelectModel,
    WizardStep::SelectStyle,
    WizardStep::FillFields,
    WizardStep::ShowOutput,
];

impl WizardStep {
    pub fn index(self) -> usize {
        match self {
            WizardStep::SelectModel => 0,
            WizardStep::SelectStyle => 1,
            WizardStep::FillFields => 2,
            WizardStep::ShowOutput => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WizardStep::SelectModel => "select_model",
            WizardStep::SelectStyle => "select_style",
            WizardStep::FillFields => "fill_fields",
            WizardStep::ShowOutput => "show_output",
        }
    }

    fn previous(self) -> Option<Self> {
        match self {
            WizardStep::SelectModel => None,
            WizardStep::SelectStyle => Some(WizardStep::SelectModel),
            WizardStep::FillFields => Some(WizardStep::SelectStyle),
            WizardStep::ShowOutput => Some(WizardStep::FillFields),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOp {
    ChooseModel,
    ChooseStyle,
    SubmitFields,
    GoBack,
    SetFieldValue,
}

impl SessionOp {
    fn as_str(self) -> &'static str {
        match self {
            SessionOp::ChooseModel => "choose_model",
            SessionOp::ChooseStyle => "choose_style",
            SessionOp::SubmitFields => "submit_fields",
            SessionOp::GoBack => "go_back",
            SessionOp::SetFieldValue => "set_field_value",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardNavError {
    #[error("invalid wizard transition: step={} op={}", .step.as_str(), .op.as_str())]
    InvalidTransition { step: WizardStep, op: SessionOp },
    #[error("{kind} index {index} is out of range ({len} available)")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },
    #[error("field `{name}` is not a dynamic field of the selected style")]
    UnknownField { name: String },
}

/// Mutable state of one wizard run. Only the transition methods mutate it, and
/// a rejected transition leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    step: WizardStep,
    selected_model_index: Option<usize>,
    selected_style_index: Option<usize>,
    field_values: BTreeMap<String, String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn selected_model_index(&self) -> Option<usize> {
        self.selected_model_index
    }

    pub fn selected_style_index(&self) -> Option<usize> {
        self.selected_style_index
    }

    pub fn field_values(&self) -> &BTreeMap<String, String> {
        &self.field_values
    }

    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.field_values.get(name).map(String::as_str)
    }

    pub fn selected_model<'a>(&self, document: &'a TemplateDocument) -> Option<&'a ModelEntry> {
        document.model(self.selected_model_index?)
    }

    pub fn selected_style<'a>(&self, document: &'a TemplateDocument) -> Option<&'a StyleEntry> {
        document.style(self.selected_model_index?, self.selected_style_index?)
    }

    pub fn choose_model(
        &mut self,
        document: &TemplateDocument,
        index: usize,
    ) -> Result<(), WizardNavError> {
        self.expect_step(WizardStep::SelectModel, SessionOp::ChooseModel)?;
        if index >= document.len() {
            return Err(WizardNavError::IndexOutOfRange {
                kind: "model",
                index,
                len: document.len(),
            });
        }
        self.selected_model_index = Some(index);
        self.step = WizardStep::SelectStyle;
        Ok(())
    }

    pub fn choose_style(
        &mut self,
        document: &TemplateDocument,
        index: usize,
    ) -> Result<(), WizardNavError> {
        self.expect_step(WizardStep::SelectStyle, SessionOp::ChooseStyle)?;
        let len = self
            .selected_model(document)
            .map(|model| model.styles.len())
            .unwrap_or(0);
        if index >= len {
            return Err(WizardNavError::IndexOutOfRange {
                kind: "style",
                index,
                len,
            });
        }
        self.selected_style_index = Some(index);
        self.step = WizardStep::FillFields;
        Ok(())
    }

    pub fn submit_fields(&mut self) -> Result<(), WizardNavError> {
        self.expect_step(WizardStep::FillFields, SessionOp::SubmitFields)?;
        self.step = WizardStep::ShowOutput;
        Ok(())
    }

    pub fn go_back(&mut self) -> Result<(), WizardNavError> {
        let previous = self
            .step()
            .previous()
            .ok_or(WizardNavError::InvalidTransition {
                step: self.step(),
                op: SessionOp::GoBack,
            })?;
        self.step = previous;
        Ok(())
    }

    pub fn go_home(&mut self) {
        *self = Self::default();
    }

    pub fn set_field_value(
        &mut self,
        document: &TemplateDocument,
        name: &str,
        value: &str,
    ) -> Result<(), WizardNavError> {
        self.expect_step(WizardStep::FillFields, SessionOp::SetFieldValue)?;
        let known = self.selected_style(document).is_some_and(|style| {
            style
                .positive
                .dynamic_field_names
                .iter()
                .any(|field| field == name)
        });
        if !known {
            return Err(WizardNavError::UnknownField {
                name: name.to_string(),
            });
        }
        self.field_values.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn expect_step(&self, expected: WizardStep, op: SessionOp) -> Result<(), WizardNavError> {
        if self.step() == expected {
            Ok(())
        } else {
            Err(WizardNavError::InvalidTransition {
                step: self.step(),
                op,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::PromptSpec;

    fn document() -> TemplateDocument {
        TemplateDocument::new(vec![
            ModelEntry {
                name: "demo_model".to_string(),
                merge_output: false,
                styles: vec![
                    StyleEntry {
                        name: "vivid".to_string(),
                        positive: PromptSpec::new(&["a photo"], &["subject", "time_of_day"]),
                        negative: PromptSpec::new(&["blurry"], &[]),
                    },
                    StyleEntry {
                        name: "plain".to_string(),
                        positive: PromptSpec::new(&["a sketch"], &[]),
                        negative: PromptSpec::default(),
                    },
                ],
            },
            ModelEntry {
                name: "empty_model".to_string(),
                merge_output: true,
                styles: Vec::new(),
            },
        ])
    }

    #[test]
    fn new_session_starts_cleared_on_model_selection() {
        let session = SessionState::new();
        assert_eq!(session.step(), WizardStep::SelectModel);
        assert_eq!(session.selected_model_index(), None);
        assert_eq!(session.selected_style_index(), None);
        assert!(session.field_values().is_empty());
    }

    #[test]
    fn linear_forward_path_sets_selections() {
        let doc = document();
        let mut session = SessionState::new();
        session.choose_model(&doc, 0).expect("choose model");
        assert_eq!(session.step(), WizardStep::SelectStyle);
        session.choose_style(&doc, 1).expect("choose style");
        assert_eq!(session.step(), WizardStep::FillFields);
        assert_eq!(session.selected_style(&doc).map(|s| s.name.as_str()), Some("plain"));
        session.submit_fields().expect("submit");
        assert_eq!(session.step(), WizardStep::ShowOutput);
    }

    #[test]
    fn out_of_range_choices_leave_state_untouched() {
        let doc = document();
        let mut session = SessionState::new();
        let before = session.clone();
        assert_eq!(
            session.choose_model(&doc, 2),
            Err(WizardNavError::IndexOutOfRange {
                kind: "model",
                index: 2,
                len: 2
            })
        );
        assert_eq!(session, before);

        session.choose_model(&doc, 1).expect("choose empty model");
        let before = session.clone();
        assert!(session.choose_style(&doc, 0).is_err());
        assert_eq!(session, before);
    }

    #[test]
    fn operations_outside_their_step_are_rejected() {
        let doc = document();
        let mut session = SessionState::new();
        assert!(matches!(
            session.choose_style(&doc, 0),
            Err(WizardNavError::InvalidTransition {
                step: WizardStep::SelectModel,
                op: SessionOp::ChooseStyle
            })
        ));
        assert!(session.submit_fields().is_err());
        assert!(session.go_back().is_err());
        assert!(session.set_field_value(&doc, "subject", "x").is_err());
        assert_eq!(session, SessionState::new());

        session.choose_model(&doc, 0).expect("choose model");
        session.choose_style(&doc, 0).expect("choose style");
        session.submit_fields().expect("submit");
        assert!(session.submit_fields().is_err());
        assert!(session.set_field_value(&doc, "subject", "late").is_err());
        assert_eq!(session.step(), WizardStep::ShowOutput);
    }

    #[test]
    fn field_values_survive_back_and_forward() {
        let doc = document();
        let mut session = SessionState::new();
        session.choose_model(&doc, 0).expect("choose model");
        session.choose_style(&doc, 0).expect("choose style");
        session
            .set_field_value(&doc, "time_of_day", "sunset")
            .expect("set field");

        session.go_back().expect("back to styles");
        session.go_back().expect("back to models");
        assert_eq!(session.step(), WizardStep::SelectModel);
        assert_eq!(session.selected_model_index(), Some(0));

        session.choose_model(&doc, 0).expect("choose model again");
        session.choose_style(&doc, 0).expect("choose style again");
        assert_eq!(session.field_value("time_of_day"), Some("sunset"));
    }

    #[test]
    fn set_field_value_rejects_names_outside_positive_dynamic_fields() {
        let doc = document();
        let mut session = SessionState::new();
        session.choose_model(&doc, 0).expect("choose model");
        session.choose_style(&doc, 0).expect("choose style");
        assert_eq!(
            session.set_field_value(&doc, "blurry", "x"),
            Err(WizardNavError::UnknownField {
                name: "blurry".to_string()
            })
        );
        session.set_field_value(&doc, "subject", "a").expect("set");
        session.set_field_value(&doc, "subject", "b").expect("upsert");
        assert_eq!(session.field_value("subject"), Some("b"));
    }

    #[test]
    fn go_home_clears_everything_from_any_step() {
        let doc = document();
        let mut session = SessionState::new();
        session.choose_model(&doc, 0).expect("choose model");
        session.choose_style(&doc, 0).expect("choose style");
        session.set_field_value(&doc, "subject", "a cat").expect("set");
        session.submit_fields().expect("submit");

        session.go_home();
        assert_eq!(session.step(), WizardStep::SelectModel);
        assert_eq!(session.selected_model_index(), None);
        assert_eq!(session.selected_style_index(), None);
        assert!(session.field_values().is_empty());

        session.go_home();
        assert_eq!(session, SessionState::new());
    }

    #[test]
    fn step_indices_follow_declaration_order() {
        let indices: Vec<usize> = ALL_WIZARD_STEPS.iter().map(|step| step.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }
}
