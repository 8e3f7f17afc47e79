use super::controller::WizardController;
use super::session::WizardStep;
use crate::templates::display_label;
use std::time::Instant;

const SELECT_MODEL_TITLE: &str = "Select Model";
const SELECT_MODEL_HINT: &str = "Up/Down move | Enter select | r reload | Esc quit";
const SELECT_STYLE_TITLE: &str = "Choose Aesthetic";
const SELECT_STYLE_SUBTITLE: &str = "Define the visual direction of your generation.";
const SELECT_STYLE_HINT: &str = "Up/Down move | Enter select | Esc back | Home start over";
const FILL_FIELDS_TITLE: &str = "Fine-tune Details";
const FILL_FIELDS_SUBTITLE: &str = "Leave fields blank to skip specific parameters.";
const FILL_FIELDS_HINT: &str = "Type to edit | Tab/Up/Down field | Enter generate | Esc back";
const SHOW_OUTPUT_TITLE: &str = "Your Prompt";
const SHOW_OUTPUT_HINT: &str =
    "Up/Down block | PgUp/PgDn scroll | c copy | Esc back | Home start over";

pub const SUBMIT_LABEL: &str = "Generate Prompt";
pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied";
pub const MODEL_CARD_DESCRIPTION: &str = "Select to continue";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInputRow {
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPanel {
    pub label: String,
    pub text: String,
    pub copy_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardBody {
    Choices {
        items: Vec<String>,
        description: Option<&'static str>,
        selected: usize,
    },
    Fields {
        rows: Vec<FieldInputRow>,
        focused: usize,
        submit_label: &'static str,
    },
    Output {
        panels: Vec<OutputPanel>,
        merged: bool,
        selected: usize,
        scroll: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardViewModel {
    pub title: &'static str,
    pub subtitle: Option<&'static str>,
    pub step_line: String,
    pub back_visible: bool,
    pub body: WizardBody,
    pub hint_text: &'static str,
}

pub fn project_wizard_view_model(controller: &WizardController, now: Instant) -> WizardViewModel {
    let step = controller.step();
    let (title, subtitle, hint_text) = match step {
        WizardStep::SelectModel => (SELECT_MODEL_TITLE, None, SELECT_MODEL_HINT),
        WizardStep::SelectStyle => (
            SELECT_STYLE_TITLE,
            Some(SELECT_STYLE_SUBTITLE),
            SELECT_STYLE_HINT,
        ),
        WizardStep::FillFields => (
            FILL_FIELDS_TITLE,
            Some(FILL_FIELDS_SUBTITLE),
            FILL_FIELDS_HINT,
        ),
        WizardStep::ShowOutput => (SHOW_OUTPUT_TITLE, None, SHOW_OUTPUT_HINT),
    };
    WizardViewModel {
        title,
        subtitle,
        step_line: step_line(controller),
        back_visible: step != WizardStep::SelectModel,
        body: project_body(controller, now),
        hint_text,
    }
}

fn step_line(controller: &WizardController) -> String {
    let document = controller.document();
    let session = controller.session();
    let mut parts = vec![format!("Step {}/4", controller.step().index() + 1)];
    if controller.step() != WizardStep::SelectModel {
        if let Some(model) = session.selected_model(document) {
            parts.push(display_label(&model.name));
        }
    }
    if controller.step() >= WizardStep::FillFields {
        if let Some(style) = session.selected_style(document) {
            parts.push(style.name.clone());
        }
    }
    parts.join(" > ")
}

fn project_body(controller: &WizardController, now: Instant) -> WizardBody {
    let document = controller.document();
    let session = controller.session();
    match controller.step() {
        WizardStep::SelectModel => WizardBody::Choices {
            items: document
                .models
                .iter()
                .map(|model| display_label(&model.name))
                .collect(),
            description: Some(MODEL_CARD_DESCRIPTION),
            selected: controller.cursor(),
        },
        WizardStep::SelectStyle => WizardBody::Choices {
            items: session
                .selected_model(document)
                .map(|model| model.styles.iter().map(|style| style.name.clone()).collect())
                .unwrap_or_default(),
            description: None,
            selected: controller.cursor(),
        },
        WizardStep::FillFields => WizardBody::Fields {
            rows: controller
                .field_names()
                .iter()
                .map(|name| {
                    let label = display_label(name);
                    FieldInputRow {
                        name: name.clone(),
                        placeholder: format!("Enter {label}..."),
                        label,
                        value: session.field_value(name).unwrap_or_default().to_string(),
                    }
                })
                .collect(),
            focused: controller.cursor(),
            submit_label: SUBMIT_LABEL,
        },
        WizardStep::ShowOutput => {
            let prompt = controller.assembled();
            WizardBody::Output {
                merged: prompt.as_ref().is_some_and(|prompt| prompt.merge_output),
                panels: prompt
                    .map(|prompt| prompt.blocks)
                    .unwrap_or_default()
                    .into_iter()
                    .enumerate()
                    .map(|(idx, block)| OutputPanel {
                        label: block.label,
                        text: block.text,
                        copy_label: if controller.copy_confirmed(idx, now) {
                            COPIED_LABEL
                        } else {
                            COPY_LABEL
                        },
                    })
                    .collect(),
                selected: controller.cursor(),
                scroll: controller.output_scroll(),
            }
        }
    }
}

pub fn tail_for_display(value: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max_chars {
        return value.to_string();
    }
    chars[chars.len() - max_chars..].iter().collect()
}
