use crate::templates::{ModelEntry, PromptSpec, StyleEntry};
use std::collections::BTreeMap;

pub const LINE_SEPARATOR: &str = ",\n";
pub const NEGATION_PREFIX: &str = "no ";

pub const FULL_PROMPT_LABEL: &str = "Full Prompt";
pub const POSITIVE_PROMPT_LABEL: &str = "Positive Prompt";
pub const NEGATIVE_PROMPT_LABEL: &str = "Negative Prompt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBlock {
    pub label: String,
    pub text: String,
}

impl OutputBlock {
    fn new(label: &str, text: String) -> Self {
        Self {
            label: label.to_string(),
            text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPrompt {
    pub merge_output: bool,
    pub blocks: Vec<OutputBlock>,
}

impl AssembledPrompt {
    /// Plain-text rendering used by the headless commands.
    pub fn render_plain(&self) -> String {
        self.blocks
            .iter()
            .map(|block| format!("[{}]\n{}", block.label, block.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Builds the output blocks for a model/style pair from the captured field values.
///
/// Fixed fragments come first in document order, followed by the trimmed value of
/// each positive dynamic field that is present and non-blank. Negative prompts only
/// ever carry their fixed fragments.
pub fn assemble_prompt(
    model: &ModelEntry,
    style: &StyleEntry,
    field_values: &BTreeMap<String, String>,
) -> AssembledPrompt {
    let positive_text = join_lines(&positive_lines(&style.positive, field_values));
    let negative_text = join_lines(&style.negative.fixed);

    let blocks = if model.merge_output {
        vec![OutputBlock::new(
            FULL_PROMPT_LABEL,
            format!("{positive_text}{LINE_SEPARATOR}{NEGATION_PREFIX}{negative_text}"),
        )]
    } else {
        vec![
            OutputBlock::new(POSITIVE_PROMPT_LABEL, positive_text),
            OutputBlock::new(NEGATIVE_PROMPT_LABEL, negative_text),
        ]
    };

    AssembledPrompt {
        merge_output: model.merge_output,
        blocks,
    }
}

fn positive_lines(spec: &PromptSpec, field_values: &BTreeMap<String, String>) -> Vec<String> {
    let mut lines = spec.fixed.clone();
    lines.extend(
        spec.dynamic_field_names
            .iter()
            .filter_map(|name| field_values.get(name))
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string),
    );
    lines
}

fn join_lines(lines: &[String]) -> String {
    lines.join(LINE_SEPARATOR)
}
