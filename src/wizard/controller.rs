use super::assemble::{assemble_prompt, AssembledPrompt, OutputBlock};
use super::navigation::WizardAction;
use super::session::{SessionState, WizardNavError, WizardStep};
use crate::shared::{ClipboardError, ClipboardWriter};
use crate::templates::TemplateDocument;
use std::time::{Duration, Instant};

pub const COPY_CONFIRMATION: Duration = Duration::from_secs(2);
pub const OUTPUT_SCROLL_STEP: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEffect {
    None,
    CopySelected,
    Reload,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CopyFeedback {
    block: usize,
    expires_at: Instant,
}

/// Owns the loaded document and the session for one wizard run, plus the
/// cursor that picks rows, fields, or output blocks on the current step.
#[derive(Debug, Clone)]
pub struct WizardController {
    document: TemplateDocument,
    session: SessionState,
    cursor: usize,
    output_scroll: usize,
    copy_feedback: Option<CopyFeedback>,
}

impl WizardController {
    pub fn new(document: TemplateDocument) -> Self {
        Self {
            document,
            session: SessionState::new(),
            cursor: 0,
            output_scroll: 0,
            copy_feedback: None,
        }
    }

    pub fn document(&self) -> &TemplateDocument {
        &self.document
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn step(&self) -> WizardStep {
        self.session.step()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Lines scrolled past at the top of the selected output block.
    pub fn output_scroll(&self) -> usize {
        self.output_scroll
    }

    /// Installs a freshly loaded document. Indices from the old document are
    /// meaningless afterwards, so the session starts over.
    pub fn replace_document(&mut self, document: TemplateDocument) {
        self.document = document;
        self.go_home();
    }

    pub fn go_home(&mut self) {
        self.session.go_home();
        self.cursor = 0;
        self.output_scroll = 0;
        self.copy_feedback = None;
    }

    pub fn item_count(&self) -> usize {
        match self.step() {
            WizardStep::SelectModel => self.document.len(),
            WizardStep::SelectStyle => self
                .session
                .selected_model(&self.document)
                .map(|model| model.styles.len())
                .unwrap_or(0),
            WizardStep::FillFields => self.field_names().len(),
            WizardStep::ShowOutput => self
                .assembled()
                .map(|prompt| prompt.blocks.len())
                .unwrap_or(0),
        }
    }

    pub fn field_names(&self) -> &[String] {
        self.session
            .selected_style(&self.document)
            .map(|style| style.positive.dynamic_field_names.as_slice())
            .unwrap_or(&[])
    }

    pub fn focused_field(&self) -> Option<&str> {
        if self.step() != WizardStep::FillFields {
            return None;
        }
        self.field_names().get(self.cursor).map(String::as_str)
    }

    pub fn assembled(&self) -> Option<AssembledPrompt> {
        if self.step() != WizardStep::ShowOutput {
            return None;
        }
        let model = self.session.selected_model(&self.document)?;
        let style = self.session.selected_style(&self.document)?;
        Some(assemble_prompt(model, style, self.session.field_values()))
    }

    pub fn selected_block(&self) -> Option<OutputBlock> {
        self.assembled()?.blocks.into_iter().nth(self.cursor)
    }

    pub fn choose_model(&mut self, index: usize) -> Result<(), WizardNavError> {
        self.session.choose_model(&self.document, index)?;
        self.cursor = self.session.selected_style_index().unwrap_or(0);
        self.clamp_cursor();
        Ok(())
    }

    pub fn choose_style(&mut self, index: usize) -> Result<(), WizardNavError> {
        self.session.choose_style(&self.document, index)?;
        self.cursor = 0;
        Ok(())
    }

    pub fn submit_fields(&mut self) -> Result<(), WizardNavError> {
        self.session.submit_fields()?;
        self.cursor = 0;
        self.output_scroll = 0;
        self.copy_feedback = None;
        Ok(())
    }

    pub fn go_back(&mut self) -> Result<(), WizardNavError> {
        self.session.go_back()?;
        self.cursor = match self.step() {
            WizardStep::SelectModel => self.session.selected_model_index().unwrap_or(0),
            WizardStep::SelectStyle => self.session.selected_style_index().unwrap_or(0),
            WizardStep::FillFields | WizardStep::ShowOutput => 0,
        };
        self.output_scroll = 0;
        self.copy_feedback = None;
        self.clamp_cursor();
        Ok(())
    }

    pub fn set_field_value(&mut self, name: &str, value: &str) -> Result<(), WizardNavError> {
        self.session.set_field_value(&self.document, name, value)
    }

    /// Applies one user action. Rejected transitions come back as errors and
    /// leave both the session and the cursor untouched.
    pub fn apply_action(&mut self, action: WizardAction) -> Result<WizardEffect, WizardNavError> {
        match action {
            WizardAction::Quit => return Ok(WizardEffect::Quit),
            WizardAction::Home => {
                self.go_home();
                return Ok(WizardEffect::None);
            }
            WizardAction::Back => {
                self.go_back()?;
                return Ok(WizardEffect::None);
            }
            WizardAction::MovePrev => {
                self.cursor = self.cursor.saturating_sub(1);
                self.output_scroll = 0;
                return Ok(WizardEffect::None);
            }
            WizardAction::MoveNext => {
                let max_index = self.item_count().saturating_sub(1);
                self.cursor = std::cmp::min(self.cursor + 1, max_index);
                self.output_scroll = 0;
                return Ok(WizardEffect::None);
            }
            WizardAction::ScrollUp => {
                self.output_scroll = self.output_scroll.saturating_sub(OUTPUT_SCROLL_STEP);
                return Ok(WizardEffect::None);
            }
            WizardAction::ScrollDown => {
                let last_line = self
                    .selected_block()
                    .map(|block| block.text.lines().count().saturating_sub(1))
                    .unwrap_or(0);
                self.output_scroll =
                    std::cmp::min(self.output_scroll + OUTPUT_SCROLL_STEP, last_line);
                return Ok(WizardEffect::None);
            }
            _ => {}
        }

        match self.step() {
            WizardStep::SelectModel | WizardStep::SelectStyle => match action {
                WizardAction::Enter if self.step() == WizardStep::SelectModel => {
                    self.choose_model(self.cursor)?;
                    Ok(WizardEffect::None)
                }
                WizardAction::Enter => {
                    self.choose_style(self.cursor)?;
                    Ok(WizardEffect::None)
                }
                WizardAction::Reload => Ok(WizardEffect::Reload),
                _ => Ok(WizardEffect::None),
            },
            WizardStep::FillFields => match action {
                WizardAction::Enter => {
                    self.submit_fields()?;
                    Ok(WizardEffect::None)
                }
                WizardAction::Input(ch) => {
                    self.edit_focused_field(|value| value.push(ch))?;
                    Ok(WizardEffect::None)
                }
                WizardAction::DeleteChar => {
                    self.edit_focused_field(|value| {
                        value.pop();
                    })?;
                    Ok(WizardEffect::None)
                }
                _ => Ok(WizardEffect::None),
            },
            WizardStep::ShowOutput => match action {
                WizardAction::Enter | WizardAction::Copy => Ok(WizardEffect::CopySelected),
                WizardAction::Reload => Ok(WizardEffect::Reload),
                _ => Ok(WizardEffect::None),
            },
        }
    }

    /// Writes the selected output block to the clipboard. Only a successful
    /// write starts the confirmation window.
    pub fn copy_selected(
        &mut self,
        clipboard: &mut dyn ClipboardWriter,
        now: Instant,
    ) -> Result<Option<String>, ClipboardError> {
        let Some(block) = self.selected_block() else {
            return Ok(None);
        };
        clipboard.write_text(&block.text)?;
        self.copy_feedback = Some(CopyFeedback {
            block: self.cursor,
            expires_at: now + COPY_CONFIRMATION,
        });
        Ok(Some(block.label))
    }

    pub fn copy_confirmed(&self, block: usize, now: Instant) -> bool {
        self.copy_feedback
            .is_some_and(|feedback| feedback.block == block && now < feedback.expires_at)
    }

    pub fn expire_copy_feedback(&mut self, now: Instant) {
        if self
            .copy_feedback
            .is_some_and(|feedback| now >= feedback.expires_at)
        {
            self.copy_feedback = None;
        }
    }

    fn edit_focused_field(&mut self, edit: impl FnOnce(&mut String)) -> Result<(), WizardNavError> {
        let Some(name) = self.focused_field().map(str::to_string) else {
            return Ok(());
        };
        let mut value = self.session.field_value(&name).unwrap_or_default().to_string();
        edit(&mut value);
        self.set_field_value(&name, &value)
    }

    fn clamp_cursor(&mut self) {
        let len = self.item_count();
        self.cursor = if len == 0 {
            0
        } else {
            self.cursor.min(len - 1)
        };
    }
}
