use super::session::WizardStep;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub const SCRIPT_KEYS_ENV_VAR: &str = "PROMPTCRAFT_SCRIPT_KEYS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    MovePrev,
    MoveNext,
    ScrollUp,
    ScrollDown,
    Enter,
    Back,
    Home,
    Copy,
    Reload,
    Quit,
    Input(char),
    DeleteChar,
}

impl WizardAction {
    pub fn as_str(self) -> &'static str {
        match self {
            WizardAction::MovePrev => "move_prev",
            WizardAction::MoveNext => "move_next",
            WizardAction::ScrollUp => "scroll_up",
            WizardAction::ScrollDown => "scroll_down",
            WizardAction::Enter => "enter",
            WizardAction::Back => "back",
            WizardAction::Home => "home",
            WizardAction::Copy => "copy",
            WizardAction::Reload => "reload",
            WizardAction::Quit => "quit",
            WizardAction::Input(_) => "input",
            WizardAction::DeleteChar => "delete_char",
        }
    }
}

/// Maps a key press to a wizard action. On the fill screen printable keys are
/// text input, so single-letter shortcuts only apply to the other steps.
pub fn wizard_action_from_key(step: WizardStep, key: KeyEvent) -> Option<WizardAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(WizardAction::Quit);
    }
    match key.code {
        KeyCode::Up | KeyCode::BackTab => return Some(WizardAction::MovePrev),
        KeyCode::Down | KeyCode::Tab => return Some(WizardAction::MoveNext),
        KeyCode::PageUp => return Some(WizardAction::ScrollUp),
        KeyCode::PageDown => return Some(WizardAction::ScrollDown),
        KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') => {
            return Some(WizardAction::Enter)
        }
        KeyCode::Home => return Some(WizardAction::Home),
        KeyCode::Esc => {
            return Some(if step == WizardStep::SelectModel {
                WizardAction::Quit
            } else {
                WizardAction::Back
            })
        }
        _ => {}
    }
    if step == WizardStep::FillFields {
        return match key.code {
            KeyCode::Backspace => Some(WizardAction::DeleteChar),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(WizardAction::Input(ch))
            }
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char('k') => Some(WizardAction::MovePrev),
        KeyCode::Char('j') => Some(WizardAction::MoveNext),
        KeyCode::Char('b') | KeyCode::Backspace if step != WizardStep::SelectModel => {
            Some(WizardAction::Back)
        }
        KeyCode::Char('h') => Some(WizardAction::Home),
        KeyCode::Char('c') | KeyCode::Char('y') if step == WizardStep::ShowOutput => {
            Some(WizardAction::Copy)
        }
        KeyCode::Char('r') => Some(WizardAction::Reload),
        KeyCode::Char('q') => Some(WizardAction::Quit),
        _ => None,
    }
}

/// Parses a comma-separated key script. Inside `type:` text a literal comma is
/// written as `\,`.
pub fn parse_scripted_wizard_keys(raw: &str) -> Result<Vec<KeyEvent>, String> {
    let mut keys = Vec::new();
    for token in split_script_tokens(raw) {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(text) = trimmed.strip_prefix("type:") {
            keys.extend(
                text.chars()
                    .map(|ch| KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)),
            );
            continue;
        }
        let key = match trimmed.to_ascii_lowercase().as_str() {
            "up" => KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            "down" => KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            "pageup" => KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE),
            "pagedown" => KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE),
            "tab" => KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            "enter" => KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            "esc" => KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            "home" => KeyEvent::new(KeyCode::Home, KeyModifiers::NONE),
            "backspace" => KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
            "ctrl-c" => KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            "c" => KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE),
            "r" => KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE),
            "q" => KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            other => {
                return Err(format!(
                    "invalid {SCRIPT_KEYS_ENV_VAR} token `{other}`; valid tokens: up,down,pageup,pagedown,tab,enter,esc,home,backspace,ctrl-c,c,r,q,type:<text>"
                ));
            }
        };
        keys.push(key);
    }
    Ok(keys)
}

fn split_script_tokens(raw: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&',') => {
                current.push(',');
                chars.next();
            }
            ',' => tokens.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    tokens.push(current);
    tokens
}
