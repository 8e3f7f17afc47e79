use super::{load_document, open_log};
use crate::app::cli::parse_command_flags;
use crate::shared::{MemoryClipboard, SystemClipboard};
use crate::templates::resolve_template_source;
use crate::tui::wizard::{
    run_wizard_scripted, run_wizard_tui, show_load_error_tui, WizardRunContext,
};
use crate::wizard::navigation::SCRIPT_KEYS_ENV_VAR;
use crate::wizard::{parse_scripted_wizard_keys, WizardController};
use std::io::{self, IsTerminal};

pub fn cmd_run(args: &[String]) -> Result<String, String> {
    let flags = parse_command_flags(args)?;
    if flags.model.is_some() || flags.style.is_some() || !flags.fields.is_empty() {
        return Err("run only accepts --templates; use `render` for headless output".to_string());
    }
    let scripted_keys = load_scripted_keys()?;
    if scripted_keys.is_none() && !is_interactive() {
        return Err(format!(
            "the wizard needs an interactive terminal; set {SCRIPT_KEYS_ENV_VAR} for headless runs"
        ));
    }

    let log = open_log();
    let source = resolve_template_source(flags.templates.as_deref());
    let document = match load_document(&source, &log) {
        Ok(document) => document,
        Err(message) => {
            if scripted_keys.is_none() {
                show_load_error_tui(&message)?;
            }
            return Err(message);
        }
    };

    let mut controller = WizardController::new(document);
    match scripted_keys {
        Some(keys) => {
            let mut clipboard = MemoryClipboard::default();
            let mut context = WizardRunContext {
                source: &source,
                log: &log,
                clipboard: &mut clipboard,
            };
            run_wizard_scripted(&mut controller, &mut context, keys)
        }
        None => {
            let mut clipboard = SystemClipboard::new();
            let mut context = WizardRunContext {
                source: &source,
                log: &log,
                clipboard: &mut clipboard,
            };
            run_wizard_tui(&mut controller, &mut context)?;
            Ok(String::new())
        }
    }
}

fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

fn load_scripted_keys() -> Result<Option<Vec<crossterm::event::KeyEvent>>, String> {
    let Ok(raw) = std::env::var(SCRIPT_KEYS_ENV_VAR) else {
        return Ok(None);
    };
    parse_scripted_wizard_keys(&raw).map(Some)
}
