use crate::app::cli::{help_text, split_command, CliVerb};
use crate::shared::{default_state_root_path, StatePaths, WizardLog};
use crate::templates::{load_template_document, TemplateDocument, TemplateSource};

pub mod models;
pub mod render;
pub mod run;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    let (verb, rest) = split_command(&args);
    match verb {
        CliVerb::Run => run::cmd_run(rest),
        CliVerb::Models => models::cmd_models(rest),
        CliVerb::Render => render::cmd_render(rest),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{}`", args[0])),
    }
}

pub(crate) fn open_log() -> WizardLog {
    let paths = default_state_root_path().ok().map(StatePaths::new);
    WizardLog::from_env(paths.as_ref())
}

pub(crate) fn load_document(
    source: &TemplateSource,
    log: &WizardLog,
) -> Result<TemplateDocument, String> {
    match load_template_document(source) {
        Ok(document) => {
            log.info(
                "templates.loaded",
                &format!("source={source} models={}", document.len()),
            );
            Ok(document)
        }
        Err(err) => {
            log.error("templates.load_failed", &err.to_string());
            Err(format!("Error loading data: {err}"))
        }
    }
}
