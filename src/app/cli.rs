#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Run,
    Models,
    Render,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "run" => CliVerb::Run,
        "models" => CliVerb::Models,
        "render" => CliVerb::Render,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

/// Splits argv into the verb and its remaining flags. A leading flag means the
/// default `run` command.
pub fn split_command(args: &[String]) -> (CliVerb, &[String]) {
    match args.first() {
        None => (CliVerb::Run, args),
        Some(first) => match parse_cli_verb(first) {
            CliVerb::Unknown if first.starts_with("--") => (CliVerb::Run, args),
            verb => (verb, &args[1..]),
        },
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandFlags {
    pub templates: Option<String>,
    pub model: Option<String>,
    pub style: Option<String>,
    pub fields: Vec<(String, String)>,
}

pub fn parse_command_flags(args: &[String]) -> Result<CommandFlags, String> {
    let mut flags = CommandFlags::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let (name, inline) = match arg.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value.to_string())),
            _ => (arg.as_str(), None),
        };
        let mut value = || -> Result<String, String> {
            match inline.clone() {
                Some(value) => Ok(value),
                None => iter
                    .next()
                    .cloned()
                    .ok_or_else(|| format!("missing value for `{name}`")),
            }
        };
        match name {
            "--templates" => flags.templates = Some(value()?),
            "--model" => flags.model = Some(value()?),
            "--style" => flags.style = Some(value()?),
            "--field" => {
                let raw = value()?;
                let (key, field_value) = raw
                    .split_once('=')
                    .ok_or_else(|| format!("--field expects name=value, got `{raw}`"))?;
                let key = key.trim();
                if key.is_empty() {
                    return Err(format!("--field expects a non-empty name, got `{raw}`"));
                }
                flags.fields.push((key.to_string(), field_value.to_string()));
            }
            other => return Err(format!("unknown flag `{other}`")),
        }
    }
    Ok(flags)
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Usage: promptcraft [command] [--templates <path|url>]".to_string(),
        String::new(),
        "Commands:".to_string(),
        "  run                                  Start the interactive prompt wizard (default)"
            .to_string(),
        "  models                               List models, styles, and their fields"
            .to_string(),
        "  render --model <m> --style <s>       Assemble a prompt without the wizard".to_string(),
        "         [--field name=value]...".to_string(),
        "  help                                 Show this help".to_string(),
        String::new(),
        "Environment:".to_string(),
        "  PROMPTCRAFT_TEMPLATES                Template document path or URL".to_string(),
        "  PROMPTCRAFT_SCRIPT_KEYS              Comma-separated keys for a headless run"
            .to_string(),
        "                                       (write \\, for a comma inside type:<text>)"
            .to_string(),
        "  PROMPTCRAFT_STATE_ROOT               Log directory root (default ~/.promptcraft)"
            .to_string(),
        "  PROMPTCRAFT_LOG_LEVEL                debug, info, warn, or error".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    cli_help_lines().join("\n")
}
