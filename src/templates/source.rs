use super::{TemplateDocument, TemplateLoadError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TEMPLATE_PATH: &str = "./data/prompt_template.json";
pub const TEMPLATES_ENV_VAR: &str = "PROMPTCRAFT_TEMPLATES";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    File(PathBuf),
    Url(String),
}

impl TemplateSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            TemplateSource::Url(raw.to_string())
        } else {
            TemplateSource::File(PathBuf::from(raw))
        }
    }

    fn is_yaml(&self) -> bool {
        let name = match self {
            TemplateSource::File(path) => path.to_string_lossy().to_string(),
            TemplateSource::Url(url) => url
                .split(|c| c == '?' || c == '#')
                .next()
                .unwrap_or_default()
                .to_string(),
        };
        let name = name.to_ascii_lowercase();
        name.ends_with(".yaml") || name.ends_with(".yml")
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::File(path) => write!(f, "{}", path.display()),
            TemplateSource::Url(url) => f.write_str(url),
        }
    }
}

/// Flag value wins over the environment, which wins over the bundled default.
pub fn resolve_template_source(flag: Option<&str>) -> TemplateSource {
    if let Some(raw) = flag.filter(|value| !value.trim().is_empty()) {
        return TemplateSource::parse(raw);
    }
    match std::env::var(TEMPLATES_ENV_VAR) {
        Ok(raw) if !raw.trim().is_empty() => TemplateSource::parse(&raw),
        _ => TemplateSource::File(PathBuf::from(DEFAULT_TEMPLATE_PATH)),
    }
}

pub fn load_template_document(
    source: &TemplateSource,
) -> Result<TemplateDocument, TemplateLoadError> {
    let raw = match source {
        TemplateSource::File(path) => read_file(path)?,
        TemplateSource::Url(url) => fetch_url(url)?,
    };
    let location = source.to_string();
    if source.is_yaml() {
        TemplateDocument::from_yaml_str(&raw)
            .map_err(|source| TemplateLoadError::ParseYaml { location, source })
    } else {
        TemplateDocument::from_json_str(&raw)
            .map_err(|source| TemplateLoadError::ParseJson { location, source })
    }
}

fn read_file(path: &Path) -> Result<String, TemplateLoadError> {
    fs::read_to_string(path).map_err(|source| TemplateLoadError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn fetch_url(url: &str) -> Result<String, TemplateLoadError> {
    let response = ureq::get(url)
        .set("user-agent", concat!("promptcraft/", env!("CARGO_PKG_VERSION")))
        .call()
        .map_err(|err| match err {
            ureq::Error::Status(status, _) => TemplateLoadError::Status {
                url: url.to_string(),
                status,
            },
            other => TemplateLoadError::Fetch {
                url: url.to_string(),
                message: other.to_string(),
            },
        })?;
    response.into_string().map_err(|e| TemplateLoadError::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    })
}
