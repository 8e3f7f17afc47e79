pub mod document;
pub mod error;
pub mod source;

pub use document::{display_label, ModelEntry, PromptSpec, StyleEntry, TemplateDocument};
pub use error::TemplateLoadError;
pub use source::{
    load_template_document, resolve_template_source, TemplateSource, DEFAULT_TEMPLATE_PATH,
    TEMPLATES_ENV_VAR,
};
