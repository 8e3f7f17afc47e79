use serde::Deserialize;

/// Fixed fragments plus the names of user-filled placeholders for one prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PromptSpec {
    #[serde(default)]
    pub fixed: Vec<String>,
    #[serde(default, rename = "dynamic")]
    pub dynamic_field_names: Vec<String>,
}

impl PromptSpec {
    pub fn new(fixed: &[&str], dynamic_field_names: &[&str]) -> Self {
        Self {
            fixed: fixed.iter().map(|value| (*value).to_string()).collect(),
            dynamic_field_names: dynamic_field_names
                .iter()
                .map(|value| (*value).to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StyleEntry {
    pub name: String,
    #[serde(default)]
    pub positive: PromptSpec,
    #[serde(default)]
    pub negative: PromptSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelEntry {
    #[serde(rename = "model")]
    pub name: String,
    #[serde(default, rename = "merge")]
    pub merge_output: bool,
    #[serde(default, rename = "style")]
    pub styles: Vec<StyleEntry>,
}

impl ModelEntry {
    pub fn style(&self, index: usize) -> Option<&StyleEntry> {
        self.styles.get(index)
    }

    pub fn find_style(&self, selector: &str) -> Option<usize> {
        find_by_name_or_index(
            self.styles.iter().map(|style| style.name.as_str()),
            selector,
        )
    }
}

/// The read-only list of models the wizard is driven by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TemplateDocument {
    pub models: Vec<ModelEntry>,
}

impl TemplateDocument {
    pub fn new(models: Vec<ModelEntry>) -> Self {
        Self { models }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn model(&self, index: usize) -> Option<&ModelEntry> {
        self.models.get(index)
    }

    pub fn style(&self, model_index: usize, style_index: usize) -> Option<&StyleEntry> {
        self.model(model_index)?.style(style_index)
    }

    /// Resolves a model by exact name, display label, or zero-based index.
    pub fn find_model(&self, selector: &str) -> Option<usize> {
        find_by_name_or_index(self.models.iter().map(|model| model.name.as_str()), selector)
    }
}

/// Display form of a document identifier: underscores become spaces.
pub fn display_label(name: &str) -> String {
    name.replace('_', " ")
}

fn find_by_name_or_index<'a>(
    names: impl Iterator<Item = &'a str> + Clone,
    selector: &str,
) -> Option<usize> {
    let selector = selector.trim();
    if let Some(idx) = names
        .clone()
        .position(|name| name == selector || display_label(name) == selector)
    {
        return Some(idx);
    }
    let idx = selector.parse::<usize>().ok()?;
    (idx < names.count()).then_some(idx)
}
