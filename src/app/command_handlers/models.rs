use super::{load_document, open_log};
use crate::app::cli::parse_command_flags;
use crate::templates::{display_label, resolve_template_source, TemplateDocument};

pub fn cmd_models(args: &[String]) -> Result<String, String> {
    let flags = parse_command_flags(args)?;
    if flags.model.is_some() || flags.style.is_some() || !flags.fields.is_empty() {
        return Err("models only accepts --templates".to_string());
    }
    let log = open_log();
    let source = resolve_template_source(flags.templates.as_deref());
    let document = load_document(&source, &log)?;
    Ok(render_model_listing(&document))
}

pub fn render_model_listing(document: &TemplateDocument) -> String {
    if document.is_empty() {
        return "no models configured".to_string();
    }
    let mut lines = Vec::new();
    for (idx, model) in document.models.iter().enumerate() {
        lines.push(format!(
            "{idx}: {} ({}) merge={}",
            display_label(&model.name),
            model.name,
            model.merge_output
        ));
        for style in &model.styles {
            let fields = if style.positive.dynamic_field_names.is_empty() {
                "<none>".to_string()
            } else {
                style.positive.dynamic_field_names.join(",")
            };
            lines.push(format!("   - {} fields={fields}", style.name));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{ModelEntry, PromptSpec, StyleEntry};

    #[test]
    fn listing_shows_models_styles_and_fields() {
        let document = TemplateDocument::new(vec![ModelEntry {
            name: "demo_model".to_string(),
            merge_output: true,
            styles: vec![
                StyleEntry {
                    name: "vivid".to_string(),
                    positive: PromptSpec::new(&["a photo"], &["subject", "lens"]),
                    negative: PromptSpec::default(),
                },
                StyleEntry {
                    name: "plain".to_string(),
                    positive: PromptSpec::default(),
                    negative: PromptSpec::default(),
                },
            ],
        }]);
        assert_eq!(
            render_model_listing(&document),
            "0: demo model (demo_model) merge=true\n   - vivid fields=subject,lens\n   - plain fields=<none>"
        );
    }

    #[test]
    fn empty_listing_says_so() {
        assert_eq!(
            render_model_listing(&TemplateDocument::default()),
            "no models configured"
        );
    }
}
