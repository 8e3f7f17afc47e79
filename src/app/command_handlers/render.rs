use super::{load_document, open_log};
use crate::app::cli::{parse_command_flags, CommandFlags};
use crate::templates::{resolve_template_source, TemplateDocument};
use crate::wizard::WizardController;

pub fn cmd_render(args: &[String]) -> Result<String, String> {
    let flags = parse_command_flags(args)?;
    let log = open_log();
    let source = resolve_template_source(flags.templates.as_deref());
    let document = load_document(&source, &log)?;
    render_with_flags(document, &flags)
}

/// Walks the wizard transitions headlessly: choose model, choose style, fill
/// fields, submit. Errors name the selector that could not be applied.
pub fn render_with_flags(
    document: TemplateDocument,
    flags: &CommandFlags,
) -> Result<String, String> {
    let model_selector = flags
        .model
        .as_deref()
        .ok_or_else(|| "render requires --model <name|index>".to_string())?;
    let style_selector = flags
        .style
        .as_deref()
        .ok_or_else(|| "render requires --style <name|index>".to_string())?;

    let model_index = document
        .find_model(model_selector)
        .ok_or_else(|| format!("unknown model `{model_selector}`"))?;
    let style_index = document.models[model_index]
        .find_style(style_selector)
        .ok_or_else(|| format!("unknown style `{style_selector}` for model `{model_selector}`"))?;

    let mut controller = WizardController::new(document);
    controller.choose_model(model_index).map_err(|e| e.to_string())?;
    controller.choose_style(style_index).map_err(|e| e.to_string())?;
    for (name, value) in &flags.fields {
        controller
            .set_field_value(name, value)
            .map_err(|e| e.to_string())?;
    }
    controller.submit_fields().map_err(|e| e.to_string())?;
    controller
        .assembled()
        .map(|prompt| prompt.render_plain())
        .ok_or_else(|| "render did not reach the output step".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{ModelEntry, PromptSpec, StyleEntry};

    fn document() -> TemplateDocument {
        TemplateDocument::new(vec![ModelEntry {
            name: "demo_model".to_string(),
            merge_output: false,
            styles: vec![StyleEntry {
                name: "vivid".to_string(),
                positive: PromptSpec::new(&["a photo"], &["subject"]),
                negative: PromptSpec::new(&["blurry"], &[]),
            }],
        }])
    }

    fn flags(model: &str, style: &str, fields: &[(&str, &str)]) -> CommandFlags {
        CommandFlags {
            templates: None,
            model: Some(model.to_string()),
            style: Some(style.to_string()),
            fields: fields
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    #[test]
    fn renders_demo_end_to_end() {
        let input = flags("demo_model", "vivid", &[("subject", "a cat")]);
        let out = render_with_flags(document(), &input).expect("render");
        assert_eq!(
            out,
            "[Positive Prompt]\na photo,\na cat\n\n[Negative Prompt]\nblurry"
        );
    }

    #[test]
    fn accepts_indices_as_selectors() {
        let out = render_with_flags(document(), &flags("0", "0", &[])).expect("render");
        assert!(out.starts_with("[Positive Prompt]\na photo\n"));
    }

    #[test]
    fn reports_unknown_selectors_and_fields() {
        assert_eq!(
            render_with_flags(document(), &flags("nope", "vivid", &[])),
            Err("unknown model `nope`".to_string())
        );
        assert!(render_with_flags(document(), &flags("demo_model", "noir", &[]))
            .expect_err("unknown style")
            .contains("unknown style `noir`"));
        assert_eq!(
            render_with_flags(document(), &flags("demo_model", "vivid", &[("lens", "35mm")])),
            Err("field `lens` is not a dynamic field of the selected style".to_string())
        );
    }

    #[test]
    fn requires_model_and_style() {
        let mut missing = flags("demo_model", "vivid", &[]);
        missing.style = None;
        assert!(render_with_flags(document(), &missing)
            .expect_err("style required")
            .contains("--style"));
    }
}
