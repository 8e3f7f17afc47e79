use promptcraft::templates::{
    load_template_document, resolve_template_source, TemplateLoadError, TemplateSource,
    DEFAULT_TEMPLATE_PATH,
};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn templates_source_module_loads_bundled_document() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_TEMPLATE_PATH);
    let document = load_template_document(&TemplateSource::File(path)).expect("bundled document");
    assert!(!document.is_empty());
    for model in &document.models {
        assert!(!model.styles.is_empty(), "{} has no styles", model.name);
    }
}

#[test]
fn templates_source_module_round_trips_a_written_document() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("prompt_template.json");
    fs::write(
        &path,
        r#"[{"model":"demo_model","merge":false,"style":[{"name":"vivid","positive":{"fixed":["a photo"],"dynamic":["subject"]},"negative":{"fixed":["blurry"],"dynamic":[]}}]}]"#,
    )
    .expect("write document");

    let source = resolve_template_source(Some(path.to_str().expect("utf8 path")));
    let document = load_template_document(&source).expect("load document");
    assert_eq!(document.models[0].name, "demo_model");
    assert_eq!(
        document.models[0].styles[0].positive.dynamic_field_names,
        vec!["subject".to_string()]
    );
}

#[test]
fn templates_source_module_wrong_shape_is_a_parse_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("prompt_template.json");
    fs::write(&path, r#"{"models": []}"#).expect("write document");

    let err = load_template_document(&TemplateSource::File(path)).expect_err("wrong shape");
    assert!(matches!(err, TemplateLoadError::ParseJson { .. }));
}
