use ghostwriter::config::ConfigTree;
use ghostwriter::error::Error;
use ghostwriter::renderer::{MiniJinjaRenderer, TemplateRenderer};

fn config() -> ConfigTree {
    "db:\n  port: 5432\n  user: postgres\nfeatures:\n  cache: true\n  ratio: 0.5\nname: demo\n"
        .parse()
        .unwrap()
}

#[test]
fn test_substitutes_dot_references() {
    let engine = MiniJinjaRenderer::new();
    let result = engine
        .render(
            "db port is {{ .db.port }}, user is {{ .db.user }}",
            &config(),
            "db.conf",
        )
        .unwrap();
    assert_eq!(result, "db port is 5432, user is postgres");
}

#[test]
fn test_substitutes_plain_references() {
    let engine = MiniJinjaRenderer::new();
    let result = engine
        .render("{{ name }}: cache={{ features.cache }}", &config(), "x")
        .unwrap();
    assert_eq!(result, "demo: cache=true");
}

#[test]
fn test_text_without_references_is_unchanged() {
    let engine = MiniJinjaRenderer::new();
    let template = "line one\r\n\tindented  line\n\ntrailing newline\n";
    let result = engine.render(template, &config(), "plain.txt").unwrap();
    assert_eq!(result, template);
}

#[test]
fn test_rendering_is_deterministic() {
    let engine = MiniJinjaRenderer::new();
    let template = "{{ .db.user }}@{{ .db.port }}\n";
    let first = engine.render(template, &config(), "x").unwrap();
    let second = engine.render(template, &config(), "x").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_undefined_reference_is_a_render_error() {
    let engine = MiniJinjaRenderer::new();
    let err = engine
        .render("value: {{ .missing.key }}", &config(), "values.txt")
        .unwrap_err();

    match &err {
        Error::RenderError {
            path, reference, ..
        } => {
            assert_eq!(path, "values.txt");
            assert_eq!(reference.as_deref(), Some("missing.key"));
        }
        other => panic!("Expected RenderError, got {other:?}"),
    }
    assert!(err.to_string().contains("missing.key"));
    assert!(err.to_string().contains("values.txt"));
}

#[test]
fn test_undefined_nested_key_is_a_render_error() {
    let engine = MiniJinjaRenderer::new();
    let err = engine
        .render("{{ .db.password }}", &config(), "x")
        .unwrap_err();
    assert!(matches!(
        err,
        Error::RenderError { ref reference, .. } if reference.as_deref() == Some("db.password")
    ));
}

#[test]
fn test_malformed_template_is_a_syntax_error() {
    let engine = MiniJinjaRenderer::new();

    let unbalanced = engine.render("{{ .db.port ", &config(), "broken.txt");
    assert!(matches!(unbalanced, Err(Error::TemplateSyntaxError { .. })));

    let unknown_tag = engine.render("{{% frobnicate %}}", &config(), "broken.txt");
    assert!(matches!(unknown_tag, Err(Error::TemplateSyntaxError { .. })));

    let unclosed_block = engine.render("{{% if name %}}x", &config(), "broken.txt");
    assert!(matches!(unclosed_block, Err(Error::TemplateSyntaxError { .. })));
}

#[test]
fn test_jinja_delimiters_in_plain_text_stay_literal() {
    let engine = MiniJinjaRenderer::new();

    let script = "#!/bin/bash\narr=(a b)\necho ${#arr[@]}\n";
    assert_eq!(engine.render(script, &config(), "count.sh").unwrap(), script);

    let format = "fmt = \"{%d}\"\n";
    assert_eq!(engine.render(format, &config(), "fmt.c").unwrap(), format);

    let mixed = "# {#} comment-like\nname={{ .name }}\n";
    assert_eq!(
        engine.render(mixed, &config(), "mixed.txt").unwrap(),
        "# {#} comment-like\nname=demo\n"
    );
}

#[test]
fn test_blocks_and_comments_use_double_braces() {
    let engine = MiniJinjaRenderer::new();
    let template = concat!(
        "{{/* rendered by ghostwriter */}}",
        "cache {{% if features.cache %}}on{{% else %}}off{{% endif %}}"
    );
    assert_eq!(engine.render(template, &config(), "x").unwrap(), "cache on");
}
