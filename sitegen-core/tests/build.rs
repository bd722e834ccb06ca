use std::fs;
use std::path::Path;

use sitegen_core::{BuildError, BuildOptions, LoadError, RenderError, build_site};
use tempfile::{TempDir, tempdir};

const MASTER: &str = "<html><head><title>{{ title }}</title></head><body>\
{% include \"menu.html\" %}\
{% block content %}{% endblock content %}\
<footer>{{ footer }}</footer></body></html>";

const MENU: &str = "<nav>{% for entry in toc %}{% if entry.isSection %}<b>{{ entry.title }}</b>\
{% else %}<a href=\"{{ entry.link }}\"{% if entry.isFirst %} class=\"first\"{% endif %}>{{ entry.title }}</a>\
{% endif %}{% endfor %}</nav>";

fn content_dir() -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("master.html"), MASTER).unwrap();
    fs::write(root.join("menu.html"), MENU).unwrap();
    fs::write(root.join("toc"), "// site menu\n\"Guide\" guide\n").unwrap();
    fs::write(root.join("vars"), "footer = Made by hand\n").unwrap();
    fs::write(root.join("guide.md"), "<h1>Guide</h1>\n\nWelcome.\n").unwrap();
    dir
}

fn build(source: &Path, output: &Path) -> Result<sitegen_core::BuildReport, BuildError> {
    build_site(&BuildOptions::default(), source, output)
}

#[test]
fn renders_page_with_title_and_toc() {
    let content = content_dir();
    let out = tempdir().unwrap();

    let report = build(content.path(), out.path()).unwrap();

    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.pages[0].title, "Guide");
    let html = fs::read_to_string(out.path().join("guide.html")).unwrap();
    assert!(html.contains("<title>Guide</title>"));
    assert!(html.contains("<a href=\"guide.html\" class=\"first\">Guide</a>"));
    assert!(html.contains("Welcome."));
    assert!(html.contains("<footer>Made by hand</footer>"));
}

#[test]
fn fragments_are_not_rendered_as_pages() {
    let content = content_dir();
    fs::write(content.path().join("master.md"), "# Master\n").unwrap();
    fs::write(content.path().join("menu.md"), "# Menu\n").unwrap();
    let out = tempdir().unwrap();

    build(content.path(), out.path()).unwrap();

    assert!(out.path().join("guide.html").exists());
    assert!(!out.path().join("master.html").exists());
    assert!(!out.path().join("menu.html").exists());
}

#[test]
fn rebuild_is_byte_identical() {
    let content = content_dir();
    fs::write(content.path().join("api.md"), "# API\n\n| a | b |\n|---|---|\n| 1 | 2 |\n").unwrap();
    let out = tempdir().unwrap();

    build(content.path(), out.path()).unwrap();
    let first_guide = fs::read(out.path().join("guide.html")).unwrap();
    let first_api = fs::read(out.path().join("api.html")).unwrap();

    build(content.path(), out.path()).unwrap();
    assert_eq!(fs::read(out.path().join("guide.html")).unwrap(), first_guide);
    assert_eq!(fs::read(out.path().join("api.html")).unwrap(), first_api);
}

#[test]
fn copies_images_and_stylesheet() {
    let content = content_dir();
    fs::create_dir_all(content.path().join("img")).unwrap();
    fs::write(content.path().join("img/logo.png"), b"\x89PNG").unwrap();
    fs::write(content.path().join("site.css"), "body { margin: 0 }").unwrap();
    let out = tempdir().unwrap();

    let report = build(content.path(), out.path()).unwrap();

    assert_eq!(report.assets_copied, 2);
    assert_eq!(report.asset_failures, 0);
    assert_eq!(fs::read(out.path().join("img/logo.png")).unwrap(), b"\x89PNG");
    assert_eq!(
        fs::read_to_string(out.path().join("site.css")).unwrap(),
        "body { margin: 0 }"
    );
}

#[test]
fn renders_optional_index() {
    let content = content_dir();
    let out = tempdir().unwrap();

    let report = build(content.path(), out.path()).unwrap();
    assert!(report.index.is_none());
    assert!(!out.path().join("index.html").exists());

    fs::write(
        content.path().join("index.html"),
        "{% extends \"master.html\" %}{% block content %}<h1>Home</h1>{{ menu }}{% endblock content %}",
    )
    .unwrap();
    let report = build(content.path(), out.path()).unwrap();
    assert_eq!(report.index, Some(out.path().join("index.html")));
    let html = fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(html.contains("<title>Home</title>"));
    assert!(html.contains("<h1>Home</h1>index"));
}

#[test]
fn escape_token_survives_as_literal_delimiter() {
    let content = content_dir();
    fs::write(
        content.path().join("syntax.md"),
        "# Syntax\n\nWrite `LBRACELBRACE name }}` to print a variable.\n",
    )
    .unwrap();
    let out = tempdir().unwrap();

    build(content.path(), out.path()).unwrap();

    let html = fs::read_to_string(out.path().join("syntax.html")).unwrap();
    assert!(html.contains("<code>{{ name }}</code>"));
    assert!(!html.contains("LBRACELBRACE"));
}

#[test]
fn link_warnings_do_not_fail_the_build() {
    let content = content_dir();
    fs::write(
        content.path().join("links.md"),
        "# Links\n\n[up](../other) ![pic](img/a.png) [ok](guide.html) [web](https://example.com)\n",
    )
    .unwrap();
    let out = tempdir().unwrap();

    let report = build(content.path(), out.path()).unwrap();

    let links: Vec<&str> = report.warnings().map(|w| w.link.as_str()).collect();
    assert_eq!(links, vec!["../other"]);
    assert!(out.path().join("links.html").exists());
}

#[test]
fn missing_toc_is_fatal() {
    let content = content_dir();
    fs::remove_file(content.path().join("toc")).unwrap();
    let out = tempdir().unwrap();

    let err = build(content.path(), out.path()).unwrap_err();
    assert!(matches!(err, BuildError::Load(LoadError::MissingFile(_))));
}

#[test]
fn missing_vars_is_fatal() {
    let content = content_dir();
    fs::remove_file(content.path().join("vars")).unwrap();
    let out = tempdir().unwrap();

    let err = build(content.path(), out.path()).unwrap_err();
    assert!(matches!(err, BuildError::Load(LoadError::MissingFile(_))));
}

#[test]
fn unclosed_heading_aborts_with_file_name() {
    let content = content_dir();
    fs::write(content.path().join("broken.md"), "<h1>Broken\n").unwrap();
    let out = tempdir().unwrap();

    let err = build(content.path(), out.path()).unwrap_err();
    match err {
        BuildError::Render(RenderError { file, .. }) => assert!(file.ends_with("broken.md")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!out.path().join("broken.html").exists());
}

#[test]
fn stale_pages_survive_unless_clean_is_enabled() {
    let content = content_dir();
    let out = tempdir().unwrap();
    fs::write(out.path().join("removed.html"), "old").unwrap();
    fs::write(out.path().join("notes.txt"), "keep").unwrap();

    build(content.path(), out.path()).unwrap();
    assert!(out.path().join("removed.html").exists());

    let options = BuildOptions {
        clean_output: true,
        ..BuildOptions::default()
    };
    build_site(&options, content.path(), out.path()).unwrap();
    assert!(!out.path().join("removed.html").exists());
    assert!(out.path().join("guide.html").exists());
    assert!(out.path().join("notes.txt").exists());
}

#[test]
fn output_dir_is_created() {
    let content = content_dir();
    let out = tempdir().unwrap();
    let nested = out.path().join("public/site");

    build(content.path(), &nested).unwrap();
    assert!(nested.join("guide.html").exists());
}

#[test]
fn variables_render_verbatim_on_pages_and_index() {
    let content = content_dir();
    fs::write(content.path().join("vars"), "footer = <a href=\"/\">Home</a>\n").unwrap();
    fs::write(
        content.path().join("index.html"),
        "{% extends \"master.html\" %}{% block content %}<h1>Home</h1>{% endblock content %}",
    )
    .unwrap();
    let out = tempdir().unwrap();

    build(content.path(), out.path()).unwrap();

    let expected = "<footer><a href=\"/\">Home</a></footer>";
    let page = fs::read_to_string(out.path().join("guide.html")).unwrap();
    let index = fs::read_to_string(out.path().join("index.html")).unwrap();
    assert!(page.contains(expected));
    assert!(index.contains(expected));
}

#[test]
fn binary_files_with_reserved_prefix_are_ignored() {
    let content = content_dir();
    fs::write(content.path().join("menu-icon.png"), [0x89, b'P', b'N', b'G', 0xff, 0xfe]).unwrap();
    let out = tempdir().unwrap();

    let report = build(content.path(), out.path()).unwrap();
    assert_eq!(report.pages.len(), 1);
    assert!(!out.path().join("menu-icon.html").exists());
}
