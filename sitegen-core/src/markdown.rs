use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;
use thiserror::Error;

// Initialize syntax highlighting resources once
static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const H1_OPEN: &str = "<h1>";
const H1_CLOSE: &str = "</h1>";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MalformedContent {
    #[error("<h1> at byte {0} has no closing </h1>")]
    UnclosedHeading(usize),
}

/// Normalize line endings before conversion. This is also where source-level
/// comment stripping would hook in; there is none today.
pub fn normalize_source(source: &str) -> String {
    source.replace("\r\n", "\n")
}

/// Convert Markdown (with tables) to HTML, highlighting fenced code blocks
/// whose language syntect knows.
pub fn markdown_to_html(source: &str, syntax_theme: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    let parser = Parser::new_ext(source, options);

    let events: Vec<Event> = parser.collect();
    let mut processed_events = Vec::new();
    let mut i = 0;

    while i < events.len() {
        match &events[i] {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(lang))) if !lang.is_empty() => {
                // Collect all text events until the end of the code block
                let mut code_content = String::new();
                i += 1;

                while i < events.len() {
                    match &events[i] {
                        Event::End(TagEnd::CodeBlock) => break,
                        Event::Text(text) => code_content.push_str(text),
                        _ => {}
                    }
                    i += 1;
                }

                processed_events.push(Event::Html(
                    highlight_code(&code_content, lang, syntax_theme).into(),
                ));
            }
            _ => {
                processed_events.push(events[i].clone());
            }
        }
        i += 1;
    }

    let mut out = String::new();
    html::push_html(&mut out, processed_events.into_iter());
    out
}

fn highlight_code(code: &str, lang: &str, syntax_theme: &str) -> String {
    let syntax = SYNTAX_SET.find_syntax_by_token(lang).or_else(|| {
        // Fallback mappings for unsupported languages
        match lang {
            "toml" => SYNTAX_SET.find_syntax_by_name("YAML"),
            _ => None,
        }
    });

    let highlighted = match (syntax, THEME_SET.themes.get(syntax_theme)) {
        (Some(syntax), Some(theme)) => {
            highlighted_html_for_string(code, &SYNTAX_SET, syntax, theme).ok()
        }
        _ => None,
    };

    highlighted.unwrap_or_else(|| {
        format!("<pre><code>{}</code></pre>\n", html_escape::encode_text(code))
    })
}

/// Trimmed text of the first `<h1>...</h1>`, or `default_name` when the
/// content has no `<h1>`.
pub fn extract_title(default_name: &str, html: &str) -> Result<String, MalformedContent> {
    let Some(open) = html.find(H1_OPEN) else {
        return Ok(default_name.to_string());
    };
    let start = open + H1_OPEN.len();
    let len = html[start..]
        .find(H1_CLOSE)
        .ok_or(MalformedContent::UnclosedHeading(open))?;

    Ok(html[start..start + len].trim().to_string())
}
