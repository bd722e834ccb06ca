//! Best-effort scan of Markdown source for cross-page links that will not
//! resolve once pages are flattened into one output directory.
//!
//! This is a substring heuristic rather than a Markdown parser: it looks for
//! `[text](link)` on a single line, skips images (`![alt](src)`) and resumes
//! right after every `[` so overlapping brackets are still inspected.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkWarning {
    pub file: String,
    pub text: String,
    pub link: String,
}

impl fmt::Display for LinkWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: suspicious link [{}]({})", self.file, self.text, self.link)
    }
}

pub fn check_links(source: &str, file: &str) -> Vec<LinkWarning> {
    let mut warnings = Vec::new();
    let mut from = 0;

    while let Some(found) = source[from..].find('[') {
        let open = from + found;
        from = open + 1;

        if source[..open].ends_with('!') {
            continue;
        }
        let Some((text, link)) = link_at(source, open) else {
            continue;
        };

        if is_suspicious(link) {
            warnings.push(LinkWarning {
                file: file.to_string(),
                text: text.to_string(),
                link: link.to_string(),
            });
        }
    }

    warnings
}

/// Text and target of a `[text](link)` starting at `open`, if neither part
/// crosses a line break.
fn link_at(source: &str, open: usize) -> Option<(&str, &str)> {
    let text_start = open + 1;
    let text_end = text_start + source[text_start..].find("](")?;
    let link_start = text_end + 2;
    let link_end = link_start + source[link_start..].find(')')?;

    let text = &source[text_start..text_end];
    let link = &source[link_start..link_end];
    if text.contains('\n') || link.contains('\n') {
        return None;
    }
    Some((text, link))
}

fn is_suspicious(link: &str) -> bool {
    !link.starts_with("http") && (link.contains("..") || link.contains('/') || !link.contains(".html"))
}
