//! Content-security-policy rewriting for HTML pages.

use lol_html::html_content::ContentType;
use lol_html::{element, rewrite_str, RewriteStrSettings};
use mintpack_core::constants::CONTENT_SECURITY_POLICY;
use std::cell::Cell;
use thiserror::Error;

const DOCTYPE: &str = "<!DOCTYPE html>";

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("HTML document has no <head> element")]
    NoDocumentHead,

    #[error("HTML rewrite failed: {0}")]
    Rewrite(String),
}

/// The policy tag inserted at the top of every `<head>`.
pub fn policy_meta_tag() -> String {
    format!(
        r#"<meta http-equiv="Content-Security-Policy" content="{}">"#,
        CONTENT_SECURITY_POLICY
    )
}

/// Whether `path` names a page that gets the policy injected.
pub fn is_html_path(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.ends_with(".html") || lower.ends_with(".htm")
}

/// Replace every content-security-policy declaration in `html` with the
/// fixed policy, inserted as the first child of `<head>`.
///
/// Markup is handled leniently and invalid UTF-8 is replaced. The output
/// always starts with a doctype. Running the rewrite on its own output
/// yields the same single policy tag.
pub fn inject_csp(html: &[u8]) -> Result<Vec<u8>, RewriteError> {
    let source = String::from_utf8_lossy(html);
    let policy = policy_meta_tag();
    let head_found = Cell::new(false);

    let rewritten = rewrite_str(
        &source,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("meta[http-equiv]", |el| {
                    let is_policy = el
                        .get_attribute("http-equiv")
                        .map(|value| value.trim().eq_ignore_ascii_case("content-security-policy"))
                        .unwrap_or(false);
                    if is_policy {
                        el.remove();
                    }
                    Ok(())
                }),
                element!("head", |el| {
                    if !head_found.get() {
                        head_found.set(true);
                        el.prepend(&policy, ContentType::Html);
                    }
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|e| RewriteError::Rewrite(e.to_string()))?;

    if !head_found.get() {
        return Err(RewriteError::NoDocumentHead);
    }

    if has_doctype(&rewritten) {
        Ok(rewritten.into_bytes())
    } else {
        Ok(format!("{}{}", DOCTYPE, rewritten).into_bytes())
    }
}

fn has_doctype(html: &str) -> bool {
    let start = html.trim_start().as_bytes();
    start.len() >= 9 && start[..9].eq_ignore_ascii_case(b"<!doctype")
}
