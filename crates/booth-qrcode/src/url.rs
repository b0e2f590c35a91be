//! Share-URL templating.
//!
//! Templates use `{name}` placeholders; `{{` and `}}` are literal-brace
//! escapes. Unknown placeholder names fail the substitution rather than
//! leaking literal placeholder text into the encoded URL.

use std::collections::HashMap;

/// Errors from template parsing or substitution.
#[derive(Debug, thiserror::Error)]
pub enum UrlError {
    #[error("Missing template variable: {0}")]
    MissingVariable(String),

    #[error("Malformed template: {0}")]
    Syntax(String),
}

enum Segment {
    Literal(String),
    Variable(String),
}

fn parse_template(template: &str) -> Result<Vec<Segment>, UrlError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    literal.push('{');
                    continue;
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some('{') => {
                            return Err(UrlError::Syntax("nested '{' in placeholder".into()));
                        }
                        Some(ch) => name.push(ch),
                        None => return Err(UrlError::Syntax("unterminated '{'".into())),
                    }
                }
                if name.is_empty() {
                    return Err(UrlError::Syntax("empty placeholder name".into()));
                }
                segments.push(Segment::Variable(name));
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                    literal.push('}');
                } else {
                    return Err(UrlError::Syntax("single '}' outside placeholder".into()));
                }
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

/// Check a template for placeholder syntax errors without substituting.
pub fn check_template(template: &str) -> Result<(), UrlError> {
    parse_template(template).map(|_| ())
}

/// Substitute every placeholder in `template` from `vars`.
///
/// Fails with [`UrlError::MissingVariable`] when a placeholder names a
/// variable absent from `vars`. Pure function, no side effects.
pub fn format_url(template: &str, vars: &HashMap<String, String>) -> Result<String, UrlError> {
    let mut out = String::with_capacity(template.len());
    for segment in parse_template(template)? {
        match segment {
            Segment::Literal(text) => out.push_str(&text),
            Segment::Variable(name) => match vars.get(&name) {
                Some(value) => out.push_str(value),
                None => return Err(UrlError::MissingVariable(name)),
            },
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_picture_variable() {
        let url = format_url(
            "https://photos.example.com/share/ABC/{picture}",
            &vars(&[("picture", "IMG_001.jpg")]),
        )
        .unwrap();
        assert_eq!(url, "https://photos.example.com/share/ABC/IMG_001.jpg");
    }

    #[test]
    fn output_contains_no_placeholder_syntax() {
        let url = format_url(
            "{url}/p/{picture}?n={count}",
            &vars(&[("url", "https://x.example"), ("picture", "a.jpg"), ("count", "7")]),
        )
        .unwrap();
        assert!(!url.contains('{') && !url.contains('}'));
        assert_eq!(url, "https://x.example/p/a.jpg?n=7");
    }

    #[test]
    fn missing_variable_fails_not_passthrough() {
        let err = format_url("https://example.com/{token}", &vars(&[])).unwrap_err();
        match err {
            UrlError::MissingVariable(name) => assert_eq!(name, "token"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn brace_escapes_are_literal() {
        let url = format_url("{{literal}} {picture}", &vars(&[("picture", "x")])).unwrap();
        assert_eq!(url, "{literal} x");
    }

    #[test]
    fn syntax_errors_are_rejected() {
        let cases = ["{open", "close}", "{}", "{a{b}}"];
        for template in cases {
            assert!(
                matches!(format_url(template, &vars(&[])), Err(UrlError::Syntax(_))),
                "template {template:?} should be a syntax error"
            );
        }
    }

    #[test]
    fn check_template_accepts_plain_urls() {
        assert!(check_template("https://example.com/static").is_ok());
        assert!(check_template("{url}").is_ok());
        assert!(check_template("{url").is_err());
    }
}
