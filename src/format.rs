use crate::fields::FieldValue;
use std::fmt::Write;

/// Number of `{}` placeholders in `pattern`. `{{` and `}}` are literal
/// braces and do not count.
pub fn placeholder_count(pattern: &str) -> usize {
    let mut count = 0;
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
            }
            '{' if chars.peek() == Some(&'}') => {
                chars.next();
                count += 1;
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
            }
            _ => {}
        }
    }
    count
}

/// Substitute resolved values into the output pattern, in order.
///
/// Placeholder arity is validated when the configuration is built, so
/// this never fails mid-call; a placeholder without a value renders
/// empty.
pub fn render(pattern: &str, values: &[FieldValue]) -> String {
    let mut out = String::with_capacity(pattern.len() + values.len() * 8);
    let mut next = 0;
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' if chars.peek() == Some(&'}') => {
                chars.next();
                if let Some(value) = values.get(next) {
                    let _ = write!(out, "{}", value);
                }
                next += 1;
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_placeholders() {
        assert_eq!(placeholder_count(""), 0);
        assert_eq!(placeholder_count("plain text"), 0);
        assert_eq!(placeholder_count("{} [{}] {}:{}"), 4);
        assert_eq!(placeholder_count("{{literal}} {}"), 1);
    }

    #[test]
    fn substitutes_in_order() {
        let values = [
            FieldValue::Str("INFO".to_string()),
            FieldValue::Uint(7),
            FieldValue::Str("ready".to_string()),
        ];
        assert_eq!(render("{} #{}: {}", &values), "INFO #7: ready");
    }

    #[test]
    fn escaped_braces_stay_literal() {
        let values = [FieldValue::Int(-1)];
        assert_eq!(render("{{{}}}", &values), "{-1}");
    }

    #[test]
    fn missing_values_render_empty() {
        assert_eq!(render("a {} b {}", &[FieldValue::Uint(1)]), "a 1 b ");
    }
}
