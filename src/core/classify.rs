//! Argument classification for variadic log calls
//!
//! A formatted call like `infof("value %d", 42, "k", "v")` carries three
//! kinds of arguments in one flat list: positional format substitutions,
//! trailing key/value field pairs and, possibly, an embedded error. This
//! module decides which is which.

use super::value::{ErrorValue, Value};

/// Outcome of splitting a formatted call's argument list.
#[derive(Debug)]
pub struct Classified<'a> {
    /// Arguments consumed by `%` placeholders in the message.
    pub format_args: &'a [Value],
    /// Remaining arguments, interpreted as a flat key/value field list.
    pub field_args: &'a [Value],
}

/// Splits `args` between format substitutions and field pairs.
///
/// The number of `%` characters in `message` decides the split:
/// - more than zero and at most `args.len()`: that many leading arguments
///   are substitutions, the rest are fields;
/// - zero with a non-empty list: everything is a field and the message is
///   used verbatim (no formatting is attempted);
/// - otherwise every argument is a substitution and there are no fields.
pub fn split_formatted<'a>(message: &str, args: &'a [Value]) -> Classified<'a> {
    let placeholders = message.matches('%').count();
    if placeholders > 0 && placeholders <= args.len() {
        Classified {
            format_args: &args[..placeholders],
            field_args: &args[placeholders..],
        }
    } else if placeholders == 0 && !args.is_empty() {
        Classified {
            format_args: &[],
            field_args: args,
        }
    } else {
        Classified {
            format_args: args,
            field_args: &[],
        }
    }
}

/// Substitutes `%` placeholders in `message` with the `Display` form of
/// `args`, left to right.
///
/// A placeholder is `%` followed by optional flag/width/precision characters
/// and a single verb letter; the verb itself is ignored, every placeholder
/// consumes one argument. `%%` renders a literal `%` and consumes nothing.
/// When arguments run out the placeholder text is kept as written: malformed
/// input degrades, it never fails.
pub fn format_message(message: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(message.len() + 16);
    let mut args = args.iter();
    let mut chars = message.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        if let Some(&(_, '%')) = chars.peek() {
            chars.next();
            out.push('%');
            continue;
        }

        // consume flags, width and precision, then a single verb letter
        let mut end = start + 1;
        let mut has_verb = false;
        while let Some(&(pos, next)) = chars.peek() {
            if next.is_ascii_alphabetic() {
                chars.next();
                end = pos + next.len_utf8();
                has_verb = true;
                break;
            }
            if next.is_ascii_digit() || matches!(next, '+' | '-' | '#' | ' ' | '.') {
                chars.next();
                end = pos + next.len_utf8();
                continue;
            }
            break;
        }

        if has_verb {
            if let Some(arg) = args.next() {
                out.push_str(&arg.to_string());
                continue;
            }
        }
        out.push_str(&message[start..end]);
    }
    out
}

/// Removes the first error-typed argument from a field list, together with
/// the key immediately preceding it, and returns it.
///
/// The scan is stable and left-to-right; any later error-typed arguments
/// stay in the list as ordinary fields. Returns `None` when no error is
/// present.
pub fn extract_error(fields: &mut Vec<Value>) -> Option<ErrorValue> {
    let idx = fields.iter().position(Value::is_error)?;
    let removed = fields.remove(idx);
    if idx > 0 {
        fields.remove(idx - 1);
    }
    match removed {
        Value::Error(err) => Some(err),
        _ => None,
    }
}
