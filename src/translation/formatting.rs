/*!
 * Android resource escaping for translated text.
 *
 * Service responses are plain text. Before they are stored in the result
 * map they are escaped for `strings.xml`: markup characters become entities,
 * quotes get a backslash, newlines become `\n` and lone percent signs are
 * doubled so they are not read as format specifiers.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `%%`, a `%` followed by a format character, or a lone `%`
static PERCENT_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%(?:%|[0-9$sSdfFcbBxXonT])?").unwrap()
});

/// Escape text for use as the content of an Android string resource
///
/// Quotes already preceded by a backslash are left alone, as are format
/// specifiers (`%s`, `%1$d`) and escaped percent signs (`%%`).
pub fn escape_android(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut escaped = false;

    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' | '"' if !escaped => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
        escaped = c == '\\' && !escaped;
    }

    PERCENT_TOKEN
        .replace_all(&out, |caps: &Captures<'_>| {
            if &caps[0] == "%" {
                "%%".to_string()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}
