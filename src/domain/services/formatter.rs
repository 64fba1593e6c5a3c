#[cfg(test)]
#[path = "formatter_test.rs"]
mod tests;

use once_cell::sync::Lazy;
use regex::Regex;

const LINE_BREAK: &str = "<br/>";

static BOLD: Lazy<Regex> = Lazy::new(|| {
    return Regex::new(r"\*\*(.+?)\*\*").unwrap();
});

fn format_line(line: &str) -> String {
    let mut current = line.to_string();
    // Nested or doubled markers can surface a new pair once the outer one is
    // replaced, keep going until nothing matches.
    loop {
        let next = BOLD.replace_all(&current, "<strong>$1</strong>").to_string();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Converts assistant markup into presentation markup: `**text**` becomes
/// `<strong>text</strong>` and line breaks become `<br/>`. Bold markers never
/// pair up across a line break, and `format_response(format_response(s))`
/// equals `format_response(s)` for any `s`.
pub fn format_response(text: &str) -> String {
    return text
        .split('\n')
        .flat_map(|line| return line.split(LINE_BREAK))
        .map(format_line)
        .collect::<Vec<String>>()
        .join(LINE_BREAK);
}
