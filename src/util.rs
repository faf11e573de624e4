//! Small helpers shared across the crate

use std::time::{SystemTime, UNIX_EPOCH};

/// Spaces a tab expands to when laying out code
pub const TAB_WIDTH: usize = 4;

/// Milliseconds since the Unix epoch (0 if the clock is before 1970)
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Whether the text is empty or only whitespace
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Replace tabs with spaces up to the next tab stop
pub fn expand_tabs(line: &str, tab_width: usize) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }
    let tab_width = tab_width.max(1);
    let mut out = String::with_capacity(line.len() + tab_width);
    let mut column = 0;
    for ch in line.chars() {
        if ch == '\t' {
            let spaces = tab_width - (column % tab_width);
            out.extend(std::iter::repeat(' ').take(spaces));
            column += spaces;
        } else {
            out.push(ch);
            column += 1;
        }
    }
    out
}
