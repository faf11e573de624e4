//! Window filename tracking
//!
//! When the language changes, the filename shown in the window title bar
//! follows the new language's extension, but only while the user hasn't
//! renamed it away from the previous language's pattern.

use crate::language::Language;

/// Rewrite `filename` for a `prev` → `next` language transition.
///
/// Returns `None` when the filename stays as it is: it is empty, or it
/// neither equals `<prev>.<prev ext>` nor ends with `.<prev ext>`.
/// A default name becomes the new language's default name; any other
/// match has only its trailing `.<prev ext>` replaced with `.<next ext>`.
/// An unmapped language has an empty extension, so switching to it leaves
/// a trailing dot.
pub fn sync_filename(filename: &str, prev: Language, next: Language) -> Option<String> {
    if filename.is_empty() || prev == next {
        return None;
    }

    let prev_suffix = format!(".{}", prev.extension());
    if filename == prev.default_filename() {
        return Some(next.default_filename());
    }
    if !filename.ends_with(&prev_suffix) {
        return None;
    }

    let stem = &filename[..filename.len() - prev_suffix.len()];
    Some(format!("{}.{}", stem, next.extension()))
}
