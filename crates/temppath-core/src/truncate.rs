//! Basename truncation.
//!
//! Generated temp paths can push a basename past what the filesystem accepts
//! (`ENAMETOOLONG`). [`truncate`] shortens the stem of an over-long basename
//! while keeping the hidden-file dot, the original extension and the
//! generated suffix intact:
//!
//! ```text
//! .  report-with-a-very-long-name  .json.tmp-1234567890aabbcc
//! ^  ^                             ^
//! |  stem (shortened from the end) trailing part (kept verbatim)
//! hidden marker
//! ```
//!
//! The limit is a configured constant, not a probed filesystem limit, so this
//! is best effort. When the basename cannot be parsed, or the stem is too
//! short to absorb the excess, the path is returned unchanged.
//!
//! # Parsing
//!
//! [`parse_basename`] picks the shortest stem whose remainder is a valid
//! trailing part, taking the leading dot as a marker whenever a parse exists
//! with it. A trailing part is empty, or a `.ext` (one dot followed by
//! non-dot chars), or a generated suffix, or `.ext` followed by a generated
//! suffix. The marker and stem may not contain line terminators; a basename
//! with no valid split is left alone.

use tracing::debug;

use crate::constants::SUFFIX_LEN;
use crate::naming::is_suffix;

/// The three parts of a parsed basename.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BasenameParts<'a> {
    /// `"."` for hidden files when taken as a marker, otherwise empty.
    pub marker: &'a str,
    /// Portion that may be shortened.
    pub stem: &'a str,
    /// Extension and/or generated suffix, preserved verbatim.
    pub trailing: &'a str,
}

/// Shorten the basename of `path` to at most `limit` chars when possible.
///
/// Lengths are counted in chars. Returns `path` unchanged when the basename
/// already fits, when it cannot be parsed, or when its stem is shorter than
/// the required reduction.
#[must_use]
pub fn truncate(path: &str, limit: usize) -> String {
    let (parent, basename) = split_basename(path);
    let basename_len = basename.chars().count();
    if basename_len <= limit {
        return path.to_owned();
    }

    let Some(parts) = parse_basename(basename) else {
        debug!(path, limit, "basename not truncatable, keeping path as is");
        return path.to_owned();
    };

    let excess = basename_len - limit;
    let stem_len = parts.stem.chars().count();
    if stem_len < excess {
        debug!(
            path,
            limit, stem_len, excess, "stem too short to truncate, keeping path as is"
        );
        return path.to_owned();
    }

    let keep = stem_len - excess;
    let cut = parts
        .stem
        .char_indices()
        .nth(keep)
        .map_or(parts.stem.len(), |(idx, _)| idx);

    let mut out = String::with_capacity(path.len());
    out.push_str(parent);
    out.push_str(parts.marker);
    out.push_str(&parts.stem[..cut]);
    out.push_str(parts.trailing);
    out
}

/// Split `basename` into marker, stem and trailing part.
///
/// Returns `None` when no split exists, which only happens when a line
/// terminator sits in the stem region.
#[must_use]
pub fn parse_basename(basename: &str) -> Option<BasenameParts<'_>> {
    if let Some(rest) = basename.strip_prefix('.') {
        if let Some((stem, trailing)) = split_stem(rest) {
            return Some(BasenameParts {
                marker: &basename[..1],
                stem,
                trailing,
            });
        }
    }
    split_stem(basename).map(|(stem, trailing)| BasenameParts {
        marker: "",
        stem,
        trailing,
    })
}

/// Split a path into its parent (including the final separator) and basename.
#[must_use]
pub fn split_basename(path: &str) -> (&str, &str) {
    match path.rfind(std::path::is_separator) {
        Some(idx) => path.split_at(idx + 1),
        None => ("", path),
    }
}

fn split_stem(rest: &str) -> Option<(&str, &str)> {
    for (idx, ch) in rest.char_indices() {
        if is_trailing(&rest[idx..]) {
            return Some(rest.split_at(idx));
        }
        if is_line_terminator(ch) {
            return None;
        }
    }
    Some((rest, ""))
}

fn is_trailing(s: &str) -> bool {
    if s.is_empty() || is_extension(s) || is_suffix(s) {
        return true;
    }
    let Some(split) = s.len().checked_sub(SUFFIX_LEN) else {
        return false;
    };
    match (s.get(..split), s.get(split..)) {
        (Some(ext), Some(suffix)) => is_extension(ext) && is_suffix(suffix),
        _ => false,
    }
}

fn is_extension(s: &str) -> bool {
    s.strip_prefix('.')
        .is_some_and(|ext| !ext.is_empty() && !ext.contains('.'))
}

fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
