//! Locate the offending tag in a command line from the command's own error
//! report.
//!
//! The external command reports tag problems on one of the lines following
//! the echoed command, e.g. `unknown tags (foo, bar)`. The cursor should land
//! right after the first offending tag in the command text.

/// Prefixes of the error lines that carry a tag list in parentheses.
const TAG_ERROR_PREFIXES: &[&str] = &["unknown tags (", "bad tag item syntax ("];

/// How many lines after the command line may carry the error report.
const REPORT_LINES: usize = 3;

/// Token delimiters: whitespace, comma and control bytes. Bytes with the high
/// bit set are not delimiters.
fn is_delimiter(b: u8) -> bool {
    b <= b' ' || b == b',' || b == 0x7f
}

/// Split `s` into delimiter-separated words, yielding each word with its
/// starting byte offset.
fn words(s: &[u8]) -> impl Iterator<Item = (usize, &[u8])> {
    let mut i = 0;
    std::iter::from_fn(move || {
        while i < s.len() && is_delimiter(s[i]) {
            i += 1;
        }
        if i >= s.len() {
            return None;
        }
        let start = i;
        while i < s.len() && !is_delimiter(s[i]) {
            i += 1;
        }
        Some((start, &s[start..i]))
    })
}

/// The tag list of the first error report among lines `1..=3`.
fn reported_tags<S: AsRef<str>>(lines: &[S]) -> Option<&[u8]> {
    lines.iter().skip(1).take(REPORT_LINES).find_map(|line| {
        let line = line.as_ref();
        let rest = TAG_ERROR_PREFIXES
            .iter()
            .find_map(|prefix| line.strip_prefix(prefix))?;
        let end = rest.find(')').unwrap_or(rest.len());
        Some(&rest.as_bytes()[..end])
    })
}

/// Find the byte offset just past the earliest word of `lines[0]` that names
/// one of the tags in the error report. Returns `None` if there is no report
/// or none of its tags appear in the command line.
pub fn find_tag_error_pos<S: AsRef<str>>(lines: &[S]) -> Option<usize> {
    let command = lines.first()?.as_ref().as_bytes();
    let tags = reported_tags(lines)?;
    words(tags)
        .filter_map(|(_, tag)| words(command).find(|(_, word)| *word == tag))
        .min_by_key(|(start, _)| *start)
        .map(|(start, word)| start + word.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earliest_match_wins() {
        assert_eq!(find_tag_error_pos(&["a b c", "unknown tags (a, d)"]), Some(1));
        assert_eq!(find_tag_error_pos(&["x foo bar", "unknown tags (bar,foo)"]), Some(5));
    }

    #[test]
    fn no_match() {
        assert_eq!(find_tag_error_pos(&["a b c", "unknown tags (d)"]), None);
        assert_eq!(find_tag_error_pos(&["a b c", "all fine"]), None);
        assert_eq!(find_tag_error_pos::<&str>(&[]), None);
        assert_eq!(find_tag_error_pos(&["a b c"]), None);
    }

    #[test]
    fn whole_words_only() {
        assert_eq!(find_tag_error_pos(&["+abc ab", "unknown tags (ab)"]), Some(7));
        assert_eq!(find_tag_error_pos(&["ab,cd", "bad tag item syntax (cd)"]), Some(5));
    }

    #[test]
    fn report_window() {
        let lines = ["t x y", "", "", "unknown tags (y)"];
        assert_eq!(find_tag_error_pos(&lines), Some(5));
        let lines = ["t x y", "", "", "", "unknown tags (y)"];
        assert_eq!(find_tag_error_pos(&lines), None);
    }

    #[test]
    fn unterminated_list_and_multibyte() {
        assert_eq!(find_tag_error_pos(&["tag árvíz", "unknown tags (árvíz"]), Some(11));
        assert_eq!(find_tag_error_pos(&["tag a\tb", "unknown tags (b)"]), Some(7));
    }
}
