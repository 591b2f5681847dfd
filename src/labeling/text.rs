//! Label normalization and truncation.

/// Collapses whitespace runs to single spaces and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turns a candidate phrase into a label of at most `max_chars` characters.
///
/// Over-long phrases are cut at the last space inside the first `max_chars`
/// characters when that space sits past `min_break_index`; otherwise the hard
/// cut is kept. Lengths count chars, not bytes. A cut that leaves nothing
/// (`max_chars == 0`) is `None`, never an empty label.
pub fn pick_label(text: &str, max_chars: usize, min_break_index: usize) -> Option<String> {
    let cleaned = normalize_whitespace(text);
    if cleaned.is_empty() {
        return None;
    }

    let chars: Vec<char> = cleaned.chars().collect();
    if chars.len() <= max_chars {
        return Some(cleaned);
    }

    let sliced = &chars[..max_chars];
    let cut = match sliced.iter().rposition(|c| *c == ' ') {
        Some(space) if space > min_break_index => space,
        _ => max_chars,
    };
    let label: String = sliced[..cut].iter().collect();
    let label = label.trim_end();
    if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    }
}

/// Trims a label, mapping blank input to `None`.
pub fn sanitize_label(label: Option<&str>) -> Option<String> {
    let trimmed = label?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrase_with_space_at(len: usize, space_at: usize) -> String {
        (0..len)
            .map(|i| if i == space_at { ' ' } else { 'a' })
            .collect()
    }

    #[test]
    fn short_text_passes_through_normalized() {
        assert_eq!(
            pick_label("  Salvar \t\n alterações ", 80, 40).as_deref(),
            Some("Salvar alterações")
        );
    }

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(pick_label("", 80, 40), None);
        assert_eq!(pick_label(" \n\t ", 80, 40), None);
    }

    #[test]
    fn long_text_breaks_at_late_space() {
        let phrase = phrase_with_space_at(95, 45);
        let label = pick_label(&phrase, 80, 40).unwrap();
        assert_eq!(label, phrase[..45]);
        assert_eq!(label.chars().count(), 45);
    }

    #[test]
    fn long_text_with_early_space_keeps_hard_cut() {
        let phrase = phrase_with_space_at(95, 10);
        let label = pick_label(&phrase, 80, 40).unwrap();
        assert_eq!(label, phrase[..80]);
    }

    #[test]
    fn space_exactly_at_break_index_is_not_used() {
        let phrase = phrase_with_space_at(95, 40);
        assert_eq!(pick_label(&phrase, 80, 40).unwrap().chars().count(), 80);
    }

    #[test]
    fn exactly_max_chars_is_kept() {
        let phrase = "b".repeat(80);
        assert_eq!(pick_label(&phrase, 80, 40), Some(phrase));
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let phrase = "ç".repeat(90);
        let label = pick_label(&phrase, 80, 40).unwrap();
        assert_eq!(label.chars().count(), 80);
    }

    #[test]
    fn zero_length_budget_is_absent_not_empty() {
        assert_eq!(pick_label("Salvar", 0, 0), None);
    }

    #[test]
    fn hard_cut_never_ends_in_space() {
        // Break index past the budget forces the hard cut right after a space.
        assert_eq!(pick_label("abc defgh", 4, 10).as_deref(), Some("abc"));
    }

    #[test]
    fn sanitize_label_trims_and_drops_blank() {
        assert_eq!(sanitize_label(Some("  Salvar ")).as_deref(), Some("Salvar"));
        assert_eq!(sanitize_label(Some("   ")), None);
        assert_eq!(sanitize_label(None), None);
    }
}
