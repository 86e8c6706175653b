//! Text rendering for the query echo and the history panel.

/// Line shown by the query echo subscriber.
pub fn render_query(query: &str) -> String {
    format!("query: {query}")
}

/// History panel: most recent entries on top, numbered by submission order.
pub fn render_history(entries: &[String], panel_size: usize) -> String {
    if entries.is_empty() {
        return "history: (empty)".to_string();
    }

    let total = entries.len();
    let mut out = format!("history ({total}):");
    for (offset, entry) in entries.iter().rev().take(panel_size).enumerate() {
        out.push_str(&format!("\n  {}. {}", total - offset, entry));
    }

    let hidden = total.saturating_sub(panel_size);
    if hidden > 0 {
        out.push_str(&format!("\n  ... {hidden} older"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_history() {
        assert_eq!(render_history(&[], 5), "history: (empty)");
    }

    #[test]
    fn newest_entry_first() {
        let rendered = render_history(&entries(&["cats", "dogs"]), 5);
        assert_eq!(rendered, "history (2):\n  2. dogs\n  1. cats");
    }

    #[test]
    fn truncates_to_panel_size() {
        let rendered = render_history(&entries(&["a", "b", "c", "d"]), 2);
        assert_eq!(rendered, "history (4):\n  4. d\n  3. c\n  ... 2 older");
    }

    #[test]
    fn query_line() {
        assert_eq!(render_query("cats"), "query: cats");
        assert_eq!(render_query(""), "query: ");
    }
}
