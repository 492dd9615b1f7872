/// Cuts `msg` to at most `max_chars` characters, appending `...` when shortened.
///
/// Sink and provider errors can carry whole SQL statements or HTML pages; this
/// keeps a log line readable.
pub fn truncate_message(msg: &str, max_chars: usize) -> String {
    let msg = msg.trim();
    match msg.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &msg[..cut]),
        None => msg.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_messages_are_untouched() {
        assert_eq!(truncate_message("duplicate key", 200), "duplicate key");
    }

    #[test]
    fn long_messages_are_cut_on_char_boundary() {
        let msg = "é".repeat(10);
        assert_eq!(truncate_message(&msg, 4), "éééé...");
    }
}
