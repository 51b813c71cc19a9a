//! Field extraction over parenthesized, whitespace-delimited protocol text.
//!
//! Server messages are S-expression-like blobs such as
//! `(sense_body 127 (view_mode high normal) ...)`. These helpers pull single
//! typed fields out of such text without building a full parse tree. They are
//! pure and total: no I/O, no state, no panics.

/// Extract the integer that follows the first `(marker <digits>` occurrence.
///
/// The marker must be a whole head token: `leading_int(msg, "see")` does not
/// match `(see_global 42 ...)`. Returns `None` when the pattern is absent.
pub fn leading_int(message: &str, marker: &str) -> Option<u64> {
    let mut rest = message;
    loop {
        let open = rest.find('(')?;
        let after = &rest[open + 1..];
        if let Some(tail) = after.strip_prefix(marker) {
            if tail.chars().next().is_some_and(|c| c.is_whitespace()) {
                let digits = tail.trim_start();
                let end = digits
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(digits.len());
                if end > 0 {
                    return digits[..end].parse().ok();
                }
            }
        }
        rest = after;
    }
}

/// Number of player-type definitions announced in a player-params blob.
///
/// Looks for the embedded `(player_types N)` fragment.
pub fn player_type_count(params: &str) -> Option<usize> {
    leading_int(params, "player_types").map(|n| n as usize)
}

/// Reason token of an `(error <reason>)` reply, if the message is one.
///
/// The server answers a rejected init with messages like
/// `(error no_more_team_or_player_or_goalie)`.
pub fn error_reason(message: &str) -> Option<&str> {
    let tail = message.trim_start().strip_prefix("(error")?;
    if !tail.chars().next().is_some_and(|c| c.is_whitespace()) {
        return None;
    }
    let tail = tail.trim_start();
    let end = tail
        .find(|c: char| c.is_whitespace() || c == ')')
        .unwrap_or(tail.len());
    if end == 0 { None } else { Some(&tail[..end]) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_int_simple() {
        let msg = "(sense_body 127 (view_mode high normal))";
        assert_eq!(leading_int(msg, "sense_body"), Some(127));
    }

    #[test]
    fn test_leading_int_embedded() {
        let msg = "(player_param (player_types 18) (subs_max 3))";
        assert_eq!(leading_int(msg, "player_types"), Some(18));
    }

    #[test]
    fn test_leading_int_missing_marker() {
        assert_eq!(leading_int("(see 5 ((f c) 10 0))", "sense_body"), None);
    }

    #[test]
    fn test_leading_int_marker_is_whole_token() {
        // "see" must not match the head of "see_global"
        assert_eq!(leading_int("(see_global 42 ((b) 0 0))", "see"), None);
        assert_eq!(leading_int("(see_global 42 ((b) 0 0))", "see_global"), Some(42));
    }

    #[test]
    fn test_leading_int_no_digits() {
        assert_eq!(leading_int("(sense_body x 1)", "sense_body"), None);
    }

    #[test]
    fn test_leading_int_skips_non_matching_groups() {
        let msg = "(hear 3 referee foul) (sense_body 9 (stamina 8000))";
        assert_eq!(leading_int(msg, "sense_body"), Some(9));
    }

    #[test]
    fn test_player_type_count_zero() {
        assert_eq!(player_type_count("(player_param (player_types 0))"), Some(0));
    }

    #[test]
    fn test_player_type_count_malformed() {
        assert_eq!(player_type_count("(player_param (subs_max 3))"), None);
    }

    #[test]
    fn test_error_reason() {
        assert_eq!(
            error_reason("(error no_more_team_or_player_or_goalie)"),
            Some("no_more_team_or_player_or_goalie")
        );
        assert_eq!(error_reason("(init l 1 before_kick_off)"), None);
        assert_eq!(error_reason("(errors 1)"), None);
    }
}
