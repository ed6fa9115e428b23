//! Domain logic for client-side input handling.

/// Check whether an input line asks the client to leave.
///
/// Matches `quit` case-insensitively, ignoring surrounding whitespace.
pub fn is_quit_command(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("quit")
}

/// Check whether an input line should be sent at all
pub(crate) fn is_sendable(line: &str) -> bool {
    !line.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_quit_command_is_case_insensitive() {
        // テスト項目: quit は大文字小文字を区別せずに判定される
        // given (前提条件):
        let inputs = ["quit", "QUIT", "Quit", "  qUiT  "];

        // when (操作):
        let results: Vec<bool> = inputs.iter().map(|line| is_quit_command(line)).collect();

        // then (期待する結果):
        assert!(results.iter().all(|r| *r));
    }

    #[test]
    fn test_is_quit_command_rejects_other_lines() {
        // テスト項目: quit 以外の入力は終了コマンドとして扱われない
        // given (前提条件):
        let inputs = ["quit now", "exit", "", "qui t"];

        // when (操作):
        let results: Vec<bool> = inputs.iter().map(|line| is_quit_command(line)).collect();

        // then (期待する結果):
        assert!(results.iter().all(|r| !*r));
    }

    #[test]
    fn test_is_sendable_skips_blank_lines() {
        // テスト項目: 空白のみの行は送信されない
        // given (前提条件):

        // when (操作):

        // then (期待する結果):
        assert!(!is_sendable(""));
        assert!(!is_sendable("   "));
        assert!(is_sendable(" hi "));
    }
}
