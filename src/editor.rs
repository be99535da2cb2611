use std::borrow::Cow::{self, Borrowed, Owned};

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::{Highlighter, MatchingBracketHighlighter};
use rustyline::hint::HistoryHinter;
use rustyline::validate::MatchingBracketValidator;
use rustyline::{Completer, Context, Helper, Hinter, Validator};

use crate::account::AccountKind;
use crate::parser::COMMANDS;

#[derive(Helper, Completer, Hinter, Validator)]
pub(crate) struct BankHelper {
    #[rustyline(Completer)]
    pub(crate) completer: CommandCompleter,
    pub(crate) highlighter: MatchingBracketHighlighter,
    #[rustyline(Validator)]
    pub(crate) validator: MatchingBracketValidator,
    #[rustyline(Hinter)]
    pub(crate) hinter: HistoryHinter,
}

impl BankHelper {
    pub(crate) fn new() -> BankHelper {
        BankHelper {
            completer: CommandCompleter,
            highlighter: MatchingBracketHighlighter::new(),
            validator: MatchingBracketValidator::new(),
            hinter: HistoryHinter {},
        }
    }
}

impl Highlighter for BankHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Owned("\x1b[1;32m".to_owned() + prompt + "\x1b[m")
        } else {
            Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned("\x1b[2m".to_owned() + hint + "\x1b[m")
    }

    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_char(&self, line: &str, pos: usize, forced: bool) -> bool {
        self.highlighter.highlight_char(line, pos, forced)
    }
}

/// Tab completion for command words, and account types after `open`.
pub(crate) struct CommandCompleter;

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, words) = candidates(line, pos);
        let pairs = words.into_iter().map(|word| Pair {
            display: word.to_string(),
            replacement: format!("{word} "),
        }).collect();
        Ok((start, pairs))
    }
}

/// Start of the word under the cursor and the words that could complete it
fn candidates(line: &str, pos: usize) -> (usize, Vec<&'static str>) {
    let line = &line[..pos];
    let start = line.rfind(|c: char| c.is_ascii_whitespace()).map(|i| i + 1).unwrap_or(0);
    let word = line[start..].to_ascii_lowercase();

    let choices: Vec<&'static str> = if start == 0 {
        COMMANDS.iter().map(|(name, _)| *name).collect()
    } else if line[..start].trim().eq_ignore_ascii_case("open") {
        vec![AccountKind::SAVINGS, AccountKind::CHECKING]
    } else {
        vec![]
    };

    (start, choices.into_iter().filter(|choice| choice.starts_with(&word)).collect())
}

#[cfg(test)]
mod tests {
    use crate::editor::candidates;

    #[test]
    fn test_complete_command() {
        assert_eq!(candidates("s", 1), (0, vec!["summary", "select"]));
        assert_eq!(candidates("EX", 2), (0, vec!["export"]));
        assert_eq!(candidates("", 0).1.len(), 9);
    }

    #[test]
    fn test_complete_account_type() {
        assert_eq!(candidates("open ch", 7), (5, vec!["checking"]));
        assert_eq!(candidates("open ", 5), (5, vec!["savings", "checking"]));
        assert_eq!(candidates("add 5", 5), (4, vec![]));
    }
}
