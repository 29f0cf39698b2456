//! Line tokenizer: split on spaces, but not inside double quotes.

/// One token of a command line, remembering whether it came from a quoted
/// section (the dry-run printer re-quotes those).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub quoted: bool,
}

impl Token {
    fn plain(text: impl Into<String>) -> Self {
        Token {
            text: text.into(),
            quoted: false,
        }
    }
}

/// Split a line into tokens separated by ASCII spaces.
///
/// Only the space character delimits; tabs, newlines and other whitespace
/// are ordinary characters. Double quotes group spaces into a single token
/// and are stripped; an unterminated quote captures the rest of the line
/// as one token. Consecutive delimiters yield empty tokens.
///
/// Always returns at least one token (the empty line is one empty token).
pub fn split_space_not_quote(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = Token::plain("");
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.quoted = true;
            }
            ' ' if !in_quotes => {
                tokens.push(std::mem::replace(&mut current, Token::plain("")));
            }
            _ => current.text.push(ch),
        }
    }
    tokens.push(current);
    tokens
}
