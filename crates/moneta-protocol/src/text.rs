//! Text command protocol: `GET <query>` in, result lines out.
//!
//! One frame (a newline-delimited line, as produced by the transport's
//! `FrameReader`) carries one command. The parameter may be bare or
//! wrapped in one pair of matching single or double quotes so that it
//! can contain spaces: `GET "Costa Rica"`.

use moneta_data::Currency;

/// Greeting written to every text-protocol client on connect.
pub const BANNER: &str = "Connected...\nUsage: GET <currency, country, or code>\n";

/// Response line for an unparsable or unrecognized command.
pub const INVALID_COMMAND: &str = "Invalid command\n";

/// Response line for a query with zero matches.
pub const NOTHING_FOUND: &str = "Nothing found\n";

/// A parsed text-protocol command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextCommand {
    /// Look up currencies matching the parameter.
    Get(String),
}

/// Parses one frame into a command.
///
/// A frame must tokenize into exactly two tokens — the command and its
/// parameter — and the command must be `GET` (case-insensitive).
/// Anything else, including the empty frame, is `None`: the caller
/// answers with [`INVALID_COMMAND`]. The parameter has one matching
/// pair of surrounding quotes stripped, exactly once.
pub fn parse_command(frame: &str) -> Option<TextCommand> {
    let tokens = tokenize(frame);
    let [cmd, param] = tokens.as_slice() else {
        return None;
    };
    if !cmd.eq_ignore_ascii_case("GET") {
        return None;
    }
    Some(TextCommand::Get(strip_quotes(param).to_string()))
}

/// Renders a result set as response lines.
///
/// One line per record, `<Name> <Code> <Number> <Country>`; an empty
/// result set renders as [`NOTHING_FOUND`].
pub fn render_results(results: &[Currency]) -> String {
    if results.is_empty() {
        return NOTHING_FOUND.to_string();
    }
    results
        .iter()
        .map(|c| format!("{} {} {} {}\n", c.name, c.code, c.number, c.country))
        .collect()
}

/// Splits a frame into whitespace-separated tokens, keeping a quoted
/// span (`'...'` or `"..."`, at least one character inside) together
/// as a single token, quotes included.
fn tokenize(frame: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = frame.char_indices().collect();
    let n = chars.len();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < n {
        let (start, c) = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        if c == '\'' || c == '"' {
            // A quoted span needs a closing quote with something inside;
            // a lone quote falls through and is treated as a bare token.
            if let Some(close) = (i + 2..n).find(|&j| chars[j].1 == c) {
                let end = chars[close].0 + 1;
                tokens.push(&frame[start..end]);
                i = close + 1;
                continue;
            }
        }
        let mut j = i;
        while j < n && !chars[j].1.is_whitespace() {
            j += 1;
        }
        let end = if j < n { chars[j].0 } else { frame.len() };
        tokens.push(&frame[start..end]);
        i = j;
    }
    tokens
}

/// Strips one matching pair of surrounding quotes, if present.
fn strip_quotes(token: &str) -> &str {
    for quote in ['"', '\''] {
        if token.len() >= 2 && token.starts_with(quote) && token.ends_with(quote) {
            return &token[1..token.len() - 1];
        }
    }
    token
}
