/// Characters that always form a token of their own outside quoted strings.
const DELIMITERS: &[char] = &['(', ')', '[', ']', '{', '}', ';', '=', '&', '|', ','];

/// Split rule source text into a flat token sequence.
///
/// Tokens are separated by runs of whitespace and by the single-character
/// delimiters `( ) [ ] { } ; = & | ,`, each delimiter becoming its own
/// token. Between a quote character (`'` or `"`) and the next occurrence of
/// the same quote, delimiters and whitespace are part of the token. There
/// are no escape sequences; an unterminated string simply runs to the end
/// of its token and is rejected later, during operand parsing. Empty tokens
/// are discarded. No semantic validation happens here.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // While Some(q), we are inside a string delimited by the quote char q.
    let mut in_string: Option<char> = None;

    for ch in text.chars() {
        if let Some(quote) = in_string {
            current.push(ch);
            if ch == quote {
                in_string = None;
            }
        } else if ch == '\'' || ch == '"' {
            current.push(ch);
            in_string = Some(ch);
        } else if ch.is_whitespace() {
            flush(&mut tokens, &mut current);
        } else if DELIMITERS.contains(&ch) {
            flush(&mut tokens, &mut current);
            tokens.push(ch.to_string());
        } else {
            current.push(ch);
        }
    }
    flush(&mut tokens, &mut current);

    tokens
}

fn flush(tokens: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}
