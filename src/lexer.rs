#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Text(String),
    OpenTemplate,  // {{
    CloseTemplate, // }}

    // Operators
    Pipe,     // |
    Question, // ?
    Colon,    // :
    Or,       // or

    // Data
    Ident(String),
    StringLit(String),
}

/// Single-pass scanner over a template string. One bit of mode state:
/// outside `{{ }}` everything is text, inside it is expression tokens with
/// whitespace skipped. The tokenizer is total; malformed expression content
/// is left for the parser to reject.
#[derive(Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    cursor: usize,
    in_template: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            cursor: 0,
            in_template: false,
        }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.cursor..]
    }

    fn advance(&mut self, n: usize) {
        self.cursor += n;
    }

    pub fn next_token(&mut self) -> Option<Token> {
        let rest = self.remaining();
        if rest.is_empty() {
            return None;
        }

        if !self.in_template {
            match rest.find("{{") {
                Some(0) => {
                    self.advance(2);
                    self.in_template = true;
                    Some(Token::OpenTemplate)
                }
                Some(idx) => {
                    // Text run up to the next opener.
                    let text = rest[..idx].to_string();
                    self.advance(idx);
                    Some(Token::Text(text))
                }
                None => {
                    // All text
                    let text = rest.to_string();
                    self.advance(rest.len());
                    Some(Token::Text(text))
                }
            }
        } else {
            // In template: skip whitespace
            let rest_trimmed = rest.trim_start();
            let skipped = rest.len() - rest_trimmed.len();
            self.advance(skipped);

            let rest = self.remaining();
            if rest.is_empty() {
                return None;
            }

            if rest.starts_with("}}") {
                self.advance(2);
                self.in_template = false;
                return Some(Token::CloseTemplate);
            }
            if rest.starts_with('|') {
                self.advance(1);
                return Some(Token::Pipe);
            }
            if rest.starts_with('?') {
                self.advance(1);
                return Some(Token::Question);
            }
            if rest.starts_with(':') {
                self.advance(1);
                return Some(Token::Colon);
            }

            // Strings
            let first = rest.chars().next().unwrap();
            if first == '\'' || first == '"' {
                return Some(self.scan_string(rest, first));
            }

            // Identifiers / keywords
            if first.is_ascii_alphabetic() || first == '_' {
                let ident: String = rest
                    .chars()
                    .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                    .collect();
                self.advance(ident.len());

                return match ident.as_str() {
                    "or" => Some(Token::Or),
                    _ => Some(Token::Ident(ident)),
                };
            }

            // Unknown char: skip it and try again.
            self.advance(first.len_utf8());
            self.next_token()
        }
    }

    /// Scan a quoted literal starting at `rest`. A backslash drops itself
    /// and keeps the following character verbatim (no `\n`-style
    /// interpretation). An unterminated literal absorbs the rest of the
    /// input and still yields a token.
    fn scan_string(&mut self, rest: &str, quote: char) -> Token {
        let mut s = String::new();
        let mut consumed = quote.len_utf8();
        let mut escaped = false;

        for c in rest[consumed..].chars() {
            consumed += c.len_utf8();
            if escaped {
                s.push(c);
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                self.advance(consumed);
                return Token::StringLit(s);
            } else {
                s.push(c);
            }
        }

        // No closing quote before end of input.
        self.advance(rest.len());
        Token::StringLit(s)
    }
}

/// Drain a [`Tokenizer`] into a vector for the parser's index-based pass.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = tokenizer.next_token() {
        tokens.push(token);
    }
    tokens
}
