//! DDL tokenizer implementation.

use super::{Pos, Token, TokenKind};

/// A lexer that tokenizes MySQL DDL input.
///
/// Unlike most lexers this one does not discard whitespace or comments:
/// each run of whitespace collapses into a single `SPACE` token and each
/// comment becomes a `COMMENT_IDENT` token, because the parser needs them
/// as soft statement separators.
pub struct Lexer<'a> {
    /// The input source text.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Line of the character at `pos` (1-based).
    line: u32,
    /// Column of the character at `pos` (1-based).
    col: u32,
    /// Position of the first character of the current token.
    start_pos: Pos,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            line: 1,
            col: 1,
            start_pos: Pos::new(1, 1),
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    /// Returns the position just past the end of the input.
    #[must_use]
    pub const fn end_pos(&self) -> Pos {
        Pos::new(self.line, self.col)
    }

    /// Creates a token spanning from the token start to the current position.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            String::from(&self.input[self.start..self.pos]),
            self.start_pos,
        )
    }

    /// Creates a token whose value differs from the raw source slice.
    fn make_value_token(&self, kind: TokenKind, value: String) -> Token {
        Token::new(kind, value, self.start_pos)
    }

    /// Scans a run of whitespace into a single token.
    fn scan_whitespace(&mut self) -> Token {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
        self.make_token(TokenKind::Space)
    }

    /// Scans a `-- …` or `# …` comment up to (not including) the newline.
    fn scan_line_comment(&mut self) -> Token {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
        self.make_token(TokenKind::CommentIdent)
    }

    /// Scans a `/* … */` comment. An unterminated comment runs to the end
    /// of input.
    fn scan_block_comment(&mut self) -> Token {
        self.advance(); // /
        self.advance(); // *
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    break;
                }
                None => break,
                _ => {}
            }
        }
        self.make_token(TokenKind::CommentIdent)
    }

    /// Returns true if a numeric literal provably starts at the current
    /// position, one character past a `+`/`-` sign.
    fn number_follows_sign(&self) -> bool {
        match self.peek_next() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => {
                let mut chars = self.input[self.pos..].chars();
                chars.next();
                chars.next();
                chars.next().is_some_and(|c| c.is_ascii_digit())
            }
            _ => false,
        }
    }

    /// Scans a number: optional sign, optional integer part, optional
    /// fraction, optional exponent. The entry conditions guarantee at
    /// least one digit.
    fn scan_number(&mut self) -> Token {
        if matches!(self.peek(), Some('+' | '-')) {
            self.advance();
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        if matches!(self.peek(), Some('e' | 'E')) && self.exponent_follows() {
            self.advance(); // e/E
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        self.make_token(TokenKind::Number)
    }

    /// Returns true if the `e`/`E` at the current position begins a valid
    /// exponent (digits, or a sign followed by digits).
    fn exponent_follows(&self) -> bool {
        let mut chars = self.input[self.pos..].chars();
        chars.next(); // e/E
        match chars.next() {
            Some(c) if c.is_ascii_digit() => true,
            Some('+' | '-') => chars.next().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    /// Scans a single- or double-quoted string. The delimiter doubled is
    /// an escaped delimiter, and backslash escapes for `'`, `"`, and `\`
    /// are unescaped.
    fn scan_quoted_string(&mut self, quote: char, kind: TokenKind) -> Token {
        self.advance(); // opening quote
        let mut value = String::new();
        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    if self.peek_next() == Some(quote) {
                        value.push(quote);
                        self.advance();
                        self.advance();
                    } else {
                        self.advance();
                        return self.make_value_token(kind, value);
                    }
                }
                Some('\\') => match self.peek_next() {
                    Some(esc @ ('\'' | '"' | '\\')) => {
                        value.push(esc);
                        self.advance();
                        self.advance();
                    }
                    _ => {
                        value.push('\\');
                        self.advance();
                    }
                },
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => return self.make_value_token(TokenKind::Illegal, value),
            }
        }
    }

    /// Scans a backtick-quoted identifier. A doubled backtick is an
    /// escaped backtick; backslash has no special meaning.
    fn scan_backtick_ident(&mut self) -> Token {
        self.advance(); // opening backtick
        let mut value = String::new();
        loop {
            match self.peek() {
                Some('`') => {
                    if self.peek_next() == Some('`') {
                        value.push('`');
                        self.advance();
                        self.advance();
                    } else {
                        self.advance();
                        return self.make_value_token(TokenKind::BacktickIdent, value);
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => return self.make_value_token(TokenKind::Illegal, value),
            }
        }
    }

    /// Scans a bareword, then classifies it via the keyword table.
    fn scan_bareword(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }
        let text = &self.input[self.start..self.pos];
        match TokenKind::keyword(text) {
            Some(kind) => self.make_token(kind),
            None => self.make_token(TokenKind::Ident),
        }
    }

    /// Scans the next token, or returns `None` at end of input.
    ///
    /// The token stream never contains an EOF token; the parser
    /// synthesizes one when it reads past the end.
    pub fn next_token(&mut self) -> Option<Token> {
        self.start = self.pos;
        self.start_pos = Pos::new(self.line, self.col);

        let c = self.peek()?;
        let token = match c {
            c if c.is_whitespace() => self.scan_whitespace(),
            '-' => {
                if self.peek_next() == Some('-') {
                    self.scan_line_comment()
                } else if self.number_follows_sign() {
                    self.scan_number()
                } else {
                    self.advance();
                    self.make_token(TokenKind::Dash)
                }
            }
            '+' => {
                if self.number_follows_sign() {
                    self.scan_number()
                } else {
                    self.advance();
                    self.make_token(TokenKind::Plus)
                }
            }
            '#' => self.scan_line_comment(),
            '/' => {
                if self.peek_next() == Some('*') {
                    self.scan_block_comment()
                } else {
                    self.advance();
                    self.make_token(TokenKind::Slash)
                }
            }
            '.' => {
                if self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number()
                } else {
                    self.advance();
                    self.make_token(TokenKind::Dot)
                }
            }
            '(' => {
                self.advance();
                self.make_token(TokenKind::LParen)
            }
            ')' => {
                self.advance();
                self.make_token(TokenKind::RParen)
            }
            ',' => {
                self.advance();
                self.make_token(TokenKind::Comma)
            }
            ';' => {
                self.advance();
                self.make_token(TokenKind::Semicolon)
            }
            '*' => {
                self.advance();
                self.make_token(TokenKind::Asterisk)
            }
            '=' => {
                self.advance();
                self.make_token(TokenKind::Equal)
            }
            '\'' => self.scan_quoted_string('\'', TokenKind::SingleQuoteIdent),
            '"' => self.scan_quoted_string('"', TokenKind::DoubleQuoteIdent),
            '`' => self.scan_backtick_ident(),
            c if c.is_ascii_digit() => self.scan_number(),
            c if c.is_ascii_alphabetic() || c == '_' => self.scan_bareword(),
            _ => {
                self.advance();
                self.make_token(TokenKind::Illegal)
            }
        };
        Some(token)
    }

    /// Tokenizes the entire input.
    #[must_use]
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        tokens
    }
}
