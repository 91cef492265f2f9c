use super::{token::Sym, Column};
use std::rc::Rc;

/// ## Token source
///
/// Streaming tokenizer with exactly one symbol of lookahead. `advance`
/// moves to the next symbol; the accessors expose the current symbol
/// kind, its lexeme, and its source position. The first symbol is not
/// available until `advance` has been called once.

pub struct Lex<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    sym: Sym,
    id: Rc<str>,
    num: i64,
    text: Rc<str>,
    line: u16,
    col: usize,
    start: usize,
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl<'a> Lex<'a> {
    pub fn new(source: &'a str) -> Lex<'a> {
        Lex {
            chars: source.chars().peekable(),
            sym: Sym::Nul,
            id: "".into(),
            num: 0,
            text: "".into(),
            line: 1,
            col: 0,
            start: 0,
        }
    }

    /// Kind of the current symbol.
    pub fn sym(&self) -> Sym {
        self.sym
    }

    /// Identifier text, valid when the current symbol is `Ident`.
    pub fn id(&self) -> &Rc<str> {
        &self.id
    }

    /// Numeric value, valid when the current symbol is `Number`.
    /// Widened to `i64` so magnitude checking is the parser's call.
    pub fn num(&self) -> i64 {
        self.num
    }

    /// String literal content, valid when the current symbol is
    /// `StringLit`.
    pub fn text(&self) -> &Rc<str> {
        &self.text
    }

    pub fn line(&self) -> u16 {
        self.line
    }

    pub fn column(&self) -> Column {
        self.start..self.col
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line = self.line.saturating_add(1);
            self.col = 0;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    pub fn advance(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
        self.start = self.col;
        let ch = match self.chars.peek() {
            Some(&ch) => ch,
            None => {
                self.sym = Sym::Nul;
                return;
            }
        };
        if is_ident_start(ch) {
            self.word();
        } else if ch.is_ascii_digit() {
            self.number();
        } else if ch == '"' {
            self.string();
        } else {
            self.minutia();
        }
    }

    fn word(&mut self) {
        let mut s = String::new();
        while let Some(&ch) = self.chars.peek() {
            if is_ident_char(ch) {
                s.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        match Sym::keyword(&s) {
            Some(sym) => self.sym = sym,
            None => {
                self.sym = Sym::Ident;
                self.id = s.into();
            }
        }
    }

    fn number(&mut self) {
        let mut n: i64 = 0;
        while let Some(&ch) = self.chars.peek() {
            match ch.to_digit(10) {
                Some(d) => {
                    // Saturate; the parser rejects anything past AMAX.
                    n = n.saturating_mul(10).saturating_add(d as i64);
                    self.bump();
                }
                None => break,
            }
        }
        self.sym = Sym::Number;
        self.num = n;
    }

    fn string(&mut self) {
        self.bump();
        let mut s = String::new();
        loop {
            match self.bump() {
                Some('"') | None => break,
                Some(ch) => s.push(ch),
            }
        }
        self.sym = Sym::StringLit;
        self.text = s.into();
    }

    fn minutia(&mut self) {
        let ch = match self.bump() {
            Some(ch) => ch,
            None => {
                self.sym = Sym::Nul;
                return;
            }
        };
        self.sym = match ch {
            '+' => Sym::Plus,
            '-' => Sym::Minus,
            '*' => Sym::Times,
            '/' => Sym::Slash,
            '(' => Sym::LParen,
            ')' => Sym::RParen,
            '{' => Sym::LBrace,
            '}' => Sym::RBrace,
            ',' => Sym::Comma,
            ';' => Sym::Semicolon,
            '=' => Sym::Eql,
            '<' => self.with_equals(Sym::Leq, Sym::Lss),
            '>' => self.with_equals(Sym::Geq, Sym::Gtr),
            ':' => self.with_equals(Sym::Becomes, Sym::Nul),
            '!' => self.with_equals(Sym::Neq, Sym::Nul),
            _ => Sym::Nul,
        };
    }

    fn with_equals(&mut self, with: Sym, without: Sym) -> Sym {
        if let Some('=') = self.chars.peek() {
            self.bump();
            with
        } else {
            without
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syms(source: &str) -> Vec<Sym> {
        let mut lex = Lex::new(source);
        let mut v = vec![];
        loop {
            lex.advance();
            if lex.sym() == Sym::Nul {
                return v;
            }
            v.push(lex.sym());
        }
    }

    #[test]
    fn test_symbols() {
        assert_eq!(
            syms("main { var x; x := 1 <= 2; }"),
            vec![
                Sym::Main,
                Sym::LBrace,
                Sym::Var,
                Sym::Ident,
                Sym::Semicolon,
                Sym::Ident,
                Sym::Becomes,
                Sym::Number,
                Sym::Leq,
                Sym::Number,
                Sym::Semicolon,
                Sym::RBrace,
            ]
        );
    }

    #[test]
    fn test_lexemes() {
        let mut lex = Lex::new("total := 42 + \"fish\"");
        lex.advance();
        assert_eq!(lex.sym(), Sym::Ident);
        assert_eq!(&**lex.id(), "total");
        lex.advance();
        assert_eq!(lex.sym(), Sym::Becomes);
        lex.advance();
        assert_eq!(lex.sym(), Sym::Number);
        assert_eq!(lex.num(), 42);
        lex.advance();
        assert_eq!(lex.sym(), Sym::Plus);
        lex.advance();
        assert_eq!(lex.sym(), Sym::StringLit);
        assert_eq!(&**lex.text(), "fish");
    }

    #[test]
    fn test_positions() {
        let mut lex = Lex::new("var x;\nx := 9");
        lex.advance();
        assert_eq!(lex.line(), 1);
        assert_eq!(lex.column(), 0..3);
        for _ in 0..3 {
            lex.advance();
        }
        assert_eq!(lex.sym(), Sym::Ident);
        assert_eq!(lex.line(), 2);
        assert_eq!(lex.column(), 0..1);
    }

    #[test]
    fn test_number_saturates() {
        let mut lex = Lex::new("99999999999999999999999");
        lex.advance();
        assert_eq!(lex.sym(), Sym::Number);
        assert_eq!(lex.num(), i64::max_value());
    }

    #[test]
    fn test_unknown_character() {
        let mut lex = Lex::new("@ x");
        lex.advance();
        assert_eq!(lex.sym(), Sym::Nul);
        lex.advance();
        assert_eq!(lex.sym(), Sym::Ident);
    }
}
