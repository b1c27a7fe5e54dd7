use crate::error::{LoxError, Span};
use crate::token::{Literal, Token, TokenType};
use std::collections::HashMap;

/// Single-pass scanner over one block of source text.
///
/// Scanning never aborts: lexical errors are collected and the scan resumes
/// at the next character, so the returned token sequence is always complete
/// and always ends with exactly one `Eof` token.
pub struct Lexer {
    source: String,
    tokens: Vec<Token>,
    errors: Vec<LoxError>,
    start: usize,
    current: usize,
    line: usize,
    keywords: HashMap<&'static str, TokenType>,
}

impl Lexer {
    pub fn new(source: String) -> Self {
        let mut keywords = HashMap::new();
        keywords.insert("and", TokenType::And);
        keywords.insert("class", TokenType::Class);
        keywords.insert("else", TokenType::Else);
        keywords.insert("false", TokenType::False);
        keywords.insert("for", TokenType::For);
        keywords.insert("fun", TokenType::Fun);
        keywords.insert("if", TokenType::If);
        keywords.insert("nil", TokenType::Nil);
        keywords.insert("or", TokenType::Or);
        keywords.insert("print", TokenType::Print);
        keywords.insert("return", TokenType::Return);
        keywords.insert("super", TokenType::Super);
        keywords.insert("this", TokenType::This);
        keywords.insert("true", TokenType::True);
        keywords.insert("var", TokenType::Var);
        keywords.insert("while", TokenType::While);

        Self {
            source,
            tokens: Vec::new(),
            errors: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
            keywords,
        }
    }

    pub fn scan_tokens(mut self) -> (Vec<Token>, Vec<LoxError>) {
        while !self.is_at_end() {
            self.start = self.current;
            if let Err(error) = self.scan_token() {
                self.errors.push(error);
            }
        }

        self.tokens.push(Token::new(
            TokenType::Eof,
            String::new(),
            None,
            self.line,
            Span::single(self.current),
        ));

        (self.tokens, self.errors)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn scan_token(&mut self) -> Result<(), LoxError> {
        let c = self.advance();

        match c {
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            '{' => self.add_token(TokenType::LeftBrace),
            '}' => self.add_token(TokenType::RightBrace),
            ',' => self.add_token(TokenType::Comma),
            '.' => self.add_token(TokenType::Dot),
            '-' => self.add_token(TokenType::Minus),
            '+' => self.add_token(TokenType::Plus),
            ';' => self.add_token(TokenType::Semicolon),
            '*' => self.add_token(TokenType::Star),
            '!' => {
                let token_type = if self.match_char('=') {
                    TokenType::BangEqual
                } else {
                    TokenType::Bang
                };
                self.add_token(token_type);
            }
            '=' => {
                let token_type = if self.match_char('=') {
                    TokenType::EqualEqual
                } else {
                    TokenType::Equal
                };
                self.add_token(token_type);
            }
            '<' => {
                let token_type = if self.match_char('=') {
                    TokenType::LessEqual
                } else {
                    TokenType::Less
                };
                self.add_token(token_type);
            }
            '>' => {
                let token_type = if self.match_char('=') {
                    TokenType::GreaterEqual
                } else {
                    TokenType::Greater
                };
                self.add_token(token_type);
            }
            '/' => {
                if self.match_char('/') {
                    // Comment goes until end of line
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenType::Slash);
                }
            }
            ' ' | '\r' | '\t' => {
                // Ignore whitespace
            }
            '\n' => {
                self.line += 1;
            }
            '"' => self.string()?,
            c if c.is_ascii_digit() => self.number(),
            c if c.is_alphabetic() || c == '_' => self.identifier(),
            _ => {
                return Err(LoxError::lex(
                    Span::new(self.start, self.current),
                    self.line,
                    "Unexpected character",
                ));
            }
        }

        Ok(())
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current..].chars().next().unwrap_or('\0');
        self.current += c.len_utf8();
        c
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.peek() != expected {
            false
        } else {
            self.advance();
            true
        }
    }

    fn peek(&self) -> char {
        self.source[self.current..].chars().next().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.source[self.current..].chars().nth(1).unwrap_or('\0')
    }

    fn string(&mut self) -> Result<(), LoxError> {
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            return Err(LoxError::lex(
                Span::new(self.start, self.current),
                self.line,
                "Unterminated string",
            ));
        }

        // Consume the closing "
        self.advance();

        // The literal value is the slice between the quotes
        let content = self.source[self.start + 1..self.current - 1].to_string();
        self.add_token_with_literal(TokenType::String, Some(Literal::String(content)));
        Ok(())
    }

    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        // A fractional part is only consumed when a digit follows the dot,
        // so "1.foo" lexes as NUMBER DOT IDENTIFIER.
        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let value = self.source[self.start..self.current]
            .parse::<f64>()
            .unwrap_or_default();
        self.add_token_with_literal(TokenType::Number, Some(Literal::Number(value)));
    }

    fn identifier(&mut self) {
        while self.peek().is_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let text = &self.source[self.start..self.current];
        let token_type = self
            .keywords
            .get(text)
            .copied()
            .unwrap_or(TokenType::Identifier);

        self.add_token(token_type);
    }

    fn add_token(&mut self, token_type: TokenType) {
        self.add_token_with_literal(token_type, None);
    }

    fn add_token_with_literal(&mut self, token_type: TokenType, literal: Option<Literal>) {
        let lexeme = self.source[self.start..self.current].to_string();
        self.tokens.push(Token::new(
            token_type,
            lexeme,
            literal,
            self.line,
            Span::new(self.start, self.current),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> (Vec<Token>, Vec<LoxError>) {
        Lexer::new(source.to_string()).scan_tokens()
    }

    fn scan_ok(source: &str) -> Vec<Token> {
        let (tokens, errors) = scan(source);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        tokens
    }

    fn types(tokens: &[Token]) -> Vec<TokenType> {
        tokens.iter().map(|t| t.token_type).collect()
    }

    #[test]
    fn addition_tokens() {
        let tokens = scan_ok("1+2");
        assert_eq!(
            types(&tokens),
            vec![
                TokenType::Number,
                TokenType::Plus,
                TokenType::Number,
                TokenType::Eof
            ]
        );
        assert_eq!(tokens[0].literal, Some(Literal::Number(1.0)));
        assert_eq!(tokens[2].literal, Some(Literal::Number(2.0)));
    }

    #[test]
    fn every_scan_ends_with_a_single_eof() {
        for source in ["", "   \t\r\n", "1+2;", "// just a comment", "\"s\""] {
            let (tokens, _) = scan(source);
            let eof_count = tokens
                .iter()
                .filter(|t| t.token_type == TokenType::Eof)
                .count();
            assert_eq!(eof_count, 1, "source {source:?}");
            let last = tokens.last().unwrap();
            assert_eq!(last.token_type, TokenType::Eof);
            assert_eq!(last.lexeme, "");
            assert_eq!(last.literal, None);
        }
    }

    #[test]
    fn two_character_operators() {
        let tokens = scan_ok("! != = == < <= > >=");
        assert_eq!(
            types(&tokens),
            vec![
                TokenType::Bang,
                TokenType::BangEqual,
                TokenType::Equal,
                TokenType::EqualEqual,
                TokenType::Less,
                TokenType::LessEqual,
                TokenType::Greater,
                TokenType::GreaterEqual,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn string_literal_excludes_quotes_and_keeps_lexeme() {
        let tokens = scan_ok("\"hello\"");
        assert_eq!(tokens[0].token_type, TokenType::String);
        assert_eq!(tokens[0].lexeme, "\"hello\"");
        assert_eq!(tokens[0].literal, Some(Literal::String("hello".to_string())));
    }

    #[test]
    fn multiline_string_counts_lines() {
        let tokens = scan_ok("\"a\nb\"\nfoo");
        assert_eq!(tokens[0].token_type, TokenType::String);
        assert_eq!(tokens[0].line, 2);
        assert_eq!(tokens[1].token_type, TokenType::Identifier);
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn unterminated_string_reports_once_and_keeps_prior_tokens() {
        let (tokens, errors) = scan("1 + \"abc");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Unterminated string");
        assert_eq!(errors[0].line, 1);
        assert_eq!(
            types(&tokens),
            vec![TokenType::Number, TokenType::Plus, TokenType::Eof]
        );
    }

    #[test]
    fn unterminated_string_reports_current_line() {
        let (_, errors) = scan("\"abc\ndef");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 2);
    }

    #[test]
    fn dot_after_number_without_digit_is_a_dot_token() {
        let tokens = scan_ok("1.foo");
        assert_eq!(
            types(&tokens),
            vec![
                TokenType::Number,
                TokenType::Dot,
                TokenType::Identifier,
                TokenType::Eof
            ]
        );
        assert_eq!(tokens[0].lexeme, "1");
    }

    #[test]
    fn fractional_number() {
        let tokens = scan_ok("45.67");
        assert_eq!(tokens[0].literal, Some(Literal::Number(45.67)));
        assert_eq!(tokens[0].lexeme, "45.67");
    }

    #[test]
    fn keywords_and_identifiers() {
        let tokens = scan_ok("print nil true false printx _under");
        assert_eq!(
            types(&tokens),
            vec![
                TokenType::Print,
                TokenType::Nil,
                TokenType::True,
                TokenType::False,
                TokenType::Identifier,
                TokenType::Identifier,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn comments_and_whitespace_emit_nothing() {
        let tokens = scan_ok("// nothing here\n  \t1 // trailing\n");
        assert_eq!(types(&tokens), vec![TokenType::Number, TokenType::Eof]);
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn unexpected_character_recovers_and_continues() {
        let (tokens, errors) = scan("1 @ # 2");
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.message == "Unexpected character"));
        assert_eq!(
            types(&tokens),
            vec![TokenType::Number, TokenType::Number, TokenType::Eof]
        );
    }
}
