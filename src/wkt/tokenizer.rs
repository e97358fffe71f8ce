use crate::errors::{Position, WktError};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Keyword {
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
    Empty,
    Z,
    M,
    Zm,
}

impl Keyword {
    fn from_word(word: &str) -> Option<Keyword> {
        let keyword = match word.to_ascii_uppercase().as_str() {
            "POINT" => Keyword::Point,
            "LINESTRING" => Keyword::LineString,
            "LINEARRING" => Keyword::LinearRing,
            "POLYGON" => Keyword::Polygon,
            "MULTIPOINT" => Keyword::MultiPoint,
            "MULTILINESTRING" => Keyword::MultiLineString,
            "MULTIPOLYGON" => Keyword::MultiPolygon,
            "GEOMETRYCOLLECTION" => Keyword::GeometryCollection,
            "EMPTY" => Keyword::Empty,
            "Z" => Keyword::Z,
            "M" => Keyword::M,
            "ZM" => Keyword::Zm,
            _ => return None,
        };
        Some(keyword)
    }

    pub fn is_geometry_type(self) -> bool {
        !matches!(self, Keyword::Empty | Keyword::Z | Keyword::M | Keyword::Zm)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Point => "POINT",
            Keyword::LineString => "LINESTRING",
            Keyword::LinearRing => "LINEARRING",
            Keyword::Polygon => "POLYGON",
            Keyword::MultiPoint => "MULTIPOINT",
            Keyword::MultiLineString => "MULTILINESTRING",
            Keyword::MultiPolygon => "MULTIPOLYGON",
            Keyword::GeometryCollection => "GEOMETRYCOLLECTION",
            Keyword::Empty => "EMPTY",
            Keyword::Z => "Z",
            Keyword::M => "M",
            Keyword::Zm => "ZM",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Keyword(Keyword),
    Number(f64),
    LeftParen,
    RightParen,
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Keyword(keyword) => write!(f, "'{}'", keyword.as_str()),
            Token::Number(value) => write!(f, "number {}", value),
            Token::LeftParen => f.write_str("'('"),
            Token::RightParen => f.write_str("')'"),
            Token::Comma => f.write_str("','"),
        }
    }
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')
}

/// Splits WKT text into tokens tagged with their 1-based position.
///
/// Whitespace separates tokens and is otherwise ignored. The first error
/// ends the stream.
pub struct Tokenizer<'a> {
    text: &'a str,
    offset: usize,
    line: usize,
    column: usize,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Tokenizer {
            text,
            offset: 0,
            line: 1,
            column: 1,
            failed: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.text[self.offset..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consumes characters while `accept` holds and returns them.
    fn take_while<F: Fn(char) -> bool>(&mut self, accept: F) -> &'a str {
        let start = self.offset;
        while let Some(c) = self.peek() {
            if !accept(c) {
                break;
            }
            self.bump();
        }
        &self.text[start..self.offset]
    }

    fn current_position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn next_token(&mut self) -> Option<Result<(Token, Position), WktError>> {
        self.take_while(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
        let position = self.current_position();
        let c = self.peek()?;

        let token = if c.is_ascii_alphabetic() {
            let word = self.take_while(|c| c.is_ascii_alphabetic());
            match Keyword::from_word(word) {
                Some(keyword) => Token::Keyword(keyword),
                None => {
                    return Some(Err(WktError::UnknownKeyword {
                        word: word.to_string(),
                        position,
                    }))
                }
            }
        } else if is_number_char(c) {
            let literal = self.take_while(is_number_char);
            match literal.parse::<f64>() {
                Ok(value) if value.is_finite() => Token::Number(value),
                _ => {
                    return Some(Err(WktError::InvalidNumber {
                        literal: literal.to_string(),
                        position,
                    }))
                }
            }
        } else {
            self.bump();
            match c {
                '(' => Token::LeftParen,
                ')' => Token::RightParen,
                ',' => Token::Comma,
                _ => {
                    return Some(Err(WktError::UnexpectedCharacter {
                        character: c,
                        position,
                    }))
                }
            }
        };
        Some(Ok((token, position)))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<(Token, Position), WktError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.next_token();
        if let Some(Err(_)) = item {
            self.failed = true;
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<Token> {
        Tokenizer::new(text)
            .map(|item| item.unwrap().0)
            .collect()
    }

    fn position(line: usize, column: usize) -> Position {
        Position { line, column }
    }

    #[test]
    fn test_point() {
        assert_eq!(
            tokens("POINT (1 -2.5)"),
            vec![
                Token::Keyword(Keyword::Point),
                Token::LeftParen,
                Token::Number(1.),
                Token::Number(-2.5),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn test_keywords_ignore_case() {
        assert_eq!(
            tokens("multiPolygon zm Empty"),
            vec![
                Token::Keyword(Keyword::MultiPolygon),
                Token::Keyword(Keyword::Zm),
                Token::Keyword(Keyword::Empty),
            ]
        );
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(
            tokens(".5 +3 1e3 -2.5E-2 7."),
            vec![
                Token::Number(0.5),
                Token::Number(3.),
                Token::Number(1000.),
                Token::Number(-0.025),
                Token::Number(7.),
            ]
        );
    }

    #[test]
    fn test_positions_span_lines() {
        let positions: Vec<Position> = Tokenizer::new("POINT\n  (1\t2)")
            .map(|item| item.unwrap().1)
            .collect();
        assert_eq!(
            positions,
            vec![
                position(1, 1),
                position(2, 3),
                position(2, 4),
                position(2, 6),
                position(2, 7),
            ]
        );
    }

    #[test]
    fn test_unexpected_character() {
        let mut tokenizer = Tokenizer::new("POINT [1 2]");
        assert!(tokenizer.next().unwrap().is_ok());
        assert_eq!(
            tokenizer.next(),
            Some(Err(WktError::UnexpectedCharacter {
                character: '[',
                position: position(1, 7),
            }))
        );
        assert_eq!(tokenizer.next(), None);
    }

    #[test]
    fn test_unknown_keyword() {
        let result: Result<Vec<_>, _> = Tokenizer::new("POINT (1 2)\nCIRCLE").collect();
        assert_eq!(
            result,
            Err(WktError::UnknownKeyword {
                word: "CIRCLE".to_string(),
                position: position(2, 1),
            })
        );
    }

    #[test]
    fn test_invalid_number() {
        let result: Result<Vec<_>, _> = Tokenizer::new("POINT (1.2.3 4)").collect();
        assert_eq!(
            result,
            Err(WktError::InvalidNumber {
                literal: "1.2.3".to_string(),
                position: position(1, 8),
            })
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(tokens("").is_empty());
        assert!(tokens(" \r\n\t").is_empty());
    }
}
