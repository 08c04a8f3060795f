use crate::token::{Token, TokenKind};
use crate::LexicalError;

/// Splits a regular expression into a token sequence terminated by a
/// single end-of-input token.
///
/// Recognized tokens are alphanumeric symbols, `|`, `*`, `(` and `)`.
/// Whitespace between tokens is skipped but still counts toward token
/// positions. Any other character aborts tokenization.
pub struct Lexer {
    chars: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            position: 0,
        }
    }

    /// Tokenizes the entire input, failing on the first illegal character.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexicalError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::End;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, LexicalError> {
        while let Some(&c) = self.chars.get(self.position) {
            let position = self.position;
            self.position += 1;

            let kind = match c {
                ' ' | '\t' | '\n' | '\r' => continue,
                c if c.is_ascii_alphanumeric() => TokenKind::Symbol(c),
                '|' => TokenKind::Union,
                '*' => TokenKind::Star,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                _ => {
                    return Err(LexicalError {
                        character: c,
                        position,
                    })
                }
            };
            return Ok(Token::new(kind, position));
        }

        Ok(Token::new(TokenKind::End, self.position))
    }
}

/// Convenience wrapper around [`Lexer`].
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexicalError> {
    Lexer::new(input).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .expect("tokenization should succeed")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("").expect("tokenization should succeed");
        assert_eq!(tokens, vec![Token::new(TokenKind::End, 0)]);
    }

    #[test]
    fn test_single_symbol() {
        let tokens = tokenize("a").expect("tokenization should succeed");
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Symbol('a'), 0),
                Token::new(TokenKind::End, 1),
            ]
        );
    }

    #[test]
    fn test_all_token_kinds() {
        assert_eq!(
            kinds("a|b*(c)"),
            vec![
                TokenKind::Symbol('a'),
                TokenKind::Union,
                TokenKind::Symbol('b'),
                TokenKind::Star,
                TokenKind::LParen,
                TokenKind::Symbol('c'),
                TokenKind::RParen,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_digits_are_symbols() {
        assert_eq!(
            kinds("0z9"),
            vec![
                TokenKind::Symbol('0'),
                TokenKind::Symbol('z'),
                TokenKind::Symbol('9'),
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_whitespace_skipped_but_counted() {
        let tokens = tokenize(" a\t*\nb").expect("tokenization should succeed");
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Symbol('a'), 1),
                Token::new(TokenKind::Star, 3),
                Token::new(TokenKind::Symbol('b'), 5),
                Token::new(TokenKind::End, 6),
            ]
        );
    }

    #[test]
    fn test_whitespace_only_input() {
        let tokens = tokenize("  \t").expect("tokenization should succeed");
        assert_eq!(tokens, vec![Token::new(TokenKind::End, 3)]);
    }

    #[test]
    fn test_illegal_character() {
        let err = tokenize("ab#c").expect_err("'#' should be rejected");
        assert_eq!(
            err,
            LexicalError {
                character: '#',
                position: 2,
            }
        );
    }

    #[test]
    fn test_unsupported_metacharacters_are_illegal() {
        for (input, character, position) in [("a+", '+', 1), ("a?", '?', 1), ("[a]", '[', 0)] {
            let err = tokenize(input).expect_err("unsupported metacharacter should be rejected");
            assert_eq!(err.character, character);
            assert_eq!(err.position, position);
        }
    }

    #[test]
    fn test_first_illegal_character_aborts() {
        let err = tokenize("#!").expect_err("tokenization should fail");
        assert_eq!(err.character, '#');
        assert_eq!(err.position, 0);
    }

    #[test]
    fn test_error_display_names_character_and_position() {
        let err = tokenize("a&b").expect_err("tokenization should fail");
        assert_eq!(err.to_string(), "illegal character '&' at position 1");
    }
}
