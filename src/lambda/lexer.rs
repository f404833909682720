use std::fmt::{self, Display};

use nom::{
    branch::alt,
    character::complete::{alpha1, alphanumeric0, char, multispace0},
    combinator::{all_consuming, map, recognize, value},
    error::Error,
    multi::many0,
    sequence::{pair, preceded, terminated},
    Finish, IResult,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Lambda,
    LParen,
    RParen,
    Identifier(String),
    EndOfInput,
}

impl Token {
    /// Whether this token can begin an atom, i.e. continue an application.
    pub fn starts_atom(&self) -> bool {
        matches!(self, Token::Lambda | Token::LParen | Token::Identifier(_))
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Lambda => f.write_str("\\"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Identifier(name) => f.write_str(name),
            Token::EndOfInput => f.write_str("end of input"),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexError {
    #[error("Unexpected character: {character}")]
    UnexpectedCharacter { character: char, offset: usize },
}

/// Splits `text` into tokens, always terminated by a single [`Token::EndOfInput`].
///
/// # Errors
///
/// Fails on the first character that is not whitespace, `\`, a parenthesis or
/// part of an identifier. No tokens are returned in that case.
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    let (_, mut tokens) = all_consuming(tokens)(text)
        .finish()
        .map_err(|err: Error<&str>| LexError::UnexpectedCharacter {
            character: err.input.chars().next().unwrap_or_default(),
            offset: text.len() - err.input.len(),
        })?;

    tokens.push(Token::EndOfInput);
    Ok(tokens)
}

fn identifier(s: &str) -> IResult<&str, &str> {
    recognize(pair(alpha1, alphanumeric0))(s)
}

fn token(s: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Lambda, char('\\')),
        value(Token::LParen, char('(')),
        value(Token::RParen, char(')')),
        map(identifier, |name: &str| Token::Identifier(String::from(name))),
    ))(s)
}

fn tokens(s: &str) -> IResult<&str, Vec<Token>> {
    terminated(many0(preceded(multispace0, token)), multispace0)(s)
}
