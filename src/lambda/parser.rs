// expression  := abstraction | application
// abstraction := '\' identifier expression
// application := atom+
// atom        := identifier | '(' expression ')' | abstraction

use thiserror::Error;

use super::{
    expr::Expr,
    lexer::{self, Token},
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Missing variable after lambda")]
    MissingVariable,
    #[error("Missing body after lambda variable")]
    MissingBody,
    #[error("Missing closing parenthesis")]
    MissingClosingParen,
    #[error("Empty parentheses")]
    EmptyGroup,
    #[error("Unexpected end of input")]
    UnexpectedEnd,
    #[error("Unexpected token: {0}")]
    UnexpectedToken(Token),
    #[error("Input not fully parsed")]
    NotFullyParsed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Lexical(#[from] lexer::LexError),
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}

/// Tokenizes and parses a single expression.
///
/// # Errors
///
/// Returns the lexical error or the first syntax error encountered.
pub fn parse_str(text: &str) -> Result<Expr, ParseError> {
    let tokens = lexer::tokenize(text)?;
    Ok(parse(&tokens)?)
}

/// Parses a complete token sequence. A missing trailing
/// [`Token::EndOfInput`] is treated as if it were present.
///
/// # Errors
///
/// Returns the first syntax error, parsing does not recover.
pub fn parse(tokens: &[Token]) -> Result<Expr, SyntaxError> {
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.expression()?;
    match parser.peek() {
        Token::EndOfInput => Ok(expr),
        _ => Err(SyntaxError::NotFullyParsed),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::EndOfInput)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn expression(&mut self) -> Result<Expr, SyntaxError> {
        match self.peek() {
            Token::Lambda => self.abstraction(),
            _ => self.application(),
        }
    }

    // The body is a full expression, so it extends as far right as the
    // current nesting level allows.
    fn abstraction(&mut self) -> Result<Expr, SyntaxError> {
        self.bump();
        let Token::Identifier(param) = self.peek() else {
            return Err(SyntaxError::MissingVariable);
        };
        let param = param.clone();
        self.bump();

        if *self.peek() == Token::EndOfInput {
            return Err(SyntaxError::MissingBody);
        }

        let body = self.expression()?;
        Ok(Expr::Lam(param, Box::new(body)))
    }

    fn application(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.atom()?;
        while self.peek().starts_atom() {
            let arg = self.atom()?;
            expr = Expr::App(Box::new((expr, arg)));
        }

        Ok(expr)
    }

    fn atom(&mut self) -> Result<Expr, SyntaxError> {
        match self.peek() {
            Token::Identifier(name) => {
                let expr = Expr::Var(name.clone());
                self.bump();
                Ok(expr)
            }
            Token::Lambda => self.abstraction(),
            Token::LParen => {
                self.bump();
                if matches!(self.peek(), Token::RParen | Token::EndOfInput) {
                    return Err(SyntaxError::EmptyGroup);
                }

                let expr = self.expression()?;
                if *self.peek() != Token::RParen {
                    return Err(SyntaxError::MissingClosingParen);
                }
                self.bump();
                Ok(expr)
            }
            Token::EndOfInput => Err(SyntaxError::UnexpectedEnd),
            token @ Token::RParen => Err(SyntaxError::UnexpectedToken(token.clone())),
        }
    }
}
