use crate::ast::{Expr, FilterCall, Node, Template};
use crate::error::ParseError;
use crate::lexer::Token;

/// Recursive-descent parser over a finished token vector.
///
/// The cursor is an explicit index rather than a consuming iterator, so the
/// mutually recursive productions below share one obvious piece of state.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, want: &Token) -> Result<(), ParseError> {
        match self.consume() {
            Some(ref t) if t == want => Ok(()),
            Some(t) => Err(ParseError::Expected {
                expected: format!("{want:?}"),
                found: format!("{t:?}"),
            }),
            None => Err(ParseError::Expected {
                expected: format!("{want:?}"),
                found: "EOF".to_string(),
            }),
        }
    }

    /// Parse the whole token stream into an ordered node sequence.
    pub fn parse(&mut self) -> Result<Template, ParseError> {
        let mut nodes = Vec::new();
        loop {
            match self.peek().cloned() {
                Some(Token::Text(s)) => {
                    self.consume();
                    nodes.push(Node::Text(s));
                }
                Some(Token::OpenTemplate) => {
                    self.consume(); // {{
                    let expr = self.parse_expr()?;
                    self.expect(&Token::CloseTemplate)?;
                    nodes.push(Node::Template(expr));
                }
                Some(_) => {
                    // Stray expression token at top level; the tokenizer
                    // should not produce this, drop it.
                    self.consume();
                }
                None => break,
            }
        }
        Ok(nodes)
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_ternary()
    }

    /// `or-expr ( '?' expr ':' expr )?` — branches recurse into the full
    /// expression grammar, so ternaries nest to the right.
    fn parse_ternary(&mut self) -> Result<Expr, ParseError> {
        let condition = self.parse_or()?;

        if let Some(Token::Question) = self.peek() {
            self.consume();
            let true_expr = self.parse_expr()?;
            self.expect(&Token::Colon)?;
            let false_expr = self.parse_expr()?;
            return Ok(Expr::Ternary {
                condition: Box::new(condition),
                true_expr: Box::new(true_expr),
                false_expr: Box::new(false_expr),
            });
        }

        Ok(condition)
    }

    /// `pipeline ( 'or' pipeline )*`, folded left so `a or b or c` is
    /// `(a or b) or c`.
    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_pipeline()?;
        while let Some(Token::Or) = self.peek() {
            self.consume();
            let rhs = self.parse_pipeline()?;
            lhs = Expr::Or {
                left: Box::new(lhs),
                right: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    /// `primary ( '|' filter-call )*`, folded left so chained filters apply
    /// in source order.
    fn parse_pipeline(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_primary()?;
        while let Some(Token::Pipe) = self.peek() {
            self.consume();
            let filter = self.parse_filter_call()?;
            lhs = Expr::Pipe {
                left: Box::new(lhs),
                filter,
            };
        }
        Ok(lhs)
    }

    /// A filter name plus greedy primary arguments: consumption stops at
    /// the first token that cannot start a primary (`|`, `?`, `:`, `or`,
    /// `}}`, or end of stream). Arguments can therefore only be variables
    /// or string literals, never nested pipelines.
    fn parse_filter_call(&mut self) -> Result<FilterCall, ParseError> {
        let name = match self.consume() {
            Some(Token::Ident(name)) => name,
            Some(t) => {
                return Err(ParseError::UnexpectedToken {
                    found: format!("{t:?}"),
                })
            }
            None => {
                return Err(ParseError::UnexpectedToken {
                    found: "EOF".to_string(),
                })
            }
        };

        let mut args = Vec::new();
        while let Some(Token::Ident(_) | Token::StringLit(_)) = self.peek() {
            args.push(self.parse_primary()?);
        }

        Ok(FilterCall { name, args })
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.consume() {
            Some(Token::Ident(name)) => Ok(Expr::Var(name)),
            Some(Token::StringLit(value)) => Ok(Expr::StringLit(value)),
            Some(t) => Err(ParseError::UnexpectedToken {
                found: format!("{t:?}"),
            }),
            None => Err(ParseError::UnexpectedToken {
                found: "EOF".to_string(),
            }),
        }
    }
}

/// Tokenize and parse in one step.
pub fn parse(source: &str) -> Result<Template, ParseError> {
    Parser::new(crate::lexer::tokenize(source)).parse()
}
