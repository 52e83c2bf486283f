//! Kinetic-law formulas: parser, syntax tree and lowering to symbolic expressions.
//!
//! Grammar:
//! ```text
//! expression -> term (("+" | "-") term)* ;
//! term       -> unary (("*" | "/") unary)* ;
//! unary      -> ("-" | "+") unary | power ;
//! power      -> primary ("^" unary)? ;
//! primary    -> NUMBER | IDENT | IDENT "(" arguments? ")" | "(" expression ")" ;
//! arguments  -> expression ("," expression)* ;
//! ```
//! so `-x^2` is `-(x^2)` and `a^b^c` is `a^(b^c)`.
//!
//! Built-in functions: `pow(a, b)`, `exp(x)`, `ln(x)`, `log(x)` (natural), `log(base, x)`,
//! `log10(x)`, `sqrt(x)`. Any other call is a user function that must be expanded before the
//! formula is lowered or evaluated.
use super::lexer::Lexer;
use super::token::Token;
use RustedSciThe::symbolic::symbolic_engine::Expr;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum MathError {
    #[error("Invalid character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
    #[error("Expected expression, found {0}")]
    ExpectedExpression(String),
    #[error("{0}")]
    MissingToken(String),
    #[error("Unexpected input after the end of the expression")]
    EarlyTermination,
    #[error("Unknown symbol '{0}'")]
    UnknownSymbol(String),
    #[error("Unknown function '{0}'")]
    UnknownFunction(String),
    #[error("Function '{function}' takes {expected} argument(s), {found} given")]
    Arity {
        function: String,
        expected: usize,
        found: usize,
    },
    #[error("Function '{0}' is defined recursively")]
    RecursiveFunction(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div => 2,
            BinaryOp::Pow => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MathNode {
    Number(f64),
    Symbol(String),
    Neg(Box<MathNode>),
    Binary(BinaryOp, Box<MathNode>, Box<MathNode>),
    Call(String, Vec<MathNode>),
}

pub const BUILTIN_FUNCTIONS: [&str; 6] = ["pow", "exp", "ln", "log", "log10", "sqrt"];

pub fn is_builtin(function: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&function)
}

fn check_arity(function: &str, args: &[MathNode], allowed: &[usize]) -> Result<(), MathError> {
    if allowed.contains(&args.len()) {
        Ok(())
    } else {
        Err(MathError::Arity {
            function: function.to_string(),
            expected: allowed[0],
            found: args.len(),
        })
    }
}

/// Parse a formula string into a syntax tree
///
/// # Examples
/// ```
/// use GeneletCRN::SbmlToOde::math::parse_formula;
/// let node = parse_formula("k * X^2").unwrap();
/// assert_eq!(node.symbols(), vec!["k".to_string(), "X".to_string()]);
/// ```
pub fn parse_formula(formula: &str) -> Result<MathNode, MathError> {
    let tokens = Lexer::new(formula).scan_tokens()?;
    Parser::new(tokens).parse()
}

impl MathNode {
    pub fn symbol(name: &str) -> Self {
        MathNode::Symbol(name.to_string())
    }

    pub fn binary(op: BinaryOp, left: MathNode, right: MathNode) -> Self {
        MathNode::Binary(op, Box::new(left), Box::new(right))
    }

    /// Lower to a symbolic expression. User-function calls are rejected.
    pub fn to_expr(&self) -> Result<Expr, MathError> {
        let expr = match self {
            MathNode::Number(value) => Expr::Const(*value),
            MathNode::Symbol(name) => Expr::Var(name.clone()),
            MathNode::Neg(inner) => -inner.to_expr()?,
            MathNode::Binary(op, left, right) => {
                let l = left.to_expr()?;
                let r = right.to_expr()?;
                match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => l / r,
                    BinaryOp::Pow => Expr::Pow(Box::new(l), Box::new(r)),
                }
            }
            MathNode::Call(function, args) => {
                let lowered = args
                    .iter()
                    .map(|a| a.to_expr())
                    .collect::<Result<Vec<Expr>, MathError>>()?;
                match function.as_str() {
                    "pow" => {
                        check_arity(function, args, &[2])?;
                        Expr::Pow(Box::new(lowered[0].clone()), Box::new(lowered[1].clone()))
                    }
                    "exp" => {
                        check_arity(function, args, &[1])?;
                        Expr::Exp(Box::new(lowered[0].clone()))
                    }
                    "ln" => {
                        check_arity(function, args, &[1])?;
                        Expr::ln(lowered[0].clone())
                    }
                    "log" => {
                        check_arity(function, args, &[1, 2])?;
                        if lowered.len() == 1 {
                            Expr::ln(lowered[0].clone())
                        } else {
                            Expr::ln(lowered[1].clone()) / Expr::ln(lowered[0].clone())
                        }
                    }
                    "log10" => {
                        check_arity(function, args, &[1])?;
                        Expr::ln(lowered[0].clone()) / Expr::Const(10f64.ln())
                    }
                    "sqrt" => {
                        check_arity(function, args, &[1])?;
                        Expr::Pow(Box::new(lowered[0].clone()), Box::new(Expr::Const(0.5)))
                    }
                    _ => return Err(MathError::UnknownFunction(function.clone())),
                }
            }
        };
        Ok(expr)
    }

    /// Numeric value with symbols taken from `values`
    pub fn evaluate(&self, values: &HashMap<String, f64>) -> Result<f64, MathError> {
        let value = match self {
            MathNode::Number(value) => *value,
            MathNode::Symbol(name) => *values
                .get(name)
                .ok_or_else(|| MathError::UnknownSymbol(name.clone()))?,
            MathNode::Neg(inner) => -inner.evaluate(values)?,
            MathNode::Binary(op, left, right) => {
                let l = left.evaluate(values)?;
                let r = right.evaluate(values)?;
                match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => l / r,
                    BinaryOp::Pow => l.powf(r),
                }
            }
            MathNode::Call(function, args) => {
                let a = args
                    .iter()
                    .map(|a| a.evaluate(values))
                    .collect::<Result<Vec<f64>, MathError>>()?;
                match function.as_str() {
                    "pow" => {
                        check_arity(function, args, &[2])?;
                        a[0].powf(a[1])
                    }
                    "exp" => {
                        check_arity(function, args, &[1])?;
                        a[0].exp()
                    }
                    "ln" => {
                        check_arity(function, args, &[1])?;
                        a[0].ln()
                    }
                    "log" => {
                        check_arity(function, args, &[1, 2])?;
                        if a.len() == 1 { a[0].ln() } else { a[1].log(a[0]) }
                    }
                    "log10" => {
                        check_arity(function, args, &[1])?;
                        a[0].log10()
                    }
                    "sqrt" => {
                        check_arity(function, args, &[1])?;
                        a[0].sqrt()
                    }
                    _ => return Err(MathError::UnknownFunction(function.clone())),
                }
            }
        };
        Ok(value)
    }

    /// Replace symbols by the given subtrees
    pub fn substitute(&self, replacements: &HashMap<String, MathNode>) -> MathNode {
        match self {
            MathNode::Symbol(name) => replacements
                .get(name)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            MathNode::Number(_) => self.clone(),
            MathNode::Neg(inner) => MathNode::Neg(Box::new(inner.substitute(replacements))),
            MathNode::Binary(op, left, right) => MathNode::binary(
                *op,
                left.substitute(replacements),
                right.substitute(replacements),
            ),
            MathNode::Call(function, args) => MathNode::Call(
                function.clone(),
                args.iter().map(|a| a.substitute(replacements)).collect(),
            ),
        }
    }

    /// distinct symbols in first-seen order
    pub fn symbols(&self) -> Vec<String> {
        let mut found = Vec::new();
        self.collect_symbols(&mut found);
        found
    }

    fn collect_symbols(&self, found: &mut Vec<String>) {
        match self {
            MathNode::Symbol(name) => {
                if !found.contains(name) {
                    found.push(name.clone());
                }
            }
            MathNode::Number(_) => {}
            MathNode::Neg(inner) => inner.collect_symbols(found),
            MathNode::Binary(_, left, right) => {
                left.collect_symbols(found);
                right.collect_symbols(found);
            }
            MathNode::Call(_, args) => {
                for a in args {
                    a.collect_symbols(found);
                }
            }
        }
    }

    /// names of called functions that are not built in
    pub fn user_calls(&self) -> Vec<String> {
        let mut found = Vec::new();
        self.collect_user_calls(&mut found);
        found
    }

    fn collect_user_calls(&self, found: &mut Vec<String>) {
        match self {
            MathNode::Call(function, args) => {
                if !is_builtin(function) && !found.contains(function) {
                    found.push(function.clone());
                }
                for a in args {
                    a.collect_user_calls(found);
                }
            }
            MathNode::Neg(inner) => inner.collect_user_calls(found),
            MathNode::Binary(_, left, right) => {
                left.collect_user_calls(found);
                right.collect_user_calls(found);
            }
            MathNode::Number(_) | MathNode::Symbol(_) => {}
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            MathNode::Binary(op, _, _) => op.precedence(),
            MathNode::Neg(_) => 3,
            MathNode::Number(v) if *v < 0.0 => 3,
            _ => 5,
        }
    }
}

impl fmt::Display for MathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathNode::Number(value) => write!(f, "{}", value),
            MathNode::Symbol(name) => write!(f, "{}", name),
            MathNode::Neg(inner) => {
                if inner.precedence() < 3 {
                    write!(f, "-({})", inner)
                } else {
                    write!(f, "-{}", inner)
                }
            }
            MathNode::Binary(op, left, right) => {
                let p = op.precedence();
                // ^ is right-associative, the others left-associative
                let (left_parens, right_parens) = if *op == BinaryOp::Pow {
                    (left.precedence() <= p, right.precedence() < 3)
                } else {
                    (left.precedence() < p, right.precedence() <= p)
                };
                if left_parens {
                    write!(f, "({})", left)?;
                } else {
                    write!(f, "{}", left)?;
                }
                write!(f, " {} ", op.symbol())?;
                if right_parens {
                    write!(f, "({})", right)
                } else {
                    write!(f, "{}", right)
                }
            }
            MathNode::Call(function, args) => {
                let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", function, args.join(", "))
            }
        }
    }
}

/// Recursive-descent parser over lexed tokens
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, current: 0 }
    }

    pub fn parse(&mut self) -> Result<MathNode, MathError> {
        let node = self.expression()?;
        if !self.is_at_end() {
            return Err(MathError::EarlyTermination);
        }
        Ok(node)
    }

    fn expression(&mut self) -> Result<MathNode, MathError> {
        let mut node = self.term()?;
        while self.match_token(&[Token::Plus, Token::Minus]) {
            let op = match self.previous() {
                Token::Plus => BinaryOp::Add,
                _ => BinaryOp::Sub,
            };
            let right = self.term()?;
            node = MathNode::binary(op, node, right);
        }
        Ok(node)
    }

    fn term(&mut self) -> Result<MathNode, MathError> {
        let mut node = self.unary()?;
        while self.match_token(&[Token::Star, Token::Slash]) {
            let op = match self.previous() {
                Token::Star => BinaryOp::Mul,
                _ => BinaryOp::Div,
            };
            let right = self.unary()?;
            node = MathNode::binary(op, node, right);
        }
        Ok(node)
    }

    fn unary(&mut self) -> Result<MathNode, MathError> {
        if self.match_token(&[Token::Minus]) {
            let operand = self.unary()?;
            return Ok(MathNode::Neg(Box::new(operand)));
        }
        if self.match_token(&[Token::Plus]) {
            return self.unary();
        }
        self.power()
    }

    fn power(&mut self) -> Result<MathNode, MathError> {
        let base = self.primary()?;
        if self.match_token(&[Token::Caret]) {
            let exponent = self.unary()?;
            return Ok(MathNode::binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<MathNode, MathError> {
        match self.peek() {
            Token::Number(value) => {
                self.advance();
                Ok(MathNode::Number(value))
            }
            Token::Identifier(name) => {
                self.advance();
                if self.match_token(&[Token::LeftParen]) {
                    let mut args = Vec::new();
                    if !self.check(&Token::RightParen) {
                        args.push(self.expression()?);
                        while self.match_token(&[Token::Comma]) {
                            args.push(self.expression()?);
                        }
                    }
                    self.consume(&Token::RightParen, "Expect ')' after arguments.")?;
                    return Ok(MathNode::Call(name, args));
                }
                Ok(MathNode::Symbol(name))
            }
            Token::LeftParen => {
                self.advance();
                let node = self.expression()?;
                self.consume(&Token::RightParen, "Expect ')' after expression.")?;
                Ok(node)
            }
            other => Err(MathError::ExpectedExpression(format!("{:?}", other))),
        }
    }

    fn match_token(&mut self, tokens: &[Token]) -> bool {
        for t in tokens {
            if self.check(t) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn check(&self, token: &Token) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.peek() == *token
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek() == Token::Eof
    }

    fn peek(&self) -> Token {
        self.tokens.get(self.current).cloned().unwrap_or(Token::Eof)
    }

    fn previous(&self) -> Token {
        self.tokens
            .get(self.current.saturating_sub(1))
            .cloned()
            .unwrap_or(Token::Eof)
    }

    fn consume(&mut self, token: &Token, msg: &str) -> Result<Token, MathError> {
        if self.check(token) {
            return Ok(self.advance());
        }
        Err(MathError::MissingToken(msg.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn values(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_precedence() {
        let node = parse_formula("a + b * c ^ 2").unwrap();
        let v = values(&[("a", 1.0), ("b", 2.0), ("c", 3.0)]);
        assert_relative_eq!(node.evaluate(&v).unwrap(), 19.0);
        let node = parse_formula("-2^2").unwrap();
        assert_relative_eq!(node.evaluate(&HashMap::new()).unwrap(), -4.0);
        let node = parse_formula("2^3^2").unwrap();
        assert_relative_eq!(node.evaluate(&HashMap::new()).unwrap(), 512.0);
        let node = parse_formula("8 / 4 / 2").unwrap();
        assert_relative_eq!(node.evaluate(&HashMap::new()).unwrap(), 1.0);
        let node = parse_formula("2^-1").unwrap();
        assert_relative_eq!(node.evaluate(&HashMap::new()).unwrap(), 0.5);
    }

    #[test]
    fn test_functions() {
        let v = values(&[("x", 4.0)]);
        let cases = [
            ("pow(x, 2)", 16.0),
            ("sqrt(x)", 2.0),
            ("exp(0)", 1.0),
            ("ln(exp(x))", 4.0),
            ("log(x)", 4f64.ln()),
            ("log(2, x)", 2.0),
            ("log10(100)", 2.0),
        ];
        for (formula, expected) in cases {
            let node = parse_formula(formula).unwrap();
            assert_relative_eq!(node.evaluate(&v).unwrap(), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_formula("(a + b"),
            Err(MathError::MissingToken(_))
        ));
        assert!(matches!(
            parse_formula("a b"),
            Err(MathError::EarlyTermination)
        ));
        assert!(matches!(
            parse_formula("a * "),
            Err(MathError::ExpectedExpression(_))
        ));
        assert!(matches!(
            parse_formula("sqrt(1, 2)").unwrap().evaluate(&HashMap::new()),
            Err(MathError::Arity { .. })
        ));
        assert!(matches!(
            parse_formula("k * Y").unwrap().evaluate(&values(&[("k", 1.0)])),
            Err(MathError::UnknownSymbol(name)) if name == "Y"
        ));
    }

    #[test]
    fn test_display_reparses_to_same_tree() {
        for formula in [
            "k1 * A * B - k2 * C",
            "(a + b) * c",
            "a - (b - c)",
            "a / (b * c)",
            "-(a + b)",
            "(a ^ b) ^ c",
            "a ^ b ^ c",
            "f(x, y + 1) / 2",
            "Vmax * S / (Km + S)",
        ] {
            let node = parse_formula(formula).unwrap();
            let printed = node.to_string();
            assert_eq!(parse_formula(&printed).unwrap(), node, "{}", printed);
        }
        assert_eq!(parse_formula("(a+b)*c").unwrap().to_string(), "(a + b) * c");
    }

    #[test]
    fn test_substitute_and_symbols() {
        let node = parse_formula("k * X").unwrap();
        let mut replacements = HashMap::new();
        replacements.insert("k".to_string(), MathNode::symbol("R1_k"));
        let renamed = node.substitute(&replacements);
        assert_eq!(renamed.to_string(), "R1_k * X");
        assert_eq!(renamed.symbols(), vec!["R1_k".to_string(), "X".to_string()]);
    }

    #[test]
    fn test_user_calls() {
        let node = parse_formula("mm(S, Vmax) + exp(f(x))").unwrap();
        assert_eq!(node.user_calls(), vec!["mm".to_string(), "f".to_string()]);
        assert!(matches!(
            node.to_expr(),
            Err(MathError::UnknownFunction(name)) if name == "mm"
        ));
    }

    #[test]
    fn test_lowering_to_expr() {
        let node = parse_formula("k * X^2 + sqrt(Y)").unwrap();
        let expr = node.to_expr().unwrap();
        let f = expr.lambdify_owned(vec!["k", "X", "Y"]);
        assert_relative_eq!(f(vec![0.5, 3.0, 16.0]), 8.5, epsilon = 1e-10);
        let node = parse_formula("log10(X) - -exp(0)").unwrap();
        let f = node.to_expr().unwrap().lambdify_owned(vec!["X"]);
        assert_relative_eq!(f(vec![1000.0]), 4.0, epsilon = 1e-10);
    }
}
