//! Recursive-descent parser with panic-mode recovery (§4.2).

use msc_lex::{Token, TokenKind};
use msc_util::{DiagnosticBuilder, Handler, Span};

use crate::ast::{Expr, Program, Statement};

pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    handler: &'a Handler,
}

type PResult<T> = Result<T, ()>;

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, handler: &'a Handler) -> Self {
        Self { tokens, pos: 0, handler }
    }

    pub fn parse(mut self) -> Program {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(()) => self.synchronize(),
            }
        }
        tracing::debug!(count = statements.len(), "parsing complete");
        Program { statements }
    }

    // --- token stream helpers ---------------------------------------

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.pos - 1]
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.previous()
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> PResult<&Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let span = self.peek().span;
            let found = self.peek().lexeme.clone();
            DiagnosticBuilder::error(format!("expected {what}, found '{found}'"))
                .span(span)
                .emit(self.handler);
            Err(())
        }
    }

    fn error_at(&self, span: Span, message: impl Into<String>) {
        DiagnosticBuilder::error(message).span(span).emit(self.handler);
    }

    /// Advances until a token that can start a new statement, or EOF.
    fn synchronize(&mut self) {
        while !self.is_at_end() {
            if self.peek().kind.starts_statement() {
                return;
            }
            self.advance();
        }
    }

    // --- statements ---------------------------------------------------

    fn parse_statement(&mut self) -> PResult<Statement> {
        match self.peek().kind {
            TokenKind::Var => self.parse_var_decl(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Func => self.parse_func_decl(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Print => self.parse_print(),
            TokenKind::Id => self.parse_expr_stmt(),
            _ => {
                let span = self.peek().span;
                let found = self.peek().lexeme.clone();
                self.error_at(span, format!("unexpected token '{found}'"));
                Err(())
            }
        }
    }

    fn parse_var_decl(&mut self) -> PResult<Statement> {
        let start = self.peek().span;
        self.advance(); // 'var'
        let name = self.expect(TokenKind::Id, "identifier")?.lexeme.clone();
        let initializer = if self.matches(TokenKind::Assign) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Statement::VarDeclaration { name, initializer, span: start })
    }

    fn parse_block(&mut self) -> PResult<Vec<Statement>> {
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(()) => self.synchronize(),
            }
        }
        self.expect(TokenKind::RBrace, "'}'")?;
        Ok(statements)
    }

    fn parse_if(&mut self) -> PResult<Statement> {
        let start = self.peek().span;
        self.advance(); // 'if'
        self.expect(TokenKind::LParen, "'('")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        let then_body = self.parse_block()?;
        let else_body = if self.matches(TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(Statement::If { condition, then_body, else_body, span: start })
    }

    fn parse_while(&mut self) -> PResult<Statement> {
        let start = self.peek().span;
        self.advance(); // 'while'
        self.expect(TokenKind::LParen, "'('")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen, "')'")?;
        let body = self.parse_block()?;
        Ok(Statement::While { condition, body, span: start })
    }

    fn parse_for(&mut self) -> PResult<Statement> {
        let start = self.peek().span;
        self.advance(); // 'for'
        self.expect(TokenKind::LParen, "'('")?;

        let init = if self.matches(TokenKind::Semicolon) {
            None
        } else if self.check(TokenKind::Var) {
            Some(Box::new(self.parse_var_decl()?))
        } else {
            Some(Box::new(self.parse_expr_stmt()?))
        };

        let condition = if self.check(TokenKind::Semicolon) { None } else { Some(self.parse_expr()?) };
        self.expect(TokenKind::Semicolon, "';'")?;

        let update = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(Box::new(self.parse_assignment_no_semi()?))
        };
        self.expect(TokenKind::RParen, "')'")?;

        let body = self.parse_block()?;
        Ok(Statement::For { init, condition, update, body, span: start })
    }

    fn parse_func_decl(&mut self) -> PResult<Statement> {
        let start = self.peek().span;
        self.advance(); // 'func'
        let name = self.expect(TokenKind::Id, "identifier")?.lexeme.clone();
        self.expect(TokenKind::LParen, "'('")?;
        let mut parameters = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                parameters.push(self.expect(TokenKind::Id, "identifier")?.lexeme.clone());
                if !self.matches(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        let body = self.parse_block()?;
        Ok(Statement::FunctionDeclaration { name, parameters, body, span: start })
    }

    fn parse_return(&mut self) -> PResult<Statement> {
        let start = self.peek().span;
        self.advance(); // 'return'
        let value = if self.check(TokenKind::Semicolon) { None } else { Some(self.parse_expr()?) };
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Statement::Return { value, span: start })
    }

    fn parse_print(&mut self) -> PResult<Statement> {
        let start = self.peek().span;
        self.advance(); // 'print'
        let value = self.parse_expr()?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(Statement::Print { value, span: start })
    }

    /// `ExprStmt := Identifier '=' Expr ';'` — only assignment to a plain
    /// identifier is accepted as an expression statement.
    fn parse_expr_stmt(&mut self) -> PResult<Statement> {
        let stmt = self.parse_assignment_no_semi()?;
        self.expect(TokenKind::Semicolon, "';'")?;
        Ok(stmt)
    }

    /// Shared by `ExprStmt` and the `for`-loop update clause, which has no
    /// trailing semicolon of its own.
    fn parse_assignment_no_semi(&mut self) -> PResult<Statement> {
        let start = self.peek().span;
        let target = self.expect(TokenKind::Id, "identifier")?.lexeme.clone();
        self.expect(TokenKind::Assign, "'='")?;
        let value = self.parse_expr()?;
        Ok(Statement::Assignment { target, value, span: start })
    }

    // --- expressions: precedence-climbing (§4.2) -----------------------

    fn parse_expr(&mut self) -> PResult<Expr> {
        self.parse_logical_or()
    }

    fn parse_logical_or(&mut self) -> PResult<Expr> {
        let mut left = self.parse_logical_and()?;
        while self.check(TokenKind::Or) {
            let span = self.advance().span;
            let right = self.parse_logical_and()?;
            left = Expr::BinaryOp { left: Box::new(left), operator: "||".into(), right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_logical_and(&mut self) -> PResult<Expr> {
        let mut left = self.parse_equality()?;
        while self.check(TokenKind::And) {
            let span = self.advance().span;
            let right = self.parse_equality()?;
            left = Expr::BinaryOp { left: Box::new(left), operator: "&&".into(), right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> PResult<Expr> {
        let mut left = self.parse_comparison()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Eq => "==",
                TokenKind::Ne => "!=",
                _ => break,
            };
            let span = self.advance().span;
            let right = self.parse_comparison()?;
            left = Expr::BinaryOp { left: Box::new(left), operator: op.into(), right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> PResult<Expr> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Lt => "<",
                TokenKind::Gt => ">",
                TokenKind::Le => "<=",
                TokenKind::Ge => ">=",
                _ => break,
            };
            let span = self.advance().span;
            let right = self.parse_additive()?;
            left = Expr::BinaryOp { left: Box::new(left), operator: op.into(), right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> PResult<Expr> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => "+",
                TokenKind::Minus => "-",
                _ => break,
            };
            let span = self.advance().span;
            let right = self.parse_multiplicative()?;
            left = Expr::BinaryOp { left: Box::new(left), operator: op.into(), right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> PResult<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => "*",
                TokenKind::Slash => "/",
                TokenKind::Percent => "%",
                _ => break,
            };
            let span = self.advance().span;
            let right = self.parse_unary()?;
            left = Expr::BinaryOp { left: Box::new(left), operator: op.into(), right: Box::new(right), span };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> PResult<Expr> {
        let op = match self.peek().kind {
            TokenKind::Not => "!",
            TokenKind::Minus => "-",
            _ => return self.parse_call(),
        };
        let span = self.advance().span;
        let operand = self.parse_unary()?;
        Ok(Expr::UnaryOp { operator: op.into(), operand: Box::new(operand), span })
    }

    /// `Call := Primary ('(' Args ')')*` — only an identifier primary may be
    /// followed by a call; a call on anything else (including the result of
    /// a previous call, e.g. `foo()()`) is a parse error.
    fn parse_call(&mut self) -> PResult<Expr> {
        let mut expr = self.parse_primary()?;
        while self.check(TokenKind::LParen) {
            let name = match &expr {
                Expr::Identifier { name, .. } => name.clone(),
                other => {
                    self.error_at(other.span(), "only a plain identifier may be called");
                    return Err(());
                }
            };
            let span = expr.span();
            self.advance(); // '('
            let mut arguments = Vec::new();
            if !self.check(TokenKind::RParen) {
                loop {
                    arguments.push(self.parse_expr()?);
                    if !self.matches(TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.expect(TokenKind::RParen, "')'")?;
            expr = Expr::FunctionCall { name, arguments, span };
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> PResult<Expr> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::IntLit => {
                self.advance();
                let value = match token.literal {
                    Some(msc_lex::Literal::Int(v)) => v,
                    _ => 0,
                };
                Ok(Expr::IntLiteral { value, span: token.span })
            }
            TokenKind::FloatLit => {
                self.advance();
                let value = match token.literal {
                    Some(msc_lex::Literal::Float(v)) => v,
                    _ => 0.0,
                };
                Ok(Expr::FloatLiteral { value, span: token.span })
            }
            TokenKind::StringLit => {
                self.advance();
                let value = match token.literal {
                    Some(msc_lex::Literal::Str(s)) => s.as_str().to_string(),
                    _ => String::new(),
                };
                Ok(Expr::StringLiteral { value, span: token.span })
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::BoolLiteral { value: true, span: token.span })
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::BoolLiteral { value: false, span: token.span })
            }
            TokenKind::Id => {
                self.advance();
                Ok(Expr::Identifier { name: token.lexeme, span: token.span })
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(expr)
            }
            _ => {
                self.error_at(token.span, format!("expected expression, found '{}'", token.lexeme));
                Err(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msc_lex::Lexer;

    fn parse(source: &str) -> (Program, usize) {
        let handler = Handler::new();
        let tokens = Lexer::new(source, &handler).tokenize();
        let program = Parser::new(tokens, &handler).parse();
        (program, handler.error_count())
    }

    #[test]
    fn parses_var_decl_with_initializer() {
        let (program, errors) = parse("var x = 10;");
        assert_eq!(errors, 0);
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn left_associative_addition() {
        let (program, errors) = parse("var z = 1 - 2 - 3;");
        assert_eq!(errors, 0);
        if let Statement::VarDeclaration { initializer: Some(Expr::BinaryOp { left, operator, .. }), .. } =
            &program.statements[0]
        {
            assert_eq!(operator, "-");
            assert!(matches!(**left, Expr::BinaryOp { .. }));
        } else {
            panic!("expected binary op initializer");
        }
    }

    #[test]
    fn call_on_non_identifier_is_an_error() {
        let (_, errors) = parse("var x = (1)(2);");
        assert!(errors > 0);
    }

    #[test]
    fn chained_call_on_a_call_result_is_an_error() {
        // `foo()` is fine, but calling its result again isn't a plain
        // identifier call, so the second `(` must be rejected in place
        // rather than left dangling for a later stage to stumble over.
        let (_, errors) = parse("var x = foo()();");
        assert!(errors > 0);
    }

    #[test]
    fn bare_function_call_statement_is_rejected() {
        let (_, errors) = parse("foo();");
        assert!(errors > 0);
    }

    #[test]
    fn panic_mode_recovers_after_bad_statement() {
        let (program, errors) = parse("var ; var y = 1;");
        assert!(errors > 0);
        // the second declaration should still have been parsed
        assert!(program.statements.iter().any(|s| matches!(s, Statement::VarDeclaration { name, .. } if name == "y")));
    }

    proptest::proptest! {
        #[test]
        fn prop_var_decl_with_int_literal_round_trips(n in 0i64..1_000_000) {
            let (program, errors) = parse(&format!("var x = {n};"));
            proptest::prop_assert_eq!(errors, 0);
            match &program.statements[0] {
                Statement::VarDeclaration { initializer: Some(Expr::IntLiteral { value, .. }), .. } => {
                    proptest::prop_assert_eq!(*value, n);
                }
                other => proptest::prop_assert!(false, "unexpected statement: {:?}", other),
            }
        }
    }
}
