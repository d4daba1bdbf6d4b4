//! Semantic analyzer (§4.4): a depth-first tree walk over one shared
//! `SymbolTable`, declaring, looking up, and type-checking as it goes.

use msc_par::{Expr, Program, Statement};
use msc_util::{DiagnosticBuilder, Handler};

use crate::symbol_table::SymbolTable;
use crate::types::{infer_binary, infer_unary, DataType};

pub struct SemanticAnalyzer<'a> {
    table: SymbolTable,
    handler: &'a Handler,
}

impl<'a> SemanticAnalyzer<'a> {
    pub fn new(handler: &'a Handler) -> Self {
        Self { table: SymbolTable::new(), handler }
    }

    /// Visits the whole program regardless of errors found along the way
    /// (best-effort, per §7), returning whether it was error-free.
    pub fn analyze(mut self, program: &Program) -> bool {
        for statement in &program.statements {
            self.visit_statement(statement);
        }
        !self.handler.has_errors()
    }

    fn error(&self, span: msc_util::Span, message: impl Into<String>) {
        DiagnosticBuilder::error(message).span(span).emit(self.handler);
    }

    fn visit_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::VarDeclaration { name, initializer, span } => {
                if !self.table.declare(name, DataType::Auto, false) {
                    self.error(*span, format!("Variable '{name}' already declared"));
                }
                if let Some(init) = initializer {
                    self.visit_expr(init);
                }
            }
            Statement::Assignment { target, value, span } => {
                if self.table.lookup(target).is_none() {
                    self.error(*span, format!("Undeclared variable '{target}'"));
                }
                self.visit_expr(value);
            }
            Statement::If { condition, then_body, else_body, span } => {
                let cond_type = self.visit_expr(condition);
                if cond_type != DataType::Bool {
                    self.error(*span, format!("If condition must be bool, got {cond_type}"));
                }
                for stmt in then_body {
                    self.visit_statement(stmt);
                }
                if let Some(else_body) = else_body {
                    for stmt in else_body {
                        self.visit_statement(stmt);
                    }
                }
            }
            Statement::While { condition, body, span } => {
                let cond_type = self.visit_expr(condition);
                if cond_type != DataType::Bool {
                    self.error(*span, format!("While condition must be bool, got {cond_type}"));
                }
                for stmt in body {
                    self.visit_statement(stmt);
                }
            }
            Statement::For { init, condition, update, body, span } => {
                self.table.enter_scope();
                if let Some(init) = init {
                    self.visit_statement(init);
                }
                if let Some(condition) = condition {
                    let cond_type = self.visit_expr(condition);
                    if cond_type != DataType::Bool {
                        self.error(*span, format!("For condition must be bool, got {cond_type}"));
                    }
                }
                if let Some(update) = update {
                    self.visit_statement(update);
                }
                for stmt in body {
                    self.visit_statement(stmt);
                }
                self.table.exit_scope();
            }
            Statement::FunctionDeclaration { name, parameters, body, span } => {
                if !self.table.declare(name, DataType::Func, true) {
                    self.error(*span, format!("Function '{name}' already declared"));
                }
                self.table.enter_scope();
                for param in parameters {
                    self.table.declare(param, DataType::Auto, false);
                }
                for stmt in body {
                    self.visit_statement(stmt);
                }
                self.table.exit_scope();
            }
            Statement::Return { value, .. } => {
                if let Some(value) = value {
                    self.visit_expr(value);
                }
            }
            Statement::Print { value, .. } => {
                self.visit_expr(value);
            }
        }
    }

    fn visit_expr(&mut self, expr: &Expr) -> DataType {
        match expr {
            Expr::BinaryOp { left, operator, right, .. } => {
                let lt = self.visit_expr(left);
                let rt = self.visit_expr(right);
                infer_binary(lt, operator, rt)
            }
            Expr::UnaryOp { operator, operand, .. } => {
                let ot = self.visit_expr(operand);
                infer_unary(operator, ot)
            }
            Expr::Identifier { name, span } => match self.table.lookup(name) {
                Some(symbol) => symbol.data_type,
                None => {
                    self.error(*span, format!("Undeclared variable '{name}'"));
                    DataType::Error
                }
            },
            Expr::IntLiteral { .. } => DataType::Int,
            Expr::FloatLiteral { .. } => DataType::Float,
            Expr::StringLiteral { .. } => DataType::String,
            Expr::BoolLiteral { .. } => DataType::Bool,
            Expr::FunctionCall { name, arguments, span } => {
                match self.table.lookup(name) {
                    None => self.error(*span, format!("Undeclared function '{name}'")),
                    Some(symbol) if !symbol.is_function => {
                        self.error(*span, format!("'{name}' is not a function"))
                    }
                    Some(_) => {}
                }
                for arg in arguments {
                    self.visit_expr(arg);
                }
                DataType::Auto
            }
            Expr::ArrayAccess { array, index, .. } => {
                self.visit_expr(array);
                self.visit_expr(index);
                DataType::Error
            }
        }
    }
}
