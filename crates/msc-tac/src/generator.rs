//! TAC generator (§4.5): lowers a well-formed, typed AST into a flat
//! instruction list. Assumed infallible — it only ever runs after semantic
//! analysis has returned success (§7).

use msc_par::{Expr, Program, Statement};

use crate::instruction::Instruction;

pub struct TacGenerator {
    instructions: Vec<Instruction>,
    temp_counter: u32,
    label_counter: u32,
}

impl TacGenerator {
    pub fn new() -> Self {
        Self { instructions: Vec::new(), temp_counter: 0, label_counter: 0 }
    }

    pub fn generate(mut self, program: &Program) -> Vec<Instruction> {
        for statement in &program.statements {
            self.lower_statement(statement);
        }
        tracing::debug!(count = self.instructions.len(), "TAC generation complete");
        self.instructions
    }

    fn new_temp(&mut self) -> String {
        self.temp_counter += 1;
        format!("t{}", self.temp_counter)
    }

    fn new_label(&mut self) -> String {
        self.label_counter += 1;
        format!("L{}", self.label_counter)
    }

    fn emit(&mut self, instr: Instruction) {
        self.instructions.push(instr);
    }

    fn lower_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::VarDeclaration { name, initializer, .. } => {
                if let Some(init) = initializer {
                    let value = self.lower_expr(init);
                    self.emit(Instruction::new("ASSIGN").arg1(value).arg2(name.clone()));
                }
            }
            Statement::Assignment { target, value, .. } => {
                let value = self.lower_expr(value);
                self.emit(Instruction::new("ASSIGN").arg1(value).arg2(target.clone()));
            }
            Statement::If { condition, then_body, else_body, .. } => {
                let cond = self.lower_expr(condition);
                let l_false = self.new_label();
                let l_end = self.new_label();
                self.emit(Instruction::new("IF_FALSE").arg1(cond).arg2(l_false.clone()));
                for stmt in then_body {
                    self.lower_statement(stmt);
                }
                self.emit(Instruction::new("GOTO").arg1(l_end.clone()));
                self.emit(Instruction::new("LABEL").arg1(l_false));
                if let Some(else_body) = else_body {
                    for stmt in else_body {
                        self.lower_statement(stmt);
                    }
                }
                self.emit(Instruction::new("LABEL").arg1(l_end));
            }
            Statement::While { condition, body, .. } => {
                let l_loop = self.new_label();
                let l_end = self.new_label();
                self.emit(Instruction::new("LABEL").arg1(l_loop.clone()));
                let cond = self.lower_expr(condition);
                self.emit(Instruction::new("IF_FALSE").arg1(cond).arg2(l_end.clone()));
                for stmt in body {
                    self.lower_statement(stmt);
                }
                self.emit(Instruction::new("GOTO").arg1(l_loop));
                self.emit(Instruction::new("LABEL").arg1(l_end));
            }
            Statement::For { init, condition, update, body, .. } => {
                if let Some(init) = init {
                    self.lower_statement(init);
                }
                let l_loop = self.new_label();
                let l_end = self.new_label();
                self.emit(Instruction::new("LABEL").arg1(l_loop.clone()));
                if let Some(condition) = condition {
                    let cond = self.lower_expr(condition);
                    self.emit(Instruction::new("IF_FALSE").arg1(cond).arg2(l_end.clone()));
                }
                for stmt in body {
                    self.lower_statement(stmt);
                }
                if let Some(update) = update {
                    self.lower_statement(update);
                }
                self.emit(Instruction::new("GOTO").arg1(l_loop));
                self.emit(Instruction::new("LABEL").arg1(l_end));
            }
            Statement::FunctionDeclaration { name, parameters, body, .. } => {
                self.emit(Instruction::new("FUNCTION").arg1(name.clone()));
                for param in parameters {
                    self.emit(Instruction::new("PARAM").arg1(param.clone()));
                }
                for stmt in body {
                    self.lower_statement(stmt);
                }
                self.emit(Instruction::new("RETURN"));
            }
            Statement::Return { value, .. } => {
                if let Some(value) = value {
                    let v = self.lower_expr(value);
                    self.emit(Instruction::new("RETURN").arg1(v));
                } else {
                    self.emit(Instruction::new("RETURN"));
                }
            }
            Statement::Print { value, .. } => {
                let v = self.lower_expr(value);
                self.emit(Instruction::new("PRINT").arg1(v));
            }
        }
    }

    /// Lowers an expression, returning the operand text (`[[e -> x]]` in
    /// §4.5's notation) that a containing instruction can reference.
    fn lower_expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::BinaryOp { left, operator, right, .. } => {
                let x = self.lower_expr(left);
                let y = self.lower_expr(right);
                let t = self.new_temp();
                self.emit(Instruction::new(operator.clone()).result(t.clone()).arg1(x).arg2(y));
                t
            }
            Expr::UnaryOp { operator, operand, .. } => {
                let x = self.lower_expr(operand);
                let t = self.new_temp();
                self.emit(Instruction::new(operator.clone()).result(t.clone()).arg1(x));
                t
            }
            Expr::Identifier { name, .. } => name.clone(),
            Expr::IntLiteral { value, .. } => value.to_string(),
            Expr::FloatLiteral { value, .. } => value.to_string(),
            Expr::StringLiteral { value, .. } => format!("\"{value}\""),
            Expr::BoolLiteral { value, .. } => value.to_string(),
            Expr::FunctionCall { name, arguments, .. } => {
                for arg in arguments {
                    let x = self.lower_expr(arg);
                    self.emit(Instruction::new("ARG").arg1(x));
                }
                let t = self.new_temp();
                self.emit(Instruction::new("CALL").result(t.clone()).arg1(name.clone()));
                t
            }
            Expr::ArrayAccess { .. } => {
                unreachable!("ArrayAccess is AST-shape-only; the parser never produces it")
            }
        }
    }
}

impl Default for TacGenerator {
    fn default() -> Self {
        Self::new()
    }
}
