//! Three-address-code instruction model (§3) and its stable rendering (§4.5, §6).

#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    pub op: String,
    pub arg1: Option<String>,
    pub arg2: Option<String>,
    pub result: Option<String>,
}

impl Instruction {
    pub fn new(op: impl Into<String>) -> Self {
        Self { op: op.into(), arg1: None, arg2: None, result: None }
    }

    pub fn arg1(mut self, v: impl Into<String>) -> Self {
        self.arg1 = Some(v.into());
        self
    }

    pub fn arg2(mut self, v: impl Into<String>) -> Self {
        self.arg2 = Some(v.into());
        self
    }

    pub fn result(mut self, v: impl Into<String>) -> Self {
        self.result = Some(v.into());
        self
    }

    /// Renders one instruction per the four-shape table in §4.5.
    pub fn render(&self) -> String {
        match (&self.result, &self.arg1, &self.arg2) {
            (Some(r), Some(a1), Some(a2)) => format!("{r} = {a1} {op} {a2}", op = self.op),
            (Some(r), Some(a1), None) => format!("{r} = {op} {a1}", op = self.op),
            (None, Some(a1), Some(a2)) => format!("{op} {a1} {a2}", op = self.op),
            (None, Some(a1), None) => format!("{op} {a1}", op = self.op),
            _ => self.op.clone(),
        }
    }
}

/// Renders a whole listing with a fixed, space-padded width-3 index column,
/// per §6's stable format (e.g. `"  0: t1 = 5 + 3"`).
pub fn render_listing(instructions: &[Instruction]) -> String {
    instructions
        .iter()
        .enumerate()
        .map(|(i, instr)| format!("{i:>3}: {}", instr.render()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_result_and_two_args() {
        let i = Instruction::new("+").result("t1").arg1("5").arg2("3");
        assert_eq!(i.render(), "t1 = 5 + 3");
    }

    #[test]
    fn renders_assign() {
        let i = Instruction::new("ASSIGN").arg1("10").arg2("x");
        assert_eq!(i.render(), "ASSIGN 10 x");
    }

    #[test]
    fn renders_label_with_no_args() {
        let i = Instruction::new("LABEL").arg1("L1");
        assert_eq!(i.render(), "LABEL L1");
    }

    #[test]
    fn renders_bare_op() {
        let i = Instruction::new("RETURN");
        assert_eq!(i.render(), "RETURN");
    }
}
