//! Type vocabulary and the fixed inference rules of §4.3.
//!
//! This is a rule table, not a unification engine: MiniScript has no type
//! variables to solve for, so there is nothing to build a constraint solver
//! around. `Auto` is a propagation placeholder, computed bottom-up in one
//! pass directly from already-known child types.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    Int,
    Float,
    Bool,
    String,
    Auto,
    Error,
    Func,
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Bool => "bool",
            DataType::String => "string",
            DataType::Auto => "auto",
            DataType::Error => "error",
            DataType::Func => "func",
        };
        write!(f, "{s}")
    }
}

impl DataType {
    fn is_numeric(self) -> bool {
        matches!(self, DataType::Int | DataType::Float)
    }
}

/// `!x` is always `bool`; `-x` keeps the operand's type if numeric.
pub fn infer_unary(operator: &str, operand: DataType) -> DataType {
    match operator {
        "!" => DataType::Bool,
        "-" => {
            if operand.is_numeric() {
                operand
            } else {
                DataType::Error
            }
        }
        _ => DataType::Error,
    }
}

/// Binary operator type inference (§4.3).
pub fn infer_binary(left: DataType, operator: &str, right: DataType) -> DataType {
    match operator {
        "<" | ">" | "<=" | ">=" | "==" | "!=" | "&&" | "||" => DataType::Bool,
        "+" | "-" | "*" | "/" | "%" => infer_arithmetic(left, right),
        _ => DataType::Error,
    }
}

fn infer_arithmetic(left: DataType, right: DataType) -> DataType {
    if left == DataType::Auto || right == DataType::Auto {
        let known = if left == DataType::Auto { right } else { left };
        return if known.is_numeric() { known } else { DataType::Int };
    }
    if left == right && left.is_numeric() {
        return left;
    }
    if left.is_numeric() && right.is_numeric() {
        return DataType::Float;
    }
    DataType::Error
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_on_equal_numeric_types_keeps_the_type() {
        assert_eq!(infer_binary(DataType::Int, "+", DataType::Int), DataType::Int);
        assert_eq!(infer_binary(DataType::Float, "*", DataType::Float), DataType::Float);
    }

    #[test]
    fn mixed_int_float_promotes_to_float() {
        assert_eq!(infer_binary(DataType::Int, "+", DataType::Float), DataType::Float);
        assert_eq!(infer_binary(DataType::Float, "+", DataType::Int), DataType::Float);
    }

    #[test]
    fn arithmetic_is_commutative_over_operand_types() {
        for a in [DataType::Int, DataType::Float, DataType::Auto] {
            for b in [DataType::Int, DataType::Float, DataType::Auto] {
                assert_eq!(infer_binary(a, "+", b), infer_binary(b, "+", a));
            }
        }
    }

    fn arith_operand() -> impl proptest::strategy::Strategy<Value = DataType> {
        proptest::prop_oneof![
            proptest::strategy::Just(DataType::Int),
            proptest::strategy::Just(DataType::Float),
            proptest::strategy::Just(DataType::Auto),
        ]
    }

    proptest::proptest! {
        #[test]
        fn prop_arithmetic_commutes_for_any_operator(
            a in arith_operand(),
            b in arith_operand(),
            op in proptest::sample::select(vec!["+", "-", "*", "/", "%"]),
        ) {
            proptest::prop_assert_eq!(infer_binary(a, op, b), infer_binary(b, op, a));
        }
    }

    #[test]
    fn arithmetic_on_non_numeric_is_an_error() {
        assert_eq!(infer_binary(DataType::String, "+", DataType::Int), DataType::Error);
        assert_eq!(infer_binary(DataType::Bool, "+", DataType::Bool), DataType::Error);
    }

    #[test]
    fn comparison_and_logical_always_yield_bool() {
        assert_eq!(infer_binary(DataType::Int, "==", DataType::Int), DataType::Bool);
        assert_eq!(infer_binary(DataType::Bool, "&&", DataType::Bool), DataType::Bool);
    }

    #[test]
    fn unary_not_is_always_bool() {
        assert_eq!(infer_unary("!", DataType::Int), DataType::Bool);
    }

    #[test]
    fn unary_minus_requires_numeric_operand() {
        assert_eq!(infer_unary("-", DataType::Int), DataType::Int);
        assert_eq!(infer_unary("-", DataType::String), DataType::Error);
    }
}
