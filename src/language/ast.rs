use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Add, Operation::Subtract, Operation::Multiply];

    pub fn keyword(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
        }
    }

    /// Matches a lowercased operation word.
    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.keyword() == word)
    }

    /// Folds `operand` into `accumulator`. Overflow wraps.
    pub fn apply(&self, accumulator: i64, operand: i64) -> i64 {
        match self {
            Operation::Add => accumulator.wrapping_add(operand),
            Operation::Subtract => accumulator.wrapping_sub(operand),
            Operation::Multiply => accumulator.wrapping_mul(operand),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Literal(i64),
    Register(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(value) => write!(f, "{value}"),
            Operand::Register(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub operation: Operation,
    pub operand: Operand,
}

impl Instruction {
    pub fn new(operation: Operation, operand: Operand) -> Self {
        Self { operation, operand }
    }

    pub fn literal(operation: Operation, value: i64) -> Self {
        Self::new(operation, Operand::Literal(value))
    }

    pub fn register(operation: Operation, name: impl Into<String>) -> Self {
        Self::new(operation, Operand::Register(name.into()))
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operation, self.operand)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Define {
        register: String,
        instruction: Instruction,
    },
    Print {
        register: String,
    },
    Quit,
    Blank,
}
