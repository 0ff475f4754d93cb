use crate::language::ast::Instruction;
use std::collections::VecDeque;

/// A named accumulator defined by an append-only list of instructions.
///
/// `pending` is the part of the definition not yet executed in the current
/// print pass. It only shrinks during a pass, which is what stops evaluation
/// from looping on registers that reference each other.
#[derive(Debug, Clone)]
pub struct Register {
    name: String,
    all_instructions: Vec<Instruction>,
    pending: VecDeque<Instruction>,
    value: i64,
}

impl Register {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            all_instructions: Vec::new(),
            pending: VecDeque::new(),
            value: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub(crate) fn set_value(&mut self, value: i64) {
        self.value = value;
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.all_instructions
    }

    pub fn pending(&self) -> impl Iterator<Item = &Instruction> {
        self.pending.iter()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Appends to the permanent definition. The pending queue of the current
    /// pass is left alone.
    pub fn add_instruction(&mut self, instruction: Instruction) {
        self.all_instructions.push(instruction);
    }

    pub fn reset_pending(&mut self) {
        self.pending = self.all_instructions.iter().cloned().collect();
    }

    pub(crate) fn pop_pending(&mut self) -> Option<Instruction> {
        self.pending.pop_front()
    }
}
