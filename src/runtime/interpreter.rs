use crate::language::{
    ast::{Instruction, Operand, Operation},
    command::parse_operand,
};
use crate::runtime::{
    error::{RuntimeError, RuntimeResult},
    store::{RegisterId, RegisterStore},
};

/// Evaluation engine over a [`RegisterStore`].
///
/// Evaluation never fails. Operands naming unknown registers are recorded as
/// diagnostics and skipped; callers drain them with
/// [`Interpreter::take_diagnostics`].
#[derive(Debug, Default)]
pub struct Interpreter {
    store: RegisterStore,
    diagnostics: Vec<EvalDiagnostic>,
}

/// A non-fatal error met while evaluating `register`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalDiagnostic {
    pub register: String,
    pub error: RuntimeError,
}

/// One register being evaluated. `awaiting` holds the operation and the
/// accumulator as it was before the operand register was entered.
struct Frame {
    register: RegisterId,
    awaiting: Option<(Operation, i64)>,
}

impl Frame {
    fn new(register: RegisterId) -> Self {
        Self {
            register,
            awaiting: None,
        }
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &RegisterStore {
        &self.store
    }

    pub fn diagnostics(&self) -> &[EvalDiagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<EvalDiagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Appends an instruction given as raw words. Nothing is created when
    /// either word is rejected.
    pub fn add_instruction(
        &mut self,
        register: &str,
        operation: &str,
        operand: &str,
    ) -> RuntimeResult<RegisterId> {
        let operation =
            Operation::from_keyword(operation).ok_or_else(|| RuntimeError::InvalidOperation {
                operation: operation.to_string(),
            })?;
        let operand = parse_operand(operand).map_err(|err| RuntimeError::InvalidOperand {
            operand: operand.to_string(),
            reason: err.to_string(),
        })?;
        Ok(self.push_instruction(register, Instruction::new(operation, operand)))
    }

    pub fn push_instruction(&mut self, register: &str, instruction: Instruction) -> RegisterId {
        let id = self.store.find_or_create(register);
        self.store.get_mut(id).add_instruction(instruction);
        id
    }

    /// Starts a new pass and evaluates `name`. A missing target is returned
    /// as an error before any pending queue is touched.
    pub fn print_register(&mut self, name: &str) -> RuntimeResult<i64> {
        let id = self.store.find(name)?;
        self.reset_pass();
        Ok(self.evaluate(id))
    }

    pub fn reset_pass(&mut self) {
        self.store.reset_all_pending();
    }

    /// Current accumulator of `name` without running anything.
    pub fn value_of(&self, name: &str) -> RuntimeResult<i64> {
        let id = self.store.find(name)?;
        Ok(self.store.get(id).value())
    }

    /// Drains the pending queue of `id`, entering operand registers as they
    /// come up. A register entered again within the same pass only runs what
    /// is left of its queue and yields its partial value, so cycles end.
    ///
    /// The left-hand side of a register-valued instruction is read before the
    /// operand register is entered. If that operand leads back into the same
    /// register, progress made by the inner visit is overwritten by the fold.
    pub fn evaluate(&mut self, id: RegisterId) -> i64 {
        let mut stack = vec![Frame::new(id)];
        let mut returned = 0;

        while let Some(frame) = stack.last_mut() {
            let register = frame.register;
            if let Some((operation, lhs)) = frame.awaiting.take() {
                self.store
                    .get_mut(register)
                    .set_value(operation.apply(lhs, returned));
            }

            let Some(instruction) = self.store.get_mut(register).pop_pending() else {
                returned = self.store.get(register).value();
                stack.pop();
                continue;
            };

            let current = self.store.get(register).value();
            match instruction.operand {
                Operand::Literal(value) => {
                    self.store
                        .get_mut(register)
                        .set_value(instruction.operation.apply(current, value));
                }
                Operand::Register(name) => match self.store.find(&name) {
                    Ok(target) => {
                        frame.awaiting = Some((instruction.operation, current));
                        stack.push(Frame::new(target));
                    }
                    Err(error) => self.diagnostics.push(EvalDiagnostic {
                        register: self.store.get(register).name().to_string(),
                        error,
                    }),
                },
            }
        }

        returned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn define(interpreter: &mut Interpreter, lines: &[(&str, &str, &str)]) {
        for (register, operation, operand) in lines {
            interpreter
                .add_instruction(register, operation, operand)
                .expect("valid instruction");
        }
    }

    #[test]
    fn register_without_instructions_is_zero() {
        let mut interpreter = Interpreter::new();
        let id = interpreter.store.find_or_create("empty");
        interpreter.reset_pass();
        assert_eq!(interpreter.evaluate(id), 0);
    }

    #[test]
    fn literals_fold_left_to_right_without_precedence() {
        let mut interpreter = Interpreter::new();
        define(
            &mut interpreter,
            &[("x", "add", "5"), ("x", "multiply", "3"), ("x", "subtract", "2")],
        );
        assert_eq!(interpreter.print_register("x"), Ok(13));
    }

    #[test]
    fn second_evaluate_in_same_pass_returns_same_value() {
        let mut interpreter = Interpreter::new();
        define(&mut interpreter, &[("a", "add", "4"), ("a", "multiply", "2")]);
        let id = interpreter.store.find("a").expect("a");
        interpreter.reset_pass();
        assert_eq!(interpreter.evaluate(id), 8);
        assert_eq!(interpreter.evaluate(id), 8);
    }

    #[test]
    fn reset_replays_full_definition_from_current_value() {
        let mut interpreter = Interpreter::new();
        define(&mut interpreter, &[("x", "add", "5"), ("x", "multiply", "3")]);
        assert_eq!(interpreter.print_register("x"), Ok(15));
        assert_eq!(interpreter.print_register("x"), Ok((15 + 5) * 3));
    }

    #[test]
    fn fresh_interpreters_agree_on_acyclic_graphs() {
        let lines = [
            ("a", "add", "2"),
            ("b", "add", "a"),
            ("b", "multiply", "10"),
            ("c", "subtract", "b"),
            ("c", "add", "a"),
        ];
        let mut first = Interpreter::new();
        let mut second = Interpreter::new();
        define(&mut first, &lines);
        define(&mut second, &lines);
        assert_eq!(first.print_register("c"), Ok(-18));
        assert_eq!(second.print_register("c"), Ok(-18));
    }

    #[test]
    fn operand_register_is_consumed_within_the_pass() {
        let mut interpreter = Interpreter::new();
        define(&mut interpreter, &[("a", "add", "5"), ("b", "add", "a")]);
        assert_eq!(interpreter.print_register("b"), Ok(5));

        let a = interpreter.store.find("a").expect("a");
        assert!(!interpreter.store.get(a).has_pending());
        assert_eq!(interpreter.evaluate(a), 5);
    }

    #[test]
    fn mutual_references_terminate_with_partial_values() {
        let mut interpreter = Interpreter::new();
        define(
            &mut interpreter,
            &[
                ("a", "add", "1"),
                ("a", "add", "b"),
                ("b", "add", "1"),
                ("b", "add", "a"),
            ],
        );
        assert_eq!(interpreter.print_register("a"), Ok(3));
        assert_eq!(interpreter.value_of("b"), Ok(2));
        assert!(interpreter.diagnostics().is_empty());
    }

    #[test]
    fn self_reference_reads_partial_value() {
        let mut interpreter = Interpreter::new();
        define(&mut interpreter, &[("a", "add", "3"), ("a", "multiply", "a")]);
        assert_eq!(interpreter.print_register("a"), Ok(9));
    }

    #[test]
    fn fold_uses_accumulator_from_before_the_operand_was_entered() {
        let mut interpreter = Interpreter::new();
        define(
            &mut interpreter,
            &[("a", "add", "b"), ("a", "add", "10"), ("b", "add", "a")],
        );
        assert_eq!(interpreter.print_register("a"), Ok(10));
        assert_eq!(interpreter.value_of("b"), Ok(10));
    }

    #[test]
    fn missing_operand_register_is_skipped_and_reported() {
        let mut interpreter = Interpreter::new();
        define(
            &mut interpreter,
            &[("a", "add", "z"), ("a", "add", "2")],
        );
        assert_eq!(interpreter.print_register("a"), Ok(2));
        assert_eq!(
            interpreter.take_diagnostics(),
            vec![EvalDiagnostic {
                register: "a".into(),
                error: RuntimeError::RegisterNotFound { name: "z".into() },
            }]
        );
        assert!(interpreter.diagnostics().is_empty());
        assert!(interpreter.store().find("z").is_err());
    }

    #[test]
    fn diagnostics_name_the_register_holding_the_bad_operand() {
        let mut interpreter = Interpreter::new();
        define(&mut interpreter, &[("top", "add", "mid"), ("mid", "add", "gone")]);
        assert_eq!(interpreter.print_register("top"), Ok(0));
        let diagnostics = interpreter.take_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].register, "mid");
    }

    #[test]
    fn missing_print_target_leaves_pending_queues_alone() {
        let mut interpreter = Interpreter::new();
        define(&mut interpreter, &[("a", "add", "1")]);
        assert_eq!(
            interpreter.print_register("nope"),
            Err(RuntimeError::RegisterNotFound {
                name: "nope".into()
            })
        );
        let a = interpreter.store.find("a").expect("a");
        assert!(!interpreter.store.get(a).has_pending());
    }

    #[test]
    fn print_resets_registers_outside_the_printed_graph() {
        let mut interpreter = Interpreter::new();
        define(&mut interpreter, &[("a", "add", "1"), ("lonely", "add", "7")]);
        assert_eq!(interpreter.print_register("a"), Ok(1));
        let lonely = interpreter.store.find("lonely").expect("lonely");
        assert!(interpreter.store.get(lonely).has_pending());
    }

    #[test]
    fn rejected_words_do_not_create_registers() {
        let mut interpreter = Interpreter::new();
        assert_eq!(
            interpreter.add_instruction("a", "divide", "2"),
            Err(RuntimeError::InvalidOperation {
                operation: "divide".into()
            })
        );
        assert!(matches!(
            interpreter.add_instruction("a", "add", "99999999999999999999"),
            Err(RuntimeError::InvalidOperand { .. })
        ));
        assert!(interpreter.store().is_empty());
    }

    #[test]
    fn instructions_added_after_a_pass_join_the_next_pass() {
        let mut interpreter = Interpreter::new();
        define(&mut interpreter, &[("a", "add", "1")]);
        assert_eq!(interpreter.print_register("a"), Ok(1));
        define(&mut interpreter, &[("b", "add", "a")]);
        assert_eq!(interpreter.print_register("b"), Ok(2));
        assert_eq!(interpreter.value_of("a"), Ok(2));
    }

    #[test]
    fn long_reference_chains_do_not_recurse_on_the_thread_stack() {
        let mut interpreter = Interpreter::new();
        interpreter
            .add_instruction("r0", "add", "1")
            .expect("valid");
        let depth = 100_000;
        for index in 1..=depth {
            let previous = format!("r{}", index - 1);
            interpreter
                .add_instruction(&format!("r{index}"), "add", &previous)
                .expect("valid");
        }
        assert_eq!(interpreter.print_register(&format!("r{depth}")), Ok(1));
    }
}
