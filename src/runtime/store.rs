use crate::runtime::{
    error::{RuntimeError, RuntimeResult},
    register::Register,
};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterId(usize);

/// Arena of registers with a name index. Registers are never removed, so
/// ids stay valid for the lifetime of the store.
#[derive(Debug, Default)]
pub struct RegisterStore {
    registers: Vec<Register>,
    by_name: HashMap<String, RegisterId>,
}

impl RegisterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_or_create(&mut self, name: &str) -> RegisterId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let id = RegisterId(self.registers.len());
        self.registers.push(Register::new(name));
        self.by_name.insert(name.to_string(), id);
        id
    }

    pub fn find(&self, name: &str) -> RuntimeResult<RegisterId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| RuntimeError::RegisterNotFound {
                name: name.to_string(),
            })
    }

    pub fn get(&self, id: RegisterId) -> &Register {
        &self.registers[id.0]
    }

    pub fn get_mut(&mut self, id: RegisterId) -> &mut Register {
        &mut self.registers[id.0]
    }

    pub fn reset_all_pending(&mut self) {
        for register in &mut self.registers {
            register.reset_pending();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegisterId, &Register)> {
        self.registers
            .iter()
            .enumerate()
            .map(|(index, register)| (RegisterId(index), register))
    }

    pub fn len(&self) -> usize {
        self.registers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }
}
