//! Bounded operation audit stack
//!
//! Holds the kinds of completed user actions, most recent on top. Once the
//! stack is full further pushes are refused; nothing is ever evicted.

use std::fmt;

use serde::Serialize;

use super::result::{Error, Result};

/// Kind of completed user action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    CreateAccount,
    DisplayAccount,
    Deposit,
    Withdraw,
    Transfer,
    UpdateAccount,
    DeleteAccount,
}

impl OperationKind {
    /// Numeric operation code
    pub fn code(&self) -> u8 {
        match self {
            OperationKind::CreateAccount => 1,
            OperationKind::DisplayAccount => 2,
            OperationKind::Deposit => 3,
            OperationKind::Withdraw => 4,
            OperationKind::Transfer => 5,
            OperationKind::UpdateAccount => 6,
            OperationKind::DeleteAccount => 7,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(OperationKind::CreateAccount),
            2 => Some(OperationKind::DisplayAccount),
            3 => Some(OperationKind::Deposit),
            4 => Some(OperationKind::Withdraw),
            5 => Some(OperationKind::Transfer),
            6 => Some(OperationKind::UpdateAccount),
            7 => Some(OperationKind::DeleteAccount),
            _ => None,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OperationKind::CreateAccount => "Create Account",
            OperationKind::DisplayAccount => "Display Account",
            OperationKind::Deposit => "Deposit",
            OperationKind::Withdraw => "Withdraw",
            OperationKind::Transfer => "Transfer",
            OperationKind::UpdateAccount => "Update Account",
            OperationKind::DeleteAccount => "Delete Account",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone)]
pub struct OperationAudit {
    entries: Vec<OperationKind>,
    capacity: usize,
}

impl OperationAudit {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Push onto the stack, refusing when full
    pub fn push(&mut self, kind: OperationKind) -> Result<()> {
        if self.entries.len() >= self.capacity {
            return Err(Error::AuditFull);
        }
        self.entries.push(kind);
        Ok(())
    }

    pub fn peek(&self) -> Option<OperationKind> {
        self.entries.last().copied()
    }

    /// Pop everything, top of stack first
    pub fn drain(&mut self) -> Vec<OperationKind> {
        let mut drained: Vec<OperationKind> = self.entries.drain(..).collect();
        drained.reverse();
        drained
    }

    /// Entries bottom to top
    pub fn entries(&self) -> &[OperationKind] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
