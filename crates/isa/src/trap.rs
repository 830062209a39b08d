use std::fmt::{self, Display};

/// the five terminating conditions. there is no sixth: every
/// trap raised anywhere in `crates/runtime` is one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapKind {
    Arithmetic,
    Memory,
    Assertion,
    User,
    InvalidOpcode,
}

impl TrapKind {
    /// stable, distinct, non-zero per kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            TrapKind::Arithmetic => 1,
            TrapKind::Memory => 2,
            TrapKind::Assertion => 3,
            TrapKind::User => 4,
            TrapKind::InvalidOpcode => 5,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TrapKind::Arithmetic => "arithmetic",
            TrapKind::Memory => "memory",
            TrapKind::Assertion => "assertion",
            TrapKind::User => "user",
            TrapKind::InvalidOpcode => "invalid opcode",
        }
    }
}

/// a runtime failure that terminates execution immediately and
/// non-recoverably. carries the trap kind together with
/// whatever message the bytecode supplied, so a caller only has to match
/// on one type.
#[derive(Debug)]
pub struct Trap {
    pub kind: TrapKind,
    pub message: Option<String>,
}

impl Trap {
    pub fn new(kind: TrapKind) -> Self {
        Self { kind, message: None }
    }

    pub fn with_message(kind: TrapKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
        }
    }
}

impl Display for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{} trap: {}", self.kind.label(), message),
            None => write!(f, "{} trap", self.kind.label()),
        }
    }
}

impl std::error::Error for Trap {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn exit_codes_are_distinct() {
        let kinds = [
            TrapKind::Arithmetic,
            TrapKind::Memory,
            TrapKind::Assertion,
            TrapKind::User,
            TrapKind::InvalidOpcode,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert!(a.exit_code() != b.exit_code());
            }
        }
    }

    #[test]
    fn display_includes_the_message_when_present() {
        let trap = Trap::with_message(TrapKind::Assertion, "oops");
        assert_eq!(format!("{}", trap), "assertion trap: oops");
    }
}
