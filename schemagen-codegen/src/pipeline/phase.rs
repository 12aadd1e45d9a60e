//! Emission phases.

use std::fmt;

/// A pass of the phased emission protocol.
///
/// Phases run strictly in declaration order; `Collect` registers every
/// referenced type before any code is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EmitPhase {
    Collect,
    Decl,
    Ctor,
    Impl,
}

impl EmitPhase {
    pub const ALL: [EmitPhase; 4] = [
        EmitPhase::Collect,
        EmitPhase::Decl,
        EmitPhase::Ctor,
        EmitPhase::Impl,
    ];

    /// The following phase, or `None` after `Impl`.
    pub fn next(self) -> Option<Self> {
        match self {
            EmitPhase::Collect => Some(EmitPhase::Decl),
            EmitPhase::Decl => Some(EmitPhase::Ctor),
            EmitPhase::Ctor => Some(EmitPhase::Impl),
            EmitPhase::Impl => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EmitPhase::Collect => "collect",
            EmitPhase::Decl => "decl",
            EmitPhase::Ctor => "ctor",
            EmitPhase::Impl => "impl",
        }
    }

    /// Whether the phase produces code.
    pub fn emits(&self) -> bool {
        !matches!(self, EmitPhase::Collect)
    }
}

impl fmt::Display for EmitPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_walks_all_phases() {
        let mut phases = vec![EmitPhase::Collect];
        while let Some(next) = phases.last().and_then(|p| p.next()) {
            phases.push(next);
        }
        assert_eq!(phases, EmitPhase::ALL.to_vec());
        assert_eq!(EmitPhase::Impl.next(), None);
    }

    #[test]
    fn test_only_collect_is_silent() {
        let emitting: Vec<&str> = EmitPhase::ALL
            .iter()
            .filter(|p| p.emits())
            .map(|p| p.name())
            .collect();
        assert_eq!(emitting, vec!["decl", "ctor", "impl"]);
    }
}
