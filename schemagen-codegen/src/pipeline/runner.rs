//! Driver for phased generators.

use tracing::debug;

use super::{Diagnostic, EmitContext, EmitPhase};
use crate::{builder::CodeFragment, error::Result, generation::ImportingHelper, language::TypeMapper};

/// A generator that emits code for an ordered list of entries in four
/// phases.
///
/// `collect` registers types with the importing helper and decides whether
/// an entry takes part; the emitting phases then see accepted entries only,
/// in their original order.
pub trait PhasedGenerator {
    type Entry;
    type Mapper: TypeMapper;

    /// Register the entry's types. Returns `false` to skip the entry, after
    /// recording a warning on `ctx`.
    fn collect(
        &self,
        entry: &Self::Entry,
        imports: &mut ImportingHelper<Self::Mapper>,
        ctx: &mut EmitContext,
    ) -> Result<bool>;

    fn decl(
        &self,
        _entry: &Self::Entry,
        _imports: &ImportingHelper<Self::Mapper>,
    ) -> Result<Vec<CodeFragment>> {
        Ok(Vec::new())
    }

    fn ctor(
        &self,
        _entry: &Self::Entry,
        _imports: &ImportingHelper<Self::Mapper>,
    ) -> Result<Vec<CodeFragment>> {
        Ok(Vec::new())
    }

    fn implementation(
        &self,
        _entry: &Self::Entry,
        _imports: &ImportingHelper<Self::Mapper>,
    ) -> Result<Vec<CodeFragment>> {
        Ok(Vec::new())
    }
}

/// Fragments produced by each emitting phase.
#[derive(Debug, Default)]
pub struct PhasedOutput {
    pub decls: Vec<CodeFragment>,
    pub ctors: Vec<CodeFragment>,
    pub impls: Vec<CodeFragment>,
    /// Number of entries that survived collection.
    pub accepted: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl PhasedOutput {
    pub fn fragments(&self, phase: EmitPhase) -> &[CodeFragment] {
        match phase {
            EmitPhase::Collect => &[],
            EmitPhase::Decl => &self.decls,
            EmitPhase::Ctor => &self.ctors,
            EmitPhase::Impl => &self.impls,
        }
    }
}

/// Runs a [`PhasedGenerator`] over its entries.
pub struct PhasedEmitter<'g, G> {
    generator: &'g G,
}

impl<'g, G: PhasedGenerator> PhasedEmitter<'g, G> {
    pub fn new(generator: &'g G) -> Self {
        Self { generator }
    }

    /// Collect every entry, resolve imports, then run the emitting phases.
    ///
    /// Types registered on `imports` before the call are kept.
    pub fn run(
        &self,
        entries: &[G::Entry],
        imports: &mut ImportingHelper<G::Mapper>,
    ) -> Result<PhasedOutput> {
        let mut ctx = EmitContext::new();
        let mut output = PhasedOutput::default();

        let mut accepted = Vec::with_capacity(entries.len());
        for entry in entries {
            if self.generator.collect(entry, imports, &mut ctx)? {
                accepted.push(entry);
            }
        }
        imports.resolve_imports()?;
        debug!(
            entries = entries.len(),
            accepted = accepted.len(),
            "collected entries"
        );

        while ctx.advance() {
            let phase = ctx.phase();
            let mut fragments = Vec::new();
            for entry in &accepted {
                let produced = match phase {
                    EmitPhase::Collect => Vec::new(),
                    EmitPhase::Decl => self.generator.decl(entry, imports)?,
                    EmitPhase::Ctor => self.generator.ctor(entry, imports)?,
                    EmitPhase::Impl => self.generator.implementation(entry, imports)?,
                };
                fragments.extend(produced);
            }
            match phase {
                EmitPhase::Collect => {}
                EmitPhase::Decl => output.decls = fragments,
                EmitPhase::Ctor => output.ctors = fragments,
                EmitPhase::Impl => output.impls = fragments,
            }
        }

        output.accepted = accepted.len();
        output.diagnostics = ctx.into_diagnostics();
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use schemagen_ast::TypeExpr;
    use schemagen_core::{to_camel_case, to_pascal_case};

    use super::*;
    use crate::{
        language::NamingConvention,
        resolve::Primitive,
        testing::reference,
    };

    fn keep(name: &str) -> String {
        name.to_string()
    }

    const NAMING: NamingConvention = NamingConvention {
        type_case: to_pascal_case,
        member_case: to_camel_case,
        reserved_words: &[],
        escape_reserved: keep,
    };

    struct Plain;

    impl TypeMapper for Plain {
        fn language(&self) -> &'static str {
            "plain"
        }

        fn naming(&self) -> &NamingConvention {
            &NAMING
        }

        fn map_primitive(&self, primitive: Primitive) -> String {
            primitive.name().to_string()
        }

        fn map_vector(&self, elem: &str) -> String {
            format!("{}[]", elem)
        }

        fn map_string_map(&self, elem: &str) -> String {
            format!("Map<{}>", elem)
        }

        fn map_nullable(&self, elem: &str) -> String {
            format!("{}?", elem)
        }

        fn qualify(&self, alias: &str, name: &str) -> String {
            format!("{}.{}", alias, name)
        }
    }

    /// Entries are `(name, Some(request type))`; `None` marks an entry to skip.
    struct Slots;

    impl PhasedGenerator for Slots {
        type Entry = (&'static str, Option<TypeExpr>);
        type Mapper = Plain;

        fn collect(
            &self,
            (name, te): &Self::Entry,
            imports: &mut ImportingHelper<Plain>,
            ctx: &mut EmitContext,
        ) -> Result<bool> {
            match te {
                Some(te) => {
                    imports.add_type(te)?;
                    Ok(true)
                }
                None => {
                    ctx.warn(*name, format!("skipping '{}'", name));
                    Ok(false)
                }
            }
        }

        fn decl(&self, (name, te): &Self::Entry, imports: &ImportingHelper<Plain>) -> Result<Vec<CodeFragment>> {
            let te = te.as_ref().map(|t| imports.as_referenced_name(t)).transpose()?;
            Ok(vec![CodeFragment::line(format!(
                "decl {}: {}",
                name,
                te.unwrap_or_default()
            ))])
        }

        fn ctor(&self, (name, _): &Self::Entry, _: &ImportingHelper<Plain>) -> Result<Vec<CodeFragment>> {
            Ok(vec![CodeFragment::line(format!("ctor {}", name))])
        }

        fn implementation(&self, (name, _): &Self::Entry, _: &ImportingHelper<Plain>) -> Result<Vec<CodeFragment>> {
            Ok(vec![CodeFragment::line(format!("impl {}", name))])
        }
    }

    fn lines(fragments: &[CodeFragment]) -> Vec<String> {
        fragments
            .iter()
            .map(|f| match f {
                CodeFragment::Line(s) => s.clone(),
                other => format!("{:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_phase_and_entry_order() {
        let entries = vec![
            ("login", Some(reference("protoapp.apis.ui.LoginReq"))),
            ("logout", Some(reference("common.http.Unit"))),
        ];
        let mut imports = ImportingHelper::new(Plain);

        let output = PhasedEmitter::new(&Slots).run(&entries, &mut imports).unwrap();

        assert_eq!(
            lines(output.fragments(EmitPhase::Decl)),
            vec!["decl login: ui.LoginReq", "decl logout: http.Unit"]
        );
        assert_eq!(lines(&output.ctors), vec!["ctor login", "ctor logout"]);
        assert_eq!(lines(&output.impls), vec!["impl login", "impl logout"]);
        assert!(output.fragments(EmitPhase::Collect).is_empty());
        assert!(output.diagnostics.is_empty());
        assert!(imports.is_resolved());
    }

    #[test]
    fn test_rejected_entries_are_skipped_with_warning() {
        let entries = vec![
            ("login", Some(reference("protoapp.apis.ui.LoginReq"))),
            ("version", None),
            ("logout", Some(reference("common.http.Unit"))),
        ];
        let mut imports = ImportingHelper::new(Plain);

        let output = PhasedEmitter::new(&Slots).run(&entries, &mut imports).unwrap();

        assert_eq!(output.accepted, 2);
        assert_eq!(lines(&output.ctors), vec!["ctor login", "ctor logout"]);
        assert_eq!(output.diagnostics.len(), 1);
        assert!(output.diagnostics[0].severity.is_warning());
        assert_eq!(output.diagnostics[0].phase, "collect");
    }

    #[test]
    fn test_collect_errors_abort_the_run() {
        let mut imports = ImportingHelper::new(Plain);
        imports.resolve_imports().unwrap();

        let entries = vec![("login", Some(reference("protoapp.apis.ui.LoginReq")))];
        assert!(PhasedEmitter::new(&Slots).run(&entries, &mut imports).is_err());
    }
}
