//! TypeScript interface builder.

use schemagen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::Param;

/// A member of a TypeScript interface.
#[derive(Debug, Clone)]
pub enum InterfaceMember {
    Field { name: String, ty: String },
    Method { name: String, params: Vec<Param>, returns: String },
}

impl InterfaceMember {
    fn render(&self) -> String {
        match self {
            InterfaceMember::Field { name, ty } => format!("{}: {};", name, ty),
            InterfaceMember::Method {
                name,
                params,
                returns,
            } => {
                let params = params
                    .iter()
                    .map(|p| format!("{}: {}", p.name, p.ty))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}({}): {};", name, params, returns)
            }
        }
    }
}

impl Renderable for InterfaceMember {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(self.render())]
    }
}

/// Builder for TypeScript interfaces.
#[derive(Debug, Clone)]
pub struct Interface {
    name: String,
    members: Vec<InterfaceMember>,
    exported: bool,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            exported: true,
        }
    }

    /// Add a required field.
    pub fn field(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.members.push(InterfaceMember::Field {
            name: name.into(),
            ty: ty.into(),
        });
        self
    }

    /// Make this interface private (not exported).
    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build the interface as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Interface {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let export = if self.exported { "export " } else { "" };

        if self.members.is_empty() {
            vec![CodeFragment::line(format!(
                "{}interface {} {{}}",
                export, self.name
            ))]
        } else {
            vec![CodeFragment::block(
                format!("{}interface {} {{", export, self.name),
                self.members
                    .iter()
                    .map(|m| CodeFragment::line(m.render()))
                    .collect(),
                "}",
            )]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_interface() {
        let i = Interface::new("Empty").build();
        assert_eq!(i, "export interface Empty {}\n");
    }

    #[test]
    fn test_private_interface_with_fields() {
        let i = Interface::new("MessageTable")
            .private()
            .field("id", "string")
            .field("posted_at", "Date")
            .build();
        assert_eq!(
            i,
            "interface MessageTable {\n  id: string;\n  posted_at: Date;\n}\n"
        );
    }

    #[test]
    fn test_method_signature() {
        let member = InterfaceMember::Method {
            name: "login".to_string(),
            params: vec![
                Param::new("ctx", "AContext<LoginResp>"),
                Param::new("req", "LoginReq"),
            ],
            returns: "Promise<void>".to_string(),
        };
        assert_eq!(
            member.to_fragments(),
            vec![CodeFragment::line(
                "login(ctx: AContext<LoginResp>, req: LoginReq): Promise<void>;"
            )]
        );
    }
}
