//! TypeScript function and method builder.

use schemagen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// A parameter in a TypeScript function.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    fn render(&self) -> String {
        format!("{}: {}", self.name, self.ty)
    }
}

/// Builder for TypeScript functions and class methods.
#[derive(Debug, Clone)]
pub struct Fn {
    name: String,
    doc: Option<String>,
    exported: bool,
    method: bool,
    is_async: bool,
    params: Vec<Param>,
    return_type: Option<String>,
    body: Vec<CodeFragment>,
}

impl Fn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            exported: true,
            method: false,
            is_async: false,
            params: Vec::new(),
            return_type: None,
            body: Vec::new(),
        }
    }

    /// A class method: no `export` or `function` keyword.
    pub fn method(name: impl Into<String>) -> Self {
        Self {
            exported: false,
            method: true,
            ..Self::new(name)
        }
    }

    /// Set the doc comment if there is one.
    pub fn doc_opt(mut self, doc: Option<&str>) -> Self {
        self.doc = doc.map(str::to_string);
        self
    }

    pub fn async_(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// Add a line to the function body.
    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::line(line));
        self
    }

    /// Add structured body content.
    pub fn body_fragments(mut self, fragments: impl IntoIterator<Item = CodeFragment>) -> Self {
        self.body.extend(fragments);
        self
    }

    fn signature(&self) -> String {
        let export = if self.exported { "export " } else { "" };
        let async_kw = if self.is_async { "async " } else { "" };
        let function_kw = if self.method { "" } else { "function " };
        let params = self
            .params
            .iter()
            .map(Param::render)
            .collect::<Vec<_>>()
            .join(", ");

        match &self.return_type {
            Some(ret) => format!(
                "{}{}{}{}({}): {} {{",
                export, async_kw, function_kw, self.name, params, ret
            ),
            None => format!(
                "{}{}{}{}({}) {{",
                export, async_kw, function_kw, self.name, params
            ),
        }
    }

    /// Build the function as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Fn {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::jsdoc(doc.clone()));
        }
        fragments.push(CodeFragment::block(self.signature(), self.body.clone(), "}"));
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exported_fn_with_params() {
        let f = Fn::new("registerEndpoints")
            .param(Param::new("h", "Partial<Endpoints>"))
            .param(Param::new("r", "Router"))
            .body_line("const api = makeApiRequests({});")
            .build();
        assert_eq!(
            f,
            "export function registerEndpoints(h: Partial<Endpoints>, r: Router) {\n  const api = makeApiRequests({});\n}\n"
        );
    }

    #[test]
    fn test_async_method_with_doc() {
        let f = Fn::method("login")
            .doc_opt(Some("Login a user"))
            .async_()
            .param(Param::new("req", "LoginReq"))
            .returns("Promise<LoginResp>")
            .body_line("return this.postLogin.call(req);")
            .build();
        assert_eq!(
            f,
            "/** Login a user */\nasync login(req: LoginReq): Promise<LoginResp> {\n  return this.postLogin.call(req);\n}\n"
        );
    }

    #[test]
    fn test_nested_body() {
        let f = Fn::method("run")
            .body_fragments([CodeFragment::block("if (x) {", vec![CodeFragment::line("y();")], "}")])
            .build();
        assert_eq!(f, "run() {\n  if (x) {\n    y();\n  }\n}\n");
    }
}
