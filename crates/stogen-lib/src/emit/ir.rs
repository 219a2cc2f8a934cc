//! Emission IR: the C++ declarations of a header, as data.
//!
//! Lowering builds these nodes; [`super::render`] is the only code that
//! turns them into text.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Blank,
    /// Preprocessor line, never indented.
    Directive(String),
    /// A complete one-line declaration, terminator included.
    Line(String),
    /// Text rendered earlier, written as is.
    Rendered(String),
    Namespace(Namespace),
    Enum(Enum),
    Struct(Struct),
    Function(Function),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// May be qualified (`a::b`).
    pub name: String,
    pub items: Vec<Item>,
}

/// A scoped enum. Every enumerator carries its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    pub name: String,
    pub underlying: String,
    pub enumerators: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    /// `template <...>`
    Params(Vec<String>),
    /// `template <>`
    Specialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Struct,
    Class,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Struct {
    pub template: Option<Template>,
    pub keyword: Keyword,
    /// Including specialization arguments, e.g. `SplitPolicy<1>`.
    pub name: String,
    pub base: Option<String>,
    /// `None` for a forward declaration.
    pub members: Option<Vec<Member>>,
}

impl Struct {
    pub fn new(keyword: Keyword, name: impl Into<String>) -> Self {
        Self {
            template: None,
            keyword,
            name: name.into(),
            base: None,
            members: Some(Vec::new()),
        }
    }

    pub fn template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Drop the body, leaving `struct name;`.
    pub fn forward(mut self) -> Self {
        self.members = None;
        self
    }

    pub fn member(mut self, member: Member) -> Self {
        self.members.get_or_insert_with(Vec::new).push(member);
        self
    }

    pub fn members(mut self, members: impl IntoIterator<Item = Member>) -> Self {
        self.members.get_or_insert_with(Vec::new).extend(members);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Access(Access),
    /// Field, alias or static constant, terminator included.
    Line(String),
    Function(Function),
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub template: Option<Template>,
    /// `inline`, `static`, `constexpr`, ... in emission order.
    pub specifiers: Vec<&'static str>,
    /// Empty for constructors and conversion operators.
    pub ret: String,
    pub name: String,
    pub params: Vec<String>,
    pub is_const: bool,
    /// Constructor initializer list, without the leading `:`.
    pub init: Option<String>,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// `= default;`
    Default,
    Block(Vec<Stmt>),
}

impl Function {
    pub fn new(ret: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            template: None,
            specifiers: Vec::new(),
            ret: ret.into(),
            name: name.into(),
            params: Vec::new(),
            is_const: false,
            init: None,
            body: Body::Block(Vec::new()),
        }
    }

    pub fn template(mut self, params: &[&str]) -> Self {
        self.template = Some(Template::Params(
            params.iter().map(ToString::to_string).collect(),
        ));
        self
    }

    pub fn specifiers(mut self, specifiers: &[&'static str]) -> Self {
        self.specifiers = specifiers.to_vec();
        self
    }

    pub fn param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn constant(mut self) -> Self {
        self.is_const = true;
        self
    }

    pub fn init(mut self, init: impl Into<String>) -> Self {
        self.init = Some(init.into());
        self
    }

    pub fn defaulted(mut self) -> Self {
        self.body = Body::Default;
        self
    }

    pub fn body(mut self, stmts: Vec<Stmt>) -> Self {
        self.body = Body::Block(stmts);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// A complete statement, terminator included.
    Line(String),
    /// `return expr;`, or `return;` when empty.
    Return(String),
    If {
        constexpr: bool,
        cond: String,
        then: Vec<Stmt>,
    },
}

impl Stmt {
    pub fn line(text: impl Into<String>) -> Self {
        Stmt::Line(text.into())
    }

    pub fn ret(expr: impl Into<String>) -> Self {
        Stmt::Return(expr.into())
    }

    pub fn if_(cond: impl Into<String>, then: Vec<Stmt>) -> Self {
        Stmt::If {
            constexpr: false,
            cond: cond.into(),
            then,
        }
    }

    pub fn if_constexpr(cond: impl Into<String>, then: Vec<Stmt>) -> Self {
        Stmt::If {
            constexpr: true,
            cond: cond.into(),
            then,
        }
    }
}

/// Interleave blank lines between items.
pub fn spaced(items: Vec<Item>) -> Vec<Item> {
    let mut out = Vec::with_capacity(items.len() * 2);
    for item in items {
        if !out.is_empty() {
            out.push(Item::Blank);
        }
        out.push(item);
    }
    out
}
