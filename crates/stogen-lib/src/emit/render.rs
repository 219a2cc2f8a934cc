//! Text backend for the emission IR.

use super::ir::{Access, Body, Enum, Function, Item, Keyword, Member, Namespace, Stmt, Struct, Template};
use super::writer::Writer;

pub fn render_items(items: &[Item], w: &mut Writer) {
    for item in items {
        render_item(item, w);
    }
}

fn render_item(item: &Item, w: &mut Writer) {
    match item {
        Item::Blank => w.blank(),
        Item::Directive(text) => w.flush_left(text),
        Item::Line(text) => w.line(text),
        Item::Rendered(text) => w.raw(text),
        Item::Namespace(ns) => render_namespace(ns, w),
        Item::Enum(e) => render_enum(e, w),
        Item::Struct(s) => render_struct(s, w),
        Item::Function(f) => render_function(f, w),
    }
}

fn render_namespace(ns: &Namespace, w: &mut Writer) {
    w.line(format!("namespace {} {{", ns.name));
    w.blank();
    render_items(&ns.items, w);
    w.blank();
    w.line(format!("}}  // namespace {}", ns.name));
}

fn render_enum(e: &Enum, w: &mut Writer) {
    w.line(format!("enum class {} : {} {{", e.name, e.underlying));
    {
        let mut w = w.indent();
        let last = e.enumerators.len().saturating_sub(1);
        for (i, (name, value)) in e.enumerators.iter().enumerate() {
            let sep = if i == last { "" } else { "," };
            w.line(format!("{name} = {value}{sep}"));
        }
    }
    w.line("};");
}

fn render_template(template: &Option<Template>, w: &mut Writer) {
    match template {
        Some(Template::Params(params)) => w.line(format!("template <{}>", params.join(", "))),
        Some(Template::Specialization) => w.line("template <>"),
        None => {}
    }
}

fn render_struct(s: &Struct, w: &mut Writer) {
    render_template(&s.template, w);

    let keyword = match s.keyword {
        Keyword::Struct => "struct",
        Keyword::Class => "class",
    };
    let head = match &s.base {
        Some(base) => format!("{keyword} {} : {base}", s.name),
        None => format!("{keyword} {}", s.name),
    };

    let Some(members) = &s.members else {
        w.line(format!("{head};"));
        return;
    };

    w.line(format!("{head} {{"));
    {
        let mut w = w.indent();
        for member in members {
            render_member(member, &mut w);
        }
    }
    w.line("};");
}

fn render_member(member: &Member, w: &mut Writer) {
    match member {
        Member::Access(Access::Public) => w.label("public:"),
        Member::Access(Access::Private) => w.label("private:"),
        Member::Line(text) => w.line(text),
        Member::Function(f) => render_function(f, w),
        Member::Blank => w.blank(),
    }
}

fn signature(f: &Function) -> String {
    let mut parts: Vec<&str> = f.specifiers.clone();
    if !f.ret.is_empty() {
        parts.push(&f.ret);
    }
    let mut sig = parts.join(" ");
    if !sig.is_empty() {
        sig.push(' ');
    }
    sig.push_str(&f.name);
    sig.push('(');
    sig.push_str(&f.params.join(", "));
    sig.push(')');
    if f.is_const {
        sig.push_str(" const");
    }
    if let Some(init) = &f.init {
        sig.push_str(" : ");
        sig.push_str(init);
    }
    sig
}

fn render_function(f: &Function, w: &mut Writer) {
    render_template(&f.template, w);
    let sig = signature(f);
    match &f.body {
        Body::Default => w.line(format!("{sig} = default;")),
        Body::Block(stmts) if stmts.is_empty() => w.line(format!("{sig} {{}}")),
        Body::Block(stmts) => {
            w.line(format!("{sig} {{"));
            render_stmts(stmts, &mut w.indent());
            w.line("}");
        }
    }
}

fn render_stmts(stmts: &[Stmt], w: &mut Writer) {
    for stmt in stmts {
        match stmt {
            Stmt::Line(text) => w.line(text),
            Stmt::Return(expr) if expr.is_empty() => w.line("return;"),
            Stmt::Return(expr) => w.line(format!("return {expr};")),
            Stmt::If {
                constexpr,
                cond,
                then,
            } => {
                let keyword = if *constexpr { "if constexpr" } else { "if" };
                w.line(format!("{keyword} ({cond}) {{"));
                render_stmts(then, &mut w.indent());
                w.line("}");
            }
        }
    }
}
