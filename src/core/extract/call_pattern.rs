//! Recognition of translatable calls.
//!
//! A call is translatable when its callee resolves to one of the configured
//! function names and every argument position the call kind requires holds a
//! string literal or a `+` chain of string literals. Anything else is simply
//! not a match.
//!
//! ```text
//! gettext("Save")                       -> ""     / "Save"
//! i18n.ngettext("cat", "cats")          -> ""     / "cat" (plural "cats")
//! i18n.pgettext.call(i18n, "menu", "Open")  -> "menu" / "Open"
//! gettext("Hello, " + "world")          -> ""     / "Hello, world"
//! ```

use swc_ecma_ast::{BinaryOp, CallExpr, Callee, Expr, ExprOrSpread, Lit, MemberProp};

use crate::core::options::{CallKind, FnNames};

/// How the translation function is invoked, with its logical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape<'a> {
    /// `gettext(...)`
    Direct(&'a str),
    /// `obj.gettext(...)` or `obj["gettext"](...)`
    Member(&'a str),
    /// `gettext.call(thisArg, ...)` or `obj.gettext.call(thisArg, ...)`
    Forwarded(&'a str),
}

impl<'a> CallShape<'a> {
    pub fn classify(call: &'a CallExpr) -> Option<Self> {
        let Callee::Expr(callee) = &call.callee else {
            return None;
        };

        match unparen(callee) {
            Expr::Ident(ident) => Some(CallShape::Direct(ident.sym.as_str())),
            Expr::Member(member) => {
                let name = prop_name(&member.prop)?;
                if name != "call" {
                    return Some(CallShape::Member(name));
                }
                match unparen(&member.obj) {
                    Expr::Ident(ident) => Some(CallShape::Forwarded(ident.sym.as_str())),
                    Expr::Member(target) => prop_name(&target.prop).map(CallShape::Forwarded),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            CallShape::Direct(name) | CallShape::Member(name) | CallShape::Forwarded(name) => name,
        }
    }

    /// Index of the first argument passed to the translation function.
    /// Forwarded calls spend their first argument on `thisArg`.
    pub fn args_start(&self) -> usize {
        match self {
            CallShape::Forwarded(_) => 1,
            CallShape::Direct(_) | CallShape::Member(_) => 0,
        }
    }
}

/// A recognized translatable call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translatable {
    pub kind: CallKind,
    /// Empty when the call kind has no context.
    pub context: String,
    pub msgid: String,
    pub plural: Option<String>,
}

/// Match a call expression against the configured function names.
pub fn match_call(call: &CallExpr, fn_names: &FnNames) -> Option<Translatable> {
    let shape = CallShape::classify(call)?;
    let kind = fn_names.kind_of(shape.name())?;
    let args = call.args.get(shape.args_start()..)?;
    let arg = |index: usize| string_arg(args, index);

    let (context, msgid, plural) = match kind {
        CallKind::Plain => (String::new(), arg(0)?, None),
        CallKind::Plural => (String::new(), arg(0)?, Some(arg(1)?)),
        CallKind::Context => (arg(0)?, arg(1)?, None),
        CallKind::ContextPlural => (arg(0)?, arg(1)?, Some(arg(2)?)),
    };
    // An empty msgid is reserved for the catalog header.
    if msgid.is_empty() {
        return None;
    }

    Some(Translatable {
        kind,
        context,
        msgid,
        plural,
    })
}

/// Resolve a string literal or a `+` chain of string literals.
pub fn string_value(expr: &Expr) -> Option<String> {
    match unparen(expr) {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(str::to_string),
        Expr::Bin(bin) if bin.op == BinaryOp::Add => {
            let mut value = string_value(&bin.left)?;
            value.push_str(&string_value(&bin.right)?);
            Some(value)
        }
        _ => None,
    }
}

fn string_arg(args: &[ExprOrSpread], index: usize) -> Option<String> {
    let arg = args.get(index)?;
    if arg.spread.is_some() {
        return None;
    }
    string_value(&arg.expr)
}

fn prop_name(prop: &MemberProp) -> Option<&str> {
    match prop {
        MemberProp::Ident(ident) => Some(ident.sym.as_str()),
        MemberProp::Computed(computed) => match unparen(&computed.expr) {
            Expr::Lit(Lit::Str(s)) => s.value.as_str(),
            _ => None,
        },
        MemberProp::PrivateName(_) => None,
    }
}

fn unparen(mut expr: &Expr) -> &Expr {
    while let Expr::Paren(paren) = expr {
        expr = &paren.expr;
    }
    expr
}
