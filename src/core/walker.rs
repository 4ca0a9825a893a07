//! Generic depth-first traversal over a swc syntax tree.
//!
//! The walker knows nothing about translatable calls. It exposes a closed set
//! of node kinds ([`Node`]) and calls [`Hooks::enter`] before a node's
//! children and [`Hooks::leave`] after them. Child slots per kind come from
//! swc's generated `Visit` rules, so they are fixed at compile time.
//!
//! Siblings are visited in source order. A hook can prune a subtree by calling
//! [`WalkControl::skip`] from `enter`; a skipped node gets no `leave` call.
//!
//! Each node comes with an [`Edge`]: the kind of its nearest reported
//! ancestor, the [`Slot`] (property) of that ancestor it sits in, and its index
//! when the slot is a list. Unreported nodes between the two are transparent,
//! so the argument of `f(x)` is in the `Arguments` slot of the call whatever
//! wrappers swc puts around it. An enum node and the struct it wraps (a
//! `Expr::JSXElement` and its `JSXElement`) are reported one after the other.
//!
//! ```ignore
//! struct CountCalls(usize);
//!
//! impl Hooks for CountCalls {
//!     fn enter(&mut self, node: Node<'_>, _edge: Edge, _walk: &mut WalkControl) {
//!         if let Node::Expr(Expr::Call(_)) = node {
//!             self.0 += 1;
//!         }
//!     }
//! }
//!
//! let mut counter = CountCalls(0);
//! walk(Node::Module(&module), &mut counter);
//! ```

use swc_ecma_ast::{
    AssignExpr, BinExpr, Callee, Class, CondExpr, Decl, Expr, ExprOrSpread, ExprStmt, Function,
    JSXAttr, JSXElement, KeyValueProp, MemberExpr, Module, ModuleDecl, ModuleItem, NewExpr, Pat,
    Prop, ReturnStmt, Stmt, TsType, VarDeclarator,
};
use swc_ecma_visit::{Visit, VisitWith};

/// A node the walker reports to its hooks.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Module(&'a Module),
    ModuleDecl(&'a ModuleDecl),
    Stmt(&'a Stmt),
    Decl(&'a Decl),
    Expr(&'a Expr),
    Pat(&'a Pat),
    Prop(&'a Prop),
    Function(&'a Function),
    Class(&'a Class),
    JsxElement(&'a JSXElement),
    JsxAttr(&'a JSXAttr),
    TsType(&'a TsType),
}

/// Discriminator of a [`Node`], used to describe a node's parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Module,
    ModuleDecl,
    Stmt,
    Decl,
    Expr,
    Pat,
    Prop,
    Function,
    Class,
    JsxElement,
    JsxAttr,
    TsType,
}

/// Property of the parent node a child is found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Module items and block statements.
    Body,
    /// Expression of an expression statement.
    Expression,
    Callee,
    Arguments,
    Object,
    Property,
    Left,
    Right,
    Test,
    Consequent,
    Alternate,
    /// Binding of a variable declarator.
    Id,
    /// Initializer of a variable declarator.
    Init,
    Key,
    Value,
    /// Operand of `return`.
    Argument,
    /// Any property without a dedicated name.
    Other,
}

impl Node<'_> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Module(_) => NodeKind::Module,
            Node::ModuleDecl(_) => NodeKind::ModuleDecl,
            Node::Stmt(_) => NodeKind::Stmt,
            Node::Decl(_) => NodeKind::Decl,
            Node::Expr(_) => NodeKind::Expr,
            Node::Pat(_) => NodeKind::Pat,
            Node::Prop(_) => NodeKind::Prop,
            Node::Function(_) => NodeKind::Function,
            Node::Class(_) => NodeKind::Class,
            Node::JsxElement(_) => NodeKind::JsxElement,
            Node::JsxAttr(_) => NodeKind::JsxAttr,
            Node::TsType(_) => NodeKind::TsType,
        }
    }

    fn visit_children<V: Visit>(self, visitor: &mut V) {
        match self {
            Node::Module(n) => n.visit_children_with(visitor),
            Node::ModuleDecl(n) => n.visit_children_with(visitor),
            Node::Stmt(n) => n.visit_children_with(visitor),
            Node::Decl(n) => n.visit_children_with(visitor),
            Node::Expr(n) => n.visit_children_with(visitor),
            Node::Pat(n) => n.visit_children_with(visitor),
            Node::Prop(n) => n.visit_children_with(visitor),
            Node::Function(n) => n.visit_children_with(visitor),
            Node::Class(n) => n.visit_children_with(visitor),
            Node::JsxElement(n) => n.visit_children_with(visitor),
            Node::JsxAttr(n) => n.visit_children_with(visitor),
            Node::TsType(n) => n.visit_children_with(visitor),
        }
    }
}

/// Where a node sits relative to its nearest reported ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Kind of the nearest reported ancestor, `None` for the root.
    pub parent: Option<NodeKind>,
    /// Property of that ancestor holding the node, `None` for the root.
    pub slot: Option<Slot>,
    /// Position in the parent's list when the node is a list element
    /// (module items, statements, call arguments, sequence expressions).
    pub index: Option<usize>,
    /// Number of reported ancestors.
    pub depth: usize,
}

/// Lets `enter` prune the current subtree.
#[derive(Debug, Default)]
pub struct WalkControl {
    skipped: bool,
}

impl WalkControl {
    /// Do not visit the children of the node being entered.
    pub fn skip(&mut self) {
        self.skipped = true;
    }
}

/// Traversal callbacks. Both default to doing nothing.
pub trait Hooks {
    fn enter(&mut self, _node: Node<'_>, _edge: Edge, _walk: &mut WalkControl) {}

    fn leave(&mut self, _node: Node<'_>, _edge: Edge) {}
}

/// Walk `root` and everything reachable from it. `None` visits nothing.
pub fn walk<'a, H: Hooks>(root: impl Into<Option<Node<'a>>>, hooks: &mut H) {
    if let Some(root) = root.into() {
        let mut walker = Walker {
            hooks,
            parents: Vec::new(),
            slot: Slot::Other,
        };
        walker.walk_node(root, None);
    }
}

struct Walker<'h, H> {
    hooks: &'h mut H,
    parents: Vec<NodeKind>,
    slot: Slot,
}

impl<H: Hooks> Walker<'_, H> {
    fn walk_node(&mut self, node: Node<'_>, index: Option<usize>) {
        let parent = self.parents.last().copied();
        let edge = Edge {
            parent,
            slot: parent.map(|_| self.slot),
            index,
            depth: self.parents.len(),
        };

        let mut control = WalkControl::default();
        self.hooks.enter(node, edge, &mut control);
        if control.skipped {
            return;
        }

        self.parents.push(node.kind());
        self.in_slot(Slot::Other, |walker| node.visit_children(walker));
        self.parents.pop();

        self.hooks.leave(node, edge);
    }

    /// Visit with `slot` as the current property, restoring the outer one after.
    fn in_slot(&mut self, slot: Slot, visit: impl FnOnce(&mut Self)) {
        let outer = std::mem::replace(&mut self.slot, slot);
        visit(self);
        self.slot = outer;
    }
}

impl<H: Hooks> Visit for Walker<'_, H> {
    fn visit_module(&mut self, node: &Module) {
        self.walk_node(Node::Module(node), None);
    }

    fn visit_module_items(&mut self, items: &[ModuleItem]) {
        self.in_slot(Slot::Body, |walker| {
            for (index, item) in items.iter().enumerate() {
                match item {
                    ModuleItem::ModuleDecl(decl) => {
                        walker.walk_node(Node::ModuleDecl(decl), Some(index))
                    }
                    ModuleItem::Stmt(stmt) => walker.walk_node(Node::Stmt(stmt), Some(index)),
                }
            }
        });
    }

    fn visit_module_decl(&mut self, node: &ModuleDecl) {
        self.walk_node(Node::ModuleDecl(node), None);
    }

    fn visit_stmts(&mut self, stmts: &[Stmt]) {
        self.in_slot(Slot::Body, |walker| {
            for (index, stmt) in stmts.iter().enumerate() {
                walker.walk_node(Node::Stmt(stmt), Some(index));
            }
        });
    }

    fn visit_stmt(&mut self, node: &Stmt) {
        self.walk_node(Node::Stmt(node), None);
    }

    fn visit_decl(&mut self, node: &Decl) {
        self.walk_node(Node::Decl(node), None);
    }

    fn visit_expr_or_spreads(&mut self, args: &[ExprOrSpread]) {
        self.in_slot(Slot::Arguments, |walker| {
            for (index, arg) in args.iter().enumerate() {
                walker.walk_node(Node::Expr(&arg.expr), Some(index));
            }
        });
    }

    fn visit_exprs(&mut self, exprs: &[Box<Expr>]) {
        for (index, expr) in exprs.iter().enumerate() {
            self.walk_node(Node::Expr(expr), Some(index));
        }
    }

    fn visit_expr(&mut self, node: &Expr) {
        self.walk_node(Node::Expr(node), None);
    }

    fn visit_pat(&mut self, node: &Pat) {
        self.walk_node(Node::Pat(node), None);
    }

    fn visit_prop(&mut self, node: &Prop) {
        self.walk_node(Node::Prop(node), None);
    }

    fn visit_function(&mut self, node: &Function) {
        self.walk_node(Node::Function(node), None);
    }

    fn visit_class(&mut self, node: &Class) {
        self.walk_node(Node::Class(node), None);
    }

    fn visit_jsx_element(&mut self, node: &JSXElement) {
        self.walk_node(Node::JsxElement(node), None);
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        self.walk_node(Node::JsxAttr(node), None);
    }

    fn visit_ts_type(&mut self, node: &TsType) {
        self.walk_node(Node::TsType(node), None);
    }

    // Named slots

    fn visit_expr_stmt(&mut self, node: &ExprStmt) {
        self.in_slot(Slot::Expression, |walker| node.expr.visit_with(walker));
    }

    fn visit_return_stmt(&mut self, node: &ReturnStmt) {
        self.in_slot(Slot::Argument, |walker| node.arg.visit_with(walker));
    }

    fn visit_callee(&mut self, node: &Callee) {
        self.in_slot(Slot::Callee, |walker| node.visit_children_with(walker));
    }

    fn visit_new_expr(&mut self, node: &NewExpr) {
        self.in_slot(Slot::Callee, |walker| node.callee.visit_with(walker));
        node.args.visit_with(self);
        node.type_args.visit_with(self);
    }

    fn visit_member_expr(&mut self, node: &MemberExpr) {
        self.in_slot(Slot::Object, |walker| node.obj.visit_with(walker));
        self.in_slot(Slot::Property, |walker| node.prop.visit_with(walker));
    }

    fn visit_bin_expr(&mut self, node: &BinExpr) {
        self.in_slot(Slot::Left, |walker| node.left.visit_with(walker));
        self.in_slot(Slot::Right, |walker| node.right.visit_with(walker));
    }

    fn visit_assign_expr(&mut self, node: &AssignExpr) {
        self.in_slot(Slot::Left, |walker| node.left.visit_with(walker));
        self.in_slot(Slot::Right, |walker| node.right.visit_with(walker));
    }

    fn visit_cond_expr(&mut self, node: &CondExpr) {
        self.in_slot(Slot::Test, |walker| node.test.visit_with(walker));
        self.in_slot(Slot::Consequent, |walker| node.cons.visit_with(walker));
        self.in_slot(Slot::Alternate, |walker| node.alt.visit_with(walker));
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        self.in_slot(Slot::Id, |walker| node.name.visit_with(walker));
        self.in_slot(Slot::Init, |walker| node.init.visit_with(walker));
    }

    fn visit_key_value_prop(&mut self, node: &KeyValueProp) {
        self.in_slot(Slot::Key, |walker| node.key.visit_with(walker));
        self.in_slot(Slot::Value, |walker| node.value.visit_with(walker));
    }
}
