use swc_core::ecma::ast::*;

use crate::config::ConsoleFunction;

const CONSOLE: &str = "console";
const WINDOW: &str = "window";

/// Name of a non-computed member property: `obj.prop`.
fn ident_prop(member: &MemberExpr) -> Option<&str> {
    match &member.prop {
        MemberProp::Ident(ident) => Some(&*ident.sym),
        // obj['prop'], obj.#prop
        _ => None,
    }
}

fn is_ident(expr: &Expr, name: &str) -> bool {
    matches!(expr, Expr::Ident(ident) if &*ident.sym == name)
}

/// Whether `call` is `console.<fn>(...)` or `window.console.<fn>(...)` with
/// `<fn>` in `functions`.
///
/// The method name is checked first so that calls of any other shape are
/// rejected before the object is looked at.
pub fn is_console_call(call: &CallExpr, functions: &[ConsoleFunction]) -> bool {
    let Callee::Expr(callee) = &call.callee else {
        return false;
    };
    let Expr::Member(member) = &**callee else {
        return false;
    };

    let listed = ident_prop(member)
        .and_then(ConsoleFunction::from_name)
        .is_some_and(|function| functions.contains(&function));
    if !listed {
        return false;
    }

    // console.log(...)
    if is_ident(&member.obj, CONSOLE) {
        return true;
    }

    // window.console.log(...)
    match &*member.obj {
        Expr::Member(outer) => is_ident(&outer.obj, WINDOW) && ident_prop(outer) == Some(CONSOLE),
        _ => false,
    }
}

/// Whether `stmt` is an expression statement consisting of a console call.
///
/// Parentheses around the whole call are ignored: `(console.log(1));` is an
/// expression statement of the call itself.
pub fn is_console_statement(stmt: &Stmt, functions: &[ConsoleFunction]) -> bool {
    let Stmt::Expr(ExprStmt { expr, .. }) = stmt else {
        return false;
    };

    let mut expr = &**expr;
    while let Expr::Paren(ParenExpr { expr: inner, .. }) = expr {
        expr = inner;
    }

    match expr {
        Expr::Call(call) => is_console_call(call, functions),
        _ => false,
    }
}
