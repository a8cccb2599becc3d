//! Runtime support functions that generated code calls into.
//!
//! The compiler never emits bodies for these in the default linkage mode;
//! it only calls them and includes the runtime header. The C source kept
//! here is used when the runtime is inlined into the output
//! ([`crate::codegen_c::RuntimeLinkage::Inline`]) and must stay in sync
//! with `runtime/miru_print.c`.

use crate::ast::{Expr, ExprKind};

/// Kind of builtin, used by the emitter to pick a print variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinKind {
    PrintInt,
    PrintFloat,
    PrintString,
    PrintBool,
    PrintNewline,
}

/// Metadata about a single runtime entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinDescriptor {
    /// C symbol name.
    pub name: &'static str,

    /// C declaration of the single parameter, `None` for a nullary function.
    pub param: Option<&'static str>,

    /// C statements making up the function body.
    pub body: &'static str,

    pub kind: BuiltinKind,
}

impl BuiltinDescriptor {
    /// C prototype without the trailing `;`.
    pub fn prototype(&self) -> String {
        match self.param {
            Some(param) => format!("void {}({param})", self.name),
            None => format!("void {}(void)", self.name),
        }
    }

    /// Complete C definition, used for inline linkage.
    pub fn definition(&self) -> String {
        format!("{} {{\n    {}\n}}\n", self.prototype(), self.body)
    }
}

pub const BUILTINS: &[BuiltinDescriptor] = &[
    BuiltinDescriptor {
        name: "miru_print_int",
        param: Some("long value"),
        body: r#"printf("%ld\n", value);"#,
        kind: BuiltinKind::PrintInt,
    },
    BuiltinDescriptor {
        name: "miru_print_float",
        param: Some("double value"),
        body: r#"printf("%f\n", value);"#,
        kind: BuiltinKind::PrintFloat,
    },
    BuiltinDescriptor {
        name: "miru_print_string",
        param: Some("const char *value"),
        body: r#"if (value) { printf("%s\n", value); }"#,
        kind: BuiltinKind::PrintString,
    },
    BuiltinDescriptor {
        name: "miru_print_bool",
        param: Some("int value"),
        body: r#"printf("%s\n", value ? "true" : "false");"#,
        kind: BuiltinKind::PrintBool,
    },
    BuiltinDescriptor {
        name: "miru_print_newline",
        param: None,
        body: r#"printf("\n");"#,
        kind: BuiltinKind::PrintNewline,
    },
];

/// Name of the source-level function that lowers to the print builtins.
pub const PRINT: &str = "print";

pub fn builtin(kind: BuiltinKind) -> &'static BuiltinDescriptor {
    match kind {
        BuiltinKind::PrintInt => &BUILTINS[0],
        BuiltinKind::PrintFloat => &BUILTINS[1],
        BuiltinKind::PrintString => &BUILTINS[2],
        BuiltinKind::PrintBool => &BUILTINS[3],
        BuiltinKind::PrintNewline => &BUILTINS[4],
    }
}

/// Choose the print variant for an argument from its node kind alone.
///
/// Only literals are recognized. Identifiers, calls and operator
/// expressions fall back to the integer variant whatever they evaluate
/// to at run time.
pub fn print_variant(arg: Option<&Expr>) -> BuiltinKind {
    let Some(arg) = arg else {
        return BuiltinKind::PrintNewline;
    };
    match arg.kind {
        ExprKind::Float(_) => BuiltinKind::PrintFloat,
        ExprKind::Str(_) => BuiltinKind::PrintString,
        ExprKind::Bool(_) => BuiltinKind::PrintBool,
        ExprKind::Int(_)
        | ExprKind::Ident(_)
        | ExprKind::Binary { .. }
        | ExprKind::Unary { .. }
        | ExprKind::Call { .. } => BuiltinKind::PrintInt,
    }
}
