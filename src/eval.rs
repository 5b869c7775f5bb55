use std::collections::HashMap;
use std::fmt;

use crate::ast::{Expr, Node};
use crate::error::EvalError;
use crate::filters::FilterRegistry;

/// A dynamically-typed template value.
///
/// Context entries, filter inputs, and filter outputs are all `Value`s;
/// the string form is only forced at the `{{ }}` boundary, so chained
/// filters see each other's native types.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Str(String),
    Num(f64),
    Bool(bool),
    Null,
}

impl Value {
    /// Truthiness for `?:` and `or`: empty strings, zero, `false`, and
    /// absent values are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Str(s) => !s.is_empty(),
            Value::Num(n) => *n != 0.0 && !n.is_nan(),
            Value::Bool(b) => *b,
            Value::Null => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            // Integral numbers print without a trailing ".0".
            Value::Num(n) if n.fract() == 0.0 && n.is_finite() => {
                write!(f, "{}", *n as i64)
            }
            Value::Num(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Num(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Num(n as f64)
    }
}

/// Variable bindings for one render. Read-only during evaluation; a
/// missing name is not an error, it evaluates to [`Value::Null`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Context {
    vars: HashMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ctx = Context::new();
        for (k, v) in iter {
            ctx.set(k, v);
        }
        ctx
    }
}

/// Walks a parsed template against a context, looking filters up in the
/// registry it borrows.
pub struct Evaluator<'e> {
    filters: &'e FilterRegistry,
}

impl<'e> Evaluator<'e> {
    pub fn new(filters: &'e FilterRegistry) -> Self {
        Self { filters }
    }

    /// Render a node sequence, joining each node's output in template
    /// order.
    pub fn render(&self, template: &[Node], context: &Context) -> Result<String, EvalError> {
        let mut output = String::new();
        for node in template {
            match node {
                Node::Text(s) => output.push_str(s),
                Node::Template(expr) => {
                    let value = self.eval_expr(expr, context)?;
                    // Stringification happens only here, at the template
                    // boundary.
                    output.push_str(&value.to_string());
                }
            }
        }
        Ok(output)
    }

    pub fn eval_expr(&self, expr: &Expr, context: &Context) -> Result<Value, EvalError> {
        match expr {
            Expr::StringLit(s) => Ok(Value::Str(s.clone())),
            Expr::Var(name) => Ok(context.get(name).cloned().unwrap_or(Value::Null)),
            Expr::Pipe { left, filter } => {
                let input = self.eval_expr(left, context)?;
                let mut args = Vec::with_capacity(filter.args.len());
                for arg in &filter.args {
                    args.push(self.eval_expr(arg, context)?);
                }
                let f = self
                    .filters
                    .get(&filter.name)
                    .ok_or_else(|| EvalError::UnknownFilter(filter.name.clone()))?;
                Ok(f(&input, &args))
            }
            Expr::Ternary {
                condition,
                true_expr,
                false_expr,
            } => {
                // Short-circuit: the untaken branch is never evaluated.
                if self.eval_expr(condition, context)?.is_truthy() {
                    self.eval_expr(true_expr, context)
                } else {
                    self.eval_expr(false_expr, context)
                }
            }
            Expr::Or { left, right } => {
                let lhs = self.eval_expr(left, context)?;
                if lhs.is_truthy() {
                    Ok(lhs)
                } else {
                    self.eval_expr(right, context)
                }
            }
        }
    }
}
