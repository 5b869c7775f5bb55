/// A filter invocation: a name plus zero or more argument expressions.
///
/// Arguments are restricted by the grammar to primaries (variables and
/// string literals); they are evaluated before the filter runs.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCall {
    pub name: String,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    StringLit(String),
    Var(String),
    /// Apply `filter` to the value produced by `left`: `left | filter a b`.
    Pipe {
        left: Box<Expr>,
        filter: FilterCall,
    },
    /// `condition ? true_expr : false_expr`. Exactly one branch is
    /// evaluated.
    Ternary {
        condition: Box<Expr>,
        true_expr: Box<Expr>,
        false_expr: Box<Expr>,
    },
    /// `left or right`: the first truthy operand wins.
    Or {
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    /// One `{{ ... }}` occurrence; the inner expression is always present.
    Template(Expr),
}

pub type Template = Vec<Node>;
