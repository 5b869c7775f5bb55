//! pipestache: tiny expression-templating engine for `{{ ... }}` strings.
//!
//! This crate does one job well: substitute `{{ ... }}` placeholders in a
//! text template against a key/value context, with a small, auditable
//! expression language inside the braces.
//!
//! Supported inside a placeholder:
//! - Variables: `{{ name }}`.
//! - String literals: `{{ 'hello' }}` or `{{ "hello" }}`, `\`-escaped.
//! - Filter pipelines: `{{ name | lower | capitalize }}`, filters may take
//!   arguments: `{{ name | includes 'Jo' }}`.
//! - Ternary conditionals: `{{ admin ? 'yes' : 'no' }}`.
//! - Or-fallbacks: `{{ nickname or name or 'anonymous' }}`.
//!
//! Not supported (by design, very small):
//! - Loops, blocks, partials, or template inheritance.
//! - Arithmetic or comparison operators.
//! - Numeric literals; values enter through the context.
//!
//! Leniency policy: this is a text-rendering engine, so malformed markup
//! degrades instead of crashing where possible. Missing variables render
//! empty, unknown characters inside placeholders are skipped, unterminated
//! string literals absorb to end of input. Only a genuinely unparseable
//! template ([`ParseError`]) or a pipe through an unregistered filter
//! ([`EvalError`]) fails the call.
//!
//! ```
//! use pipestache::{Context, Engine};
//!
//! let mut engine = Engine::new();
//! let mut ctx = Context::new();
//! ctx.set("name", "world");
//!
//! let out = engine.render("Hello, {{ name | capitalize }}!", &ctx).unwrap();
//! assert_eq!(out, "Hello, World!");
//! ```

pub mod ast;
pub mod error;
pub mod eval;
pub mod filters;
pub mod lexer;
pub mod parser;

use std::collections::HashMap;
use std::sync::Arc;

pub use ast::{Expr, FilterCall, Node, Template};
pub use error::{Error, EvalError, ParseError};
pub use eval::{Context, Evaluator, Value};
pub use filters::{FilterFn, FilterRegistry};
pub use lexer::{tokenize, Token, Tokenizer};
pub use parser::Parser;

/// Compile-cache-evaluate facade and the only externally visible entry
/// point.
///
/// Each engine owns its filter registry and its compiled-template cache;
/// neither is global. The cache key is the exact source text, so two
/// sources that happen to parse to the same AST are cached independently.
pub struct Engine {
    filters: FilterRegistry,
    cache: HashMap<String, Arc<Template>>,
}

impl Engine {
    /// An engine seeded with the built-in filters (`lower`, `upper`,
    /// `capitalize`, `includes`).
    pub fn new() -> Self {
        Self {
            filters: FilterRegistry::with_builtins(),
            cache: HashMap::new(),
        }
    }

    /// Parse `source` into its AST, or return the cached AST if this exact
    /// string was compiled before. Cache hits hand back the same
    /// allocation.
    pub fn compile(&mut self, source: &str) -> Result<Arc<Template>, ParseError> {
        if let Some(cached) = self.cache.get(source) {
            return Ok(Arc::clone(cached));
        }

        let template = Arc::new(parser::parse(source)?);
        self.cache.insert(source.to_string(), Arc::clone(&template));
        Ok(template)
    }

    /// Compile `source` and evaluate it against `context`.
    pub fn render(&mut self, source: &str, context: &Context) -> Result<String, Error> {
        let template = self.compile(source)?;
        let output = Evaluator::new(&self.filters).render(&template, context)?;
        Ok(output)
    }

    /// Register a filter, overwriting any existing one under `name`.
    pub fn add_filter(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(&Value, &[Value]) -> Value + Send + Sync + 'static,
    ) {
        self.filters.register(name, f);
    }

    /// Registered filter names in registration order, built-ins first.
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.names().collect()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot render with a throwaway engine and the built-in filters.
pub fn render(source: &str, context: &Context) -> Result<String, Error> {
    Engine::new().render(source, context)
}
