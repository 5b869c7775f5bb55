use indexmap::IndexMap;

use crate::eval::Value;

/// A named value transform: `(input, args) -> output`.
///
/// Filters receive the already-evaluated argument values in source order.
/// They are infallible; type mismatches degrade by operating on the
/// stringified input instead of erroring.
pub type FilterFn = Box<dyn Fn(&Value, &[Value]) -> Value + Send + Sync>;

/// Name → transform mapping owned by one engine instance.
///
/// Insertion order is preserved so [`names`](FilterRegistry::names) reports
/// filters in registration order, built-ins first. Re-registering a name
/// overwrites the previous transform without complaint.
#[derive(Default)]
pub struct FilterRegistry {
    filters: IndexMap<String, FilterFn>,
}

impl FilterRegistry {
    /// An empty registry, no built-ins.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with the default string filters.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("lower", |v, _| Value::Str(v.to_string().to_lowercase()));
        registry.register("upper", |v, _| Value::Str(v.to_string().to_uppercase()));
        registry.register("capitalize", |v, _| Value::Str(capitalize(&v.to_string())));
        registry.register("includes", |v, args| {
            let needle = args.first().map(Value::to_string).unwrap_or_default();
            Value::Bool(v.to_string().contains(&needle))
        });
        registry
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(&Value, &[Value]) -> Value + Send + Sync + 'static,
    ) {
        self.filters.insert(name.into(), Box::new(f));
    }

    pub fn get(&self, name: &str) -> Option<&FilterFn> {
        self.filters.get(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }
}

/// Uppercase the first character, leave the rest untouched.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
