use pipestache::{
    render, tokenize, Context, Engine, EvalError, Expr, Node, ParseError, Parser, Token,
};

// ── Edge cases: leniency policy, error reporting, stream shapes ──

#[test]
fn empty_template_renders_empty() {
    let ctx = Context::new();
    assert_eq!(render("", &ctx).unwrap(), "");
}

#[test]
fn template_with_no_placeholders_is_pure_passthrough() {
    let ctx = Context::new();
    let source = "nothing { to } see }} here";
    assert_eq!(render(source, &ctx).unwrap(), source);
}

#[test]
fn unicode_text_and_values_pass_through() {
    let mut ctx = Context::new();
    ctx.set("greeting", "こんにちは");
    assert_eq!(render("🌍 {{ greeting }}!", &ctx).unwrap(), "🌍 こんにちは!");
}

#[test]
fn adjacent_placeholders_produce_no_text_node_between() {
    let mut parser = Parser::new(tokenize("{{a}}{{b}}"));
    let nodes = parser.parse().unwrap();
    assert_eq!(
        nodes,
        vec![
            Node::Template(Expr::Var("a".to_string())),
            Node::Template(Expr::Var("b".to_string())),
        ]
    );
}

#[test]
fn tokenizer_emits_no_empty_text_runs() {
    let tokens = tokenize("{{a}}{{b}}");
    assert_eq!(
        tokens,
        vec![
            Token::OpenTemplate,
            Token::Ident("a".to_string()),
            Token::CloseTemplate,
            Token::OpenTemplate,
            Token::Ident("b".to_string()),
            Token::CloseTemplate,
        ]
    );
}

#[test]
fn unknown_characters_inside_placeholders_are_skipped() {
    let mut ctx = Context::new();
    ctx.set("name", "Ada");
    // `@` and `#` are not part of the expression language; the tokenizer
    // drops them.
    assert_eq!(render("{{ @# name }}", &ctx).unwrap(), "Ada");
}

#[test]
fn string_escapes_keep_the_escaped_char_verbatim() {
    let ctx = Context::new();
    assert_eq!(render(r"{{ 'it\'s' }}", &ctx).unwrap(), "it's");
    assert_eq!(render(r#"{{ "say \"hi\"" }}"#, &ctx).unwrap(), "say \"hi\"");
    // No \n-style interpretation: backslash-n is just `n`.
    assert_eq!(render(r"{{ 'a\nb' }}", &ctx).unwrap(), "anb");
}

#[test]
fn unterminated_string_is_absorbed_by_the_tokenizer() {
    // The tokenizer never fails; the open quote swallows the rest of the
    // input and still yields a string token.
    let tokens = tokenize("{{ 'abc");
    assert_eq!(
        tokens,
        vec![Token::OpenTemplate, Token::StringLit("abc".to_string())]
    );
}

#[test]
fn unterminated_string_swallows_the_closer_and_fails_the_parse() {
    let mut engine = Engine::new();
    let err = engine.compile("{{ 'abc }}").unwrap_err();
    assert!(err.to_string().contains("CloseTemplate"), "{err}");
}

#[test]
fn unterminated_placeholder_is_a_parse_error() {
    let mut engine = Engine::new();
    let err = engine.compile("{{ name").unwrap_err();
    assert_eq!(
        err,
        ParseError::Expected {
            expected: "CloseTemplate".to_string(),
            found: "EOF".to_string(),
        }
    );
    assert!(err.to_string().contains("CloseTemplate"), "{err}");
}

#[test]
fn ternary_missing_colon_is_a_parse_error() {
    let mut engine = Engine::new();
    let err = engine.compile("{{ cond ? 'a' }}").unwrap_err();
    assert!(err.to_string().contains("Colon"), "{err}");
}

#[test]
fn number_literal_is_an_unexpected_token() {
    // Digits are not part of the expression language, so the placeholder
    // is left with nothing in primary position.
    let mut engine = Engine::new();
    let err = engine.compile("{{ 123 }}").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }), "{err:?}");
}

#[test]
fn empty_placeholder_is_an_unexpected_token() {
    let mut engine = Engine::new();
    let err = engine.compile("{{ }}").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }), "{err:?}");
}

#[test]
fn parse_failure_never_lands_in_the_cache() {
    let mut engine = Engine::new();
    assert!(engine.compile("{{ broken").is_err());
    // Still an error the second time, not a cached empty template.
    assert!(engine.compile("{{ broken").is_err());
}

#[test]
fn unknown_filter_fails_the_whole_render() {
    let mut ctx = Context::new();
    ctx.set("x", 1);
    let err = render("{{ x | nope }}", &ctx).unwrap_err();
    assert!(err.to_string().contains("nope"), "{err}");
}

#[test]
fn unknown_filter_error_carries_the_name() {
    let mut engine = Engine::new();
    let template = engine.compile("{{ x | missing_one }}").unwrap();
    let registry = pipestache::FilterRegistry::with_builtins();
    let evaluator = pipestache::Evaluator::new(&registry);
    let err = evaluator.render(&template, &Context::new()).unwrap_err();
    assert_eq!(err, EvalError::UnknownFilter("missing_one".to_string()));
}

#[test]
fn missing_variables_are_never_fatal() {
    let ctx = Context::new();
    assert_eq!(render("a{{ x }}b{{ y }}c", &ctx).unwrap(), "abc");
}

#[test]
fn missing_variable_through_a_filter_is_the_empty_string() {
    let ctx = Context::new();
    assert_eq!(render("{{ ghost | upper }}", &ctx).unwrap(), "");
}

#[test]
fn or_keyword_requires_word_boundaries() {
    // `order` is one identifier, not `or` + `der`.
    let mut ctx = Context::new();
    ctx.set("order", "asc");
    assert_eq!(render("{{ order }}", &ctx).unwrap(), "asc");
}

#[test]
fn text_around_placeholders_keeps_its_exact_bytes() {
    let mut ctx = Context::new();
    ctx.set("who", "world");
    assert_eq!(
        render("Hello, {{ who }}!\nBye, {{ who }}.", &ctx).unwrap(),
        "Hello, world!\nBye, world."
    );
}

#[test]
fn single_braces_are_ordinary_text() {
    let mut ctx = Context::new();
    ctx.set("x", "v");
    assert_eq!(render("a { b } c {{ x }}", &ctx).unwrap(), "a { b } c v");
}
