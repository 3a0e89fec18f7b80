// tests/node_tests.rs

use mathexpr::ast::{Function, Node, Operator, OperatorFn, Symbol};
use mathexpr::parse;

fn render(input: &str) -> String {
    parse(input).unwrap().to_string()
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_render_binary_spacing() {
    assert_eq!(render("a+b*c"), "a + b * c");
    assert_eq!(render("a   |b&c"), "a | b & c");
    assert_eq!(render("x>=1==y<2"), "x >= 1 == y < 2");
}

#[test]
fn test_render_unary_and_postfix() {
    assert_eq!(render("- a"), "-a");
    assert_eq!(render("n !"), "n!");
    assert_eq!(render("-(n)!"), "-(n)!");
}

#[test]
fn test_render_implicit_multiplication() {
    assert_eq!(render("2x"), "2 * x");
    assert_eq!(render("(a)(b)"), "(a) * (b)");
}

#[test]
fn test_render_function_call() {
    assert_eq!(render("max( a,b ,c )"), "max(a, b, c)");
    assert_eq!(render("now()"), "now()");
}

#[test]
fn test_render_strings_double_quoted() {
    assert_eq!(render("'hi'"), "\"hi\"");
    assert_eq!(render("\"hi\""), "\"hi\"");
}

#[test]
fn test_render_numbers() {
    assert_eq!(render("2.0"), "2");
    assert_eq!(render("2.50"), "2.5");
    assert_eq!(render("1234."), "1234");
    assert_eq!(render("0b101"), "5");
    assert_eq!(render("1e21"), "1e+21");
    assert_eq!(render("1.5e-7"), "1.5e-07");
    assert_eq!(render("1000000"), "1e+06");
    assert_eq!(render("999999"), "999999");
    assert_eq!(render("0.0001"), "0.0001");
}

#[test]
fn test_render_literals() {
    assert_eq!(render("true"), "true");
    assert_eq!(render("false"), "false");
    assert_eq!(render("null"), "null");
    assert_eq!(Node::int(-7).to_string(), "-7");
}

#[test]
fn test_render_block() {
    assert_eq!(render("a\nb+1\n"), "a\nb + 1");
    assert_eq!(Node::block(vec![]).to_string(), "");
}

#[test]
fn test_render_is_idempotent() {
    let cases = [
        "2 a ^ 3",
        "-2 a",
        "2 a!",
        "f(x)(y)",
        "(1 + 2) (3) - -4!",
        "a|b&c==d<e+f*g^h",
        "'x' == \"y\"",
        "\nmax(1,\n2)\n\nz",
    ];

    for input in cases {
        let once = render(input);
        let twice = render(&once);
        assert_eq!(once, twice, "Failed for input: {:?}", input);
    }
}

#[test]
fn test_render_exponent_form_reads_back() {
    for input in ["1e21", "1.5e-7", "1234567", "0.00001"] {
        let tree = parse(input).unwrap();
        assert_eq!(parse(&tree.to_string()).unwrap(), tree, "Failed for input: {:?}", input);
    }
}

#[test]
fn test_render_implicit_product_regroups() {
    // Implicit multiplication binds tighter than the `*` it renders as
    let cases = [
        ("2 x ^ 2", "2 * x ^ 2"),
        ("2 x!", "2 * x!"),
    ];

    for (input, rendered) in cases {
        let tree = parse(input).unwrap();
        assert_eq!(tree.to_string(), rendered);

        let reparsed = parse(rendered).unwrap();
        assert_ne!(reparsed, tree, "Failed for input: {:?}", input);
        assert_eq!(reparsed.to_string(), rendered);
    }
}

#[test]
fn test_render_quote_inside_constant() {
    let tree = parse("'a\"b'").unwrap();
    assert_eq!(tree, Node::constant("a\"b"));
    assert_eq!(tree.to_string(), "\"a\"b\"");
    assert_eq!(
        parse(&tree.to_string()).unwrap_err().kind(),
        mathexpr::ErrorKind::UnterminatedString
    );
}

// ============================================================================
// Equality
// ============================================================================

#[test]
fn test_independent_parses_are_equal() {
    let a = parse("f(x, 2) + 1").unwrap();
    let b = parse("f( x,2 )+1").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_equality_distinguishes_variants() {
    assert_ne!(Node::float(1.0), Node::int(1));
    assert_ne!(Node::symbol("null"), Node::Null);
    assert_ne!(Node::constant("a"), Node::symbol("a"));
    assert_ne!(Node::Boolean(true), Node::Boolean(false));
}

#[test]
fn test_equality_compares_operator_fields() {
    let spelled = Node::Operator(Operator::new(OperatorFn::Multiply, "×", vec![Node::float(2.0), Node::symbol("x")]).unwrap());
    assert_ne!(spelled, parse("2 * x").unwrap());
    assert_eq!(parse("2 x").unwrap(), parse("2 * x").unwrap());
}

#[test]
fn test_equality_is_deep() {
    assert_ne!(parse("f(a, b)").unwrap(), parse("f(a, c)").unwrap());
    assert_ne!(parse("f(a)").unwrap(), parse("g(a)").unwrap());
    assert_ne!(parse("(a)").unwrap(), parse("a").unwrap());
    assert_ne!(parse("a\nb").unwrap(), parse("a\nb\nc").unwrap());
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_function_builder() {
    let call = Function::builder().name("max").build();
    assert_eq!(call.callee, Symbol::new("max"));
    assert!(call.args.is_empty());

    let empty = Function::builder().build();
    assert_eq!(empty.name(), "");

    let nested = Function::builder()
        .name("min")
        .arg(Function::builder().name("inner").build().into())
        .arg(Node::float(1.0))
        .build();
    assert_eq!(nested.to_string(), "min(inner(), 1)");
    assert_eq!(Node::from(nested), parse("min(inner(), 1)").unwrap());
}

#[test]
fn test_operator_arity_is_checked() {
    assert!(Operator::new(OperatorFn::Add, "+", vec![Node::Null]).is_none());
    assert!(Operator::new(OperatorFn::UnaryMinus, "-", vec![Node::Null, Node::Null]).is_none());
    assert!(Operator::new(OperatorFn::Factorial, "!", vec![Node::Null]).is_some());
}

#[test]
fn test_operator_constructors_use_canonical_spelling() {
    let op = Operator::binary(OperatorFn::LargerEq, Node::symbol("a"), Node::symbol("b"));
    assert_eq!(op.op, ">=");
    assert!(!op.is_unary());

    let op = Operator::unary(OperatorFn::Factorial, Node::symbol("n"));
    assert_eq!(op.to_string(), "n!");
    assert!(op.is_unary());
}

#[test]
#[should_panic(expected = "factorial is not a binary operator")]
fn test_binary_constructor_rejects_unary_tag() {
    Operator::binary(OperatorFn::Factorial, Node::symbol("a"), Node::symbol("b"));
}

#[test]
#[should_panic(expected = "add is not a unary operator")]
fn test_unary_constructor_rejects_binary_tag() {
    Node::unary(OperatorFn::Add, Node::symbol("a"));
}

#[test]
fn test_children() {
    let tree = parse("f(a, b)").unwrap();
    assert_eq!(tree.children(), &[Node::symbol("a"), Node::symbol("b")]);
    assert!(Node::float(1.0).is_leaf());
    assert!(!parse("(x)").unwrap().is_leaf());
}

// ============================================================================
// Float Narrowing
// ============================================================================

#[test]
fn test_is_int() {
    assert!(Node::float(3.0).is_int());
    assert!(Node::float(-0.0).is_int());
    assert!(!Node::float(3.5).is_int());
    assert!(!Node::float(f64::NAN).is_int());
    assert!(!Node::float(f64::INFINITY).is_int());
    assert!(!Node::float(1e19).is_int());
    assert!(Node::int(4).is_int());
    assert!(!Node::symbol("x").is_int());
}

#[test]
fn test_as_int() {
    assert_eq!(Node::float(42.0).as_int(), Some(42));
    assert_eq!(Node::float(-9.0).as_int(), Some(-9));
    assert_eq!(Node::float(0.5).as_int(), None);
    assert_eq!(Node::constant("1").as_int(), None);
}

#[test]
fn test_to_int_node() {
    assert_eq!(Node::float(7.0).to_int_node(), Some(Node::int(7)));
    assert_eq!(Node::float(7.25).to_int_node(), None);
    assert_eq!(Node::int(3).to_int_node(), Some(Node::int(3)));
    assert_eq!(Node::Null.to_int_node(), None);
}

// ============================================================================
// Operator Tags
// ============================================================================

#[test]
fn test_operator_tag_names() {
    let names: Vec<&str> = OperatorFn::ALL.iter().map(|op| op.name()).collect();
    assert_eq!(
        names,
        vec![
            "bitOr",
            "bitAnd",
            "add",
            "subtract",
            "multiply",
            "divide",
            "unequal",
            "equal",
            "larger",
            "largerEq",
            "smaller",
            "smallerEq",
            "factorial",
            "unaryMinus",
            "mod",
            "pow",
        ]
    );
}

#[test]
fn test_operator_tag_lookup() {
    assert_eq!("pow".parse::<OperatorFn>(), Ok(OperatorFn::Pow));
    assert_eq!(
        "power".parse::<OperatorFn>().unwrap_err().to_string(),
        "unknown operator function: power"
    );
}
