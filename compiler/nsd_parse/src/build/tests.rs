use super::*;
use nsd_lexer_core::tokenize;
use pretty_assertions::assert_eq;

fn build_with(text: &str, registry: &TypeRegistry) -> Result<Line, ParseError> {
    let tokens = tokenize(text);
    let lexemes = classify(&tokens, 0, tokens.token_count());
    let tree = parse_line(&lexemes).unwrap_or_else(|failure| panic!("`{text}` rejected: {failure:?}"));
    Builder::new(&tokens, registry, 0).line(&tree)
}

fn build(text: &str) -> Line {
    build_with(text, &TypeRegistry::new()).unwrap()
}

fn rendered(text: &str) -> String {
    build(text).to_string()
}

/// Every node of expression `index`, pre-order, with its token position.
fn layout(line: &Line, index: usize) -> Vec<(String, usize)> {
    let mut out = Vec::new();
    if let Some(expression) = line.expression(index) {
        expression.walk(&mut |node| out.push((node.to_string(), node.pos)));
    }
    out
}

fn at(text: &str, pos: usize) -> (String, usize) {
    (text.to_owned(), pos)
}

#[test]
fn assignment_keeps_operator_positions() {
    let line = build("a <- 7 * (15 - sin(1.3))");
    assert_eq!(line.kind, LineKind::Assignment);
    let (op, operands) = line.expression(0).unwrap().as_operator().unwrap();
    assert_eq!(op, Operator::Assign);
    let product = &operands[1];
    assert_eq!(product.pos, 3);
    let (op, factors) = product.as_operator().unwrap();
    assert_eq!(op, Operator::Mul);
    assert_eq!(factors[0].to_string(), "7");
    assert_eq!(factors[1].as_operator().map(|(op, _)| op), Some(Operator::Sub));
    assert_eq!(factors[1].pos, 6);
}

#[test]
fn expression_shapes() {
    assert_eq!(
        rendered("§COND§ a.b[2] > 0 and not done"),
        "CONDITION[a.b[2] > 0 && !done]"
    );
    assert_eq!(rendered("x <- a ? 1 : 0"), "ASSIGNMENT[x <- a ? 1 : 0]");
    assert_eq!(
        rendered("p <- Point{x: 1, y: 2}"),
        "ASSIGNMENT[p <- Point{x: 1, y: 2}]"
    );
    assert_eq!(rendered("i <- -(k div 2) mod 3"), "ASSIGNMENT[i <- -(k div 2) % 3]");
    assert_eq!(rendered("q <- s.length()"), "ASSIGNMENT[q <- s.length()]");
}

#[test]
fn loop_headers() {
    assert_eq!(
        rendered("§FOR§ k <- 23/4 §TO§ pow(2, 6) §STEP§ 2"),
        "FORLOOP[k <- 23 / 4; pow(2, 6); 2]"
    );

    let implicit = build("§FOR§ i <- 1 §TO§ 10");
    assert_eq!(implicit.expression_count(), 3);
    let step = implicit.expression(2).unwrap();
    assert_eq!((step.to_string(), step.pos), ("1".to_owned(), 6));

    let negative = build("§FOR§ i <- 10 §TO§ 1 §STEP§ -2");
    let step = negative.expression(2).unwrap();
    assert_eq!((step.to_string(), step.pos), ("-2".to_owned(), 6));

    assert_eq!(
        rendered("§FOREACH§ x §IN§ {1, 2, 3}"),
        "FOREACHLOOP[x; {1, 2, 3}]"
    );
}

#[test]
fn input_and_output() {
    let input = build("§INPUT§ a, b[3]");
    assert_eq!(input.to_string(), "INPUT[; a; b[3]]");
    assert_eq!(input.expression(0), None);
    assert_eq!(
        input.expression(2).and_then(Expression::as_operator).map(|(op, _)| op),
        Some(Operator::Index)
    );

    assert_eq!(rendered("§INPUT§ \"Name?\" name"), "INPUT[\"Name?\"; name]");
    assert_eq!(rendered("§INPUT§"), "INPUT[]");
    assert_eq!(rendered("§OUTPUT§ x, y + 1"), "OUTPUT[x; y + 1]");
    assert_eq!(rendered("§OUTPUT§"), "OUTPUT[]");
}

#[test]
fn declarations_carry_types() {
    assert_eq!(rendered("var z: int <- 15"), "VARINIT(int)[z <- 15]");
    assert_eq!(rendered("dim s as string"), "VARDECL(string)[s]");
    assert_eq!(
        rendered("int values[5] <- {1, 2}"),
        "VARINIT(@(int,0,5))[values[5] <- {1, 2}]"
    );
    assert_eq!(rendered("const PI <- 3.14"), "CONSTDEF(double)[PI <- 3.14]");
    assert_eq!(rendered("const N: long <- 3"), "CONSTDEF(long)[N <- 3]");
}

#[test]
fn type_definitions() {
    let record = build("type Point = record{x, y: int}");
    assert_eq!(record.kind, LineKind::TypeDef);
    assert_eq!(record.expression_count(), 2);
    assert_eq!(record.to_string(), "TYPEDEF($Point(x:int;y:int))[Point; x: int, y: int]");

    let color = build("type Color = enum{RED, GREEN = 5}");
    assert_eq!(
        color.data_type.as_ref().map(|t| t.describe(true)),
        Some("#Color(RED,GREEN=5)".to_owned())
    );

    assert_eq!(
        rendered("type Row = array[1..10] of int"),
        "TYPEDEF(@Row(int,1,10))[Row]"
    );

    let alias = build("type Alias = int");
    assert_eq!(
        alias.data_type.as_ref().map(|t| t.describe(true)),
        Some("=Alias(int)".to_owned())
    );
}

#[test]
fn jumps_calls_and_cases() {
    assert_eq!(rendered("§LEAVE§"), "LEAVE[]");
    assert_eq!(rendered("§LEAVE§ 2"), "LEAVE[2]");
    assert_eq!(rendered("§RETURN§ x + 1"), "RETURN[x + 1]");
    assert_eq!(rendered("§THROW§ \"boom\""), "THROW[\"boom\"]");
    assert_eq!(rendered("§CALL§ r <- compute(4)"), "ROUTINECALL[r <- compute(4)]");
    assert_eq!(rendered("§CALL§ obj.go()"), "ROUTINECALL[obj.go()]");
    assert_eq!(rendered("§CATCH§ e: string"), "CATCH(string)[e]");
    assert_eq!(rendered("§CATCH§ e"), "CATCH[e]");
    assert_eq!(rendered("§CASE§ choice"), "CASE[choice]");
    assert_eq!(rendered("§SELECT§ 1, 2"), "SELECTOR[1; 2]");
    assert_eq!(rendered("§DEFAULT§"), "DEFAULT[]");
}

#[test]
fn literals_cannot_be_indexed_or_selected() {
    let error = build_with("x <- 6[1]", &TypeRegistry::new()).unwrap_err();
    assert_eq!(error, ParseError::semantic("cannot index into `6`", 2));

    let error = build_with("x <- (1).y", &TypeRegistry::new()).unwrap_err();
    assert_eq!(error.position(), 3);
}

#[test]
fn unknown_types_are_semantic_errors() {
    let error = build_with("var q: Person", &TypeRegistry::new()).unwrap_err();
    assert!(matches!(error, ParseError::Semantic { position: 1, .. }));

    let mut registry = TypeRegistry::new();
    let person = build_with("type Person = record{name: string}", &registry)
        .unwrap()
        .data_type
        .unwrap();
    registry.put_type(person, false).unwrap();
    assert_eq!(
        build_with("var q: Person", &registry).unwrap().to_string(),
        "VARDECL($Person(name:string))[q]"
    );
}

#[test]
fn expression_lists_from_ranges() {
    let tokens = tokenize("x, f(y), {1}");
    let values = expressions_in(&tokens, 0, tokens.token_count(), &TypeRegistry::new()).unwrap();
    let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["x", "f(y)", "{1}"]);
    let positions: Vec<usize> = values.iter().map(|v| v.pos).collect();
    assert_eq!(positions, vec![0, 2, 7]);

    let error = expressions_in(&tokens, 0, 2, &TypeRegistry::new()).unwrap_err();
    assert!(matches!(error, ParseError::Syntax { position: 2, .. }));
}

#[test]
fn field_access_sits_on_the_dot() {
    let line = build("x <- a.b");
    assert_eq!(
        layout(&line, 0),
        vec![at("x <- a.b", 1), at("x", 0), at("a.b", 3), at("a", 2), at("b", 4)]
    );

    let line = build("x <- f(a)[1].y");
    assert_eq!(
        layout(&line, 0)[2..],
        [
            at("f(a)[1].y", 9),
            at("f(a)[1]", 6),
            at("f(a)", 2),
            at("a", 4),
            at("1", 7),
            at("y", 10),
        ]
    );
}

#[test]
fn index_sits_on_the_open_bracket() {
    let line = build("x <- a[1]");
    assert_eq!(layout(&line, 0)[2..], [at("a[1]", 3), at("a", 2), at("1", 4)]);

    let line = build("x <- m[i, j + 1]");
    assert_eq!(
        layout(&line, 0)[2..],
        [
            at("m[i, j + 1]", 3),
            at("m", 2),
            at("i", 4),
            at("j + 1", 7),
            at("j", 6),
            at("1", 8),
        ]
    );
}

#[test]
fn calls_sit_on_their_first_token() {
    let line = build("q <- s.length()");
    assert_eq!(layout(&line, 0)[2..], [at("s.length()", 2), at("s", 2)]);

    let line = build("q <- (s).trim(1)");
    assert_eq!(layout(&line, 0)[2..], [at("s.trim(1)", 2), at("s", 3), at("1", 8)]);

    let line = build("q <- max(a, 2)");
    assert_eq!(layout(&line, 0)[2..], [at("max(a, 2)", 2), at("a", 4), at("2", 6)]);
}

#[test]
fn ternary_sits_on_the_question_mark() {
    let line = build("x <- a ? 1 : 0");
    assert_eq!(
        layout(&line, 0)[2..],
        [at("a ? 1 : 0", 3), at("a", 2), at("1", 4), at("0", 6)]
    );
}

#[test]
fn prefix_and_postfix_operators() {
    let line = build("x <- -a");
    assert_eq!(layout(&line, 0)[2..], [at("-a", 2), at("a", 3)]);

    let line = build("§COND§ !done");
    assert_eq!(layout(&line, 0), vec![at("!done", 1), at("done", 2)]);

    let line = build("x <- ++i");
    assert_eq!(layout(&line, 0)[2..], [at("++i", 2), at("i", 3)]);

    let line = build("x <- i++");
    assert_eq!(layout(&line, 0)[2..], [at("i++", 2), at("i", 2)]);

    let line = build("x <- a.n--");
    assert_eq!(layout(&line, 0)[2..], [at("a.n--", 2), at("a.n", 3), at("a", 2), at("n", 4)]);
}

#[test]
fn initializers_sit_on_their_opening_token() {
    let line = build("p <- Point{x: 1, y: 2}");
    assert_eq!(
        layout(&line, 0)[2..],
        [
            at("Point{x: 1, y: 2}", 2),
            at("x: 1", 4),
            at("1", 6),
            at("y: 2", 8),
            at("2", 10),
        ]
    );

    let line = build("v <- {1, 2}");
    assert_eq!(layout(&line, 0)[2..], [at("{1, 2}", 2), at("1", 3), at("2", 5)]);

    let line = build("v <- {}");
    assert_eq!(layout(&line, 0)[2..], [at("{}", 2)]);
}

#[test]
fn input_targets_keep_positions() {
    let line = build("§INPUT§ \"Name?\", a.b, c[2]");
    assert_eq!(layout(&line, 0), vec![at("\"Name?\"", 1)]);
    assert_eq!(layout(&line, 1), vec![at("a.b", 4), at("a", 3), at("b", 5)]);
    assert_eq!(layout(&line, 2), vec![at("c[2]", 8), at("c", 7), at("2", 9)]);

    let line = build("§INPUT§ a, b");
    assert_eq!(line.expression(0), None);
    assert_eq!(layout(&line, 1), vec![at("a", 1)]);
    assert_eq!(layout(&line, 2), vec![at("b", 3)]);
}

#[test]
fn catch_variable_positions() {
    assert_eq!(layout(&build("§CATCH§ e"), 0), vec![at("e", 1)]);
    assert_eq!(layout(&build("§CATCH§ e: string"), 0), vec![at("e", 1)]);
    assert_eq!(layout(&build("§CATCH§ err as string"), 0), vec![at("err", 1)]);
    assert_eq!(layout(&build("§CATCH§ string e"), 0), vec![at("e", 2)]);
}

#[test]
fn loop_header_positions() {
    let line = build("§FOR§ k <- 2 §TO§ n §STEP§ 3");
    assert_eq!(layout(&line, 0), vec![at("k <- 2", 2), at("k", 1), at("2", 3)]);
    assert_eq!(layout(&line, 1), vec![at("n", 5)]);
    assert_eq!(layout(&line, 2), vec![at("3", 7)]);

    let line = build("§FOREACH§ item §IN§ list");
    assert_eq!(layout(&line, 0), vec![at("item", 1)]);
    assert_eq!(layout(&line, 1), vec![at("list", 3)]);
}

#[test]
fn type_definition_names_keep_positions() {
    assert_eq!(layout(&build("type Point = record{x, y: int}"), 0), vec![at("Point", 1)]);
    assert_eq!(layout(&build("type Color = enum{RED}"), 0), vec![at("Color", 1)]);
    assert_eq!(layout(&build("type Row = array[1..10] of int"), 0), vec![at("Row", 1)]);
    assert_eq!(layout(&build("type Alias = int"), 0), vec![at("Alias", 1)]);
}

#[test]
fn misaligned_tree_is_a_semantic_error() {
    let tokens = tokenize("x <- 1");
    let tree = parse_line(&classify(&tokens, 0, tokens.token_count())).unwrap();
    let error = Builder::new(&tokens, &TypeRegistry::new(), 1).line(&tree).unwrap_err();
    assert_eq!(
        error,
        ParseError::semantic("token position drifted: expected 1, found 0", 0)
    );
}
