use super::*;
use nsd_lexer_core::tokenize;
use pretty_assertions::assert_eq;

fn normalize(text: &str, kind: ElementKind) -> TokenList {
    Normalizer::default().normalize(&tokenize(text), kind, 0, true)
}

fn toks(text: &str, kind: ElementKind) -> Vec<String> {
    normalize(text, kind).tokens().to_vec()
}

// ─── Instructions ──────────────────────────────────────────────

#[test]
fn input_and_output() {
    assert_eq!(
        toks("INPUT a, b[3]", ElementKind::Instruction),
        ["§INPUT§", "a", ",", "b", "[", "3", "]"]
    );
    assert_eq!(
        toks("output \"x = \", x", ElementKind::Instruction),
        ["§OUTPUT§", "\"x = \"", ",", "x"]
    );
    assert_eq!(toks("INPUT", ElementKind::Instruction), ["§INPUT§"]);
}

#[test]
fn bare_routine_call_gets_call_marker() {
    assert_eq!(
        toks("swap(a, b)", ElementKind::Instruction),
        ["§CALL§", "swap", "(", "a", ",", "b", ")"]
    );
    assert_eq!(
        toks("list.append(x)", ElementKind::Instruction)[0],
        "§CALL§"
    );
    assert_eq!(toks("x <- f(1)", ElementKind::Instruction)[0], "x");
    assert_eq!(toks("f(1) + g(2)", ElementKind::Instruction)[0], "f");
    assert_eq!(toks("f(g(1))", ElementKind::Instruction)[0], "§CALL§");
}

#[test]
fn operators_unified_in_instructions() {
    assert_eq!(
        toks("b := x = 1 and not y", ElementKind::Instruction),
        ["b", "<-", "x", "==", "1", "&&", "!", "y"]
    );
}

#[test]
fn type_definitions_not_unified() {
    assert_eq!(
        toks("type Color = enum{RED, GREEN = 3}", ElementKind::Instruction),
        ["type", "Color", "=", "enum", "{", "RED", ",", "GREEN", "=", "3", "}"]
    );
}

#[test]
fn without_unification_only_not_is_rewritten() {
    let out = Normalizer::default().normalize(
        &tokenize("not a and b = c"),
        ElementKind::Instruction,
        0,
        false,
    );
    assert_eq!(out.tokens(), ["!", "a", "and", "b", "=", "c"]);
}

// ─── Conditions and loops ──────────────────────────────────────

#[test]
fn conditions() {
    assert_eq!(
        toks("while x > 0", ElementKind::While),
        ["§COND§", "x", ">", "0"]
    );
    assert_eq!(toks("until done", ElementKind::Repeat), ["§COND§", "done"]);
    assert_eq!(
        toks("a < b", ElementKind::Alternative),
        ["§COND§", "a", "<", "b"]
    );
    assert_eq!(normalize("a < b", ElementKind::Alternative).to_string(), "§COND§ a < b");
}

#[test]
fn multi_token_phrases() {
    let mut keywords = KeywordConfig::default();
    keywords.set(KeywordKey::PreWhile, "as long as");
    keywords.set(KeywordKey::PostWhile, "do");
    let normalizer = Normalizer::new(keywords);
    let out = normalizer.normalize(&tokenize("As Long As n > 0 do"), ElementKind::While, 0, true);
    assert_eq!(out.tokens(), ["§COND§", "n", ">", "0"]);
}

#[test]
fn case_sensitive_keywords() {
    let mut keywords = KeywordConfig::default();
    keywords.set_ignore_case(false);
    let normalizer = Normalizer::new(keywords);
    let out = normalizer.normalize(&tokenize("While x"), ElementKind::While, 0, true);
    assert_eq!(out.tokens(), ["§COND§", "While", "x"]);
}

#[test]
fn counting_loop() {
    let out = normalize("for i <- 1 to 10 by 2", ElementKind::For);
    assert_eq!(
        out.tokens(),
        ["§FOR§", "i", "<-", "1", "§TO§", "10", "§STEP§", "2"]
    );
    assert_eq!(out.to_string(), "§FOR§ i <- 1 §TO§ 10 §STEP§ 2");
}

#[test]
fn counting_loop_without_step() {
    assert_eq!(
        toks("for k := 23/4 to pow(2, 6)", ElementKind::For),
        ["§FOR§", "k", "<-", "23", "/", "4", "§TO§", "pow", "(", "2", ",", "6", ")"]
    );
}

#[test]
fn collection_loop() {
    assert_eq!(
        toks("foreach x in {1, 2}", ElementKind::ForIn),
        ["§FOREACH§", "x", "§IN§", "{", "1", ",", "2", "}"]
    );
    let mut keywords = KeywordConfig::default();
    keywords.set(KeywordKey::PreForIn, "");
    let out = Normalizer::new(keywords).normalize(&tokenize("for x in list"), ElementKind::ForIn, 0, true);
    assert_eq!(out.tokens(), ["§FOREACH§", "x", "§IN§", "list"]);
}

// ─── Jumps, calls, case ────────────────────────────────────────

#[test]
fn jumps() {
    assert_eq!(toks("", ElementKind::Jump), ["§LEAVE§"]);
    assert_eq!(toks("leave 2", ElementKind::Jump), ["§LEAVE§", "2"]);
    assert_eq!(
        toks("return x + 1", ElementKind::Jump),
        ["§RETURN§", "x", "+", "1"]
    );
    assert_eq!(toks("exit 3", ElementKind::Jump), ["§EXIT§", "3"]);
    assert_eq!(
        toks("throw \"bad\"", ElementKind::Jump),
        ["§THROW§", "\"bad\""]
    );
}

#[test]
fn calls_and_catch() {
    assert_eq!(toks("r <- f(x)", ElementKind::Call), ["§CALL§", "r", "<-", "f", "(", "x", ")"]);
    assert_eq!(toks("e", ElementKind::Catch), ["§CATCH§", "e"]);
}

#[test]
fn case_lines() {
    let normalizer = Normalizer::default();
    let kind = ElementKind::Case { lines: 3 };
    let line = |text: &str, index| -> Vec<String> {
        normalizer
            .normalize(&tokenize(text), kind, index, true)
            .tokens()
            .to_vec()
    };
    assert_eq!(line("x", 0), ["§CASE§", "x"]);
    assert_eq!(line("1, 2", 1), ["§SELECT§", "1", ",", "2"]);
    assert_eq!(line("default", 2), ["§DEFAULT§"]);
}

// ─── Restoring ─────────────────────────────────────────────────

#[test]
fn restore_counting_loop() {
    let normalizer = Normalizer::default();
    let normalized = normalizer.normalize(&tokenize("for i <- 1 to 10"), ElementKind::For, 0, true);
    let restored = normalizer.restore(&normalized, ElementKind::For);
    assert_eq!(restored.tokens.to_string(), "for i <- 1 to 10");
    assert_eq!(restored.index_map, [0, 1, 2, 3, 4, 5, 6]);
}

#[test]
fn restore_multi_token_phrase_shifts_indices() {
    let mut keywords = KeywordConfig::default();
    keywords.set(KeywordKey::PreWhile, "as long as");
    keywords.set(KeywordKey::PostWhile, "do");
    let normalizer = Normalizer::new(keywords);
    let normalized = normalizer.normalize(&tokenize("as long as n > 0 do"), ElementKind::While, 0, true);
    let restored = normalizer.restore(&normalized, ElementKind::While);
    assert_eq!(restored.tokens.to_string(), "as long as n > 0 do");
    assert_eq!(restored.index_map, [0, 3, 4, 5, 6]);
}

#[test]
fn restore_drops_inserted_markers() {
    let normalizer = Normalizer::default();
    let normalized = normalizer.normalize(&tokenize("swap(a, b)"), ElementKind::Instruction, 0, true);
    let restored = normalizer.restore(&normalized, ElementKind::Instruction);
    assert_eq!(restored.tokens.tokens()[0], "swap");
    assert_eq!(restored.index_map[..2], [0, 0]);
}
