use super::*;
use pretty_assertions::assert_eq;

#[test]
fn defaults() {
    let config = KeywordConfig::default();
    assert_eq!(config.phrase(KeywordKey::PreFor), "for");
    assert_eq!(config.phrase(KeywordKey::StepFor), "by");
    assert_eq!(config.phrase(KeywordKey::Input), "INPUT");
    assert_eq!(config.phrase(KeywordKey::PreAlt), "");
    assert!(config.tokens(KeywordKey::PreAlt).is_none());
    assert!(config.ignore_case());
}

#[test]
fn property_names() {
    assert_eq!(KeywordKey::PreForIn.property_name(), "ParserPreForIn");
    assert_eq!(KeywordKey::Output.property_name(), "ParserOutput");
    assert_eq!(KeywordKey::from_name("postWhile"), Some(KeywordKey::PostWhile));
    assert_eq!(KeywordKey::from_name("PostWhile"), None);
}

#[test]
fn phrases_are_tokenized() {
    let mut config = KeywordConfig::default();
    config.set(KeywordKey::PreWhile, "  as long as ");
    let tokens = config.tokens(KeywordKey::PreWhile).unwrap();
    assert_eq!(tokens.tokens(), ["as", "long", "as"]);
    assert_eq!(tokens.to_string(), "as long as");
    assert_eq!(config.phrase(KeywordKey::PreWhile), "  as long as ");
}

#[test]
fn empty_for_in_falls_back_to_for() {
    let mut config = KeywordConfig::default();
    config.set(KeywordKey::PreForIn, "");
    assert_eq!(
        config.tokens(KeywordKey::PreForIn).unwrap().tokens(),
        ["for"]
    );
    assert_eq!(config.phrase(KeywordKey::PreForIn), "");
}

#[test]
fn load_properties() {
    let text = "\
# German keywords
ParserPreFor=für
ParserPostFor = bis
ParserStepFor=Schritt
ParserPreWhile=solange 
ParserIgnoreCase=false
ParserPreImport=include
not a property
";
    let config = KeywordConfig::from_properties(text);
    assert_eq!(config.phrase(KeywordKey::PreFor), "für");
    assert_eq!(config.phrase(KeywordKey::PostFor), "bis");
    assert_eq!(config.phrase(KeywordKey::StepFor), "Schritt");
    assert_eq!(config.phrase(KeywordKey::PreWhile), "solange ");
    assert!(!config.ignore_case());
    // Untouched keys keep their defaults.
    assert_eq!(config.phrase(KeywordKey::PreReturn), "return");
}

#[test]
fn export_reads_back() {
    let mut config = KeywordConfig::default();
    config.set(KeywordKey::PreCase, "select");
    config.set(KeywordKey::Output, "print");
    config.set_ignore_case(false);
    let text = config.to_properties();
    assert!(text.contains("ParserPreCase=select\n"));
    assert!(text.contains("ParserIgnoreCase=false\n"));
    assert_eq!(KeywordConfig::from_properties(&text), config);
}
