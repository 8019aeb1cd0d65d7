use css_events::ast::{AttributeOperator, Combinator, ElementName, SimpleSelectorModifier};
use css_events::{Event, EventLog, Parser, ParserOptions};

#[test]
fn id_selector_alone_parses_as_a_valid_ruleset() {
    let parser = Parser::new(ParserOptions::new());
    let mut log = EventLog::new();
    parser.parse_stylesheet("#abcd { }", &mut log).unwrap();
    let evs = log.events();
    match &evs[1] {
        Event::StartRule { selectors } => {
            assert_eq!(selectors.len(), 1);
            assert_eq!(selectors[0].first.modifiers.len(), 1);
            assert!(matches!(
                &selectors[0].first.modifiers[0],
                SimpleSelectorModifier::Id(id) if id == "abcd"
            ));
        }
        other => panic!("expected a startrule event, got {other:?}"),
    }
    assert!(matches!(evs[2], Event::EndRule { .. }));
}

#[test]
fn combinators_are_distinguished_from_descendant_whitespace() {
    let parser = Parser::new(ParserOptions::new());
    let selector = parser.parse_selector("a > b + c ~ d e").unwrap();
    let combinators: Vec<_> = selector.rest.iter().map(|(c, _)| *c).collect();
    assert_eq!(
        combinators,
        vec![
            Combinator::Child,
            Combinator::Adjacent,
            Combinator::Sibling,
            Combinator::Descendant,
        ]
    );
}

#[test]
fn attribute_selector_with_operator_and_quoted_value() {
    let parser = Parser::new(ParserOptions::new());
    let selector = parser.parse_selector(r#"a[href^="https://"]"#).unwrap();
    match &selector.first.modifiers[0] {
        SimpleSelectorModifier::Attribute(attr) => {
            assert_eq!(attr.name, "href");
            assert_eq!(attr.operator, Some(AttributeOperator::PrefixMatch));
        }
        other => panic!("expected an attribute modifier, got {other:?}"),
    }
}

#[test]
fn pseudo_class_and_pseudo_element_markers() {
    let parser = Parser::new(ParserOptions::new());
    let single = parser.parse_selector("a:hover").unwrap();
    let double = parser.parse_selector("a::before").unwrap();
    assert_eq!(single.first.modifiers.len(), 1);
    assert_eq!(double.first.modifiers.len(), 1);
}

#[test]
fn negation_with_a_class_argument() {
    let parser = Parser::new(ParserOptions::new());
    let selector = parser.parse_selector("a:not(.foo)").unwrap();
    assert_eq!(selector.first.modifiers.len(), 1);
}

#[test]
fn namespaced_type_selector() {
    let parser = Parser::new(ParserOptions::new());
    let selector = parser.parse_selector("svg|rect").unwrap();
    assert!(matches!(
        &selector.first.type_selector.as_ref().unwrap().name,
        ElementName::Name(n) if n == "rect"
    ));
}

#[test]
fn universal_selector_alone() {
    let parser = Parser::new(ParserOptions::new());
    let selector = parser.parse_selector("*").unwrap();
    assert!(matches!(
        selector.first.type_selector.as_ref().unwrap().name,
        ElementName::Universal
    ));
    assert!(selector.first.modifiers.is_empty());
}

#[test]
fn selector_group_with_multiple_comma_separated_selectors() {
    let parser = Parser::new(ParserOptions::new());
    let mut log = EventLog::new();
    parser.parse_stylesheet("a, b, c { x: 1 }", &mut log).unwrap();
    match &log.events()[1] {
        Event::StartRule { selectors } => assert_eq!(selectors.len(), 3),
        other => panic!("expected a startrule event, got {other:?}"),
    }
}
