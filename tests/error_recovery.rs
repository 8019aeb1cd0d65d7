use css_events::{Event, EventLog, Parser, ParserOptions};

#[test]
fn malformed_declaration_is_skipped_and_parsing_resumes() {
    let parser = Parser::new(ParserOptions::new());
    let mut log = EventLog::new();
    parser
        .parse_stylesheet("a { color: ; } b { x: 1 }", &mut log)
        .unwrap();
    let evs = log.events();

    let error_count = evs.iter().filter(|e| matches!(e, Event::Error { .. })).count();
    assert_eq!(error_count, 1);

    let rule_names: Vec<_> = evs
        .iter()
        .filter_map(|e| match e {
            Event::Property { property, .. } => Some(property.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(rule_names, vec!["x"]);

    let rule_count = evs.iter().filter(|e| matches!(e, Event::StartRule { .. })).count();
    assert_eq!(rule_count, 2);
}

#[test]
fn strict_mode_propagates_the_first_declaration_error() {
    let parser = Parser::new(ParserOptions::new().with_strict(true));
    let mut log = EventLog::new();
    let result = parser.parse_stylesheet("a { color: ; } b { x: 1 }", &mut log);
    assert!(result.is_err());
}

#[test]
fn malformed_selector_discards_the_whole_ruleset() {
    let parser = Parser::new(ParserOptions::new());
    let mut log = EventLog::new();
    parser
        .parse_stylesheet("a[ { color: red } b { x: 1 }", &mut log)
        .unwrap();
    let evs = log.events();
    assert!(evs.iter().any(|e| matches!(e, Event::Error { .. })));

    let rule_names: Vec<_> = evs
        .iter()
        .filter_map(|e| match e {
            Event::Property { property, .. } => Some(property.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(rule_names, vec!["x"]);
}

#[test]
fn invalid_hex_color_value_is_reported_but_recovered() {
    let parser = Parser::new(ParserOptions::new());
    let mut log = EventLog::new();
    parser.parse_stylesheet("p { color: #abcd }", &mut log).unwrap();
    let evs = log.events();
    assert!(evs.iter().any(|e| matches!(e, Event::Error { .. })));
    assert!(evs.iter().any(|e| matches!(e, Event::StartRule { .. })));
    assert!(evs.iter().any(|e| matches!(e, Event::EndRule { .. })));
}
