use css_events::ast::MarginBox;
use css_events::{Event, EventLog, Parser, ParserOptions};

#[test]
fn page_with_margin_boxes_and_a_pseudo_class() {
    let parser = Parser::new(ParserOptions::new());
    let mut log = EventLog::new();
    parser
        .parse_stylesheet(
            "@page :first { size: a4; @top-center { content: \"Title\" } @bottom-left-corner { content: \"x\" } }",
            &mut log,
        )
        .unwrap();
    let evs = log.events();

    match &evs[1] {
        Event::StartPage { id, pseudo } => {
            assert!(id.is_none());
            assert_eq!(pseudo.as_deref(), Some("first"));
        }
        other => panic!("expected a startpage event, got {other:?}"),
    }

    let margins: Vec<_> = evs
        .iter()
        .filter_map(|e| match e {
            Event::StartPageMargin { margin } => Some(*margin),
            _ => None,
        })
        .collect();
    assert_eq!(margins, vec![MarginBox::TopCenter, MarginBox::BottomLeftCorner]);

    let margin_ends = evs.iter().filter(|e| matches!(e, Event::EndPageMargin { .. })).count();
    assert_eq!(margin_ends, 2);
    assert!(evs.iter().any(|e| matches!(e, Event::EndPage { .. })));
}

#[test]
fn named_page_selector() {
    let parser = Parser::new(ParserOptions::new());
    let mut log = EventLog::new();
    parser.parse_stylesheet("@page wide { size: landscape }", &mut log).unwrap();
    match &log.events()[1] {
        Event::StartPage { id, pseudo } => {
            assert_eq!(id.as_deref(), Some("wide"));
            assert!(pseudo.is_none());
        }
        other => panic!("expected a startpage event, got {other:?}"),
    }
}

#[test]
fn font_face_declarations() {
    let parser = Parser::new(ParserOptions::new());
    let mut log = EventLog::new();
    parser
        .parse_stylesheet(r#"@font-face { font-family: "Example"; src: url("example.woff") }"#, &mut log)
        .unwrap();
    let evs = log.events();
    assert!(matches!(evs[1], Event::StartFontFace));
    let property_count = evs.iter().filter(|e| matches!(e, Event::Property { .. })).count();
    assert_eq!(property_count, 2);
    assert!(matches!(evs[4], Event::EndFontFace));
}
