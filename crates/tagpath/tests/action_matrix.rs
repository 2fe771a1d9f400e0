use tagpath::{
    shared, Action, ActionError, Container, ContainerError, ContainerRef, CopyAction, CutAction,
    EditAction, MoveAction, NamedSources, Outcome, Query, RenameAction, Report, Session,
    SwapAction, ValueContainer,
};
use tagpath_literal::parse;
use tagpath_query::QueryError;
use tagpath_tag::{Primitive, Tag};

fn doc(text: &str) -> ContainerRef {
    shared(ValueContainer::new(parse(text).unwrap()))
}

fn text_of(container: &ContainerRef) -> String {
    container
        .borrow()
        .read_tag()
        .unwrap()
        .map(|t| t.to_string())
        .unwrap_or_default()
}

fn session_with(docs: &[(&str, &ContainerRef)]) -> Session {
    let mut sources = NamedSources::new();
    for (name, container) in docs {
        sources.insert(*name, (*container).clone());
    }
    Session::with_resolver(sources)
}

fn done(outcome: Outcome) -> Report {
    match outcome {
        Outcome::Done(report) => report,
        Outcome::Awaiting => panic!("action is waiting for a selection"),
    }
}

fn run(session: &mut Session, action: impl Action + 'static) -> Report {
    done(session.run(action).unwrap())
}

// ── Copy / Cut ────────────────────────────────────────────────────────────

#[test]
fn copy_puts_value_on_the_clipboard() {
    let a = doc("{a:{b:[1s,2s]}}");
    let mut s = session_with(&[("doc", &a)]);
    let r = s.reference("doc", Some("a.b")).unwrap();
    let report = run(&mut s, CopyAction::new(r));
    assert_eq!(
        report,
        Report::Copied(Some(Primitive::Seq(vec![Primitive::Short(1), Primitive::Short(2)])))
    );
    assert_eq!(text_of(s.buffer()), "[1s,2s]");
    assert_eq!(text_of(&a), "{a:{b:[1s,2s]}}");
}

#[test]
fn copying_nothing_clears_the_clipboard() {
    let a = doc("{a:1}");
    let mut s = session_with(&[("doc", &a)]);
    s.buffer().borrow_mut().write_tag(Tag::Int(9)).unwrap();
    let r = s.reference("doc", Some("missing")).unwrap();
    assert_eq!(run(&mut s, CopyAction::new(r)), Report::Copied(None));
    assert_eq!(s.buffer().borrow().read_tag().unwrap(), None);

    // and again on an already empty clipboard
    let r = s.reference("doc", Some("missing")).unwrap();
    assert_eq!(run(&mut s, CopyAction::new(r)), Report::Copied(None));
}

#[test]
fn cut_requires_a_value() {
    let a = doc("{a:1,b:\"x\"}");
    let mut s = session_with(&[("doc", &a)]);
    let r = s.reference("doc", Some("b")).unwrap();
    assert_eq!(run(&mut s, CutAction::new(r)), Report::Cut(Primitive::from("x")));
    assert_eq!(text_of(&a), "{a:1}");
    assert_eq!(text_of(s.buffer()), "\"x\"");

    let r = s.reference("doc", Some("b")).unwrap();
    assert!(matches!(s.run(CutAction::new(r)), Err(ActionError::NoValue(_))));
    assert_eq!(text_of(s.buffer()), "\"x\"");
}

#[test]
fn cut_out_of_the_clipboard() {
    let mut s = Session::new();
    let target = s.reference("buffer", None).unwrap();
    let source = s.reference("{a:1b,b:2b}", None).unwrap();
    run(&mut s, EditAction::new(target, source));

    let r = s.reference("buffer", Some("a")).unwrap();
    assert_eq!(run(&mut s, CutAction::new(r)), Report::Cut(Primitive::Byte(1)));
    assert_eq!(text_of(s.buffer()), "1b");

    let r = s.reference("c", None).unwrap();
    assert_eq!(run(&mut s, CutAction::new(r)), Report::Cut(Primitive::Byte(1)));
    assert_eq!(text_of(s.buffer()), "1b");
}

#[test]
fn paste_from_the_clipboard_with_edit() {
    let a = doc("{a:{k:1b}}");
    let mut s = session_with(&[("doc", &a)]);
    let r = s.reference("doc", Some("a")).unwrap();
    run(&mut s, CopyAction::new(r));
    let target = s.reference("doc", Some("copy")).unwrap();
    let source = s.reference("buffer", None).unwrap();
    run(&mut s, EditAction::new(target, source));
    assert_eq!(text_of(&a), "{a:{k:1b},copy:{k:1b}}");
}

// ── Swap ──────────────────────────────────────────────────────────────────

#[test]
fn swap_exchanges_across_containers() {
    let a = doc("{x:1}");
    let b = doc("{y:\"two\"}");
    let mut s = session_with(&[("a", &a), ("b", &b)]);
    let first = s.reference("a", Some("x")).unwrap();
    let second = s.reference("b", Some("y")).unwrap();
    assert_eq!(run(&mut s, SwapAction::new(first, second)), Report::Swapped);
    assert_eq!(text_of(&a), "{x:\"two\"}");
    assert_eq!(text_of(&b), "{y:1}");
}

#[test]
fn swap_with_a_missing_side_moves_the_value() {
    let a = doc("{x:1,z:{}}");
    let mut s = session_with(&[("a", &a)]);
    let first = s.reference("a", Some("x")).unwrap();
    let second = s.reference("a", Some("z.w")).unwrap();
    assert_eq!(run(&mut s, SwapAction::new(first, second)), Report::Swapped);
    assert_eq!(text_of(&a), "{z:{w:1}}");

    let first = s.reference("a", Some("nope")).unwrap();
    let second = s.reference("a", Some("nada")).unwrap();
    assert_eq!(run(&mut s, SwapAction::new(first, second)), Report::SwappedNothing);
    assert_eq!(text_of(&a), "{z:{w:1}}");
}

#[test]
fn swap_checks_both_sides_before_writing() {
    let a = doc("{x:1}");
    let mut s = session_with(&[("a", &a)]);
    let first = s.reference("a", Some("x")).unwrap();
    let second = s.reference("{y:2}", None).unwrap();
    let err = s.run(SwapAction::new(first, second)).unwrap_err();
    assert!(matches!(
        err,
        ActionError::Failed {
            action: "swap",
            source: ContainerError::ReadOnly(_),
            ..
        }
    ));
    assert_eq!(text_of(&a), "{x:1}");
}

// ── Rename ────────────────────────────────────────────────────────────────

#[test]
fn rename_keeps_the_parent() {
    let a = doc("{p:{old:[1,2]i,keep:1}}");
    let mut s = session_with(&[("doc", &a)]);
    let r = s.reference("doc", Some("p.old")).unwrap();
    let report = run(&mut s, RenameAction::new(r, "new").unwrap());
    assert_eq!(
        report,
        Report::Renamed {
            name: "new".into(),
            value: Primitive::IntArray(vec![1, 2]),
        }
    );
    assert_eq!(text_of(&a), "{p:{keep:1,new:[1,2]i}}");
}

#[test]
fn rename_within_a_list() {
    let a = doc("{l:[\"a\",\"b\",\"c\"]}");
    let mut s = session_with(&[("doc", &a)]);
    let r = s.reference("doc", Some("l[0]")).unwrap();
    run(&mut s, RenameAction::new(r, "[2]").unwrap());
    assert_eq!(text_of(&a), "{l:[\"b\",\"c\",\"a\"]}");
}

#[test]
fn rename_edge_cases() {
    let a = doc("{a:1}");
    let mut s = session_with(&[("doc", &a)]);
    let r = s.reference("doc", Some("missing")).unwrap();
    assert_eq!(run(&mut s, RenameAction::new(r, "b").unwrap()), Report::NotRenamed);

    let r = s.reference("doc", None).unwrap();
    assert_eq!(
        s.run(RenameAction::new(r, "b").unwrap()).unwrap_err(),
        ActionError::RootRename
    );

    let r = s.reference("doc", Some("a")).unwrap();
    assert!(matches!(
        RenameAction::new(r, "[x"),
        Err(ActionError::Query(QueryError::Syntax { .. }))
    ));
    for name in ["", "  "] {
        let r = s.reference("doc", Some("a")).unwrap();
        assert!(matches!(RenameAction::new(r, name), Err(ActionError::EmptyName)));
    }
    assert_eq!(text_of(&a), "{a:1}");
}

// ── Move ──────────────────────────────────────────────────────────────────

#[test]
fn move_sets_then_erases() {
    let a = doc("{from:{v:5l},to:[]}");
    let mut s = session_with(&[("doc", &a)]);
    let source = s.reference("doc", Some("from.v")).unwrap();
    let destination = s.reference("doc", Some("to[0]")).unwrap();
    assert_eq!(
        run(&mut s, MoveAction::new(source, destination)),
        Report::Moved(Primitive::Long(5))
    );
    assert_eq!(text_of(&a), "{from:{},to:[5l]}");
}

#[test]
fn failed_move_leaves_the_source() {
    let a = doc("{from:1,to:2}");
    let mut s = session_with(&[("doc", &a)]);
    let source = s.reference("doc", Some("from")).unwrap();
    let destination = s.reference("doc", Some("to.x")).unwrap();
    let err = s.run(MoveAction::new(source, destination)).unwrap_err();
    assert!(matches!(
        err,
        ActionError::Failed {
            action: "move",
            source: ContainerError::Query(QueryError::KindMismatch { .. }),
            ..
        }
    ));
    assert_eq!(text_of(&a), "{from:1,to:2}");
}

// ── Edit ──────────────────────────────────────────────────────────────────

#[test]
fn edit_with_literals_and_inferred_numbers() {
    let a = doc("{hp:20s,pos:[1.0d,2.0d],ids:[1,2]l}");
    let mut s = session_with(&[("doc", &a)]);
    let cases = [
        ("hp", "15", None, "15s"),
        ("pos[0]", "-3.5", None, "-3.5d"),
        ("pos[2]", "7", None, "7d"),
        ("ids", "[4,5]", None, "[4,5]l"),
        ("name", "\"Steve\"", None, "\"Steve\""),
        ("color", "lime", None, "4312116"),
        ("flag", "on", None, "1b"),
        ("big", "#7f", Some("long"), "127l"),
        ("tree", "{a:[1b]}", None, "{a:[1b]}"),
        ("json", "{\"k\":[1,2]}", Some("json"), "{k:[1i,2i]}"),
    ];
    for (path, value, param, expected) in cases {
        let target = s.reference("doc", Some(path)).unwrap();
        let source = s.reference(value, param).unwrap();
        run(&mut s, EditAction::new(target, source));
        let got = a
            .borrow()
            .get_tag_at(&Query::parse(path).unwrap())
            .unwrap()
            .map(|t| t.to_string());
        assert_eq!(got.as_deref(), Some(expected), "{path} <- {value}");
    }
}

#[test]
fn edit_with_nothing_erases() {
    let a = doc("{a:1,b:2}");
    let mut s = session_with(&[("doc", &a)]);
    let target = s.reference("doc", Some("a")).unwrap();
    let source = s.reference("null", None).unwrap();
    assert_eq!(run(&mut s, EditAction::new(target, source)), Report::Edited(None));
    assert_eq!(text_of(&a), "{b:2}");

    // erasing what is already gone is not an error
    let target = s.reference("doc", Some("a")).unwrap();
    let source = s.reference("null", None).unwrap();
    assert_eq!(run(&mut s, EditAction::new(target, source)), Report::Edited(None));
}

#[test]
fn literals_cannot_be_edited() {
    let mut s = Session::new();
    let target = s.reference("{a:1}", None).unwrap();
    let source = s.reference("2", Some("int")).unwrap();
    let err = s.run(EditAction::new(target, source)).unwrap_err();
    assert!(matches!(
        err,
        ActionError::Failed {
            action: "edit",
            source: ContainerError::ReadOnly(_),
            ..
        }
    ));
}

#[test]
fn bare_numbers_need_a_known_kind() {
    let a = doc("{}");
    let mut s = session_with(&[("doc", &a)]);
    let target = s.reference("doc", Some("n")).unwrap();
    let source = s.reference("3", None).unwrap();
    assert!(matches!(
        s.run(EditAction::new(target, source)),
        Err(ActionError::Reference(tagpath::ReferenceError::UndefinedType(_)))
    ));
    assert_eq!(text_of(&a), "{}");
}

#[test]
fn self_addresses_the_first_argument_container() {
    let a = doc("{a:{v:1},b:{}}");
    let mut s = session_with(&[("doc", &a)]);
    let target = s.reference("doc", Some("b.v")).unwrap();
    let source = s.reference("self", Some("a.v")).unwrap();
    run(&mut s, EditAction::new(target, source));
    assert_eq!(text_of(&a), "{a:{v:1},b:{v:1}}");
}

// ── Selection ─────────────────────────────────────────────────────────────

#[test]
fn selection_parks_and_resumes_once() {
    let picked = doc("{item:{count:3b}}");
    let mut s = Session::new();
    let source = s.reference("*", Some("item")).unwrap();
    assert_eq!(s.run(CopyAction::new(source)).unwrap(), Outcome::Awaiting);
    assert!(s.is_awaiting());
    assert_eq!(s.buffer().borrow().read_tag().unwrap(), None);

    let report = done(s.select(picked.clone()).unwrap());
    assert!(matches!(report, Report::Copied(Some(_))));
    assert_eq!(text_of(s.buffer()), "{count:3b}");
    assert!(!s.is_awaiting());
    assert_eq!(s.select(picked).unwrap_err(), ActionError::NothingAwaiting);
}

#[test]
fn second_argument_can_wait_too() {
    let a = doc("{slot:1s}");
    let picked = doc("{slot:0s}");
    let mut s = session_with(&[("doc", &a)]);
    let source = s.reference("doc", Some("slot")).unwrap();
    let destination = s.reference("*", Some("slot")).unwrap();
    assert_eq!(s.run(SwapAction::new(source, destination)).unwrap(), Outcome::Awaiting);
    assert_eq!(done(s.select(picked.clone()).unwrap()), Report::Swapped);
    assert_eq!(text_of(&a), "{slot:0s}");
    assert_eq!(text_of(&picked), "{slot:1s}");
}

#[test]
fn cancel_drops_the_parked_action() {
    let mut s = Session::new();
    let source = s.reference("*", None).unwrap();
    s.run(CutAction::new(source)).unwrap();
    assert!(s.cancel());
    assert!(!s.cancel());
    assert_eq!(
        s.select(doc("{a:1}")).unwrap_err(),
        ActionError::NothingAwaiting
    );
}
