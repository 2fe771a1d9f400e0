use std::fs;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tagpath::{
    shared, Complex, Container, ContainerError, EditAction, NamedSources, Outcome, Query,
    ReferenceError, Session, SessionOptions, ValueContainer,
};
use tagpath_literal::parse;
use tagpath_query::QueryError;
use tagpath_tag::{Primitive, Tag};

fn q(text: &str) -> Query {
    Query::parse(text).unwrap()
}

// ── Complex ───────────────────────────────────────────────────────────────

#[test]
fn complex_reads_probe_but_edits_fail() {
    let root = shared(ValueContainer::new(parse("{a:{b:[1,2]},s:\"x\"}").unwrap()));
    let paths = ["a.c", "a.b[5]", "s.k", "z.y.x", "a.b[-3]"];
    for path in paths {
        let mut view = Complex::new(root.clone(), q(path));
        assert_eq!(view.read_tag().unwrap(), None, "{path}");
        assert_eq!(view.read_custom_tag().unwrap(), None, "{path}");
        assert!(view.erase_tag().is_err(), "{path}");
        assert!(view.erase_custom_tag().is_err(), "{path}");
    }
    assert_eq!(
        root.borrow().read_tag().unwrap().unwrap().to_string(),
        "{a:{b:[1i,2i]},s:\"x\"}"
    );
}

#[test]
fn complex_write_errors_match_the_path_shape() {
    let root = shared(ValueContainer::new(parse("{a:{b:[1,2]},s:\"x\"}").unwrap()));
    let err = |path: &str, tag: Tag| Complex::new(root.clone(), q(path)).write_tag(tag).unwrap_err();
    assert!(matches!(
        err("s.k", Tag::Int(1)),
        ContainerError::Query(QueryError::KindMismatch { .. })
    ));
    assert!(matches!(
        err("a.b[7]", Tag::Int(1)),
        ContainerError::Query(QueryError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
        err("a.b[0]", Tag::from("str")),
        ContainerError::Query(QueryError::Tag(_))
    ));
}

#[test]
fn nested_complex_views_compose() {
    let root = shared(ValueContainer::new(parse("{inv:[{id:\"a\",n:1b}]}").unwrap()));
    let slot = shared(Complex::new(root.clone(), q("inv[0]")));
    let mut count = Complex::new(slot.clone(), q("n"));
    assert_eq!(count.selector_query().to_string(), ".inv[0].n");
    count.write_custom_tag(Primitive::Byte(9)).unwrap();
    assert_eq!(
        root.borrow().read_tag().unwrap().unwrap().to_string(),
        "{inv:[{id:\"a\",n:9b}]}"
    );
    count.erase_tag().unwrap();
    assert_eq!(slot.borrow().read_tag().unwrap().unwrap().to_string(), "{id:\"a\"}");
}

#[test]
fn disjoint_writes_through_views_do_not_interfere() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x7a9);
    let keys = ["a", "b", "c", "d"];
    for _ in 0..200 {
        let root = shared(ValueContainer::new(parse("{a:{},b:{},c:{},d:{}}").unwrap()));
        let i = rng.gen_range(0..keys.len());
        let j = (i + rng.gen_range(1..keys.len())) % keys.len();
        let value = Tag::Long(rng.gen());
        let before = Complex::new(root.clone(), q(keys[j])).read_tag().unwrap();
        let leaf = format!("{}.k{}", keys[i], rng.gen_range(0..5));
        Complex::new(root.clone(), q(&leaf)).write_tag(value.clone()).unwrap();
        assert_eq!(Complex::new(root.clone(), q(keys[j])).read_tag().unwrap(), before);
        assert_eq!(Complex::new(root.clone(), q(&leaf)).read_tag().unwrap(), Some(value));
    }
}

// ── Variables and sources ─────────────────────────────────────────────────

#[test]
fn variables_live_in_the_session() {
    let mut s = Session::new();
    let target = s.reference("%pos", Some("x")).unwrap();
    let source = s.reference("1.5", Some("double")).unwrap();
    assert!(matches!(s.run(EditAction::new(target, source)).unwrap(), Outcome::Done(_)));
    assert_eq!(s.variables().get("pos"), Some(parse("{x:1.5d}").unwrap()));

    let r = s.reference(r#"%"pos""#, Some("x")).unwrap();
    let (container, query) = r.target().unwrap();
    assert_eq!(container.borrow().get_tag_at(query).unwrap(), Some(Tag::Double(1.5)));
}

#[test]
fn named_sources_take_their_param_as_query() {
    let world = shared(ValueContainer::new(parse("{spawn:{y:64}}").unwrap()));
    let s = Session::with_resolver(NamedSources::new().with("world", world));
    let r = s.reference("world", Some("spawn.y")).unwrap();
    assert_eq!(r.to_string(), "{spawn:{y:64}} .spawn.y");
    assert!(matches!(
        s.reference("world", Some("spawn..y")),
        Err(ReferenceError::Query(QueryError::Syntax { .. }))
    ));
}

// ── Files ─────────────────────────────────────────────────────────────────

fn file_session(dir: &tempfile::TempDir) -> Session {
    Session::new().with_options(SessionOptions {
        file_root: dir.path().to_path_buf(),
        ..SessionOptions::default()
    })
}

#[test]
fn file_tokens_load_and_save() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("doc.tag"), "{hp:20s}").unwrap();
    let mut s = file_session(&dir);

    let target = s.reference("file:doc.tag", Some("hp")).unwrap();
    let source = s.reference("5", None).unwrap();
    s.run(EditAction::new(target, source)).unwrap();
    assert_eq!(fs::read_to_string(dir.path().join("doc.tag")).unwrap(), "{hp:5s}");

    let target = s.reference(r#"file:"new.tag""#, Some("a")).unwrap();
    let source = s.reference("on", None).unwrap();
    s.run(EditAction::new(target, source)).unwrap();
    assert_eq!(fs::read_to_string(dir.path().join("new.tag")).unwrap(), "{a:1b}");
}

#[test]
fn file_tokens_stay_inside_the_root() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("inner")).unwrap();
    let s = Session::new().with_options(SessionOptions {
        file_root: dir.path().join("inner"),
        ..SessionOptions::default()
    });
    assert!(matches!(
        s.reference("file:../escape.tag", None),
        Err(ReferenceError::FileAccess(_))
    ));
    assert!(s.reference("file:ok.tag", None).is_ok());
    assert!(matches!(
        s.reference("file:missing/dir.tag", None),
        Err(ReferenceError::Container(ContainerError::Io { .. }))
    ));
}

#[cfg(unix)]
#[test]
fn file_tokens_do_not_follow_links_out_of_the_root() {
    use std::os::unix::fs::symlink;

    let root = tempfile::tempdir().unwrap();
    let outside = tempfile::tempdir().unwrap();
    fs::write(outside.path().join("secret.tag"), "{secret:1}").unwrap();
    symlink(outside.path().join("secret.tag"), root.path().join("link.tag")).unwrap();
    symlink(outside.path().join("absent.tag"), root.path().join("dangling.tag")).unwrap();
    fs::write(root.path().join("real.tag"), "{a:1}").unwrap();
    symlink(root.path().join("real.tag"), root.path().join("alias.tag")).unwrap();
    let s = file_session(&root);

    assert!(matches!(
        s.reference("file:link.tag", None),
        Err(ReferenceError::FileAccess(_))
    ));
    assert!(matches!(
        s.reference("file:dangling.tag", None),
        Err(ReferenceError::FileAccess(_))
    ));
    let r = s.reference("file:alias.tag", Some("a")).unwrap();
    let (container, query) = r.target().unwrap();
    assert_eq!(container.borrow().get_tag_at(query).unwrap(), Some(Tag::Int(1)));
}
