use std::sync::Arc;

use depmemo::{
    decide, should_skip_render, Decision, Deps, Diagnostic, Input, Reason, RecordingDiagnostics,
    RenderDeps, Snapshot, Value,
};
use quickcheck_macros::quickcheck;

macro_rules! test {
    (skip: $prev:expr, $next:expr, $deps:expr) => {{
        assert!(should_skip_render(&$prev, &$next, &$deps));
    }};
    (render: $prev:expr, $next:expr, $deps:expr) => {{
        assert!(!should_skip_render(&$prev, &$next, &$deps));
    }};
}

fn person(name: &str, age: i64) -> Input<Snapshot> {
    Input::new(Snapshot::new().with("name", name).with("age", age))
}

/// Test plain memoization when no dependencies are declared.
#[test]
fn test_all() {
    let deps = Deps::all();
    test!(skip: person("John", 25), person("John", 25), deps);
    test!(render: person("John", 25), person("Jane", 25), deps);
    test!(render: person("John", 25), person("John", 30), deps);
}

/// Without a dependency list, children are compared like everything else.
#[test]
fn test_all_compares_children() {
    let child = depmemo::Content::text("child");
    let with = |content: depmemo::Content| {
        Input::new(Snapshot::new().with("name", "John").with("children", content))
    };
    let span = || -> depmemo::Content { depmemo::Element::new("span").child("hi").into() };
    test!(skip: with(child.clone()), with(child), Deps::all());
    test!(render: with(span()), with(span()), Deps::all());
}

/// Test that an empty dependency list never renders because of props.
#[test]
fn test_none() {
    let deps = Deps::none();
    test!(skip: person("John", 25), person("John", 25), deps);
    test!(skip: person("John", 25), person("Jane", 30), deps);
}

/// Test key dependencies.
#[test]
fn test_keys() {
    let deps = Deps::on(["name"]);
    test!(skip: person("John", 25), person("John", 30), deps);
    test!(render: person("John", 25), person("Jane", 25), deps);

    let deps = Deps::on(["name", "age"]);
    test!(render: person("John", 25), person("John", 30), deps);
    test!(render: person("John", 25), person("Jane", 25), deps);
    test!(skip: person("John", 25), person("John", 25), deps);
}

/// Test that the default comparator ignores children.
#[test]
fn test_children_default() {
    let with = |text: &str| {
        let children = depmemo::Element::new("span").child(text).into();
        Input::new(
            Snapshot::new()
                .with("name", "John")
                .with("children", Value::Content(children)),
        )
    };

    test!(skip: with("Child 1"), with("Child 1"), Deps::on(["children"]));
    test!(skip: with("Child 1"), with("Child 2"), Deps::on(["children"]));
}

/// Test composing a predicate with the default comparator.
#[test]
fn test_predicate_composition() {
    let deps = Deps::on(["value"]).when(|_, next: &Snapshot, defaults| {
        defaults.same("other") || next.get("other").and_then(Value::as_int) != Some(3)
    });

    let input = |value: i64, other: i64| {
        Input::new(Snapshot::new().with("value", value).with("other", other))
    };

    test!(skip: input(1, 1), input(1, 1), deps);
    test!(skip: input(1, 1), input(1, 2), deps);
    test!(render: input(1, 1), input(1, 3), deps);
    test!(render: input(1, 1), input(2, 1), deps);
}

/// Test a predicate replacing the default behaviour.
#[test]
fn test_predicate_threshold() {
    let age = |input: &Snapshot| input.get("age").and_then(Value::as_int).unwrap_or(0);
    let deps = Deps::none().when(move |prev, next, _| (age(prev) - age(next)).abs() <= 5);
    test!(skip: person("John", 25), person("John", 28), deps);
    test!(render: person("John", 25), person("John", 35), deps);
    test!(skip: person("John", 25), person("Jane", 25), deps);
}

/// Test that the first changed entry is reported.
#[test]
fn test_dependency_reason() {
    let sink = RecordingDiagnostics::new();
    let deps = Deps::on(["name"]).when(|_, _, _| true).key("age");
    let decision = decide(&person("John", 25), &person("John", 30), &deps, "Person", &sink);
    assert_eq!(decision, Decision::Render(Reason::Dependency { index: 2 }));

    let deps = Deps::<Snapshot>::all();
    let decision = decide(&person("John", 25), &person("John", 30), &deps, "Person", &sink);
    assert_eq!(decision, Decision::Render(Reason::Props { key: Some("age".into()) }));
    assert!(sink.is_empty());
}

/// Test that render deps can force renders.
#[test]
fn test_render_deps() {
    let deps = Deps::on(["name"]);
    let with = |render_deps: RenderDeps| person("John", 25).with_render_deps(render_deps);

    test!(skip: with(RenderDeps::new([1, 2, 3])), with(RenderDeps::new([1, 2, 3])), deps);
    test!(render: with(RenderDeps::new([1, 2, 3])), with(RenderDeps::new([1, 2, 4])), deps);
    test!(render: with(RenderDeps::new([1, 2])), with(RenderDeps::new([1, 2, 3])), deps);
    test!(render: with(RenderDeps::Off), with(RenderDeps::Off), deps);
    test!(render: with(RenderDeps::new([1])), with(RenderDeps::Off), deps);
    test!(render: with(RenderDeps::Off), with(RenderDeps::new([1])), deps);
    test!(skip: with(RenderDeps::Unset), with(RenderDeps::new(Vec::<i64>::new())), deps);
    test!(render: with(RenderDeps::Unset), with(RenderDeps::new([1])), deps);
}

/// Render deps take precedence over an empty dependency list.
#[test]
fn test_render_deps_before_none() {
    let deps = Deps::none();
    let prev = person("John", 25).with_render_deps(RenderDeps::new(["a"]));
    let next = person("John", 25).with_render_deps(RenderDeps::new(["b"]));
    test!(render: prev, next, deps);
    test!(render: person("John", 25), person("John", 25).with_render_deps(RenderDeps::Off), deps);
}

/// Test the reasons reported for render deps.
#[test]
fn test_render_deps_reasons() {
    let sink = RecordingDiagnostics::new();
    let deps = Deps::none();
    let check = |prev: RenderDeps, next: RenderDeps| {
        let prev = person("John", 25).with_render_deps(prev);
        let next = person("John", 25).with_render_deps(next);
        decide(&prev, &next, &deps, "Person", &sink)
    };

    assert_eq!(check(RenderDeps::Off, RenderDeps::Off), Decision::Render(Reason::RenderDepsOff));
    assert_eq!(
        check(RenderDeps::Off, RenderDeps::new([1])),
        Decision::Render(Reason::RenderDepsResumed)
    );
    assert_eq!(
        check(RenderDeps::new([1, 2]), RenderDeps::new([1, 2, 3])),
        Decision::Render(Reason::RenderDepsLength { prev: 2, next: 3 })
    );
    assert_eq!(
        check(RenderDeps::new([1, 2]), RenderDeps::new([1, 3])),
        Decision::Render(Reason::RenderDepsChanged { index: 1 })
    );
}

/// Test that render deps accept any value and compare it strictly.
#[test]
fn test_render_deps_values() {
    let deps = Deps::none();
    let with = |render_deps: RenderDeps| person("John", 25).with_render_deps(render_deps);

    test!(skip: with(RenderDeps::new([1.5])), with(RenderDeps::new([1.5])), deps);
    test!(render: with(RenderDeps::new([1.5])), with(RenderDeps::new([2.5])), deps);
    test!(skip: with(RenderDeps::new([None::<i64>])), with(RenderDeps::new([Value::Null])), deps);

    // Shared pointers compare by identity, not by contents.
    let shared = Arc::new(vec![1]);
    test!(skip: with(RenderDeps::new([shared.clone()])), with(RenderDeps::new([shared])), deps);
    test!(
        render: with(RenderDeps::new([Arc::new(vec![1])])),
        with(RenderDeps::new([Arc::new(vec![1])])),
        deps
    );

    let callback = Value::opaque(|| 1);
    test!(
        skip: with(RenderDeps::builder().push(callback.clone()).push("a").build()),
        with(RenderDeps::builder().push(callback).push("a").build()),
        deps
    );
}

/// Test that passing the same render deps twice warns without changing the
/// decision.
#[test]
fn test_shared_render_deps() {
    let sink = RecordingDiagnostics::new();
    let shared = RenderDeps::new([1, 2, 3]);
    let prev = person("John", 25).with_render_deps(shared.clone());
    let next = person("John", 25).with_render_deps(shared);

    let decision = decide(&prev, &next, &Deps::on(["name"]), "Person", &sink);
    assert_eq!(decision, Decision::Skip);
    assert_eq!(sink.take(), [("Person".to_string(), Diagnostic::SharedRenderDeps)]);

    let next = person("Jane", 25).with_render_deps(prev.render_deps.clone());
    let decision = decide(&prev, &next, &Deps::on(["name"]), "Person", &sink);
    assert_eq!(decision, Decision::Render(Reason::Dependency { index: 0 }));
    assert_eq!(sink.len(), 1);

    let fresh = person("John", 25).with_render_deps(RenderDeps::new([1, 2, 3]));
    decide(&prev, &fresh, &Deps::on(["name"]), "Person", &sink);
    assert_eq!(sink.len(), 1);
}

/// Test that missing keys fail toward rendering.
#[test]
fn test_missing_key() {
    let sink = RecordingDiagnostics::new();
    let prev = person("John", 25);
    let next = Input::new(Snapshot::new().with("name", "John"));

    let decision = decide(&prev, &next, &Deps::on(["age"]), "Person", &sink);
    assert_eq!(decision, Decision::Render(Reason::Dependency { index: 0 }));
    assert_eq!(sink.take(), [("Person".to_string(), Diagnostic::UnknownKey("age".into()))]);

    let decision = decide(&prev, &next, &Deps::all(), "Person", &sink);
    assert_eq!(decision, Decision::Render(Reason::Props { key: None }));
}

/// Test that shared values compare by identity.
#[test]
fn test_identity() {
    let callback = Value::opaque(Arc::new(|| 1));
    let with = |callback: Value| Input::new(Snapshot::new().with("onClick", callback));
    test!(skip: with(callback.clone()), with(callback), Deps::on(["onClick"]));
    test!(render: with(Value::opaque(0)), with(Value::opaque(0)), Deps::on(["onClick"]));
}

/// A predicate that panics is not caught.
#[test]
#[should_panic(expected = "predicate failed")]
fn test_predicate_panics() {
    let deps = Deps::on(["name"]).when(|_, _, _| panic!("predicate failed"));
    should_skip_render(&person("John", 25), &person("John", 25), &deps);
}

fn from_pairs(pairs: &[(u8, i64)]) -> Snapshot {
    pairs.iter().map(|(k, v)| (format!("k{k}"), *v)).collect()
}

#[quickcheck]
fn prop_all_skips_iff_equal(prev: Vec<i64>, next: Vec<i64>) -> bool {
    let len = prev.len().min(next.len());
    let prev: Vec<_> = (0..len as u8).zip(prev.iter().copied()).collect();
    let next: Vec<_> = (0..len as u8).zip(next.iter().copied()).collect();
    let skip = should_skip_render(
        &Input::new(from_pairs(&prev)),
        &Input::new(from_pairs(&next)),
        &Deps::all(),
    );
    skip == (prev == next)
}

#[quickcheck]
fn prop_none_always_skips(prev: Vec<(u8, i64)>, next: Vec<(u8, i64)>) -> bool {
    should_skip_render(
        &Input::new(from_pairs(&prev)),
        &Input::new(from_pairs(&next)),
        &Deps::none(),
    )
}

#[quickcheck]
fn prop_off_always_renders(pairs: Vec<(u8, i64)>) -> bool {
    let prev = Input::new(from_pairs(&pairs));
    let next = Input::new(from_pairs(&pairs)).with_render_deps(RenderDeps::Off);
    !should_skip_render(&prev, &next, &Deps::none())
}
