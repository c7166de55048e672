use crate::{
    db::predicate::{CompareOp, MemberPath, Predicate, TextOp, eval},
    test_fixtures::{Article, articles, ids},
    value::{TextMode, Value},
};

fn matching(predicate: &Predicate) -> Vec<u64> {
    let rows = articles();
    ids(rows.iter().filter(|row| eval(*row, predicate)))
}

fn author_name(op: CompareOp, name: &str) -> Predicate {
    Predicate::compare(MemberPath::related("author", "name"), op, Value::from(name))
}

fn tag_label_is(label: &str) -> Predicate {
    Predicate::compare(MemberPath::field("label"), CompareOp::Eq, Value::from(label))
}

#[test]
fn empty_conjunction_is_true_and_empty_disjunction_is_false() {
    assert_eq!(matching(&Predicate::And(vec![])), vec![1, 2, 3]);
    assert_eq!(matching(&Predicate::Or(vec![])), Vec::<u64>::new());
}

#[test]
fn absent_related_object_reads_as_null() {
    assert_eq!(matching(&author_name(CompareOp::Eq, "Alice")), vec![1]);
    assert_eq!(matching(&author_name(CompareOp::Ne, "Alice")), vec![2, 3]);
    assert_eq!(
        matching(&Predicate::null(MemberPath::related("author", "name"))),
        vec![3]
    );
    assert_eq!(matching(&author_name(CompareOp::Gt, "A")), vec![1, 2]);
}

#[test]
fn any_and_every_quantify_over_to_many() {
    let any_x = Predicate::any("tags", tag_label_is("x"));
    let every_y = Predicate::every("tags", tag_label_is("y"));

    assert_eq!(matching(&any_x), vec![1]);
    assert_eq!(matching(&!any_x), vec![2, 3]);
    // vacuous truth for the article without tags
    assert_eq!(matching(&every_y), vec![2, 3]);
}

#[test]
fn in_list_matches_any_candidate() {
    let predicate = Predicate::in_list(
        MemberPath::field("title"),
        vec![Value::from("A"), Value::from("C")],
    );

    assert_eq!(matching(&predicate), vec![1, 3]);
}

#[test]
fn text_ops_respect_mode_and_skip_null() {
    let lower = Value::from("a");
    let cs = Predicate::text(
        MemberPath::field("title"),
        TextOp::StartsWith,
        lower.clone(),
        TextMode::Cs,
    );
    let ci = Predicate::text(
        MemberPath::field("title"),
        TextOp::StartsWith,
        lower,
        TextMode::Ci,
    );
    let via_author = Predicate::text(
        MemberPath::related("author", "name"),
        TextOp::EndsWith,
        Value::from("b"),
        TextMode::Cs,
    );

    assert!(matching(&cs).is_empty());
    assert_eq!(matching(&ci), vec![1]);
    assert_eq!(matching(&via_author), vec![2]);
}

#[test]
fn mismatched_literal_never_matches() {
    let predicate = Predicate::compare(
        MemberPath::field("word_count"),
        CompareOp::Eq,
        Value::from("100"),
    );

    assert!(matching(&predicate).is_empty());
}

#[test]
fn unknown_member_never_matches() {
    let predicate = Predicate::null(MemberPath::field("missing"));
    let row = Article::default();

    assert!(!eval(&row, &predicate));
}

#[test]
fn bit_and_flattens_conjunctions() {
    let combined = (Predicate::True & tag_label_is("x")) & tag_label_is("y");

    assert_eq!(
        combined,
        Predicate::And(vec![tag_label_is("x"), tag_label_is("y")])
    );
}
