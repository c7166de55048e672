use super::{compiler, filter};
use crate::{
    config::QueryConfig,
    db::{
        predicate::{CompareOp, MemberPath, Predicate, TextOp, eval},
        query::{FilterOperation, QueryCompiler},
    },
    error::{ErrorClass, QueryError},
    test_fixtures::{Article, articles, ids},
    value::{TextMode, Value},
};
use std::str::FromStr;

fn run(compiler: &QueryCompiler, attribute: &str, op: FilterOperation, value: &str) -> Vec<u64> {
    let predicate = compiler
        .filter::<Article>(&filter(attribute, op, value))
        .expect("filter should compile");
    let rows = articles();

    ids(rows.iter().filter(|row| eval(*row, &predicate)))
}

fn matching(attribute: &str, op: FilterOperation, value: &str) -> Vec<u64> {
    run(&compiler(), attribute, op, value)
}

///
/// DIRECT ATTRIBUTES
///

#[test]
fn scalar_comparisons_on_root_attributes() {
    assert_eq!(matching("title", FilterOperation::Eq, "B"), vec![2]);
    assert_eq!(matching("title", FilterOperation::Ne, "B"), vec![1, 3]);
    assert_eq!(matching("word-count", FilterOperation::Lt, "200"), vec![1]);
    assert_eq!(matching("word-count", FilterOperation::Le, "200"), vec![1, 2]);
    assert_eq!(matching("word-count", FilterOperation::Gt, "200"), vec![3]);
    assert_eq!(matching("word-count", FilterOperation::Ge, "200"), vec![2, 3]);
}

#[test]
fn eq_compiles_to_compare_on_internal_name() {
    let predicate = compiler()
        .filter::<Article>(&filter("word-count", FilterOperation::Eq, "42"))
        .expect("compiles");

    assert_eq!(
        predicate,
        Predicate::compare(MemberPath::field("word_count"), CompareOp::Eq, Value::Int(42))
    );
}

#[test]
fn null_checks_ignore_literal() {
    assert_eq!(matching("rating", FilterOperation::IsNull, "ignored"), vec![1, 2, 3]);
    assert!(matching("rating", FilterOperation::IsNotNull, "").is_empty());
}

#[test]
fn membership_on_root_attribute() {
    assert_eq!(matching("title", FilterOperation::In, "A,C"), vec![1, 3]);
    assert_eq!(matching("title", FilterOperation::NotIn, "A,C"), vec![2]);
}

#[test]
fn substring_ops_add_not_null_guard() {
    let predicate = compiler()
        .filter::<Article>(&filter("title", FilterOperation::Like, "x"))
        .expect("compiles");

    let path = MemberPath::field("title");
    assert_eq!(
        predicate,
        Predicate::And(vec![
            !Predicate::null(path.clone()),
            Predicate::text(path, TextOp::Contains, Value::from("x"), TextMode::Cs),
        ])
    );
}

#[test]
fn case_insensitive_text_follows_config() {
    let config = QueryConfig::from_toml_str(r#"text_case = "ci""#).expect("config");
    let compiler = compiler().with_config(config);

    assert_eq!(
        run(&compiler, "author.name", FilterOperation::StartsWith, "al"),
        vec![1]
    );
    assert!(matching("author.name", FilterOperation::StartsWith, "al").is_empty());
}

///
/// TO-ONE RELATIONSHIPS
///

#[test]
fn to_one_attribute_with_absent_related_object() {
    assert_eq!(matching("author.name", FilterOperation::Eq, "Alice"), vec![1]);
    assert_eq!(matching("author.name", FilterOperation::Ne, "Alice"), vec![2, 3]);
    assert_eq!(matching("author.name", FilterOperation::IsNull, ""), vec![3]);
    assert_eq!(matching("author.name", FilterOperation::EndsWith, "b"), vec![2]);
}

#[test]
fn explicit_relationship_descriptor() {
    let predicate = compiler()
        .filter::<Article>(
            &filter("name", FilterOperation::Eq, "Bob").with_relationship("author"),
        )
        .expect("compiles");

    assert_eq!(
        predicate,
        Predicate::compare(
            MemberPath::related("author", "name"),
            CompareOp::Eq,
            Value::from("Bob")
        )
    );
}

#[test]
fn empty_membership_literal_is_the_empty_string() {
    let mut rows = articles();
    rows[0].title = String::new();
    let compiler = compiler();

    let within = compiler
        .filter::<Article>(&filter("title", FilterOperation::In, ""))
        .expect("in compiles");
    let outside = compiler
        .filter::<Article>(&filter("title", FilterOperation::NotIn, ""))
        .expect("notIn compiles");

    assert_eq!(
        within,
        Predicate::in_list(MemberPath::field("title"), vec![Value::from("")])
    );
    assert_eq!(ids(rows.iter().filter(|row| eval(*row, &within))), vec![1]);
    assert_eq!(ids(rows.iter().filter(|row| eval(*row, &outside))), vec![2, 3]);
}

///
/// TO-MANY RELATIONSHIPS
///

#[test]
fn in_and_not_in_on_to_many_partition_collection() {
    let inside = matching("tags.label", FilterOperation::In, "x");
    let outside = matching("tags.label", FilterOperation::NotIn, "x");

    assert_eq!(inside, vec![1]);
    assert_eq!(outside, vec![2, 3]);
}

#[test]
fn all_requires_every_listed_value() {
    assert_eq!(matching("tags.label", FilterOperation::All, "x,y"), vec![1]);
    assert_eq!(matching("tags.label", FilterOperation::MatchAll, "y"), vec![1, 2]);
    assert_eq!(matching("tags.label", FilterOperation::Exclude, "x"), vec![2, 3]);
}

#[test]
fn exclude_rejects_any_listed_value() {
    assert_eq!(matching("tags.label", FilterOperation::Exclude, "x,y"), vec![3]);
    assert_eq!(matching("tags.label", FilterOperation::Exclude, "y,z"), vec![3]);
    assert_eq!(matching("tags.label", FilterOperation::Exclude, "z,w"), vec![1, 2, 3]);
}

#[test]
fn empty_quantified_list_matches_everything() {
    for op in [
        FilterOperation::All,
        FilterOperation::MatchAll,
        FilterOperation::Exclude,
    ] {
        assert_eq!(matching("tags.label", op, ""), vec![1, 2, 3], "{op}");
    }
}

#[test]
fn all_compiles_to_conjunction_of_any() {
    let predicate = compiler()
        .filter::<Article>(&filter("tags.label", FilterOperation::All, "x,y"))
        .expect("compiles");

    let has = |label: &str| {
        Predicate::any(
            "tags",
            Predicate::compare(MemberPath::field("label"), CompareOp::Eq, Value::from(label)),
        )
    };
    assert_eq!(predicate, Predicate::And(vec![has("x"), has("y")]));
}

#[test]
fn scalar_op_on_to_many_is_existential() {
    assert_eq!(matching("tags.label", FilterOperation::Eq, "y"), vec![1, 2]);
    assert_eq!(matching("tags.label", FilterOperation::Like, "x"), vec![1]);
}

///
/// REJECTIONS
///

#[test]
fn quantifier_on_non_to_many_is_rejected() {
    let compiler = compiler();

    for attribute in ["title", "author.name"] {
        let err = compiler
            .filter::<Article>(&filter(attribute, FilterOperation::All, "a"))
            .expect_err("all needs to-many");

        assert!(matches!(err, QueryError::InvalidOperationForAttribute { .. }));
        assert_eq!(err.class(), ErrorClass::Client);
    }
}

#[test]
fn substring_on_non_text_is_rejected() {
    let err = compiler()
        .filter::<Article>(&filter("word-count", FilterOperation::Like, "1"))
        .expect_err("like needs text");

    assert!(matches!(err, QueryError::InvalidOperationForAttribute { .. }));
}

#[test]
fn ordering_on_bool_is_rejected() {
    let err = compiler()
        .filter::<Article>(&filter("featured", FilterOperation::Gt, "true"))
        .expect_err("bool is unordered");

    assert!(matches!(err, QueryError::InvalidOperationForAttribute { .. }));
}

#[test]
fn bad_literal_is_a_coercion_error() {
    let err = compiler()
        .filter::<Article>(&filter("word-count", FilterOperation::Eq, "many"))
        .expect_err("not a number");

    assert!(matches!(err, QueryError::TypeCoercion(_)));
    assert_eq!(err.status_code(), 400);
}

#[test]
fn unknown_operation_token_is_internal() {
    let err = FilterOperation::from_str("between").expect_err("unknown token");

    assert!(matches!(err, QueryError::UnsupportedFilterOperation { .. }));
    assert_eq!(err.status_code(), 500);
    assert_eq!(err.display_with_class(), "internal: unsupported filter operation 'between'");
}

#[test]
fn wire_tokens_parse() {
    let parsed: Vec<_> = ["sw", "ew", "nin", "_all_", "isnotnull", "eq"]
        .into_iter()
        .map(|token| FilterOperation::from_str(token).expect("known token"))
        .collect();

    assert_eq!(
        parsed,
        [
            FilterOperation::StartsWith,
            FilterOperation::EndsWith,
            FilterOperation::NotIn,
            FilterOperation::MatchAll,
            FilterOperation::IsNotNull,
            FilterOperation::Eq,
        ]
    );
}

#[test]
fn filters_conjoin_in_list_order() {
    let compiler = compiler();
    let predicate = compiler
        .filters::<Article>(&[
            filter("tags.label", FilterOperation::In, "y"),
            filter("author.name", FilterOperation::Ne, "Bob"),
        ])
        .expect("compiles");
    let rows = articles();

    assert_eq!(ids(rows.iter().filter(|row| eval(*row, &predicate))), vec![1]);
    assert_eq!(
        compiler.filters::<Article>(&[]).expect("empty"),
        Predicate::True
    );
}
