use super::compiler;
use crate::{
    db::query::{QueryCompiler, ResolvedPath},
    error::QueryError,
    model::Cardinality,
    test_fixtures::{Article, Author},
};

#[test]
fn plain_name_resolves_on_root() {
    let resolved = compiler()
        .resolve::<Article>("word-count", None)
        .expect("root attribute");

    assert!(matches!(resolved, ResolvedPath::Attribute(_)));
    assert_eq!(resolved.attribute().internal_name, "word_count");
    assert!(resolved.relationship().is_none());
}

#[test]
fn dotted_name_resolves_through_relationship() {
    let compiler = compiler();

    let to_one = compiler
        .resolve::<Article>("author.name", None)
        .expect("to-one path");
    let ResolvedPath::ToOne { relationship, .. } = to_one else {
        panic!("author is to-one");
    };
    assert_eq!(relationship.cardinality, Cardinality::One);

    let to_many = compiler
        .resolve::<Article>("tags.label", None)
        .expect("to-many path");
    assert!(matches!(to_many, ResolvedPath::ToMany { .. }));
    assert_eq!(to_many.display_name(), "tags.label");
}

#[test]
fn explicit_relationship_strips_matching_prefix() {
    let compiler = compiler();

    let prefixed = compiler
        .resolve::<Article>("author.name", Some("author"))
        .expect("prefixed");
    let bare = compiler
        .resolve::<Article>("name", Some("author"))
        .expect("bare");

    assert_eq!(prefixed.attribute(), bare.attribute());
}

#[test]
fn unknown_relationship_is_reported() {
    let err = compiler()
        .resolve::<Article>("editor.name", None)
        .expect_err("no editor");

    assert!(matches!(
        err,
        QueryError::UnknownRelationship { ref relationship, entity: "articles" }
            if relationship == "editor"
    ));
    assert_eq!(err.status_code(), 400);
}

#[test]
fn unknown_attribute_names_the_resolved_type() {
    let compiler = compiler();

    let root = compiler
        .resolve::<Article>("subtitle", None)
        .expect_err("no subtitle");
    assert!(matches!(root, QueryError::UnknownAttribute { entity: "articles", .. }));

    let related = compiler
        .resolve::<Article>("author.age", None)
        .expect_err("no age");
    assert!(matches!(related, QueryError::UnknownAttribute { entity: "people", .. }));
}

#[test]
fn internal_names_are_not_public() {
    let err = compiler()
        .resolve::<Article>("word_count", None)
        .expect_err("internal name");

    assert!(matches!(err, QueryError::UnknownAttribute { .. }));
}

#[test]
fn unregistered_entity_is_internal_error() {
    let compiler = QueryCompiler::for_entity::<Author>().expect("author schema");
    let err = compiler
        .resolve::<Article>("title", None)
        .expect_err("article not registered");

    assert!(matches!(err, QueryError::UnregisteredEntity { .. }));
    assert_eq!(err.status_code(), 500);
}
