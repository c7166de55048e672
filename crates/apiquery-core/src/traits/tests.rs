use crate::{
    model::{Cardinality, FieldKind},
    test_fixtures::{Article, Author, Status, articles},
    traits::{EntitySchema, FieldValue, FieldValues, Record, RelationRef},
    value::{Value, ValueEnum},
};

#[test]
fn option_wrapping_marks_field_nullable() {
    assert!(!<i32 as FieldValue>::NULLABLE);
    assert!(<Option<i32> as FieldValue>::NULLABLE);
    assert_eq!(<Option<i32> as FieldValue>::KIND, FieldKind::Int32);
    assert_eq!(None::<i32>.to_value(), Value::Null);
    assert_eq!(Some(7_i32).to_value(), Value::Int(7));
}

#[test]
fn enum_value_carries_declaration_ordinal() {
    assert_eq!(
        Status::Archived.to_value(),
        Value::Enum(ValueEnum::new("Archived", 2))
    );

    let FieldKind::Enum(model) = <Status as FieldValue>::KIND else {
        panic!("Status should be an enum kind");
    };
    assert_eq!(model.variants, &["Draft", "Published", "Archived"]);
    assert_eq!(model.ordinal("Published"), Some(1));
}

#[test]
fn derived_model_lists_attributes_and_relations() {
    let model = Article::MODEL;

    assert_eq!(model.entity_name, "articles");
    assert_eq!(model.primary_key, "id");
    assert!(model.path.ends_with("::Article"));

    let public: Vec<_> = model.fields.iter().map(|f| f.public_name).collect();
    assert_eq!(
        public,
        [
            "id",
            "title",
            "word-count",
            "rating",
            "status",
            "featured",
            "published-on"
        ]
    );

    let author = model.relation("author").expect("author relation");
    assert_eq!(author.cardinality, Cardinality::One);
    assert_eq!(author.related().path, Author::MODEL.path);

    let tags = model.relation("tags").expect("tags relation");
    assert_eq!(tags.cardinality, Cardinality::Many);
    assert!(model.field("scratch").is_none());
}

#[test]
fn record_access_walks_relations() {
    let rows = articles();
    let first = &rows[0];

    assert_eq!(first.get_value("title"), Some(Value::from("A")));
    assert_eq!(first.get_value("author"), None);
    assert_eq!(first.entity_model().entity_name, "articles");

    let Some(RelationRef::One(Some(author))) = first.relation("author") else {
        panic!("first article should have an author");
    };
    assert_eq!(author.get_value("name"), Some(Value::from("Alice")));

    let Some(RelationRef::Many(tags)) = first.relation("tags") else {
        panic!("tags should be a to-many relation");
    };
    assert_eq!(tags.len(), 2);

    let Some(RelationRef::One(None)) = rows[2].relation("author") else {
        panic!("third article has no author");
    };
}
