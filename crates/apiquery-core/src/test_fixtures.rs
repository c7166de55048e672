use apiquery_derive::{Entity, EnumValue};
use chrono::NaiveDate;

///
/// Status
///

#[derive(Clone, Copy, Debug, Default, EnumValue, Eq, PartialEq)]
pub enum Status {
    #[default]
    Draft,
    Published,
    Archived,
}

///
/// Author
///

#[derive(Clone, Debug, Default, Entity, PartialEq)]
#[entity(name = "people")]
pub struct Author {
    pub id: u64,
    pub name: String,
    pub email: Option<String>,
}

///
/// Tag
///

#[derive(Clone, Debug, Default, Entity, PartialEq)]
#[entity(name = "tags")]
pub struct Tag {
    pub id: u64,
    pub label: String,
}

///
/// Article
///

#[derive(Clone, Debug, Default, Entity, PartialEq)]
#[entity(name = "articles")]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub word_count: i32,
    pub rating: Option<f64>,
    pub status: Status,
    pub featured: bool,
    pub published_on: Option<NaiveDate>,

    #[entity(has_one)]
    pub author: Option<Author>,

    #[entity(has_many)]
    pub tags: Vec<Tag>,

    #[entity(skip)]
    pub scratch: String,
}

pub fn author(id: u64, name: &str) -> Author {
    Author {
        id,
        name: name.to_string(),
        email: None,
    }
}

pub fn tag(id: u64, label: &str) -> Tag {
    Tag {
        id,
        label: label.to_string(),
    }
}

pub fn article(id: u64, title: &str, author: Option<Author>, tags: Vec<Tag>) -> Article {
    Article {
        id,
        title: title.to_string(),
        word_count: i32::try_from(id * 100).unwrap_or(i32::MAX),
        author,
        tags,
        ..Article::default()
    }
}

/// The three-article collection used across the query tests:
///
/// | id | title | author | tags   |
/// |----|-------|--------|--------|
/// | 1  | A     | Alice  | x, y   |
/// | 2  | B     | Bob    | y      |
/// | 3  | C     | none   | none   |
pub fn articles() -> Vec<Article> {
    vec![
        article(
            1,
            "A",
            Some(author(10, "Alice")),
            vec![tag(100, "x"), tag(101, "y")],
        ),
        article(2, "B", Some(author(11, "Bob")), vec![tag(101, "y")]),
        article(3, "C", None, Vec::new()),
    ]
}

pub fn ids<'a>(articles: impl IntoIterator<Item = &'a Article>) -> Vec<u64> {
    articles.into_iter().map(|article| article.id).collect()
}
