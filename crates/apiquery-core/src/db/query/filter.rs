use crate::{
    config::QueryConfig,
    db::{
        predicate::{CompareOp, MemberPath, Predicate, TextOp},
        query::{
            coercion::{coerce_list, coerce_scalar},
            descriptor::{FilterDescriptor, FilterOperation},
            resolve::ResolvedPath,
        },
        schema::{AttributeMetadata, Schema},
    },
    error::QueryError,
    model::EntityModel,
    value::Value,
};

///
/// FilterBuilder
///
/// Compiles filter descriptors into predicates against one root entity.
/// Stateless apart from the borrowed schema and configuration.
///

pub(crate) struct FilterBuilder<'a> {
    schema: &'a Schema,
    config: &'a QueryConfig,
    model: &'static EntityModel,
}

impl<'a> FilterBuilder<'a> {
    pub(crate) const fn new(
        schema: &'a Schema,
        config: &'a QueryConfig,
        model: &'static EntityModel,
    ) -> Self {
        Self {
            schema,
            config,
            model,
        }
    }

    pub(crate) fn build(&self, filter: &FilterDescriptor) -> Result<Predicate, QueryError> {
        let resolved = self.schema.resolve(
            self.model,
            &filter.attribute,
            filter.relationship.as_deref(),
        )?;
        let op = filter.operation;
        let name = resolved.display_name();

        check_operation(op, &resolved, &name)?;

        let predicate = match resolved {
            ResolvedPath::ToMany {
                relationship,
                attribute,
            } => self.to_many(relationship.internal_name, &attribute, op, &filter.value)?,
            ResolvedPath::Attribute(attribute) | ResolvedPath::ToOne { attribute, .. } => {
                self.member(resolved.member_path(), &attribute, op, &filter.value)?
            }
        };

        tracing::debug!(
            entity = self.model.entity_name,
            op = %op,
            path = %name,
            "compiled filter"
        );

        Ok(predicate)
    }

    /// Conjunction of every filter, in list order.
    pub(crate) fn build_all(&self, filters: &[FilterDescriptor]) -> Result<Predicate, QueryError> {
        let predicates = filters
            .iter()
            .map(|filter| self.build(filter))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Predicate::all_of(predicates))
    }

    // Scalar or membership test on one member of the element under test.
    fn member(
        &self,
        path: MemberPath,
        attribute: &AttributeMetadata,
        op: FilterOperation,
        literal: &str,
    ) -> Result<Predicate, QueryError> {
        let ty = &attribute.field_type;

        let predicate = match op {
            FilterOperation::Eq => compare(path, CompareOp::Eq, coerce_scalar(literal, ty)?),
            FilterOperation::Ne => compare(path, CompareOp::Ne, coerce_scalar(literal, ty)?),
            FilterOperation::Lt => compare(path, CompareOp::Lt, coerce_scalar(literal, ty)?),
            FilterOperation::Le => compare(path, CompareOp::Le, coerce_scalar(literal, ty)?),
            FilterOperation::Gt => compare(path, CompareOp::Gt, coerce_scalar(literal, ty)?),
            FilterOperation::Ge => compare(path, CompareOp::Ge, coerce_scalar(literal, ty)?),

            FilterOperation::Like => self.text(path, TextOp::Contains, literal),
            FilterOperation::StartsWith => self.text(path, TextOp::StartsWith, literal),
            FilterOperation::EndsWith => self.text(path, TextOp::EndsWith, literal),

            FilterOperation::IsNull => Predicate::null(path),
            FilterOperation::IsNotNull => !Predicate::null(path),

            FilterOperation::In => Predicate::in_list(path, self.list(literal, attribute)?),
            FilterOperation::NotIn => !Predicate::in_list(path, self.list(literal, attribute)?),

            FilterOperation::All | FilterOperation::MatchAll | FilterOperation::Exclude => {
                return Err(QueryError::quantifier_requires_to_many(
                    op,
                    attribute.public_name,
                    None,
                ));
            }
        };

        Ok(predicate)
    }

    // Existential or universal test over the elements of a to-many relation.
    fn to_many(
        &self,
        relation: &str,
        attribute: &AttributeMetadata,
        op: FilterOperation,
        literal: &str,
    ) -> Result<Predicate, QueryError> {
        let field = || MemberPath::field(attribute.internal_name);
        let has = |value: Value| Predicate::any(relation, compare(field(), CompareOp::Eq, value));

        let predicate = match op {
            FilterOperation::In => Predicate::any(
                relation,
                Predicate::in_list(field(), self.list(literal, attribute)?),
            ),
            FilterOperation::NotIn => !Predicate::any(
                relation,
                Predicate::in_list(field(), self.list(literal, attribute)?),
            ),
            FilterOperation::All | FilterOperation::MatchAll => {
                Predicate::And(self.candidates(literal, attribute)?.into_iter().map(has).collect())
            }
            FilterOperation::Exclude => Predicate::And(
                self.candidates(literal, attribute)?
                    .into_iter()
                    .map(|value| !has(value))
                    .collect(),
            ),
            _ => Predicate::any(relation, self.member(field(), attribute, op, literal)?),
        };

        Ok(predicate)
    }

    // Substring tests never match a null member; the guard keeps that
    // explicit for engines that translate the tree.
    fn text(&self, path: MemberPath, op: TextOp, literal: &str) -> Predicate {
        Predicate::And(vec![
            !Predicate::null(path.clone()),
            Predicate::text(
                path,
                op,
                Value::Text(literal.to_string()),
                self.config.text_case,
            ),
        ])
    }

    // Quantified operations read the empty literal as the empty candidate
    // set, so they hold vacuously.
    fn candidates(
        &self,
        literal: &str,
        attribute: &AttributeMetadata,
    ) -> Result<Vec<Value>, QueryError> {
        if literal.is_empty() {
            return Ok(Vec::new());
        }

        self.list(literal, attribute)
    }

    fn list(&self, literal: &str, attribute: &AttributeMetadata) -> Result<Vec<Value>, QueryError> {
        Ok(coerce_list(
            literal,
            self.config.list_separator,
            &attribute.field_type,
        )?)
    }
}

const fn compare(path: MemberPath, op: CompareOp, value: Value) -> Predicate {
    Predicate::compare(path, op, value)
}

fn check_operation(
    op: FilterOperation,
    resolved: &ResolvedPath,
    name: &str,
) -> Result<(), QueryError> {
    let field_type = resolved.attribute().field_type;

    if op.is_quantified() && !matches!(resolved, ResolvedPath::ToMany { .. }) {
        return Err(QueryError::quantifier_requires_to_many(
            op,
            name,
            resolved.relationship().map(|relationship| relationship.cardinality),
        ));
    }

    if op.is_substring() && !field_type.kind.is_text() {
        return Err(QueryError::invalid_operation(
            op,
            name,
            format!("substring operations need a text attribute, found {field_type}"),
        ));
    }

    if op.is_ordering() && !field_type.kind.is_orderable() {
        return Err(QueryError::invalid_operation(
            op,
            name,
            format!("ordering is undefined for {field_type}"),
        ));
    }

    Ok(())
}
