use convert_case::{Case, Casing};
use darling::{Error as DarlingError, FromDeriveInput, FromField, ast::Data, util::Ignored};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Generics, Ident, Type};

// derive_entity
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let entity = match EntityInput::from_derive_input(&input) {
        Ok(entity) => entity,
        Err(err) => return err.write_errors(),
    };

    entity
        .expand()
        .unwrap_or_else(DarlingError::write_errors)
}

///
/// EntityInput
///

#[derive(FromDeriveInput)]
#[darling(attributes(entity), supports(struct_named))]
struct EntityInput {
    ident: Ident,
    generics: Generics,
    data: Data<Ignored, EntityField>,

    /// External resource name; defaults to the kebab-cased type name.
    #[darling(default)]
    name: Option<String>,
}

///
/// EntityField
///

#[derive(FromField)]
#[darling(attributes(entity))]
struct EntityField {
    ident: Option<Ident>,
    ty: Type,

    #[darling(default)]
    primary_key: bool,

    /// Public member name; defaults to the kebab-cased field name.
    #[darling(default)]
    rename: Option<String>,

    #[darling(default)]
    has_one: bool,

    #[darling(default)]
    has_many: bool,

    /// Field is neither queryable nor projected; shaping leaves it default.
    #[darling(default)]
    skip: bool,
}

///
/// MemberRole
///

#[derive(Clone, Copy, Eq, PartialEq)]
enum MemberRole {
    Attribute,
    ToOne,
    ToMany,
}

///
/// Member
///

struct Member<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    name: String,
    public_name: String,
    role: MemberRole,
    primary_key: bool,
}

impl EntityInput {
    fn expand(&self) -> Result<TokenStream, DarlingError> {
        if !self.generics.params.is_empty() {
            return Err(
                DarlingError::custom("Entity cannot be derived for generic structs")
                    .with_span(&self.ident),
            );
        }

        let members = self.members()?;
        let primary_key = Self::primary_key(&self.ident, &members)?;

        let ident = &self.ident;
        let ident_name = ident.to_string();
        let entity_name = self
            .name
            .clone()
            .unwrap_or_else(|| ident_name.to_case(Case::Kebab));

        let field_models = members
            .iter()
            .filter(|member| member.role == MemberRole::Attribute)
            .map(field_model);
        let relation_models = members
            .iter()
            .filter(|member| member.role != MemberRole::Attribute)
            .map(relation_model);
        let value_arms = members
            .iter()
            .filter(|member| member.role == MemberRole::Attribute)
            .map(value_arm);
        let relation_arms = members
            .iter()
            .filter(|member| member.role != MemberRole::Attribute)
            .map(relation_arm);
        let shape_stmts = members.iter().map(shape_stmt);

        Ok(quote! {
            impl ::apiquery::traits::EntitySchema for #ident {
                const MODEL: &'static ::apiquery::model::EntityModel =
                    &::apiquery::model::EntityModel {
                        path: concat!(module_path!(), "::", #ident_name),
                        entity_name: #entity_name,
                        primary_key: #primary_key,
                        fields: &[#(#field_models),*],
                        relations: &[#(#relation_models),*],
                    };
            }

            impl ::apiquery::traits::FieldValues for #ident {
                fn get_value(&self, field: &str) -> Option<::apiquery::value::Value> {
                    match field {
                        #(#value_arms)*
                        _ => None,
                    }
                }
            }

            impl ::apiquery::traits::Record for #ident {
                fn entity_model(&self) -> &'static ::apiquery::model::EntityModel {
                    <Self as ::apiquery::traits::EntitySchema>::MODEL
                }

                fn relation(&self, name: &str) -> Option<::apiquery::traits::RelationRef<'_>> {
                    match name {
                        #(#relation_arms)*
                        _ => None,
                    }
                }
            }

            impl ::apiquery::traits::Entity for #ident {
                fn shape(&self, mask: &::apiquery::db::query::FieldMask) -> Self {
                    let mut shaped = <Self as ::core::default::Default>::default();
                    #(#shape_stmts)*

                    shaped
                }
            }
        })
    }

    fn members(&self) -> Result<Vec<Member<'_>>, DarlingError> {
        let Some(fields) = self.data.as_ref().take_struct() else {
            return Err(DarlingError::custom("Entity can only be derived for structs")
                .with_span(&self.ident));
        };

        let mut members = Vec::new();
        for field in fields.fields {
            if field.skip {
                continue;
            }

            let Some(ident) = field.ident.as_ref() else {
                return Err(DarlingError::custom("Entity fields must be named")
                    .with_span(&self.ident));
            };

            let role = match (field.has_one, field.has_many) {
                (false, false) => MemberRole::Attribute,
                (true, false) => MemberRole::ToOne,
                (false, true) => MemberRole::ToMany,
                (true, true) => {
                    return Err(DarlingError::custom(
                        "a relationship cannot be both has_one and has_many",
                    )
                    .with_span(ident));
                }
            };

            if field.primary_key && role != MemberRole::Attribute {
                return Err(
                    DarlingError::custom("the primary key must be an attribute")
                        .with_span(ident),
                );
            }

            let name = ident.to_string();
            let public_name = field
                .rename
                .clone()
                .unwrap_or_else(|| name.to_case(Case::Kebab));

            members.push(Member {
                ident,
                ty: &field.ty,
                name,
                public_name,
                role,
                primary_key: field.primary_key,
            });
        }

        Ok(members)
    }

    // The explicit `primary_key` flag wins; otherwise a field named `id`.
    fn primary_key(entity: &Ident, members: &[Member<'_>]) -> Result<String, DarlingError> {
        let flagged: Vec<_> = members.iter().filter(|member| member.primary_key).collect();

        match flagged.as_slice() {
            [one] => Ok(one.name.clone()),
            [] => members
                .iter()
                .find(|member| member.role == MemberRole::Attribute && member.name == "id")
                .map(|member| member.name.clone())
                .ok_or_else(|| {
                    DarlingError::custom(
                        "entity needs a field named `id` or one marked #[entity(primary_key)]",
                    )
                    .with_span(entity)
                }),
            [_, second, ..] => Err(DarlingError::custom(
                "only one field can be marked #[entity(primary_key)]",
            )
            .with_span(second.ident)),
        }
    }
}

///
/// CODEGEN
///

fn field_model(member: &Member<'_>) -> TokenStream {
    let Member {
        ty,
        name,
        public_name,
        ..
    } = member;

    quote! {
        ::apiquery::model::FieldModel::new(
            #name,
            #public_name,
            <#ty as ::apiquery::traits::FieldValue>::KIND,
            <#ty as ::apiquery::traits::FieldValue>::NULLABLE,
        )
    }
}

fn relation_model(member: &Member<'_>) -> TokenStream {
    let Member {
        ty,
        name,
        public_name,
        role,
        ..
    } = member;

    let (cardinality, accessor) = if *role == MemberRole::ToOne {
        (quote!(One), quote!(::apiquery::traits::ToOne))
    } else {
        (quote!(Many), quote!(::apiquery::traits::ToMany))
    };

    quote! {
        ::apiquery::model::RelationModel::new(
            #name,
            #public_name,
            ::apiquery::model::Cardinality::#cardinality,
            <<#ty as #accessor>::Target as ::apiquery::traits::EntitySchema>::model,
        )
    }
}

fn value_arm(member: &Member<'_>) -> TokenStream {
    let Member { ident, name, .. } = member;

    quote! {
        #name => Some(::apiquery::traits::FieldValue::to_value(&self.#ident)),
    }
}

fn relation_arm(member: &Member<'_>) -> TokenStream {
    let Member {
        ident, name, role, ..
    } = member;

    if *role == MemberRole::ToOne {
        quote! {
            #name => Some(::apiquery::traits::RelationRef::One(
                ::apiquery::traits::ToOne::target(&self.#ident)
                    .map(|target| target as &dyn ::apiquery::traits::Record),
            )),
        }
    } else {
        quote! {
            #name => Some(::apiquery::traits::RelationRef::Many(
                ::apiquery::traits::ToMany::targets(&self.#ident)
                    .into_iter()
                    .map(|target| target as &dyn ::apiquery::traits::Record)
                    .collect(),
            )),
        }
    }
}

fn shape_stmt(member: &Member<'_>) -> TokenStream {
    let Member {
        ident,
        ty,
        name,
        role,
        ..
    } = member;

    match role {
        MemberRole::Attribute => quote! {
            if mask.has_field(#name) {
                shaped.#ident = ::core::clone::Clone::clone(&self.#ident);
            }
        },
        MemberRole::ToOne => quote! {
            match mask.relation(#name) {
                Some(::apiquery::db::query::RelationMask::Full) => {
                    shaped.#ident = ::core::clone::Clone::clone(&self.#ident);
                }
                Some(::apiquery::db::query::RelationMask::Fields(nested)) => {
                    shaped.#ident = <#ty as ::apiquery::traits::ToOne>::from_target(
                        ::apiquery::traits::ToOne::target(&self.#ident)
                            .map(|target| ::apiquery::traits::Entity::shape(target, nested)),
                    );
                }
                None => {}
            }
        },
        MemberRole::ToMany => quote! {
            match mask.relation(#name) {
                Some(::apiquery::db::query::RelationMask::Full) => {
                    shaped.#ident = ::core::clone::Clone::clone(&self.#ident);
                }
                Some(::apiquery::db::query::RelationMask::Fields(nested)) => {
                    shaped.#ident = <#ty as ::apiquery::traits::ToMany>::from_targets(
                        ::apiquery::traits::ToMany::targets(&self.#ident)
                            .into_iter()
                            .map(|target| ::apiquery::traits::Entity::shape(target, nested))
                            .collect(),
                    );
                }
                None => {}
            }
        },
    }
}
