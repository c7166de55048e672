use proc_macro::TokenStream;

mod entity;
mod enum_value;

/// Generates the static entity model plus attribute access, relationship
/// access, and sparse-fieldset shaping.
#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive_entity(input.into()).into()
}

#[proc_macro_derive(EnumValue)]
pub fn derive_enum_value(input: TokenStream) -> TokenStream {
    enum_value::derive_enum_value(input.into()).into()
}
