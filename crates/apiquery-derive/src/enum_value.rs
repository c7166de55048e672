use darling::{Error as DarlingError, FromDeriveInput, FromVariant, ast::Data, util::Ignored};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Ident};

// derive_enum_value
pub fn derive_enum_value(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let enum_input = match EnumInput::from_derive_input(&input) {
        Ok(enum_input) => enum_input,
        Err(err) => return err.write_errors(),
    };

    enum_input
        .expand()
        .unwrap_or_else(DarlingError::write_errors)
}

///
/// EnumInput
///

#[derive(FromDeriveInput)]
#[darling(supports(enum_unit))]
struct EnumInput {
    ident: Ident,
    data: Data<EnumVariant, Ignored>,
}

///
/// EnumVariant
///

#[derive(FromVariant)]
struct EnumVariant {
    ident: Ident,
}

impl EnumInput {
    fn expand(&self) -> Result<TokenStream, DarlingError> {
        let Some(variants) = self.data.as_ref().take_enum() else {
            return Err(
                DarlingError::custom("EnumValue can only be derived for enums")
                    .with_span(&self.ident),
            );
        };
        if variants.is_empty() {
            return Err(
                DarlingError::custom("EnumValue needs at least one variant")
                    .with_span(&self.ident),
            );
        }

        let ident = &self.ident;
        let ident_name = ident.to_string();
        let names: Vec<String> = variants.iter().map(|v| v.ident.to_string()).collect();
        let arms = variants.iter().enumerate().map(|(ordinal, variant)| {
            let variant_ident = &variant.ident;
            let name = variant_ident.to_string();
            let ordinal = u32::try_from(ordinal).unwrap_or(u32::MAX);

            quote! {
                Self::#variant_ident => ::apiquery::value::ValueEnum::new(#name, #ordinal),
            }
        });

        Ok(quote! {
            impl ::apiquery::traits::EnumValue for #ident {
                fn to_value_enum(&self) -> ::apiquery::value::ValueEnum {
                    match self {
                        #(#arms)*
                    }
                }
            }

            impl ::apiquery::traits::FieldValue for #ident {
                const KIND: ::apiquery::model::FieldKind =
                    ::apiquery::model::FieldKind::Enum(&::apiquery::model::EnumModel {
                        path: concat!(module_path!(), "::", #ident_name),
                        variants: &[#(#names),*],
                    });

                fn to_value(&self) -> ::apiquery::value::Value {
                    ::apiquery::value::Value::Enum(
                        ::apiquery::traits::EnumValue::to_value_enum(self),
                    )
                }
            }
        })
    }
}
