//! Derive macros for the assay validation engine
//!
//! This crate provides `#[derive(Validatable)]`, which wires a plain struct
//! into the traversal engine: it emits an [`Inspect`] impl (so the struct
//! shows up as a nested composite inside other structs) and a
//! [`Validatable`] impl whose schema — field names plus pre-parsed
//! constraint declarations — is built exactly once per type in a
//! `LazyLock`, so the hot validation path never re-parses tag text.
//!
//! # Examples
//!
//! ```rust,ignore
//! use assay::Validatable;
//!
//! #[derive(Validatable)]
//! struct SignUp {
//!     #[validate("required,minlen=3,maxlen=20,alphanum")]
//!     username: String,
//!
//!     #[validate("required,email")]
//!     email: String,
//!
//!     #[validate("omitempty,min=18")]
//!     age: u32,
//!
//!     // Untagged nested composites are still recursed into.
//!     address: Address,
//! }
//! ```
//!
//! Constraint declarations use the comma-separated `name` / `name=param`
//! grammar; the raw strings are carried into the generated schema verbatim
//! and parsed by `assay::schema::Declaration` on first use of the type.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, parse_macro_input};

// ============================================================================
// VALIDATABLE DERIVE
// ============================================================================

/// Derives `Inspect` and `Validatable` for a struct with named fields.
///
/// # Attributes
///
/// - `#[validate("rule,rule=param,...")]` — the field's constraint
///   declaration, evaluated in order by the traversal engine.
/// - `#[validate(rename = "displayName")]` — report the field under a
///   different name (the original struct field name is still recorded).
/// - `#[validate(rename = "displayName", rule = "required")]` — both.
///
/// Fields without a `#[validate]` attribute carry no declaration; if their
/// type is itself a derived composite, the engine recurses into it anyway.
#[proc_macro_derive(Validatable, attributes(validate))]
pub fn derive_validatable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[derive(Validatable)] only supports structs",
        ));
    };
    let Fields::Named(fields) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[derive(Validatable)] requires named fields",
        ));
    };
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[derive(Validatable)] does not support generic structs",
        ));
    }

    let mut schema_entries = Vec::new();
    let mut view_arms = Vec::new();

    for (index, field) in fields.named.iter().enumerate() {
        let ident = field
            .ident
            .as_ref()
            .expect("named fields always have identifiers");
        let ident_str = ident.to_string();

        let attrs = FieldAttrs::from_attributes(&field.attrs)?;
        let display = attrs.rename.unwrap_or_else(|| ident_str.clone());
        let rules = match &attrs.rules {
            Some(text) => quote! { ::core::option::Option::Some(#text) },
            None => quote! { ::core::option::Option::None },
        };

        schema_entries.push(quote! { (#ident_str, #display, #rules) });
        view_arms.push(quote! {
            #index => ::assay::schema::Inspect::view(&self.#ident),
        });
    }

    let name_str = name.to_string();

    Ok(quote! {
        #[automatically_derived]
        impl ::assay::schema::Inspect for #name {
            fn view(&self) -> ::assay::schema::FieldView<'_> {
                ::assay::schema::FieldView::Nested(self)
            }
        }

        #[automatically_derived]
        impl ::assay::schema::Validatable for #name {
            fn schema(&self) -> &'static ::assay::schema::StructSchema {
                static SCHEMA: ::std::sync::LazyLock<::assay::schema::StructSchema> =
                    ::std::sync::LazyLock::new(|| {
                        ::assay::schema::StructSchema::build(
                            #name_str,
                            &[#(#schema_entries),*],
                        )
                    });
                &SCHEMA
            }

            fn field_view(&self, index: usize) -> ::assay::schema::FieldView<'_> {
                match index {
                    #(#view_arms)*
                    _ => ::assay::schema::FieldView::None,
                }
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }
        }
    })
}

// ============================================================================
// ATTRIBUTE PARSING
// ============================================================================

#[derive(Default)]
struct FieldAttrs {
    rules: Option<String>,
    rename: Option<String>,
}

impl FieldAttrs {
    fn from_attributes(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("validate") {
                continue;
            }

            // Short form: #[validate("required,minlen=3")]
            if let Ok(lit) = attr.parse_args::<LitStr>() {
                out.rules = Some(lit.value());
                continue;
            }

            // Long form: #[validate(rename = "x", rule = "required")]
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rule") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.rules = Some(lit.value());
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.rename = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error(
                        "expected #[validate(\"rules\")], #[validate(rule = \"...\")] \
                         or #[validate(rename = \"...\")]",
                    ))
                }
            })?;
        }

        Ok(out)
    }
}
