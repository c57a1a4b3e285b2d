use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Field, Fields, Ident, Type, Variant};

use super::derived_traits;

struct ErrorVariant<'a> {
    ident: &'a Ident,
    source: Option<&'a Field>,
    has_context: bool,
}

impl<'a> ErrorVariant<'a> {
    fn parse(variant: &'a Variant) -> syn::Result<Self> {
        let Fields::Named(fields) = &variant.fields else {
            return Err(syn::Error::new_spanned(
                variant,
                "smem_error variants must use named fields (`message`, `source`, `context`)",
            ));
        };

        let mut has_context = false;
        let mut source = None;

        for field in &fields.named {
            let ident = field.ident.as_ref();
            if ident.is_some_and(|i| i == "context") {
                if !is_context_type(&field.ty) {
                    return Err(syn::Error::new_spanned(
                        &field.ty,
                        "`context` must be `Option<Cow<'static, str>>`",
                    ));
                }
                has_context = true;
            } else if ident.is_some_and(|i| i == "source")
                || has_attr(field, "source")
                || has_attr(field, "from")
            {
                source = Some(field);
            }
        }

        if source.is_some() && !has_context {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                "variants wrapping a source error need `context: Option<Cow<'static, str>>`",
            ));
        }

        Ok(Self { ident: &variant.ident, source, has_context })
    }

    /// `From<Source>` plus a context-aware `Ext` impl for `Result<T, Source>`.
    fn conversions(&self, name: &Ident, ext: &Ident) -> Option<TokenStream> {
        let field = self.source?;
        let binding = field.ident.as_ref()?;
        let ty = &field.ty;
        let variant = self.ident;

        Some(quote! {
            #[automatically_derived]
            impl ::core::convert::From<#ty> for #name {
                #[inline]
                fn from(#binding: #ty) -> Self {
                    Self::#variant { #binding, context: None }
                }
            }

            #[automatically_derived]
            impl<T> #ext<T> for ::core::result::Result<T, #ty> {
                #[inline]
                fn context(
                    self,
                    context: impl Into<::std::borrow::Cow<'static, str>>,
                ) -> ::core::result::Result<T, #name> {
                    self.map_err(|#binding| #name::#variant { #binding, context: Some(context.into()) })
                }
            }
        })
    }
}

pub fn expand(input: DeriveInput) -> TokenStream {
    let Data::Enum(data) = &input.data else {
        return syn::Error::new_spanned(&input.ident, "smem_error can only be applied to enums")
            .to_compile_error();
    };

    let variants = match data.variants.iter().map(ErrorVariant::parse).collect::<syn::Result<Vec<_>>>()
    {
        Ok(variants) => variants,
        Err(err) => return err.to_compile_error(),
    };

    let name = &input.ident;
    let ext = format_ident!("{}Ext", name);
    let derives = missing_derives(&input);
    let ext_trait = ext_trait(name, &ext, &variants);
    let conversions = variants.iter().filter_map(|v| v.conversions(name, &ext));

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #derives
        #input

        #ext_trait
        #(#conversions)*

        #[allow(dead_code, clippy::ref_option)]
        fn format_context(
            context: &Option<::std::borrow::Cow<'static, str>>,
        ) -> ::std::borrow::Cow<'static, str> {
            match context {
                Some(c) => ::std::borrow::Cow::Owned(format!(" ({c})")),
                None => ::std::borrow::Cow::Borrowed(""),
            }
        }
    }
}

fn missing_derives(input: &DeriveInput) -> TokenStream {
    let present = derived_traits(&input.attrs);
    let mut derives = Vec::new();
    if !present.contains("Debug") {
        derives.push(quote!(Debug));
    }
    if !present.contains("Error") {
        derives.push(quote!(::thiserror::Error));
    }

    if derives.is_empty() { quote!() } else { quote!(#[derive(#(#derives),*)]) }
}

fn ext_trait(name: &Ident, ext: &Ident, variants: &[ErrorVariant<'_>]) -> TokenStream {
    let arms = variants.iter().filter(|v| v.has_context).map(|v| {
        let ident = v.ident;
        quote! { #name::#ident { context: slot, .. } => *slot = Some(context.into()), }
    });

    quote! {
        pub trait #ext<T> {
            /// Attaches a human-readable context to the error carried by this result.
            fn context(
                self,
                context: impl Into<::std::borrow::Cow<'static, str>>,
            ) -> ::core::result::Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for ::core::result::Result<T, #name> {
            #[inline]
            #[allow(unused_variables, unreachable_patterns)]
            fn context(self, context: impl Into<::std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut err| {
                    match &mut err {
                        #(#arms)*
                        _ => {}
                    }
                    err
                })
            }
        }
    }
}

fn has_attr(field: &Field, name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(name))
}

/// Accepts `Option<Cow<'static, str>>` with or without a `std::borrow::` path.
fn is_context_type(ty: &Type) -> bool {
    let rendered = quote!(#ty).to_string().replace(' ', "");
    let Some(head) = rendered.strip_suffix("Cow<'static,str>>") else {
        return false;
    };
    head.ends_with("Option<") || (head.contains("Option<") && head.ends_with("borrow::"))
}
