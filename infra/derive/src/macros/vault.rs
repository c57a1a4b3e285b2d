use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Path, parse_quote};

use super::derived_traits;

/// Derives added next to serde unless the item already lists them.
const COMPANION_DERIVES: [&str; 3] = ["Debug", "Clone", "PartialEq"];

/// Expands the `#[vault_model]` attribute.
pub fn expand(args: TokenStream, mut input: DeriveInput) -> TokenStream {
    if !args.is_empty() {
        return syn::Error::new_spanned(args, "vault_model does not take arguments")
            .to_compile_error();
    }
    if matches!(input.data, Data::Union(_)) {
        return syn::Error::new_spanned(&input.ident, "vault_model supports structs and enums only")
            .to_compile_error();
    }

    let present = derived_traits(&input.attrs);
    let mut derives: Vec<Path> = vec![
        parse_quote!(::smem_vault::serde::Serialize),
        parse_quote!(::smem_vault::serde::Deserialize),
    ];
    derives.extend(COMPANION_DERIVES.iter().filter(|name| !present.contains(**name)).map(|name| {
        let ident = format_ident!("{}", name);
        parse_quote!(#ident)
    }));

    // Our derive goes first so user `#[serde(...)]` helpers come after it.
    input.attrs.insert(0, parse_quote!(#[derive(#(#derives),*)]));
    input.attrs.insert(1, parse_quote!(#[serde(crate = "::smem_vault::serde")]));

    let mut generics = input.generics.clone();
    let params: Vec<_> = generics.type_params().map(|param| param.ident.clone()).collect();
    if !params.is_empty() {
        let clause = generics.make_where_clause();
        for ident in params {
            clause.predicates.push(parse_quote!(#ident: ::smem_vault::VaultValue));
        }
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        #input

        #[automatically_derived]
        impl #impl_generics ::smem_vault::VaultValue for #name #ty_generics #where_clause {}
    }
}
