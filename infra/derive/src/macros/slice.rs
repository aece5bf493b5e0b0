use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Error, Expr, Ident, ItemStruct, Meta, Token};

/// Parsed `#[revive_slice(..)]` arguments.
struct SliceArgs {
    feature: Ident,
    after_boot: Vec<Ident>,
    after_hydrate: Vec<Ident>,
}

fn hook(value: &Expr) -> syn::Result<Ident> {
    match value {
        Expr::Path(path) => path.path.require_ident().cloned(),
        other => Err(Error::new_spanned(other, "expected a method name")),
    }
}

fn parse_args(args: TokenStream) -> syn::Result<SliceArgs> {
    let metas = Punctuated::<Meta, Token![,]>::parse_terminated.parse2(args)?;
    let mut metas = metas.into_iter();
    let feature = match metas.next() {
        Some(Meta::Path(path)) => path.require_ident()?.clone(),
        _ => {
            return Err(Error::new(
                proc_macro2::Span::call_site(),
                "revive_slice expects the served feature, e.g. #[revive_slice(Macros)]",
            ));
        }
    };

    let mut parsed = SliceArgs { feature, after_boot: Vec::new(), after_hydrate: Vec::new() };
    for meta in metas {
        let Meta::NameValue(pair) = &meta else {
            return Err(Error::new_spanned(&meta, "expected `after_boot = method` or `after_hydrate = method`"));
        };
        if pair.path.is_ident("after_boot") {
            parsed.after_boot.push(hook(&pair.value)?);
        } else if pair.path.is_ident("after_hydrate") {
            parsed.after_hydrate.push(hook(&pair.value)?);
        } else {
            return Err(Error::new_spanned(&pair.path, "unknown revive_slice hook"));
        }
    }
    Ok(parsed)
}

/// `#[revive_slice(Macros)]`: the first argument names the `FeatureId` variant the slice
/// serves; `after_boot = m` / `after_hydrate = m` add async methods awaited after the
/// module's own boot or re-hydration.
pub fn expand_slice(args: TokenStream, input: ItemStruct) -> TokenStream {
    let SliceArgs { feature, after_boot, after_hydrate } = match parse_args(args) {
        Ok(args) => args,
        Err(e) => return e.to_compile_error(),
    };

    let wrapper_ident = &input.ident;
    let vis = &input.vis;
    let fields = &input.fields;
    let attrs = &input.attrs;
    let inner_ident = format_ident!("{wrapper_ident}Inner");

    if !fields.iter().any(|f| f.ident.as_ref().is_some_and(|i| i == "module")) {
        return Error::new_spanned(wrapper_ident, "revive_slice needs a `module: FeatureModule<_>` field")
            .to_compile_error();
    }

    quote! {
        #(#attrs)*
        #[derive(Debug)]
        #vis struct #inner_ident #fields

        #[derive(Debug, Clone)]
        #vis struct #wrapper_ident {
            inner: std::sync::Arc<#inner_ident>,
        }

        impl #wrapper_ident {
            pub fn new(inner: #inner_ident) -> Self {
                Self { inner: std::sync::Arc::new(inner) }
            }
        }

        impl std::ops::Deref for #wrapper_ident {
            type Target = #inner_ident;
            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }

        impl ::revive_kernel::domain::registry::FeatureSlice for #wrapper_ident {
            fn feature(&self) -> ::revive_kernel::domain::features::FeatureId {
                ::revive_kernel::domain::features::FeatureId::#feature
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }

        #[::revive_kernel::async_trait]
        impl ::revive_kernel::sync::Lifecycle for #wrapper_ident {
            fn feature(&self) -> ::revive_kernel::domain::features::FeatureId {
                ::revive_kernel::domain::features::FeatureId::#feature
            }

            fn hydration(&self) -> ::revive_kernel::domain::state::HydrationState {
                self.module.hydration_state()
            }

            async fn boot(&self) {
                self.module.boot().await;
                #( self.#after_boot().await; )*
            }

            async fn rehydrate(&self) {
                self.module.hydrate().await;
                #( self.#after_hydrate().await; )*
            }
        }
    }
}
