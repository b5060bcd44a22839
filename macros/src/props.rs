use super::*;

/// Derive `Props` for a struct.
pub fn expand(item: &syn::DeriveInput) -> Result<proc_macro2::TokenStream> {
    let fields: Vec<&syn::Field> = match &item.data {
        syn::Data::Struct(data) => match &data.fields {
            syn::Fields::Named(named) => named.named.iter().collect(),
            syn::Fields::Unit => vec![],
            syn::Fields::Unnamed(_) => {
                bail!(item, "`Props` needs named fields")
            }
        },
        _ => bail!(item, "`Props` can only be derived for structs"),
    };

    let mut inputs = vec![];
    let mut children = None;
    for field in fields {
        let Some(input) = prepare_field(field)? else { continue };
        if input.children {
            if children.is_some() {
                bail!(field, "only one field can hold the children");
            }
            children = Some(input.key.clone());
        }
        inputs.push(input);
    }

    if children.is_none() {
        children = inputs
            .iter()
            .find(|input| input.ident == "children")
            .map(|input| input.key.clone());
    }

    for (i, input) in inputs.iter().enumerate() {
        if inputs[..i].iter().any(|other| other.key == input.key) {
            bail!(input.ident, "duplicate input key `{}`", input.key);
        }
    }

    let name = &item.ident;
    let (impl_gen, type_gen, where_clause) = item.generics.split_for_impl();
    let mut where_clause = where_clause.cloned().unwrap_or_else(|| syn::WhereClause {
        where_token: Default::default(),
        predicates: Default::default(),
    });
    for input in &inputs {
        let ty = &input.ty;
        where_clause.predicates.push(syn::parse_quote! { #ty: ::depmemo::Same });
    }

    let keys: Vec<_> = inputs.iter().map(|input| &input.key).collect();
    let idents = inputs.iter().map(|input| &input.ident);
    let children = children.map(|key| {
        quote! { const CHILDREN: &'static str = #key; }
    });

    Ok(quote! {
        impl #impl_gen ::depmemo::Props for #name #type_gen #where_clause {
            #children

            fn shape() -> ::core::option::Option<&'static [&'static str]> {
                ::core::option::Option::Some(&[#(#keys),*])
            }

            fn keys(&self) -> ::std::borrow::Cow<'_, [&str]> {
                ::std::borrow::Cow::Borrowed(&[#(#keys),*])
            }

            #[allow(unused_variables)]
            fn same_key(&self, other: &Self, key: &str) -> ::core::option::Option<bool> {
                match key {
                    #(#keys => ::core::option::Option::Some(
                        ::depmemo::Same::same(&self.#idents, &other.#idents),
                    ),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

/// Details about a field that is an input.
struct Input {
    ident: syn::Ident,
    ty: syn::Type,
    key: String,
    children: bool,
}

/// Preprocess a field. Returns `None` for skipped fields.
fn prepare_field(field: &syn::Field) -> Result<Option<Input>> {
    let Some(ident) = field.ident.clone() else {
        bail!(field, "`Props` needs named fields");
    };

    let mut key = ident.to_string();
    let mut skip = false;
    let mut children = false;
    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("props")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let lit: syn::LitStr = meta.value()?.parse()?;
                key = lit.value();
            } else if meta.path.is_ident("skip") {
                skip = true;
            } else if meta.path.is_ident("children") {
                children = true;
            } else {
                return Err(meta.error("expected `rename`, `skip` or `children`"));
            }
            Ok(())
        })?;
    }

    if skip {
        if children {
            bail!(field, "the children field cannot be skipped");
        }
        return Ok(None);
    }

    if let Some(raw) = key.strip_prefix("r#") {
        key = raw.into();
    }

    Ok(Some(Input { ident, ty: field.ty.clone(), key, children }))
}
