extern crate proc_macro;

macro_rules! bail {
    ($item:expr, $fmt:literal $($tts:tt)*) => {
        return Err(Error::new_spanned(
            &$item,
            format!(concat!("depmemo: ", $fmt) $($tts)*)
        ))
    }
}

mod props;

use proc_macro::TokenStream;
use quote::quote;
use syn::{Error, Result};

/// Derive the `Props` trait for a struct with named fields.
///
/// Every field becomes an input key named like the field and compared with
/// `Same`. Fields can be configured with `#[props(...)]`:
/// - `rename = "key"`: use another key,
/// - `skip`: the field is not an input key,
/// - `children`: the field holds the nested child content. A field named
///   `children` is picked up automatically.
///
/// ```ignore
/// #[derive(Props)]
/// struct Card {
///     title: String,
///     #[props(rename = "onClick")]
///     on_click: Rc<dyn Fn()>,
///     #[props(children)]
///     body: Content,
/// }
/// ```
#[proc_macro_derive(Props, attributes(props))]
pub fn derive_props(stream: TokenStream) -> TokenStream {
    let item = syn::parse_macro_input!(stream as syn::DeriveInput);
    props::expand(&item)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
