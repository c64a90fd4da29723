use proc_macro2::Span;
use syn::{
    punctuated::Punctuated,
    parse::Parser,
    Expr,
    Token,
    Lit,
    LitStr,
};

/// Reads the single string literal a service attribute takes as its key.
pub fn get_service_key(input: proc_macro2::TokenStream) -> Result<LitStr, syn::Error> {
    let args = Punctuated::<Expr, Token![,]>::parse_terminated.parse2(input)?;

    let mut args = args.into_iter();
    let key = match (args.next(), args.next()) {
        (Some(Expr::Lit(expr)), None) => match expr.lit {
            Lit::Str(key) => key,
            other => return Err(syn::Error::new_spanned(other, "Service key must be a string literal")),
        },
        (Some(other), None) => return Err(syn::Error::new_spanned(other, "Service key must be a string literal")),
        (None, _) => return Err(syn::Error::new(Span::call_site(), "Missing service key, e.g. #[graph_service(\"thread_pool\")]")),
        (Some(_), Some(extra)) => return Err(syn::Error::new_spanned(extra, "graph_service takes exactly one argument")),
    };

    if key.value().trim().is_empty() {
        return Err(syn::Error::new_spanned(key, "Service key cannot be empty"));
    }

    return Ok(key);
}
