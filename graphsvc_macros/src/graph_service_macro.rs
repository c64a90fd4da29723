use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{
	ToTokens, quote,
};
use syn::{
	Generics,
	Ident,
};

use crate::parsing_helpers::get_service_key;


pub fn graph_service(attr: TokenStream, body: TokenStream) -> TokenStream {
	let key = match get_service_key(attr.into()) {
		Ok(key) => key,
		Err(error) => return error.into_compile_error().into(),
	};

	let (item, ident, generics): (proc_macro2::TokenStream, Ident, Generics) = if let Ok(input) = syn::parse::<syn::ItemStruct>(body.clone()) {
		let ident = input.ident.clone();
		let generics = input.generics.clone();
		(input.into_token_stream(), ident, generics)
	} else if let Ok(input) = syn::parse::<syn::ItemEnum>(body.clone()) {
		let ident = input.ident.clone();
		let generics = input.generics.clone();
		(input.into_token_stream(), ident, generics)
	} else {
		return syn::Error::new(Span::call_site(), "graph_service can only be used on a struct or enum")
			.into_compile_error()
			.into();
	};

	// A descriptor names one concrete type, so each instantiation would need its own key
	if !generics.params.is_empty() {
		return syn::Error::new_spanned(generics, "graph_service cannot be used on generic types; declare a ServiceDescriptor per instantiation instead")
			.into_compile_error()
			.into();
	}

	return quote! {
		#item

		impl graphsvc_framework::GraphService for #ident {
			const SERVICE: graphsvc_framework::ServiceDescriptor<Self> = graphsvc_framework::ServiceDescriptor::new(#key);
		}
	}.into();
}
