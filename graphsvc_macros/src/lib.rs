extern crate proc_macro;
use proc_macro::TokenStream;

mod graph_service_macro;
mod parsing_helpers;


/// Gives a struct or enum its own service descriptor by implementing
/// `graphsvc_framework::GraphService` for it.
///
/// ```ignore
/// #[graph_service("thread_pool")]
/// pub struct ThreadPool { /* ... */ }
///
/// registry.set_object(&ThreadPool::SERVICE, Arc::new(pool))?;
/// ```
#[proc_macro_attribute]
pub fn graph_service(attr: TokenStream, body: TokenStream) -> TokenStream {
    return graph_service_macro::graph_service(attr, body);
}
