use std::sync::Arc;

use crate::{
	GraphServiceError,
	GraphServiceScope,
	GraphServicesConfig,
	ServiceDescriptor,
};

trait Allocator: Send + Sync {
	fn allocate(&self, size: usize) -> Vec<u8>;
}

struct ZeroAllocator;
impl Allocator for ZeroAllocator {
	fn allocate(&self, size: usize) -> Vec<u8> {
		return vec![0; size];
	}
}

const ALLOCATOR: ServiceDescriptor<dyn Allocator> = ServiceDescriptor::new("allocator");
const MODEL_CACHE: ServiceDescriptor<String> = ServiceDescriptor::new("model_cache");

#[test]
fn require_object_names_the_node() {
	let mut scope = GraphServiceScope::root(GraphServicesConfig::default());
	let context = scope.start_run(&[]).unwrap();

	assert_eq!(
		context.for_node("detector").require_object(&MODEL_CACHE).unwrap_err(),
		GraphServiceError::MissingService {
			node: String::from("detector"),
			key: String::from("model_cache"),
		},
	);
	assert_eq!(context.node(), None);
	assert!(matches!(
		context.require_object(&MODEL_CACHE),
		Err(GraphServiceError::MissingService { ref node, .. }) if node == "graph"
	));
}

#[test]
fn objects_outlive_the_graph() {
	let mut scope = GraphServiceScope::root(GraphServicesConfig::default());
	let allocator: Arc<dyn Allocator> = Arc::new(ZeroAllocator);
	scope.set_service_object(&ALLOCATOR, Arc::clone(&allocator)).unwrap();

	let context = scope.start_run(&[]).unwrap();
	let fetched = context.require_object(&ALLOCATOR).unwrap();
	drop(context);
	drop(scope);

	assert_eq!(fetched.allocate(3), vec![0, 0, 0]);
	assert_eq!(Arc::strong_count(&allocator), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn nodes_read_services_in_parallel() {
	let mut scope = GraphServiceScope::root(GraphServicesConfig::default());
	scope.set_service_object(&MODEL_CACHE, Arc::new(String::from("face_model"))).unwrap();
	let context = scope.start_run(&[]).unwrap();

	let tasks = (0..8).map(|i| {
		let context = context.for_node(format!("node_{}", i));
		return tokio::spawn(async move {
			let cache = context.require_object(&MODEL_CACHE)?;
			return Ok::<usize, GraphServiceError>(cache.len());
		});
	}).collect::<Vec<_>>();

	for task in tasks {
		assert_eq!(task.await.unwrap(), Ok(10));
	}
}
