use std::sync::Arc;

use anyhow::{
	ensure,
	Context,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use graphsvc_graph::{
	graph_service,
	GraphService,
	GraphServiceScope,
	GraphServicesConfig,
	NodeServiceRequests,
};

#[graph_service("demo.thread_pool")]
struct ThreadPool {
	threads: usize,
}

#[graph_service("demo.cache")]
struct Cache {
	name: &'static str,
}

fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let config = GraphServicesConfig::from_env().context("Couldn't read graph service config")?;
	let mut parent = GraphServiceScope::root(config);

	parent.set_service_object(&ThreadPool::SERVICE, Arc::new(ThreadPool { threads: 4 }))?;
	let mut child = parent.nested();

	let pool = child.get_service_object(&ThreadPool::SERVICE).context("Nested graph didn't inherit the thread pool")?;
	info!(threads = pool.threads, "Nested graph inherited the thread pool");

	parent.set_service_object(&ThreadPool::SERVICE, Arc::new(ThreadPool { threads: 16 }))?;
	parent.set_service_object(&Cache::SERVICE, Arc::new(Cache { name: "parent cache" }))?;
	ensure!(child.get_service_object(&Cache::SERVICE).is_none(), "Nested graph saw a service registered after it was created");

	match child.set_service_object(&Cache::SERVICE, Arc::new(Cache { name: "child cache" })) {
		Ok(()) => info!("Nested graph registered its own cache"),
		Err(err) => info!(%err, "Nested graph refused a new service"),
	}

	let nodes = [
		NodeServiceRequests::new("decoder").uses(&ThreadPool::SERVICE),
		NodeServiceRequests::new("renderer").uses(&ThreadPool::SERVICE).may_use(&Cache::SERVICE),
	];
	let context = parent.start_run(&nodes)?;
	let renderer = context.for_node("renderer");
	let cache = renderer.require_object(&Cache::SERVICE)?;
	info!(cache = cache.name, threads = renderer.require_object(&ThreadPool::SERVICE)?.threads, "Renderer resolved its services");

	let context = child.start_run(&nodes)?;
	info!(
		threads = context.require_object(&ThreadPool::SERVICE)?.threads,
		cache = context.get_object(&Cache::SERVICE).map(|cache| cache.name).unwrap_or("none"),
		"Nested graph resolved its services"
	);

	child.finish_run()?;
	parent.finish_run()?;
	return Ok(());
}
