// Mods
mod descriptor;
mod packet;
mod registry;


// Re-exports
pub use descriptor::{
	GraphService,
	ServiceDescriptor,
	ServiceDescriptorBase,
};
pub use packet::{
	make_service_packet,
	Packet,
	PacketError,
};
pub use registry::{
	ServiceDescription,
	ServiceMap,
	ServiceRegistrationError,
	ServiceRegistry,
};

// Macros and macro re-exports
pub use graphsvc_macros::*;
