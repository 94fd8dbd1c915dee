pub mod events;
pub mod location_flow;
pub mod location_provider;
pub mod permission_gate;
pub mod sync_client;
