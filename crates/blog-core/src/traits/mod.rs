//! Gateway traits (ports) implemented by the infrastructure crates

mod gateways;

pub use gateways::{
    AuthGateway, GatewayResult, HealthProbe, MediaGateway, Notifier, PostGateway,
    ReactionGateway,
};
