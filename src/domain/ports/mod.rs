mod http_dispatch_port;
mod output_port;
mod token_provider_port;

pub use http_dispatch_port::HttpDispatchPort;
pub use output_port::OutputPort;
pub use token_provider_port::TokenProviderPort;
