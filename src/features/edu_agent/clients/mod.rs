mod backend_client;
pub mod contract;

pub use backend_client::BackendClient;
