mod client;
mod dev_backend;

pub use client::ApiClient;
#[cfg(test)]
pub use dev_backend::{DevBackend, DevCall, DevReply};
