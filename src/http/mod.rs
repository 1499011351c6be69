mod client;

pub use client::AuthorizedClient;
