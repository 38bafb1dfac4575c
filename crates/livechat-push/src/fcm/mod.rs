//! FCM delivery over the legacy HTTP API

mod client;

pub use client::FcmClient;
