pub mod controller;
pub mod extension;
pub mod host;
pub mod lifecycle;
pub mod logging;
pub mod pipeline;
pub mod poller;
pub mod processor;
pub mod settings;
