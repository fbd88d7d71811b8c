// Cover letter generation.
// request_builder → llm_client → response_processor, orchestrated by the controller.

pub mod controller;
pub mod handlers;
pub mod request_builder;
pub mod response_processor;
