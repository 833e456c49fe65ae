//! Hirecast HTTP server library (gateway router, handlers, error mapping).

pub mod gateway;
