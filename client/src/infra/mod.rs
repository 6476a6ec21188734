pub mod dictionary;
pub mod http;
pub mod persistence;
pub mod speech;
