//! HTTP request handlers.

pub mod hello;
pub mod not_found;
pub mod redirect;

pub use hello::hello_handler;
pub use not_found::not_found_handler;
pub use redirect::redirect_handler;
