//! Module Model
//!
//! Everything a loadable plugin module is made of: registered module images,
//! the loader that instantiates an image inside an isolated context, the
//! context and its non-owning observation handle, and the value/type model
//! that arguments cross the isolation boundary with.

// Internal modules - all access should go through api module
pub(crate) mod codec;
pub(crate) mod context;
pub(crate) mod image;
pub(crate) mod loader;
pub(crate) mod registry;
pub(crate) mod value;

// Public API module - the only public interface for the module model
pub mod api;
