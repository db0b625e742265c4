pub mod components;
pub mod dom;
pub mod ids;
pub mod state;
