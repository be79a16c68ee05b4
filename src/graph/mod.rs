pub mod edge;
pub mod network;
pub mod node;
