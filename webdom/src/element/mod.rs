mod node;

pub use node::{ElementData, NodeId};
