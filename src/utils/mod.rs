pub mod deadline;
pub mod serde_str;
