pub mod compile;
pub mod introspect;
