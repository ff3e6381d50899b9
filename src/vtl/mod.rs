/// Mapping-template expression DSL and printer
///
/// Used by every resolver generator to build request/response templates as
/// expression trees and render them deterministically.
pub mod expr;
mod print;

pub use expr::Expression;
pub use print::{print, print_block};
