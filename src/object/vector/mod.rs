/// Vectors module
///
/// Typed vectors with their structural attributes. Elements are wrapped in
/// [`OptionNA`] where the type has a missing value, and the five element
/// types are unified under the [`Vector`] enum.
///
pub mod coercion;
pub mod rep;
pub mod types;

mod subset;
pub use subset::*;

mod core;
pub use core::*;
