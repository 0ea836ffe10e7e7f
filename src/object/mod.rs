mod cow;
pub use cow::*;

mod attributes;
pub use attributes::*;

mod vector;
pub use vector::*;
