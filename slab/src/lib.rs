mod align;
mod axis;
mod layers;
mod projection;
mod roll;
mod slab_axis;
mod vacuum;

pub use align::*;
pub use axis::*;
pub use layers::*;
pub use projection::*;
pub use roll::*;
pub use slab_axis::*;
pub use vacuum::*;
