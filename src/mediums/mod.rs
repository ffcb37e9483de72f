mod metal;
mod opaque;
mod transparent;

pub use self::metal::Metal;
pub use self::opaque::Opaque;
pub use self::transparent::Transparent;
