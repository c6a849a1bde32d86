//! Image provider implementations.

mod mock;
mod unsplash;

pub use mock::MockImageProvider;
pub use self::unsplash::UnsplashImageProvider;
