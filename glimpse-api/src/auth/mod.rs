mod backend;
mod extractor;
mod router;

pub use backend::AuthBackend;
pub use backend::AuthSession;
pub use extractor::AuthUser;
pub use router::router;
