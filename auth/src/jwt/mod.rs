pub mod claims;
pub mod errors;
pub mod handler;
pub mod issuer;

pub use claims::Claims;
pub use claims::Identity;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use issuer::SessionToken;
pub use issuer::SessionTokenIssuer;
pub use issuer::BEARER_PREFIX;
