//! Send NGSI payloads to a context broker, one blocking request at a time.
//!
//! Payloads are validated before being sent: a malformed payload, most likely
//! the result of a broken literal in raw mode, never reaches the wire.

mod client;
mod end_point;
mod error;
mod request;
mod tenant;
mod transport;

pub use self::client::*;
pub use self::end_point::*;
pub use self::error::*;
pub use self::request::*;
pub use self::tenant::*;
pub use self::transport::*;
pub use reqwest::Method;
