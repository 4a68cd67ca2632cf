//! Transport layer: signing and wire-format details (serialization/deserialization).

mod params;
mod percent;
mod response;
mod sign;

pub use params::build_params;
pub use percent::percent_encode;
pub use response::{MalformedResponse, ResponseError, WireFormat, interpret};
pub use sign::{SIGNATURE_FIELD, sign, string_to_sign};
