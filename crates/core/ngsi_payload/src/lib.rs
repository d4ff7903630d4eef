//! Build NGSI v2 entity and subscription payloads from the parameter tables of test steps.
//!
//! A step table is decoded once into `*Input` values: `random=<N>` tokens are
//! replaced and sentinel strings such as `array is empty` become [Field] variants.
//! The input is then resolved against the previous step into a `*Context`,
//! from which payloads are built either as `serde_json` values or, in raw mode,
//! as JSON text keeping the values of the table verbatim.

pub mod entity;
mod field;
mod random;
mod scenario;
mod style;
pub mod subscription;
mod table;

pub use self::entity::AttributeMode;
pub use self::entity::EntitiesPrefix;
pub use self::entity::EntityContext;
pub use self::entity::EntityInput;
pub use self::field::*;
pub use self::random::*;
pub use self::scenario::*;
pub use self::subscription::SubscriptionContext;
pub use self::subscription::SubscriptionInput;
pub use self::table::*;
pub use json_writer::JsonWriterError;
