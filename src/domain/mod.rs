//! Domain records and value types shared by the upstream client, the list
//! state machine and the templates.

pub mod character;
pub mod types;
