//! Turn request/response types exchanged with clients.

pub mod intent;
pub mod request;
pub mod response;

pub use intent::requests_shopping_list;
pub use request::{ControlAction, ControlHints, TurnKind, TurnRequest};
pub use response::TurnResponse;
