pub mod actor_input;
pub mod decision;
pub mod signature_state;
pub mod validation;

pub use actor_input::*;
pub use decision::*;
pub use signature_state::*;
pub use validation::*;
