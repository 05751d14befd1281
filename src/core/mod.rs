pub mod flow;

pub use flow::{FlowResult, RegistrationFlow};
