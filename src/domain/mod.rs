// Domain layer: registration models and the ports the service, form and renderer depend on.

pub mod model;
pub mod ports;

pub use model::{PassId, RegistrationRecord, RegistrationRequest, StoredRegistration};
pub use ports::{DocumentSink, RegistrationApi, RegistrationStore};
