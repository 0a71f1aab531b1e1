//! Simulation error types
//!
//! Every variant here is a contract violation: the integrator returns it and
//! the current tick is abandoned. Expected absence (optional attributes, a
//! camera target missing for one tick) never reaches this type.

use thiserror::Error;

/// Simulation-level errors
#[derive(Error, Debug)]
pub enum SimError {
    /// A required attribute is absent from an entity
    #[error("entity '{entity}' is missing required attribute '{key}'")]
    MissingAttribute {
        /// Name of the offending entity
        entity: String,
        /// Attribute key
        key: String,
    },

    /// A required attribute holds a value of the wrong type
    #[error("attribute '{key}' of entity '{entity}' is not a {expected}")]
    AttributeType {
        /// Name of the offending entity
        entity: String,
        /// Attribute key
        key: String,
        /// Expected value type
        expected: &'static str,
    },

    /// A physical entity reached the integrator without a material
    #[error("entity '{entity}' has no material")]
    MissingMaterial {
        /// Name of the offending entity
        entity: String,
    },

    /// An entity with the same name is already live
    #[error("an entity named '{0}' is already registered")]
    DuplicateEntity(String),

    /// The camera target could not be resolved where it was required
    #[error("camera '{camera}' cannot resolve target '{target}'")]
    UnresolvedCameraTarget {
        /// Camera name
        camera: String,
        /// Target entity name
        target: String,
    },

    /// An operation needed the current camera but none is set
    #[error("no current camera")]
    NoCamera,
}
