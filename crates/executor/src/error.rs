//! Error types for schema construction and configuration.
//!
//! Request-time failures use [`ResolutionError`](rownode_core::ResolutionError);
//! the errors here can only happen while a schema is being built.

/// Schema construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Two row types share a display name
    #[error("duplicate row type: {name}")]
    DuplicateType {
        /// The repeated name
        name: String,
    },

    /// Two row types inflect to the same root field
    #[error("root field {field} is generated for both {first} and {second}")]
    DuplicateField {
        /// The colliding field name
        field: String,
        /// Type registered first
        first: String,
        /// Type registered second
        second: String,
    },

    /// A row type's root field collides with the generic node field
    #[error("root field {field} for {type_name} collides with the node field")]
    ReservedField {
        /// The colliding field name
        field: String,
        /// Row type that produced it
        type_name: String,
    },

    /// Configuration is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("config file '{path}': {reason}")]
    Io {
        /// File path
        path: String,
        /// Underlying error
        reason: String,
    },

    /// TOML could not be parsed or produced
    #[error("invalid config: {reason}")]
    Parse {
        /// Parser message
        reason: String,
    },

    /// A value is out of range
    #[error("invalid config value for {key}: {reason}")]
    InvalidValue {
        /// Config key
        key: String,
        /// What is wrong with it
        reason: String,
    },
}
