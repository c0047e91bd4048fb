//! Struct `Sample` represents a batch sample.  

// Provides the dataset structure.
pub(crate) mod schema;
// Provides feature struct.
pub(crate) mod feature_struct;
// Provides a single record.
pub(crate) mod instance;
// Provides sample struct.
pub(crate) mod sample_struct;

// Provides a struct that reads a file.
pub(crate) mod sample_reader;


pub use sample_reader::SampleReader;
pub use sample_struct::Sample;
pub use feature_struct::Feature;
pub use instance::Instance;
pub use schema::{Schema, Attribute, AttributeKind};
