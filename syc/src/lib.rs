pub mod checksum;
pub mod decoder;
pub mod error;
pub mod payload;
pub mod record;
pub mod section;

pub use checksum::checksum;
pub use decoder::{Decoder, SymbolRecord};
pub use error::Error;
pub use payload::{derive_payload, Payload, PayloadKey};
pub use record::{EmittedRecord, RecordBuilder, RecordSet};
pub use section::SectionKind;
