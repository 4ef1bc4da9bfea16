pub mod cert;
pub mod cli;
pub mod list;
pub mod publisher;
pub mod utils;

pub use cert::{CertificateDecoder, CertificateInfo, KeyEncoder, KeyRecord, KeyType};
pub use list::{generate, GeneratedLists, ListBuilder};
pub use publisher::{OutputDirectory, PublisherEntity};
pub use utils::{errors, paths};
