pub mod decoder;
pub mod info;
pub mod key;
pub mod serial;

pub use decoder::{CertificateDecoder, NativeDecoder, OpensslDecoder};
pub use info::CertificateInfo;
pub use key::{KeyEncoder, KeyRecord, KeyType};
pub use serial::SerialNumber;
