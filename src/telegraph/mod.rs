pub mod builder;
pub mod client;
pub mod error;
pub mod node;
pub mod request;
pub mod transport;
pub mod types;
pub mod vocabulary;

pub use builder::ContentBuilder;
pub use client::Telegraph;
pub use error::{ClientError, DecodeError, NodePath, TransportError, ValidationError};
pub use node::{decode_content, encode_content, validate_content, Node, NodeElement};
pub use transport::{HttpTransport, Transport};
pub use types::{Account, Page, PageList, PageViews, TelegraphResponse, Upload};
pub use vocabulary::{Tag, Vocabulary};
