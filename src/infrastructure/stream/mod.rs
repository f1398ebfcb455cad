//! Event stream decoding for streamed agent queries.

pub mod decoder;
pub mod errors;
pub mod events;
pub mod handler;

pub use decoder::{decode, decode_stream, DecoderOptions, EventDecoder, Flow};
pub use errors::StreamError;
pub use events::ProgressEvent;
pub use handler::{CallbackHandler, StreamHandler, TerminalRenderer};
